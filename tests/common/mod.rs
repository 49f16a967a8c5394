use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use arena::completion::Completer;
use arena::config::ArenaConfig;
use arena::engine::MoveEngine;
use arena::error::ArenaError;

pub const HEADER: &str = "[White \"Magnus Carlsen\"]\n[Black \"Garry Kasparov\"]\n\n";

/// Generate a unique suffix based on timestamp to avoid collisions.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", std::process::id(), ts % 1_000_000_000)
}

/// Fresh directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{prefix}-{}", unique_suffix()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Default configuration, as if no environment variables were set.
pub fn config() -> ArenaConfig {
    ArenaConfig::from_vars(|_| None).unwrap()
}

/// Engine that replays a fixed list of UCI moves.
pub struct ScriptedEngine {
    moves: VecDeque<String>,
    pub positions: Vec<Vec<String>>,
}

impl ScriptedEngine {
    pub fn new(moves: &[&str]) -> Self {
        Self {
            moves: moves.iter().map(|m| m.to_string()).collect(),
            positions: Vec::new(),
        }
    }
}

impl MoveEngine for ScriptedEngine {
    async fn best_move(&mut self, moves: &[String]) -> Result<String, ArenaError> {
        self.positions.push(moves.to_vec());
        self.moves.pop_front().ok_or(ArenaError::EngineClosed)
    }
}

/// Completer that replays fixed completions and records every request.
pub struct ScriptedCompleter {
    replies: VecDeque<String>,
    pub prompts: Vec<String>,
    pub temperatures: Vec<f32>,
}

impl ScriptedCompleter {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            prompts: Vec::new(),
            temperatures: Vec::new(),
        }
    }
}

impl Completer for ScriptedCompleter {
    async fn complete(&mut self, prompt: &str, temperature: f32) -> Result<String, ArenaError> {
        self.prompts.push(prompt.to_string());
        self.temperatures.push(temperature);
        self.replies
            .pop_front()
            .ok_or_else(|| ArenaError::Completion("script exhausted".into()))
    }
}
