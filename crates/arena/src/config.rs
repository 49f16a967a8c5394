//! Arena configuration from environment variables (and `.env` for local runs)

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ArenaError;

#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Path to the UCI engine binary
    pub engine_path: String,

    /// Network weights passed as `-w <path>`
    pub engine_weights: Option<String>,

    /// Extra engine command-line arguments
    pub engine_args: Vec<String>,

    /// Node budget per engine move
    pub engine_nodes: u32,

    /// Player names used in PGN headers and progress output
    pub engine_name: String,
    pub model_name: String,

    /// Completion API settings
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_api_key: Option<String>,
    pub api_key_path: PathBuf,
    pub max_tokens: u32,

    /// Temperature of the first request for a ply, and of every retry
    pub base_temperature: f32,
    pub retry_temperature: f32,

    /// Consecutive unparseable completions before the model forfeits
    pub illegal_move_limit: u32,

    /// Material lead (engine's view) that counts toward adjudication
    pub advantage_threshold: i32,

    /// Consecutive plies at or above the threshold that end the game
    pub advantage_plies: u32,

    pub openings_path: PathBuf,
    pub prompt_header_path: PathBuf,
    pub game_log_dir: PathBuf,
    pub illegal_move_dir: PathBuf,
}

impl ArenaConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ArenaError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable lookup; unset values take defaults.
    pub fn from_vars<F>(var: F) -> Result<Self, ArenaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());
        let path = |name: &str, default: &str| PathBuf::from(string(name, default));

        let engine_args = string("ENGINE_ARGS", "--backend=blas")
            .split_whitespace()
            .map(String::from)
            .collect();

        let config = Self {
            engine_path: string("ENGINE_PATH", "lc0"),
            engine_weights: var("ENGINE_WEIGHTS").filter(|w| !w.is_empty()),
            engine_args,
            engine_nodes: parse_var(&var, "ENGINE_NODES", 1)?,
            engine_name: string("ENGINE_NAME", "Leela"),
            model_name: string("MODEL_NAME", "GPT"),
            openai_model: string("OPENAI_MODEL", "gpt-3.5-turbo-instruct"),
            openai_base_url: string("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_api_key: var("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            api_key_path: path("OPENAI_API_KEY_FILE", "openai_api_key.txt"),
            max_tokens: parse_var(&var, "MAX_TOKENS", 5)?,
            base_temperature: parse_var(&var, "BASE_TEMPERATURE", 0.0)?,
            retry_temperature: parse_var(&var, "RETRY_TEMPERATURE", 1.0)?,
            illegal_move_limit: parse_var(&var, "ILLEGAL_MOVE_LIMIT", 5)?,
            advantage_threshold: parse_var(&var, "ADVANTAGE_THRESHOLD", 5)?,
            advantage_plies: parse_var(&var, "ADVANTAGE_PLIES", 10)?,
            openings_path: path("OPENINGS_PATH", "openings.txt"),
            prompt_header_path: path("PGN_HEADERS_PATH", "pgn_headers.txt"),
            game_log_dir: path("GAME_LOG_DIR", "game_logs"),
            illegal_move_dir: path("ILLEGAL_MOVE_DIR", "illegal_moves"),
        };

        if config.illegal_move_limit == 0 {
            return Err(ArenaError::Config("ILLEGAL_MOVE_LIMIT must be at least 1"));
        }
        if config.advantage_plies == 0 {
            return Err(ArenaError::Config("ADVANTAGE_PLIES must be at least 1"));
        }

        Ok(config)
    }

    /// Command-line arguments for the engine process
    pub fn engine_command_args(&self) -> Vec<String> {
        let mut args = self.engine_args.clone();
        if let Some(weights) = &self.engine_weights {
            args.push("-w".to_string());
            args.push(weights.clone());
        }
        args
    }

    /// Short name of the engine network (or binary) used in output file names
    pub fn network_name(&self) -> String {
        let source = self.engine_weights.as_deref().unwrap_or(&self.engine_path);
        Path::new(source)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string())
    }

    /// `{game_log_dir}/{network}_{timestamp}_temp{base_temperature}.pgn`
    pub fn transcript_path(&self, timestamp: &str) -> PathBuf {
        self.game_log_dir.join(format!(
            "{}_{timestamp}_temp{}.pgn",
            self.network_name(),
            self.base_temperature
        ))
    }

    /// `{illegal_move_dir}/illegal_moves_{timestamp}.txt`
    pub fn illegal_log_path(&self, timestamp: &str) -> PathBuf {
        self.illegal_move_dir
            .join(format!("illegal_moves_{timestamp}.txt"))
    }
}

fn parse_var<F, T>(var: &F, name: &'static str, default: T) -> Result<T, ArenaError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ArenaError::InvalidSetting { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<ArenaConfig, ArenaError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ArenaConfig::from_vars(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.engine_path, "lc0");
        assert_eq!(config.engine_nodes, 1);
        assert_eq!(config.openai_model, "gpt-3.5-turbo-instruct");
        assert_eq!(config.max_tokens, 5);
        assert_eq!(config.base_temperature, 0.0);
        assert_eq!(config.retry_temperature, 1.0);
        assert_eq!(config.illegal_move_limit, 5);
        assert_eq!(config.advantage_threshold, 5);
        assert_eq!(config.advantage_plies, 10);
        assert_eq!(config.engine_command_args(), ["--backend=blas"]);
    }

    #[test]
    fn test_engine_args_and_network_name() {
        let config = config_with(&[
            ("ENGINE_PATH", "/opt/lc0/lc0"),
            ("ENGINE_WEIGHTS", "/opt/lc0/BT4-1740.pb.gz"),
            ("ENGINE_ARGS", "--backend=blas --threads=1"),
        ])
        .unwrap();
        assert_eq!(
            config.engine_command_args(),
            ["--backend=blas", "--threads=1", "-w", "/opt/lc0/BT4-1740.pb.gz"]
        );
        assert_eq!(config.network_name(), "BT4-1740.pb.gz");
        assert_eq!(
            config.transcript_path("2025-02-10_1200"),
            PathBuf::from("game_logs/BT4-1740.pb.gz_2025-02-10_1200_temp0.pgn")
        );
        assert_eq!(
            config.illegal_log_path("2025-02-10_1200"),
            PathBuf::from("illegal_moves/illegal_moves_2025-02-10_1200.txt")
        );
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = config_with(&[("ENGINE_NODES", "lots")]).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidSetting { name: "ENGINE_NODES", .. }));

        let err = config_with(&[("ILLEGAL_MOVE_LIMIT", "0")]).unwrap_err();
        assert!(matches!(err, ArenaError::Config(_)));
    }
}
