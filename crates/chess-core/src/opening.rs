//! Opening lines that seed each pair of games.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ChessError;
use crate::game::Game;

static MOVE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.+").expect("valid move number regex"));

/// Strip a leading move-number prefix such as `1.`, `12...` or a bare `.`.
/// Returns the remainder and whether anything was removed.
pub fn strip_move_number(token: &str) -> (&str, bool) {
    match MOVE_NUMBER_RE.find(token) {
        Some(m) => (&token[m.end()..], true),
        None => (token, false),
    }
}

/// One opening line, in SAN as written and in UCI for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub text: String,
    pub san_moves: Vec<String>,
    pub uci_moves: Vec<String>,
}

impl Opening {
    /// Parse a line like `1. e4 c5 2. Nf3 d6` (or `1.e4 c5 2.Nf3 d6`).
    pub fn parse(line: &str) -> Result<Self, ChessError> {
        let text = line.trim().to_string();
        let mut game = Game::new();
        let mut san_moves = Vec::new();

        for token in text.split_whitespace() {
            let (san, _) = strip_move_number(token);
            if san.is_empty() {
                continue;
            }
            game.push_san(san).map_err(|e| ChessError::Opening {
                line: text.clone(),
                source: Box::new(e),
            })?;
            san_moves.push(san.to_string());
        }

        Ok(Self {
            text,
            san_moves,
            uci_moves: game.uci_moves().to_vec(),
        })
    }
}

/// Parse every non-blank line of an openings file.
pub fn parse_openings(contents: &str) -> Result<Vec<Opening>, ChessError> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Opening::parse)
        .collect()
}
