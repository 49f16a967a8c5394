use std::fmt;

use chrono::NaiveDate;
use shakmaty::Color;

/// PGN result tag of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }

    /// The result seen from the side the engine played.
    pub fn outcome_for(self, engine_color: Color) -> MatchOutcome {
        match (self, engine_color) {
            (GameResult::Draw, _) => MatchOutcome::Draw,
            (GameResult::WhiteWins, Color::White) | (GameResult::BlackWins, Color::Black) => {
                MatchOutcome::EngineWin
            }
            _ => MatchOutcome::ModelWin,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    EngineWin,
    Draw,
    ModelWin,
}

/// A finished game, ready to be written to the transcript.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub engine_color: Color,
    pub result: GameResult,
    /// Human-readable reason, e.g. "checkmate" or "material adjudication".
    pub termination: String,
    pub date: NaiveDate,
    pub uci_moves: Vec<String>, // engine notation
    pub san_moves: Vec<String>,
}

impl GameRecord {
    pub fn outcome(&self) -> MatchOutcome {
        self.result.outcome_for(self.engine_color)
    }
}
