//! Per-game termination and material adjudication

use std::fmt;

use chess_core::{Game, GameResult, Termination};
use shakmaty::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    NaturalEnd(Termination),
    /// The engine held a decisive material lead long enough
    AdvantageEnd,
    /// The model ran out of attempts to produce a legal move
    IllegalEnd,
}

impl GameState {
    /// Result tag for a terminal state; `None` while the game is running.
    pub fn result(self, engine_color: Color) -> Option<GameResult> {
        match self {
            GameState::InProgress => None,
            GameState::NaturalEnd(termination) => Some(termination.result()),
            GameState::AdvantageEnd | GameState::IllegalEnd => {
                Some(GameResult::win_for(engine_color))
            }
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::InProgress => f.write_str("in progress"),
            GameState::NaturalEnd(termination) => write!(f, "{termination}"),
            GameState::AdvantageEnd => f.write_str("material adjudication"),
            GameState::IllegalEnd => f.write_str("illegal move limit"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Adjudicator {
    engine_color: Color,
    threshold: i32,
    required_plies: u32,
    streak: u32,
}

impl Adjudicator {
    pub fn new(engine_color: Color, threshold: i32, required_plies: u32) -> Self {
        Self {
            engine_color,
            threshold,
            required_plies,
            streak: 0,
        }
    }

    /// Consecutive plies the engine has held the lead so far
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Evaluate the game after a ply has been played.
    pub fn after_ply(&mut self, game: &Game) -> GameState {
        if let Some(termination) = game.termination() {
            return GameState::NaturalEnd(termination);
        }

        if game.material_balance(self.engine_color) >= self.threshold {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        if self.streak >= self.required_plies {
            GameState::AdvantageEnd
        } else {
            GameState::InProgress
        }
    }
}
