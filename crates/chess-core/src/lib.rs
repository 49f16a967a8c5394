//! Chess helpers shared by the arena: game state, openings, material and PGN.

pub mod error;
pub mod game;
pub mod game_data;
pub mod material;
pub mod opening;
pub mod pgn;

pub use error::ChessError;
pub use game::{Game, Termination};
pub use game_data::{GameRecord, GameResult, MatchOutcome};
pub use opening::Opening;
