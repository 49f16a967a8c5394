//! Live game state: the position plus the move list in both notations.
//!
//! Every move goes through `shakmaty` before it is stored, so each prefix of
//! the move list is legal. Repetition counts are tracked here because
//! `shakmaty` positions carry no history.

use std::collections::HashMap;
use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};

use crate::error::ChessError;
use crate::game_data::GameResult;
use crate::material;

/// Why a game ended without adjudication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate { winner: Color },
    InsufficientMaterial,
    Stalemate,
    SeventyFiveMoves,
    FivefoldRepetition,
    FiftyMoves,
    ThreefoldRepetition,
}

impl Termination {
    pub fn result(self) -> GameResult {
        match self {
            Termination::Checkmate { winner } => GameResult::win_for(winner),
            _ => GameResult::Draw,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::Checkmate { .. } => "checkmate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::Stalemate => "stalemate",
            Termination::SeventyFiveMoves => "seventy-five-move rule",
            Termination::FivefoldRepetition => "fivefold repetition",
            Termination::FiftyMoves => "fifty-move rule",
            Termination::ThreefoldRepetition => "threefold repetition",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    pos: Chess,
    uci_moves: Vec<String>,
    san_moves: Vec<String>,
    repetitions: HashMap<String, u32>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        let pos = Chess::default();
        let mut repetitions = HashMap::new();
        repetitions.insert(repetition_key(&pos), 1);
        Self {
            pos,
            uci_moves: Vec::new(),
            san_moves: Vec::new(),
            repetitions,
        }
    }

    /// Replay UCI moves from the standard start position.
    pub fn from_uci_moves<I, S>(moves: I) -> Result<Self, ChessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut game = Self::new();
        for mv in moves {
            game.push_uci(mv.as_ref())?;
        }
        Ok(game)
    }

    /// Play a move given in UCI notation (`e2e4`, `e7e8q`, `e1g1`).
    pub fn push_uci(&mut self, text: &str) -> Result<(), ChessError> {
        let uci: UciMove = text
            .parse()
            .map_err(|_| ChessError::InvalidUci(text.to_string()))?;
        let mv = uci.to_move(&self.pos).map_err(|_| ChessError::IllegalMove {
            mv: text.to_string(),
            ply: self.ply(),
        })?;
        self.play(mv);
        Ok(())
    }

    /// Play a move given in SAN (`Nf3`, `exd5`, `O-O`, `e8=Q+`).
    /// Returns the move in UCI notation.
    pub fn push_san(&mut self, text: &str) -> Result<String, ChessError> {
        let mv = self.parse_san(text)?;
        Ok(self.play(mv))
    }

    /// Resolve a SAN move against the current position without playing it.
    pub fn san_to_uci(&self, text: &str) -> Result<String, ChessError> {
        let mv = self.parse_san(text)?;
        Ok(mv.to_uci(CastlingMode::Standard).to_string())
    }

    fn parse_san(&self, text: &str) -> Result<Move, ChessError> {
        let san_plus: SanPlus = text
            .parse()
            .map_err(|_| ChessError::InvalidSan(text.to_string()))?;
        san_plus
            .san
            .to_move(&self.pos)
            .map_err(|_| ChessError::IllegalMove {
                mv: text.to_string(),
                ply: self.ply(),
            })
    }

    fn play(&mut self, mv: Move) -> String {
        let san = San::from_move(&self.pos, mv.clone()).to_string();
        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        self.pos.play_unchecked(mv);

        let suffix = if self.pos.is_checkmate() {
            "#"
        } else if self.pos.is_check() {
            "+"
        } else {
            ""
        };
        self.san_moves.push(format!("{san}{suffix}"));
        self.uci_moves.push(uci.clone());
        *self.repetitions.entry(repetition_key(&self.pos)).or_insert(0) += 1;
        uci
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    /// Half-moves played since the start position.
    pub fn ply(&self) -> usize {
        self.uci_moves.len()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.pos.fullmoves().get()
    }

    pub fn uci_moves(&self) -> &[String] {
        &self.uci_moves
    }

    pub fn san_moves(&self) -> &[String] {
        &self.san_moves
    }

    /// Material balance from `side`'s point of view.
    pub fn material_balance(&self, side: Color) -> i32 {
        material::balance(self.pos.board(), side)
    }

    fn seen(&self, pos: &Chess) -> u32 {
        self.repetitions
            .get(&repetition_key(pos))
            .copied()
            .unwrap_or(0)
    }

    /// Positions reachable with one legal move by the side to move.
    fn successors(&self) -> impl Iterator<Item = Chess> + '_ {
        self.pos.legal_moves().into_iter().map(|mv| {
            let mut next = self.pos.clone();
            next.play_unchecked(mv);
            next
        })
    }

    /// The clock already reads 100, or some move keeps it running to 100.
    fn can_claim_fifty_moves(&self) -> bool {
        let halfmoves = self.pos.halfmoves();
        halfmoves >= 100
            || (halfmoves >= 99 && self.successors().any(|next| next.halfmoves() >= 100))
    }

    /// The position occurred three times, or some move makes it occur a third time.
    fn can_claim_threefold(&self) -> bool {
        self.seen(&self.pos) >= 3 || self.successors().any(|next| self.seen(&next) >= 2)
    }

    /// Terminal state of the current position, claimable draws included.
    pub fn termination(&self) -> Option<Termination> {
        if self.pos.is_checkmate() {
            return Some(Termination::Checkmate {
                winner: !self.pos.turn(),
            });
        }
        if self.pos.is_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if self.pos.is_stalemate() {
            return Some(Termination::Stalemate);
        }
        if self.pos.halfmoves() >= 150 {
            return Some(Termination::SeventyFiveMoves);
        }
        if self.seen(&self.pos) >= 5 {
            return Some(Termination::FivefoldRepetition);
        }
        if self.can_claim_fifty_moves() {
            return Some(Termination::FiftyMoves);
        }
        if self.can_claim_threefold() {
            return Some(Termination::ThreefoldRepetition);
        }
        None
    }
}

/// Position identity for repetition: placement, side, castling and legal ep square.
fn repetition_key(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal)
        .to_string()
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_sans(game: &mut Game, sans: &[&str]) {
        for san in sans {
            game.push_san(san).unwrap();
        }
    }

    fn game_from_fen(fen: &str) -> Game {
        let fen: Fen = fen.parse().unwrap();
        let pos: Chess = fen.into_position(CastlingMode::Standard).unwrap();
        let mut repetitions = HashMap::new();
        repetitions.insert(repetition_key(&pos), 1);
        Game {
            pos,
            uci_moves: Vec::new(),
            san_moves: Vec::new(),
            repetitions,
        }
    }

    #[test]
    fn test_push_san_returns_uci() {
        let mut game = Game::new();
        assert_eq!(game.push_san("e4").unwrap(), "e2e4");
        assert_eq!(game.push_san("e5").unwrap(), "e7e5");
        assert_eq!(game.push_san("Nf3").unwrap(), "g1f3");
        assert_eq!(game.uci_moves(), ["e2e4", "e7e5", "g1f3"]);
        assert_eq!(game.san_moves(), ["e4", "e5", "Nf3"]);
        assert_eq!(game.fullmove_number(), 2);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_castling_uses_king_destination() {
        let mut game = Game::new();
        play_sans(&mut game, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);
        assert_eq!(game.push_san("O-O").unwrap(), "e1g1");
        assert_eq!(game.san_moves().last().unwrap(), "O-O");
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let mut game = Game::new();
        assert!(matches!(game.push_san("e5"), Err(ChessError::IllegalMove { .. })));
        assert!(matches!(game.push_san("hello"), Err(ChessError::InvalidSan(_))));
        assert!(matches!(game.push_uci("e2e5"), Err(ChessError::IllegalMove { .. })));
        assert!(matches!(game.push_uci("zz"), Err(ChessError::InvalidUci(_))));
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn test_fools_mate_is_checkmate() {
        let mut game = Game::new();
        play_sans(&mut game, &["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(
            game.termination(),
            Some(Termination::Checkmate { winner: Color::Black })
        );
        assert_eq!(game.san_moves().last().unwrap(), "Qh4#");
        assert_eq!(game.termination().unwrap().result(), GameResult::BlackWins);
    }

    #[test]
    fn test_threefold_repetition_is_claimed() {
        let mut game = Game::new();
        play_sans(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1"]);
        assert_eq!(game.termination(), Some(Termination::ThreefoldRepetition));
        game.push_san("Ng8").unwrap();
        assert_eq!(game.termination(), Some(Termination::ThreefoldRepetition));
        assert_eq!(game.termination().unwrap().result(), GameResult::Draw);
    }

    #[test]
    fn test_threefold_needs_a_move_reaching_a_third_occurrence() {
        let mut game = Game::new();
        play_sans(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6"]);
        // Ng1 only reaches a position seen once before
        assert_eq!(game.termination(), None);
    }

    #[test]
    fn test_fivefold_repetition_ends_the_game() {
        let mut game = Game::new();
        for _ in 0..4 {
            play_sans(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8"]);
        }
        assert_eq!(game.termination(), Some(Termination::FivefoldRepetition));
    }

    #[test]
    fn test_stalemate() {
        let game = game_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(game.termination(), Some(Termination::Stalemate));
        assert_eq!(game.termination().unwrap().result(), GameResult::Draw);
    }

    #[test]
    fn test_insufficient_material() {
        let game = game_from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1");
        assert_eq!(game.termination(), Some(Termination::InsufficientMaterial));
    }

    #[test]
    fn test_fifty_move_rule_is_claimed() {
        let game = game_from_fen("8/8/8/4k3/8/8/R7/4K3 w - - 100 80");
        assert_eq!(game.termination(), Some(Termination::FiftyMoves));
    }

    #[test]
    fn test_fifty_move_claim_by_next_move() {
        let game = game_from_fen("8/8/8/4k3/8/8/R7/4K3 w - - 99 80");
        assert_eq!(game.termination(), Some(Termination::FiftyMoves));
        let game = game_from_fen("8/8/8/4k3/8/8/R7/4K3 w - - 98 80");
        assert_eq!(game.termination(), None);
    }

    #[test]
    fn test_seventy_five_move_rule() {
        let game = game_from_fen("8/8/8/4k3/8/8/R7/4K3 w - - 150 100");
        assert_eq!(game.termination(), Some(Termination::SeventyFiveMoves));
    }

    #[test]
    fn test_san_to_uci_does_not_play() {
        let game = Game::new();
        assert_eq!(game.san_to_uci("Nf3").unwrap(), "g1f3");
        assert_eq!(game.san_to_uci("e4+").unwrap(), "e2e4");
        assert_eq!(game.ply(), 0);
    }

    #[test]
    fn test_from_uci_moves_replays() {
        let game = Game::from_uci_moves(["e2e4", "c7c5"]).unwrap();
        assert_eq!(game.san_moves(), ["e4", "c5"]);
        assert!(Game::from_uci_moves(["e2e4", "e2e4"]).is_err());
    }
}
