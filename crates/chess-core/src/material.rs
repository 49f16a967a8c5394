//! Material counting for adjudication.

use shakmaty::{Board, Color, Role};

// Piece values for material calculation
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;

/// Piece value (kings count nothing)
pub fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => 0,
    }
}

/// Total material of one side
pub fn side_material(board: &Board, color: Color) -> i32 {
    [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen]
        .into_iter()
        .map(|role| {
            let count = (board.by_color(color) & board.by_role(role)).count() as i32;
            count * role_value(role)
        })
        .sum()
}

/// Material difference, positive when `side` is ahead
pub fn balance(board: &Board, side: Color) -> i32 {
    side_material(board, side) - side_material(board, !side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;
    use shakmaty::{CastlingMode, Chess, Position};

    fn board(fen: &str) -> Board {
        let fen: Fen = fen.parse().unwrap();
        let pos: Chess = fen.into_position(CastlingMode::Standard).unwrap();
        pos.board().clone()
    }

    #[test]
    fn test_start_position_is_level() {
        let b = Board::default();
        assert_eq!(side_material(&b, Color::White), 39);
        assert_eq!(balance(&b, Color::White), 0);
        assert_eq!(balance(&b, Color::Black), 0);
    }

    #[test]
    fn test_balance_is_signed_by_side() {
        // White is missing the queen.
        let b = board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
        assert_eq!(balance(&b, Color::White), -9);
        assert_eq!(balance(&b, Color::Black), 9);
    }

    #[test]
    fn test_minor_pieces_and_rooks() {
        let b = board("4k3/8/8/8/8/8/8/RNB1K3 w - - 0 1");
        assert_eq!(balance(&b, Color::White), 11);
    }
}
