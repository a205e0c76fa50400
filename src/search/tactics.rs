//! Immediate completing-move detection
//!
//! Cheap pattern scan that finds a move finishing a line for one side.
//! The engine runs it twice per turn: take an own immediate win, then
//! block the opponent's. Full search is bypassed when either fires, so
//! obvious tactical replies cost eight mask checks instead of a tree
//! walk.

use crate::board::{Board, Mark, Square};
use crate::rules::win::LINE_MASKS;

/// Find a move that completes a line for `mark`
///
/// Scans the eight lines in fixed order and returns the vacant cell of
/// the first line holding exactly two of `mark`'s marks and one vacant
/// cell. When several lines qualify, the earliest in the enumeration
/// wins; `None` when no line qualifies.
pub fn find_completing_move(board: &Board, mark: Mark) -> Option<Square> {
    let mine = board.marks(mark);
    let occupied = board.occupied();

    for mask in LINE_MASKS {
        if mine.intersection(mask).count() == 2 && occupied.intersection(mask).count() == 2 {
            // Two of ours and the third cell vacant: that cell completes
            // the line
            return mask.intersection(occupied.complement()).iter_ones().next();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(xs: &[u8], os: &[u8]) -> Board {
        let mut board = Board::new();
        for &i in xs {
            board = board.place(Square::new(i), Mark::X);
        }
        for &i in os {
            board = board.place(Square::new(i), Mark::O);
        }
        board
    }

    #[test]
    fn test_completes_row() {
        let board = board_of(&[0, 1], &[3, 4]);
        assert_eq!(find_completing_move(&board, Mark::X), Some(Square::new(2)));
        assert_eq!(find_completing_move(&board, Mark::O), Some(Square::new(5)));
    }

    #[test]
    fn test_completes_column() {
        let board = board_of(&[0, 4], &[2, 5]);
        assert_eq!(find_completing_move(&board, Mark::O), Some(Square::new(8)));

        // Same column with X sitting on 8: blocked, nothing for O
        let board = board_of(&[0, 8], &[2, 5]);
        assert_eq!(find_completing_move(&board, Mark::O), None);
    }

    #[test]
    fn test_completes_diagonal() {
        let board = board_of(&[0, 8], &[1, 5]);
        assert_eq!(find_completing_move(&board, Mark::X), Some(Square::new(4)));
    }

    #[test]
    fn test_blocked_line_does_not_qualify() {
        // X holds 0 and 1 but O sits on 2: nothing to complete
        let board = board_of(&[0, 1], &[2]);
        assert_eq!(find_completing_move(&board, Mark::X), None);
    }

    #[test]
    fn test_none_on_empty_and_sparse_boards() {
        assert_eq!(find_completing_move(&Board::new(), Mark::X), None);
        let board = board_of(&[4], &[0]);
        assert_eq!(find_completing_move(&board, Mark::X), None);
        assert_eq!(find_completing_move(&board, Mark::O), None);
    }

    #[test]
    fn test_first_line_wins_ties() {
        // X threatens both row 0,1,_ and column 0,3,_; the row is earlier
        // in the line table
        let board = board_of(&[0, 1, 3], &[4, 8]);
        assert_eq!(find_completing_move(&board, Mark::X), Some(Square::new(2)));
    }

    #[test]
    fn test_ignores_opponent_marks_on_line() {
        // Row 3,4,5 holds O,O,X: no vacant cell, nothing for O
        let board = board_of(&[5], &[3, 4]);
        assert_eq!(find_completing_move(&board, Mark::O), None);
    }
}
