//! Exhaustive minimax search with value-bound pruning
//!
//! The 3x3 game tree is small (recursion depth at most nine), so the
//! searcher walks it to the leaves. X maximizes and O minimizes the
//! terminal value; the convention is fixed because it is tied to the
//! utility definition (+1 X win, -1 O win, 0 draw). The only shortcut is
//! a local cutoff: a side stops scanning its own candidates once one of
//! them reaches the best value that side can ever achieve. No bounds are
//! threaded through the recursion.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::Board;
//! use tictactoe::search::Searcher;
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&Board::new()).expect("empty board is valid");
//!
//! // Perfect play from the opening is a draw
//! assert_eq!(result.value, 0);
//! assert!(result.best_move.is_some());
//! ```

use thiserror::Error;

use crate::board::{Board, Mark, Square};
use crate::rules::{is_terminal, utility};

/// Error raised when a board could not have come from alternating play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidBoardError {
    /// X opens, so X holds either as many marks as O or exactly one more
    #[error("inconsistent mark counts: {xs} X vs {os} O")]
    MarkCountSkew { xs: u32, os: u32 },
}

/// Check that the mark counts describe a reachable position
pub fn validate(board: &Board) -> Result<(), InvalidBoardError> {
    let xs = board.marks(Mark::X).count();
    let os = board.marks(Mark::O).count();
    if xs == os || xs == os + 1 {
        Ok(())
    } else {
        Err(InvalidBoardError::MarkCountSkew { xs, os })
    }
}

/// Search result: the move to make and its game-theoretic value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` only on terminal boards
    pub best_move: Option<Square>,
    /// Value with perfect play from here: +1 X win, -1 O win, 0 draw
    pub value: i32,
    /// Positions visited, including the root
    pub nodes: u64,
}

/// Exhaustive searcher
///
/// Carries no state between calls apart from the node counter, which is
/// reset on every [`Searcher::search`]: the same board always yields the
/// same result.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Compute the optimal move for the side to move
    ///
    /// Terminal boards return `(utility, None)`; there is no move to
    /// make. Candidates are tried in ascending cell order and ties keep
    /// the first one found, so results are reproducible.
    pub fn search(&mut self, board: &Board) -> Result<SearchResult, InvalidBoardError> {
        validate(board)?;
        self.nodes = 0;
        let (value, best_move) = self.minimax(*board);
        Ok(SearchResult {
            best_move,
            value,
            nodes: self.nodes,
        })
    }

    fn minimax(&mut self, board: Board) -> (i32, Option<Square>) {
        self.nodes += 1;

        if is_terminal(&board) {
            return (utility(&board), None);
        }

        let mover = board.to_move();
        let maximizing = mover == Mark::X;
        let winning_value = if maximizing { 1 } else { -1 };

        // Start outside the utility range so the first candidate is kept
        let mut best_value = -2 * winning_value;
        let mut best_move = None;

        for sq in board.legal_moves() {
            let (value, _) = self.minimax(board.place(sq, mover));

            let better = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if better {
                best_value = value;
                best_move = Some(sq);

                // Cutoff: nothing beats a proven win for this side
                if best_value == winning_value {
                    break;
                }
            }
        }

        (best_value, best_move)
    }
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

    fn search(board: &Board) -> SearchResult {
        Searcher::new().search(board).expect("test board is valid")
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let result = search(&Board::new());
        assert_eq!(result.value, 0);
        // Lowest-index tie-break: every opening draws, so cell 0 is kept
        assert_eq!(result.best_move, Some(Square::new(0)));
        assert!(result.nodes > 1);
    }

    #[test]
    fn test_takes_immediate_win_for_x() {
        // X completes the top row at 2
        let board = board_of(&[0, 1], &[3, 4]);
        let result = search(&board);
        assert_eq!(result.best_move, Some(Square::new(2)));
        assert_eq!(result.value, 1);
    }

    #[test]
    fn test_takes_immediate_win_for_o() {
        // O to move; O completes the middle row at 5 while cell 1 only
        // postpones the loss
        let board = board_of(&[0, 2, 8], &[3, 4]);
        let result = search(&board);
        assert_eq!(result.best_move, Some(Square::new(5)));
        assert_eq!(result.value, -1);
    }

    #[test]
    fn test_blocks_opponent_line() {
        // X to move with no win of its own; O threatens 3,4,_ so X must
        // take 5
        let board = board_of(&[0, 8], &[3, 4]);
        let result = search(&board);
        assert_eq!(result.best_move, Some(Square::new(5)));
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_terminal_win_returns_no_move() {
        let board = board_of(&[0, 1, 2], &[3, 4]);
        let result = search(&board);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, 1);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_full_draw_returns_no_move() {
        // X O X / X O O / O X X
        let board = board_of(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        let result = search(&board);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_search_is_idempotent() {
        let board = board_of(&[4], &[0]);
        let mut searcher = Searcher::new();
        let first = searcher.search(&board).unwrap();
        let second = searcher.search(&board).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_center_reply_draws_corner_opening_game() {
        // O to move against the center opening; only a corner holds the
        // draw, and the tie-break picks the first corner
        let board = board_of(&[4], &[]);
        let result = search(&board);
        assert_eq!(result.value, 0);
        assert_eq!(result.best_move, Some(Square::new(0)));
    }

    #[test]
    fn test_rejects_skewed_mark_counts() {
        let board = board_of(&[0, 1, 2], &[]);
        assert_eq!(
            Searcher::new().search(&board),
            Err(InvalidBoardError::MarkCountSkew { xs: 3, os: 0 })
        );

        let board = board_of(&[], &[0, 1]);
        assert!(Searcher::new().search(&board).is_err());
    }

    #[test]
    fn test_top_row_completion_from_snapshot() {
        // A caller-supplied snapshot X X _ / O O _ / _ _ _: four cells
        // occupied so X is to move, and completing the top row wins
        let x = Some(Mark::X);
        let o = Some(Mark::O);
        let board = Board::from_cells([x, x, None, o, o, None, None, None, None]);
        assert_eq!(board.to_move(), Mark::X);

        let result = search(&board);
        assert_eq!(result.best_move, Some(Square::new(2)));
        assert_eq!(result.value, 1);
    }

    #[test]
    fn test_win_preferred_over_slow_lines() {
        // X can win at 2 (top row); any slower plan gives O time
        let board = board_of(&[0, 1, 4], &[3, 6, 5]);
        let result = search(&board);
        assert_eq!(result.best_move, Some(Square::new(2)));
        assert_eq!(result.value, 1);
    }
}
