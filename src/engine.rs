//! Move-selection engine integrating tactics and full search
//!
//! The engine decides moves through a priority ladder:
//!
//! 1. **Opening**: take the center of an empty board
//! 2. **Tactical win**: complete an own line this turn
//! 3. **Tactical block**: deny the opponent's completing move
//! 4. **Minimax**: exhaustive search over the remaining game tree
//!
//! The tactical rungs are a speed shortcut, not a different policy: when
//! they fire, the move they pick carries the same game-theoretic value
//! as a full search, though among several equally good cells the chosen
//! index can differ. [`Strategy::Exhaustive`] disables the ladder and
//! routes every decision through search, which makes the two paths
//! independently testable.
//!
//! # Example
//!
//! ```
//! use tictactoe::{Board, Engine, Square};
//!
//! let mut engine = Engine::new();
//! let board = Board::new();
//!
//! let result = engine.choose_move(&board).expect("empty board is valid");
//! assert_eq!(result.best_move, Some(Square::new(4)));
//! ```

use std::time::Instant;

use crate::board::{Board, Mark, Square};
use crate::rules::is_terminal;
use crate::search::{find_completing_move, validate, InvalidBoardError, SearchResult, Searcher};

/// Center cell, the fixed reply on an empty board
const CENTER: Square = Square::new(4);

/// Which decision path produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Fixed center reply on the opening position
    Opening,
    /// Completed an own line this turn
    TacticalWin,
    /// Denied the opponent's completing move
    TacticalBlock,
    /// Exhaustive minimax result
    Minimax,
}

/// Move-selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Tactical shortcuts first, search as the fallback
    #[default]
    TacticsFirst,
    /// Every decision through exhaustive search
    Exhaustive,
}

/// Result of a move request with search statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Move to make; `None` only when the game is already over
    pub best_move: Option<Square>,
    /// Game-theoretic value where the path proves one: +1/-1 for wins
    /// and all minimax results. A tactical block reports 0 without
    /// claiming the game is drawn.
    pub value: i32,
    /// Decision path that produced the move
    pub kind: SearchKind,
    /// Positions visited
    pub nodes: u64,
    /// Wall-clock time spent choosing
    pub time_ms: u64,
}

impl MoveResult {
    /// Create a result for the fixed opening reply
    #[inline]
    fn opening(sq: Square, time_ms: u64) -> Self {
        Self {
            best_move: Some(sq),
            value: 0,
            kind: SearchKind::Opening,
            nodes: 1,
            time_ms,
        }
    }

    /// Create a result for an immediate winning move
    #[inline]
    fn tactical_win(sq: Square, mover: Mark, time_ms: u64) -> Self {
        Self {
            best_move: Some(sq),
            value: match mover {
                Mark::X => 1,
                Mark::O => -1,
            },
            kind: SearchKind::TacticalWin,
            nodes: 1,
            time_ms,
        }
    }

    /// Create a result for a blocking move
    #[inline]
    fn tactical_block(sq: Square, time_ms: u64) -> Self {
        Self {
            best_move: Some(sq),
            value: 0,
            kind: SearchKind::TacticalBlock,
            nodes: 1,
            time_ms,
        }
    }

    /// Create a result from a full search
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            value: result.value,
            kind: SearchKind::Minimax,
            nodes: result.nodes,
            time_ms,
        }
    }
}

/// Move-selection engine
///
/// Owns a [`Searcher`] and a [`Strategy`]; holds no game state, so one
/// engine serves any number of boards and repeated calls on the same
/// board return the same result.
#[derive(Debug, Default)]
pub struct Engine {
    searcher: Searcher,
    strategy: Strategy,
}

impl Engine {
    /// Create an engine with tactical shortcuts enabled
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Strategy::TacticsFirst)
    }

    /// Create an engine with the given move-selection policy
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            searcher: Searcher::new(),
            strategy,
        }
    }

    /// Get the active policy
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Pick a move for the side to move on `board`
    ///
    /// Fails on boards whose mark counts no game could produce. On a
    /// terminal board the result carries no move and the terminal value.
    pub fn choose_move(&mut self, board: &Board) -> Result<MoveResult, InvalidBoardError> {
        validate(board)?;
        let start = Instant::now();

        if self.strategy == Strategy::TacticsFirst && !is_terminal(board) {
            if let Some(result) = Self::tactical_move(board, &start) {
                return Ok(result);
            }
        }

        let result = self.searcher.search(board)?;
        log::debug!(
            "minimax picked {:?} (value {}, {} nodes)",
            result.best_move,
            result.value,
            result.nodes
        );
        Ok(MoveResult::from_search(result, elapsed_ms(&start)))
    }

    /// Try the tactical rungs of the ladder on a non-terminal board
    fn tactical_move(board: &Board, start: &Instant) -> Option<MoveResult> {
        // Fixed opening: the center is a value-preserving first move
        if board.occupied_count() == 0 {
            return Some(MoveResult::opening(CENTER, elapsed_ms(start)));
        }

        let mover = board.to_move();
        if let Some(sq) = find_completing_move(board, mover) {
            log::debug!("tactical win for {mover} at {sq}");
            return Some(MoveResult::tactical_win(sq, mover, elapsed_ms(start)));
        }

        // An open completing line for the opponent loses next turn unless
        // denied, so blocking applies at every occupancy
        if let Some(sq) = find_completing_move(board, mover.opponent()) {
            log::debug!("blocking {} at {sq}", mover.opponent());
            return Some(MoveResult::tactical_block(sq, elapsed_ms(start)));
        }

        None
    }
}

fn elapsed_ms(start: &Instant) -> u64 {
    start.elapsed().as_millis() as u64
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
    fn test_opens_in_the_center() {
        let mut engine = Engine::new();
        let result = engine.choose_move(&Board::new()).unwrap();
        assert_eq!(result.best_move, Some(Square::new(4)));
        assert_eq!(result.kind, SearchKind::Opening);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_exhaustive_opening_draws() {
        let mut engine = Engine::with_strategy(Strategy::Exhaustive);
        let result = engine.choose_move(&Board::new()).unwrap();
        assert_eq!(result.kind, SearchKind::Minimax);
        assert_eq!(result.value, 0);
        // Lowest-index tie-break of the full search
        assert_eq!(result.best_move, Some(Square::new(0)));
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = board_of(&[0, 1], &[3, 4]);
        let mut engine = Engine::new();
        let result = engine.choose_move(&board).unwrap();
        assert_eq!(result.best_move, Some(Square::new(2)));
        assert_eq!(result.kind, SearchKind::TacticalWin);
        assert_eq!(result.value, 1);
    }

    #[test]
    fn test_tactical_and_exhaustive_agree_on_forced_win() {
        let board = board_of(&[0, 1], &[3, 4]);

        let tactical = Engine::new().choose_move(&board).unwrap();
        let searched = Engine::with_strategy(Strategy::Exhaustive)
            .choose_move(&board)
            .unwrap();

        assert_eq!(tactical.best_move, searched.best_move);
        assert_eq!(tactical.value, searched.value);
    }

    #[test]
    fn test_blocks_opponent_threat() {
        // X holds 0 and 8; O threatens the middle row at 5
        let board = board_of(&[0, 8], &[3, 4]);
        let mut engine = Engine::new();
        let result = engine.choose_move(&board).unwrap();
        assert_eq!(result.best_move, Some(Square::new(5)));
        assert_eq!(result.kind, SearchKind::TacticalBlock);
    }

    #[test]
    fn test_block_matches_search_on_forced_position() {
        let board = board_of(&[0, 8], &[3, 4]);
        let searched = Engine::with_strategy(Strategy::Exhaustive)
            .choose_move(&board)
            .unwrap();
        // Full search confirms the block is the only non-losing move
        assert_eq!(searched.best_move, Some(Square::new(5)));
        assert_eq!(searched.value, 0);
    }

    #[test]
    fn test_blocks_as_early_as_a_threat_can_exist() {
        // O's second reply, the earliest turn a completing line can
        // appear: the block fires, with no early-game special case
        let board = board_of(&[0, 1], &[4]);
        let mut engine = Engine::new();
        let result = engine.choose_move(&board).unwrap();
        assert_eq!(result.kind, SearchKind::TacticalBlock);
        assert_eq!(result.best_move, Some(Square::new(2)));
    }

    #[test]
    fn test_quiet_position_falls_through_to_search() {
        let board = board_of(&[4], &[]);
        let mut engine = Engine::new();
        let result = engine.choose_move(&board).unwrap();
        assert_eq!(result.kind, SearchKind::Minimax);
        // Only a corner holds the draw against the center opening
        assert_eq!(result.best_move, Some(Square::new(0)));
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_terminal_board_returns_no_move() {
        let board = board_of(&[0, 1, 2], &[3, 4]);
        let mut engine = Engine::new();
        let result = engine.choose_move(&board).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, 1);
    }

    #[test]
    fn test_rejects_invalid_board() {
        let board = board_of(&[0, 1, 2, 3], &[]);
        let mut engine = Engine::new();
        assert!(engine.choose_move(&board).is_err());
    }

    #[test]
    fn test_choose_move_is_deterministic() {
        let board = board_of(&[4, 0], &[8]);
        let mut engine = Engine::new();
        let first = engine.choose_move(&board).unwrap();
        let second = engine.choose_move(&board).unwrap();
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.value, second.value);
        assert_eq!(first.kind, second.kind);
    }
}
