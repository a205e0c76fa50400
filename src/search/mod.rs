//! Search algorithms for the tic-tac-toe engine
//!
//! Contains:
//! - Exhaustive minimax with value-bound pruning
//! - Immediate win/block tactical detection

pub mod minimax;
pub mod tactics;

pub use minimax::{validate, InvalidBoardError, SearchResult, Searcher};
pub use tactics::find_completing_move;
