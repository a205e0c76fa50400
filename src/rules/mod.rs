//! Game rules for tic-tac-toe
//!
//! Everything here is a pure derivation from a board snapshot: the eight
//! winning lines, the winner scan, terminality and the terminal value.

pub mod win;

// Re-exports for convenient access
pub use win::{is_terminal, outcome, utility, winner, winning_line, Outcome, WINNING_LINES};
