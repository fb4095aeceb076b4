//! Tic-tac-toe board and the minimax / alpha-beta engine that plays it.

mod board;
mod budget;
mod game;
mod search;
mod types;

pub use board::{Board, TrialMove, BOARD_SIZE};
pub use budget::SearchBudget;
pub use game::TicTacToeGame;
pub use search::{AdversarialSearch, SearchOutcome};
pub use types::{GameStatus, Mark, Square, Strategy};
