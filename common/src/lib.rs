pub mod config;
pub mod error;
pub mod grid;
pub mod logger;
pub mod maze_game;
pub mod pathfinding;
pub mod session_rng;
pub mod tictactoe;

pub use error::{ConfigError, GameError, GridError, InvalidStateReason, SearchError};
