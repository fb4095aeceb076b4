use std::fmt;

use crate::tictactoe::Mark;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    TooSmall { size: usize, min: usize },
    TooLarge { size: usize, max: usize },
    EvenSize(usize),
    Ragged { row: usize, expected: usize, found: usize },
    InvalidCell { row: usize, col: usize, value: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "Grid has no cells"),
            GridError::TooSmall { size, min } => {
                write!(f, "Maze size {} is below the minimum of {}", size, min)
            }
            GridError::TooLarge { size, max } => {
                write!(f, "Maze size {} is above the maximum of {}", size, max)
            }
            GridError::EvenSize(size) => write!(f, "Maze size must be odd, got {}", size),
            GridError::Ragged { row, expected, found } => {
                write!(f, "Row {} has {} cells, expected {}", row, found, expected)
            }
            GridError::InvalidCell { row, col, value } => {
                write!(f, "Invalid cell {:?} at row {}, column {}", value, row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStateReason {
    BoardFull,
    AlreadyWon(Mark),
    EmptyPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    InvalidState(InvalidStateReason),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidState(InvalidStateReason::BoardFull) => {
                write!(f, "Invalid state: board has no empty square")
            }
            SearchError::InvalidState(InvalidStateReason::AlreadyWon(mark)) => {
                write!(f, "Invalid state: {} has already won", mark)
            }
            SearchError::InvalidState(InvalidStateReason::EmptyPlayer) => {
                write!(f, "Invalid state: the searching player must be X or O")
            }
        }
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    OutOfBounds { row: usize, col: usize },
    Occupied { row: usize, col: usize },
    NotAiTurn,
    Search(SearchError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "Game is already over"),
            GameError::OutOfBounds { row, col } => {
                write!(f, "Square ({}, {}) is out of bounds", row, col)
            }
            GameError::Occupied { row, col } => {
                write!(f, "Square ({}, {}) is already marked", row, col)
            }
            GameError::NotAiTurn => write!(f, "It is not the AI's turn"),
            GameError::Search(e) => write!(f, "Search failed: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for GameError {
    fn from(e: SearchError) -> Self {
        GameError::Search(e)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialize(String),
    Deserialize(String),
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config IO error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::Deserialize(e) => write!(f, "Failed to deserialize config: {}", e),
            ConfigError::Validation(e) => write!(f, "Config validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
