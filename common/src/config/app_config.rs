use serde::{Deserialize, Serialize};

use crate::grid::check_maze_size;
use crate::tictactoe::{Mark, Strategy};
use super::{ConfigManager, FileContentConfigProvider, Validate};

pub type AppConfigManager = ConfigManager<FileContentConfigProvider, AppConfig>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: LogSettings,
    pub maze: MazeSettings,
    pub tictactoe: TicTacToeSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub prefix: Option<String>,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    /// Side length in cells, odd so the carved corridors line up with the exit.
    pub grid_size: usize,
    pub seed: Option<u64>,
    /// One branch attempt per `grid_size² / branch_divisor`.
    pub branch_divisor: usize,
    pub dead_end_divisor: usize,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            grid_size: 21,
            seed: None,
            branch_divisor: 20,
            dead_end_divisor: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeSettings {
    pub ai_mark: Mark,
    pub strategy: Strategy,
    pub time_budget_ms: Option<u64>,
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            ai_mark: Mark::O,
            strategy: Strategy::AlphaBeta,
            time_budget_ms: None,
        }
    }
}

impl Validate for MazeSettings {
    fn validate(&self) -> Result<(), String> {
        check_maze_size(self.grid_size).map_err(|e| e.to_string())?;
        if self.branch_divisor == 0 || self.dead_end_divisor == 0 {
            return Err("Branch and dead end divisors must be positive".to_string());
        }
        Ok(())
    }
}

impl Validate for TicTacToeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.ai_mark == Mark::Empty {
            return Err("AI mark must be X or O".to_string());
        }
        if self.time_budget_ms == Some(0) {
            return Err("Time budget must be positive when set".to_string());
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), String> {
        self.maze.validate()?;
        self.tictactoe.validate()
    }
}
