use std::time::Duration;

use crate::config::TicTacToeSettings;
use crate::error::GameError;
use crate::log;
use super::board::{Board, BOARD_SIZE};
use super::budget::SearchBudget;
use super::search::{AdversarialSearch, SearchOutcome};
use super::types::{GameStatus, Mark, Square, Strategy};

/// A human-versus-engine game. X always moves first.
#[derive(Debug)]
pub struct TicTacToeGame {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    ai_mark: Mark,
    strategy: Strategy,
    time_budget: Option<Duration>,
    last_move: Option<Square>,
}

impl TicTacToeGame {
    pub fn new(settings: &TicTacToeSettings) -> Result<Self, GameError> {
        AdversarialSearch::new(settings.ai_mark)?;
        Ok(Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            ai_mark: settings.ai_mark,
            strategy: settings.strategy,
            time_budget: settings.time_budget_ms.map(Duration::from_millis),
            last_move: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn ai_mark(&self) -> Mark {
        self.ai_mark
    }

    pub fn last_move(&self) -> Option<Square> {
        self.last_move
    }

    pub fn is_ai_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.current_mark == self.ai_mark
    }

    /// Places the current mark on `square` and passes the turn.
    pub fn place_mark(&mut self, square: Square) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if square.row >= BOARD_SIZE || square.col >= BOARD_SIZE {
            return Err(GameError::OutOfBounds { row: square.row, col: square.col });
        }
        if !self.board.is_empty_at(square) {
            return Err(GameError::Occupied { row: square.row, col: square.col });
        }

        self.board.set(square, self.current_mark);
        self.last_move = Some(square);
        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }
        Ok(())
    }

    /// Asks the engine for the AI's move and plays it.
    pub fn play_ai_turn(&mut self) -> Result<SearchOutcome, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.current_mark != self.ai_mark {
            return Err(GameError::NotAiTurn);
        }

        let budget = match self.time_budget {
            Some(limit) => SearchBudget::with_time_limit(limit),
            None => SearchBudget::unlimited(),
        };
        let search = AdversarialSearch::new(self.ai_mark)?.with_budget(budget);
        let outcome = search.search(&mut self.board, self.strategy)?;
        if !outcome.completed {
            log!("AI search ran out of time, playing best move so far {}", outcome.best_move);
        }

        self.place_mark(outcome.best_move)?;
        Ok(outcome)
    }

    /// Clears the board for a new game with the same AI settings. X moves first again.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.last_move = None;
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X { Mark::O } else { Mark::X };
    }

    fn check_game_over(&mut self) {
        self.status = match self.board.winner() {
            Some(Mark::X) => GameStatus::XWon,
            Some(Mark::O) => GameStatus::OWon,
            _ if self.board.is_full() => GameStatus::Draw,
            _ => GameStatus::InProgress,
        };
    }
}
