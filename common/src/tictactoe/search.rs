use crate::debug_log;
use crate::error::{InvalidStateReason, SearchError};
use super::board::Board;
use super::budget::SearchBudget;
use super::types::{Mark, Square, Strategy};

const WIN_SCORE: i32 = 1;
const LOSS_SCORE: i32 = -1;
const DRAW_SCORE: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Square,
    /// +1 forced win, 0 draw, -1 forced loss for the searching mark.
    pub score: i32,
    pub nodes_visited: u64,
    /// `false` when the budget ran out; `best_move` is then the best fully
    /// evaluated root move, or the first empty square if none finished.
    pub completed: bool,
}

/// Game-tree search for one fixed mark. Scores are +1/0/-1 with no depth
/// discount; ties go to the first square in row-major order.
#[derive(Debug, Clone)]
pub struct AdversarialSearch {
    ai: Mark,
    opponent: Mark,
    budget: SearchBudget,
}

struct Walk<'a> {
    budget: &'a SearchBudget,
    nodes: u64,
    interrupted: bool,
}

impl Walk<'_> {
    fn enter(&mut self) -> bool {
        self.nodes += 1;
        if self.budget.is_limited() && self.budget.is_exhausted() {
            self.interrupted = true;
        }
        !self.interrupted
    }
}

impl AdversarialSearch {
    pub fn new(ai: Mark) -> Result<Self, SearchError> {
        let opponent = ai
            .opponent()
            .ok_or(SearchError::InvalidState(InvalidStateReason::EmptyPlayer))?;
        Ok(Self {
            ai,
            opponent,
            budget: SearchBudget::unlimited(),
        })
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn ai_mark(&self) -> Mark {
        self.ai
    }

    pub fn minimax(&self, board: &mut Board) -> Result<Square, SearchError> {
        self.search(board, Strategy::Minimax).map(|outcome| outcome.best_move)
    }

    pub fn minimax_with_alpha_beta(&self, board: &mut Board) -> Result<Square, SearchError> {
        self.search(board, Strategy::AlphaBeta).map(|outcome| outcome.best_move)
    }

    /// The board is mutated during the search and restored before returning.
    pub fn search(&self, board: &mut Board, strategy: Strategy) -> Result<SearchOutcome, SearchError> {
        check_searchable(board)?;

        let mut walk = Walk {
            budget: &self.budget,
            nodes: 0,
            interrupted: false,
        };
        let mut best: Option<(Square, i32)> = None;
        let mut alpha = i32::MIN;
        let squares = board.empty_squares();

        for &square in &squares {
            let score = {
                let mut trial = board.trial(square, self.ai);
                match strategy {
                    Strategy::Minimax => self.minimax_value(&mut trial, false, &mut walk),
                    Strategy::AlphaBeta => {
                        self.alpha_beta_value(&mut trial, false, alpha, i32::MAX, &mut walk)
                    }
                }
            };
            if walk.interrupted {
                break;
            }

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((square, score));
            }
            alpha = alpha.max(score);
        }

        let completed = !walk.interrupted;
        let (best_move, score) = match best {
            Some(found) => found,
            // Non-empty: check_searchable rejected full boards.
            None => (squares[0], DRAW_SCORE),
        };

        debug_log!(
            "{:?} for {} picked {} (score {}, {} nodes{})",
            strategy,
            self.ai,
            best_move,
            score,
            walk.nodes,
            if completed { "" } else { ", budget exhausted" }
        );

        Ok(SearchOutcome {
            best_move,
            score,
            nodes_visited: walk.nodes,
            completed,
        })
    }

    fn terminal_score(&self, board: &Board) -> Option<i32> {
        match board.winner() {
            Some(mark) if mark == self.ai => Some(WIN_SCORE),
            Some(_) => Some(LOSS_SCORE),
            None if board.is_full() => Some(DRAW_SCORE),
            None => None,
        }
    }

    fn minimax_value(&self, board: &mut Board, maximizing: bool, walk: &mut Walk) -> i32 {
        if !walk.enter() {
            return DRAW_SCORE;
        }
        if let Some(score) = self.terminal_score(board) {
            return score;
        }

        let mark = if maximizing { self.ai } else { self.opponent };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for square in board.empty_squares() {
            let score = {
                let mut trial = board.trial(square, mark);
                self.minimax_value(&mut trial, !maximizing, walk)
            };
            if walk.interrupted {
                return DRAW_SCORE;
            }
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }

    fn alpha_beta_value(
        &self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        walk: &mut Walk,
    ) -> i32 {
        if !walk.enter() {
            return DRAW_SCORE;
        }
        if let Some(score) = self.terminal_score(board) {
            return score;
        }

        if maximizing {
            let mut best = i32::MIN;
            for square in board.empty_squares() {
                let score = {
                    let mut trial = board.trial(square, self.ai);
                    self.alpha_beta_value(&mut trial, false, alpha, beta, walk)
                };
                if walk.interrupted {
                    return DRAW_SCORE;
                }
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for square in board.empty_squares() {
                let score = {
                    let mut trial = board.trial(square, self.opponent);
                    self.alpha_beta_value(&mut trial, true, alpha, beta, walk)
                };
                if walk.interrupted {
                    return DRAW_SCORE;
                }
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

fn check_searchable(board: &Board) -> Result<(), SearchError> {
    if let Some(mark) = board.winner() {
        return Err(SearchError::InvalidState(InvalidStateReason::AlreadyWon(mark)));
    }
    if board.is_full() {
        return Err(SearchError::InvalidState(InvalidStateReason::BoardFull));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    fn engine(mark: Mark) -> AdversarialSearch {
        AdversarialSearch::new(mark).unwrap()
    }

    // Every non-terminal position reachable from the empty board with X moving first,
    // paired with the mark to move.
    fn reachable_positions() -> Vec<(Board, Mark)> {
        fn walk(board: &mut Board, mover: Mark, seen: &mut HashSet<Board>, out: &mut Vec<(Board, Mark)>) {
            if !seen.insert(*board) || board.is_terminal() {
                return;
            }
            out.push((*board, mover));
            let next = mover.opponent().unwrap();
            for square in board.empty_squares() {
                let mut trial = board.trial(square, mover);
                walk(&mut trial, next, seen, out);
            }
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        walk(&mut Board::new(), Mark::X, &mut seen, &mut out);
        out
    }

    #[test]
    fn test_alpha_beta_matches_minimax_on_every_reachable_position() {
        let positions = reachable_positions();
        assert_eq!(positions.len(), 4520);

        for (position, mover) in positions {
            let search = engine(mover);
            let mut scratch = position;
            let plain = search.search(&mut scratch, Strategy::Minimax).unwrap();
            assert_eq!(scratch, position);
            let pruned = search.search(&mut scratch, Strategy::AlphaBeta).unwrap();
            assert_eq!(scratch, position);

            assert_eq!(plain.score, pruned.score, "score differs on\n{}", position);
            assert_eq!(plain.best_move, pruned.best_move, "move differs on\n{}", position);
            assert!(pruned.nodes_visited <= plain.nodes_visited);
            assert!(plain.completed && pruned.completed);
        }
    }

    #[test]
    fn test_empty_board_first_move() {
        let search = engine(Mark::X);
        let mut empty = Board::new();

        let plain = search.search(&mut empty, Strategy::Minimax).unwrap();
        assert_eq!(plain.best_move, Square::new(0, 0));
        assert_eq!(plain.score, 0);
        assert_eq!(plain.nodes_visited, 549_945);

        let pruned = search.search(&mut empty, Strategy::AlphaBeta).unwrap();
        assert_eq!(pruned.best_move, Square::new(0, 0));
        assert_eq!(pruned.nodes_visited, 18_296);
        assert_eq!(empty, Board::new());

        for _ in 0..3 {
            assert_eq!(search.minimax_with_alpha_beta(&mut empty), Ok(Square::new(0, 0)));
        }
    }

    #[test]
    fn test_blocks_unstoppable_threat() {
        let mut position = board("XX. .O. ...");
        let before = position;
        let search = engine(Mark::O);
        assert_eq!(search.minimax(&mut position), Ok(Square::new(0, 2)));
        assert_eq!(search.minimax_with_alpha_beta(&mut position), Ok(Square::new(0, 2)));
        assert_eq!(position, before);
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut position = board("OO. XX. X..");
        let search = engine(Mark::O);
        let outcome = search.search(&mut position, Strategy::AlphaBeta).unwrap();
        assert_eq!(outcome.best_move, Square::new(0, 2));
        assert_eq!(outcome.score, 1);
    }

    #[test]
    fn test_lost_position_reports_negative_score() {
        // X threatens both the middle row and the main diagonal.
        let mut position = board("X.O XX. O..");
        let search = engine(Mark::O);
        let outcome = search.search(&mut position, Strategy::Minimax).unwrap();
        assert_eq!(outcome.score, -1);
    }

    #[test]
    fn test_rejects_terminal_boards() {
        let search = engine(Mark::X);
        let mut won = board("XXX OO. ...");
        assert_eq!(
            search.minimax(&mut won),
            Err(SearchError::InvalidState(InvalidStateReason::AlreadyWon(Mark::X)))
        );
        let mut full = board("XOX XOO OXX");
        assert_eq!(
            search.minimax_with_alpha_beta(&mut full),
            Err(SearchError::InvalidState(InvalidStateReason::BoardFull))
        );
        assert_eq!(
            AdversarialSearch::new(Mark::Empty).unwrap_err(),
            SearchError::InvalidState(InvalidStateReason::EmptyPlayer)
        );
    }

    #[test]
    fn test_cancelled_search_falls_back_and_restores_board() {
        let flag = Arc::new(AtomicBool::new(true));
        let search = engine(Mark::X).with_budget(SearchBudget::unlimited().with_cancel_flag(flag));
        let mut position = board("... .O. ...");
        let before = position;

        let outcome = search.search(&mut position, Strategy::Minimax).unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.best_move, Square::new(0, 0));
        assert_eq!(outcome.nodes_visited, 1);
        assert_eq!(position, before);
    }
}
