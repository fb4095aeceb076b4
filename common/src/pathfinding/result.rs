use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::grid::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::Dfs => write!(f, "DFS"),
            Algorithm::AStar => write!(f, "A*"),
        }
    }
}

/// How a path search ended. Everything except `Found` comes with an empty path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathOutcome {
    Found,
    BlockedStart,
    BlockedGoal,
    Unreachable,
    NoPathFound,
}

impl PathOutcome {
    pub fn is_blocked_endpoint(&self) -> bool {
        matches!(self, PathOutcome::BlockedStart | PathOutcome::BlockedGoal)
    }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PathOutcome::Found => "path found",
            PathOutcome::BlockedStart => "start blocked",
            PathOutcome::BlockedGoal => "goal blocked",
            PathOutcome::Unreachable => "goal unreachable",
            PathOutcome::NoPathFound => "no path found",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub start: Position,
    pub goal: Position,
    pub outcome: PathOutcome,
    /// Excludes `start`, includes `goal`.
    pub path: Vec<Position>,
    pub nodes_explored: usize,
    pub path_length: usize,
    pub execution_time: Duration,
}

impl SearchResult {
    pub(crate) fn failed(
        algorithm: Algorithm,
        start: Position,
        goal: Position,
        outcome: PathOutcome,
        nodes_explored: usize,
    ) -> Self {
        Self {
            algorithm,
            start,
            goal,
            outcome,
            path: Vec::new(),
            nodes_explored,
            path_length: 0,
            execution_time: Duration::ZERO,
        }
    }

    pub fn is_found(&self) -> bool {
        self.outcome == PathOutcome::Found
    }

    /// Equality ignoring `execution_time`.
    pub fn same_search(&self, other: &SearchResult) -> bool {
        self.algorithm == other.algorithm
            && self.start == other.start
            && self.goal == other.goal
            && self.outcome == other.outcome
            && self.path == other.path
            && self.nodes_explored == other.nodes_explored
            && self.path_length == other.path_length
    }

    pub fn summary(&self) -> String {
        format!(
            "Algorithm: {}\nOutcome: {}\nNodes Explored: {}\nPath Length: {}\nExecution Time: {:.4}s",
            self.algorithm,
            self.outcome,
            self.nodes_explored,
            self.path_length,
            self.execution_time.as_secs_f64()
        )
    }
}

/// Sum of Manhattan step distances walking from `start` through `path`.
pub(crate) fn path_length(start: Position, path: &[Position]) -> usize {
    let mut previous = start;
    let mut total = 0;
    for &step in path {
        total += previous.manhattan_distance(step);
        previous = step;
    }
    total
}
