use std::collections::{HashSet, VecDeque};

use crate::grid::{Grid, Position};

/// Flood-fill over open cells, used as the pre-flight reachability check.
pub struct ConnectivityChecker<'a> {
    grid: &'a Grid,
}

impl<'a> ConnectivityChecker<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Every open cell reachable from `start`, including `start` itself.
    /// Empty when `start` is blocked.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        if !self.grid.is_open(start) {
            return visited;
        }

        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(current) = queue.pop_front() {
            for next in self.grid.open_neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}
