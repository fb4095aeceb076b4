use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid::{Grid, Position};
use super::exploration::Exploration;

/// FIFO search. Cells are marked visited when enqueued and keep the parent that
/// discovered them first, which yields a minimum-edge path.
pub(crate) fn explore(grid: &Grid, start: Position, goal: Position) -> Exploration {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut parents = HashMap::new();
    let mut nodes_explored = 0;

    while let Some(current) = queue.pop_front() {
        nodes_explored += 1;
        if current == goal {
            return Exploration { parents, nodes_explored, reached_goal: true };
        }

        for next in grid.open_neighbors(current) {
            if visited.insert(next) {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    Exploration { parents, nodes_explored, reached_goal: false }
}
