use std::collections::{HashMap, HashSet};

use crate::grid::{Grid, Position};
use super::exploration::Exploration;

/// LIFO search. A cell can sit on the stack several times; it is marked visited,
/// counted and given its parent only on the first pop.
pub(crate) fn explore(grid: &Grid, start: Position, goal: Position) -> Exploration {
    let mut stack: Vec<(Position, Option<Position>)> = vec![(start, None)];
    let mut visited = HashSet::new();
    let mut parents = HashMap::new();
    let mut nodes_explored = 0;

    while let Some((current, parent)) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        nodes_explored += 1;
        if let Some(parent) = parent {
            parents.insert(current, parent);
        }

        if current == goal {
            return Exploration { parents, nodes_explored, reached_goal: true };
        }

        for next in grid.open_neighbors(current) {
            if !visited.contains(&next) {
                stack.push((next, Some(current)));
            }
        }
    }

    Exploration { parents, nodes_explored, reached_goal: false }
}
