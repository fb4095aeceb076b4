use std::collections::HashMap;

use crate::grid::Position;

/// Raw outcome of a search loop, before it is turned into a `SearchResult`.
pub(crate) struct Exploration {
    pub parents: HashMap<Position, Position>,
    pub nodes_explored: usize,
    pub reached_goal: bool,
}

/// Walks parent links back from `goal` and returns the path without `start`.
/// Empty when `goal` has no parent entry.
pub(crate) fn reconstruct_path(parents: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(&parent) = parents.get(&current) {
        path.push(current);
        current = parent;
    }
    path.reverse();
    path
}
