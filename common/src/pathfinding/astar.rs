use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::debug_log;
use crate::grid::{Grid, Position};
use super::exploration::Exploration;

#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: usize,
    h: usize,
    seq: u64,
    g: usize,
    pos: Position,
}

// BinaryHeap is a max-heap: invert so the smallest f pops first, then the
// smallest h, then the earliest insertion.
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search on `g + manhattan(goal)`. Improved cells are pushed again
/// and stale heap entries are dropped when popped.
pub(crate) fn explore(grid: &Grid, start: Position, goal: Position) -> Exploration {
    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<Position, usize> = HashMap::from([(start, 0)]);
    let mut parents = HashMap::new();
    let mut nodes_explored = 0;
    let mut seq = 0u64;

    let h = start.manhattan_distance(goal);
    open.push(OpenEntry { f: h, h, seq, g: 0, pos: start });

    while let Some(entry) = open.pop() {
        let best_g = g_score.get(&entry.pos).copied().unwrap_or(usize::MAX);
        if entry.g > best_g {
            continue;
        }
        nodes_explored += 1;

        if entry.pos == goal {
            debug_log!("A* reached {} after {} expansions", goal, nodes_explored);
            return Exploration { parents, nodes_explored, reached_goal: true };
        }

        let tentative_g = entry.g + 1;
        for next in grid.open_neighbors(entry.pos) {
            let improves = g_score.get(&next).is_none_or(|&known| tentative_g < known);
            if improves {
                g_score.insert(next, tentative_g);
                parents.insert(next, entry.pos);
                seq += 1;
                let h = next.manhattan_distance(goal);
                open.push(OpenEntry { f: tentative_g + h, h, seq, g: tentative_g, pos: next });
            }
        }
    }

    Exploration { parents, nodes_explored, reached_goal: false }
}
