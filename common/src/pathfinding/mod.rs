//! Grid path search: BFS, DFS and A* over a 4-connected occupancy grid.
//!
//! Every search first checks that both endpoints are open and that the goal is
//! flood-fill reachable from the start. Failures never panic; they come back as a
//! `SearchResult` with an empty path and a non-`Found` outcome. The grid is only
//! borrowed immutably, so one grid can serve concurrent searches.

mod astar;
mod bfs;
mod connectivity;
mod dfs;
mod exploration;
mod result;

use std::time::Instant;

use crate::grid::{Grid, Position};
use crate::log;
use exploration::{reconstruct_path, Exploration};

pub use connectivity::ConnectivityChecker;
pub use result::{Algorithm, PathOutcome, SearchResult};

pub struct PathFinder<'a> {
    grid: &'a Grid,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn bfs(&self, start: Position, goal: Position) -> SearchResult {
        self.run(Algorithm::Bfs, start, goal)
    }

    pub fn dfs(&self, start: Position, goal: Position) -> SearchResult {
        self.run(Algorithm::Dfs, start, goal)
    }

    pub fn a_star(&self, start: Position, goal: Position) -> SearchResult {
        self.run(Algorithm::AStar, start, goal)
    }

    pub fn run(&self, algorithm: Algorithm, start: Position, goal: Position) -> SearchResult {
        if let Err(failed) = self.preflight(algorithm, start, goal) {
            return failed;
        }

        let timer = Instant::now();
        let exploration = match algorithm {
            Algorithm::Bfs => bfs::explore(self.grid, start, goal),
            Algorithm::Dfs => dfs::explore(self.grid, start, goal),
            Algorithm::AStar => astar::explore(self.grid, start, goal),
        };
        let execution_time = timer.elapsed();

        self.finish(algorithm, start, goal, exploration, execution_time)
    }

    /// Blocked start, blocked goal, then reachability. A blocked goal fails the
    /// search; the grid is never modified to open it.
    fn preflight(&self, algorithm: Algorithm, start: Position, goal: Position) -> Result<(), SearchResult> {
        let outcome = if !self.grid.is_open(start) {
            PathOutcome::BlockedStart
        } else if !self.grid.is_open(goal) {
            PathOutcome::BlockedGoal
        } else {
            let reachable = ConnectivityChecker::new(self.grid).reachable_from(start);
            if reachable.contains(&goal) {
                return Ok(());
            }
            log!("{}: goal {} unreachable from {}", algorithm, goal, start);
            return Err(SearchResult::failed(
                algorithm,
                start,
                goal,
                PathOutcome::Unreachable,
                reachable.len(),
            ));
        };

        log!("{}: {} (start {}, goal {})", algorithm, outcome, start, goal);
        Err(SearchResult::failed(algorithm, start, goal, outcome, 0))
    }

    fn finish(
        &self,
        algorithm: Algorithm,
        start: Position,
        goal: Position,
        exploration: Exploration,
        execution_time: std::time::Duration,
    ) -> SearchResult {
        if !exploration.reached_goal {
            log!("{}: frontier exhausted without reaching {}", algorithm, goal);
            let mut result = SearchResult::failed(
                algorithm,
                start,
                goal,
                PathOutcome::NoPathFound,
                exploration.nodes_explored,
            );
            result.execution_time = execution_time;
            return result;
        }

        let path = reconstruct_path(&exploration.parents, goal);
        let path_length = result::path_length(start, &path);
        SearchResult {
            algorithm,
            start,
            goal,
            outcome: PathOutcome::Found,
            path,
            nodes_explored: exploration.nodes_explored,
            path_length,
            execution_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet, VecDeque};

    use super::*;
    use crate::grid::Tile;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        Grid::filled(rows, cols, Tile::Open).unwrap()
    }

    // Independent shortest-distance oracle, computed over every open cell.
    fn reference_distance(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
        let mut distance = HashMap::from([(start, 0usize)]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let d = distance[&current];
            for next in grid.open_neighbors(current) {
                if !distance.contains_key(&next) {
                    distance.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        distance.get(&goal).copied()
    }

    fn assert_valid_path(grid: &Grid, start: Position, goal: Position, path: &[Position]) {
        assert_eq!(path.last(), Some(&goal));
        let mut seen = HashSet::from([start]);
        let mut previous = start;
        for &step in path {
            assert!(grid.is_open(step), "{} is blocked", step);
            assert_eq!(previous.manhattan_distance(step), 1, "{} -> {} is not a step", previous, step);
            assert!(seen.insert(step), "{} visited twice", step);
            previous = step;
        }
    }

    const WINDING: &str = "\
.....#....
.###.#.##.
.#...#..#.
.#.#####..
.#.....#.#
.#####.#..
.....#.##.
.###.#....
...#.####.
.#........
";

    const POSITIONS: [(usize, usize); 6] = [(0, 0), (9, 9), (4, 2), (6, 4), (9, 0), (2, 6)];

    #[test]
    fn test_open_five_by_five_scenario() {
        let grid = open_grid(5, 5);
        let finder = PathFinder::new(&grid);
        let start = Position::new(0, 0);
        let goal = Position::new(4, 4);

        let bfs = finder.bfs(start, goal);
        let a_star = finder.a_star(start, goal);
        let dfs = finder.dfs(start, goal);

        assert_eq!(bfs.outcome, PathOutcome::Found);
        assert_eq!(bfs.path_length, 8);
        assert_eq!(bfs.path.len(), 8);
        assert_eq!(a_star.path_length, 8);
        assert!(dfs.is_found());
        assert!(dfs.path_length >= 8);
        assert_valid_path(&grid, start, goal, &bfs.path);
        assert_valid_path(&grid, start, goal, &a_star.path);
        assert_valid_path(&grid, start, goal, &dfs.path);
    }

    #[test]
    fn test_bfs_matches_reference_distance() {
        let grid = Grid::from_text(WINDING).unwrap();
        let finder = PathFinder::new(&grid);
        for &(sx, sy) in &POSITIONS {
            for &(gx, gy) in &POSITIONS {
                let (start, goal) = (Position::new(sx, sy), Position::new(gx, gy));
                let expected = reference_distance(&grid, start, goal).unwrap();
                let result = finder.bfs(start, goal);
                assert!(result.is_found());
                assert_eq!(result.path_length, expected, "{} -> {}", start, goal);
                assert_eq!(result.path.len(), expected);
            }
        }
    }

    #[test]
    fn test_a_star_is_as_short_as_bfs() {
        let grid = Grid::from_text(WINDING).unwrap();
        let finder = PathFinder::new(&grid);
        for &(sx, sy) in &POSITIONS {
            for &(gx, gy) in &POSITIONS {
                let (start, goal) = (Position::new(sx, sy), Position::new(gx, gy));
                let bfs = finder.bfs(start, goal);
                let a_star = finder.a_star(start, goal);
                assert_eq!(a_star.path_length, bfs.path_length, "{} -> {}", start, goal);
                if start != goal {
                    assert_valid_path(&grid, start, goal, &a_star.path);
                }
            }
        }
    }

    #[test]
    fn test_dfs_paths_are_valid_and_never_shorter() {
        let grid = Grid::from_text(WINDING).unwrap();
        let finder = PathFinder::new(&grid);
        for &(sx, sy) in &POSITIONS {
            for &(gx, gy) in &POSITIONS {
                let (start, goal) = (Position::new(sx, sy), Position::new(gx, gy));
                if start == goal {
                    continue;
                }
                let dfs = finder.dfs(start, goal);
                assert!(dfs.is_found());
                assert_valid_path(&grid, start, goal, &dfs.path);
                assert!(dfs.path_length >= reference_distance(&grid, start, goal).unwrap());
            }
        }
    }

    #[test]
    fn test_dfs_follows_expansion_order() {
        // Up and down are tried before left and right; the stack pops the last
        // pushed neighbour first, so DFS heads right along the top row.
        let grid = open_grid(3, 3);
        let result = PathFinder::new(&grid).dfs(Position::new(0, 0), Position::new(2, 0));
        assert_eq!(result.path, vec![Position::new(1, 0), Position::new(2, 0)]);
        assert_eq!(result.nodes_explored, 3);
    }

    #[test]
    fn test_bfs_explores_in_fifo_order() {
        let grid = open_grid(1, 5);
        let result = PathFinder::new(&grid).bfs(Position::new(0, 0), Position::new(4, 0));
        assert_eq!(result.nodes_explored, 5);
        assert_eq!(result.path_length, 4);
    }

    #[test]
    fn test_a_star_expands_no_more_than_bfs_on_open_grid() {
        let grid = open_grid(12, 12);
        let finder = PathFinder::new(&grid);
        let start = Position::new(0, 0);
        let goal = Position::new(11, 11);
        let bfs = finder.bfs(start, goal);
        let a_star = finder.a_star(start, goal);
        assert!(a_star.nodes_explored <= bfs.nodes_explored);
        assert_eq!(a_star.nodes_explored, 23);
    }

    #[test]
    fn test_blocked_goal_fails_without_touching_grid() {
        let grid = Grid::from_text("...\n...\n..#\n").unwrap();
        let before = grid.clone();
        let finder = PathFinder::new(&grid);
        for algorithm in Algorithm::ALL {
            let result = finder.run(algorithm, Position::new(0, 0), Position::new(2, 2));
            assert_eq!(result.outcome, PathOutcome::BlockedGoal);
            assert!(result.outcome.is_blocked_endpoint());
            assert!(result.path.is_empty());
            assert_eq!(result.nodes_explored, 0);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_blocked_start_fails_fast() {
        let grid = Grid::from_text("#..\n...\n").unwrap();
        let result = PathFinder::new(&grid).a_star(Position::new(0, 0), Position::new(2, 1));
        assert_eq!(result.outcome, PathOutcome::BlockedStart);
        assert!(result.path.is_empty());
        assert_eq!(result.nodes_explored, 0);
    }

    #[test]
    fn test_out_of_bounds_endpoint_counts_as_blocked() {
        let grid = open_grid(3, 3);
        let result = PathFinder::new(&grid).bfs(Position::new(0, 0), Position::new(7, 1));
        assert_eq!(result.outcome, PathOutcome::BlockedGoal);
    }

    #[test]
    fn test_disconnected_regions_report_reachable_component() {
        let grid = Grid::from_text("..#...\n..#...\n..#...\n").unwrap();
        let finder = PathFinder::new(&grid);
        for algorithm in Algorithm::ALL {
            let result = finder.run(algorithm, Position::new(0, 0), Position::new(5, 2));
            assert_eq!(result.outcome, PathOutcome::Unreachable);
            assert!(result.path.is_empty());
            assert_eq!(result.path_length, 0);
            assert_eq!(result.nodes_explored, 6);
        }
    }

    #[test]
    fn test_start_equals_goal_is_found_with_empty_path() {
        let grid = open_grid(2, 2);
        for algorithm in Algorithm::ALL {
            let result = PathFinder::new(&grid).run(algorithm, Position::new(1, 1), Position::new(1, 1));
            assert_eq!(result.outcome, PathOutcome::Found);
            assert!(result.path.is_empty());
            assert_eq!(result.nodes_explored, 1);
        }
    }

    #[test]
    fn test_repeated_searches_are_identical() {
        let grid = Grid::from_text(WINDING).unwrap();
        let finder = PathFinder::new(&grid);
        let (start, goal) = (Position::new(0, 0), Position::new(9, 9));
        for algorithm in Algorithm::ALL {
            let first = finder.run(algorithm, start, goal);
            let second = finder.run(algorithm, start, goal);
            assert!(first.same_search(&second), "{} differs between runs", algorithm);
        }
    }

    #[test]
    fn test_frontier_exhaustion_reports_no_path() {
        let grid = Grid::from_text("..#.\n").unwrap();
        let exploration = bfs::explore(&grid, Position::new(0, 0), Position::new(3, 0));
        assert!(!exploration.reached_goal);
        assert_eq!(exploration.nodes_explored, 2);

        let result = PathFinder::new(&grid).finish(
            Algorithm::Bfs,
            Position::new(0, 0),
            Position::new(3, 0),
            exploration,
            std::time::Duration::ZERO,
        );
        assert_eq!(result.outcome, PathOutcome::NoPathFound);
        assert!(result.path.is_empty());
    }
}
