use crate::config::MazeSettings;
use crate::debug_log;
use crate::error::GridError;
use crate::session_rng::SessionRng;
use super::occupancy::{Grid, Tile};
use super::position::Position;

pub const MIN_MAZE_SIZE: usize = 5;
pub const MAX_MAZE_SIZE: usize = 201;

const CARVE_STEPS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const BRANCH_OFFSETS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

pub fn maze_start() -> Position {
    Position::new(1, 1)
}

/// Saturates to `(0, 0)` for sizes below 2.
pub fn maze_exit(size: usize) -> Position {
    let edge = size.saturating_sub(2);
    Position::new(edge, edge)
}

/// Odd, and within `MIN_MAZE_SIZE..=MAX_MAZE_SIZE`, so the carved corridors
/// line up with the exit.
pub fn check_maze_size(size: usize) -> Result<(), GridError> {
    if size < MIN_MAZE_SIZE {
        return Err(GridError::TooSmall { size, min: MIN_MAZE_SIZE });
    }
    if size > MAX_MAZE_SIZE {
        return Err(GridError::TooLarge { size, max: MAX_MAZE_SIZE });
    }
    if size % 2 == 0 {
        return Err(GridError::EvenSize(size));
    }
    Ok(())
}

/// Carves a square maze by randomized backtracking, then adds extra branches and
/// dead ends. The start `(1, 1)` and the exit `(size-2, size-2)` are always open.
pub fn generate_maze(settings: &MazeSettings, rng: &mut SessionRng) -> Result<Grid, GridError> {
    let size = settings.grid_size;
    check_maze_size(size)?;

    let mut grid = Grid::filled(size, size, Tile::Blocked)?;
    carve_passages(&mut grid, rng);
    add_branches(&mut grid, rng, settings.branch_divisor);
    add_dead_ends(&mut grid, rng, settings.dead_end_divisor);
    connect_exit(&mut grid);

    debug_log!(
        "Generated {}x{} maze with seed {} ({} open cells)",
        size,
        size,
        rng.seed(),
        grid.open_cell_count()
    );
    Ok(grid)
}

fn offset(pos: Position, dx: isize, dy: isize) -> Option<Position> {
    let x = pos.x.checked_add_signed(dx)?;
    let y = pos.y.checked_add_signed(dy)?;
    Some(Position::new(x, y))
}

fn is_interior(grid: &Grid, pos: Position) -> bool {
    pos.x >= 1 && pos.y >= 1 && pos.x < grid.cols() - 1 && pos.y < grid.rows() - 1
}

fn carve_passages(grid: &mut Grid, rng: &mut SessionRng) {
    let start = maze_start();
    grid.set(start, Tile::Open);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut steps = CARVE_STEPS;
        rng.shuffle(&mut steps);

        let next = steps.iter().find_map(|&(dx, dy)| {
            let target = offset(current, dx * 2, dy * 2)?;
            if is_interior(grid, target) && !grid.is_open(target) {
                Some((offset(current, dx, dy)?, target))
            } else {
                None
            }
        });

        match next {
            Some((wall, target)) => {
                grid.set(wall, Tile::Open);
                grid.set(target, Tile::Open);
                stack.push(target);
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn add_branches(grid: &mut Grid, rng: &mut SessionRng, divisor: usize) {
    let size = grid.rows();
    let attempts = (size * size) / divisor.max(1);

    for _ in 0..attempts {
        let pos = Position::new(rng.random_between(1, size - 2), rng.random_between(1, size - 2));
        if grid.is_open(pos) {
            continue;
        }

        let open_targets: Vec<Position> = BRANCH_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| offset(pos, dx, dy))
            .filter(|target| is_interior(grid, *target) && grid.is_open(*target))
            .collect();

        if open_targets.len() >= 2 {
            grid.set(pos, Tile::Open);
            for target in open_targets {
                grid.set(Position::new((pos.x + target.x) / 2, (pos.y + target.y) / 2), Tile::Open);
            }
        }
    }
}

fn add_dead_ends(grid: &mut Grid, rng: &mut SessionRng, divisor: usize) {
    let size = grid.rows();
    let attempts = (size * size) / divisor.max(1);
    let protected = [maze_start(), maze_exit(size)];

    for _ in 0..attempts {
        let pos = Position::new(rng.random_between(1, size - 2), rng.random_between(1, size - 2));
        if protected.contains(&pos) || !grid.is_open(pos) {
            continue;
        }
        if grid.open_neighbors(pos).count() == 1 {
            grid.set(pos, Tile::Blocked);
        }
    }
}

fn connect_exit(grid: &mut Grid) {
    let exit = maze_exit(grid.rows());
    grid.set(exit, Tile::Open);
    if grid.open_neighbors(exit).next().is_none() {
        grid.set(Position::new(exit.x, exit.y - 1), Tile::Open);
    }
}
