mod maze;
mod occupancy;
mod position;

pub use maze::{check_maze_size, generate_maze, maze_exit, maze_start, MAX_MAZE_SIZE, MIN_MAZE_SIZE};
pub use occupancy::{Grid, Tile};
pub use position::{Direction, Position};
