use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use common::config::MazeSettings;
use common::grid::{generate_maze, maze_exit, maze_start, Direction, Grid, Position};
use common::log;
use common::maze_game::MazeGame;
use common::pathfinding::{Algorithm, PathFinder, SearchResult};
use common::session_rng::SessionRng;

pub struct MazeOptions {
    pub grid_file: Option<PathBuf>,
    pub start: Option<Position>,
    pub goal: Option<Position>,
    pub render: bool,
    pub play: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MazeCommand {
    Move(Direction),
    Help(Algorithm),
    Regenerate,
    Grow,
    Shrink,
    Quit,
}

/// Accepts `x,y` with optional surrounding whitespace.
pub fn parse_position(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", text))?;
    let x = x.trim().parse::<usize>().map_err(|e| format!("bad x in '{}': {}", text, e))?;
    let y = y.trim().parse::<usize>().map_err(|e| format!("bad y in '{}': {}", text, e))?;
    Ok(Position::new(x, y))
}

pub async fn run(settings: MazeSettings, options: MazeOptions) -> Result<(), Box<dyn std::error::Error>> {
    if options.play {
        if options.grid_file.is_some() {
            return Err("--play only works on generated mazes".into());
        }
        let mut game = MazeGame::new(&settings)?;
        log!("Playing {}x{} maze with seed {}", game.size(), game.size(), game.seed());
        let stdin = io::stdin();
        return play(&mut game, &mut stdin.lock());
    }

    let (grid, default_start, default_goal) = match &options.grid_file {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            let grid = Grid::from_text(&text)?;
            log!("Loaded {}x{} grid from {}", grid.cols(), grid.rows(), path.display());
            let corner = Position::new(grid.cols() - 1, grid.rows() - 1);
            (grid, Position::new(0, 0), corner)
        }
        None => {
            let mut rng = SessionRng::from_optional_seed(settings.seed);
            let grid = generate_maze(&settings, &mut rng)?;
            log!("Generated {}x{} maze with seed {}", settings.grid_size, settings.grid_size, rng.seed());
            (grid, maze_start(), maze_exit(settings.grid_size))
        }
    };

    let start = options.start.unwrap_or(default_start);
    let goal = options.goal.unwrap_or(default_goal);
    let grid = Arc::new(grid);

    let results = run_all(Arc::clone(&grid), start, goal).await?;
    for result in &results {
        println!("{}\n", result.summary());
        if options.render && result.is_found() {
            println!("{}", grid.render(start, goal, &result.path));
        }
    }

    Ok(())
}

/// Runs every algorithm on its own blocking task against the same grid.
pub async fn run_all(
    grid: Arc<Grid>,
    start: Position,
    goal: Position,
) -> Result<Vec<SearchResult>, tokio::task::JoinError> {
    let handles: Vec<_> = Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let grid = Arc::clone(&grid);
            tokio::task::spawn_blocking(move || PathFinder::new(&grid).run(algorithm, start, goal))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}

/// Reads one command per line until the exit is reached, the player quits or
/// the input closes.
fn play(game: &mut MazeGame, input: &mut impl BufRead) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        println!("{}", game.render());
        if game.is_won() {
            println!("You reached the exit in {} moves", game.moves());
            return Ok(());
        }

        print!("w/a/s/d to move, bfs/dfs/astar for help, regen, +/- to resize, q to quit: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            log!("Input closed, leaving maze");
            return Ok(());
        }

        match parse_maze_command(&line) {
            Some(MazeCommand::Move(direction)) => {
                if !game.move_player(direction) {
                    println!("Blocked");
                }
            }
            Some(MazeCommand::Help(algorithm)) => println!("{}\n", game.help(algorithm).summary()),
            Some(MazeCommand::Regenerate) => game.regenerate()?,
            Some(MazeCommand::Grow) => {
                if let Err(e) = game.increase_size() {
                    println!("{}", e);
                }
            }
            Some(MazeCommand::Shrink) => {
                if let Err(e) = game.decrease_size() {
                    println!("{}", e);
                }
            }
            Some(MazeCommand::Quit) => return Ok(()),
            None => println!("Unknown command"),
        }
    }
}

fn parse_maze_command(line: &str) -> Option<MazeCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => MazeCommand::Move(Direction::Up),
        "s" | "down" => MazeCommand::Move(Direction::Down),
        "a" | "left" => MazeCommand::Move(Direction::Left),
        "d" | "right" => MazeCommand::Move(Direction::Right),
        "bfs" => MazeCommand::Help(Algorithm::Bfs),
        "dfs" => MazeCommand::Help(Algorithm::Dfs),
        "astar" | "a*" => MazeCommand::Help(Algorithm::AStar),
        "regen" => MazeCommand::Regenerate,
        "+" => MazeCommand::Grow,
        "-" => MazeCommand::Shrink,
        "q" | "quit" => MazeCommand::Quit,
        _ => return None,
    };
    Some(command)
}
