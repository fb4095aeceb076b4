mod maze_command;
mod tictactoe_command;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use common::config::{AppConfigManager, Validate};
use common::grid::Position;
use common::tictactoe::{Mark, Strategy};
use common::{log, logger};

use maze_command::MazeOptions;
use tictactoe_command::TicTacToeOptions;

#[derive(Parser)]
#[command(name = "search_demo")]
#[command(about = "Grid path search and tic-tac-toe game-tree search")]
struct Args {
    /// YAML settings file; missing files fall back to defaults.
    #[arg(long, global = true, default_value = "search_demo.yaml")]
    config: PathBuf,

    #[arg(long, global = true)]
    log_prefix: Option<String>,

    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run BFS, DFS and A* on a generated or loaded grid, or play a maze.
    Maze {
        /// Overrides the configured maze size.
        #[arg(long)]
        size: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        /// Grid text file using `.`/`0` for open and `#`/`1` for blocked cells.
        #[arg(long)]
        grid_file: Option<PathBuf>,

        /// Start as `x,y`. Defaults to the maze start or the top-left cell.
        #[arg(long, value_parser = maze_command::parse_position)]
        start: Option<Position>,

        /// Goal as `x,y`. Defaults to the maze exit or the bottom-right cell.
        #[arg(long, value_parser = maze_command::parse_position)]
        goal: Option<Position>,

        /// Print the grid with each found path overlaid.
        #[arg(long)]
        render: bool,

        /// Walk a generated maze yourself, asking for search hints on the way.
        #[arg(long)]
        play: bool,
    },
    /// Play tic-tac-toe against the engine, or watch it play itself.
    Tictactoe {
        #[arg(long)]
        self_play: bool,

        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        #[arg(long, value_enum)]
        ai_mark: Option<MarkArg>,

        #[arg(long)]
        time_budget_ms: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Minimax,
    AlphaBeta,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Minimax => Strategy::Minimax,
            StrategyArg::AlphaBeta => Strategy::AlphaBeta,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Mark {
    fn from(value: MarkArg) -> Self {
        match value {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let manager = AppConfigManager::from_yaml_file(&args.config);
    let mut config = manager.get_config()?;

    let prefix = args.log_prefix.or(config.log.prefix.take());
    logger::init_logger(prefix, args.debug || config.log.debug);
    log!("Loaded settings from {}", args.config.display());

    match args.command {
        Command::Maze { size, seed, grid_file, start, goal, render, play } => {
            let mut settings = config.maze;
            if let Some(size) = size {
                settings.grid_size = size;
            }
            if seed.is_some() {
                settings.seed = seed;
            }
            settings.validate()?;

            let options = MazeOptions { grid_file, start, goal, render, play };
            maze_command::run(settings, options).await?;
        }
        Command::Tictactoe { self_play, strategy, ai_mark, time_budget_ms } => {
            let mut settings = config.tictactoe;
            if let Some(strategy) = strategy {
                settings.strategy = strategy.into();
            }
            if let Some(ai_mark) = ai_mark {
                settings.ai_mark = ai_mark.into();
            }
            if time_budget_ms.is_some() {
                settings.time_budget_ms = time_budget_ms;
            }
            settings.validate()?;

            let options = TicTacToeOptions { self_play };
            tictactoe_command::run(&settings, options)?;
        }
    }

    Ok(())
}
