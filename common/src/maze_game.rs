use crate::config::MazeSettings;
use crate::error::GridError;
use crate::grid::{check_maze_size, generate_maze, maze_exit, maze_start, Direction, Grid, Position};
use crate::log;
use crate::pathfinding::{Algorithm, PathFinder, SearchResult};
use crate::session_rng::SessionRng;

/// Sizes stay odd, so resizing moves in steps of two.
pub const SIZE_STEP: usize = 2;

/// A player walking a generated maze from `(1, 1)` to the exit, with search
/// hints computed from wherever the player currently stands.
#[derive(Debug)]
pub struct MazeGame {
    settings: MazeSettings,
    rng: SessionRng,
    grid: Grid,
    player: Position,
    exit: Position,
    moves: usize,
    help: Option<SearchResult>,
}

impl MazeGame {
    pub fn new(settings: &MazeSettings) -> Result<Self, GridError> {
        Self::with_rng(settings, SessionRng::from_optional_seed(settings.seed))
    }

    pub fn with_rng(settings: &MazeSettings, mut rng: SessionRng) -> Result<Self, GridError> {
        let grid = generate_maze(settings, &mut rng)?;
        Ok(Self {
            settings: settings.clone(),
            rng,
            grid,
            player: maze_start(),
            exit: maze_exit(settings.grid_size),
            moves: 0,
            help: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.settings.grid_size
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.player == self.exit
    }

    /// The last hint, cleared whenever the player moves.
    pub fn help_path(&self) -> &[Position] {
        self.help.as_ref().map(|result| result.path.as_slice()).unwrap_or_default()
    }

    /// Steps one cell. Walls, the border and a finished game all refuse the move.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.is_won() {
            return false;
        }
        let Some(next) = self.player.step(direction).filter(|next| self.grid.is_open(*next)) else {
            return false;
        };

        self.player = next;
        self.moves += 1;
        self.help = None;
        if self.is_won() {
            log!("Player reached the exit in {} moves", self.moves);
        }
        true
    }

    pub fn help(&mut self, algorithm: Algorithm) -> &SearchResult {
        let result = PathFinder::new(&self.grid).run(algorithm, self.player, self.exit);
        self.help.insert(result)
    }

    /// Carves a new maze of the current size and puts the player back at the start.
    pub fn regenerate(&mut self) -> Result<(), GridError> {
        self.grid = generate_maze(&self.settings, &mut self.rng)?;
        self.exit = maze_exit(self.settings.grid_size);
        self.player = maze_start();
        self.moves = 0;
        self.help = None;
        log!("Regenerated {}x{} maze", self.size(), self.size());
        Ok(())
    }

    /// Leaves the game untouched when `size` is rejected.
    pub fn resize(&mut self, size: usize) -> Result<(), GridError> {
        check_maze_size(size)?;
        self.settings.grid_size = size;
        self.regenerate()
    }

    pub fn increase_size(&mut self) -> Result<(), GridError> {
        self.resize(self.size() + SIZE_STEP)
    }

    pub fn decrease_size(&mut self) -> Result<(), GridError> {
        self.resize(self.size().saturating_sub(SIZE_STEP))
    }

    /// `S` marks the player, `G` the exit and `*` the current hint.
    pub fn render(&self) -> String {
        self.grid.render(self.player, self.exit, self.help_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MAX_MAZE_SIZE, MIN_MAZE_SIZE};
    use crate::pathfinding::PathOutcome;

    fn seeded(size: usize, seed: u64) -> MazeGame {
        let settings = MazeSettings { grid_size: size, seed: Some(seed), ..MazeSettings::default() };
        MazeGame::new(&settings).unwrap()
    }

    fn direction_towards(from: Position, to: Position) -> Direction {
        Direction::EXPANSION_ORDER
            .into_iter()
            .find(|&direction| from.step(direction) == Some(to))
            .unwrap()
    }

    #[test]
    fn test_new_game_starts_at_maze_start() {
        let game = seeded(21, 4);
        assert_eq!(game.player(), Position::new(1, 1));
        assert_eq!(game.exit(), Position::new(19, 19));
        assert_eq!(game.moves(), 0);
        assert!(!game.is_won());
        assert!(game.help_path().is_empty());
    }

    #[test]
    fn test_walls_block_moves() {
        let mut game = seeded(21, 4);
        // (1, 0) and (0, 1) are border cells.
        assert!(!game.move_player(Direction::Up));
        assert!(!game.move_player(Direction::Left));
        assert_eq!(game.player(), Position::new(1, 1));
        assert_eq!(game.moves(), 0);

        let open = game.grid().open_neighbors(game.player()).next().unwrap();
        assert!(game.move_player(direction_towards(game.player(), open)));
        assert_eq!(game.player(), open);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_following_help_reaches_exit() {
        let mut game = seeded(21, 11);
        let hint = game.help(Algorithm::Bfs).clone();
        assert_eq!(hint.outcome, PathOutcome::Found);
        assert_eq!(hint.start, Position::new(1, 1));
        assert_eq!(game.help_path(), hint.path.as_slice());

        for step in hint.path {
            let direction = direction_towards(game.player(), step);
            assert!(game.move_player(direction));
            assert!(game.help_path().is_empty());
        }
        assert!(game.is_won());
        assert_eq!(game.moves(), hint.path_length);
        assert!(!game.move_player(Direction::Up));
        assert!(!game.move_player(Direction::Down));
    }

    #[test]
    fn test_help_searches_from_current_position() {
        let mut game = seeded(21, 11);
        let first = game.help(Algorithm::AStar).path[0];
        game.move_player(direction_towards(game.player(), first));

        let hint = game.help(Algorithm::AStar).clone();
        assert_eq!(hint.start, first);
        let from_scratch = PathFinder::new(game.grid()).a_star(first, game.exit());
        assert!(hint.same_search(&from_scratch));
    }

    #[test]
    fn test_regenerate_resets_player_and_is_reproducible() {
        let mut a = seeded(15, 8);
        let mut b = seeded(15, 8);
        let first_layout = a.grid().clone();
        let open = a.grid().open_neighbors(a.player()).next().unwrap();
        a.move_player(direction_towards(a.player(), open));

        a.regenerate().unwrap();
        b.regenerate().unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_ne!(a.grid(), &first_layout);
        assert_eq!(a.player(), maze_start());
        assert_eq!(a.moves(), 0);
        assert_eq!(a.size(), 15);
    }

    #[test]
    fn test_resize_stays_within_bounds() {
        let mut game = seeded(MIN_MAZE_SIZE, 2);
        assert_eq!(
            game.decrease_size(),
            Err(GridError::TooSmall { size: MIN_MAZE_SIZE - SIZE_STEP, min: MIN_MAZE_SIZE })
        );
        assert_eq!(game.size(), MIN_MAZE_SIZE);

        game.increase_size().unwrap();
        assert_eq!(game.size(), MIN_MAZE_SIZE + SIZE_STEP);
        assert_eq!(game.grid().rows(), MIN_MAZE_SIZE + SIZE_STEP);
        assert_eq!(game.exit(), maze_exit(MIN_MAZE_SIZE + SIZE_STEP));

        assert_eq!(game.resize(20), Err(GridError::EvenSize(20)));
        game.resize(MAX_MAZE_SIZE).unwrap();
        assert!(matches!(game.increase_size(), Err(GridError::TooLarge { .. })));
        assert_eq!(game.size(), MAX_MAZE_SIZE);
    }

    #[test]
    fn test_render_shows_player_and_hint() {
        let mut game = seeded(7, 1);
        game.help(Algorithm::Bfs);
        let rendered = game.render();
        assert_eq!(rendered.lines().count(), 7);
        assert_eq!(rendered.lines().nth(1).and_then(|line| line.chars().nth(1)), Some('S'));
        assert_eq!(rendered.lines().nth(5).and_then(|line| line.chars().nth(5)), Some('G'));
        assert!(rendered.contains('*'));
    }
}
