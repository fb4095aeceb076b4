use std::collections::HashSet;

use crate::error::GridError;
use super::position::{Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Open,
    Blocked,
}

impl Tile {
    pub fn from_digit(value: u8) -> Option<Tile> {
        match value {
            0 => Some(Tile::Open),
            1 => Some(Tile::Blocked),
            _ => None,
        }
    }
}

/// Rectangular occupancy map. Search engines only ever borrow it immutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
}

impl Grid {
    pub fn filled(rows: usize, cols: usize, tile: Tile) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![tile; rows * cols],
        })
    }

    /// Builds a grid from rows of `0` (open) / `1` (blocked).
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let cols = rows.first().map(|row| row.len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged { row: y, expected: cols, found: row.len() });
            }
            for (x, &value) in row.iter().enumerate() {
                let tile = Tile::from_digit(value).ok_or(GridError::InvalidCell {
                    row: y,
                    col: x,
                    value: char::from(b'0'.wrapping_add(value)),
                })?;
                cells.push(tile);
            }
        }

        Ok(Self { rows: rows.len(), cols, cells })
    }

    /// Parses `.`/`0` (open) and `#`/`1` (blocked), one row per non-empty line.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let rows = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, ch)| match ch {
                        '.' | '0' => Ok(0),
                        '#' | '1' => Ok(1),
                        other => Err(GridError::InvalidCell { row: y, col: x, value: other }),
                    })
                    .collect::<Result<Vec<u8>, GridError>>()
            })
            .collect::<Result<Vec<Vec<u8>>, GridError>>()?;
        Self::from_rows(&rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        if self.contains(pos) {
            Some(self.cells[pos.y * self.cols + pos.x])
        } else {
            None
        }
    }

    /// Out-of-bounds positions count as blocked.
    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos) == Some(Tile::Open)
    }

    pub fn set(&mut self, pos: Position, tile: Tile) {
        if self.contains(pos) {
            self.cells[pos.y * self.cols + pos.x] = tile;
        }
    }

    /// Open neighbours of `pos` in `Direction::EXPANSION_ORDER`.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::EXPANSION_ORDER
            .into_iter()
            .filter_map(move |direction| pos.step(direction))
            .filter(|next| self.is_open(*next))
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&tile| tile == Tile::Open).count()
    }

    /// Text rendering with `S`, `G` and `*` marking start, goal and path cells.
    pub fn render(&self, start: Position, goal: Position, path: &[Position]) -> String {
        let on_path: HashSet<Position> = path.iter().copied().collect();
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for y in 0..self.rows {
            for x in 0..self.cols {
                let pos = Position::new(x, y);
                let ch = if pos == start {
                    'S'
                } else if pos == goal {
                    'G'
                } else if on_path.contains(&pos) {
                    '*'
                } else if self.is_open(pos) {
                    '.'
                } else {
                    '#'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
