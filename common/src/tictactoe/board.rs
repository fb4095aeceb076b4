use std::fmt;
use std::ops::{Deref, DerefMut};

use super::types::{Mark, Square};

pub const BOARD_SIZE: usize = 3;

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Reads nine squares row by row from `X`, `O` and `.`/`_`; whitespace is
    /// ignored. Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let marks: Vec<Mark> = text
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| match ch.to_ascii_uppercase() {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                '.' | '_' => Some(Mark::Empty),
                _ => None,
            })
            .collect::<Option<Vec<Mark>>>()?;
        if marks.len() != BOARD_SIZE * BOARD_SIZE {
            return None;
        }

        let mut board = Board::new();
        for (i, mark) in marks.into_iter().enumerate() {
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = mark;
        }
        Some(board)
    }

    pub fn get(&self, square: Square) -> Option<Mark> {
        self.cells.get(square.row)?.get(square.col).copied()
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.get(square) == Some(Mark::Empty)
    }

    /// Writes without any checks; callers validate first.
    pub(crate) fn set(&mut self, square: Square, mark: Mark) {
        self.cells[square.row][square.col] = mark;
    }

    /// Empty squares in row-major order.
    pub fn empty_squares(&self) -> Vec<Square> {
        let mut squares = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    squares.push(Square::new(row, col));
                }
            }
        }
        squares
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.into_iter().find_map(|line| {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            if a != Mark::Empty && a == b && b == c {
                Some(a)
            } else {
                None
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Places `mark` on `square` for the lifetime of the returned guard. Whatever
    /// the square held before is put back when the guard drops, on every exit path.
    pub fn trial(&mut self, square: Square, mark: Mark) -> TrialMove<'_> {
        let previous = self.cells[square.row][square.col];
        self.set(square, mark);
        TrialMove { board: self, square, previous }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(Mark::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub struct TrialMove<'a> {
    board: &'a mut Board,
    square: Square,
    previous: Mark,
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.set(self.square, self.previous);
    }
}
