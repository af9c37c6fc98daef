use std::{fmt, iter, str::FromStr};

use super::piece::{PieceKind, Position};

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the stored identifier: `0` for empty, otherwise the piece id.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.id(),
        }
    }
}

/// The playing field: `height` rows of `width` cells.
///
/// Rows are stored top to bottom, so `rows()[0]` is the spawn row. The board
/// holds both the locked cells and the cells of the active piece; keeping the
/// two in sync is the job of [`crate::engine::movement`].
///
/// Every accessor that takes a [`Position`] treats an out-of-bounds position
/// as a programmer error and panics. Use [`Board::contains`] first when the
/// position comes from a speculative move.
///
/// # Example
///
/// ```
/// use tetris_engine::{Board, PieceKind, Position};
///
/// let mut board = Board::standard();
/// let cells = [
///     Position::new(0, 19),
///     Position::new(1, 19),
///     Position::new(2, 19),
///     Position::new(3, 19),
/// ];
/// board.place(&cells, PieceKind::I);
/// assert!(board.is_occupied(Position::new(2, 19)));
/// assert_eq!(board.find_and_remove_full_rows(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub const STANDARD_WIDTH: usize = 10;
    pub const STANDARD_HEIGHT: usize = 20;

    /// Smallest board every piece can spawn on.
    pub const MIN_WIDTH: usize = 4;
    pub const MIN_HEIGHT: usize = 2;
    /// Upper bound on either dimension, keeping coordinates well inside `i32`.
    pub const MAX_DIMENSION: usize = 1024;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is below [`Board::MIN_WIDTH`]/[`Board::MIN_HEIGHT`]
    /// or above [`Board::MAX_DIMENSION`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            (Self::MIN_WIDTH..=Self::MAX_DIMENSION).contains(&width),
            "unsupported board width {width}"
        );
        assert!(
            (Self::MIN_HEIGHT..=Self::MAX_DIMENSION).contains(&height),
            "unsupported board height {height}"
        );
        Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    /// Creates an empty 10×20 board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_WIDTH, Self::STANDARD_HEIGHT)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Caps a position to the board on both axes.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn clamp(&self, pos: Position) -> Position {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        Position::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }

    #[expect(clippy::cast_sign_loss)]
    fn index(&self, pos: Position) -> (usize, usize) {
        assert!(
            self.contains(pos),
            "position ({}, {}) is outside the {}x{} board",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        (pos.x as usize, pos.y as usize)
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Cell {
        let (x, y) = self.index(pos);
        self.rows[y][x]
    }

    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        !self.cell(pos).is_empty()
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        let (x, y) = self.index(pos);
        self.rows[y][x] = cell;
    }

    /// Marks every cell in `cells` with `kind`.
    pub fn place(&mut self, cells: &[Position], kind: PieceKind) {
        for &pos in cells {
            self.set(pos, Cell::Piece(kind));
        }
    }

    /// Marks every cell in `cells` empty.
    pub fn clear(&mut self, cells: &[Position]) {
        for &pos in cells {
            self.set(pos, Cell::Empty);
        }
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.rows[y]
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        is_full(&self.rows[y])
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Full rows are identified in one pass over the current state and
    /// removed together. The remaining rows keep their relative order and
    /// settle at the bottom; the same number of empty rows is inserted at the
    /// top, so the height never changes.
    pub fn find_and_remove_full_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !is_full(row));
        let removed = before - self.rows.len();
        let width = self.width;
        self.rows.splice(
            0..0,
            iter::repeat_with(|| vec![Cell::Empty; width]).take(removed),
        );
        debug_assert_eq!(self.rows.len(), self.height);
        removed
    }
}

fn is_full(row: &[Cell]) -> bool {
    row.iter().all(|cell| !cell.is_empty())
}

/// Writes one line per row: `.` for an empty cell, the piece id otherwise.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                match cell {
                    Cell::Empty => f.write_str(".")?,
                    Cell::Piece(kind) => write!(f, "{}", kind.id())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board text has no rows")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell {ch:?} at row {row}, column {column}")]
    InvalidCell { ch: char, row: usize, column: usize },
    #[display("board of {width}x{height} is outside the supported size")]
    UnsupportedSize { width: usize, height: usize },
}

/// Parses the [`Display`](fmt::Display) form. Blank lines and surrounding
/// whitespace are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.first().ok_or(ParseBoardError::Empty)?.chars().count();
        let height = lines.len();
        if !(Self::MIN_WIDTH..=Self::MAX_DIMENSION).contains(&width)
            || !(Self::MIN_HEIGHT..=Self::MAX_DIMENSION).contains(&height)
        {
            return Err(ParseBoardError::UnsupportedSize { width, height });
        }

        let mut board = Board::new(width, height);
        for (y, line) in lines.into_iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseBoardError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                board.rows[y][x] = match ch {
                    '.' | '0' => Cell::Empty,
                    _ => {
                        let kind = ch
                            .to_digit(10)
                            .and_then(|id| u8::try_from(id).ok())
                            .and_then(|id| PieceKind::try_from(id).ok());
                        let Some(kind) = kind else {
                            return Err(ParseBoardError::InvalidCell {
                                ch,
                                row: y,
                                column: x,
                            });
                        };
                        Cell::Piece(kind)
                    }
                };
            }
        }
        Ok(board)
    }
}
