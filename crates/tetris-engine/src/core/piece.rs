use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::geometry::{self, Delta};

/// A cell coordinate on the board.
///
/// - (0, 0) is the top-left cell
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed so that a speculative rotation may produce
/// positions left of or above the board; such positions are rejected before
/// they ever reach the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, delta: Delta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }
}

/// Rotation state of a piece.
///
/// One of four states, `0` being the spawn orientation. Rotation only ever
/// advances by one step and wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation(u8);

impl Orientation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The seven tetromino shapes.
///
/// The discriminant is the identifier stored in board cells; `0` is reserved
/// for the empty background cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// Leftward L.
    J = 1,
    /// Rightward Z.
    S = 2,
    /// Long straight piece.
    I = 3,
    /// Bump in the middle.
    T = 4,
    /// Rightward L.
    L = 5,
    Z = 6,
    /// Square.
    O = 7,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece id {id} (expected 1-7)")]
pub struct InvalidPieceId {
    pub id: u8,
}

impl TryFrom<u8> for PieceKind {
    type Error = InvalidPieceId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or(InvalidPieceId { id })
    }
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::J,
        Self::S,
        Self::I,
        Self::T,
        Self::L,
        Self::Z,
        Self::O,
    ];

    /// Returns the board identifier of this piece type (1-7).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub(crate) const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the number of orientations after which the shape repeats.
    ///
    /// ```
    /// use tetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::O.rotation_period(), 1);
    /// assert_eq!(PieceKind::I.rotation_period(), 2);
    /// assert_eq!(PieceKind::T.rotation_period(), 4);
    /// ```
    #[must_use]
    pub const fn rotation_period(self) -> usize {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::J | PieceKind::T | PieceKind::L => 4,
        }
    }
}

/// The active tetromino: its type, its four board cells and its orientation.
///
/// `Piece` is a value type. Moving or rotating it produces a new `Piece`;
/// whether the result is legal on a given board is decided by the movement
/// functions in [`crate::engine::movement`].
///
/// # Example
///
/// ```
/// use tetris_engine::{Piece, PieceKind, Position};
///
/// let piece = Piece::spawn(PieceKind::I, 10);
/// assert_eq!(piece.cells()[0], Position::new(3, 0));
///
/// let lowered = piece.translated(0, 1);
/// assert!(lowered.cells().iter().all(|cell| cell.y == 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: [Position; 4],
    orientation: Orientation,
}

impl Piece {
    /// Creates a piece at its spawn coordinates on a board `board_width` wide.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let origin = Position::new((board_width / 2) as i32, 0);
        Self {
            kind,
            cells: geometry::spawn_offsets(kind).map(|delta| origin.offset(delta)),
            orientation: Orientation::SPAWN,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn cells(&self) -> &[Position; 4] {
        &self.cells
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn occupies(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Returns this piece moved by `(dx, dy)` without any bounds handling.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let delta = Delta::new(dx, dy);
        Self {
            cells: self.cells.map(|cell| cell.offset(delta)),
            ..*self
        }
    }

    /// Returns this piece advanced to the next orientation.
    ///
    /// The rotation deltas are applied to the current cells, so the result
    /// may lie partly outside the board.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let deltas = geometry::rotation_deltas(self.kind, self.orientation);
        let mut cells = self.cells;
        for (cell, delta) in cells.iter_mut().zip(deltas) {
            *cell = cell.offset(*delta);
        }
        Self {
            kind: self.kind,
            cells,
            orientation: self.orientation.next(),
        }
    }
}
