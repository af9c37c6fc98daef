use super::piece::{Orientation, PieceKind};

/// Offset of a single cell, in board cells.
///
/// `x` grows rightward and `y` grows downward, matching board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Returns the per-cell deltas that rotate a piece from `orientation` to the
/// next orientation (mod 4).
///
/// The deltas are indexed by cell in the same order as the piece's cells, so
/// cell `i` of the rotated piece is cell `i` of the current piece plus
/// `deltas[i]`. Rotation is incremental: the table is applied to the current
/// coordinates, never to the spawn coordinates.
///
/// # Example
///
/// ```
/// use tetris_engine::{Delta, Orientation, PieceKind, rotation_deltas};
///
/// // The square never moves when rotated.
/// let deltas = rotation_deltas(PieceKind::O, Orientation::SPAWN);
/// assert!(deltas.iter().all(|d| *d == Delta::ZERO));
/// ```
#[must_use]
pub fn rotation_deltas(kind: PieceKind, orientation: Orientation) -> &'static [Delta; 4] {
    &ROTATION_DELTAS[kind.index()][orientation.as_usize()]
}

/// Returns the spawn offsets of a piece type, relative to the spawn column.
///
/// The spawn column is the board center `width / 2`; rows are absolute, so
/// every piece spawns touching the top row.
#[must_use]
pub fn spawn_offsets(kind: PieceKind) -> &'static [Delta; 4] {
    &SPAWN_OFFSETS[kind.index()]
}

const fn d(dx: i32, dy: i32) -> Delta {
    Delta::new(dx, dy)
}

const SPAWN_OFFSETS: [[Delta; 4]; PieceKind::LEN] = [
    // J
    [d(-1, 0), d(-1, 1), d(0, 1), d(1, 1)],
    // S
    [d(-1, 1), d(0, 1), d(0, 0), d(1, 0)],
    // I
    [d(-2, 0), d(-1, 0), d(0, 0), d(1, 0)],
    // T
    [d(-1, 1), d(0, 1), d(0, 0), d(1, 1)],
    // L
    [d(-1, 1), d(0, 1), d(1, 1), d(1, 0)],
    // Z
    [d(-1, 0), d(0, 0), d(0, 1), d(1, 1)],
    // O
    [d(-1, 0), d(-1, 1), d(0, 0), d(0, 1)],
];

// Indexed as [kind][orientation][cell]. I, S and Z repeat orientation 0 as 2
// and 1 as 3; every entry of O is zero.
const ROTATION_DELTAS: [[[Delta; 4]; 4]; PieceKind::LEN] = [
    // J
    [
        [d(0, 2), d(1, 1), d(0, 0), d(-1, -1)],
        [d(2, 0), d(1, -1), d(0, 0), d(-1, 1)],
        [d(0, -2), d(-1, -1), d(0, 0), d(1, 1)],
        [d(-2, 0), d(-1, 1), d(0, 0), d(1, -1)],
    ],
    // S
    [
        [d(1, 0), d(0, 1), d(-1, 0), d(-2, 1)],
        [d(-1, 0), d(0, -1), d(1, 0), d(2, -1)],
        [d(1, 0), d(0, 1), d(-1, 0), d(-2, 1)],
        [d(-1, 0), d(0, -1), d(1, 0), d(2, -1)],
    ],
    // I
    [
        [d(2, -2), d(1, -1), d(0, 0), d(-1, 1)],
        [d(-2, 2), d(-1, 1), d(0, 0), d(1, -1)],
        [d(2, -2), d(1, -1), d(0, 0), d(-1, 1)],
        [d(-2, 2), d(-1, 1), d(0, 0), d(1, -1)],
    ],
    // T
    [
        [d(1, 1), d(0, 0), d(-1, 1), d(-1, -1)],
        [d(1, -1), d(0, 0), d(1, 1), d(-1, 1)],
        [d(-1, -1), d(0, 0), d(1, -1), d(1, 1)],
        [d(-1, 1), d(0, 0), d(-1, -1), d(1, -1)],
    ],
    // L
    [
        [d(1, 1), d(0, 0), d(-1, -1), d(-2, 0)],
        [d(1, -1), d(0, 0), d(-1, 1), d(0, 2)],
        [d(-1, -1), d(0, 0), d(1, 1), d(2, 0)],
        [d(-1, 1), d(0, 0), d(1, -1), d(0, -2)],
    ],
    // Z
    [
        [d(1, 0), d(0, 1), d(-1, 0), d(-2, 1)],
        [d(-1, 0), d(0, -1), d(1, 0), d(2, -1)],
        [d(1, 0), d(0, 1), d(-1, 0), d(-2, 1)],
        [d(-1, 0), d(0, -1), d(1, 0), d(2, -1)],
    ],
    // O
    [[Delta::ZERO; 4]; 4],
];
