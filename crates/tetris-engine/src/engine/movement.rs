//! Collision tests and moves for the active piece.
//!
//! The active piece's cells are always marked on the board. The query
//! functions here never mutate anything; they look past the piece's own cells
//! instead of vacating them. The commit functions ([`translate`],
//! [`try_rotate`]) rewrite the board and the piece together, so no caller
//! ever observes a half-moved piece.

use crate::core::{Board, Cell, Piece, PieceKind};

/// Returns whether the piece, moved by `(dx, dy)`, would land on a cell
/// occupied by something other than itself.
///
/// Each translated coordinate is first clamped to the board, so a move that
/// overshoots an edge is tested at the edge instead of being rejected. A
/// clamped cell can fall back onto the piece's own cells and then does not
/// count as a collision; callers pair this with the edge checks in
/// [`can_move_left`], [`can_move_right`] and [`can_move_down`].
#[must_use]
pub fn would_collide(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    piece
        .translated(dx, dy)
        .cells()
        .iter()
        .map(|&cell| board.clamp(cell))
        .any(|cell| !piece.occupies(cell) && board.is_occupied(cell))
}

#[must_use]
pub fn can_move_left(board: &Board, piece: &Piece) -> bool {
    piece.cells().iter().all(|cell| cell.x > 0) && !would_collide(board, piece, -1, 0)
}

#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn can_move_right(board: &Board, piece: &Piece) -> bool {
    let last_column = board.width() as i32 - 1;
    piece.cells().iter().all(|cell| cell.x < last_column) && !would_collide(board, piece, 1, 0)
}

/// Returns whether the piece can descend one row; `false` means it must lock.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn can_move_down(board: &Board, piece: &Piece) -> bool {
    let last_row = board.height() as i32 - 1;
    piece.cells().iter().all(|cell| cell.y < last_row) && !would_collide(board, piece, 0, 1)
}

/// Moves the piece by `(dx, dy)` and rewrites its board cells.
///
/// No legality check happens here; call the matching `can_move_*` first.
pub fn translate(board: &mut Board, piece: &mut Piece, dx: i32, dy: i32) {
    board.clear(piece.cells());
    *piece = piece.translated(dx, dy);
    board.place(piece.cells(), piece.kind());
}

/// Returns the next orientation of the piece if it fits on the board.
///
/// Every rotated cell must be inside the board and either empty or one of
/// the cells the piece is vacating.
#[must_use]
pub fn rotation_target(board: &Board, piece: &Piece) -> Option<Piece> {
    let rotated = piece.rotated();
    rotated
        .cells()
        .iter()
        .all(|&cell| board.contains(cell) && (piece.occupies(cell) || !board.is_occupied(cell)))
        .then_some(rotated)
}

#[must_use]
pub fn can_rotate(board: &Board, piece: &Piece) -> bool {
    rotation_target(board, piece).is_some()
}

/// Rotates the piece to its next orientation if the result fits.
///
/// Returns `false` and leaves board and piece untouched otherwise.
pub fn try_rotate(board: &mut Board, piece: &mut Piece) -> bool {
    let Some(rotated) = rotation_target(board, piece) else {
        return false;
    };
    board.clear(piece.cells());
    *piece = rotated;
    board.place(piece.cells(), piece.kind());
    true
}

/// Lowers the piece until it can descend no further and returns the number
/// of rows it fell.
///
/// Always terminates within `board.height()` steps.
pub fn drop_to_floor(board: &mut Board, piece: &mut Piece) -> usize {
    let mut rows = 0;
    while can_move_down(board, piece) {
        translate(board, piece, 0, 1);
        rows += 1;
    }
    rows
}

/// Builds a fresh piece at its spawn coordinates.
///
/// Returns the piece and whether its spawn cells overlap occupied cells.
/// The board is left untouched either way.
#[must_use]
pub fn spawn(board: &Board, kind: PieceKind) -> (Piece, bool) {
    let piece = Piece::spawn(kind, board.width());
    let blocked = piece.cells().iter().any(|&cell| board.is_occupied(cell));
    (piece, blocked)
}

/// Returns whether every cell of the piece is in bounds and marked with its
/// kind on the board.
#[must_use]
pub fn is_on_board(board: &Board, piece: &Piece) -> bool {
    piece
        .cells()
        .iter()
        .all(|&cell| board.contains(cell) && board.cell(cell) == Cell::Piece(piece.kind()))
}
