use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetris_engine::{Cell, Delta, PieceKind, spawn_offsets};

use super::CellDisplay;

/// Preview of a piece type in its spawn orientation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    /// Largest preview grid, in cells.
    const GRID: (u16, u16) = (4, 2);

    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        Self::GRID.0 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        Self::GRID.1 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Bounding box of the spawn offsets: origin and size in cells.
fn bounds(offsets: &[Delta; 4]) -> (Delta, u16, u16) {
    let min_x = offsets.iter().map(|d| d.dx).min().unwrap_or(0);
    let max_x = offsets.iter().map(|d| d.dx).max().unwrap_or(0);
    let min_y = offsets.iter().map(|d| d.dy).min().unwrap_or(0);
    let max_y = offsets.iter().map(|d| d.dy).max().unwrap_or(0);
    let size = |min: i32, max: i32| u16::try_from(max - min + 1).unwrap_or(0);
    (Delta::new(min_x, min_y), size(min_x, max_x), size(min_y, max_y))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            CellDisplay::from_cell(Cell::Empty, false).render(area, buf);
            return;
        };

        let offsets = spawn_offsets(piece);
        let (origin, width, height) = bounds(offsets);
        let piece_area = area.centered(
            Constraint::Length(width * CellDisplay::WIDTH),
            Constraint::Length(height * CellDisplay::HEIGHT),
        );

        let grid = super::cell_grid(piece_area, width.into(), height.into());

        let occupied = CellDisplay::from_cell(Cell::Piece(piece), false);
        let empty = CellDisplay::from_cell(Cell::Empty, false);
        for (dy, grid_row) in (origin.dy..).zip(grid) {
            for (dx, grid_cell) in (origin.dx..).zip(grid_row) {
                if offsets.contains(&Delta::new(dx, dy)) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
