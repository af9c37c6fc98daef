use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use tetris_engine::Board;

use super::CellDisplay;

/// The playing field, active piece included.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells(self.board.width(), CellDisplay::WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(self.board.height(), CellDisplay::HEIGHT)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let grid = super::cell_grid(area, self.board.width(), self.board.height());
        for (grid_row, row) in iter::zip(grid, self.board.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(*cell, true).render(grid_cell, buf);
            }
        }
    }
}
