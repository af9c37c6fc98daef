use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tetris_engine::{Cell, PieceKind};

use super::style;

/// One board cell, two columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Cell::Empty => Self::new(style::EMPTY, ""),
            Cell::Piece(kind) => Self::new(piece_style(kind), ""),
        }
    }
}

fn piece_style(kind: PieceKind) -> Style {
    match kind {
        PieceKind::I => style::I_PIECE,
        PieceKind::O => style::O_PIECE,
        PieceKind::S => style::S_PIECE,
        PieceKind::Z => style::Z_PIECE,
        PieceKind::J => style::J_PIECE,
        PieceKind::L => style::L_PIECE,
        PieceKind::T => style::T_PIECE,
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the symbol's cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
