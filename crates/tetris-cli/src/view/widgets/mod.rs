use std::iter;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::Block as BlockWidget,
};

pub use self::{
    board_display::*, cell_display::*, key_binding_display::*, piece_display::*,
    session_display::*, session_stats_display::*,
};

mod board_display;
mod cell_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);

    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    pub const I_PIECE: Style = bg_only(color::CYAN);
    pub const O_PIECE: Style = bg_only(color::YELLOW);
    pub const S_PIECE: Style = bg_only(color::GREEN);
    pub const Z_PIECE: Style = bg_only(color::RED);
    pub const J_PIECE: Style = bg_only(color::BLUE);
    pub const L_PIECE: Style = bg_only(color::ORANGE);
    pub const T_PIECE: Style = bg_only(color::MAGENTA);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    probe.height - inner.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    probe.width - inner.width
}

/// Converts a cell count into terminal columns or rows, saturating.
fn cells(count: usize, size: u16) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_mul(size)
}

/// Splits `area` into rows of cell areas, `columns` wide and `rows` high.
///
/// Columns are centered horizontally when `area` is wider than the grid.
fn cell_grid(area: Rect, columns: usize, rows: usize) -> impl Iterator<Item = Vec<Rect>> {
    let across = Layout::horizontal(iter::repeat_n(
        Constraint::Length(CellDisplay::WIDTH),
        columns,
    ))
    .flex(Flex::Center);
    let down = Layout::vertical(iter::repeat_n(
        Constraint::Length(CellDisplay::HEIGHT),
        rows,
    ));
    area.layout_vec(&down)
        .into_iter()
        .map(move |line| line.layout_vec(&across))
}
