use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Clear, Padding, Paragraph, Widget, Wrap},
};
use tetris_engine::{GameSession, SessionState, Track};

use super::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

pub const GAME_OVER_MESSAGE: &str = "The only winning move is not to play";

/// Board, NEXT preview and STATS side by side, with the pause and game over
/// overlays.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    track: Option<Track>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, track: Option<Track>) -> Self {
        Self {
            session,
            track,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn height(&self) -> u16 {
        BoardDisplay::new(self.session.board())
            .block(Block::bordered())
            .height()
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    fn border_color(&self) -> ratatui::style::Color {
        match self.session.state() {
            SessionState::Playing | SessionState::Exited => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game_board = BoardDisplay::new(self.session.board()).block(
            Block::bordered()
                .border_style(self.border_color())
                .style(style::DEFAULT),
        );
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece())
            .block(self.panel("NEXT"));
        let session_stats =
            SessionStatsDisplay::new(self.session, self.track).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match self.session.state() {
            SessionState::Playing | SessionState::Exited => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSED, 1)),
            SessionState::GameOver => Some((GAME_OVER_MESSAGE, style::GAME_OVER, 2)),
        };

        if let Some((text, style, lines)) = popup {
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(lines + 2),
            );
            let block = Block::new().style(style).padding(Padding::vertical(1));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            Paragraph::new(text)
                .style(style)
                .centered()
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tetris_engine::{Board, Cell, GameConfig, InputSnapshot, PieceKind, Position};

    use super::*;

    fn screen(display: &SessionDisplay) -> String {
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_panels_are_titled() {
        let session = GameSession::with_seed(GameConfig::default(), 0, 2);
        let screen = screen(&SessionDisplay::new(&session, None));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("STATS"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut session = GameSession::with_seed(GameConfig::default(), 0, 2);
        let pause = InputSnapshot {
            pause: true,
            ..InputSnapshot::IDLE
        };
        while !session.state().is_paused() {
            session.tick(&pause);
        }
        assert!(screen(&SessionDisplay::new(&session, None)).contains("PAUSED"));
    }

    #[test]
    fn test_game_over_message() {
        let mut board = Board::new(10, 4);
        for x in 3..7 {
            board.set(Position::new(x, 1), Cell::Piece(PieceKind::J));
        }
        let mut session =
            GameSession::from_board(GameConfig::default(), board, PieceKind::I, 2).unwrap();
        while !session.state().is_game_over() {
            session.tick(&InputSnapshot::IDLE);
        }
        let display = SessionDisplay::new(&session, None);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        // Wrapped to the board width
        for word in GAME_OVER_MESSAGE.split(' ') {
            assert!(text.contains(word), "{word}");
        }
    }
}
