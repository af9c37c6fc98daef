use std::{iter, time::Duration};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetris_engine::{GameSession, Track};

use super::style;

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    track: Option<Track>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession, track: Option<Track>) -> Self {
        Self {
            session,
            track,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells(ROW_COUNT, 1) + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Number of rows in the stats panel.
const ROW_COUNT: usize = 9;

#[derive(Debug)]
enum StatRow {
    Blank,
    Heading(&'static str),
    Value(String),
    Labeled(&'static str, String),
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let centis = duration.subsec_millis() / 10;
    format!("{}:{:02}.{centis:02}", secs / 60, secs % 60)
}

impl SessionStatsDisplay<'_> {
    fn rows(&self) -> [StatRow; ROW_COUNT] {
        let session = self.session;
        let track = self
            .track
            .map_or_else(|| "-".to_owned(), |track| track.to_string());
        [
            StatRow::Heading("TIME:"),
            StatRow::Value(format_duration(session.duration())),
            StatRow::Blank,
            StatRow::Labeled("LINES:", session.completed_lines().to_string()),
            StatRow::Labeled("LEVEL:", session.level().to_string()),
            StatRow::Labeled("SPEED:", session.descent_delay().to_string()),
            StatRow::Blank,
            StatRow::Heading("MUSIC:"),
            StatRow::Value(track),
        ]
    }
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let inner = self.block.inner_if_some(area);

        let line_areas = inner.layout_vec(&Layout::vertical(
            [Constraint::Length(1); ROW_COUNT],
        ));
        let halves = Layout::horizontal([Constraint::Fill(1); 2]);
        let left = |text: &str, area: Rect, buf: &mut Buffer| {
            Line::styled(text.to_owned(), style::DEFAULT)
                .left_aligned()
                .render(area, buf);
        };
        let right = |text: String, area: Rect, buf: &mut Buffer| {
            Line::styled(text, style::DEFAULT)
                .right_aligned()
                .render(area, buf);
        };

        for (row, line_area) in iter::zip(self.rows(), line_areas) {
            match row {
                StatRow::Blank => {}
                StatRow::Heading(label) => left(label, line_area, buf),
                StatRow::Value(value) => right(value, line_area, buf),
                StatRow::Labeled(label, value) => {
                    let [label_area, value_area] = line_area.layout(&halves);
                    left(label, label_area, buf);
                    right(value, value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tetris_engine::GameConfig;

    use super::*;

    fn rendered_rows(display: SessionStatsDisplay) -> Vec<String> {
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0:00.00");
        assert_eq!(format_duration(Duration::from_millis(83_250)), "1:23.25");
    }

    #[test]
    fn test_rows_show_session_counters() {
        let session = GameSession::with_seed(GameConfig::default(), 4, 0);
        let rows = rendered_rows(SessionStatsDisplay::new(&session, Some(Track::Menuet)));
        assert_eq!(rows.len(), ROW_COUNT);
        assert_eq!(rows[0], "TIME:");
        assert!(rows[3].starts_with("LINES:") && rows[3].ends_with("12"));
        assert!(rows[4].starts_with("LEVEL:") && rows[4].ends_with('4'));
        assert!(rows[5].starts_with("SPEED:") && rows[5].ends_with("11"));
        assert_eq!(rows[8].trim_start(), "Menuet (BWV 814)");
    }

    #[test]
    fn test_no_track_selected() {
        let session = GameSession::with_seed(GameConfig::default(), 0, 0);
        let rows = rendered_rows(SessionStatsDisplay::new(&session, None));
        assert_eq!(rows[8].trim_start(), "-");
    }
}
