use std::time::Duration;

use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, Runtime};
use tetris_engine::{GameSession, SessionState};

use crate::{
    audio::AudioSink,
    command::play::input,
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

/// Time the game stands still after rows were cleared.
const CLEAR_PAUSE: Duration = Duration::from_millis(200);

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["F1", "F2", "F3"], "Music"),
    (&["Esc", "Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P"], "Resume"), (&["Esc", "Q"], "Quit")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["Esc", "Q"], "Quit")];

#[derive(Debug)]
pub struct PlayApp<A> {
    session: GameSession,
    audio: A,
    quit_requested: bool,
}

impl<A> PlayApp<A>
where
    A: AudioSink,
{
    pub fn new(session: GameSession, audio: A) -> Self {
        Self {
            session,
            audio,
            quit_requested: false,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[cfg(test)]
    pub fn audio(&self) -> &A {
        &self.audio
    }
}

impl<A> App for PlayApp<A>
where
    A: AudioSink,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.session.config().tick_interval()));
    }

    fn should_exit(&self) -> bool {
        self.session.state().is_exited()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && input::is_quit(&key)
        {
            self.quit_requested = true;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session, self.audio.current_track());
        let bindings = match self.session.state() {
            SessionState::Playing | SessionState::Exited => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(session_display.height()), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, runtime: &mut Runtime) -> bool {
        let held = runtime.held_keys();
        let input = input::snapshot(&held, self.quit_requested);
        self.quit_requested = false;

        let report = self.session.tick(&input);
        for event in &report.events {
            self.audio.play(event);
            if event.is_lines_cleared() {
                runtime.suspend_ticks(CLEAR_PAUSE);
            }
        }
        report.redraw
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tetris_engine::{Board, Cell, GameConfig, PieceKind, Position};

    use super::*;
    use crate::audio::tests::RecordingSink;

    fn app() -> PlayApp<RecordingSink> {
        let session = GameSession::with_seed(GameConfig::default(), 0, 4);
        PlayApp::new(session, RecordingSink::default())
    }

    #[test]
    fn test_ticks_advance_the_session() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        assert!(app.update(&mut runtime));
        assert_eq!(app.session().ticks(), 2);
        assert!(!app.should_exit());
    }

    #[test]
    fn test_quit_key_exits_on_next_tick() {
        let mut app = app();
        let mut runtime = Runtime::new();
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        app.handle_event(&mut runtime, quit);
        assert!(!app.should_exit());
        app.update(&mut runtime);
        assert!(app.should_exit());
    }

    #[test]
    fn test_other_keys_do_not_quit() {
        let mut app = app();
        let mut runtime = Runtime::new();
        let key = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        app.handle_event(&mut runtime, key);
        app.update(&mut runtime);
        assert!(!app.should_exit());
    }

    #[test]
    fn test_line_clear_reaches_audio_sink() {
        let mut board = Board::standard();
        for x in 0..10 {
            if !(3..7).contains(&x) {
                board.set(Position::new(x, 19), Cell::Piece(PieceKind::Z));
            }
        }
        let session =
            GameSession::from_board(GameConfig::default(), board, PieceKind::I, 4).unwrap();
        let mut app = PlayApp::new(session, RecordingSink::default());
        let mut runtime = Runtime::new();

        // One row per descent until the piece locks on the floor.
        for _ in 0..400 {
            app.update(&mut runtime);
            if !app.audio().cleared.is_empty() {
                break;
            }
        }
        assert_eq!(app.audio().cleared, [1]);
        assert_eq!(app.session().completed_lines(), 1);
    }
}
