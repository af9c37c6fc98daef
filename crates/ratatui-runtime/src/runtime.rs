use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::Event;

use crate::{
    App,
    event_loop::{EventLoop, TuiEvent},
    keyboard::{self, HeldKeys, KeyboardState},
};

/// TUI application runtime.
///
/// Manages the event loop and the held-key state, and executes applications
/// that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    keyboard: KeyboardState,
}

impl Runtime {
    /// Creates a new Runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick interval.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Holds back tick events for `duration`. Rendering and input continue.
    pub fn suspend_ticks(&mut self, duration: Duration) {
        self.events.suspend_ticks(duration);
    }

    /// Returns the keys held right now.
    pub fn held_keys(&mut self) -> HeldKeys {
        self.keyboard.snapshot(Instant::now())
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Asks the terminal to report key releases where supported
    /// 3. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Tick`: calls `app.update()`, redrawing if it reports a change
    ///    - `Event::Render`: calls `app.draw()` after a change or terminal event
    ///    - `Event::Crossterm`: records key events, then calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            let release_events = keyboard::enable_release_events()?;
            self.keyboard.set_release_events(release_events);

            let result = (|| -> io::Result<()> {
                while !app.should_exit() {
                    match self.events.next()? {
                        TuiEvent::Tick => {
                            if app.update(&mut self) {
                                self.events.mark_dirty();
                            }
                        }
                        TuiEvent::Render => {
                            terminal.draw(|f| app.draw(f))?;
                        }
                        TuiEvent::Crossterm(event) => {
                            match &event {
                                Event::Key(key) => {
                                    self.keyboard.handle_key_event(key, Instant::now());
                                }
                                Event::FocusLost => self.keyboard.clear(),
                                _ => {}
                            }
                            app.handle_event(&mut self, event);
                        }
                    }
                }
                Ok(())
            })();

            if release_events {
                keyboard::disable_release_events()?;
            }
            result
        })
    }
}
