use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for tick-driven TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the tick interval.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    ///
    /// Key events have already been recorded in the runtime's keyboard state
    /// when this is called.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Updates game logic (called on each `Event::Tick`).
    ///
    /// Returns whether the visible state changed and the screen must be redrawn.
    fn update(&mut self, runtime: &mut Runtime) -> bool;
}
