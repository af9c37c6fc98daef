use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as CrosstermEvent};

/// Events produced by the [`EventLoop`].
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Fixed-rate game tick (every `tick_interval`).
    Tick,
    /// The screen is dirty and should be drawn.
    Render,
    /// Key input, resize and other terminal events.
    Crossterm(CrosstermEvent),
}

/// Tick scheduling and redraw-on-change.
///
/// Ticks are scheduled on a fixed grid, so the tick rate does not drift with
/// the time spent handling events. When the loop falls more than one
/// interval behind, the grid restarts from the current time and missed ticks
/// are dropped.
///
/// Crossterm events always dirty the screen. Ticks do not; the runtime calls
/// [`EventLoop::mark_dirty`] when the application reports a change.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticks disabled.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            next_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval; the first tick is due immediately.
    ///
    /// Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.next_tick = Instant::now();
    }

    /// Delays the next tick until at least `duration` after now.
    pub(super) fn suspend_ticks(&mut self, duration: Duration) {
        self.next_tick = self.next_tick.max(Instant::now() + duration);
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick is due or a crossterm event occurs. Without a
    /// tick interval, only waits for crossterm events.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now >= self.next_tick
            {
                self.next_tick += interval;
                if self.next_tick <= now {
                    self.next_tick = now + interval;
                }
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn timeout(&self, now: Instant) -> Option<Duration> {
        self.tick_interval
            .map(|_| self.next_tick.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(25);

    #[test]
    fn test_first_tick_then_initial_render() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(INTERVAL));
        assert!(events.next().unwrap().is_tick());
        assert!(events.next().unwrap().is_render());

        let timeout = events.timeout(Instant::now()).unwrap();
        assert!(timeout <= INTERVAL, "{timeout:?}");
    }

    #[test]
    fn test_tick_does_not_dirty_the_screen() {
        let mut events = EventLoop::new();
        events.dirty = false;
        events.set_tick_interval(Some(INTERVAL));
        assert!(events.next().unwrap().is_tick());
        assert!(!events.dirty);
        events.mark_dirty();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_falling_behind_restarts_the_grid() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(INTERVAL));
        events.next_tick = Instant::now().checked_sub(INTERVAL * 10).unwrap();
        assert!(events.next().unwrap().is_tick());
        assert!(events.next_tick > Instant::now());
    }

    #[test]
    fn test_suspend_pushes_next_tick_back() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(INTERVAL));
        events.suspend_ticks(Duration::from_millis(200));
        let timeout = events.timeout(Instant::now()).unwrap();
        assert!(timeout > Duration::from_millis(150), "{timeout:?}");
        assert!(timeout <= Duration::from_millis(200), "{timeout:?}");
    }

    #[test]
    fn test_short_suspend_keeps_later_tick() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(INTERVAL));
        let later = Instant::now() + Duration::from_secs(1);
        events.next_tick = later;
        events.suspend_ticks(Duration::from_millis(10));
        assert_eq!(events.next_tick, later);
    }
}
