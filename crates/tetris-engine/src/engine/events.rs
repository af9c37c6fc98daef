use arrayvec::ArrayVec;

use super::input::Track;

/// Something the audio or render boundary may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// One or more rows were removed by a lock.
    ///
    /// A lock that completes no row raises nothing, so the clear cue and the
    /// clear pause only follow locks that actually removed rows.
    LinesCleared(usize),
    GameOver,
    TrackSelected(Track),
    Paused,
    Resumed,
}

/// Upper bound of events a single tick can raise.
pub const MAX_EVENTS_PER_TICK: usize = 4;

/// Outcome of a single [`GameSession::tick`](super::GameSession::tick).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: ArrayVec<GameEvent, MAX_EVENTS_PER_TICK>,
    /// Whether the visible state changed and a new frame should be drawn.
    pub redraw: bool,
}

impl TickReport {
    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.events
            .iter()
            .map(|event| match event {
                GameEvent::LinesCleared(n) => *n,
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn contains(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }
}
