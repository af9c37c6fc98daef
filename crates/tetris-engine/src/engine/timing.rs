//! Per-action repeat delays measured in game ticks.

/// Everything the game loop can trigger on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Descent,
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    SelectTrack,
}

impl Action {
    pub const LEN: usize = 8;

    pub const ALL: [Self; Self::LEN] = [
        Self::Descent,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
        Self::Pause,
        Self::SelectTrack,
    ];

    /// Default repeat delay in ticks.
    ///
    /// The descent delay is level dependent and is overwritten by the
    /// session before every check.
    #[must_use]
    pub const fn default_delay(self) -> u64 {
        match self {
            Action::Descent => super::scoring::BASE_DESCENT_DELAY,
            Action::MoveLeft | Action::MoveRight | Action::SoftDrop => 4,
            Action::Rotate => 5,
            Action::HardDrop | Action::Pause | Action::SelectTrack => 10,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    delay: u64,
    last_fired: Option<u64>,
}

/// Maps each [`Action`] to its delay and the tick it last fired on.
///
/// An action is ready when strictly more than `delay` ticks have passed since
/// it last fired. A forced action has no last-fired tick and is ready on the
/// next check.
///
/// # Example
///
/// ```
/// use tetris_engine::{Action, ActionTimers};
///
/// let mut timers = ActionTimers::new(1);
/// assert!(!timers.is_ready(Action::Rotate, 6));
/// assert!(timers.try_fire(Action::Rotate, 7));
/// assert!(!timers.is_ready(Action::Rotate, 12));
/// assert!(timers.is_ready(Action::Rotate, 13));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTimers {
    timers: [Timer; Action::LEN],
}

impl ActionTimers {
    /// Creates the table with every action last fired at `start_tick`.
    #[must_use]
    pub fn new(start_tick: u64) -> Self {
        Self {
            timers: Action::ALL.map(|action| Timer {
                delay: action.default_delay(),
                last_fired: Some(start_tick),
            }),
        }
    }

    #[must_use]
    pub fn delay(&self, action: Action) -> u64 {
        self.timers[action.index()].delay
    }

    pub fn set_delay(&mut self, action: Action, delay: u64) {
        self.timers[action.index()].delay = delay;
    }

    #[must_use]
    pub fn last_fired(&self, action: Action) -> Option<u64> {
        self.timers[action.index()].last_fired
    }

    #[must_use]
    pub fn is_ready(&self, action: Action, tick: u64) -> bool {
        let timer = &self.timers[action.index()];
        timer
            .last_fired
            .is_none_or(|last| tick.saturating_sub(last) > timer.delay)
    }

    pub fn fire(&mut self, action: Action, tick: u64) {
        self.timers[action.index()].last_fired = Some(tick);
    }

    /// Fires the action if it is ready and reports whether it did.
    pub fn try_fire(&mut self, action: Action, tick: u64) -> bool {
        let ready = self.is_ready(action, tick);
        if ready {
            self.fire(action, tick);
        }
        ready
    }

    /// Makes the action ready on its next check regardless of its delay.
    pub fn force(&mut self, action: Action) {
        self.timers[action.index()].last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let timers = ActionTimers::new(1);
        assert_eq!(timers.delay(Action::MoveLeft), 4);
        assert_eq!(timers.delay(Action::MoveRight), 4);
        assert_eq!(timers.delay(Action::Rotate), 5);
        assert_eq!(timers.delay(Action::SoftDrop), 4);
        assert_eq!(timers.delay(Action::HardDrop), 10);
        assert_eq!(timers.delay(Action::Pause), 10);
        assert_eq!(timers.delay(Action::SelectTrack), 10);
        assert_eq!(timers.delay(Action::Descent), 15);
    }

    #[test]
    fn test_ready_only_after_delay_is_exceeded() {
        let mut timers = ActionTimers::new(1);
        for tick in 1..=5 {
            assert!(!timers.is_ready(Action::MoveLeft, tick), "tick {tick}");
        }
        assert!(timers.try_fire(Action::MoveLeft, 6));
        assert_eq!(timers.last_fired(Action::MoveLeft), Some(6));
        assert!(!timers.try_fire(Action::MoveLeft, 10));
        assert!(timers.try_fire(Action::MoveLeft, 11));
    }

    #[test]
    fn test_timers_are_independent() {
        let mut timers = ActionTimers::new(1);
        assert!(timers.try_fire(Action::MoveLeft, 6));
        assert!(timers.is_ready(Action::MoveRight, 6));
        assert!(timers.is_ready(Action::SoftDrop, 6));
        assert!(!timers.is_ready(Action::Rotate, 6));
    }

    #[test]
    fn test_force_and_set_delay() {
        let mut timers = ActionTimers::new(100);
        assert!(!timers.is_ready(Action::Descent, 101));
        timers.force(Action::Descent);
        assert!(timers.is_ready(Action::Descent, 101));
        assert!(timers.try_fire(Action::Descent, 101));

        timers.set_delay(Action::Descent, 1);
        assert!(!timers.is_ready(Action::Descent, 102));
        assert!(timers.is_ready(Action::Descent, 103));
    }
}
