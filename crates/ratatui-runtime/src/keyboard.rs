use std::{
    collections::{HashMap, HashSet},
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};

/// How long a key counts as held after its last repeat when the terminal
/// does not report releases.
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// How long a fresh press counts as held without release reporting.
///
/// Covers the gap before the first auto-repeat, which is 250-600 ms on
/// common systems.
pub const DEFAULT_FIRST_REPEAT_WINDOW: Duration = Duration::from_millis(650);

/// Tracks which keys are held down, for polling once per tick.
///
/// Press and repeat events mark a key held. A release event clears it when
/// the terminal reports event types. Otherwise a fresh press is held for the
/// first repeat window, and once the key repeats it is considered released
/// when no event for it arrived within the release timeout.
///
/// A key pressed and released between two [`snapshot`](Self::snapshot)s is
/// still reported held in the next one, so short taps are never lost.
///
/// # Example
///
/// ```
/// use std::time::Instant;
///
/// use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
/// use ratatui_runtime::KeyboardState;
///
/// let mut keyboard = KeyboardState::new();
/// keyboard.set_release_events(true);
///
/// let now = Instant::now();
/// keyboard.handle_key_event(&KeyEvent::new(KeyCode::Left, KeyModifiers::NONE), now);
/// assert!(keyboard.snapshot(now).contains(KeyCode::Left));
///
/// let release = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
/// keyboard.handle_key_event(&release, now);
/// assert!(!keyboard.snapshot(now).contains(KeyCode::Left));
/// ```
#[derive(Debug, Clone)]
pub struct KeyboardState {
    release_events: bool,
    release_timeout: Duration,
    first_repeat_window: Duration,
    keys: HashMap<KeyCode, KeyRecord>,
}

#[derive(Debug, Clone, Copy)]
struct KeyRecord {
    last_event: Instant,
    repeating: bool,
    released: bool,
    unreported: bool,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            release_events: false,
            release_timeout: DEFAULT_RELEASE_TIMEOUT,
            first_repeat_window: DEFAULT_FIRST_REPEAT_WINDOW,
            keys: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_first_repeat_window(mut self, window: Duration) -> Self {
        self.first_repeat_window = window;
        self
    }

    pub fn set_release_events(&mut self, enabled: bool) {
        self.release_events = enabled;
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent, now: Instant) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let record = self.keys.entry(code).or_insert(KeyRecord {
                    last_event: now,
                    repeating: false,
                    released: true,
                    unreported: false,
                });
                // A second event while held is the key repeating.
                record.repeating = !record.released;
                record.last_event = now;
                record.released = false;
                record.unreported = true;
            }
            KeyEventKind::Release => {
                if let Some(record) = self.keys.get_mut(&code) {
                    record.released = true;
                }
            }
        }
    }

    /// Returns the keys held at `now` and forgets the released ones.
    pub fn snapshot(&mut self, now: Instant) -> HeldKeys {
        let release_events = self.release_events;
        let (timeout, window) = (self.release_timeout, self.first_repeat_window);
        let still_held = |record: &KeyRecord| {
            let limit = if record.repeating { timeout } else { window };
            !record.released
                && (release_events || now.saturating_duration_since(record.last_event) < limit)
        };
        let held = self
            .keys
            .iter()
            .filter(|(_, record)| record.unreported || still_held(record))
            .map(|(code, _)| *code)
            .collect();
        self.keys.retain(|_, record| {
            record.unreported = false;
            still_held(record)
        });
        HeldKeys(held)
    }

    /// Forgets every key, e.g. after the terminal lost focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Letters are tracked case-insensitively so that releasing Shift does not
/// leave a key stuck.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        code => code,
    }
}

/// Keys held at the time of a [`KeyboardState::snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(HashSet<KeyCode>);

impl HeldKeys {
    #[must_use]
    pub fn contains(&self, code: KeyCode) -> bool {
        self.0.contains(&normalize(code))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.0.iter().copied()
    }
}

/// Asks the terminal to report key releases.
///
/// Returns whether release events will be delivered.
pub(crate) fn enable_release_events() -> io::Result<bool> {
    if cfg!(windows) {
        return Ok(true);
    }
    if !terminal::supports_keyboard_enhancement().unwrap_or(false) {
        return Ok(false);
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )?;
    Ok(true)
}

pub(crate) fn disable_release_events() -> io::Result<()> {
    if cfg!(windows) {
        return Ok(());
    }
    execute!(io::stdout(), PopKeyboardEnhancementFlags)
}
