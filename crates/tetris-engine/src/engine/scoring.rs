/// Completed lines required per level.
pub const LINES_PER_LEVEL: usize = 3;
/// Auto-descent delay at level 0, in ticks.
pub const BASE_DESCENT_DELAY: u64 = 15;
/// Auto-descent delay once the level reaches 14, in ticks.
pub const MIN_DESCENT_DELAY: u64 = 1;
/// Highest level that can be selected at startup.
pub const MAX_STARTING_LEVEL: u8 = 15;

/// Line count and the level and speed derived from it.
///
/// # Example
///
/// ```
/// use tetris_engine::Scoring;
///
/// let mut scoring = Scoring::with_level_offset(2);
/// assert_eq!(scoring.completed_lines(), 6);
/// assert_eq!(scoring.level(), 2);
///
/// scoring.record_cleared(4);
/// assert_eq!(scoring.level(), 3);
/// assert_eq!(scoring.descent_delay(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoring {
    completed_lines: usize,
}

impl Scoring {
    #[must_use]
    pub const fn new() -> Self {
        Self { completed_lines: 0 }
    }

    /// Starts the count as if `level` levels had already been cleared.
    #[must_use]
    pub const fn with_level_offset(level: usize) -> Self {
        Self {
            completed_lines: level * LINES_PER_LEVEL,
        }
    }

    #[must_use]
    pub const fn completed_lines(&self) -> usize {
        self.completed_lines
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.completed_lines / LINES_PER_LEVEL
    }

    /// Ticks between two automatic descents: `max(15 - level, 1)`.
    #[must_use]
    pub fn descent_delay(&self) -> u64 {
        let level = u64::try_from(self.level()).unwrap_or(u64::MAX);
        BASE_DESCENT_DELAY
            .saturating_sub(level)
            .max(MIN_DESCENT_DELAY)
    }

    pub const fn record_cleared(&mut self, rows: usize) {
        self.completed_lines += rows;
    }
}
