use std::{num::NonZeroU64, time::Duration};

use crate::Board;

/// Board dimensions and tick rate of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Game ticks per second.
    pub tick_rate: NonZeroU64,
}

const DEFAULT_TICK_RATE: NonZeroU64 = NonZeroU64::new(40).expect("tick rate is non-zero");

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: Board::STANDARD_WIDTH,
            height: Board::STANDARD_HEIGHT,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl GameConfig {
    /// Wall-clock length of one tick.
    ///
    /// ```
    /// use std::{num::NonZeroU64, time::Duration};
    /// use tetris_engine::GameConfig;
    ///
    /// assert_eq!(GameConfig::default().tick_interval(), Duration::from_millis(25));
    /// ```
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / u32::try_from(self.tick_rate.get()).unwrap_or(u32::MAX)
    }

    /// Converts a tick count into elapsed game time.
    #[must_use]
    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        const NANOS_PER_SEC: u128 = 1_000_000_000;
        let rate = self.tick_rate.get();
        let nanos = u128::from(ticks % rate) * NANOS_PER_SEC / u128::from(rate);
        Duration::new(ticks / rate, u32::try_from(nanos).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_to_duration() {
        let config = GameConfig::default();
        assert_eq!(config.ticks_to_duration(0), Duration::ZERO);
        assert_eq!(config.ticks_to_duration(40), Duration::from_secs(1));
        assert_eq!(config.ticks_to_duration(50), Duration::from_millis(1250));
    }

    #[test]
    fn test_extreme_tick_rates() {
        let slow = GameConfig {
            tick_rate: NonZeroU64::MIN,
            ..GameConfig::default()
        };
        assert_eq!(slow.tick_interval(), Duration::from_secs(1));
        assert_eq!(slow.ticks_to_duration(90), Duration::from_secs(90));

        let fast = GameConfig {
            tick_rate: NonZeroU64::MAX,
            ..GameConfig::default()
        };
        assert_eq!(fast.tick_interval(), Duration::ZERO);
        assert_eq!(fast.ticks_to_duration(u64::MAX), Duration::from_secs(1));
        assert!(fast.ticks_to_duration(u64::MAX - 1) < Duration::from_secs(1));
    }
}
