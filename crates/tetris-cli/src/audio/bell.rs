use std::io::{self, Write as _};

use tetris_engine::Track;

use super::AudioSink;

/// Rings the terminal bell for sound cues.
///
/// Stands in for [`Speaker`](super::Speaker) when no audio output device
/// opens. A selected track is only recorded for display.
#[derive(Debug, Default)]
pub(crate) struct TerminalBell {
    track: Option<Track>,
}

impl TerminalBell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn ring(times: usize) {
        let mut stdout = io::stdout().lock();
        // Bell failures are ignored.
        let _ = stdout
            .write_all(&b"\x07".repeat(times))
            .and_then(|()| stdout.flush());
    }
}

impl AudioSink for TerminalBell {
    fn line_cleared(&mut self, _rows: usize) {
        Self::ring(1);
    }

    fn game_over(&mut self) {
        Self::ring(2);
    }

    fn select_track(&mut self, track: Track) {
        self.track = Some(track);
    }

    fn current_track(&self) -> Option<Track> {
        self.track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_records_track() {
        let mut bell = TerminalBell::new();
        assert_eq!(bell.current_track(), None);
        bell.select_track(Track::RussianSong);
        assert_eq!(bell.current_track(), Some(Track::RussianSong));
    }
}
