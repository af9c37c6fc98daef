use tetris_engine::{GameEvent, Track};

pub(crate) use self::{
    bell::TerminalBell,
    speaker::{RodioMixer, Speaker},
};

mod bell;
mod speaker;
mod tune;

/// Sound cues raised by the game.
pub(crate) trait AudioSink {
    fn line_cleared(&mut self, rows: usize);
    fn game_over(&mut self);
    fn select_track(&mut self, track: Track);
    /// Track currently selected for background music.
    fn current_track(&self) -> Option<Track>;

    /// Dispatches a game event to the matching cue.
    fn play(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::LinesCleared(rows) => self.line_cleared(rows),
            GameEvent::GameOver => self.game_over(),
            GameEvent::TrackSelected(track) => self.select_track(track),
            GameEvent::Paused | GameEvent::Resumed => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every cue instead of playing it.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSink {
        pub(crate) cleared: Vec<usize>,
        pub(crate) game_overs: usize,
        pub(crate) track: Option<Track>,
    }

    impl AudioSink for RecordingSink {
        fn line_cleared(&mut self, rows: usize) {
            self.cleared.push(rows);
        }

        fn game_over(&mut self) {
            self.game_overs += 1;
        }

        fn select_track(&mut self, track: Track) {
            self.track = Some(track);
        }

        fn current_track(&self) -> Option<Track> {
            self.track
        }
    }

    #[test]
    fn test_play_dispatches_events() {
        let mut sink = RecordingSink::default();
        sink.play(&GameEvent::LinesCleared(2));
        sink.play(&GameEvent::Paused);
        sink.play(&GameEvent::TrackSelected(Track::Korobeiniki));
        sink.play(&GameEvent::GameOver);
        assert_eq!(sink.cleared, [2]);
        assert_eq!(sink.game_overs, 1);
        assert_eq!(sink.current_track(), Some(Track::Korobeiniki));
    }
}
