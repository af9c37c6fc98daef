use std::fmt;

use rodio::{OutputStream, OutputStreamHandle, Sink, StreamError};
use tetris_engine::Track;

use super::{
    AudioSink,
    tune::{Cue, Tune},
};

const MUSIC_VOLUME: f32 = 0.3;
const EFFECT_VOLUME: f32 = 0.6;

/// Where tunes are played.
pub(crate) trait Mixer {
    /// Replaces the background music, stopping the previous tune.
    fn play_music(&mut self, tune: Tune);
    /// Plays a one-shot tune over the music.
    fn play_effect(&mut self, tune: Tune);
}

/// Mixer on the default audio output device.
pub(crate) struct RodioMixer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl fmt::Debug for RodioMixer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RodioMixer")
            .field("music", &self.music.is_some())
            .finish_non_exhaustive()
    }
}

impl RodioMixer {
    /// Opens the default output device.
    pub(crate) fn open() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }
}

impl Mixer for RodioMixer {
    fn play_music(&mut self, tune: Tune) {
        // Dropping the previous sink stops its tune.
        self.music = Sink::try_new(&self.handle).ok().map(|sink| {
            sink.set_volume(MUSIC_VOLUME);
            sink.append(tune);
            sink
        });
    }

    fn play_effect(&mut self, tune: Tune) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(EFFECT_VOLUME);
        sink.append(tune);
        sink.detach();
    }
}

/// Plays looping background music and the line-clear and game-over cues.
///
/// Starts with [`Track::Korobeiniki`]. The game-over tune replaces the music
/// and plays once.
#[derive(Debug)]
pub(crate) struct Speaker<M> {
    mixer: M,
    track: Option<Track>,
}

impl<M> Speaker<M>
where
    M: Mixer,
{
    pub(crate) fn new(mixer: M) -> Self {
        let mut speaker = Self { mixer, track: None };
        speaker.select_track(Track::Korobeiniki);
        speaker
    }
}

impl<M> AudioSink for Speaker<M>
where
    M: Mixer,
{
    fn line_cleared(&mut self, _rows: usize) {
        self.mixer.play_effect(Tune::new(Cue::LineClear));
    }

    fn game_over(&mut self) {
        self.track = None;
        self.mixer.play_music(Tune::new(Cue::GameOver));
    }

    fn select_track(&mut self, track: Track) {
        self.track = Some(track);
        self.mixer.play_music(Tune::new(Cue::Music(track)));
    }

    fn current_track(&self) -> Option<Track> {
        self.track
    }
}
