//! Synthesized music and sound cues.
//!
//! Every tune is a set of voices. A voice is a list of notes, each a pitch
//! (semitones above C1) held for a number of time units. Voices are mixed as
//! sine waves into a mono stream.

use std::{f32::consts::TAU, time::Duration};

use tetris_engine::Track;

pub(crate) const SAMPLE_RATE: u32 = 44_100;
const SAMPLE_RATE_HZ: f32 = 44_100.0;

/// Frequency of pitch 0.
const C1_HZ: f32 = 261.63;

/// Fade in and out at every note edge, in samples (5 ms).
const RAMP_SAMPLES: u32 = SAMPLE_RATE / 200;

/// Gain applied to each voice; two voices at full swing stay within 1.0.
const VOICE_GAIN: f32 = 0.5;

const MUSIC_UNIT: u32 = SAMPLE_RATE / 8;
const CUE_UNIT: u32 = SAMPLE_RATE / 20;

/// What a [`Tune`] plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cue {
    /// Background music, looped.
    Music(Track),
    LineClear,
    GameOver,
}

#[derive(Debug, Clone, Copy)]
struct Note {
    pitch: Option<u8>,
    units: u8,
}

const fn n(pitch: u8, units: u8) -> Note {
    Note {
        pitch: Some(pitch),
        units,
    }
}

const fn rest(units: u8) -> Note {
    Note { pitch: None, units }
}

const E1: u8 = 4;
const F1: u8 = 5;
const G1: u8 = 7;
const GS1: u8 = 8;
const A1: u8 = 9;
const AS1: u8 = 10;
const B1: u8 = 11;
const C2: u8 = 12;
const CS2: u8 = 13;
const D2: u8 = 14;
const E2: u8 = 16;
const F2: u8 = 17;
const FS2: u8 = 18;
const G2: u8 = 19;
const GS2: u8 = 20;
const A2: u8 = 21;
const B2: u8 = 23;
const C3: u8 = 24;

#[rustfmt::skip]
const KOROBEINIKI_LEAD: &[Note] = &[
    n(E2, 4), n(B1, 2), n(C2, 2), n(D2, 2), n(E2, 1), n(D2, 1), n(C2, 2), n(B1, 2),
    n(A1, 3), rest(1), n(A1, 2), n(C2, 2), n(E2, 4), n(D2, 2), n(C2, 2),
    n(B1, 5), rest(1), n(C2, 2), n(D2, 4), n(E2, 4),
    n(C2, 4), n(A1, 3), rest(1), n(A1, 8), rest(2),
    n(D2, 4), n(F2, 2), n(A2, 4), n(G2, 2), n(F2, 2),
    n(E2, 6), n(C2, 2), n(E2, 4), n(D2, 2), n(C2, 2),
    n(B1, 6), n(C2, 2), n(D2, 4), n(E2, 4),
    n(C2, 4), n(A1, 3), rest(1), n(A1, 8),
    n(E2, 8), n(C2, 8), n(D2, 8), n(B1, 8), n(C2, 8), n(A1, 8), n(GS1, 8), n(B1, 8),
    n(E2, 8), n(C2, 8), n(D2, 8), n(B1, 8), n(C2, 4), n(E2, 4), n(A2, 8), n(GS2, 16),
];

#[rustfmt::skip]
const KOROBEINIKI_COUNTER: &[Note] = &[
    n(B1, 4), n(GS1, 2), n(A1, 2), n(B1, 4), n(A1, 2), n(GS1, 2),
    n(E1, 4), n(E1, 2), n(A1, 2), n(C2, 4), n(B1, 2), n(A1, 2),
    n(GS1, 4), rest(2), n(E1, 2), n(GS1, 4), n(B1, 2), n(C2, 2),
    n(A1, 4), n(E1, 3), rest(1), n(E1, 8), rest(2),
    n(F1, 4), n(A1, 2), n(C2, 4), n(B1, 2), n(A1, 2),
    n(G1, 6), n(E1, 2), n(G1, 2), n(A1, 1), n(G1, 1), n(F1, 2), n(E1, 2),
    n(GS1, 2), n(E1, 2), n(GS1, 2), n(E1, 2), n(B1, 4), n(C2, 2), n(B1, 2),
    n(A1, 4), n(E1, 12),
    n(C2, 8), n(A1, 8), n(B1, 8), n(GS1, 8), n(A1, 8), n(E1, 8), n(E1, 8), n(GS1, 8),
    n(C2, 8), n(A1, 8), n(B1, 8), n(GS1, 8), n(A1, 4), n(C2, 4), n(E2, 8), n(E2, 16),
];

// Three-four time, one unit per eighth note.
#[rustfmt::skip]
const MENUET: &[Note] = &[
    n(B2, 2), n(FS2, 2), n(D2, 2),
    n(B1, 2), n(D2, 2), n(FS2, 2),
    n(G2, 2), n(FS2, 2), n(E2, 2),
    n(FS2, 6),
    n(E2, 2), n(G2, 2), n(B2, 2),
    n(A2, 2), n(G2, 2), n(FS2, 2),
    n(E2, 2), n(CS2, 2), n(AS1, 2),
    n(B1, 6),
];

#[rustfmt::skip]
const RUSSIAN_SONG: &[Note] = &[
    n(A1, 2), n(C2, 2), n(E2, 2), n(E2, 2),
    n(D2, 2), n(C2, 2), n(B1, 4),
    n(C2, 2), n(D2, 2), n(E2, 2), n(A2, 2),
    n(G2, 2), n(E2, 2), n(E2, 4),
    n(F2, 2), n(E2, 2), n(D2, 2), n(C2, 2),
    n(B1, 2), n(C2, 2), n(D2, 4),
    n(C2, 2), n(B1, 2), n(A1, 2), n(B1, 2),
    n(A1, 6), rest(2),
];

const LINE_CLEAR: &[Note] = &[n(E2, 1), n(G2, 1), n(C3, 3)];

const GAME_OVER: &[Note] = &[
    n(G2, 3),
    n(E2, 3),
    n(C2, 3),
    rest(1),
    n(D2, 2),
    n(B1, 2),
    n(C2, 8),
];

struct Score {
    voices: &'static [&'static [Note]],
    unit_samples: u32,
}

fn score(cue: Cue) -> Score {
    let (voices, unit_samples): (&'static [&'static [Note]], _) = match cue {
        Cue::Music(Track::Korobeiniki) => (&[KOROBEINIKI_LEAD, KOROBEINIKI_COUNTER], MUSIC_UNIT),
        Cue::Music(Track::Menuet) => (&[MENUET], MUSIC_UNIT),
        Cue::Music(Track::RussianSong) => (&[RUSSIAN_SONG], MUSIC_UNIT),
        Cue::LineClear => (&[LINE_CLEAR], CUE_UNIT),
        Cue::GameOver => (&[GAME_OVER], MUSIC_UNIT),
    };
    Score {
        voices,
        unit_samples,
    }
}

fn frequency(pitch: u8) -> f32 {
    C1_HZ * 2f32.powf(f32::from(pitch) / 12.0)
}

/// Gain at `elapsed` samples into a note `length` samples long.
#[expect(clippy::cast_precision_loss)]
fn envelope(elapsed: u32, length: u32) -> f32 {
    let edge = elapsed.min(length.saturating_sub(elapsed)).min(RAMP_SAMPLES);
    edge as f32 / RAMP_SAMPLES as f32
}

#[derive(Debug, Clone)]
struct Voice {
    notes: &'static [Note],
    index: usize,
    elapsed: u32,
    phase: f32,
}

impl Voice {
    fn new(notes: &'static [Note]) -> Self {
        Self {
            notes,
            index: 0,
            elapsed: 0,
            phase: 0.0,
        }
    }

    fn is_done(&self) -> bool {
        self.index >= self.notes.len()
    }

    fn restart(&mut self) {
        self.index = 0;
        self.elapsed = 0;
    }

    fn next_sample(&mut self, unit_samples: u32) -> f32 {
        let Some(note) = self.notes.get(self.index) else {
            return 0.0;
        };
        let length = u32::from(note.units) * unit_samples;
        let mut sample = 0.0;
        if let Some(pitch) = note.pitch {
            sample = self.phase.sin() * envelope(self.elapsed, length);
            self.phase = (self.phase + TAU * frequency(pitch) / SAMPLE_RATE_HZ) % TAU;
        }
        self.elapsed += 1;
        if self.elapsed >= length {
            self.index += 1;
            self.elapsed = 0;
        }
        sample
    }
}

/// A playing tune: a mono stream of `f32` samples at [`SAMPLE_RATE`].
///
/// Music repeats forever; cues end after one pass.
#[derive(Debug, Clone)]
pub(crate) struct Tune {
    cue: Cue,
    unit_samples: u32,
    voices: Vec<Voice>,
}

impl Tune {
    pub(crate) fn new(cue: Cue) -> Self {
        let score = score(cue);
        Self {
            cue,
            unit_samples: score.unit_samples,
            voices: score.voices.iter().copied().map(Voice::new).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn cue(&self) -> Cue {
        self.cue
    }

    pub(crate) fn is_looping(&self) -> bool {
        self.cue.is_music()
    }

    /// Number of samples in one pass.
    pub(crate) fn pass_samples(&self) -> u64 {
        self.voices
            .iter()
            .map(|voice| voice.notes.iter().map(|note| u64::from(note.units)).sum::<u64>())
            .max()
            .unwrap_or(0)
            * u64::from(self.unit_samples)
    }
}

impl Cue {
    fn is_music(self) -> bool {
        matches!(self, Cue::Music(_))
    }
}

impl Iterator for Tune {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.voices.iter().all(Voice::is_done) {
            if !self.is_looping() {
                return None;
            }
            self.voices.iter_mut().for_each(Voice::restart);
        }
        let unit_samples = self.unit_samples;
        let mix: f32 = self
            .voices
            .iter_mut()
            .map(|voice| voice.next_sample(unit_samples))
            .sum();
        Some(mix * VOICE_GAIN)
    }
}

impl rodio::Source for Tune {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        let micros = self.pass_samples() * 1_000_000 / u64::from(SAMPLE_RATE);
        (!self.is_looping()).then(|| Duration::from_micros(micros))
    }
}

#[cfg(test)]
mod tests {
    use rodio::Source as _;

    use super::*;

    fn units(notes: &[Note]) -> u32 {
        notes.iter().map(|note| u32::from(note.units)).sum()
    }

    #[test]
    fn test_korobeiniki_voices_line_up() {
        assert_eq!(units(KOROBEINIKI_LEAD), 256);
        assert_eq!(units(KOROBEINIKI_COUNTER), 256);
    }

    #[test]
    fn test_music_loops() {
        for track in Track::ALL {
            let tune = Tune::new(Cue::Music(track));
            assert!(tune.is_looping());
            assert_eq!(tune.total_duration(), None);

            let pass = usize::try_from(tune.pass_samples()).unwrap();
            assert_eq!(tune.take(pass + 100).count(), pass + 100, "{track:?}");
        }
    }

    #[test]
    fn test_cues_end_after_one_pass() {
        let clear = Tune::new(Cue::LineClear);
        assert_eq!(clear.pass_samples(), u64::from(5 * CUE_UNIT));
        assert_eq!(clear.total_duration(), Some(Duration::from_millis(250)));
        assert_eq!(clear.count(), 5 * CUE_UNIT as usize);

        let game_over = Tune::new(Cue::GameOver);
        assert!(!game_over.is_looping());
        assert_eq!(game_over.count(), 22 * MUSIC_UNIT as usize);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let samples: Vec<f32> = Tune::new(Cue::Music(Track::Korobeiniki))
            .take(SAMPLE_RATE as usize)
            .collect();
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(samples.iter().any(|s| s.abs() > 0.5));
    }

    #[test]
    fn test_notes_fade_at_edges() {
        let length = 10 * RAMP_SAMPLES;
        assert!(envelope(0, length).abs() < f32::EPSILON);
        assert!((envelope(RAMP_SAMPLES, length) - 1.0).abs() < f32::EPSILON);
        assert!((envelope(length / 2, length) - 1.0).abs() < f32::EPSILON);
        assert!(envelope(length - 1, length) < 0.01);
    }

    #[test]
    fn test_pitch_table_spans_octaves() {
        assert!((frequency(C2) - 2.0 * C1_HZ).abs() < 0.01);
        assert!((frequency(C3) - 4.0 * C1_HZ).abs() < 0.05);
    }
}
