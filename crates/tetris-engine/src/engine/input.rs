/// Alternate background tracks selectable during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Track {
    #[display("Korobeiniki")]
    Korobeiniki,
    #[display("Menuet (BWV 814)")]
    Menuet,
    #[display("Russian Song")]
    RussianSong,
}

impl Track {
    pub const ALL: [Self; 3] = [Self::Korobeiniki, Self::Menuet, Self::RussianSong];
}

/// Keys held down at the moment a tick starts.
///
/// `quit` stands for a discrete quit request rather than a held key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(clippy::struct_excessive_bools)]
pub struct InputSnapshot {
    pub quit: bool,
    pub rotate: bool,
    pub soft_drop: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub hard_drop: bool,
    pub pause: bool,
    /// First of the held track keys, if any.
    pub track: Option<Track>,
}

impl InputSnapshot {
    /// A snapshot with nothing held.
    pub const IDLE: Self = Self {
        quit: false,
        rotate: false,
        soft_drop: false,
        move_left: false,
        move_right: false,
        hard_drop: false,
        pause: false,
        track: None,
    };

    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}
