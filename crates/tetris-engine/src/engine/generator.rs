use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::PieceKind;

/// Draws piece types independently and uniformly at random.
///
/// Every draw is a fresh uniform pick among the seven types; there is no bag
/// or history.
///
/// # Example
///
/// ```
/// use tetris_engine::PieceGenerator;
///
/// let mut a = PieceGenerator::with_seed(7);
/// let mut b = PieceGenerator::with_seed(7);
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_os_rng(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}
