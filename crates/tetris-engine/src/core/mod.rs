//! Board, piece and geometry primitives.
//!
//! Everything in this module is plain data plus lookups; the rules that move
//! pieces around live in [`crate::engine`].

pub use self::{board::*, geometry::*, piece::*};

pub(crate) mod board;
pub(crate) mod geometry;
pub(crate) mod piece;
