pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece collides with occupied cells at its spawn position")]
pub struct PieceCollisionError;
