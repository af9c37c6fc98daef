//! Game rules driven by a fixed-rate tick.
//!
//! This module builds the playable game on top of the core data structures:
//!
//! - [`movement`] - Collision tests and committed moves of the active piece
//! - [`ActionTimers`] - Per-action repeat delays measured in ticks
//! - [`Scoring`] - Completed lines, level and descent speed
//! - [`PieceGenerator`] - Uniform random piece types
//! - [`GameSession`] - The per-tick state machine tying everything together
//!
//! # Game Flow
//!
//! Every tick the caller hands [`GameSession::tick`] the keys currently held:
//!
//! 1. A quit request ends the session
//! 2. The automatic descent lowers the piece, or locks it when it cannot move
//! 3. Locking clears full rows and spawns the next piece; an overlapping spawn
//!    ends the game
//! 4. The pause key toggles pause, which freezes everything else
//! 5. Held keys move, rotate or drop the piece, each on its own repeat delay
//!
//! The returned [`TickReport`] lists the [`GameEvent`]s the tick raised and
//! whether the frame needs redrawing.

pub use self::{
    config::*, events::*, generator::*, input::*, scoring::*, session::*, timing::*,
};

mod config;
mod events;
mod generator;
mod input;
pub mod movement;
mod scoring;
mod session;
mod timing;
