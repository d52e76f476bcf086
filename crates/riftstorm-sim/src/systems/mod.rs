//! Systems run against the simulation aggregate each tick.
//!
//! Systems are free functions over `&mut GameState` (or `&GameState` for
//! read-only ones). They hold no state of their own; everything lives in the
//! aggregate. Host notifications go through `&mut dyn SimCallbacks`.

pub mod audio;
pub mod autopilot;
pub mod camera;
pub mod cleanup;
pub mod combat;
pub mod director;
pub mod foes;
pub mod player;
pub mod progression;
pub mod snapshot;
