//! Simulation engine for RIFTSTORM.
//!
//! Owns the pooled entity aggregate, runs the systems once per tick and
//! produces HUD views for the host.

pub mod delayed;
pub mod engine;
pub mod pool;
pub mod spatial;
pub mod systems;
pub mod upgrades;
pub mod world_setup;

pub use engine::{next_quota, tick, GameState};
pub use riftstorm_core as core;

#[cfg(test)]
mod tests;
