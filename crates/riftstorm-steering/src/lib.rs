//! Foe AI for RIFTSTORM.
//!
//! Implements the per-kind steering behaviors, crowd separation, boss drift
//! and segment following, plus kind-driven stat profiles.

pub mod profiles;
pub mod steer;

pub use riftstorm_core as core;
