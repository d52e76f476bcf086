//! Fundamental geometric and simulation types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::constants::TICKS_PER_SECOND;

pub use glam::Vec2;

/// Packed `0xRRGGBB` color. Carried for presentation, never read by gameplay.
pub type Rgb = u32;

/// Generational handle to a pooled object of type `T`.
///
/// A handle stays valid only while the slot it names keeps the same
/// generation. Releasing the slot bumps the generation, so stale handles held
/// by delayed events or parent links stop resolving instead of aliasing a
/// recycled object.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Handle<T> {
    pub index: u32,
    pub generation: u32,
    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}g{}", self.index, self.generation)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}g{}", self.index, self.generation)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frames simulated since the aggregate was built (hit-stop frames excluded).
    pub frame: u64,
    /// Ticks elapsed in the current run.
    pub run_ticks: u64,
}

impl SimTime {
    /// Advance one simulated frame.
    pub fn advance(&mut self) {
        self.frame += 1;
        self.run_ticks += 1;
    }

    /// Seconds of play in the current run.
    pub fn run_secs(&self) -> f64 {
        self.run_ticks as f64 / TICKS_PER_SECOND as f64
    }
}

/// Unit vector at `angle` radians.
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Heading of `v` in radians.
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(a: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = a.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}
