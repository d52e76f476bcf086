//! Kind-specific foe profiles.
//!
//! Consolidates per-kind base stats and the default steering behavior.

use riftstorm_core::components::{Behavior, DashState};
use riftstorm_core::enums::FoeKind;
use riftstorm_core::types::Rgb;

/// Base stats for a foe kind before wave scaling and elite multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoeProfile {
    pub hp: f32,
    pub speed: f32,
    pub size: f32,
    pub color: Rgb,
    pub xp: f32,
    pub score: u64,
    /// Extra hp per wave.
    pub hp_scale: f32,
    /// Extra speed per wave.
    pub speed_scale: f32,
    /// Outline polygon side count (0 = circle).
    pub sides: u32,
    pub mass: f32,
    pub behavior: Behavior,
}

impl FoeProfile {
    /// Hit points at the given wave.
    pub fn hp_at(&self, wave: u32) -> f32 {
        self.hp + wave as f32 * self.hp_scale
    }

    /// Speed at the given wave.
    pub fn speed_at(&self, wave: u32) -> f32 {
        self.speed + wave as f32 * self.speed_scale
    }
}

/// Get the profile for a given kind.
pub fn get_profile(kind: FoeKind) -> FoeProfile {
    match kind {
        FoeKind::Chaser => FoeProfile {
            hp: 15.0,
            speed: 1.8,
            size: 14.0,
            color: 0xff0055,
            xp: 10.0,
            score: 100,
            hp_scale: 3.0,
            speed_scale: 0.02,
            sides: 3,
            mass: 1.2,
            behavior: Behavior::Flock,
        },
        FoeKind::Shooter => FoeProfile {
            hp: 12.0,
            speed: 1.2,
            size: 20.0,
            color: 0xbe00ff,
            xp: 15.0,
            score: 150,
            hp_scale: 2.5,
            speed_scale: 0.02,
            sides: 4,
            mass: 1.5,
            behavior: Behavior::KeepDistance,
        },
        FoeKind::Tank => FoeProfile {
            hp: 80.0,
            speed: 0.6,
            size: 32.0,
            color: 0x00ff9d,
            xp: 40.0,
            score: 200,
            hp_scale: 10.0,
            speed_scale: 0.01,
            sides: 6,
            mass: 25.0,
            behavior: Behavior::Seek,
        },
        FoeKind::Kamikaze => FoeProfile {
            hp: 8.0,
            speed: 3.0,
            size: 10.0,
            color: 0xff5500,
            xp: 12.0,
            score: 120,
            hp_scale: 2.0,
            speed_scale: 0.04,
            sides: 3,
            mass: 0.8,
            behavior: Behavior::Seek,
        },
        FoeKind::Dasher => FoeProfile {
            hp: 25.0,
            speed: 4.5,
            size: 16.0,
            color: 0xffff00,
            xp: 25.0,
            score: 250,
            hp_scale: 4.0,
            speed_scale: 0.05,
            sides: 4,
            mass: 1.5,
            behavior: Behavior::DashAttack(DashState::Idle),
        },
        FoeKind::Splitter => FoeProfile {
            hp: 40.0,
            speed: 1.0,
            size: 24.0,
            color: 0x0088ff,
            xp: 30.0,
            score: 300,
            hp_scale: 5.0,
            speed_scale: 0.02,
            sides: 5,
            mass: 3.0,
            behavior: Behavior::Seek,
        },
        FoeKind::Orbiter => FoeProfile {
            hp: 20.0,
            speed: 2.5,
            size: 12.0,
            color: 0xff00ff,
            xp: 20.0,
            score: 200,
            hp_scale: 3.0,
            speed_scale: 0.03,
            sides: 0,
            mass: 1.0,
            behavior: Behavior::Orbit,
        },
        FoeKind::Guardian => FoeProfile {
            hp: 150.0,
            speed: 0.5,
            size: 28.0,
            color: 0x0077ff,
            xp: 100.0,
            score: 500,
            hp_scale: 12.0,
            speed_scale: 0.01,
            sides: 4,
            mass: 30.0,
            behavior: Behavior::Seek,
        },
        FoeKind::SnakeHead => FoeProfile {
            hp: 100.0,
            speed: 2.2,
            size: 20.0,
            color: 0xffff00,
            xp: 60.0,
            score: 400,
            hp_scale: 20.0,
            speed_scale: 0.0,
            sides: 4,
            mass: 5.0,
            behavior: Behavior::Seek,
        },
        // Bodies get their Segment link at spawn.
        FoeKind::SnakeBody => FoeProfile {
            hp: 50.0,
            speed: 0.0,
            size: 16.0,
            color: 0xaaaa00,
            xp: 15.0,
            score: 50,
            hp_scale: 8.0,
            speed_scale: 0.0,
            sides: 0,
            mass: 5.0,
            behavior: Behavior::Seek,
        },
        // Overridden by the boss blueprint at spawn.
        FoeKind::Titan => FoeProfile {
            hp: 2000.0,
            speed: 1.5,
            size: 80.0,
            color: 0xff0000,
            xp: 2000.0,
            score: 5000,
            hp_scale: 0.0,
            speed_scale: 0.0,
            sides: 0,
            mass: 5000.0,
            behavior: Behavior::Dreadnought,
        },
    }
}
