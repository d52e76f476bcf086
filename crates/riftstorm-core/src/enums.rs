//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Player ship chassis, chosen at run start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HullType {
    /// Agile striker. Balanced speed and firepower.
    #[default]
    Interceptor,
    /// Armored, slow, starts with the scattergun.
    Bastion,
    /// Starts with the arc caster and two guardian orbs.
    Architect,
}

/// Primary weapon. Everything except `Pulse` is an evolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponId {
    #[default]
    Pulse,
    Shotgun,
    Railgun,
    Void,
}

/// Foe archetype. Selects the stat profile and default behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoeKind {
    #[default]
    Chaser,
    Shooter,
    Tank,
    Kamikaze,
    Dasher,
    Splitter,
    Orbiter,
    Guardian,
    SnakeHead,
    SnakeBody,
    /// Procedurally assembled boss.
    Titan,
}

impl FoeKind {
    pub fn is_boss(self) -> bool {
        self == FoeKind::Titan
    }
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Player,
    Hostile,
}

/// Timed condition on a foe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    #[default]
    Burn,
    Freeze,
}

/// Structural role of a boss module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    #[default]
    Core,
    Wing,
    Turret,
    Shield,
    Spike,
    Engine,
}

/// Post-boss transition between sectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarpStage {
    #[default]
    Charge,
    Jump,
    Arrival,
}

/// Wave director state, derived from the boss and warp flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorPhase {
    #[default]
    Spawning,
    BossActive,
    Warping,
}

/// Spawn composition for a sector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveType {
    #[default]
    Swarm,
    Mixed,
    Heavy,
    EliteSquad,
    Chaos,
}

impl WaveType {
    /// Wave type for a 1-based wave number. Rotates through every type.
    pub fn for_wave(wave: u32) -> Self {
        match wave.saturating_sub(1) % 5 {
            0 => WaveType::Swarm,
            1 => WaveType::Mixed,
            2 => WaveType::Heavy,
            3 => WaveType::EliteSquad,
            _ => WaveType::Chaos,
        }
    }

    /// Foe kinds eligible for lone spawns during this wave type.
    pub fn lone_spawn_kinds(self) -> &'static [FoeKind] {
        match self {
            WaveType::Swarm => &[FoeKind::Chaser],
            WaveType::Mixed => &[FoeKind::Chaser, FoeKind::Shooter],
            WaveType::Heavy => &[
                FoeKind::Tank,
                FoeKind::Shooter,
                FoeKind::Dasher,
                FoeKind::Guardian,
            ],
            WaveType::EliteSquad => &[FoeKind::Dasher, FoeKind::Orbiter, FoeKind::Guardian],
            WaveType::Chaos => &[
                FoeKind::Kamikaze,
                FoeKind::Splitter,
                FoeKind::Orbiter,
                FoeKind::SnakeHead,
            ],
        }
    }
}

/// Squad spawn layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formation {
    #[default]
    V,
    Line,
    Circle,
}

/// Position of a foe within its squad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadRole {
    /// The elite leader.
    #[default]
    Protector,
    Flanker,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    #[default]
    Heal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebrisKind {
    #[default]
    Scrap,
    Asteroid,
}

/// Visual flavor of a particle. Presentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    #[default]
    Ember,
    Spark,
    Shard,
    Lightning,
}

/// Sound cues requested from the host audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    Shoot,
    ShootShotgun,
    ShootRailgun,
    ShootVoid,
    Hit,
    Explosion,
    Spark,
    Dash,
    Spawn,
    LevelUp,
    Evolve,
    GameOver,
    Chrono,
    Fracture,
    WarpCharge,
    WarpJump,
}

/// Upgrade identifiers offered on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeId {
    Multishot,
    FireRate,
    Speed,
    DashCooldown,
    Magnet,
    MaxHp,
    Damage,
    Pierce,
    Homing,
    Orbital,
    Bounce,
    Split,
    Explosive,
    ElemFire,
    ElemIce,
    ElemVolt,
    EvoShotgun,
    EvoRailgun,
    EvoVoid,
}

/// Whether an upgrade tunes a stat or swaps the weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    #[default]
    Stat,
    Weapon,
}
