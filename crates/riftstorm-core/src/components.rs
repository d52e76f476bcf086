//! Plain-data entity components.
//!
//! Components carry state only. Game logic lives in the simulation systems.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::{Handle, Rgb, Vec2};

pub type FoeId = Handle<Foe>;
pub type ProjectileId = Handle<Projectile>;
pub type ParticleId = Handle<Particle>;
pub type GemId = Handle<Gem>;
pub type PickupId = Handle<Pickup>;
pub type DebrisId = Handle<Debris>;

/// Shared spatial state of every simulated object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Gates updates, queries and rendering.
    pub active: bool,
}

/// Elemental payload counts, shared by player stats and projectiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementalStacks {
    pub fire: u32,
    pub ice: u32,
    pub volt: u32,
}

/// Timed condition on a foe. Durations are seconds, the timer counts ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub duration: f32,
    pub power: f32,
    pub timer: f32,
}

impl StatusEffect {
    /// Ticks between effect ticks for this kind.
    pub fn period(&self) -> f32 {
        match self.kind {
            StatusKind::Burn => BURN_TICK_PERIOD,
            StatusKind::Freeze => FREEZE_TICK_PERIOD,
        }
    }
}

/// Dash-attack sub-state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum DashState {
    #[default]
    Idle,
    /// Locked charge toward where the player was; `remaining` ticks left.
    Charging { remaining: f32 },
}

/// Movement behavior. Exactly one is evaluated per foe per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    #[default]
    Seek,
    KeepDistance,
    Orbit,
    DashAttack(DashState),
    Flock,
    /// Trails `parent`; dies when the parent is gone.
    Segment { parent: FoeId, index: u32 },
    /// Scripted boss drift and turret fire.
    Dreadnought,
}

/// Squad membership by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadTag {
    pub id: u32,
    pub role: SquadRole,
}

/// One piece of a procedural boss skeleton. Offsets are in the boss's local
/// frame and rotate with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BossModule {
    pub kind: ModuleKind,
    pub offset: Vec2,
    pub rotation: f32,
    pub size: f32,
    pub color: Rgb,
    pub health: f32,
    pub max_health: f32,
    /// Outline polygon in local coordinates.
    pub shape: Vec<Vec2>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Foe {
    pub body: Body,
    pub kind: FoeKind,
    pub behavior: Behavior,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub size: f32,
    pub mass: f32,
    pub xp: f32,
    pub score: u64,
    pub color: Rgb,
    pub sides: u32,
    pub elite: bool,
    pub dead: bool,
    pub hit_flash: f32,
    pub rotation: f32,
    pub shoot_timer: f32,
    pub statuses: Vec<StatusEffect>,
    pub squad: Option<SquadTag>,
    pub modules: Vec<BossModule>,
}

impl Foe {
    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    pub fn is_frozen(&self) -> bool {
        self.statuses.iter().any(|s| s.kind == StatusKind::Freeze)
    }

    /// Alive and participating in the simulation.
    pub fn is_live(&self) -> bool {
        self.body.active && !self.dead
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub faction: Faction,
    pub damage: f32,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub pierce: u32,
    pub bounce: u32,
    pub split: u32,
    pub explosive: u32,
    /// 0 for fired shots, 1 for split children.
    pub generation: u32,
    pub homing: f32,
    pub elemental: ElementalStacks,
    pub knockback: f32,
    pub color: Rgb,
    pub beam: bool,
    /// Beam polyline, oldest point first.
    pub trail: Vec<Vec2>,
    /// Foes struck most recently, newest last.
    pub struck: Vec<FoeId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Gem {
    pub body: Body,
    pub value: f32,
    pub life: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
    pub life: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub body: Body,
    pub kind: DebrisKind,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub friction: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub kind: ParticleKind,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub friction: f32,
    pub color: Rgb,
    /// End point for lightning arcs.
    pub target: Vec2,
}

/// Cooldown-gated active ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub cooldown: f32,
    pub max_cooldown: f32,
    pub active: bool,
    pub duration: f32,
    pub max_duration: f32,
}

impl Skill {
    pub fn new(max_cooldown: f32, max_duration: f32) -> Self {
        Self {
            max_cooldown,
            max_duration,
            ..Default::default()
        }
    }

    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0 && !self.active
    }
}

/// Mutable player modifiers, grown by upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub fire_rate_mod: f32,
    pub speed_mod: f32,
    pub damage_mod: f32,
    pub multishot: u32,
    pub pierce: u32,
    pub bounce: u32,
    pub split: u32,
    pub explosive: u32,
    pub homing: f32,
    pub elemental: ElementalStacks,
    pub magnet_range: f32,
    pub orbitals: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            fire_rate_mod: 1.0,
            speed_mod: 1.0,
            damage_mod: 1.0,
            multishot: 0,
            pierce: 0,
            bounce: 0,
            split: 0,
            explosive: 0,
            homing: 0.0,
            elemental: ElementalStacks::default(),
            magnet_range: PLAYER_BASE_MAGNET_RANGE,
            orbitals: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub hull: HullType,
    pub weapon: WeaponId,
    pub hp: f32,
    pub max_hp: f32,
    pub xp: f32,
    pub level: u32,
    pub xp_to_next: f32,
    /// Facing in radians.
    pub angle: f32,
    /// Shot cooldown in ticks.
    pub shot_cooldown: f32,
    pub dash_cooldown: f32,
    pub max_dash_cooldown: f32,
    pub invuln: f32,
    pub hit_flash: f32,
    pub muzzle_flash: f32,
    pub recoil: Vec2,
    pub skill_q: Skill,
    pub skill_e: Skill,
    pub stats: PlayerStats,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body {
                active: true,
                ..Default::default()
            },
            hull: HullType::default(),
            weapon: WeaponId::default(),
            hp: 0.0,
            max_hp: 0.0,
            xp: 0.0,
            level: 1,
            xp_to_next: XP_BASE,
            angle: 0.0,
            shot_cooldown: 0.0,
            dash_cooldown: 0.0,
            max_dash_cooldown: DASH_COOLDOWN,
            invuln: 0.0,
            hit_flash: 0.0,
            muzzle_flash: 0.0,
            recoil: Vec2::ZERO,
            skill_q: Skill::new(SKILL_Q_COOLDOWN, SKILL_Q_DURATION),
            skill_e: Skill::new(SKILL_E_COOLDOWN, SKILL_E_DURATION),
            stats: PlayerStats::default(),
        }
    }
}

/// Guardian orb circling the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orbital {
    pub angle: f32,
    pub hit_cooldown: f32,
}

/// Gravity well left by Reality Fracture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vortex {
    pub pos: Vec2,
    /// Seconds remaining.
    pub life: f32,
    pub pull_range: f32,
}

/// Circular boss arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub active: bool,
    pub center: Vec2,
    pub radius: f32,
}

impl Arena {
    pub fn contains(&self, pos: Vec2) -> bool {
        !self.active || pos.distance(self.center) <= self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarpState {
    pub active: bool,
    pub stage: WarpStage,
    /// Ticks left in the current stage.
    pub timer: f32,
    /// Starfield streak multiplier.
    pub speed_factor: f32,
}

impl Default for WarpState {
    fn default() -> Self {
        Self {
            active: false,
            stage: WarpStage::Charge,
            timer: 0.0,
            speed_factor: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub zoom: f32,
    /// Impulse offset from recoil and hits, decays every tick.
    pub kick: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            zoom: 1.0,
            kick: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Parallax factor in `[0.1, 1.0)`.
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub seed: f32,
}
