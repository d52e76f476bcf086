//! Simulation constants and tuning parameters.
//!
//! All durations are in ticks unless the name says otherwise. Velocities are
//! world units per tick at a time scale of 1.0.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Ticks per second as a float, used for status durations expressed in seconds.
pub const TICKS_PER_SECOND: f32 = TICK_RATE as f32;

/// Upper bound applied to the host-supplied time scale every tick.
pub const MAX_TIME_SCALE: f32 = 2.0;

// --- World ---

pub const WORLD_WIDTH: f32 = 4000.0;
pub const WORLD_HEIGHT: f32 = 4000.0;

/// Spatial index cell edge length.
pub const SPATIAL_CELL_SIZE: f32 = 150.0;

/// Foes and debris this far outside the world are released regardless of state.
pub const DEATH_MARGIN: f32 = 3000.0;

/// Foes past this margin get nudged back toward the world.
pub const SOFT_BOUNDS_MARGIN: f32 = 50.0;
pub const SOFT_BOUNDS_PUSH: f32 = 2.0;

// --- Pools (initial, max) ---

pub const POOL_PROJECTILES: (usize, usize) = (200, 600);
pub const POOL_PARTICLES: (usize, usize) = (500, 1200);
pub const POOL_FOES: (usize, usize) = (50, 600);
pub const POOL_GEMS: (usize, usize) = (100, 300);
pub const POOL_PICKUPS: (usize, usize) = (10, 30);
pub const POOL_DEBRIS: (usize, usize) = (30, 150);

// --- Player ---

pub const PLAYER_THRUST: f32 = 0.8;
pub const PLAYER_FRICTION: f32 = 0.88;
pub const PLAYER_RECOIL_DECAY: f32 = 0.8;
pub const PLAYER_COLLISION_RADIUS: f32 = 12.0;
pub const PLAYER_INVULN_ON_HIT: f32 = 60.0;
pub const PLAYER_MUZZLE_DISTANCE: f32 = 20.0;
/// Fraction of the player's velocity inherited by fired projectiles.
pub const PLAYER_VELOCITY_INHERIT: f32 = 0.2;
pub const PLAYER_BASE_DAMAGE: f32 = 10.0;
pub const PLAYER_BASE_MAGNET_RANGE: f32 = 160.0;

pub const DASH_COOLDOWN: f32 = 120.0;
pub const DASH_SPEED: f32 = 35.0;
pub const DASH_INVULN: f32 = 30.0;
pub const DASH_MIN_COOLDOWN: f32 = 20.0;
pub const DASH_COOLDOWN_STEP: f32 = 15.0;

pub const SKILL_Q_NAME: &str = "Chrono Stasis";
pub const SKILL_Q_COOLDOWN: f32 = 900.0;
pub const SKILL_Q_DURATION: f32 = 180.0;
/// World time multiplier while Chrono Stasis is active.
pub const CHRONO_TIME_FACTOR: f32 = 0.35;

pub const SKILL_E_NAME: &str = "Reality Fracture";
pub const SKILL_E_COOLDOWN: f32 = 600.0;
pub const SKILL_E_DURATION: f32 = 15.0;

// --- Vortex (Reality Fracture) ---

pub const VORTEX_LIFETIME_SECS: f32 = 4.0;
pub const VORTEX_PULL_RANGE: f32 = 300.0;
pub const VORTEX_PULL_FORCE: f32 = 0.5;
pub const VORTEX_CAST_DISTANCE: f32 = 150.0;

// --- Ultimate ---

pub const OVERDRIVE_MAX: f32 = 100.0;
pub const ULTIMATE_RANGE: f32 = 1000.0;
pub const ULTIMATE_DAMAGE: f32 = 500.0;

// --- Orbitals ---

pub const ORBITAL_DISTANCE: f32 = 70.0;
pub const ORBITAL_ANGULAR_SPEED: f32 = 0.05;
pub const ORBITAL_RADIUS: f32 = 8.0;
pub const ORBITAL_DAMAGE: f32 = 8.0;
/// Ticks before the same orb can strike again.
pub const ORBITAL_HIT_COOLDOWN: f32 = 10.0;
pub const ARCHITECT_STARTING_ORBITALS: u32 = 2;

// --- Contact damage ---

pub const CONTACT_QUERY_RADIUS: f32 = 80.0;
/// Contact radius used for bosses that carry a module skeleton.
pub const BOSS_CONTACT_RADIUS: f32 = 60.0;
pub const CONTACT_DAMAGE: f32 = 20.0;
pub const CONTACT_DAMAGE_TANK: f32 = 40.0;
pub const CONTACT_DAMAGE_BOSS: f32 = 50.0;
pub const CONTACT_ELITE_MULT: f32 = 1.5;
/// Added to the foe radius for the player contact test.
pub const CONTACT_PADDING: f32 = 15.0;

// --- Steering ---

pub const STEERING_FACTOR: f32 = 0.08;
pub const MAX_SPEED_MULT: f32 = 2.0;
pub const CHARGE_MAX_SPEED: f32 = 20.0;
pub const SEPARATION_RADIUS_MULT: f32 = 3.5;
pub const SEPARATION_WEIGHT: f32 = 2.5;
pub const KEEP_DISTANCE_RADIUS: f32 = 300.0;
pub const ORBIT_RADIUS: f32 = 250.0;
pub const ORBIT_CORRECTION: f32 = 0.02;
pub const DASH_TRIGGER_RANGE: f32 = 200.0;
pub const DASH_TRIGGER_CHANCE: f32 = 0.02;
pub const DASH_CHARGE_SPEED: f32 = 15.0;
pub const DASH_CHARGE_ACCEL: f32 = 1.05;
/// Ticks a charge lasts before the dasher reverts to seeking.
pub const DASH_CHARGE_TICKS: f32 = 30.0;
pub const FLOCK_NEIGHBOR_RADIUS: f32 = 120.0;
pub const FLOCK_ALIGNMENT_WEIGHT: f32 = 0.3;
pub const FLOCK_COHESION_WEIGHT: f32 = 0.15;
/// Minimum velocity magnitude before a foe's facing follows its heading.
pub const ROTATION_MIN_SPEED: f32 = 0.1;

// --- Shooters ---

pub const SHOOTER_INTERVAL: f32 = 120.0;
pub const HOSTILE_SHOT_SPEED: f32 = 5.0;
pub const HOSTILE_SHOT_LIFE: f32 = 100.0;
pub const HOSTILE_SHOT_SIZE: f32 = 6.0;
pub const SHOOTER_SHOT_DAMAGE: f32 = 10.0;

// --- Snake ---

pub const SNAKE_SEGMENTS: u32 = 5;
pub const SNAKE_FOLLOW_RATE: f32 = 0.2;
pub const SNAKE_SPACING_SLACK: f32 = 5.0;

// --- Boss ---

pub const BOSS_SPAWN_DISTANCE: f32 = 700.0;
pub const BOSS_SIZE: f32 = 80.0;
pub const BOSS_BASE_HP: f32 = 2000.0;
pub const BOSS_XP: f32 = 2000.0;
pub const BOSS_SCORE: u64 = 5000;
pub const BOSS_DRIFT_ACCEL: f32 = 0.05;
pub const BOSS_DAMPING: f32 = 0.98;
pub const BOSS_SPIN: f32 = 0.005;
pub const BOSS_PUSH_RADIUS: f32 = 300.0;
pub const BOSS_PUSH_FORCE: f32 = 2.0;
pub const BOSS_TURRET_PERIOD: u64 = 30;
pub const BOSS_TURRET_CHANCE: f32 = 0.3;
pub const BOSS_TURRET_DAMAGE_PER_WAVE: f32 = 10.0;
pub const ARENA_RADIUS: f32 = 1200.0;
/// Player is held this far inside the arena edge.
pub const ARENA_EDGE_INSET: f32 = 30.0;
pub const ARENA_PUSHBACK: f32 = 2.0;

// --- Warp ---

pub const WARP_CHARGE_TICKS: f32 = 120.0;
pub const WARP_JUMP_TICKS: f32 = 180.0;
pub const WARP_ARRIVAL_TICKS: f32 = 60.0;
pub const WARP_JUMP_SPEED_FACTOR: f32 = 20.0;
pub const WARP_JUMP_INVULN: f32 = 10.0;

// --- Spawning ---

pub const SPAWN_BASE_INTERVAL: f32 = 60.0;
pub const SPAWN_MIN_INTERVAL: f32 = 15.0;
pub const SPAWN_INTERVAL_DECAY: f32 = 0.95;
pub const MAX_FOES: usize = 250;
pub const SQUAD_CHANCE: f32 = 0.2;
pub const SQUAD_MIN_WINGMEN: u32 = 3;
pub const SQUAD_MAX_WINGMEN: u32 = 5;
pub const SQUAD_SPACING: f32 = 40.0;
pub const SQUAD_SPAWN_DISTANCE: f32 = 900.0;
pub const SQUAD_LEADER_SIZE_MULT: f32 = 1.5;
pub const SQUAD_LEADER_HP_MULT: f32 = 2.0;
pub const LONE_SPAWN_DISTANCE: f32 = 800.0;
pub const SPAWN_EDGE_INSET: f32 = 100.0;
pub const INITIAL_WAVE_QUOTA: u32 = 10;
pub const QUOTA_MULTIPLIER: f64 = 1.3;

// --- Elite ---

pub const ELITE_CHANCE_PER_WAVE: f32 = 0.03;
pub const ELITE_MAX_CHANCE: f32 = 0.4;
pub const ELITE_HP_MULT: f32 = 3.0;
pub const ELITE_SPEED_MULT: f32 = 1.3;
pub const ELITE_SIZE_MULT: f32 = 1.4;
pub const ELITE_XP_MULT: f32 = 5.0;
pub const ELITE_SCORE_MULT: u64 = 5;
pub const ELITE_MASS_MULT: f32 = 2.0;
pub const ELITE_COLOR: u32 = 0xffffff;

// --- Combat ---

/// Base broad-phase radius for projectile hits, widened by the largest foe radius.
pub const HIT_QUERY_RADIUS: f32 = 60.0;
pub const HIT_FLASH_TICKS: f32 = 3.0;
pub const CHAIN_HIT_FLASH_TICKS: f32 = 5.0;
pub const BURN_HIT_FLASH_TICKS: f32 = 2.0;
pub const PLAYER_HIT_FLASH_TICKS: f32 = 10.0;
pub const PLAYER_HIT_SHAKE: f32 = 10.0;
pub const PLAYER_HIT_KICK: f32 = 20.0;
pub const EXPLOSIVE_RADIUS: f32 = 100.0;
pub const EXPLOSIVE_DAMAGE_MULT: f32 = 0.5;
pub const SPLIT_ANGLE: f32 = 0.5;
pub const SPLIT_SPEED: f32 = 10.0;
pub const SPLIT_DAMAGE_MULT: f32 = 0.5;
pub const SPLIT_LIFE: f32 = 20.0;
pub const SPLIT_SIZE_MULT: f32 = 0.6;
pub const SPLIT_MAX_GENERATION: u32 = 1;
pub const BOUNCE_SPEED: f32 = 10.0;
pub const HOMING_BASE_RANGE: f32 = 400.0;
pub const HOMING_RANGE_PER_POINT: f32 = 100.0;
pub const HOMING_BASE_TURN: f32 = 0.05;
pub const HOMING_TURN_PER_POINT: f32 = 0.1;
/// Most recent foes a projectile remembers to avoid re-hitting on consecutive ticks.
pub const STRUCK_MEMORY: usize = 8;
pub const BEAM_TRAIL_POINTS: usize = 20;
/// Hit-stop ticks when the player takes damage.
pub const HIT_STOP_PLAYER_HIT: u32 = 3;
/// Hit-stop ticks when a boss dies.
pub const HIT_STOP_BOSS_KILL: u32 = 12;

// --- Status effects ---

pub const BURN_POWER_MULT: f32 = 0.2;
pub const BURN_DURATION_SECS: f32 = 3.0;
pub const BURN_TICK_PERIOD: f32 = 30.0;
pub const FREEZE_BASE_SECS: f32 = 2.0;
pub const FREEZE_SECS_PER_STACK: f32 = 0.5;
pub const FREEZE_TICK_PERIOD: f32 = 60.0;
pub const FREEZE_SPEED_MULT: f32 = 0.5;

// --- Chain lightning ---

pub const CHAIN_DAMAGE_MULT: f32 = 0.6;
pub const CHAIN_BASE_HOPS: u32 = 2;
pub const CHAIN_RANGE: f32 = 200.0;
pub const CHAIN_DECAY: f32 = 0.8;
pub const CHAIN_DELAY_TICKS: f32 = 3.0;

// --- Death rewards ---

pub const ELITE_GEM_COUNT: u32 = 5;
pub const HEAL_DROP_CHANCE: f32 = 0.02;
pub const ELITE_HEAL_DROP_CHANCE: f32 = 0.2;
pub const DEBRIS_MIN: u32 = 4;
pub const DEBRIS_MAX: u32 = 7;
pub const OVERDRIVE_GAIN: f32 = 1.0;
pub const OVERDRIVE_GAIN_ELITE: f32 = 5.0;

// --- Progression ---

pub const XP_BASE: f32 = 50.0;
pub const XP_SCALE: f32 = 1.4;
pub const COMBO_DURATION: f32 = 180.0;
pub const LEVEL_UP_OPTIONS: usize = 3;

// --- Gems & pickups ---

pub const GEM_COLLECT_RADIUS: f32 = 35.0;
pub const GEM_LIFETIME: f32 = 900.0;
pub const GEM_MAGNET_PULL: f32 = 0.1;
pub const PICKUP_MAGNET_PULL: f32 = 0.05;
pub const DROP_FRICTION: f32 = 0.9;
pub const HEAL_AMOUNT: f32 = 150.0;
pub const PICKUP_LIFETIME: f32 = 1000.0;
pub const PICKUP_SIZE: f32 = 12.0;

// --- Effects ---

pub const PARTICLE_FRICTION: f32 = 0.92;
pub const SCRAP_FRICTION: f32 = 0.95;
pub const PLAYER_COLOR: u32 = 0x00f3ff;
pub const DASH_TRAIL_COLOR: u32 = 0xffffff;
pub const ULTIMATE_COLOR: u32 = 0xff00ff;
pub const LIGHTNING_COLOR: u32 = 0xaa00ff;
pub const HOSTILE_SHOT_COLOR: u32 = 0xff0000;
/// Status particles are emitted on frames divisible by this.
pub const STATUS_PARTICLE_PERIOD: u64 = 20;

// --- Camera ---

pub const CAMERA_LERP: f32 = 0.1;
pub const CAMERA_KICK_DECAY: f32 = 0.8;
pub const CAMERA_ZOOM_LERP: f32 = 0.05;
pub const CAMERA_ZOOM_ARENA: f32 = 0.7;
pub const CAMERA_ZOOM_WARP: f32 = 0.4;

// --- Screen feedback ---

pub const SHAKE_DECAY: f32 = 0.9;
pub const SHAKE_MAX: f32 = 30.0;

// --- Audio ---

pub const AUDIO_FOE_DIVISOR: f32 = 80.0;
pub const AUDIO_HP_WEIGHT: f32 = 0.6;
pub const AUDIO_BOSS_BONUS: f32 = 0.8;

// --- Backdrop ---

pub const STAR_COUNT: usize = 300;
pub const NEBULA_COUNT: usize = 5;

// --- Auto-pilot ---

pub const AUTO_FOE_AVOID_RANGE: f32 = 200.0;
pub const AUTO_SHOT_SCAN_RANGE: f32 = 150.0;
pub const AUTO_SHOT_DODGE_RANGE: f32 = 120.0;
pub const AUTO_PICKUP_RANGE: f32 = 400.0;
pub const AUTO_HEAL_THRESHOLD: f32 = 0.6;
pub const AUTO_WALL_MARGIN: f32 = 200.0;
pub const AUTO_DASH_RANGE: f32 = 100.0;
pub const AUTO_FRACTURE_RANGE: f32 = 150.0;
pub const AUTO_ULT_MIN_FOES: usize = 20;
pub const AUTO_STASIS_MIN_FOES: usize = 15;
