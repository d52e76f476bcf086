//! Simulation engine, the core of the game.
//!
//! `GameState` is the single owned aggregate: pools, spatial grid, player,
//! director state and presentation hints. `tick` runs every system once in a
//! fixed order. Completely headless, so runs are reproducible from a seed.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use riftstorm_core::commands::HostCommand;
use riftstorm_core::components::*;
use riftstorm_core::config::SimConfig;
use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::error::ConfigError;
use riftstorm_core::events::SimCallbacks;
use riftstorm_core::input::InputState;
use riftstorm_core::loadout::weapon_spec;
use riftstorm_core::state::{HudView, UpgradeOption};
use riftstorm_core::types::{SimTime, Vec2};

use riftstorm_procgen::backdrop;

use crate::delayed::{DelayedAction, DelayedQueue};
use crate::pool::Pool;
use crate::spatial::SpatialGrid;
use crate::systems;
use crate::upgrades::{self, Applied};
use crate::world_setup;

/// Reusable per-tick buffers.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    pub foes: Vec<FoeId>,
    pub foes_inner: Vec<FoeId>,
    pub projectiles: Vec<ProjectileId>,
    pub due: Vec<DelayedAction>,
}

/// The simulation aggregate. Owns every pool and all run state.
pub struct GameState {
    pub config: SimConfig,
    pub(crate) rng: ChaCha8Rng,
    pub time: SimTime,

    pub active: bool,
    pub paused: bool,
    pub game_over: bool,
    pub auto_pilot: bool,

    /// Host-requested scale, clamped to `[0, MAX_TIME_SCALE]` every tick.
    pub time_scale: f32,
    /// Effective scale for foes, projectiles and timers this tick.
    pub world_time_scale: f32,
    /// Effective scale for player cooldowns this tick.
    pub player_time_scale: f32,
    pub hit_stop: u32,

    pub world_size: Vec2,
    pub viewport: Vec2,
    pub camera: Camera,
    pub shake: f32,

    pub score: u64,
    pub wave: u32,
    pub wave_type: WaveType,
    pub wave_kills: u32,
    pub wave_quota: u32,
    pub spawn_timer: f32,
    pub boss_active: bool,
    pub boss_name: Option<String>,
    pub arena: Arena,
    pub warp: WarpState,

    pub combo: u32,
    pub combo_timer: f32,
    pub overdrive: f32,
    /// Damage dealt to foes this tick.
    pub damage_this_tick: f32,

    pub player: Player,
    pub input: InputState,

    pub foes: Pool<Foe>,
    pub projectiles: Pool<Projectile>,
    pub particles: Pool<Particle>,
    pub gems: Pool<Gem>,
    pub pickups: Pool<Pickup>,
    pub debris: Pool<Debris>,

    pub grid: SpatialGrid<FoeId>,
    pub delayed: DelayedQueue,

    pub orbitals: Vec<Orbital>,
    pub vortices: Vec<Vortex>,
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,

    pub upgrade_stacks: BTreeMap<UpgradeId, u32>,
    /// Options offered at the last level-up, awaiting a choice.
    pub pending_upgrades: Vec<UpgradeOption>,

    pub(crate) next_squad_id: u32,
    pub(crate) scratch: Scratch,
}

impl GameState {
    /// Build an idle aggregate with default configuration. Call
    /// [`start_run`](Self::start_run) to begin play.
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self::build(SimConfig::default(), viewport_w, viewport_h)
    }

    /// Build an idle aggregate from a validated configuration.
    pub fn with_config(
        config: SimConfig,
        viewport_w: f32,
        viewport_h: f32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, viewport_w, viewport_h))
    }

    fn build(config: SimConfig, viewport_w: f32, viewport_h: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world_size = Vec2::new(config.world_width, config.world_height);
        let stars = backdrop::generate_stars(&mut rng, world_size, STAR_COUNT);
        let mut nebulae = Vec::with_capacity(NEBULA_COUNT);
        backdrop::regenerate_nebulae(&mut rng, world_size, 1, NEBULA_COUNT, &mut nebulae);

        let mut player = Player::default();
        world_setup::reset_player(&mut player, world_size, HullType::default());

        let pools = config.pools;
        Self {
            rng,
            time: SimTime::default(),
            active: false,
            paused: false,
            game_over: false,
            auto_pilot: false,
            time_scale: 1.0,
            world_time_scale: 1.0,
            player_time_scale: 1.0,
            hit_stop: 0,
            world_size,
            viewport: Vec2::new(viewport_w, viewport_h),
            camera: Camera {
                pos: world_size / 2.0,
                ..Default::default()
            },
            shake: 0.0,
            score: 0,
            wave: 1,
            wave_type: WaveType::for_wave(1),
            wave_kills: 0,
            wave_quota: config.initial_wave_quota,
            spawn_timer: 0.0,
            boss_active: false,
            boss_name: None,
            arena: Arena::default(),
            warp: WarpState::default(),
            combo: 0,
            combo_timer: 0.0,
            overdrive: 0.0,
            damage_this_tick: 0.0,
            player,
            input: InputState::default(),
            foes: Pool::new("foes", pools.foes),
            projectiles: Pool::new("projectiles", pools.projectiles),
            particles: Pool::new("particles", pools.particles),
            gems: Pool::new("gems", pools.gems),
            pickups: Pool::new("pickups", pools.pickups),
            debris: Pool::new("debris", pools.debris),
            grid: SpatialGrid::new(config.world_width, config.world_height, config.cell_size),
            delayed: DelayedQueue::default(),
            orbitals: Vec::new(),
            vortices: Vec::new(),
            stars,
            nebulae,
            upgrade_stacks: BTreeMap::new(),
            pending_upgrades: Vec::new(),
            next_squad_id: 0,
            scratch: Scratch::default(),
            config,
        }
    }

    /// Reset the aggregate and begin a run with `hull`.
    pub fn start_run(&mut self, hull: HullType) {
        self.foes.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.gems.clear();
        self.pickups.clear();
        self.debris.clear();
        self.grid.clear();
        self.delayed.clear();
        self.vortices.clear();
        self.orbitals.clear();
        self.upgrade_stacks.clear();
        self.pending_upgrades.clear();

        world_setup::reset_player(&mut self.player, self.world_size, hull);
        for _ in 0..self.player.stats.orbitals {
            upgrades::add_orbital(&mut self.orbitals);
        }

        self.time.run_ticks = 0;
        self.active = true;
        self.paused = false;
        self.game_over = false;
        self.hit_stop = 0;
        self.shake = 0.0;
        self.score = 0;
        self.wave = 1;
        self.wave_type = WaveType::for_wave(1);
        self.wave_kills = 0;
        self.wave_quota = self.config.initial_wave_quota;
        self.spawn_timer = 0.0;
        self.boss_active = false;
        self.boss_name = None;
        self.arena = Arena::default();
        self.warp = WarpState::default();
        self.combo = 0;
        self.combo_timer = 0.0;
        self.overdrive = 0.0;
        self.damage_this_tick = 0.0;
        self.camera = Camera {
            pos: self.player.body.pos,
            ..Default::default()
        };
        backdrop::regenerate_nebulae(
            &mut self.rng,
            self.world_size,
            self.wave,
            NEBULA_COUNT,
            &mut self.nebulae,
        );

        tracing::info!(?hull, seed = self.config.seed, "run started");
    }

    /// Apply a host command between ticks.
    pub fn apply_command(&mut self, command: HostCommand, callbacks: &mut impl SimCallbacks) {
        match command {
            HostCommand::StartRun { hull } => self.start_run(hull),
            HostCommand::SelectUpgrade { id } => {
                self.select_upgrade(id, callbacks);
            }
            HostCommand::Pause => {
                if self.active {
                    self.paused = true;
                }
            }
            HostCommand::Resume => {
                // A pending level-up keeps the run paused until a choice is made.
                if self.pending_upgrades.is_empty() {
                    self.paused = false;
                }
            }
            HostCommand::SetTimeScale { scale } => {
                self.time_scale = sanitize_time_scale(scale);
            }
            HostCommand::SetAutoPilot { enabled } => self.auto_pilot = enabled,
        }
    }

    /// Apply one of the pending level-up options and resume. Returns false
    /// if `id` was not offered.
    pub fn select_upgrade(&mut self, id: UpgradeId, callbacks: &mut impl SimCallbacks) -> bool {
        if !self.pending_upgrades.iter().any(|o| o.id == id) {
            tracing::debug!(?id, "ignoring upgrade that was not offered");
            return false;
        }
        self.pending_upgrades.clear();

        let applied = upgrades::apply_upgrade(
            id,
            &mut self.player,
            &mut self.orbitals,
            &mut self.upgrade_stacks,
        );
        if let Applied::Evolved(weapon) = applied {
            let spec = weapon_spec(weapon);
            let pos = self.player.body.pos;
            world_setup::spawn_explosion(self, pos, spec.color, 50, 8.0);
            callbacks.on_weapon_evolve(spec.name);
            callbacks.play_sound(SoundId::Evolve, None);
            tracing::info!(weapon = spec.name, "weapon evolved");
        }
        self.paused = false;
        true
    }

    /// Current director state.
    pub fn director_phase(&self) -> DirectorPhase {
        if self.warp.active {
            DirectorPhase::Warping
        } else if self.boss_active {
            DirectorPhase::BossActive
        } else {
            DirectorPhase::Spawning
        }
    }

    /// Handle of the live boss, if any.
    pub fn boss(&self) -> Option<FoeId> {
        self.foes
            .iter()
            .find(|(_, f)| f.is_boss() && f.is_live())
            .map(|(h, _)| h)
    }

    pub fn hud(&self) -> HudView {
        systems::snapshot::build_hud(self)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, callbacks: &mut impl SimCallbacks) {
        tick(self, callbacks);
    }
}

/// Quota for the wave after one with quota `quota`.
pub fn next_quota(quota: u32, multiplier: f64) -> u32 {
    ((f64::from(quota) * multiplier).floor() as u32).max(quota)
}

fn sanitize_time_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(0.0, MAX_TIME_SCALE)
    } else {
        1.0
    }
}

/// Advance `state` by one tick, reporting to `callbacks`.
pub fn tick(state: &mut GameState, callbacks: &mut impl SimCallbacks) {
    let cb: &mut dyn SimCallbacks = callbacks;

    if state.paused || !state.active {
        return;
    }

    state.time_scale = sanitize_time_scale(state.time_scale);
    state.player_time_scale = state.time_scale;
    state.world_time_scale = if state.player.skill_q.active {
        state.time_scale * CHRONO_TIME_FACTOR
    } else {
        state.time_scale
    };

    if state.hit_stop > 0 {
        state.hit_stop -= 1;
        return;
    }

    if state.shake > 0.0 {
        state.shake = (state.shake * SHAKE_DECAY - 0.5).clamp(0.0, SHAKE_MAX);
    }

    state.damage_this_tick = 0.0;

    // 1. Broad phase.
    rebuild_grid(state);

    // 2. Delayed one-shot effects, against a fresh grid.
    run_delayed(state, cb);

    // 3. Director (spawning, boss trigger, warp).
    systems::director::run(state, cb);

    // 4. Player control, skills, orbitals.
    systems::player::run(state, cb);

    // 5. Foe status effects and movement.
    systems::foes::run(state, cb);

    // 6. Projectiles and contact damage.
    systems::combat::run(state, cb);

    // 7. Drops, effects and releases.
    systems::cleanup::run(state);

    // 8. Camera follow.
    systems::camera::run(state);

    state.time.advance();
    if state.combo_timer > 0.0 {
        state.combo_timer -= state.world_time_scale;
        if state.combo_timer <= 0.0 {
            state.combo = 0;
        }
    }

    systems::audio::run(state, cb);
    systems::progression::run(state, cb);
}

pub(crate) fn rebuild_grid(state: &mut GameState) {
    state.grid.clear();
    for (handle, foe) in state.foes.iter() {
        if foe.is_live() {
            state.grid.insert(handle, foe.body.pos, foe.size);
        }
    }
}

fn run_delayed(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let mut due = std::mem::take(&mut state.scratch.due);
    state.delayed.advance(state.world_time_scale, &mut due);
    for action in due.drain(..) {
        match action {
            DelayedAction::ChainLightning {
                from,
                damage,
                hops_left,
                range,
                visited,
            } => {
                if state.foes.get(from).is_some_and(Foe::is_live) {
                    systems::combat::chain_lightning(state, cb, from, damage, hops_left, range, visited);
                }
            }
        }
    }
    state.scratch.due = due;
}
