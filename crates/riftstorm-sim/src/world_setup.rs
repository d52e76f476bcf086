//! Spawn factories: player reset, foes, squads, bosses, drops and effects.
//!
//! Every factory acquires from the owning pool and silently skips the spawn
//! when the pool is exhausted. Boss spawns are the exception and evict.

use std::f32::consts::TAU;

use rand::Rng;

use riftstorm_core::components::*;
use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::events::SimCallbacks;
use riftstorm_core::loadout::hull_spec;
use riftstorm_core::types::{from_angle, heading, Rgb, Vec2};

use riftstorm_procgen::TitanGenerator;
use riftstorm_steering::profiles::{get_profile, FoeProfile};

use crate::engine::GameState;

/// Reset the player in place for a fresh run with `hull`.
pub fn reset_player(player: &mut Player, world_size: Vec2, hull: HullType) {
    let spec = hull_spec(hull);
    *player = Player {
        body: Body {
            pos: world_size / 2.0,
            vel: Vec2::ZERO,
            active: true,
        },
        hull,
        weapon: spec.weapon,
        hp: spec.hp,
        max_hp: spec.hp,
        stats: PlayerStats {
            speed_mod: spec.speed_mod,
            orbitals: spec.orbitals,
            ..Default::default()
        },
        ..Default::default()
    };
}

// ---- Foes ----

fn configure_foe(foe: &mut Foe, kind: FoeKind, profile: &FoeProfile, wave: u32, pos: Vec2) {
    foe.body.pos = pos;
    foe.body.vel = Vec2::ZERO;
    foe.kind = kind;
    foe.behavior = profile.behavior;
    foe.hp = profile.hp_at(wave);
    foe.max_hp = foe.hp;
    foe.speed = profile.speed_at(wave);
    foe.size = profile.size;
    foe.color = profile.color;
    foe.xp = profile.xp;
    foe.score = profile.score;
    foe.sides = profile.sides;
    foe.mass = profile.mass;
}

/// Apply elite multipliers. Called at most once per spawn.
pub fn apply_elite(foe: &mut Foe) {
    foe.elite = true;
    foe.hp *= ELITE_HP_MULT;
    foe.max_hp = foe.hp;
    foe.speed *= ELITE_SPEED_MULT;
    foe.size *= ELITE_SIZE_MULT;
    foe.xp *= ELITE_XP_MULT;
    foe.score *= ELITE_SCORE_MULT;
    foe.mass *= ELITE_MASS_MULT;
    foe.color = ELITE_COLOR;
}

pub fn elite_chance(wave: u32) -> f32 {
    (ELITE_CHANCE_PER_WAVE * wave as f32).min(ELITE_MAX_CHANCE)
}

/// Acquire and configure a foe of `kind` at `pos` with wave scaling.
pub fn setup_foe(state: &mut GameState, kind: FoeKind, pos: Vec2, elite: bool) -> Option<FoeId> {
    let handle = state.foes.acquire()?;
    let profile = get_profile(kind);
    let wave = state.wave;
    let foe = state.foes.get_mut(handle)?;
    configure_foe(foe, kind, &profile, wave, pos);
    if elite && !kind.is_boss() {
        apply_elite(foe);
    }
    Some(handle)
}

/// Spawn a foe with an elite roll. Snake heads bring their body along.
pub fn spawn_foe(state: &mut GameState, kind: FoeKind, pos: Vec2) -> Option<FoeId> {
    let elite = !kind.is_boss() && state.rng.gen::<f32>() < elite_chance(state.wave);
    let handle = setup_foe(state, kind, pos, elite)?;
    if kind == FoeKind::SnakeHead {
        spawn_snake_body(state, handle, pos);
    }
    Some(handle)
}

/// Chain `SNAKE_SEGMENTS` body segments behind `head`, each trailing the one
/// before it.
fn spawn_snake_body(state: &mut GameState, head: FoeId, pos: Vec2) {
    let mut parent = head;
    for index in 1..=SNAKE_SEGMENTS {
        let Some(segment) = setup_foe(state, FoeKind::SnakeBody, pos, false) else {
            break;
        };
        if let Some(foe) = state.foes.get_mut(segment) {
            foe.behavior = Behavior::Segment { parent, index };
        }
        parent = segment;
    }
}

/// Ring position around the player for a lone spawn, kept inside the world.
pub fn lone_spawn_position(state: &mut GameState) -> Vec2 {
    let angle = state.rng.gen::<f32>() * TAU;
    let dist = LONE_SPAWN_DISTANCE / state.camera.zoom.max(0.1);
    clamp_to_world(
        state.player.body.pos + from_angle(angle) * dist,
        state.world_size,
        SPAWN_EDGE_INSET,
    )
}

fn clamp_to_world(pos: Vec2, world: Vec2, inset: f32) -> Vec2 {
    let hi = (world - Vec2::splat(inset)).max(Vec2::splat(inset));
    pos.max(Vec2::splat(inset)).min(hi)
}

fn formation_offset(formation: Formation, i: u32, count: u32) -> Vec2 {
    match formation {
        Formation::V => {
            let row = (i / 2 + 1) as f32;
            let side = if i % 2 == 0 { 1.0 } else { -1.0 };
            Vec2::new(-side * row * SQUAD_SPACING, -row * SQUAD_SPACING)
        }
        Formation::Line => Vec2::new((i as f32 - count as f32 / 2.0) * SQUAD_SPACING, 0.0),
        Formation::Circle => {
            from_angle(TAU / count as f32 * i as f32) * SQUAD_SPACING * 2.0
        }
    }
}

/// Spawn an elite-flagged leader with `wingmen` followers in `formation`.
pub fn spawn_squad(
    state: &mut GameState,
    kind: FoeKind,
    wingmen: u32,
    formation: Formation,
) -> Option<FoeId> {
    let angle = state.rng.gen::<f32>() * TAU;
    let center = clamp_to_world(
        state.player.body.pos + from_angle(angle) * SQUAD_SPAWN_DISTANCE,
        state.world_size,
        SPAWN_EDGE_INSET,
    );

    let id = state.next_squad_id;
    state.next_squad_id = state.next_squad_id.wrapping_add(1);

    // Leaders always read as elite; the stat multipliers still need the roll.
    let rolled = state.rng.gen::<f32>() < elite_chance(state.wave);
    let leader = setup_foe(state, kind, center, rolled)?;
    if let Some(foe) = state.foes.get_mut(leader) {
        foe.elite = true;
        foe.color = ELITE_COLOR;
        foe.size *= SQUAD_LEADER_SIZE_MULT;
        foe.hp *= SQUAD_LEADER_HP_MULT;
        foe.max_hp = foe.hp;
        foe.squad = Some(SquadTag {
            id,
            role: SquadRole::Protector,
        });
    }

    for i in 0..wingmen {
        let pos = center + formation_offset(formation, i, wingmen);
        let Some(wingman) = spawn_foe(state, kind, pos) else {
            break;
        };
        if let Some(foe) = state.foes.get_mut(wingman) {
            foe.squad = Some(SquadTag {
                id,
                role: SquadRole::Flanker,
            });
        }
    }

    tracing::debug!(?kind, ?formation, wingmen, squad = id, "squad spawned");
    Some(leader)
}

/// Spawn the wave boss. Evicts the oldest non-boss foe when the pool is full.
/// Returns false if no slot could be found; the director retries next tick.
pub fn spawn_boss(state: &mut GameState, cb: &mut dyn SimCallbacks) -> bool {
    if state.boss_active {
        return false;
    }

    let handle = match state.foes.acquire() {
        Some(handle) => handle,
        None => {
            let victim = state
                .foes
                .iter()
                .find(|(_, f)| !f.is_boss())
                .map(|(h, _)| h);
            if let Some(victim) = victim {
                tracing::debug!(%victim, "foe pool full, evicting oldest foe for boss");
                state.foes.release(victim);
            }
            match state.foes.acquire() {
                Some(handle) => handle,
                None => {
                    tracing::error!(wave = state.wave, "foe pool exhausted, boss spawn deferred");
                    return false;
                }
            }
        }
    };

    let wave = state.wave;
    let seed = u64::from(state.rng.gen::<u32>()) + u64::from(wave);
    let blueprint = TitanGenerator::new(seed, wave).generate();
    let angle = state.rng.gen::<f32>() * TAU;
    let center = state.player.body.pos;
    let pos = center + from_angle(angle) * BOSS_SPAWN_DISTANCE;
    let core_color = blueprint.core_color();

    if let Some(foe) = state.foes.get_mut(handle) {
        configure_foe(foe, FoeKind::Titan, &get_profile(FoeKind::Titan), wave, pos);
        foe.hp = BOSS_BASE_HP * blueprint.stats.hp_mult;
        foe.max_hp = foe.hp;
        foe.speed = blueprint.stats.speed;
        foe.mass = blueprint.stats.mass;
        foe.size = BOSS_SIZE;
        foe.color = core_color;
        foe.behavior = Behavior::Dreadnought;
        foe.xp = BOSS_XP;
        foe.score = BOSS_SCORE;
        foe.modules.extend(blueprint.modules);
    }

    state.boss_active = true;
    state.arena = Arena {
        active: true,
        center,
        radius: ARENA_RADIUS,
    };

    let mut cleared = std::mem::take(&mut state.scratch.foes);
    cleared.clear();
    for (h, foe) in state.foes.iter() {
        if h != handle && foe.is_live() && foe.body.pos.distance(center) < ARENA_RADIUS {
            cleared.push(h);
        }
    }
    for &h in &cleared {
        let Some(foe) = state.foes.get_mut(h) else {
            continue;
        };
        foe.dead = true;
        let (p, color) = (foe.body.pos, foe.color);
        spawn_explosion(state, p, color, 5, 1.0);
    }
    state.scratch.foes = cleared;

    tracing::info!(name = %blueprint.name, wave, modules = blueprint.symmetry * blueprint.tiers + 1, "boss spawned");
    cb.play_sound(SoundId::Spawn, None);
    cb.on_boss_spawn(&blueprint.name);
    state.boss_name = Some(blueprint.name);
    true
}

/// Fire a hostile shot from `from` toward `target`.
pub fn spawn_hostile_shot(
    state: &mut GameState,
    from: Vec2,
    target: Vec2,
    damage: f32,
) -> Option<ProjectileId> {
    let handle = state.projectiles.acquire()?;
    let dir = (target - from).try_normalize().unwrap_or(Vec2::X);
    let shot = state.projectiles.get_mut(handle)?;
    shot.body.pos = from;
    shot.body.vel = dir * HOSTILE_SHOT_SPEED;
    shot.faction = Faction::Hostile;
    shot.damage = damage;
    shot.life = HOSTILE_SHOT_LIFE;
    shot.max_life = HOSTILE_SHOT_LIFE;
    shot.size = HOSTILE_SHOT_SIZE;
    shot.color = HOSTILE_SHOT_COLOR;
    Some(handle)
}

// ---- Drops ----

/// Scatter `count` gems sharing `xp`.
pub fn drop_gems(state: &mut GameState, pos: Vec2, xp: f32, count: u32, knockback: Vec2) {
    let value = (xp / count.max(1) as f32).ceil();
    for _ in 0..count {
        let angle = state.rng.gen::<f32>() * TAU;
        let speed = state.rng.gen::<f32>() * 2.0 + 1.0;
        let Some(handle) = state.gems.acquire() else {
            return;
        };
        if let Some(gem) = state.gems.get_mut(handle) {
            gem.body.pos = pos;
            gem.body.vel = from_angle(angle) * speed + knockback * 0.1;
            gem.value = value;
            gem.life = GEM_LIFETIME;
        }
    }
}

pub fn drop_heal(state: &mut GameState, pos: Vec2) {
    let vel = Vec2::new(
        (state.rng.gen::<f32>() - 0.5) * 2.0,
        (state.rng.gen::<f32>() - 0.5) * 2.0,
    );
    let Some(handle) = state.pickups.acquire() else {
        return;
    };
    if let Some(pickup) = state.pickups.get_mut(handle) {
        pickup.body.pos = pos;
        pickup.body.vel = vel;
        pickup.kind = PickupKind::Heal;
        pickup.life = PICKUP_LIFETIME;
    }
}

// ---- Effects ----

fn emit(state: &mut GameState, particle: Particle) -> bool {
    let Some(handle) = state.particles.acquire() else {
        return false;
    };
    if let Some(p) = state.particles.get_mut(handle) {
        *p = Particle {
            body: Body {
                active: true,
                ..particle.body
            },
            ..particle
        };
    }
    true
}

pub fn spawn_explosion(state: &mut GameState, pos: Vec2, color: Rgb, count: u32, speed: f32) {
    for _ in 0..count {
        let angle = state.rng.gen::<f32>() * TAU;
        let spd = state.rng.gen::<f32>() * speed + 1.0;
        let life = state.rng.gen_range(20.0..40.0);
        let size = state.rng.gen_range(2.0..5.0);
        let emitted = emit(
            state,
            Particle {
                body: Body {
                    pos,
                    vel: from_angle(angle) * spd,
                    active: true,
                },
                kind: ParticleKind::Ember,
                life,
                max_life: life,
                size,
                friction: PARTICLE_FRICTION,
                color,
                target: Vec2::ZERO,
            },
        );
        if !emitted {
            return;
        }
    }
}

/// Sparks thrown forward along `dir`.
pub fn spawn_sparks(state: &mut GameState, pos: Vec2, dir: Vec2, count: u32, color: Rgb) {
    let base = heading(dir);
    for _ in 0..count {
        let angle = base + (state.rng.gen::<f32>() - 0.5);
        let spd = state.rng.gen_range(3.0..8.0);
        let life = state.rng.gen_range(10.0..20.0);
        let size = state.rng.gen_range(1.0..3.0);
        let emitted = emit(
            state,
            Particle {
                body: Body {
                    pos,
                    vel: from_angle(angle) * spd,
                    active: true,
                },
                kind: ParticleKind::Spark,
                life,
                max_life: life,
                size,
                friction: PARTICLE_FRICTION,
                color,
                target: Vec2::ZERO,
            },
        );
        if !emitted {
            return;
        }
    }
}

pub fn spawn_lightning(state: &mut GameState, from: Vec2, to: Vec2) {
    emit(
        state,
        Particle {
            body: Body {
                pos: from,
                vel: Vec2::ZERO,
                active: true,
            },
            kind: ParticleKind::Lightning,
            life: 10.0,
            max_life: 10.0,
            size: 2.0,
            friction: PARTICLE_FRICTION,
            color: LIGHTNING_COLOR,
            target: to,
        },
    );
}

/// Embers for burning foes, shards for frozen ones.
pub fn spawn_status_particles(state: &mut GameState, center: Vec2, radius: f32, kind: StatusKind) {
    let count = match kind {
        StatusKind::Burn => 2,
        StatusKind::Freeze => 1,
    };
    for i in 0..count {
        let angle = state.rng.gen::<f32>() * TAU;
        let dist = state.rng.gen::<f32>() * radius;
        let vel = Vec2::new(
            (state.rng.gen::<f32>() - 0.5) * 0.5,
            (state.rng.gen::<f32>() - 0.5) * 0.5 - 1.0,
        );
        let life = state.rng.gen_range(20.0..40.0);
        let (particle_kind, color, size) = match kind {
            StatusKind::Burn => (
                ParticleKind::Spark,
                if i % 2 == 0 { 0xffaa00 } else { 0xff4400 },
                state.rng.gen_range(2.0..4.0),
            ),
            StatusKind::Freeze => (ParticleKind::Shard, 0x00ffff, state.rng.gen_range(3.0..6.0)),
        };
        emit(
            state,
            Particle {
                body: Body {
                    pos: center + from_angle(angle) * dist,
                    vel,
                    active: true,
                },
                kind: particle_kind,
                life,
                max_life: life,
                size,
                friction: PARTICLE_FRICTION,
                color,
                target: Vec2::ZERO,
            },
        );
    }
}

/// Scrap thrown off a destroyed hull, inheriting some of its velocity.
pub fn spawn_scrap(state: &mut GameState, pos: Vec2, color: Rgb, size: f32, inherit: Vec2) {
    let angle = state.rng.gen::<f32>() * TAU;
    let force = state.rng.gen_range(3.0..8.0);
    let scale = state.rng.gen_range(0.2..0.4);
    let rotation = state.rng.gen::<f32>() * TAU;
    let spin = (state.rng.gen::<f32>() - 0.5) * 0.8;
    let Some(handle) = state.debris.acquire() else {
        return;
    };
    if let Some(d) = state.debris.get_mut(handle) {
        d.body.pos = pos;
        d.body.vel = inherit * 0.3 + from_angle(angle) * force;
        d.kind = DebrisKind::Scrap;
        d.size = size * scale;
        d.rotation = rotation;
        d.spin = spin;
        d.friction = SCRAP_FRICTION;
        d.color = color;
    }
}

/// Dash exhaust streaking opposite the dash direction.
pub fn spawn_dash_trail(state: &mut GameState, pos: Vec2, dir: Vec2) {
    for _ in 0..10 {
        let vel = -dir * state.rng.gen::<f32>() * 5.0;
        let emitted = emit(
            state,
            Particle {
                body: Body {
                    pos,
                    vel,
                    active: true,
                },
                kind: ParticleKind::Spark,
                life: 20.0,
                max_life: 20.0,
                size: 2.0,
                friction: PARTICLE_FRICTION,
                color: DASH_TRAIL_COLOR,
                target: Vec2::ZERO,
            },
        );
        if !emitted {
            return;
        }
    }
}
