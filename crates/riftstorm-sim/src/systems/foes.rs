//! Foe update: status effects, steering, segment following, boss drift and
//! turrets, shooter fire and soft world bounds.

use rand::Rng;

use riftstorm_core::components::*;
use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::events::SimCallbacks;
use riftstorm_core::types::{heading, Vec2};

use riftstorm_steering::steer::{self, SquadForces, SteeringContext};

use crate::engine::GameState;
use crate::systems::combat;
use crate::world_setup;

pub fn run(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let dt = state.world_time_scale;
    let emit_status = state.time.frame % STATUS_PARTICLE_PERIOD == 0;

    let mut ids = std::mem::take(&mut state.scratch.foes);
    ids.clear();
    ids.extend_from_slice(state.foes.live());

    let mut boss_seen = false;
    for &id in &ids {
        let Some(foe) = state.foes.get(id) else {
            continue;
        };
        if !foe.is_live() {
            continue;
        }
        boss_seen |= foe.is_boss();

        if !tick_statuses(state, cb, id, dt, emit_status) {
            continue;
        }

        let Some(foe) = state.foes.get_mut(id) else {
            continue;
        };
        if foe.hit_flash > 0.0 {
            foe.hit_flash -= 1.0;
        }
        let behavior = foe.behavior;
        match behavior {
            Behavior::Segment { parent, .. } => follow_parent(state, cb, id, parent),
            Behavior::Dreadnought => update_boss(state, cb, id, dt),
            _ => steer_foe(state, id, dt),
        }
        soft_bounds(state, id);
    }
    state.scratch.foes = ids;

    if state.boss_active && !boss_seen {
        tracing::warn!(wave = state.wave, "boss flagged active but no boss foe exists, resetting arena");
        state.boss_active = false;
        state.arena.active = false;
    }
}

/// Advance status timers and apply burn damage. Returns false if the foe died.
fn tick_statuses(
    state: &mut GameState,
    cb: &mut dyn SimCallbacks,
    id: FoeId,
    dt: f32,
    emit_particles: bool,
) -> bool {
    let Some(foe) = state.foes.get_mut(id) else {
        return false;
    };
    let (pos, size) = (foe.body.pos, foe.size);
    let burning = foe.statuses.iter().any(|s| s.kind == StatusKind::Burn);
    let frozen = foe.is_frozen();

    let mut burn = 0.0;
    foe.statuses.retain_mut(|status| {
        status.timer += dt;
        let period = status.period();
        if status.timer >= period {
            status.timer = 0.0;
            status.duration -= period / TICKS_PER_SECOND;
            if status.kind == StatusKind::Burn {
                burn += status.power;
            }
        }
        status.duration > 0.0
    });
    if burn > 0.0 {
        foe.hp -= burn;
        foe.hit_flash = BURN_HIT_FLASH_TICKS;
        state.damage_this_tick += burn;
    }
    let dead = foe.hp <= 0.0;

    if emit_particles {
        if burning {
            world_setup::spawn_status_particles(state, pos, size, StatusKind::Burn);
        }
        if frozen {
            world_setup::spawn_status_particles(state, pos, size, StatusKind::Freeze);
        }
    }

    if dead {
        combat::kill_foe(state, cb, id, Vec2::ZERO);
        return false;
    }
    true
}

fn follow_parent(state: &mut GameState, cb: &mut dyn SimCallbacks, id: FoeId, parent: FoeId) {
    let parent_body = state
        .foes
        .get(parent)
        .filter(|p| p.is_live())
        .map(|p| (p.body.pos, p.size));

    match parent_body {
        Some((parent_pos, parent_size)) => {
            let Some(foe) = state.foes.get_mut(id) else {
                return;
            };
            if let Some((pos, angle)) =
                steer::segment_follow(foe.body.pos, foe.size, parent_pos, parent_size)
            {
                foe.body.pos = pos;
                foe.rotation = angle;
            }
        }
        None => {
            if let Some(foe) = state.foes.get_mut(id) {
                foe.hp = 0.0;
            }
            combat::kill_foe(state, cb, id, Vec2::ZERO);
        }
    }
}

fn update_boss(state: &mut GameState, cb: &mut dyn SimCallbacks, id: FoeId, dt: f32) {
    let target = state.player.body.pos;
    let Some(boss) = state.foes.get_mut(id) else {
        return;
    };
    boss.body.vel = steer::dreadnought_drift(boss.body.pos, boss.body.vel, target);
    boss.rotation += BOSS_SPIN;
    boss.body.pos += boss.body.vel * dt;
    let (pos, rotation, turrets) = (boss.body.pos, boss.rotation, boss.modules.len());

    let mut near = std::mem::take(&mut state.scratch.foes_inner);
    near.clear();
    state.grid.query_into(pos, BOSS_PUSH_RADIUS, &mut near);
    for &other in &near {
        if other == id {
            continue;
        }
        let Some(minion) = state.foes.get_mut(other) else {
            continue;
        };
        if !minion.is_live() {
            continue;
        }
        let offset = minion.body.pos - pos;
        let d = offset.length();
        if d < BOSS_PUSH_RADIUS && d > 0.001 {
            minion.body.vel += offset / d * BOSS_PUSH_FORCE;
        }
    }
    state.scratch.foes_inner = near;

    if state.time.frame % BOSS_TURRET_PERIOD != 0 {
        return;
    }
    let damage = BOSS_TURRET_DAMAGE_PER_WAVE * state.wave as f32;
    for i in 0..turrets {
        let muzzle = state
            .foes
            .get(id)
            .and_then(|b| b.modules.get(i))
            .filter(|m| m.kind == ModuleKind::Turret)
            .map(|m| steer::module_world_position(pos, m.offset, rotation));
        let Some(muzzle) = muzzle else {
            continue;
        };
        if state.rng.gen::<f32>() >= BOSS_TURRET_CHANCE {
            continue;
        }
        world_setup::spawn_hostile_shot(state, muzzle, target, damage);
        if state.rng.gen::<f32>() < 0.2 {
            cb.play_sound(SoundId::Shoot, Some(muzzle));
        }
    }
}

fn steer_foe(state: &mut GameState, id: FoeId, dt: f32) {
    let Some(foe) = state.foes.get(id) else {
        return;
    };
    let (pos, vel, size, speed) = (foe.body.pos, foe.body.vel, foe.size, foe.speed);
    let (behavior, squad, kind, frozen) = (foe.behavior, foe.squad, foe.kind, foe.is_frozen());
    let target = state.player.body.pos;

    let flocking = matches!(behavior, Behavior::Flock) && squad.is_some();
    let mut reach = size * SEPARATION_RADIUS_MULT;
    if flocking {
        reach = reach.max(FLOCK_NEIGHBOR_RADIUS);
    }
    let mut near = std::mem::take(&mut state.scratch.foes_inner);
    near.clear();
    state.grid.query_into(pos, reach, &mut near);

    let foes = &state.foes;
    let separation = steer::separation(
        pos,
        size,
        speed,
        near.iter()
            .filter(|&&n| n != id)
            .filter_map(|&n| foes.get(n))
            .filter(|f| f.is_live())
            .map(|f| f.body.pos),
    );

    let squad_forces = match squad {
        Some(tag) if flocking => {
            let mut count = 0.0;
            let mut velocity = Vec2::ZERO;
            let mut centroid = Vec2::ZERO;
            for &n in &near {
                let Some(mate) = foes.get(n) else {
                    continue;
                };
                let same_squad = mate.squad.is_some_and(|s| s.id == tag.id);
                if n != id
                    && mate.is_live()
                    && same_squad
                    && mate.body.pos.distance(pos) < FLOCK_NEIGHBOR_RADIUS
                {
                    count += 1.0;
                    velocity += mate.body.vel;
                    centroid += mate.body.pos;
                }
            }
            (count > 0.0).then(|| SquadForces {
                avg_velocity: velocity / count,
                centroid: centroid / count,
            })
        }
        _ => None,
    };
    state.scratch.foes_inner = near;

    let roll = state.rng.gen::<f32>();
    let update = steer::evaluate(&SteeringContext {
        behavior,
        position: pos,
        velocity: vel,
        speed,
        target,
        separation,
        squad: squad_forces,
        roll,
        dt,
    });

    let shoot = kind == FoeKind::Shooter;
    let Some(foe) = state.foes.get_mut(id) else {
        return;
    };
    foe.body.vel = update.velocity;
    foe.behavior = update.behavior;
    let slow = if frozen { FREEZE_SPEED_MULT } else { 1.0 };
    foe.body.pos += foe.body.vel * dt * slow;
    if foe.body.vel.length() > ROTATION_MIN_SPEED {
        foe.rotation = heading(foe.body.vel);
    }

    if shoot {
        foe.shoot_timer += dt;
        if foe.shoot_timer >= SHOOTER_INTERVAL {
            foe.shoot_timer = 0.0;
            let muzzle = foe.body.pos;
            world_setup::spawn_hostile_shot(state, muzzle, target, SHOOTER_SHOT_DAMAGE);
        }
    }
}

fn soft_bounds(state: &mut GameState, id: FoeId) {
    let world = state.world_size;
    let Some(foe) = state.foes.get_mut(id) else {
        return;
    };
    if !foe.is_live() {
        return;
    }
    let pos = foe.body.pos;
    let vel = &mut foe.body.vel;
    if pos.x < -SOFT_BOUNDS_MARGIN {
        vel.x += SOFT_BOUNDS_PUSH;
    }
    if pos.x > world.x + SOFT_BOUNDS_MARGIN {
        vel.x -= SOFT_BOUNDS_PUSH;
    }
    if pos.y < -SOFT_BOUNDS_MARGIN {
        vel.y += SOFT_BOUNDS_PUSH;
    }
    if pos.y > world.y + SOFT_BOUNDS_MARGIN {
        vel.y -= SOFT_BOUNDS_PUSH;
    }
}
