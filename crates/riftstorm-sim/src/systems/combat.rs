//! Combat resolution: projectile flight and hits, status application, chain
//! lightning, foe deaths, orbitals, the ultimate and damage to the player.

use rand::Rng;

use riftstorm_core::components::*;
use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::events::SimCallbacks;
use riftstorm_core::types::{from_angle, heading, Rgb, Vec2};

use crate::delayed::DelayedAction;
use crate::engine::GameState;
use crate::systems::{director, snapshot};
use crate::world_setup;

/// Per-tick working copy of a player projectile, so hit resolution can touch
/// the rest of the aggregate while the shot is in flight.
#[derive(Debug, Clone, Copy)]
struct Shot {
    pos: Vec2,
    vel: Vec2,
    damage: f32,
    size: f32,
    color: Rgb,
    life: f32,
    max_life: f32,
    pierce: u32,
    bounce: u32,
    split: u32,
    explosive: u32,
    generation: u32,
    homing: f32,
    elemental: ElementalStacks,
    knockback: f32,
}

impl Shot {
    fn read(p: &Projectile) -> Self {
        Self {
            pos: p.body.pos,
            vel: p.body.vel,
            damage: p.damage,
            size: p.size,
            color: p.color,
            life: p.life,
            max_life: p.max_life,
            pierce: p.pierce,
            bounce: p.bounce,
            split: p.split,
            explosive: p.explosive,
            generation: p.generation,
            homing: p.homing,
            elemental: p.elemental,
            knockback: p.knockback,
        }
    }

    fn write(&self, p: &mut Projectile) {
        p.body.pos = self.pos;
        p.body.vel = self.vel;
        p.life = self.life;
        p.pierce = self.pierce;
        p.bounce = self.bounce;
    }
}

pub fn run(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let mut shots = std::mem::take(&mut state.scratch.projectiles);
    shots.clear();
    shots.extend_from_slice(state.projectiles.live());
    for &handle in &shots {
        let faction = match state.projectiles.get(handle) {
            Some(p) => p.faction,
            None => continue,
        };
        match faction {
            Faction::Player => update_player_shot(state, cb, handle),
            Faction::Hostile => update_hostile_shot(state, cb, handle),
        }
    }
    state.scratch.projectiles = shots;

    orbital_hits(state, cb);
    player_contact(state, cb);
}

fn update_player_shot(state: &mut GameState, cb: &mut dyn SimCallbacks, handle: ProjectileId) {
    let dt = state.world_time_scale;
    let Some(p) = state.projectiles.get_mut(handle) else {
        return;
    };
    p.body.pos += p.body.vel * dt;
    p.life -= dt;
    if p.beam {
        p.trail.push(p.body.pos);
        if p.trail.len() > BEAM_TRAIL_POINTS {
            p.trail.remove(0);
        }
    }
    let mut shot = Shot::read(p);

    if shot.homing > 0.0 {
        steer_homing(state, &mut shot, dt);
    }

    let world = state.world_size;
    let mut hit_wall = false;
    if shot.pos.x < 0.0 || shot.pos.x > world.x {
        shot.vel.x = -shot.vel.x;
        hit_wall = true;
    }
    if shot.pos.y < 0.0 || shot.pos.y > world.y {
        shot.vel.y = -shot.vel.y;
        hit_wall = true;
    }
    if hit_wall {
        if shot.bounce > 0 {
            shot.bounce -= 1;
            shot.life = shot.max_life;
            world_setup::spawn_sparks(state, shot.pos, shot.vel, 3, shot.color);
        } else {
            shot.life = 0.0;
        }
    }

    if shot.life <= 0.0 {
        state.projectiles.release(handle);
        return;
    }

    let mut candidates = std::mem::take(&mut state.scratch.foes_inner);
    candidates.clear();
    let reach = HIT_QUERY_RADIUS + state.grid.largest_radius();
    state.grid.query_into(shot.pos, reach, &mut candidates);

    for &foe_id in &candidates {
        let Some(foe) = state.foes.get(foe_id) else {
            continue;
        };
        if !foe.is_live() || foe.body.pos.distance(shot.pos) >= foe.size + shot.size {
            continue;
        }
        let recently_struck = state
            .projectiles
            .get(handle)
            .is_some_and(|p| p.struck.contains(&foe_id));
        if recently_struck {
            continue;
        }
        if resolve_hit(state, cb, handle, &mut shot, foe_id) {
            shot.life = 0.0;
            break;
        }
    }
    state.scratch.foes_inner = candidates;

    if shot.life <= 0.0 {
        state.projectiles.release(handle);
    } else if let Some(p) = state.projectiles.get_mut(handle) {
        shot.write(p);
    }
}

/// Turn toward the nearest live foe in range, keeping speed.
fn steer_homing(state: &mut GameState, shot: &mut Shot, dt: f32) {
    let range = HOMING_BASE_RANGE + shot.homing * HOMING_RANGE_PER_POINT;
    let mut nearest = None;
    let mut best_sq = range * range;
    for &id in state.grid.query_radius(shot.pos, range) {
        let Some(foe) = state.foes.get(id) else {
            continue;
        };
        if !foe.is_live() {
            continue;
        }
        let d_sq = foe.body.pos.distance_squared(shot.pos);
        if d_sq < best_sq {
            best_sq = d_sq;
            nearest = Some(foe.body.pos);
        }
    }

    let Some(target) = nearest else {
        return;
    };
    let dist = best_sq.sqrt();
    if dist <= 0.1 {
        return;
    }
    let speed = shot.vel.length();
    let desired = (target - shot.pos) / dist * speed;
    let turn = (HOMING_BASE_TURN + shot.homing * HOMING_TURN_PER_POINT) * dt;
    shot.vel += (desired - shot.vel) * turn;
    let new_speed = shot.vel.length();
    if new_speed > 0.1 {
        shot.vel = shot.vel / new_speed * speed;
    }
}

/// Apply one projectile hit. Returns true when the shot is spent.
fn resolve_hit(
    state: &mut GameState,
    cb: &mut dyn SimCallbacks,
    handle: ProjectileId,
    shot: &mut Shot,
    foe_id: FoeId,
) -> bool {
    let damage = shot.damage;
    let Some(foe) = state.foes.get_mut(foe_id) else {
        return false;
    };
    foe.hp -= damage;
    foe.hit_flash = HIT_FLASH_TICKS;
    if !foe.is_boss() {
        foe.body.vel += shot.vel.normalize_or_zero() * shot.knockback / foe.mass.max(1.0);
    }
    let foe_pos = foe.body.pos;
    state.damage_this_tick += damage;

    if let Some(p) = state.projectiles.get_mut(handle) {
        p.struck.push(foe_id);
        if p.struck.len() > STRUCK_MEMORY {
            p.struck.remove(0);
        }
    }

    if shot.explosive > 0 {
        world_setup::spawn_explosion(state, shot.pos, shot.color, 3, 2.0);
        blast(state, cb, shot.pos, damage * EXPLOSIVE_DAMAGE_MULT);
    }

    if shot.split > 0 && shot.generation < SPLIT_MAX_GENERATION {
        for side in [SPLIT_ANGLE, -SPLIT_ANGLE] {
            spawn_split_child(state, shot, side, foe_id);
        }
    }

    let elemental = shot.elemental;
    if let Some(foe) = state.foes.get_mut(foe_id) {
        if elemental.fire > 0 {
            let power = damage * BURN_POWER_MULT * elemental.fire as f32;
            apply_status(foe, StatusKind::Burn, power, BURN_DURATION_SECS);
        }
        if elemental.ice > 0 {
            let duration = FREEZE_BASE_SECS + elemental.ice as f32 * FREEZE_SECS_PER_STACK;
            apply_status(foe, StatusKind::Freeze, 0.0, duration);
        }
    }
    if elemental.volt > 0 {
        chain_lightning(
            state,
            cb,
            foe_id,
            damage * CHAIN_DAMAGE_MULT,
            elemental.volt + CHAIN_BASE_HOPS,
            CHAIN_RANGE,
            Vec::new(),
        );
    }

    world_setup::spawn_sparks(state, shot.pos, shot.vel, 3, shot.color);

    if state.foes.get(foe_id).is_some_and(|f| f.hp <= 0.0) {
        kill_foe(state, cb, foe_id, shot.vel);
    }

    if shot.pierce > 0 {
        shot.pierce -= 1;
        false
    } else if shot.bounce > 0 {
        shot.bounce -= 1;
        let away = (shot.pos - foe_pos).try_normalize().unwrap_or(-shot.vel.normalize_or_zero());
        shot.vel = away * BOUNCE_SPEED;
        false
    } else {
        true
    }
}

/// Area damage around an explosive impact. The struck foe takes the splash
/// on top of the direct hit.
fn blast(state: &mut GameState, cb: &mut dyn SimCallbacks, center: Vec2, damage: f32) {
    let mut targets = std::mem::take(&mut state.scratch.foes);
    targets.clear();
    state.grid.query_into(center, EXPLOSIVE_RADIUS, &mut targets);
    targets.retain(|&id| {
        state
            .foes
            .get(id)
            .is_some_and(|f| f.is_live() && f.body.pos.distance(center) < EXPLOSIVE_RADIUS)
    });
    for &id in &targets {
        let Some(foe) = state.foes.get_mut(id) else {
            continue;
        };
        foe.hp -= damage;
        let dead = foe.hp <= 0.0;
        state.damage_this_tick += damage;
        if dead {
            kill_foe(state, cb, id, Vec2::ZERO);
        }
    }
    state.scratch.foes = targets;
}

fn spawn_split_child(state: &mut GameState, parent: &Shot, offset: f32, struck: FoeId) {
    let Some(handle) = state.projectiles.acquire() else {
        return;
    };
    let Some(child) = state.projectiles.get_mut(handle) else {
        return;
    };
    child.body.pos = parent.pos;
    child.body.vel = from_angle(heading(parent.vel) + offset) * SPLIT_SPEED;
    child.faction = Faction::Player;
    child.damage = parent.damage * SPLIT_DAMAGE_MULT;
    child.color = parent.color;
    child.life = SPLIT_LIFE;
    child.max_life = SPLIT_LIFE;
    child.size = parent.size * SPLIT_SIZE_MULT;
    child.generation = parent.generation + 1;
    child.struck.push(struck);
}

/// Add a status or refresh an existing one of the same kind. Refresh keeps
/// the longer duration and, for burns, the stronger power.
pub fn apply_status(foe: &mut Foe, kind: StatusKind, power: f32, duration: f32) {
    if let Some(existing) = foe.statuses.iter_mut().find(|s| s.kind == kind) {
        existing.duration = existing.duration.max(duration);
        if kind == StatusKind::Burn {
            existing.power = existing.power.max(power);
        }
    } else {
        foe.statuses.push(StatusEffect {
            kind,
            duration,
            power,
            timer: 0.0,
        });
    }
}

/// Arc from `from` to the nearest unvisited live foe within `range`, then
/// schedule the next hop with decayed damage.
pub fn chain_lightning(
    state: &mut GameState,
    cb: &mut dyn SimCallbacks,
    from: FoeId,
    damage: f32,
    hops_left: u32,
    range: f32,
    mut visited: Vec<FoeId>,
) {
    if hops_left == 0 {
        return;
    }
    let Some(origin) = state.foes.get(from).map(|f| f.body.pos) else {
        return;
    };
    visited.push(from);

    let mut candidates = std::mem::take(&mut state.scratch.foes);
    candidates.clear();
    state.grid.query_into(origin, range, &mut candidates);
    let mut best = None;
    let mut best_sq = range * range;
    for &id in &candidates {
        if visited.contains(&id) {
            continue;
        }
        let Some(foe) = state.foes.get(id) else {
            continue;
        };
        if !foe.is_live() {
            continue;
        }
        let d_sq = foe.body.pos.distance_squared(origin);
        if d_sq < best_sq {
            best_sq = d_sq;
            best = Some((id, foe.body.pos));
        }
    }
    state.scratch.foes = candidates;

    let Some((target, target_pos)) = best else {
        return;
    };
    world_setup::spawn_lightning(state, origin, target_pos);
    cb.play_sound(SoundId::Spark, Some(target_pos));

    let killed = match state.foes.get_mut(target) {
        Some(foe) => {
            foe.hp -= damage;
            foe.hit_flash = CHAIN_HIT_FLASH_TICKS;
            foe.hp <= 0.0
        }
        None => false,
    };
    state.damage_this_tick += damage;
    if killed {
        kill_foe(state, cb, target, Vec2::ZERO);
    }

    if hops_left > 1 {
        state.delayed.schedule(
            CHAIN_DELAY_TICKS,
            DelayedAction::ChainLightning {
                from: target,
                damage: damage * CHAIN_DECAY,
                hops_left: hops_left - 1,
                range,
                visited,
            },
        );
    }
}

/// Handle a foe death: rewards, drops, effects and, for bosses, the warp.
/// Guarded by the `dead` flag so each foe dies once.
pub fn kill_foe(state: &mut GameState, cb: &mut dyn SimCallbacks, id: FoeId, knockback: Vec2) {
    let Some(foe) = state.foes.get_mut(id) else {
        return;
    };
    if foe.dead {
        return;
    }
    foe.dead = true;
    foe.body.active = false;
    let (pos, vel, color, size) = (foe.body.pos, foe.body.vel, foe.color, foe.size);
    let (kind, elite, xp, score) = (foe.kind, foe.elite, foe.xp, foe.score);

    state.score += score;
    state.player.xp += xp;
    if !kind.is_boss() {
        state.wave_kills += 1;
    }

    let gems = if elite { ELITE_GEM_COUNT } else { 1 };
    world_setup::drop_gems(state, pos, xp, gems, knockback);

    let heal = state.rng.gen::<f32>() < HEAL_DROP_CHANCE
        || (elite && state.rng.gen::<f32>() < ELITE_HEAL_DROP_CHANCE);
    if heal {
        world_setup::drop_heal(state, pos);
    }

    world_setup::spawn_explosion(state, pos, color, size.floor() as u32, 2.0);
    let shards = state.rng.gen_range(DEBRIS_MIN..=DEBRIS_MAX);
    for _ in 0..shards {
        world_setup::spawn_scrap(state, pos, color, size, vel);
    }

    if kind == FoeKind::Splitter {
        for _ in 0..2 {
            let offset = from_angle(state.rng.gen::<f32>() * std::f32::consts::TAU) * size * 0.5;
            world_setup::setup_foe(state, FoeKind::Chaser, pos + offset, false);
        }
    }

    if kind.is_boss() {
        clear_boss(state, cb, id);
    }
    cb.play_sound(SoundId::Explosion, Some(pos));

    state.combo += 1;
    state.combo_timer = COMBO_DURATION;
    let gain = if elite { OVERDRIVE_GAIN_ELITE } else { OVERDRIVE_GAIN };
    state.overdrive = (state.overdrive + gain).min(OVERDRIVE_MAX);
}

fn clear_boss(state: &mut GameState, cb: &mut dyn SimCallbacks, boss: FoeId) {
    state.boss_active = false;
    state.arena.active = false;
    state.hit_stop = HIT_STOP_BOSS_KILL;
    let name = state.boss_name.take().unwrap_or_default();
    tracing::info!(%name, wave = state.wave, "boss destroyed");

    director::start_warp(state, cb);

    let mut minions = std::mem::take(&mut state.scratch.foes);
    minions.clear();
    minions.extend(
        state
            .foes
            .iter()
            .filter(|(h, f)| *h != boss && f.is_live() && !f.is_boss())
            .map(|(h, _)| h),
    );
    for &h in &minions {
        let Some(minion) = state.foes.get_mut(h) else {
            continue;
        };
        minion.dead = true;
        minion.body.active = false;
        let (pos, color) = (minion.body.pos, minion.color);
        world_setup::spawn_explosion(state, pos, color, 5, 1.0);
    }
    state.scratch.foes = minions;

    cb.on_boss_cleared();
}

fn orbital_hits(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let center = state.player.body.pos;
    let damage = ORBITAL_DAMAGE * state.player.stats.damage_mod;
    for i in 0..state.orbitals.len() {
        let orb = &mut state.orbitals[i];
        orb.hit_cooldown -= state.world_time_scale;
        if orb.hit_cooldown > 0.0 {
            continue;
        }
        let pos = center + from_angle(orb.angle) * ORBITAL_DISTANCE;

        let reach = ORBITAL_RADIUS + state.grid.largest_radius();
        let victim = state.grid.query_radius(pos, reach).iter().copied().find(|&id| {
            state
                .foes
                .get(id)
                .is_some_and(|f| f.is_live() && f.body.pos.distance(pos) < f.size + ORBITAL_RADIUS)
        });
        let Some(victim) = victim else {
            continue;
        };

        state.orbitals[i].hit_cooldown = ORBITAL_HIT_COOLDOWN;
        let Some(foe) = state.foes.get_mut(victim) else {
            continue;
        };
        foe.hp -= damage;
        foe.hit_flash = HIT_FLASH_TICKS;
        let dead = foe.hp <= 0.0;
        state.damage_this_tick += damage;
        world_setup::spawn_sparks(state, pos, pos - center, 2, PLAYER_COLOR);
        if dead {
            kill_foe(state, cb, victim, Vec2::ZERO);
        }
    }
}

/// Overdrive ultimate: heavy damage to every live foe in range.
pub fn ultimate(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let center = state.player.body.pos;
    let mut targets = std::mem::take(&mut state.scratch.foes);
    targets.clear();
    targets.extend(
        state
            .foes
            .iter()
            .filter(|(_, f)| f.is_live() && f.body.pos.distance(center) < ULTIMATE_RANGE)
            .map(|(h, _)| h),
    );
    for &id in &targets {
        let Some(foe) = state.foes.get_mut(id) else {
            continue;
        };
        if !foe.is_live() {
            continue;
        }
        foe.hp -= ULTIMATE_DAMAGE;
        let (pos, dead) = (foe.body.pos, foe.hp <= 0.0);
        state.damage_this_tick += ULTIMATE_DAMAGE;
        world_setup::spawn_explosion(state, pos, ULTIMATE_COLOR, 10, 2.0);
        if dead {
            kill_foe(state, cb, id, Vec2::ZERO);
        }
    }
    state.scratch.foes = targets;
}

fn update_hostile_shot(state: &mut GameState, cb: &mut dyn SimCallbacks, handle: ProjectileId) {
    let dt = state.world_time_scale;
    let Some(p) = state.projectiles.get_mut(handle) else {
        return;
    };
    p.body.pos += p.body.vel * dt;
    p.life -= dt;
    let (pos, size, damage, expired) = (p.body.pos, p.size, p.damage, p.life <= 0.0);

    if expired {
        state.projectiles.release(handle);
        return;
    }

    let player = &state.player;
    if player.body.active
        && player.invuln <= 0.0
        && player.body.pos.distance(pos) < PLAYER_COLLISION_RADIUS + size
    {
        damage_player(state, cb, damage, pos);
        state.projectiles.release(handle);
    }
}

pub fn contact_damage(foe: &Foe) -> f32 {
    let base = match foe.kind {
        FoeKind::Tank => CONTACT_DAMAGE_TANK,
        FoeKind::Titan => CONTACT_DAMAGE_BOSS,
        _ => CONTACT_DAMAGE,
    };
    if foe.elite {
        base * CONTACT_ELITE_MULT
    } else {
        base
    }
}

fn player_contact(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    if !state.player.body.active || state.player.invuln > 0.0 || state.game_over {
        return;
    }
    let pos = state.player.body.pos;
    let hit = state
        .grid
        .query_radius(pos, CONTACT_QUERY_RADIUS)
        .iter()
        .find_map(|&id| {
            let foe = state.foes.get(id)?;
            if !foe.is_live() {
                return None;
            }
            let radius = if foe.modules.is_empty() {
                foe.size
            } else {
                BOSS_CONTACT_RADIUS
            };
            (foe.body.pos.distance(pos) < radius + CONTACT_PADDING)
                .then(|| (contact_damage(foe), foe.body.pos))
        });
    if let Some((damage, source)) = hit {
        damage_player(state, cb, damage, source);
    }
}

/// Damage the player from `source`. No-op while invulnerable. Ends the run
/// when hp reaches zero; returns true if damage landed.
pub fn damage_player(
    state: &mut GameState,
    cb: &mut dyn SimCallbacks,
    amount: f32,
    source: Vec2,
) -> bool {
    if state.player.invuln > 0.0 || state.game_over {
        return false;
    }
    let player = &mut state.player;
    player.hp -= amount;
    player.invuln = PLAYER_INVULN_ON_HIT;
    player.hit_flash = PLAYER_HIT_FLASH_TICKS;
    let pos = player.body.pos;

    state.shake += PLAYER_HIT_SHAKE;
    state.combo = 0;
    state.hit_stop = state.hit_stop.max(HIT_STOP_PLAYER_HIT);
    state.camera.kick += from_angle(heading(pos - source)) * PLAYER_HIT_KICK;
    cb.play_sound(SoundId::Hit, Some(pos));

    if state.player.hp <= 0.0 {
        state.player.hp = 0.0;
        state.game_over = true;
        state.active = false;
        world_setup::spawn_explosion(state, pos, PLAYER_COLOR, 50, 5.0);
        let summary = snapshot::run_summary(state);
        tracing::info!(score = summary.score, wave = summary.wave, level = summary.level, "game over");
        cb.on_game_over(&summary);
        cb.play_sound(SoundId::GameOver, None);
    }
    true
}
