//! Player control: input or auto-pilot intent, firing, dash, skills, the
//! ultimate, orbitals and movement.

use rand::Rng;

use riftstorm_core::components::*;
use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::events::SimCallbacks;
use riftstorm_core::loadout::weapon_spec;
use riftstorm_core::types::{from_angle, heading, Vec2};

use crate::engine::GameState;
use crate::systems::{autopilot, combat};
use crate::world_setup;

const STICK_MOVE_DEADZONE: f32 = 0.05;
const STICK_AIM_DEADZONE: f32 = 0.1;

/// What the player wants to do this tick, from input or the auto-pilot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlIntent {
    pub movement: Vec2,
    /// New facing, if the aim changed.
    pub aim: Option<f32>,
    pub shoot: bool,
    pub dash: bool,
    pub ultimate: bool,
    pub skill_q: bool,
    pub skill_e: bool,
}

pub fn run(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    if !state.player.body.active || state.game_over {
        return;
    }
    cb.update_audio_listener(state.player.body.pos);
    tick_timers(state);

    let intent = if state.auto_pilot {
        autopilot::compute(state)
    } else {
        manual_intent(state)
    };

    if let Some(angle) = intent.aim {
        state.player.angle = angle;
    }
    if intent.shoot {
        shoot(state, cb);
    }
    if intent.dash && state.player.dash_cooldown <= 0.0 {
        dash(state, cb, intent.movement);
    }
    if intent.ultimate && state.overdrive >= OVERDRIVE_MAX {
        ultimate(state, cb);
    }
    if intent.skill_q {
        chrono_stasis(state, cb);
    }
    if intent.skill_e {
        reality_fracture(state, cb);
    }

    apply_movement(state, intent.movement);
}

fn tick_timers(state: &mut GameState) {
    let dt = state.player_time_scale;
    let p = &mut state.player;
    for timer in [&mut p.shot_cooldown, &mut p.dash_cooldown, &mut p.invuln] {
        if *timer > 0.0 {
            *timer -= dt;
        }
    }
    for flash in [&mut p.hit_flash, &mut p.muzzle_flash] {
        if *flash > 0.0 {
            *flash -= 1.0;
        }
    }
    tick_skill(&mut p.skill_q, dt);
    tick_skill(&mut p.skill_e, dt);

    for orb in &mut state.orbitals {
        orb.angle += ORBITAL_ANGULAR_SPEED * dt;
    }
}

fn tick_skill(skill: &mut Skill, dt: f32) {
    if skill.cooldown > 0.0 {
        skill.cooldown -= dt;
    }
    if skill.active {
        skill.duration -= dt;
        if skill.duration <= 0.0 {
            skill.active = false;
            skill.duration = 0.0;
        }
    }
}

fn manual_intent(state: &GameState) -> ControlIntent {
    let input = &state.input;
    let player = &state.player;

    let mut movement = input.keys.axis();
    let mut aim = None;
    let mut shoot = false;

    if let Some(stick) = input.stick {
        if stick.movement.x.abs() > STICK_MOVE_DEADZONE
            || stick.movement.y.abs() > STICK_MOVE_DEADZONE
        {
            movement = stick.movement;
        }
    }

    if input.pointer.down {
        let on_screen =
            (player.body.pos - state.camera.pos) * state.camera.zoom + state.viewport / 2.0;
        aim = Some(heading(input.pointer.screen - on_screen));
        shoot = true;
    }

    if let Some(stick) = input.stick {
        if stick.aim.x.abs() > STICK_AIM_DEADZONE || stick.aim.y.abs() > STICK_AIM_DEADZONE {
            aim = Some(heading(stick.aim));
            shoot |= stick.shooting;
        }
    }

    ControlIntent {
        movement,
        aim,
        shoot,
        dash: input.keys.dash,
        ultimate: input.keys.ultimate,
        skill_q: input.keys.skill_q,
        skill_e: input.keys.skill_e,
    }
}

fn fire_sound(weapon: WeaponId) -> SoundId {
    match weapon {
        WeaponId::Pulse => SoundId::Shoot,
        WeaponId::Shotgun => SoundId::ShootShotgun,
        WeaponId::Railgun => SoundId::ShootRailgun,
        WeaponId::Void => SoundId::ShootVoid,
    }
}

/// Fire a volley if the weapon is off cooldown.
pub fn shoot(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    if state.player.shot_cooldown > 0.0 {
        return;
    }
    let spec = weapon_spec(state.player.weapon);
    let p = &mut state.player;
    p.shot_cooldown = spec.fire_delay / p.stats.fire_rate_mod;
    p.muzzle_flash = 3.0;

    let facing = from_angle(p.angle);
    p.recoil -= facing * spec.recoil;
    if spec.recoil > 5.0 {
        state.shake += 2.0;
    }
    if spec.recoil > 2.0 {
        state.camera.kick -= facing * spec.recoil * 2.0;
    }
    cb.play_sound(fire_sound(state.player.weapon), Some(state.player.body.pos));

    let p = state.player;
    let shots = spec.count + p.stats.multishot;
    let muzzle = p.body.pos + facing * PLAYER_MUZZLE_DISTANCE;
    let damage = PLAYER_BASE_DAMAGE * spec.damage_mult * p.stats.damage_mod;

    for i in 0..shots {
        let offset = if shots > 1 {
            let gap = if spec.spread > 0.0 { spec.spread } else { 0.1 };
            (i as f32 - (shots - 1) as f32 / 2.0) * gap
        } else {
            (state.rng.gen::<f32>() - 0.5) * spec.spread
        };

        let Some(handle) = state.projectiles.acquire() else {
            break;
        };
        let Some(shot) = state.projectiles.get_mut(handle) else {
            continue;
        };
        shot.body.pos = muzzle;
        shot.body.vel =
            from_angle(p.angle + offset) * spec.speed + p.body.vel * PLAYER_VELOCITY_INHERIT;
        shot.faction = Faction::Player;
        shot.color = spec.color;
        shot.damage = damage;
        shot.life = spec.lifetime;
        shot.max_life = spec.lifetime;
        shot.size = spec.size;
        shot.pierce = spec.pierce + p.stats.pierce;
        shot.homing = spec.homing + p.stats.homing;
        shot.beam = spec.beam;
        if spec.beam {
            shot.trail.push(muzzle);
        }
        shot.elemental = p.stats.elemental;
        shot.bounce = p.stats.bounce;
        shot.split = p.stats.split;
        shot.explosive = p.stats.explosive;
        shot.generation = 0;
        shot.knockback = spec.knockback;
    }
}

/// Burst along `movement`, or along the facing when standing still.
pub fn dash(state: &mut GameState, cb: &mut dyn SimCallbacks, movement: Vec2) {
    let p = &mut state.player;
    if p.dash_cooldown > 0.0 {
        return;
    }
    p.dash_cooldown = p.max_dash_cooldown;
    p.invuln = p.invuln.max(DASH_INVULN);
    let dir = if movement.length() < 0.1 {
        from_angle(p.angle)
    } else {
        movement.normalize()
    };
    p.body.vel = dir * DASH_SPEED;
    let pos = p.body.pos;

    cb.play_sound(SoundId::Dash, Some(pos));
    world_setup::spawn_dash_trail(state, pos, dir);
}

fn ultimate(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    state.overdrive = 0.0;
    state.shake += 20.0;
    cb.play_sound(SoundId::Explosion, Some(state.player.body.pos));
    combat::ultimate(state, cb);
}

fn chrono_stasis(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let skill = &mut state.player.skill_q;
    if !skill.ready() {
        return;
    }
    skill.active = true;
    skill.duration = skill.max_duration;
    skill.cooldown = skill.max_cooldown;
    cb.play_sound(SoundId::Chrono, None);
}

fn reality_fracture(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    let p = &mut state.player;
    if !p.skill_e.ready() {
        return;
    }
    p.skill_e.active = true;
    p.skill_e.duration = p.skill_e.max_duration;
    p.skill_e.cooldown = p.skill_e.max_cooldown;
    let pos = p.body.pos + from_angle(p.angle) * VORTEX_CAST_DISTANCE;

    state.vortices.push(Vortex {
        pos,
        life: VORTEX_LIFETIME_SECS,
        pull_range: VORTEX_PULL_RANGE,
    });
    cb.play_sound(SoundId::Fracture, None);
}

fn apply_movement(state: &mut GameState, movement: Vec2) {
    let world = state.world_size;
    let arena = state.arena;
    let p = &mut state.player;

    p.body.vel += movement * PLAYER_THRUST * p.stats.speed_mod;
    p.body.vel *= PLAYER_FRICTION;
    p.recoil *= PLAYER_RECOIL_DECAY;
    p.body.pos = (p.body.pos + p.body.vel + p.recoil).clamp(Vec2::ZERO, world);

    if arena.active {
        let offset = p.body.pos - arena.center;
        let limit = (arena.radius - ARENA_EDGE_INSET).max(0.0);
        if offset.length() > limit {
            let dir = offset.try_normalize().unwrap_or(Vec2::X);
            p.body.vel -= dir * ARENA_PUSHBACK;
            p.body.pos = arena.center + dir * limit;
        }
    }
}
