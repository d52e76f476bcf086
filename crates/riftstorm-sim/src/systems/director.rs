//! Wave director: spawn cadence, squads and lone foes, the boss trigger and
//! the warp sequence between sectors.

use rand::Rng;

use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::events::SimCallbacks;

use riftstorm_procgen::backdrop;

use crate::engine::{next_quota, GameState};
use crate::world_setup;

const SQUAD_KINDS: [FoeKind; 3] = [FoeKind::Chaser, FoeKind::Shooter, FoeKind::Dasher];
const FORMATIONS: [Formation; 3] = [Formation::V, Formation::Line, Formation::Circle];

/// Ticks between spawns at `wave`.
pub fn spawn_interval(wave: u32) -> f32 {
    (SPAWN_BASE_INTERVAL * SPAWN_INTERVAL_DECAY.powi(wave as i32)).max(SPAWN_MIN_INTERVAL)
}

pub fn run(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    if state.warp.active {
        update_warp(state, cb);
        return;
    }

    if !state.boss_active && state.wave_kills >= state.wave_quota {
        world_setup::spawn_boss(state, cb);
        return;
    }

    // Regular spawning is suppressed for the whole boss fight.
    if state.boss_active {
        return;
    }

    state.spawn_timer += state.world_time_scale;
    if state.spawn_timer <= spawn_interval(state.wave) {
        return;
    }
    state.spawn_timer = 0.0;

    if state.foes.live_count() >= state.config.max_foes {
        return;
    }

    if state.rng.gen::<f32>() < SQUAD_CHANCE {
        let kind = SQUAD_KINDS[state.rng.gen_range(0..SQUAD_KINDS.len())];
        let wingmen = state.rng.gen_range(SQUAD_MIN_WINGMEN..=SQUAD_MAX_WINGMEN);
        let formation = FORMATIONS[state.rng.gen_range(0..FORMATIONS.len())];
        world_setup::spawn_squad(state, kind, wingmen, formation);
    } else {
        let kinds = state.wave_type.lone_spawn_kinds();
        let kind = kinds[state.rng.gen_range(0..kinds.len())];
        let pos = world_setup::lone_spawn_position(state);
        world_setup::spawn_foe(state, kind, pos);
    }
}

/// Begin the warp after a boss kill.
pub fn start_warp(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    state.warp.active = true;
    state.warp.stage = WarpStage::Charge;
    state.warp.timer = WARP_CHARGE_TICKS;
    state.warp.speed_factor = 1.0;
    cb.play_sound(SoundId::WarpCharge, None);
}

fn update_warp(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    state.warp.timer -= 1.0;

    match state.warp.stage {
        WarpStage::Charge => {
            state.shake = (10.0 * (1.0 - state.warp.timer / WARP_CHARGE_TICKS)).min(10.0);
            if state.warp.timer <= 0.0 {
                state.warp.stage = WarpStage::Jump;
                state.warp.timer = WARP_JUMP_TICKS;
                state.warp.speed_factor = WARP_JUMP_SPEED_FACTOR;
                cb.play_sound(SoundId::WarpJump, None);
            }
        }
        WarpStage::Jump => {
            state.player.invuln = WARP_JUMP_INVULN;
            if state.warp.timer <= 0.0 {
                state.warp.stage = WarpStage::Arrival;
                state.warp.timer = WARP_ARRIVAL_TICKS;
                state.warp.speed_factor = 1.0;
                advance_sector(state);
            }
        }
        WarpStage::Arrival => {
            if state.warp.timer <= 0.0 {
                state.warp.active = false;
            }
        }
    }
}

fn advance_sector(state: &mut GameState) {
    state.wave += 1;
    state.wave_kills = 0;
    state.wave_quota = next_quota(state.wave_quota, state.config.quota_multiplier);
    state.wave_type = WaveType::for_wave(state.wave);
    state.spawn_timer = 0.0;
    backdrop::regenerate_nebulae(
        &mut state.rng,
        state.world_size,
        state.wave,
        NEBULA_COUNT,
        &mut state.nebulae,
    );
    tracing::info!(
        wave = state.wave,
        quota = state.wave_quota,
        wave_type = ?state.wave_type,
        "warp arrival"
    );
}
