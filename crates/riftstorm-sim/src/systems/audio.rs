//! Adaptive music hints: danger intensity and tempo pushed to the host every
//! tick.

use riftstorm_core::constants::*;
use riftstorm_core::enums::WaveType;
use riftstorm_core::events::SimCallbacks;

use crate::engine::GameState;

/// Danger level in `[0, 1]` from crowd size, missing hp and boss presence.
pub fn intensity(state: &GameState) -> f32 {
    let crowd = state.foes.live_count() as f32 / AUDIO_FOE_DIVISOR;
    let max_hp = state.player.max_hp.max(1.0);
    let wounds = (1.0 - state.player.hp / max_hp) * AUDIO_HP_WEIGHT;
    let boss = if state.boss_active { AUDIO_BOSS_BONUS } else { 0.0 };
    (crowd + wounds + boss).clamp(0.0, 1.0)
}

pub fn tempo(state: &GameState) -> f32 {
    if state.player.skill_q.active {
        0.5
    } else if state.boss_active {
        1.25
    } else if state.wave_type == WaveType::Chaos {
        1.2
    } else if state.wave_type == WaveType::Swarm {
        1.1
    } else if state.foes.live_count() < 5 {
        0.9
    } else {
        1.0
    }
}

pub fn run(state: &GameState, cb: &mut dyn SimCallbacks) {
    cb.set_audio_intensity(intensity(state));
    cb.set_audio_tempo(tempo(state));
}
