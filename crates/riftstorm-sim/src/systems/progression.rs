//! Level-up check. Rolls upgrade options and pauses the run until the host
//! picks one.

use riftstorm_core::constants::*;
use riftstorm_core::enums::SoundId;
use riftstorm_core::events::SimCallbacks;

use crate::engine::GameState;
use crate::upgrades;

/// XP needed for the level after one that needed `xp_to_next`.
pub fn next_xp_threshold(xp_to_next: f32) -> f32 {
    (xp_to_next * XP_SCALE).floor()
}

pub fn run(state: &mut GameState, cb: &mut dyn SimCallbacks) {
    if !state.active || state.game_over || !state.pending_upgrades.is_empty() {
        return;
    }
    let player = &mut state.player;
    if player.xp < player.xp_to_next {
        return;
    }
    player.level += 1;
    player.xp -= player.xp_to_next;
    player.xp_to_next = next_xp_threshold(player.xp_to_next);
    let level = player.level;

    let options = upgrades::roll_options(&mut state.rng, &state.player, &state.upgrade_stacks);
    tracing::debug!(level, options = options.len(), "level up");
    cb.on_level_up(&options);
    cb.play_sound(SoundId::LevelUp, None);

    if !options.is_empty() {
        state.pending_upgrades = options;
        state.paused = true;
    }
}
