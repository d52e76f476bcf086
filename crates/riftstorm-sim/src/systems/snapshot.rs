//! Snapshot system: builds the HUD view and the end-of-run summary.
//!
//! Read-only. Never modifies the aggregate.

use riftstorm_core::state::*;

use crate::engine::GameState;

/// Build a compact HUD view of the current state.
pub fn build_hud(state: &GameState) -> HudView {
    HudView {
        frame: state.time.frame,
        score: state.score,
        wave: state.wave,
        wave_type: state.wave_type,
        wave_kills: state.wave_kills,
        wave_quota: state.wave_quota,
        combo: state.combo,
        overdrive: state.overdrive,
        phase: state.director_phase(),
        warp_stage: state.warp.active.then_some(state.warp.stage),
        player: build_player(state),
        boss: build_boss(state),
        live_foes: state.foes.live_count(),
        live_projectiles: state.projectiles.live_count(),
        live_particles: state.particles.live_count(),
        damage_this_tick: state.damage_this_tick,
        paused: state.paused,
        game_over: state.game_over,
    }
}

fn build_player(state: &GameState) -> PlayerView {
    let p = &state.player;
    PlayerView {
        pos: p.body.pos,
        hp: p.hp,
        max_hp: p.max_hp,
        xp: p.xp,
        xp_to_next: p.xp_to_next,
        level: p.level,
        weapon: p.weapon,
        hull: p.hull,
        dash_ready: p.dash_cooldown <= 0.0,
        skill_q_ready: p.skill_q.ready(),
        skill_e_ready: p.skill_e.ready(),
    }
}

fn build_boss(state: &GameState) -> Option<BossView> {
    let boss = state.foes.get(state.boss()?)?;
    Some(BossView {
        name: state.boss_name.clone().unwrap_or_default(),
        hp: boss.hp,
        max_hp: boss.max_hp,
        pos: boss.body.pos,
    })
}

/// Final statistics for the current run.
pub fn run_summary(state: &GameState) -> RunSummary {
    RunSummary {
        score: state.score,
        wave: state.wave,
        level: state.player.level,
        duration_secs: state.time.run_secs(),
        weapon: state.player.weapon,
        hull: state.player.hull,
        upgrades: state
            .upgrade_stacks
            .iter()
            .map(|(&id, &count)| UpgradeStack { id, count })
            .collect(),
    }
}
