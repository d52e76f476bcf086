//! Read-only views handed to the host: level-up offers, run summaries and the
//! per-tick HUD snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vec2;

/// One level-up choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOption {
    pub id: UpgradeId,
    pub kind: UpgradeKind,
    pub name: String,
    pub description: String,
    /// Times this upgrade has been taken this run.
    pub current_stack: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeStack {
    pub id: UpgradeId,
    pub count: u32,
}

/// Final statistics reported when a run ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub wave: u32,
    pub level: u32,
    pub duration_secs: f64,
    pub weapon: WeaponId,
    pub hull: HullType,
    pub upgrades: Vec<UpgradeStack>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub xp: f32,
    pub xp_to_next: f32,
    pub level: u32,
    pub weapon: WeaponId,
    pub hull: HullType,
    pub dash_ready: bool,
    pub skill_q_ready: bool,
    pub skill_e_ready: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossView {
    pub name: String,
    pub hp: f32,
    pub max_hp: f32,
    pub pos: Vec2,
}

/// Compact per-tick summary for HUD rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub frame: u64,
    pub score: u64,
    pub wave: u32,
    pub wave_type: WaveType,
    pub wave_kills: u32,
    pub wave_quota: u32,
    pub combo: u32,
    pub overdrive: f32,
    pub phase: DirectorPhase,
    pub warp_stage: Option<WarpStage>,
    pub player: PlayerView,
    pub boss: Option<BossView>,
    pub live_foes: usize,
    pub live_projectiles: usize,
    pub live_particles: usize,
    pub damage_this_tick: f32,
    pub paused: bool,
    pub game_over: bool,
}
