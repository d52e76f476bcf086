//! Outbound notifications: the host callback trait and a recording
//! implementation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::{RunSummary, UpgradeOption};
use crate::types::Vec2;

/// Host hooks invoked synchronously from inside a tick.
///
/// Every method defaults to a no-op. Implementations must not block; they
/// cannot reach the aggregate, so intents flow back through
/// [`crate::commands::HostCommand`] on the next call.
pub trait SimCallbacks {
    fn on_level_up(&mut self, _options: &[UpgradeOption]) {}
    fn on_game_over(&mut self, _summary: &RunSummary) {}
    fn on_boss_spawn(&mut self, _name: &str) {}
    fn on_boss_cleared(&mut self) {}
    fn on_weapon_evolve(&mut self, _weapon_name: &str) {}
    fn play_sound(&mut self, _sound: SoundId, _at: Option<Vec2>) {}
    fn set_audio_intensity(&mut self, _intensity: f32) {}
    fn set_audio_tempo(&mut self, _tempo: f32) {}
    fn update_audio_listener(&mut self, _pos: Vec2) {}
}

/// Callbacks that ignore everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCallbacks;

impl SimCallbacks for NoopCallbacks {}

/// Serializable record of one callback invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    LevelUp { options: Vec<UpgradeOption> },
    GameOver { summary: RunSummary },
    BossSpawn { name: String },
    BossCleared,
    WeaponEvolve { weapon_name: String },
    Sound { sound: SoundId, at: Option<Vec2> },
}

/// Records notable callbacks. Audio mix updates are kept as latest values
/// rather than events since they fire every tick.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
    pub audio_intensity: f32,
    pub audio_tempo: f32,
    pub listener: Vec2,
    /// Drop sound events instead of recording them.
    pub mute: bool,
}

impl EventLog {
    pub fn muted() -> Self {
        Self {
            mute: true,
            ..Default::default()
        }
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SimEvent> {
        self.events.drain(..)
    }

    pub fn count(&self, pred: impl Fn(&SimEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn game_overs(&self) -> usize {
        self.count(|e| matches!(e, SimEvent::GameOver { .. }))
    }

    pub fn last_level_up(&self) -> Option<&[UpgradeOption]> {
        self.events.iter().rev().find_map(|e| match e {
            SimEvent::LevelUp { options } => Some(options.as_slice()),
            _ => None,
        })
    }
}

impl SimCallbacks for EventLog {
    fn on_level_up(&mut self, options: &[UpgradeOption]) {
        self.events.push(SimEvent::LevelUp {
            options: options.to_vec(),
        });
    }

    fn on_game_over(&mut self, summary: &RunSummary) {
        self.events.push(SimEvent::GameOver {
            summary: summary.clone(),
        });
    }

    fn on_boss_spawn(&mut self, name: &str) {
        self.events.push(SimEvent::BossSpawn {
            name: name.to_string(),
        });
    }

    fn on_boss_cleared(&mut self) {
        self.events.push(SimEvent::BossCleared);
    }

    fn on_weapon_evolve(&mut self, weapon_name: &str) {
        self.events.push(SimEvent::WeaponEvolve {
            weapon_name: weapon_name.to_string(),
        });
    }

    fn play_sound(&mut self, sound: SoundId, at: Option<Vec2>) {
        if !self.mute {
            self.events.push(SimEvent::Sound { sound, at });
        }
    }

    fn set_audio_intensity(&mut self, intensity: f32) {
        self.audio_intensity = intensity;
    }

    fn set_audio_tempo(&mut self, tempo: f32) {
        self.audio_tempo = tempo;
    }

    fn update_audio_listener(&mut self, pos: Vec2) {
        self.listener = pos;
    }
}
