//! Host commands applied to the simulation between ticks.
//!
//! Continuous controls (movement, aim, held buttons) go through
//! [`crate::input::InputState`]. Commands cover discrete lifecycle actions.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Reset the aggregate and begin a run with the given hull.
    StartRun { hull: HullType },
    /// Apply one of the offered level-up options and resume.
    SelectUpgrade { id: UpgradeId },
    Pause,
    Resume,
    /// Requested world time scale. Clamped every tick.
    SetTimeScale { scale: f32 },
    SetAutoPilot { enabled: bool },
}
