//! Per-tick control state written by the host.

use serde::{Deserialize, Serialize};

use crate::types::Vec2;

/// Held buttons after host-side key binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub dash: bool,
    pub ultimate: bool,
    pub skill_q: bool,
    pub skill_e: bool,
}

impl KeyState {
    /// Raw movement axis from directional keys, components in `[-1, 1]`.
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }
}

/// Pointer in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub screen: Vec2,
    pub down: bool,
}

/// Touch twin-stick input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StickInput {
    pub movement: Vec2,
    pub aim: Vec2,
    pub shooting: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub keys: KeyState,
    pub pointer: PointerState,
    pub stick: Option<StickInput>,
}
