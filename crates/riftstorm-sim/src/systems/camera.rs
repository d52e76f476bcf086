//! Camera follow, recoil kick and zoom.

use riftstorm_core::constants::*;
use riftstorm_core::enums::WarpStage;

use crate::engine::GameState;

pub fn run(state: &mut GameState) {
    if !state.player.body.active {
        return;
    }
    let camera = &mut state.camera;
    camera.pos += (state.player.body.pos - camera.pos) * CAMERA_LERP;
    camera.pos += camera.kick;
    camera.kick *= CAMERA_KICK_DECAY;

    let target_zoom = if state.warp.active && state.warp.stage == WarpStage::Jump {
        CAMERA_ZOOM_WARP
    } else if state.arena.active {
        CAMERA_ZOOM_ARENA
    } else {
        1.0
    };
    camera.zoom += (target_zoom - camera.zoom) * CAMERA_ZOOM_LERP;
}
