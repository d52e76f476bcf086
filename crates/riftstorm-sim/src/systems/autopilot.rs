//! Auto-pilot: a simple reactive controller used for demos and soak runs.

use riftstorm_core::constants::*;
use riftstorm_core::enums::Faction;
use riftstorm_core::types::{heading, Vec2};

use crate::engine::GameState;
use crate::systems::player::ControlIntent;

/// Evade foes and hostile fire, grab heals when hurt, keep off the walls,
/// and fight the nearest foe.
pub fn compute(state: &GameState) -> ControlIntent {
    let p = &state.player;
    let pos = p.body.pos;
    let mut intent = ControlIntent::default();

    let mut nearest: Option<(Vec2, f32)> = None;
    let mut live = 0usize;
    for (_, foe) in state.foes.iter() {
        if !foe.is_live() {
            continue;
        }
        live += 1;
        let d = foe.body.pos.distance(pos);
        if nearest.map_or(true, |(_, best)| d < best) {
            nearest = Some((foe.body.pos, d));
        }
        if d < AUTO_FOE_AVOID_RANGE && d > 0.001 {
            let push = (AUTO_FOE_AVOID_RANGE - d) / AUTO_FOE_AVOID_RANGE;
            intent.movement -= (foe.body.pos - pos) / d * push * 2.0;
        }
    }

    for (_, shot) in state.projectiles.iter() {
        if shot.faction != Faction::Hostile {
            continue;
        }
        let to_player = pos - shot.body.pos;
        let d = to_player.length();
        if d >= AUTO_SHOT_SCAN_RANGE || d < 0.001 {
            continue;
        }
        let incoming = shot.body.vel.dot(to_player) > 0.0;
        if incoming && d < AUTO_SHOT_DODGE_RANGE {
            // Sidestep perpendicular to the line of fire.
            intent.movement += Vec2::new(to_player.y, -to_player.x) / d * 3.0;
            if p.dash_cooldown <= 0.0 {
                intent.dash = true;
            }
        }
    }

    if p.hp < p.max_hp * AUTO_HEAL_THRESHOLD {
        for (_, pickup) in state.pickups.iter() {
            let d = pickup.body.pos.distance(pos);
            if d < AUTO_PICKUP_RANGE && d > 0.001 {
                intent.movement += (pickup.body.pos - pos) / d * 2.0;
            }
        }
    }

    let world = state.world_size;
    if pos.x < AUTO_WALL_MARGIN {
        intent.movement.x += 1.0;
    }
    if pos.x > world.x - AUTO_WALL_MARGIN {
        intent.movement.x -= 1.0;
    }
    if pos.y < AUTO_WALL_MARGIN {
        intent.movement.y += 1.0;
    }
    if pos.y > world.y - AUTO_WALL_MARGIN {
        intent.movement.y -= 1.0;
    }

    if let Some((target, d)) = nearest {
        intent.shoot = true;
        intent.aim = Some(heading(target - pos));
        if d < AUTO_DASH_RANGE && p.dash_cooldown <= 0.0 {
            intent.dash = true;
        }
        intent.ultimate = state.overdrive >= OVERDRIVE_MAX && live > AUTO_ULT_MIN_FOES;
        intent.skill_q = live > AUTO_STASIS_MIN_FOES;
        intent.skill_e = d < AUTO_FRACTURE_RANGE;
    }

    intent
}
