//! Cleanup system: integrates drops and effects, collects gems and pickups,
//! applies vortex pull, and releases anything dead, expired or far outside
//! the world.

use riftstorm_core::constants::*;
use riftstorm_core::enums::PickupKind;
use riftstorm_core::types::Vec2;

use crate::engine::GameState;

/// True while `pos` is within `margin` of the world rectangle.
pub fn in_bounds(pos: Vec2, world: Vec2, margin: f32) -> bool {
    pos.x >= -margin && pos.x <= world.x + margin && pos.y >= -margin && pos.y <= world.y + margin
}

pub fn run(state: &mut GameState) {
    let dt = state.world_time_scale;
    let world = state.world_size;

    state.particles.retain_live(|_, p| {
        p.life -= dt;
        p.body.pos += p.body.vel * dt;
        p.body.vel *= p.friction;
        p.life > 0.0
    });

    collect_drops(state, dt);

    state.debris.retain_live(|_, d| {
        d.body.pos += d.body.vel * dt;
        d.rotation += d.spin * dt;
        d.body.vel *= d.friction;
        in_bounds(d.body.pos, world, DEATH_MARGIN)
    });

    state
        .foes
        .retain_live(|_, f| !f.dead && in_bounds(f.body.pos, world, DEATH_MARGIN));

    update_vortices(state, dt);
}

fn collect_drops(state: &mut GameState, dt: f32) {
    let magnet = state.player.stats.magnet_range;
    let target = state.player.body.pos;
    let attract = state.player.body.active;

    let mut xp = 0.0;
    state.gems.retain_live(|_, g| {
        g.life -= dt;
        g.body.pos += g.body.vel * dt;
        g.body.vel *= DROP_FRICTION;
        if attract {
            let d = g.body.pos.distance(target);
            if d < magnet {
                g.body.pos += (target - g.body.pos) * GEM_MAGNET_PULL;
                if d < GEM_COLLECT_RADIUS {
                    xp += g.value;
                    return false;
                }
            }
        }
        g.life > 0.0
    });
    state.player.xp += xp;

    let mut heal = 0.0;
    state.pickups.retain_live(|_, p| {
        p.life -= dt;
        p.body.pos += p.body.vel * dt;
        p.body.vel *= DROP_FRICTION;
        if attract {
            let d = p.body.pos.distance(target);
            if d < magnet {
                p.body.pos += (target - p.body.pos) * PICKUP_MAGNET_PULL;
                if d < GEM_COLLECT_RADIUS {
                    match p.kind {
                        PickupKind::Heal => heal += HEAL_AMOUNT,
                    }
                    return false;
                }
            }
        }
        p.life > 0.0
    });
    if heal > 0.0 {
        state.player.hp = (state.player.hp + heal).min(state.player.max_hp);
    }
}

fn update_vortices(state: &mut GameState, dt: f32) {
    state.vortices.retain_mut(|v| {
        v.life -= dt / TICKS_PER_SECOND;
        v.life > 0.0
    });

    let mut pulled = std::mem::take(&mut state.scratch.foes);
    for i in 0..state.vortices.len() {
        let vortex = state.vortices[i];
        pulled.clear();
        state.grid.query_into(vortex.pos, vortex.pull_range, &mut pulled);
        for &id in &pulled {
            let Some(foe) = state.foes.get_mut(id) else {
                continue;
            };
            if !foe.is_live() {
                continue;
            }
            let to_center = vortex.pos - foe.body.pos;
            if to_center.length() < vortex.pull_range {
                foe.body.vel += to_center.normalize_or_zero() * VORTEX_PULL_FORCE;
            }
        }
    }
    state.scratch.foes = pulled;
}
