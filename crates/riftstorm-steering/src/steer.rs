//! Foe steering.
//!
//! Pure functions that turn a foe's behavior, kinematics and neighborhood
//! into a new velocity (and, for dashers, a new dash state). No pool or
//! aggregate dependency; the simulation gathers neighbors and rolls dice.

use riftstorm_core::components::{Behavior, DashState};
use riftstorm_core::constants::*;
use riftstorm_core::types::Vec2;

/// Squad-mate aggregates for flocking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquadForces {
    pub avg_velocity: Vec2,
    pub centroid: Vec2,
}

/// Input to the steering step for a single foe.
#[derive(Debug, Clone, Copy)]
pub struct SteeringContext {
    pub behavior: Behavior,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Base speed after wave scaling and elite multipliers.
    pub speed: f32,
    pub target: Vec2,
    /// Output of [`separation`] for this foe.
    pub separation: Vec2,
    pub squad: Option<SquadForces>,
    /// Uniform roll in `[0, 1)` used for probabilistic transitions.
    pub roll: f32,
    /// Scaled tick delta.
    pub dt: f32,
}

/// Output of the steering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringUpdate {
    pub velocity: Vec2,
    pub behavior: Behavior,
    pub behavior_changed: bool,
}

/// Evaluate one foe's steering for this tick.
pub fn evaluate(ctx: &SteeringContext) -> SteeringUpdate {
    let to_target = ctx.target - ctx.position;
    let dist = to_target.length().max(0.001);
    let dir = to_target / dist;

    let mut velocity = ctx.velocity;
    let mut behavior = ctx.behavior;

    let desired = match ctx.behavior {
        Behavior::KeepDistance => {
            if dist < KEEP_DISTANCE_RADIUS {
                -dir * ctx.speed
            } else {
                dir * ctx.speed
            }
        }
        Behavior::Orbit => {
            let tangent = Vec2::new(-dir.y, dir.x);
            tangent * ctx.speed + dir * ((dist - ORBIT_RADIUS) * ORBIT_CORRECTION)
        }
        Behavior::DashAttack(DashState::Charging { remaining }) => {
            let remaining = remaining - ctx.dt;
            behavior = if remaining <= 0.0 {
                Behavior::DashAttack(DashState::Idle)
            } else {
                Behavior::DashAttack(DashState::Charging { remaining })
            };
            velocity * DASH_CHARGE_ACCEL
        }
        Behavior::DashAttack(DashState::Idle) => {
            // The trigger tick still steers by seek; only the velocity locks.
            if dist < DASH_TRIGGER_RANGE && ctx.roll < DASH_TRIGGER_CHANCE {
                velocity = dir * DASH_CHARGE_SPEED;
                behavior = Behavior::DashAttack(DashState::Charging {
                    remaining: DASH_CHARGE_TICKS,
                });
            }
            dir * ctx.speed
        }
        Behavior::Flock => {
            let mut desired = dir * ctx.speed;
            if let Some(squad) = ctx.squad {
                desired += (squad.avg_velocity - velocity) * FLOCK_ALIGNMENT_WEIGHT;
                let to_center = squad.centroid - ctx.position;
                desired += to_center.normalize_or_zero() * ctx.speed * FLOCK_COHESION_WEIGHT;
            }
            desired
        }
        Behavior::Seek | Behavior::Segment { .. } | Behavior::Dreadnought => dir * ctx.speed,
    };

    velocity += (desired + ctx.separation - velocity) * STEERING_FACTOR;

    let max_speed = if is_charging(behavior) {
        CHARGE_MAX_SPEED
    } else {
        ctx.speed * MAX_SPEED_MULT
    };
    velocity = velocity.clamp_length_max(max_speed);

    SteeringUpdate {
        velocity,
        behavior,
        behavior_changed: behavior != ctx.behavior,
    }
}

pub fn is_charging(behavior: Behavior) -> bool {
    matches!(behavior, Behavior::DashAttack(DashState::Charging { .. }))
}

/// Separation push away from crowding neighbors.
///
/// Neighbors within `size * 3.5` contribute with linear falloff; the sum is
/// normalized and scaled to `speed * 2.5`. Coincident neighbors are skipped.
pub fn separation(
    position: Vec2,
    size: f32,
    speed: f32,
    neighbors: impl IntoIterator<Item = Vec2>,
) -> Vec2 {
    let radius = size * SEPARATION_RADIUS_MULT;
    let radius_sq = radius * radius;
    let mut push = Vec2::ZERO;
    let mut count = 0;

    for other in neighbors {
        let offset = position - other;
        let d_sq = offset.length_squared();
        if d_sq < radius_sq && d_sq > 0.001 {
            let d = d_sq.sqrt();
            push += offset / d * ((radius - d) / radius);
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    push.normalize_or_zero() * speed * SEPARATION_WEIGHT
}

/// Boss drift: accelerate gently toward the target, then damp.
pub fn dreadnought_drift(position: Vec2, velocity: Vec2, target: Vec2) -> Vec2 {
    let dir = (target - position).normalize_or_zero();
    (velocity + dir * BOSS_DRIFT_ACCEL) * BOSS_DAMPING
}

/// World position of a module offset on a rotated hull.
pub fn module_world_position(center: Vec2, offset: Vec2, rotation: f32) -> Vec2 {
    center + Vec2::from_angle(rotation).rotate(offset)
}

/// Next position and facing for a snake segment trailing its parent.
///
/// Returns `None` when the segment is already close enough.
pub fn segment_follow(
    position: Vec2,
    size: f32,
    parent_position: Vec2,
    parent_size: f32,
) -> Option<(Vec2, f32)> {
    let to_parent = parent_position - position;
    let dist = to_parent.length();
    let spacing = size + parent_size - SNAKE_SPACING_SLACK;
    if dist <= spacing {
        return None;
    }
    let angle = to_parent.y.atan2(to_parent.x);
    let slot = parent_position - Vec2::from_angle(angle) * spacing;
    Some((position + (slot - position) * SNAKE_FOLLOW_RATE, angle))
}
