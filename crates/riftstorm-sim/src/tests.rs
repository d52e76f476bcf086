//! Tests for the simulation engine, combat resolution, the wave director and
//! progression.

use riftstorm_core::commands::HostCommand;
use riftstorm_core::components::*;
use riftstorm_core::config::{PoolLimits, SimConfig};
use riftstorm_core::constants::*;
use riftstorm_core::enums::*;
use riftstorm_core::events::{EventLog, NoopCallbacks, SimEvent};
use riftstorm_core::types::Vec2;

use riftstorm_steering::profiles::get_profile;

use crate::engine::{next_quota, rebuild_grid, GameState};
use crate::systems::{combat, director, foes, progression};
use crate::upgrades::{self, Applied};
use crate::world_setup;

fn running_state() -> GameState {
    let mut state = GameState::new(1280.0, 720.0);
    state.start_run(HullType::Interceptor);
    state
}

fn place_foe(state: &mut GameState, kind: FoeKind, pos: Vec2, hp: f32) -> FoeId {
    let id = world_setup::setup_foe(state, kind, pos, false).unwrap();
    let foe = state.foes.get_mut(id).unwrap();
    foe.hp = hp;
    foe.max_hp = hp;
    id
}

fn fire_at(state: &mut GameState, pos: Vec2, damage: f32) -> ProjectileId {
    let id = state.projectiles.acquire().unwrap();
    let shot = state.projectiles.get_mut(id).unwrap();
    shot.body.pos = pos;
    shot.body.vel = Vec2::new(0.1, 0.0);
    shot.faction = Faction::Player;
    shot.damage = damage;
    shot.life = 60.0;
    shot.max_life = 60.0;
    shot.size = 4.0;
    id
}

/// Tick with the auto-pilot on, taking the first offered upgrade whenever a
/// level-up pauses the run.
fn run_autopilot(state: &mut GameState, log: &mut EventLog, ticks: u32) {
    for _ in 0..ticks {
        if let Some(option) = state.pending_upgrades.first() {
            let id = option.id;
            state.select_upgrade(id, log);
        }
        state.tick(log);
    }
}

const FAR: Vec2 = Vec2::new(500.0, 500.0);

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut a = GameState::new(1280.0, 720.0);
    let mut b = GameState::new(1280.0, 720.0);
    let mut log_a = EventLog::muted();
    let mut log_b = EventLog::muted();
    for state in [&mut a, &mut b] {
        state.start_run(HullType::Bastion);
        state.auto_pilot = true;
    }

    for _ in 0..600 {
        run_autopilot(&mut a, &mut log_a, 1);
        run_autopilot(&mut b, &mut log_b, 1);
        let json_a = serde_json::to_string(&a.hud()).unwrap();
        let json_b = serde_json::to_string(&b.hud()).unwrap();
        assert_eq!(json_a, json_b, "HUD diverged with same seed");
    }
    assert_eq!(log_a.events, log_b.events);
}

#[test]
fn test_determinism_different_seeds() {
    let a = GameState::with_config(SimConfig { seed: 111, ..Default::default() }, 1280.0, 720.0)
        .unwrap();
    let b = GameState::with_config(SimConfig { seed: 222, ..Default::default() }, 1280.0, 720.0)
        .unwrap();
    let stars_a = serde_json::to_string(&a.stars).unwrap();
    let stars_b = serde_json::to_string(&b.stars).unwrap();
    assert_ne!(stars_a, stars_b, "different seeds should give different backdrops");
}

// ---- Run lifecycle ----

#[test]
fn test_new_state_is_idle() {
    let mut state = GameState::new(1280.0, 720.0);
    state.tick(&mut NoopCallbacks);
    assert_eq!(state.time.frame, 0, "idle aggregate must not advance");
    assert!(!state.active);
}

#[test]
fn test_start_run_resets() {
    let mut state = running_state();
    place_foe(&mut state, FoeKind::Chaser, FAR, 10.0);
    state.score = 999;
    state.wave = 4;

    state.start_run(HullType::Architect);
    assert_eq!(state.foes.live_count(), 0);
    assert_eq!(state.score, 0);
    assert_eq!(state.wave, 1);
    assert_eq!(state.wave_quota, INITIAL_WAVE_QUOTA);
    assert_eq!(state.player.hull, HullType::Architect);
    assert_eq!(state.player.hp, state.player.max_hp);
    assert_eq!(state.orbitals.len(), state.player.stats.orbitals as usize);
}

#[test]
fn test_pause_stops_simulation() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.tick(&mut log);
    let frame = state.time.frame;

    state.apply_command(HostCommand::Pause, &mut log);
    for _ in 0..10 {
        state.tick(&mut log);
    }
    assert_eq!(state.time.frame, frame);

    state.apply_command(HostCommand::Resume, &mut log);
    state.tick(&mut log);
    assert_eq!(state.time.frame, frame + 1);
}

#[test]
fn test_set_time_scale_sanitized() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.apply_command(HostCommand::SetTimeScale { scale: f32::NAN }, &mut log);
    assert_eq!(state.time_scale, 1.0);
    state.apply_command(HostCommand::SetTimeScale { scale: 5.0 }, &mut log);
    assert_eq!(state.time_scale, MAX_TIME_SCALE);
    state.apply_command(HostCommand::SetTimeScale { scale: -1.0 }, &mut log);
    assert_eq!(state.time_scale, 0.0);
}

#[test]
fn test_chrono_slows_world_not_player() {
    let mut state = running_state();
    state.player.skill_q.active = true;
    state.player.skill_q.duration = 100.0;
    state.tick(&mut NoopCallbacks);
    assert_eq!(state.player_time_scale, 1.0);
    assert!((state.world_time_scale - CHRONO_TIME_FACTOR).abs() < 1e-6);
}

#[test]
fn test_hit_stop_freezes_shake_and_clock() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.shake = 10.0;
    state.hit_stop = 2;

    state.tick(&mut log);
    assert_eq!(state.hit_stop, 1);
    assert_eq!(state.shake, 10.0);
    assert_eq!(state.time.frame, 0);

    state.tick(&mut log);
    state.tick(&mut log);
    assert_eq!(state.hit_stop, 0);
    assert!(state.shake < 10.0);
    assert_eq!(state.time.frame, 1);
}

// ---- Combat ----

#[test]
fn test_shot_kills_foe_once_and_frees_slot() {
    let mut state = running_state();
    let mut log = EventLog::default();
    let foe = place_foe(&mut state, FoeKind::Chaser, FAR, 15.0);
    let reward = state.foes.get(foe).unwrap().score;
    let shot = fire_at(&mut state, FAR, 20.0);

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    assert!(state.foes.get(foe).unwrap().dead);
    assert!(!state.projectiles.contains(shot), "non-piercing shot is spent");
    assert_eq!(state.score, reward);
    assert_eq!(state.wave_kills, 1);
    assert_eq!(state.combo, 1);

    // A second kill attempt is ignored.
    combat::kill_foe(&mut state, &mut log, foe, Vec2::ZERO);
    assert_eq!(state.score, reward);
    assert_eq!(state.wave_kills, 1);

    crate::systems::cleanup::run(&mut state);
    assert!(!state.foes.contains(foe));
    assert_eq!(state.foes.live_count(), 0);
}

#[test]
fn test_pierce_hits_one_more_than_pierce_count() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let ids: Vec<FoeId> = (0..4)
        .map(|_| place_foe(&mut state, FoeKind::Tank, FAR, 1000.0))
        .collect();
    let shot = fire_at(&mut state, FAR, 20.0);
    state.projectiles.get_mut(shot).unwrap().pierce = 2;

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    let damaged = ids
        .iter()
        .filter(|&&id| state.foes.get(id).unwrap().hp < 1000.0)
        .count();
    assert_eq!(damaged, 3);
    assert!(!state.projectiles.contains(shot));
    assert_eq!(state.damage_this_tick, 60.0);
}

#[test]
fn test_piercing_shot_does_not_rehit_same_foe() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let foe = place_foe(&mut state, FoeKind::Tank, FAR, 1000.0);
    let shot = fire_at(&mut state, FAR, 20.0);
    state.projectiles.get_mut(shot).unwrap().pierce = 5;

    rebuild_grid(&mut state);
    for _ in 0..3 {
        combat::run(&mut state, &mut log);
    }
    assert_eq!(state.foes.get(foe).unwrap().hp, 980.0);
    assert_eq!(state.projectiles.get(shot).unwrap().pierce, 4);
}

#[test]
fn test_explosive_blast_splashes_struck_foe_and_neighbors() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let target = place_foe(&mut state, FoeKind::Tank, FAR, 1000.0);
    let bystander = place_foe(&mut state, FoeKind::Chaser, FAR + Vec2::new(60.0, 0.0), 5.0);
    let shot = fire_at(&mut state, FAR, 20.0);
    state.projectiles.get_mut(shot).unwrap().explosive = 1;

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    // Direct hit plus half damage from the blast.
    assert_eq!(state.foes.get(target).unwrap().hp, 970.0);
    assert!(state.foes.get(bystander).unwrap().dead);
    assert_eq!(state.damage_this_tick, 40.0);
}

#[test]
fn test_wall_bounce_reflects_and_refreshes_life() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let bouncy = fire_at(&mut state, Vec2::new(5.0, 500.0), 10.0);
    {
        let p = state.projectiles.get_mut(bouncy).unwrap();
        p.body.vel = Vec2::new(-10.0, 0.0);
        p.bounce = 1;
        p.life = 30.0;
    }
    let plain = fire_at(&mut state, Vec2::new(5.0, 900.0), 10.0);
    state.projectiles.get_mut(plain).unwrap().body.vel = Vec2::new(-10.0, 0.0);

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    let p = state.projectiles.get(bouncy).unwrap();
    assert_eq!(p.body.vel, Vec2::new(10.0, 0.0));
    assert_eq!(p.bounce, 0);
    assert_eq!(p.life, p.max_life);
    assert!(!state.projectiles.contains(plain), "no bounce left, the shot expires");
}

#[test]
fn test_bounce_on_hit_leaves_foe_at_fixed_speed() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let foe = place_foe(&mut state, FoeKind::Tank, FAR, 1000.0);
    let shot = fire_at(&mut state, FAR - Vec2::new(5.0, 0.0), 20.0);
    state.projectiles.get_mut(shot).unwrap().bounce = 1;

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    assert_eq!(state.foes.get(foe).unwrap().hp, 980.0);
    let p = state.projectiles.get(shot).unwrap();
    assert_eq!(p.bounce, 0);
    assert!((p.body.vel.length() - BOUNCE_SPEED).abs() < 1e-4);
    assert!(p.body.vel.x < 0.0, "leaves away from the foe");
}

#[test]
fn test_homing_turns_toward_nearest_foe_keeping_speed() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    place_foe(&mut state, FoeKind::Tank, FAR + Vec2::new(0.0, 200.0), 1000.0);
    place_foe(&mut state, FoeKind::Tank, FAR - Vec2::new(0.0, 350.0), 1000.0);
    let shot = fire_at(&mut state, FAR, 5.0);
    {
        let p = state.projectiles.get_mut(shot).unwrap();
        p.body.vel = Vec2::new(10.0, 0.0);
        p.homing = 1.0;
    }

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    let vel = state.projectiles.get(shot).unwrap().body.vel;
    assert!(vel.y > 0.0, "turns toward the closer foe below");
    assert!((vel.length() - 10.0).abs() < 1e-3);
}

#[test]
fn test_split_spawns_two_children() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    place_foe(&mut state, FoeKind::Tank, FAR, 1000.0);
    let shot = fire_at(&mut state, FAR, 20.0);
    state.projectiles.get_mut(shot).unwrap().split = 1;

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    let children: Vec<&Projectile> = state.projectiles.iter().map(|(_, p)| p).collect();
    assert_eq!(children.len(), 2);
    for child in children {
        assert_eq!(child.generation, 1);
        assert_eq!(child.damage, 20.0 * SPLIT_DAMAGE_MULT);
        assert_eq!(child.struck.len(), 1, "children must not re-hit the split target");
    }
}

#[test]
fn test_burn_refresh_keeps_strongest() {
    let mut foe = Foe::default();
    combat::apply_status(&mut foe, StatusKind::Burn, 4.0, 3.0);
    combat::apply_status(&mut foe, StatusKind::Burn, 2.0, 1.0);
    assert_eq!(foe.statuses.len(), 1);
    assert_eq!(foe.statuses[0].power, 4.0);
    assert_eq!(foe.statuses[0].duration, 3.0);

    combat::apply_status(&mut foe, StatusKind::Burn, 6.0, 2.0);
    assert_eq!(foe.statuses[0].power, 6.0);
    assert_eq!(foe.statuses[0].duration, 3.0);

    combat::apply_status(&mut foe, StatusKind::Freeze, 0.0, 1.0);
    assert_eq!(foe.statuses.len(), 2);
    assert!(foe.is_frozen());
}

#[test]
fn test_burn_tick_counts_as_damage() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let id = place_foe(&mut state, FoeKind::Tank, FAR, 100.0);
    {
        let foe = state.foes.get_mut(id).unwrap();
        combat::apply_status(foe, StatusKind::Burn, 5.0, 3.0);
        foe.statuses[0].timer = BURN_TICK_PERIOD - 1.0;
    }

    rebuild_grid(&mut state);
    foes::run(&mut state, &mut log);

    let foe = state.foes.get(id).unwrap();
    assert_eq!(foe.hp, 95.0);
    assert_eq!(state.damage_this_tick, 5.0);
    assert!(foe.statuses[0].duration < 3.0);
}

#[test]
fn test_freeze_halves_movement() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let start_free = Vec2::new(500.0, 500.0);
    let start_frozen = Vec2::new(3500.0, 500.0);
    let free = place_foe(&mut state, FoeKind::Chaser, start_free, 100.0);
    let frozen = place_foe(&mut state, FoeKind::Chaser, start_frozen, 100.0);
    combat::apply_status(
        state.foes.get_mut(frozen).unwrap(),
        StatusKind::Freeze,
        0.0,
        FREEZE_BASE_SECS,
    );

    rebuild_grid(&mut state);
    foes::run(&mut state, &mut log);

    let moved_free = state.foes.get(free).unwrap().body.pos.distance(start_free);
    let moved_frozen = state.foes.get(frozen).unwrap().body.pos.distance(start_frozen);
    assert!(moved_free > 0.0);
    assert!((moved_frozen - moved_free * FREEZE_SPEED_MULT).abs() < 1e-4);
}

#[test]
fn test_chain_lightning_hops_to_nearest_and_schedules() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let origin = place_foe(&mut state, FoeKind::Tank, FAR, 100.0);
    let near = place_foe(&mut state, FoeKind::Tank, FAR + Vec2::new(50.0, 0.0), 100.0);
    let far = place_foe(&mut state, FoeKind::Tank, FAR + Vec2::new(150.0, 0.0), 100.0);

    rebuild_grid(&mut state);
    combat::chain_lightning(&mut state, &mut log, origin, 10.0, 2, CHAIN_RANGE, Vec::new());

    assert_eq!(state.foes.get(origin).unwrap().hp, 100.0);
    assert_eq!(state.foes.get(near).unwrap().hp, 90.0);
    assert_eq!(state.foes.get(far).unwrap().hp, 100.0);
    assert_eq!(state.delayed.len(), 1);
}

#[test]
fn test_ultimate_damages_foes_in_range() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let center = state.player.body.pos;
    let close = place_foe(&mut state, FoeKind::Tank, center + Vec2::new(300.0, 0.0), 1000.0);
    let distant = place_foe(&mut state, FoeKind::Tank, center + Vec2::new(1500.0, 0.0), 1000.0);

    combat::ultimate(&mut state, &mut log);
    assert_eq!(state.foes.get(close).unwrap().hp, 1000.0 - ULTIMATE_DAMAGE);
    assert_eq!(state.foes.get(distant).unwrap().hp, 1000.0);
}

#[test]
fn test_player_invulnerable_after_hit() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let hp = state.player.hp;
    let from = state.player.body.pos + Vec2::X;
    assert!(combat::damage_player(&mut state, &mut log, 10.0, from));
    assert!(!combat::damage_player(&mut state, &mut log, 10.0, from));
    assert_eq!(state.player.hp, hp - 10.0);
    assert_eq!(state.combo, 0);
    assert_eq!(state.hit_stop, HIT_STOP_PLAYER_HIT);
}

#[test]
fn test_game_over_fires_once() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.player.hp = 5.0;
    let from = state.player.body.pos + Vec2::X;

    assert!(combat::damage_player(&mut state, &mut log, 10.0, from));
    state.player.invuln = 0.0;
    assert!(!combat::damage_player(&mut state, &mut log, 10.0, from));

    assert!(state.game_over);
    assert!(!state.active);
    assert_eq!(state.player.hp, 0.0);
    assert_eq!(log.game_overs(), 1);
    assert!(state.hud().game_over);
}

#[test]
fn test_contact_ends_run_with_matching_summary() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.player.hp = 10.0;
    state.score = 700;
    let pos = state.player.body.pos;
    let foe = place_foe(&mut state, FoeKind::Chaser, pos, 15.0);
    assert_eq!(combat::contact_damage(state.foes.get(foe).unwrap()), CONTACT_DAMAGE);

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    assert_eq!(state.player.hp, 0.0);
    let summaries: Vec<_> = log
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::GameOver { summary } => Some(summary),
            _ => None,
        })
        .collect();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].score, 700);
    assert_eq!(summaries[0].wave, state.wave);
    assert_eq!(summaries[0].level, state.player.level);
}

#[test]
fn test_hostile_shot_hits_only_player() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let bystander = place_foe(&mut state, FoeKind::Tank, FAR, 100.0);
    let target = state.player.body.pos;
    let hp = state.player.hp;
    world_setup::spawn_hostile_shot(&mut state, FAR, FAR + Vec2::X, 10.0).unwrap();
    world_setup::spawn_hostile_shot(&mut state, target, target + Vec2::X, 10.0).unwrap();

    rebuild_grid(&mut state);
    combat::run(&mut state, &mut log);

    assert_eq!(state.foes.get(bystander).unwrap().hp, 100.0);
    assert_eq!(state.player.hp, hp - 10.0);
    assert_eq!(state.projectiles.live_count(), 1);
}

// ---- Spawning ----

#[test]
fn test_snake_segments_chain_to_previous() {
    let mut state = running_state();
    let head = world_setup::spawn_foe(&mut state, FoeKind::SnakeHead, FAR).unwrap();
    assert_eq!(state.foes.live_count(), 1 + SNAKE_SEGMENTS as usize);

    let mut expected_parent = head;
    for &id in &state.foes.live()[1..] {
        match state.foes.get(id).unwrap().behavior {
            Behavior::Segment { parent, .. } => assert_eq!(parent, expected_parent),
            other => panic!("expected segment, got {other:?}"),
        }
        expected_parent = id;
    }
}

#[test]
fn test_orphaned_segment_dies() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let head = world_setup::spawn_foe(&mut state, FoeKind::SnakeHead, FAR).unwrap();
    let first_segment = state.foes.live()[1];
    combat::kill_foe(&mut state, &mut log, head, Vec2::ZERO);

    rebuild_grid(&mut state);
    foes::run(&mut state, &mut log);
    assert!(state.foes.get(first_segment).unwrap().dead);
}

#[test]
fn test_squad_has_elite_protector() {
    let mut state = running_state();
    let leader = world_setup::spawn_squad(&mut state, FoeKind::Chaser, 3, Formation::V).unwrap();
    let tag = state.foes.get(leader).unwrap().squad.unwrap();
    assert_eq!(tag.role, SquadRole::Protector);
    assert!(state.foes.get(leader).unwrap().elite);

    let flankers = state
        .foes
        .iter()
        .filter(|(_, f)| f.squad == Some(SquadTag { id: tag.id, role: SquadRole::Flanker }))
        .count();
    assert_eq!(flankers, 3);
}

#[test]
fn test_squad_leader_without_elite_roll_keeps_base_stats() {
    let mut state = running_state();
    // Wave 0 has no elite chance, so the roll always fails.
    state.wave = 0;
    let leader = world_setup::spawn_squad(&mut state, FoeKind::Chaser, 2, Formation::Line).unwrap();
    let profile = get_profile(FoeKind::Chaser);
    let foe = state.foes.get(leader).unwrap();

    assert!(foe.elite);
    assert_eq!(foe.color, ELITE_COLOR);
    assert_eq!(foe.hp, profile.hp_at(0) * SQUAD_LEADER_HP_MULT);
    assert_eq!(foe.size, profile.size * SQUAD_LEADER_SIZE_MULT);
    assert_eq!(foe.xp, profile.xp);
}

#[test]
fn test_elite_chance_capped() {
    assert!((world_setup::elite_chance(1) - ELITE_CHANCE_PER_WAVE).abs() < 1e-6);
    assert_eq!(world_setup::elite_chance(1000), ELITE_MAX_CHANCE);
}

#[test]
fn test_splitter_bursts_into_chasers() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let splitter = place_foe(&mut state, FoeKind::Splitter, FAR, 1.0);
    combat::kill_foe(&mut state, &mut log, splitter, Vec2::ZERO);
    let chasers = state
        .foes
        .iter()
        .filter(|(_, f)| f.kind == FoeKind::Chaser && f.is_live())
        .count();
    assert_eq!(chasers, 2);
}

// ---- Director ----

#[test]
fn test_next_quota() {
    assert_eq!(next_quota(10, 1.3), 13);
    assert_eq!(next_quota(13, 1.3), 16);
    assert_eq!(next_quota(3, 1.1), 3, "quota never shrinks");
}

#[test]
fn test_spawn_interval_floor() {
    assert!((director::spawn_interval(1) - 57.0).abs() < 1e-3);
    assert_eq!(director::spawn_interval(200), SPAWN_MIN_INTERVAL);
}

#[test]
fn test_director_spawns_over_time() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    for _ in 0..200 {
        state.tick(&mut log);
    }
    assert!(state.foes.live_count() > 0);
    assert_eq!(state.director_phase(), DirectorPhase::Spawning);
}

#[test]
fn test_boss_spawns_at_quota() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.wave_kills = state.wave_quota;

    director::run(&mut state, &mut log);

    assert!(state.boss_active);
    assert!(state.arena.active);
    assert!(state.boss().is_some());
    assert_eq!(state.director_phase(), DirectorPhase::BossActive);
    assert_eq!(log.count(|e| matches!(e, SimEvent::BossSpawn { .. })), 1);

    let hud = state.hud();
    let boss = hud.boss.unwrap();
    assert!(!boss.name.is_empty());
    assert_eq!(boss.hp, boss.max_hp);

    // Regular spawning is suspended during the fight.
    let live = state.foes.live_count();
    for _ in 0..200 {
        director::run(&mut state, &mut log);
    }
    assert_eq!(state.foes.live_count(), live);
}

#[test]
fn test_boss_evicts_oldest_when_pool_full() {
    let mut config = SimConfig::default();
    config.pools.foes = PoolLimits { initial: 4, max: 4 };
    let mut state = GameState::with_config(config, 1280.0, 720.0).unwrap();
    state.start_run(HullType::Interceptor);
    let mut log = EventLog::muted();

    let oldest = place_foe(&mut state, FoeKind::Chaser, FAR, 10.0);
    for _ in 0..3 {
        place_foe(&mut state, FoeKind::Chaser, FAR, 10.0);
    }
    assert_eq!(state.foes.available(), 0);

    assert!(world_setup::spawn_boss(&mut state, &mut log));
    assert!(!state.foes.contains(oldest));
    assert!(state.boss().is_some());
}

#[test]
fn test_boss_flag_resets_without_boss_foe() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    place_foe(&mut state, FoeKind::Chaser, FAR, 10.0);
    state.boss_active = true;
    state.arena.active = true;

    rebuild_grid(&mut state);
    foes::run(&mut state, &mut log);

    assert!(!state.boss_active);
    assert!(!state.arena.active);
}

#[test]
fn test_boss_spawn_clears_foes_inside_arena() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    let center = state.player.body.pos;
    let inside = place_foe(&mut state, FoeKind::Chaser, center + Vec2::new(300.0, 0.0), 10.0);
    let outside = place_foe(&mut state, FoeKind::Chaser, Vec2::new(100.0, 100.0), 10.0);
    assert!(Vec2::new(100.0, 100.0).distance(center) > ARENA_RADIUS);

    assert!(world_setup::spawn_boss(&mut state, &mut log));

    assert!(state.foes.get(inside).unwrap().dead);
    assert!(state.foes.get(outside).unwrap().is_live());
    assert_eq!(state.arena.center, center);
}

#[test]
fn test_boss_death_starts_warp_and_advances_sector() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    assert!(world_setup::spawn_boss(&mut state, &mut log));
    let minion = place_foe(&mut state, FoeKind::Chaser, FAR, 10.0);
    let boss = state.boss().unwrap();
    let quota = state.wave_quota;

    combat::kill_foe(&mut state, &mut log, boss, Vec2::ZERO);

    assert!(!state.boss_active);
    assert!(!state.arena.active);
    assert!(state.warp.active);
    assert_eq!(state.warp.stage, WarpStage::Charge);
    assert_eq!(state.hit_stop, HIT_STOP_BOSS_KILL);
    assert_eq!(state.director_phase(), DirectorPhase::Warping);
    assert!(state.foes.get(minion).unwrap().dead);
    assert_eq!(log.count(|e| matches!(e, SimEvent::BossCleared)), 1);
    assert_eq!(state.wave_kills, 0, "boss kills do not count toward the quota");

    let ticks = (WARP_CHARGE_TICKS + WARP_JUMP_TICKS) as u32;
    for _ in 0..ticks {
        director::run(&mut state, &mut log);
    }
    assert_eq!(state.warp.stage, WarpStage::Arrival);
    assert_eq!(state.wave, 2);
    assert_eq!(state.wave_kills, 0);
    assert_eq!(state.wave_quota, next_quota(quota, QUOTA_MULTIPLIER));
    assert_eq!(state.wave_type, WaveType::for_wave(2));

    for _ in 0..WARP_ARRIVAL_TICKS as u32 {
        director::run(&mut state, &mut log);
    }
    assert!(!state.warp.active);
    assert_eq!(state.director_phase(), DirectorPhase::Spawning);
}

// ---- Progression ----

#[test]
fn test_level_up_pauses_until_choice() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.player.xp = XP_BASE + 5.0;

    progression::run(&mut state, &mut log);

    assert_eq!(state.player.level, 2);
    assert_eq!(state.player.xp, 5.0);
    assert_eq!(state.player.xp_to_next, 70.0);
    assert!(state.paused);
    assert_eq!(state.pending_upgrades.len(), LEVEL_UP_OPTIONS);
    assert_eq!(log.last_level_up().map(<[_]>::len), Some(LEVEL_UP_OPTIONS));

    state.apply_command(HostCommand::Resume, &mut log);
    assert!(state.paused, "resume is blocked while a choice is pending");

    let offered = state.pending_upgrades[0].id;
    let not_offered = [UpgradeId::EvoVoid, UpgradeId::EvoRailgun, UpgradeId::EvoShotgun]
        .into_iter()
        .find(|id| state.pending_upgrades.iter().all(|o| o.id != *id))
        .unwrap();
    assert!(!state.select_upgrade(not_offered, &mut log));
    assert!(state.select_upgrade(offered, &mut log));
    assert!(!state.paused);
    assert!(state.pending_upgrades.is_empty());
}

#[test]
fn test_roll_options_offers_evolution_first() {
    let mut state = running_state();
    state.player.stats.multishot = 3;
    let options = upgrades::roll_options(&mut state.rng, &state.player, &state.upgrade_stacks);
    assert_eq!(options.len(), LEVEL_UP_OPTIONS);
    assert_eq!(options[0].id, UpgradeId::EvoShotgun);
    assert_eq!(options[0].kind, UpgradeKind::Weapon);

    let mut ids: Vec<UpgradeId> = options.iter().map(|o| o.id).collect();
    ids.sort_by_key(|id| *id as u32);
    ids.dedup();
    assert_eq!(ids.len(), options.len(), "options must be distinct");
}

#[test]
fn test_roll_options_skips_maxed_upgrades() {
    let mut state = running_state();
    for def in &upgrades::UPGRADES[2..] {
        state.upgrade_stacks.insert(def.id, def.max_stack);
    }
    let options = upgrades::roll_options(&mut state.rng, &state.player, &state.upgrade_stacks);
    assert_eq!(options.len(), 2);
    assert!(options
        .iter()
        .all(|o| o.id == upgrades::UPGRADES[0].id || o.id == upgrades::UPGRADES[1].id));
}

#[test]
fn test_evolution_replaces_weapon() {
    let mut state = running_state();
    let mut log = EventLog::default();
    state.pending_upgrades = vec![riftstorm_core::state::UpgradeOption {
        id: UpgradeId::EvoRailgun,
        kind: UpgradeKind::Weapon,
        name: String::new(),
        description: String::new(),
        current_stack: 0,
    }];
    assert!(state.select_upgrade(UpgradeId::EvoRailgun, &mut log));
    assert_eq!(state.player.weapon, WeaponId::Railgun);
    assert!(state.upgrade_stacks.is_empty());
    assert_eq!(log.count(|e| matches!(e, SimEvent::WeaponEvolve { .. })), 1);
}

#[test]
fn test_apply_stat_upgrades() {
    let mut player = Player::default();
    let mut orbitals = Vec::new();
    let mut stacks = std::collections::BTreeMap::new();

    assert_eq!(
        upgrades::apply_upgrade(UpgradeId::Orbital, &mut player, &mut orbitals, &mut stacks),
        Applied::Stat
    );
    upgrades::apply_upgrade(UpgradeId::Orbital, &mut player, &mut orbitals, &mut stacks);
    upgrades::apply_upgrade(UpgradeId::Bounce, &mut player, &mut orbitals, &mut stacks);
    upgrades::apply_upgrade(UpgradeId::ElemVolt, &mut player, &mut orbitals, &mut stacks);

    assert_eq!(orbitals.len(), 2);
    assert!((orbitals[1].angle - std::f32::consts::PI).abs() < 1e-5);
    assert_eq!(player.stats.orbitals, 2);
    assert_eq!(player.stats.bounce, 1);
    assert_eq!(player.stats.elemental.volt, 1);
    assert_eq!(stacks[&UpgradeId::Orbital], 2);
}

#[test]
fn test_dash_cooldown_upgrade_has_floor() {
    let mut player = Player::default();
    let mut orbitals = Vec::new();
    let mut stacks = std::collections::BTreeMap::new();
    for _ in 0..20 {
        upgrades::apply_upgrade(UpgradeId::DashCooldown, &mut player, &mut orbitals, &mut stacks);
    }
    assert_eq!(player.max_dash_cooldown, DASH_MIN_COOLDOWN);
}

// ---- HUD ----

#[test]
fn test_run_summary_lists_upgrades() {
    let mut state = running_state();
    state.upgrade_stacks.insert(UpgradeId::Damage, 2);
    state.score = 1234;
    let summary = crate::systems::snapshot::run_summary(&state);
    assert_eq!(summary.score, 1234);
    assert_eq!(summary.upgrades.len(), 1);
    assert_eq!(summary.upgrades[0].count, 2);
}

#[test]
fn test_hud_counts_match_pools() {
    let mut state = running_state();
    let mut log = EventLog::muted();
    state.auto_pilot = true;
    run_autopilot(&mut state, &mut log, 300);
    let hud = state.hud();
    assert_eq!(hud.live_foes, state.foes.live_count());
    assert_eq!(hud.live_projectiles, state.projectiles.live_count());
    assert!(hud.player.hp <= hud.player.max_hp);
    for (_, foe) in state.foes.iter() {
        assert!(foe.body.active || foe.dead);
    }
}
