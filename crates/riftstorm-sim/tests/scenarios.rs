use riftstorm_sim::core::commands::HostCommand;
use riftstorm_sim::core::config::SimConfig;
use riftstorm_sim::core::enums::*;
use riftstorm_sim::core::events::{EventLog, SimEvent};
use riftstorm_sim::core::types::Vec2;
use riftstorm_sim::world_setup;
use riftstorm_sim::GameState;

fn soak(seed: u64, hull: HullType, ticks: u32) -> (GameState, EventLog) {
    let config = SimConfig {
        seed,
        ..Default::default()
    };
    let mut state = GameState::with_config(config, 1920.0, 1080.0).unwrap();
    let mut log = EventLog::muted();
    state.apply_command(HostCommand::StartRun { hull }, &mut log);
    state.apply_command(HostCommand::SetAutoPilot { enabled: true }, &mut log);

    for _ in 0..ticks {
        if let Some(option) = state.pending_upgrades.first() {
            let id = option.id;
            state.apply_command(HostCommand::SelectUpgrade { id }, &mut log);
        }
        state.tick(&mut log);
        assert_invariants(&state);
        if state.game_over {
            break;
        }
    }
    (state, log)
}

fn assert_invariants(state: &GameState) {
    let hud = state.hud();
    assert!(hud.player.hp >= 0.0 && hud.player.hp <= hud.player.max_hp);
    assert!(hud.overdrive <= 100.0);
    assert!(state.foes.live_count() <= state.foes.capacity());
    assert!(state.projectiles.live_count() <= state.projectiles.capacity());
    if state.boss_active {
        assert!(!state.warp.active, "boss fight and warp never overlap");
    }
    for &h in state.foes.live() {
        assert!(state.foes.contains(h), "live-list holds only occupied slots");
    }
}

#[test]
fn autopilot_soak_holds_invariants() {
    for hull in [HullType::Interceptor, HullType::Bastion, HullType::Architect] {
        let (state, _) = soak(7, hull, 3_000);
        assert!(state.time.frame > 0);
    }
}

#[test]
fn same_seed_same_summary() {
    let (a, log_a) = soak(99, HullType::Bastion, 2_000);
    let (b, log_b) = soak(99, HullType::Bastion, 2_000);
    assert_eq!(
        serde_json::to_string(&a.hud()).unwrap(),
        serde_json::to_string(&b.hud()).unwrap()
    );
    assert_eq!(log_a.events, log_b.events);
}

#[test]
fn run_ends_with_one_game_over() {
    let mut state = GameState::new(1280.0, 720.0);
    let mut log = EventLog::muted();
    state.apply_command(HostCommand::StartRun { hull: HullType::Interceptor }, &mut log);
    state.player.hp = 1.0;

    // Park a tank on the player.
    let pos = state.player.body.pos;
    world_setup::setup_foe(&mut state, FoeKind::Tank, pos, false).unwrap();
    for _ in 0..10 {
        state.tick(&mut log);
    }

    assert!(state.game_over);
    assert_eq!(log.game_overs(), 1);
    let summary = log
        .events
        .iter()
        .find_map(|e| match e {
            SimEvent::GameOver { summary } => Some(summary.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(summary.hull, HullType::Interceptor);
    assert_eq!(summary.wave, 1);

    // Further ticks are inert.
    let frame = state.time.frame;
    state.tick(&mut log);
    assert_eq!(state.time.frame, frame);
}

#[test]
fn boss_fight_cycle_through_commands() {
    let mut state = GameState::new(1280.0, 720.0);
    let mut log = EventLog::muted();
    state.apply_command(HostCommand::StartRun { hull: HullType::Bastion }, &mut log);
    state.wave_kills = state.wave_quota;
    state.tick(&mut log);

    let hud = state.hud();
    assert_eq!(hud.phase, DirectorPhase::BossActive);
    let boss = hud.boss.expect("boss view while the fight is on");
    assert!(log
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::BossSpawn { name } if *name == boss.name)));
    assert!(state.arena.active);
    assert_eq!(state.arena.center, hud.player.pos);
}

#[test]
fn config_from_json_overrides_defaults() {
    let config = SimConfig::from_json(r#"{ "seed": 5, "initial_wave_quota": 3 }"#).unwrap();
    let mut state = GameState::with_config(config, 800.0, 600.0).unwrap();
    let mut log = EventLog::muted();
    state.apply_command(HostCommand::StartRun { hull: HullType::Interceptor }, &mut log);
    assert_eq!(state.wave_quota, 3);
    assert_eq!(state.config.seed, 5);

    assert!(SimConfig::from_json(r#"{ "cell_size": 0 }"#).is_err());
    assert!(SimConfig::from_json("not json").is_err());
}

#[test]
fn pointer_input_aims_and_fires() {
    let mut state = GameState::new(1280.0, 720.0);
    let mut log = EventLog::default();
    state.apply_command(HostCommand::StartRun { hull: HullType::Interceptor }, &mut log);
    state.input.pointer.down = true;
    state.input.pointer.screen = Vec2::new(1280.0, 360.0);
    state.tick(&mut log);

    assert!(state.projectiles.live_count() > 0);
    assert!(state.player.angle.abs() < 0.1, "aiming right of screen center");
    assert!(log
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Sound { sound: SoundId::Shoot, .. })));
}
