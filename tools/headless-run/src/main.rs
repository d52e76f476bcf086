//! headless-run: drive a RIFTSTORM run without a renderer.
//!
//! Usage:
//!   headless-run --ticks 36000 --seed 7 --hull bastion
//!   headless-run --config sim.json --hud

use std::path::{Path, PathBuf};
use std::process;

use riftstorm_core::commands::HostCommand;
use riftstorm_core::config::SimConfig;
use riftstorm_core::enums::HullType;
use riftstorm_core::events::{EventLog, SimEvent};
use riftstorm_sim::systems::snapshot;
use riftstorm_sim::GameState;

const VIEWPORT: (f32, f32) = (1920.0, 1080.0);

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let ticks = parse_value(&args, "--ticks", 18_000u64);
    let hull = match parse_flag(&args, "--hull").map(parse_hull) {
        Some(Some(hull)) => hull,
        Some(None) => {
            eprintln!("Error: --hull must be one of interceptor, bastion, architect");
            process::exit(1);
        }
        None => HullType::default(),
    };

    let mut config = match parse_flag(&args, "--config") {
        Some(path) => load_config(&PathBuf::from(path)),
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_flag(&args, "--seed") {
        config.seed = match seed.parse() {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("Error: invalid --seed {seed}: {e}");
                process::exit(1);
            }
        };
    }

    let mut state = match GameState::with_config(config, VIEWPORT.0, VIEWPORT.1) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut log = EventLog::muted();
    state.apply_command(HostCommand::StartRun { hull }, &mut log);
    state.apply_command(HostCommand::SetAutoPilot { enabled: true }, &mut log);

    let mut bosses = 0usize;
    for _ in 0..ticks {
        if let Some(option) = state.pending_upgrades.first() {
            let id = option.id;
            tracing::debug!(?id, level = state.player.level, "auto-selecting upgrade");
            state.apply_command(HostCommand::SelectUpgrade { id }, &mut log);
        }
        state.tick(&mut log);
        for event in log.drain() {
            if let SimEvent::BossSpawn { name } = event {
                bosses += 1;
                tracing::info!(%name, frame = state.time.frame, "boss encounter");
            }
        }
        if state.game_over {
            break;
        }
    }

    tracing::info!(
        frames = state.time.frame,
        bosses,
        game_over = state.game_over,
        "headless run finished"
    );

    let output = if args.iter().any(|a| a == "--hud") {
        serde_json::to_string_pretty(&state.hud())
    } else {
        serde_json::to_string_pretty(&snapshot::run_summary(&state))
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn print_usage() {
    eprintln!(
        "headless-run: RIFTSTORM auto-pilot soak runner\n\
         \n\
         Options:\n\
         \n\
           --ticks <N>        Ticks to simulate (default: 18000, five minutes)\n\
           --seed <N>         RNG seed, overrides the config file\n\
           --hull <name>      interceptor | bastion | architect\n\
           --config <path>    JSON SimConfig file\n\
           --hud              Print the final HUD view instead of the run summary\n\
         \n\
         Logging honours RUST_LOG; set LOG_FORMAT=json for JSON lines on stderr.\n"
    );
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_value<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    parse_flag(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_hull(name: &str) -> Option<HullType> {
    match name.to_ascii_lowercase().as_str() {
        "interceptor" => Some(HullType::Interceptor),
        "bastion" => Some(HullType::Bastion),
        "architect" => Some(HullType::Architect),
        _ => None,
    }
}

fn load_config(path: &Path) -> SimConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        }
    };
    match SimConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error in {}: {e}", path.display());
            process::exit(1);
        }
    }
}
