//! torpedo-replay: run a torpedo scenario headlessly and report what happened.
//!
//! Usage:
//!   torpedo-replay run [--scenario scenario.json] [--seed N] [--trace]
//!   torpedo-replay defaults > scenario.json

use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use torpedo_arena::{ArenaEngine, ArenaSnapshot, ScenarioConfig};
use torpedo_core::enums::{GuidanceState, ImpactCause};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "defaults" => cmd_defaults(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "torpedo-replay: headless torpedo guidance runner\n\
         \n\
         Commands:\n\
         \n\
         run       Run a scenario until the torpedo is destroyed\n\
         \n\
           --scenario <path>  JSON scenario (default: built-in demo)\n\
           --seed <N>         Override the scenario seed\n\
           --trace            Print every frame as a JSON line\n\
         \n\
         defaults  Print the built-in scenario as JSON\n\
         \n\
         Set RUST_LOG=debug for guidance diagnostics on stderr.\n"
    );
}

fn cmd_run(args: &[String]) -> Result<(), String> {
    let mut scenario_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut trace = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.get(i).ok_or("--scenario requires a path")?;
                scenario_path = Some(PathBuf::from(path));
            }
            "--seed" => {
                i += 1;
                let raw = args.get(i).ok_or("--seed requires a value")?;
                seed = Some(raw.parse().map_err(|e| format!("Invalid seed '{raw}': {e}"))?);
            }
            "--trace" => trace = true,
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 1;
    }

    let mut config = match &scenario_path {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    info!(seed = config.seed, scenario = ?scenario_path, "running scenario");

    let mut engine = ArenaEngine::new(config)?;
    let snapshots = engine.run_to_completion();

    if trace {
        for snapshot in &snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| format!("Failed to serialize snapshot: {e}"))?;
            println!("{line}");
        }
    } else {
        print_summary(&snapshots, engine.is_finished());
    }
    Ok(())
}

fn cmd_defaults() -> Result<(), String> {
    println!("{}", ScenarioConfig::default().to_json()?);
    Ok(())
}

fn print_summary(snapshots: &[ArenaSnapshot], finished: bool) {
    let Some(last) = snapshots.last() else {
        println!("No frames simulated.");
        return;
    };

    println!("Frames:        {}", last.frame);
    println!("Elapsed:       {:.3}s", last.elapsed_secs);
    println!("Ricochet cues: {}", last.ricochet_cues);

    if let Some(torpedo) = &last.torpedo {
        println!("Reflections:   {}/{}", torpedo.reflections, torpedo.reflection_budget);
        println!(
            "Final pos:     ({:.3}, {:.3})",
            torpedo.position.x, torpedo.position.y
        );
        let outcome = match torpedo.state {
            GuidanceState::Searching => "no target found".to_string(),
            GuidanceState::Locked { target_point } => {
                format!("locked on ({:.3}, {:.3})", target_point.x, target_point.y)
            }
            GuidanceState::Impacted {
                cause: ImpactCause::Target { point },
            } => format!("hit target at ({:.3}, {:.3})", point.x, point.y),
            GuidanceState::Impacted {
                cause: ImpactCause::ReflectionsExhausted { target_point: None },
            } => "out of reflections".to_string(),
            GuidanceState::Impacted {
                cause:
                    ImpactCause::ReflectionsExhausted {
                        target_point: Some(point),
                    },
            } => format!(
                "out of reflections while locked on ({:.3}, {:.3})",
                point.x, point.y
            ),
        };
        println!("Outcome:       {outcome}");
    }

    if !finished {
        println!("Stopped at the frame cap with the torpedo still alive.");
    }
}
