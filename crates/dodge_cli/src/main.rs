//! Dodge CLI
//!
//! Solver probe, config presets and a small sandbox match that runs the full
//! minion brain on both teams.

mod sandbox;

use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dodge_core::config::DEFAULT_MAX_ALLOWED_ERROR;
use dodge_core::math::vec3;
use dodge_core::{
    solve_intercept, Agent, Arena, BrainConfig, InterceptQuery, MinionBrain, MinionStateId,
    SimClock, Team, TeamCacheRegistry, Vec3,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use sandbox::{Court, ThrowOutcome};

#[derive(Parser)]
#[command(name = "dodge")]
#[command(about = "Dodgeball agent brain tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one intercept and print the result as JSON
    Solve {
        /// Launch position "x,y,z"
        #[arg(long, default_value = "0,1,0", value_parser = parse_vec3)]
        launch: Vec3,

        /// Target position "x,y,z"
        #[arg(long, value_parser = parse_vec3)]
        target: Vec3,

        /// Target velocity "x,y,z"
        #[arg(long, default_value = "0,0,0", value_parser = parse_vec3)]
        velocity: Vec3,

        /// Vertical acceleration (m/s², negative is down)
        #[arg(long, default_value_t = -9.81, allow_negative_numbers = true)]
        gravity: f32,

        /// Largest launch speed (m/s)
        #[arg(long, default_value_t = 20.0)]
        speed: f32,

        /// Largest acceptable miss distance (m)
        #[arg(long, default_value_t = DEFAULT_MAX_ALLOWED_ERROR)]
        max_error: f32,

        /// Config preset for the solver constants
        #[arg(long, default_value = "default")]
        profile: String,
    },

    /// Print a config preset as JSON
    Config {
        #[arg(long, default_value = "default")]
        profile: String,
    },

    /// Run a sandbox match and print every state change
    Sandbox {
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 3)]
        team_size: usize,

        #[arg(long, default_value_t = 1)]
        balls_per_team: usize,

        /// Seconds per tick
        #[arg(long, default_value_t = 0.05)]
        dt: f32,
    },
}

fn parse_vec3(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<std::result::Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(vec3(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {s:?}")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Solve { launch, target, velocity, gravity, speed, max_error, profile } => {
            let config = BrainConfig::from_profile(&profile);
            let query = InterceptQuery {
                launch_pos: launch,
                max_speed: speed,
                acceleration: vec3(0.0, gravity, 0.0),
                target_pos: target,
                target_velocity: velocity,
                target_forward: vec3(0.0, 0.0, -1.0),
                max_allowed_error: max_error,
            };
            let output = match solve_intercept(&query, &config.solver) {
                Some(solution) => json!({
                    "solved": true,
                    "solution": solution,
                    "intercept_pos": query.target_position_at(solution.intercept_t),
                }),
                None => json!({ "solved": false }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Config { profile } => {
            let config = BrainConfig::from_profile(&profile);
            println!("{}", config.to_json_string()?);
        }

        Commands::Sandbox { ticks, seed, team_size, balls_per_team, dt } => {
            run_sandbox(ticks, seed, team_size, balls_per_team, dt)?;
        }
    }

    Ok(())
}

fn run_sandbox(ticks: u32, seed: u64, team_size: usize, balls_per_team: usize, dt: f32) -> Result<()> {
    if team_size == 0 || balls_per_team == 0 {
        bail!("team size and balls per team must be at least 1");
    }
    if dt.is_nan() || dt <= 0.0 {
        bail!("tick length must be positive, got {dt}");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let court = Rc::new(Court::new(team_size, balls_per_team, &mut rng));
    let clock = Rc::new(SimClock::new());
    let mut registry = TeamCacheRegistry::new();

    let mut config = BrainConfig::from_env_or_default();
    config.behavior.rng_seed = seed;
    config.validate().context("invalid brain config")?;

    let mut brains = court
        .agents()
        .iter()
        .map(|agent| {
            MinionBrain::new(agent.clone(), court.clone(), clock.clone(), &mut registry, config.clone())
                .with_context(|| format!("wiring brain for agent #{}", agent.id().0))
        })
        .collect::<Result<Vec<_>>>()?;

    println!("sandbox: {} vs {}, {} ball(s) per team, seed {}", team_size, team_size, balls_per_team, seed);

    for _ in 0..ticks {
        clock.advance(dt);
        for brain in &mut brains {
            if let Some(record) = brain.update()? {
                println!(
                    "[{:7.2}s] agent {} {} -> {}{}",
                    clock.elapsed_secs(),
                    brain.agent_id(),
                    record.from,
                    record.to,
                    if record.global { " (global)" } else { "" }
                );
            }
        }

        for outcome in court.step(dt) {
            match outcome {
                ThrowOutcome::Hit { thrower, target } => {
                    println!("[{:7.2}s] #{} hit #{}", clock.elapsed_secs(), thrower, target)
                }
                ThrowOutcome::Rescued { thrower, teammate } => {
                    println!("[{:7.2}s] #{} rescued #{}", clock.elapsed_secs(), thrower, teammate)
                }
                ThrowOutcome::Landed { thrower } => {
                    println!("[{:7.2}s] #{} missed", clock.elapsed_secs(), thrower)
                }
            }
        }

        if court.is_match_over() && brains.iter().all(|b| b.current_state() == Some(MinionStateId::Rest)) {
            break;
        }
    }

    println!(
        "after {:.2}s: home confined {}/{}, away confined {}/{}",
        clock.elapsed_secs(),
        court.confined_count(Team::Home),
        team_size,
        court.confined_count(Team::Away),
        team_size
    );
    Ok(())
}
