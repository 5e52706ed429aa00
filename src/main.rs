//! Pixel Python runner (default binary).
//!
//! Plays games with the autopilot steering and prints one result line per game.
//! By default games run on the simulated fixed-step clock; `--realtime` drives
//! them through the tokio session with real intervals instead.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use pixel_python::core::GameState;
use pixel_python::engine::headless::DEFAULT_STEP_MS;
use pixel_python::engine::{play_game, Autopilot, HeadlessConfig, RunMetrics, Session};
use pixel_python::types::{GameAction, GameStatus};

#[derive(Parser, Debug)]
#[command(name = "pixel-python")]
#[command(about = "Play Pixel Python games with the autopilot and report the results")]
struct Args {
    /// Seed of the first game; later games use seed+1, seed+2, ...
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Run on real tokio intervals instead of the simulated clock
    #[arg(long)]
    realtime: bool,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Simulated milliseconds between autopilot decisions
    #[arg(long, default_value_t = DEFAULT_STEP_MS)]
    step_ms: u32,

    /// Stop each game after this many ticks
    #[arg(long)]
    max_ticks: Option<u32>,

    /// Ignore boost pickups when choosing targets
    #[arg(long)]
    no_boosts: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = HeadlessConfig {
        step_ms: args.step_ms,
        max_ticks: args.max_ticks,
        pilot: Autopilot {
            chase_boosts: !args.no_boosts,
        },
    };

    let runtime = if args.realtime {
        Some(tokio::runtime::Runtime::new()?)
    } else {
        None
    };

    let mut best = 0u32;
    for i in 0..args.games {
        let seed = args.seed.wrapping_add(i as u64);
        let metrics = match &runtime {
            Some(rt) => rt.block_on(play_realtime(seed, &config))?,
            None => play_game(seed, &config),
        };
        best = best.max(metrics.score);
        report(&metrics, args.json)?;
    }

    info!(games = args.games, best, "all games finished");
    Ok(())
}

async fn play_realtime(seed: u64, config: &HeadlessConfig) -> Result<RunMetrics> {
    let session = Session::spawn(GameState::new(seed));
    let mut snapshots = session.subscribe();
    session.apply(GameAction::Start).await?;

    loop {
        snapshots.changed().await?;
        let snap = snapshots.borrow_and_update().clone();

        if snap.status == GameStatus::GameOver {
            break;
        }
        if config.max_ticks.is_some_and(|max| snap.tick_count >= max) {
            break;
        }
        if let Some(dir) = config.pilot.choose(&snap) {
            if dir != snap.direction {
                session.apply(GameAction::Turn(dir)).await?;
            }
        }
    }

    let summary = session.shutdown().await?;
    Ok(RunMetrics::from_snapshot(
        &summary.final_snapshot,
        summary.timer_steps as u32,
    ))
}

fn report(m: &RunMetrics, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(m)?);
        return Ok(());
    }
    println!(
        "seed={} score={} rank=\"{}\" ticks={} length={} cause={}",
        m.seed,
        m.score,
        m.rank,
        m.ticks,
        m.length,
        m.cause.map(|c| c.as_str()).unwrap_or("none"),
    );
    Ok(())
}
