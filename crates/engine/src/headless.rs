//! Headless runner: whole games on the fixed-step clock with the autopilot steering.

use serde::Serialize;
use tracing::{debug, info};

use crate::autopilot::Autopilot;
use crate::clock::GameClock;
use crate::core::{GameSnapshot, GameState};
use crate::types::{GameOverCause, GameStatus};

/// Default simulated milliseconds between autopilot decisions
pub const DEFAULT_STEP_MS: u32 = 50;

/// Runner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Simulated time per decision; keep it at or below the fastest tick interval
    pub step_ms: u32,
    /// Stop after this many ticks even if the game is still running
    pub max_ticks: Option<u32>,
    pub pilot: Autopilot,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            max_ticks: None,
            pilot: Autopilot::default(),
        }
    }
}

/// Outcome of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    pub seed: u64,
    pub score: u32,
    pub rank: &'static str,
    pub ticks: u32,
    pub timer_steps: u32,
    pub length: usize,
    pub status: GameStatus,
    pub cause: Option<GameOverCause>,
}

impl RunMetrics {
    pub fn from_snapshot(snap: &GameSnapshot, timer_steps: u32) -> Self {
        Self {
            seed: snap.seed,
            score: snap.score,
            rank: snap.rank,
            ticks: snap.tick_count,
            timer_steps,
            length: snap.snake_len(),
            status: snap.status,
            cause: snap.game_over_cause,
        }
    }
}

/// Start a fresh game on `seed` and play it to the end (or to `max_ticks`).
pub fn play_game(seed: u64, config: &HeadlessConfig) -> RunMetrics {
    let mut game = GameState::new(seed);
    game.start();
    play(&mut game, config)
}

/// Play an already started game until it ends or hits the tick limit.
pub fn play(game: &mut GameState, config: &HeadlessConfig) -> RunMetrics {
    let mut clock = GameClock::new();
    let mut snap = GameSnapshot::default();
    let mut timer_steps = 0u32;
    let step_ms = config.step_ms.max(1);

    while game.is_playing() {
        if config.max_ticks.is_some_and(|max| game.tick_count() >= max) {
            debug!(ticks = game.tick_count(), "tick limit reached");
            break;
        }

        game.snapshot_into(&mut snap);
        if let Some(dir) = config.pilot.choose(&snap) {
            game.change_direction(dir);
        }

        let report = clock.advance(game, step_ms);
        timer_steps += report.timer_steps;
    }

    game.snapshot_into(&mut snap);
    let metrics = RunMetrics::from_snapshot(&snap, timer_steps);
    info!(
        seed = metrics.seed,
        score = metrics.score,
        ticks = metrics.ticks,
        cause = metrics.cause.map(|c| c.as_str()),
        "headless game finished"
    );
    metrics
}
