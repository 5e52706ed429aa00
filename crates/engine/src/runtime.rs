//! Async session runtime.
//!
//! Hosts one [`GameState`] on a tokio task and drives it with two intervals,
//! the way a browser host would with `setInterval`:
//! - a tick interval at the current game speed (recreated when it changes)
//! - a one-second countdown interval
//!
//! Both intervals only fire while the game is playing and restart from zero
//! on every start. When both are due at once the tick runs first, matching
//! [`GameClock`](crate::clock::GameClock). Input arrives on an mpsc channel;
//! observers subscribe to a `watch` channel that carries the latest
//! [`GameSnapshot`].

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::{GameSnapshot, GameState};
use crate::types::{GameAction, GameStatus, TIMER_STEP_MS};

/// Bounded queue size for inbound commands
pub const COMMAND_QUEUE: usize = 64;

/// Command delivered to the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Action(GameAction),
    Quit,
}

/// Totals for a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub timer_steps: u64,
    pub games_finished: u32,
    pub final_snapshot: GameSnapshot,
}

/// Running session instance.
pub struct Session {
    cmd_tx: mpsc::Sender<SessionCommand>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<SessionSummary>,
}

impl Session {
    /// Spawn the session loop on the current tokio runtime.
    pub fn spawn(game: GameState) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);
        let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());
        let task = tokio::spawn(run_session(game, cmd_rx, snapshot_tx));

        Self {
            cmd_tx,
            snapshot_rx,
            task,
        }
    }

    /// New observer of the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Clonable handle for input sources
    pub fn commands(&self) -> mpsc::Sender<SessionCommand> {
        self.cmd_tx.clone()
    }

    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| anyhow!("session closed before {:?} was delivered", command))
    }

    pub async fn apply(&self, action: GameAction) -> Result<()> {
        self.send(SessionCommand::Action(action)).await
    }

    /// Ask the loop to stop and wait for its summary
    pub async fn shutdown(self) -> Result<SessionSummary> {
        // The loop may already be gone (e.g. every sender dropped); the join below reports that.
        let _ = self.cmd_tx.send(SessionCommand::Quit).await;
        self.join().await
    }

    /// Wait for the loop to finish on its own
    pub async fn join(self) -> Result<SessionSummary> {
        let Self { cmd_tx, task, .. } = self;
        drop(cmd_tx);
        Ok(task.await?)
    }
}

fn every(period_ms: u32) -> Interval {
    let period = Duration::from_millis(period_ms.max(1) as u64);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Session loop. Runs until `Quit` arrives or every command sender is dropped.
pub async fn run_session(
    mut game: GameState,
    mut commands: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<GameSnapshot>,
) -> SessionSummary {
    let mut tick_period = game.tick_interval_ms();
    let mut tick_timer = every(tick_period);
    let mut second_timer = every(TIMER_STEP_MS);
    let mut ticks = 0u64;
    let mut timer_steps = 0u64;
    let mut games_finished = 0u32;

    info!(seed = game.seed(), "session started");

    loop {
        let playing = game.is_playing();
        let episode = game.episode_id();

        // Fixed branch order: input, then the tick, then the countdown.
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(SessionCommand::Action(action)) => {
                    game.apply_action(action);
                    if game.episode_id() != episode && game.is_playing() {
                        tick_period = game.tick_interval_ms();
                        tick_timer = every(tick_period);
                        second_timer = every(TIMER_STEP_MS);
                    }
                }
                Some(SessionCommand::Quit) | None => break,
            },
            _ = tick_timer.tick(), if playing => {
                if game.tick().is_some() {
                    ticks += 1;
                }
                if game.tick_interval_ms() != tick_period {
                    debug!(from = tick_period, to = game.tick_interval_ms(), "tick interval changed");
                    tick_period = game.tick_interval_ms();
                    tick_timer = every(tick_period);
                }
            },
            _ = second_timer.tick(), if playing => {
                if game.advance_timers().is_some() {
                    timer_steps += 1;
                }
            },
        }

        if playing && game.status() == GameStatus::GameOver {
            games_finished += 1;
            info!(
                episode = game.episode_id(),
                score = game.score(),
                cause = game.game_over_cause().map(|c| c.as_str()),
                "game finished"
            );
        }

        snapshots.send_modify(|snap| game.snapshot_into(snap));
    }

    info!(ticks, timer_steps, games_finished, "session stopped");

    SessionSummary {
        ticks,
        timer_steps,
        games_finished,
        final_snapshot: game.snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, GAME_SPEED_START_MS, GAME_TIMER_START_S};

    #[tokio::test(start_paused = true)]
    async fn idle_session_does_not_tick() {
        let session = Session::spawn(GameState::new(1));
        tokio::time::sleep(Duration::from_secs(5)).await;
        let summary = session.shutdown().await.unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.timer_steps, 0);
        assert_eq!(summary.final_snapshot.status, GameStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn start_runs_both_loops() {
        let session = Session::spawn(GameState::new(1));
        let mut observer = session.subscribe();

        session.apply(GameAction::Start).await.unwrap();
        observer.changed().await.unwrap();
        assert_eq!(observer.borrow().status, GameStatus::Playing);

        // Five ticks of straight-up travel and one countdown step.
        tokio::time::sleep(Duration::from_millis(5 * GAME_SPEED_START_MS as u64 + 50)).await;
        let summary = session.shutdown().await.unwrap();

        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.timer_steps, 1);
        assert_eq!(summary.final_snapshot.timers.game_s, 179);
        assert_eq!(summary.final_snapshot.head().x, 10);
        assert_eq!(summary.final_snapshot.head().y, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn wall_hit_finishes_game_and_stops_loops() {
        let session = Session::spawn(GameState::new(1));
        session.apply(GameAction::Start).await.unwrap();
        session.apply(GameAction::Turn(Direction::Left)).await.unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        let summary = session.shutdown().await.unwrap();

        assert_eq!(summary.games_finished, 1);
        assert_eq!(summary.final_snapshot.status, GameStatus::GameOver);
        assert_eq!(summary.ticks, 11);
        assert!(summary.timer_steps <= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_precedes_countdown_when_both_are_due() {
        // One second left on the countdown and nothing in the snake's column.
        let game = (1..1_000u64)
            .find_map(|seed| {
                let mut game = GameState::new(seed);
                game.start();
                for _ in 0..GAME_TIMER_START_S - 1 {
                    game.advance_timers();
                }
                let clear = game
                    .pickups()
                    .iter()
                    .all(|p| p.location.x != 10 || !(5..10).contains(&p.location.y));
                clear.then_some(game)
            })
            .expect("a seed with a clear column");
        assert_eq!(game.game_timer_s(), 1);

        // At 1000ms the fifth tick and the final countdown step fall due together.
        let session = Session::spawn(game);
        tokio::time::sleep(Duration::from_millis(TIMER_STEP_MS as u64 + 50)).await;
        let summary = session.shutdown().await.unwrap();

        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.timer_steps, 1);
        assert_eq!(summary.games_finished, 1);
        assert_eq!(
            summary.final_snapshot.game_over_cause,
            Some(crate::types::GameOverCause::TimeUp)
        );
        assert_eq!(summary.final_snapshot.head().y, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_senders_ends_session() {
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (snap_tx, _snap_rx) = watch::channel(GameSnapshot::default());
        let task = tokio::spawn(run_session(GameState::new(1), cmd_rx, snap_tx));
        drop(cmd_tx);
        let summary = task.await.unwrap();
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn send_after_shutdown_fails() {
        tokio_test::block_on(async {
            let session = Session::spawn(GameState::new(1));
            let commands = session.commands();
            let summary = session.shutdown().await.unwrap();
            assert_eq!(summary.games_finished, 0);
            assert!(commands
                .send(SessionCommand::Action(GameAction::Start))
                .await
                .is_err());
        });
    }
}
