use std::time::Duration;

use tokio::sync::{mpsc, watch};

use pixel_python::core::{GameSnapshot, GameState};
use pixel_python::engine::{run_session, Autopilot, Session, SessionCommand};
use pixel_python::types::{
    BoostKind, Coord, Direction, GameAction, GameStatus, BOOST_SPAWN_RATE_S, GAME_SPEED_START_MS,
    GAME_TIMER_START_S,
};

#[tokio::test(start_paused = true)]
async fn snapshots_follow_every_transition() {
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (snap_tx, mut snap_rx) = watch::channel(GameSnapshot::default());
    let task = tokio::spawn(run_session(GameState::new(4), cmd_rx, snap_tx));

    cmd_tx
        .send(SessionCommand::Action(GameAction::Start))
        .await
        .unwrap();
    snap_rx.changed().await.unwrap();
    assert_eq!(snap_rx.borrow_and_update().status, GameStatus::Playing);

    snap_rx.changed().await.unwrap();
    {
        let snap = snap_rx.borrow_and_update();
        assert_eq!(snap.tick_count, 1);
        assert_eq!(snap.head().y, 9);
    }

    cmd_tx.send(SessionCommand::Quit).await.unwrap();
    let summary = task.await.unwrap();
    assert_eq!(summary.ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn restart_resets_countdown() {
    let session = Session::spawn(GameState::new(8));
    session.apply(GameAction::Start).await.unwrap();
    session.apply(GameAction::Turn(Direction::Right)).await.unwrap();

    // Right from the center reaches the wall on the 10th tick.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let snap = session.subscribe().borrow().clone();
    assert_eq!(snap.status, GameStatus::GameOver);
    assert!(snap.timers.game_s < GAME_TIMER_START_S);
    assert!(snap.timers.game_s >= GAME_TIMER_START_S - 2);

    session.apply(GameAction::Restart).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let snap = session.subscribe().borrow().clone();
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(snap.timers.game_s, GAME_TIMER_START_S);
    assert_eq!(snap.episode_id, 2);

    let summary = session.shutdown().await.unwrap();
    assert_eq!(summary.games_finished, 1);
}

#[tokio::test(start_paused = true)]
async fn autopilot_plays_a_full_session() {
    let session = Session::spawn(GameState::new(21));
    let mut snapshots = session.subscribe();
    let pilot = Autopilot::new();
    session.apply(GameAction::Start).await.unwrap();

    loop {
        snapshots.changed().await.unwrap();
        let snap = snapshots.borrow_and_update().clone();
        if snap.status == GameStatus::GameOver {
            break;
        }
        if let Some(dir) = pilot.choose(&snap) {
            session.apply(GameAction::Turn(dir)).await.unwrap();
        }
    }

    let summary = session.shutdown().await.unwrap();
    assert_eq!(summary.games_finished, 1);
    assert!(summary.final_snapshot.game_over_cause.is_some());
    assert!(summary.timer_steps <= GAME_TIMER_START_S as u64);
}

fn tick_until(game: &mut GameState, dir: Direction, done: impl Fn(Coord) -> bool) -> Option<()> {
    if !game.change_direction(dir) {
        return None;
    }
    while !done(game.head()) {
        game.tick()?;
        if !game.is_playing() {
            return None;
        }
    }
    Some(())
}

/// Steer a started game along an L-shaped path until its next tick lands on `target`.
///
/// Returns the final heading, or `None` when the path would need a reversal or
/// the snake would run out of room within `run_on` cells past the target.
fn steer_next_to(game: &mut GameState, target: Coord, run_on: i32) -> Option<Direction> {
    let head = game.head();
    let horizontal = if target.x < head.x {
        Direction::Left
    } else {
        Direction::Right
    };
    let last = if target.y > head.y {
        if target.x == head.x {
            return None;
        }
        Direction::Down
    } else if target.x == head.x {
        Direction::Up
    } else {
        horizontal
    };

    let (dx, dy) = last.delta();
    if !Coord::new(target.x + dx * run_on, target.y + dy * run_on).in_bounds() {
        return None;
    }

    match last {
        Direction::Down => {
            tick_until(game, horizontal, |h| h.x == target.x)?;
            tick_until(game, Direction::Down, |h| h.y == target.y - 1)?;
        }
        Direction::Up => {
            tick_until(game, Direction::Up, |h| h.y == target.y + 1)?;
        }
        _ => {
            tick_until(game, Direction::Up, |h| h.y == target.y)?;
            tick_until(game, horizontal, |h| h.x == target.x - dx)?;
        }
    }
    Some(last)
}

#[tokio::test(start_paused = true)]
async fn pixel_rush_halves_the_tick_period() {
    let (game, heading) = (1..2_000u64)
        .find_map(|seed| {
            let mut game = GameState::new(seed);
            game.start();
            for _ in 0..BOOST_SPAWN_RATE_S {
                game.advance_timers();
            }
            let pickup = *game.pickups().first()?;
            if pickup.kind != BoostKind::PixelRush {
                return None;
            }
            let heading = steer_next_to(&mut game, pickup.location, 6)?;
            Some((game, heading))
        })
        .expect("a seed with a reachable Pixel Rush pickup");

    let session = Session::spawn(game);

    // The first tick still runs at the baseline period and collects the pickup.
    tokio::time::sleep(Duration::from_millis(GAME_SPEED_START_MS as u64 + 10)).await;
    let snap = session.subscribe().borrow().clone();
    assert_eq!(snap.active_boost.map(|b| b.kind), Some(BoostKind::PixelRush));
    assert_eq!(snap.tick_interval_ms, GAME_SPEED_START_MS / 2);

    // From then on a tick every 100ms: five more by 710ms.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let summary = session.shutdown().await.unwrap();
    assert_eq!(summary.ticks, 6);
    assert_eq!(summary.timer_steps, 0);
    assert_eq!(summary.final_snapshot.status, GameStatus::Playing);
    assert_eq!(summary.final_snapshot.direction, heading);
}
