//! Fixed-step host clock.
//!
//! Turns elapsed wall time into the ordered sequence of `tick` and
//! `advance_timers` calls a browser host would get from two intervals: one at
//! the current tick interval and one every second. Deterministic, so the
//! headless runner and tests can play whole games without sleeping.

use tracing::trace;

use crate::core::GameState;
use crate::types::{GameOverCause, TIMER_STEP_MS};

/// What a call to [`GameClock::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReport {
    pub ticks: u32,
    pub timer_steps: u32,
    pub points: u32,
    pub game_over: Option<GameOverCause>,
}

/// Accumulates elapsed time against both loops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameClock {
    tick_elapsed_ms: u32,
    timer_elapsed_ms: u32,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any partial progress (both loops stop while not playing)
    pub fn clear(&mut self) {
        self.tick_elapsed_ms = 0;
        self.timer_elapsed_ms = 0;
    }

    /// Advance by `elapsed_ms`, firing every due tick and countdown step in order.
    ///
    /// The tick interval is re-read after every tick. When both loops are due
    /// at the same instant the tick runs first.
    pub fn advance(&mut self, game: &mut GameState, elapsed_ms: u32) -> ClockReport {
        let mut report = ClockReport::default();
        let mut remaining = elapsed_ms;

        loop {
            if !game.is_playing() {
                self.clear();
                break;
            }

            let interval = game.tick_interval_ms().max(1);
            let to_tick = interval.saturating_sub(self.tick_elapsed_ms);
            let to_timer = TIMER_STEP_MS.saturating_sub(self.timer_elapsed_ms);
            let next = to_tick.min(to_timer);

            if next > remaining {
                self.tick_elapsed_ms += remaining;
                self.timer_elapsed_ms += remaining;
                break;
            }

            remaining -= next;
            self.tick_elapsed_ms += next;
            self.timer_elapsed_ms += next;

            if self.tick_elapsed_ms >= interval {
                self.tick_elapsed_ms = 0;
                if let Some(event) = game.tick() {
                    report.ticks += 1;
                    report.points += event.points;
                    report.game_over = report.game_over.or(event.game_over);
                }
            }

            if game.is_playing() && self.timer_elapsed_ms >= TIMER_STEP_MS {
                self.timer_elapsed_ms = 0;
                if let Some(event) = game.advance_timers() {
                    report.timer_steps += 1;
                    report.game_over = report.game_over.or(event.game_over);
                }
            }
        }

        trace!(
            elapsed_ms,
            ticks = report.ticks,
            timer_steps = report.timer_steps,
            "clock advanced"
        );
        report
    }
}
