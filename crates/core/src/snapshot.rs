use serde::Serialize;

use crate::scoring::format_clock;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimersSnapshot {
    pub game_s: u32,
    pub bonus_fruit_s: u32,
    pub boost_spawn_s: u32,
}

/// Immutable view of everything a presentation layer may observe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    /// Head first
    pub snake: Vec<Coord>,
    pub direction: Direction,
    pub food: Coord,
    pub bonus_fruit: Option<Coord>,
    pub pickups: Vec<Pickup>,
    pub active_boost: Option<ActiveBoost>,
    pub score: u32,
    pub rank: &'static str,
    pub tick_interval_ms: u32,
    pub timers: TimersSnapshot,
    pub episode_id: u32,
    pub seed: u64,
    pub tick_count: u32,
    pub game_over_cause: Option<GameOverCause>,
    pub last_event: Option<GameEvent>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.status = GameStatus::Idle;
        self.snake.clear();
        self.snake.push(SPAWN_COORD);
        self.direction = Direction::Up;
        self.food = Coord::new(0, 0);
        self.bonus_fruit = None;
        self.pickups.clear();
        self.active_boost = None;
        self.score = 0;
        self.rank = SCORING_TIERS[0].rank;
        self.tick_interval_ms = GAME_SPEED_START_MS;
        self.timers = TimersSnapshot {
            game_s: GAME_TIMER_START_S,
            bonus_fruit_s: BONUS_FRUIT_SPAWN_RATE_S,
            boost_spawn_s: BOOST_SPAWN_RATE_S,
        };
        self.episode_id = 0;
        self.seed = 0;
        self.tick_count = 0;
        self.game_over_cause = None;
        self.last_event = None;
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn head(&self) -> Coord {
        self.snake.first().copied().unwrap_or(SPAWN_COORD)
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Remaining game time as `m:ss`
    pub fn clock(&self) -> String {
        format_clock(self.timers.game_s)
    }

    /// HUD boost label, e.g. `» (10s)`, or `N/A` when nothing is active
    pub fn boost_label(&self) -> String {
        match self.active_boost {
            Some(boost) => format!("{} ({}s)", boost.kind.symbol(), boost.remaining_s),
            None => "N/A".to_string(),
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            status: GameStatus::Idle,
            snake: Vec::new(),
            direction: Direction::Up,
            food: Coord::new(0, 0),
            bonus_fruit: None,
            pickups: Vec::new(),
            active_boost: None,
            score: 0,
            rank: SCORING_TIERS[0].rank,
            tick_interval_ms: GAME_SPEED_START_MS,
            timers: TimersSnapshot {
                game_s: GAME_TIMER_START_S,
                bonus_fruit_s: BONUS_FRUIT_SPAWN_RATE_S,
                boost_spawn_s: BOOST_SPAWN_RATE_S,
            },
            episode_id: 0,
            seed: 0,
            tick_count: 0,
            game_over_cause: None,
            last_event: None,
        };
        s.clear();
        s
    }
}
