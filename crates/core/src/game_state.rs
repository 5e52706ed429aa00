//! Game state module - the simulation state machine
//!
//! Owns every piece of mutable game state: snake, heading, food, bonus fruit,
//! boost pickups, the active boost, score and the three countdowns.
//!
//! The host drives two loops against it:
//! - [`GameState::tick`] at the current [`GameState::tick_interval_ms`]
//! - [`GameState::advance_timers`] once per second
//!
//! Both are no-ops unless the game is [`GameStatus::Playing`]. Every
//! transition runs to completion; game over is a normal terminal transition.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::grid::{hits_body, is_out_of_bounds, Occupancy};
use crate::rng::GameRng;
use crate::scoring::{bonus_fruit_points, food_points, rank_for_score, tick_interval_ms};
use crate::snapshot::{GameSnapshot, TimersSnapshot};
use crate::types::*;

/// Pickups one game can spawn (one per boost period of the countdown), rounded up
const PICKUP_CAPACITY: usize = (GAME_TIMER_START_S / BOOST_SPAWN_RATE_S) as usize + 4;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    status: GameStatus,
    /// Body segments, head first
    snake: VecDeque<Coord>,
    direction: Direction,
    food: Coord,
    bonus_fruit: Option<Coord>,
    pickups: Vec<Pickup>,
    active_boost: Option<ActiveBoost>,
    score: u32,
    game_timer_s: u32,
    bonus_fruit_timer_s: u32,
    boost_spawn_timer_s: u32,
    tick_interval_ms: u32,
    rng: GameRng,
    /// Monotonic episode id (increments on every start/reset).
    episode_id: u32,
    /// Ticks applied in the current episode.
    tick_count: u32,
    /// Summary of the last tick/countdown step (consumed by observers).
    last_event: Option<GameEvent>,
    game_over_cause: Option<GameOverCause>,
}

impl GameState {
    /// Create a new idle game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        // Sized up front so ticks and spawns never reallocate.
        let mut snake = VecDeque::with_capacity(GRID_CELLS + 1);
        snake.push_back(SPAWN_COORD);
        let food = Occupancy::from_coords(&snake)
            .random_free(&mut rng)
            .unwrap_or(Coord::new(0, 0));

        Self {
            status: GameStatus::Idle,
            snake,
            direction: Direction::Up,
            food,
            bonus_fruit: None,
            pickups: Vec::with_capacity(PICKUP_CAPACITY),
            active_boost: None,
            score: 0,
            game_timer_s: GAME_TIMER_START_S,
            bonus_fruit_timer_s: BONUS_FRUIT_SPAWN_RATE_S,
            boost_spawn_timer_s: BOOST_SPAWN_RATE_S,
            tick_interval_ms: GAME_SPEED_START_MS,
            rng,
            episode_id: 0,
            tick_count: 0,
            last_event: None,
            game_over_cause: None,
        }
    }

    /// Reset everything to initial values and start playing
    pub fn start(&mut self) {
        self.reset_fields();
        self.status = GameStatus::Playing;
        debug!(episode = self.episode_id, seed = self.rng.seed(), "game started");
    }

    /// Reset everything to initial values and stay idle
    pub fn reset(&mut self) {
        self.reset_fields();
        self.status = GameStatus::Idle;
        debug!(episode = self.episode_id, "game reset");
    }

    fn reset_fields(&mut self) {
        self.snake.clear();
        self.snake.push_back(SPAWN_COORD);
        self.direction = Direction::Up;
        self.bonus_fruit = None;
        self.pickups.clear();
        self.active_boost = None;
        self.score = 0;
        self.game_timer_s = GAME_TIMER_START_S;
        self.bonus_fruit_timer_s = BONUS_FRUIT_SPAWN_RATE_S;
        self.boost_spawn_timer_s = BOOST_SPAWN_RATE_S;
        self.tick_interval_ms = GAME_SPEED_START_MS;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.tick_count = 0;
        self.last_event = None;
        self.game_over_cause = None;
        // A single segment always leaves a free cell.
        if let Some(food) = Occupancy::from_coords(&self.snake).random_free(&mut self.rng) {
            self.food = food;
        }
    }

    /// Change heading. Exact reversals are ignored; the last call before a tick wins.
    ///
    /// Returns whether the heading was accepted.
    pub fn change_direction(&mut self, dir: Direction) -> bool {
        if dir.is_opposite(self.direction) {
            return false;
        }
        self.direction = dir;
        true
    }

    /// Apply a host action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Turn(dir) => self.change_direction(dir),
            GameAction::Start => {
                self.start();
                true
            }
            GameAction::Restart => {
                self.reset();
                self.start();
                true
            }
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// One-second countdown step.
    ///
    /// Returns `None` (and changes nothing) unless playing.
    pub fn advance_timers(&mut self) -> Option<GameEvent> {
        if self.status != GameStatus::Playing {
            return None;
        }

        let mut event = GameEvent::default();

        self.game_timer_s = self.game_timer_s.saturating_sub(1);
        self.bonus_fruit_timer_s = self.bonus_fruit_timer_s.saturating_sub(1);
        self.boost_spawn_timer_s = self.boost_spawn_timer_s.saturating_sub(1);
        if let Some(boost) = self.active_boost.as_mut() {
            boost.remaining_s = boost.remaining_s.saturating_sub(1);
        }

        if self.game_timer_s == 0 {
            self.end_game(GameOverCause::TimeUp, &mut event);
            return Some(self.record(event));
        }

        if let Some(boost) = self.active_boost {
            if boost.remaining_s == 0 {
                debug!(boost = boost.kind.as_str(), "boost expired");
                self.active_boost = None;
                event.boost_expired = Some(boost.kind);
            }
        }

        if self.bonus_fruit_timer_s == 0 {
            let mut occ = Occupancy::from_coords(&self.snake);
            occ.mark(self.food);
            for p in &self.pickups {
                occ.mark(p.location);
            }
            if let Some(cell) = occ.random_free(&mut self.rng) {
                debug!(x = cell.x, y = cell.y, "bonus fruit spawned");
                self.bonus_fruit = Some(cell);
                event.spawned_bonus_fruit = true;
            }
            self.bonus_fruit_timer_s = BONUS_FRUIT_SPAWN_RATE_S;
        }

        if self.boost_spawn_timer_s == 0 {
            let kind = self.rng.next_boost();
            let occ = self.items_occupancy();
            if let Some(location) = occ.random_free(&mut self.rng) {
                debug!(boost = kind.as_str(), x = location.x, y = location.y, "boost spawned");
                self.pickups.push(Pickup { kind, location });
                event.spawned_pickup = Some(kind);
            }
            self.boost_spawn_timer_s = BOOST_SPAWN_RATE_S;
        }

        Some(self.record(event))
    }

    /// Advance the snake by one cell.
    ///
    /// Returns `None` (and changes nothing) unless playing. On a fatal
    /// collision only the status changes.
    pub fn tick(&mut self) -> Option<GameEvent> {
        if self.status != GameStatus::Playing {
            return None;
        }

        let mut event = GameEvent::default();
        let active_kind = self.active_boost.map(|b| b.kind);
        let phasing = active_kind == Some(BoostKind::PhaseShift);

        let mut new_head = self.head().step(self.direction);
        if phasing {
            new_head = new_head.wrapped();
        }

        // Checked against the pre-move body.
        if !phasing {
            if is_out_of_bounds(new_head) {
                self.end_game(GameOverCause::HitWall, &mut event);
                return Some(self.record(event));
            }
            if hits_body(new_head, &self.snake) {
                self.end_game(GameOverCause::HitSelf, &mut event);
                return Some(self.record(event));
            }
        }

        self.snake.push_front(new_head);

        let mut ate = false;
        let mut board_full = false;

        if new_head == self.food {
            ate = true;
            let points = food_points(active_kind);
            self.score += points;
            event.ate_food = true;
            event.points += points;
            match self.free_cell_for_food() {
                Some(cell) => self.food = cell,
                None => board_full = true,
            }
        }

        if self.bonus_fruit == Some(new_head) {
            ate = true;
            let points = bonus_fruit_points(active_kind);
            self.score += points;
            self.bonus_fruit = None;
            event.ate_bonus_fruit = true;
            event.points += points;
        }

        if let Some(idx) = self.pickups.iter().position(|p| p.location == new_head) {
            let pickup = self.pickups.remove(idx);
            event.collected = Some(pickup.kind);
            match pickup.kind.effect() {
                BoostEffect::Instant => self.relocate_food(),
                BoostEffect::Timed { duration_s } => {
                    debug!(boost = pickup.kind.as_str(), duration_s, "boost activated");
                    self.active_boost = Some(ActiveBoost {
                        kind: pickup.kind,
                        remaining_s: duration_s,
                    });
                }
            }
        }

        if !ate {
            self.snake.pop_back();
        }

        self.tick_interval_ms = tick_interval_ms(self.active_boost.map(|b| b.kind));
        self.tick_count = self.tick_count.wrapping_add(1);

        trace!(
            tick = self.tick_count,
            x = new_head.x,
            y = new_head.y,
            len = self.snake.len(),
            score = self.score,
            "tick"
        );

        if board_full {
            self.end_game(GameOverCause::BoardFull, &mut event);
        }

        Some(self.record(event))
    }

    /// Move the food somewhere else (instant boost effect)
    fn relocate_food(&mut self) {
        let mut occ = self.items_occupancy();
        occ.mark(self.food);
        if let Some(cell) = occ.random_free(&mut self.rng) {
            debug!(x = cell.x, y = cell.y, "food relocated");
            self.food = cell;
        }
    }

    /// Free cell for a respawned food: off the snake and, when possible, off every item
    fn free_cell_for_food(&mut self) -> Option<Coord> {
        let mut occ = Occupancy::from_coords(&self.snake);
        if let Some(fruit) = self.bonus_fruit {
            occ.mark(fruit);
        }
        for p in &self.pickups {
            occ.mark(p.location);
        }
        occ.random_free(&mut self.rng)
            .or_else(|| Occupancy::from_coords(&self.snake).random_free(&mut self.rng))
    }

    /// Snake, food, bonus fruit and pending pickups
    fn items_occupancy(&self) -> Occupancy {
        let mut occ = Occupancy::from_coords(&self.snake);
        occ.mark(self.food);
        if let Some(fruit) = self.bonus_fruit {
            occ.mark(fruit);
        }
        for p in &self.pickups {
            occ.mark(p.location);
        }
        occ
    }

    fn end_game(&mut self, cause: GameOverCause, event: &mut GameEvent) {
        self.status = GameStatus::GameOver;
        self.game_over_cause = Some(cause);
        event.game_over = Some(cause);
        debug!(
            episode = self.episode_id,
            cause = cause.as_str(),
            score = self.score,
            rank = rank_for_score(self.score),
            "game over"
        );
    }

    fn record(&mut self, event: GameEvent) -> GameEvent {
        self.last_event = Some(event);
        event
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Body segments, head first
    pub fn snake(&self) -> &VecDeque<Coord> {
        &self.snake
    }

    pub fn head(&self) -> Coord {
        self.snake.front().copied().unwrap_or(SPAWN_COORD)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Coord {
        self.food
    }

    pub fn bonus_fruit(&self) -> Option<Coord> {
        self.bonus_fruit
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn active_boost(&self) -> Option<ActiveBoost> {
        self.active_boost
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_timer_s(&self) -> u32 {
        self.game_timer_s
    }

    pub fn bonus_fruit_timer_s(&self) -> u32 {
        self.bonus_fruit_timer_s
    }

    pub fn boost_spawn_timer_s(&self) -> u32 {
        self.boost_spawn_timer_s
    }

    /// Current tick interval in milliseconds
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    /// Take and clear the last event.
    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.status = self.status;
        out.snake.clear();
        out.snake.extend(self.snake.iter().copied());
        out.direction = self.direction;
        out.food = self.food;
        out.bonus_fruit = self.bonus_fruit;
        out.pickups.clear();
        out.pickups.extend_from_slice(&self.pickups);
        out.active_boost = self.active_boost;
        out.score = self.score;
        out.rank = rank_for_score(self.score);
        out.tick_interval_ms = self.tick_interval_ms;
        out.timers = TimersSnapshot {
            game_s: self.game_timer_s,
            bonus_fruit_s: self.bonus_fruit_timer_s,
            boost_spawn_s: self.boost_spawn_timer_s,
        };
        out.episode_id = self.episode_id;
        out.seed = self.rng.seed();
        out.tick_count = self.tick_count;
        out.game_over_cause = self.game_over_cause;
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
