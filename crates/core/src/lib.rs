//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: the snake, food, bonus fruit,
//! boost pickups and the countdowns. It has no dependency on rendering,
//! input or scheduling, which makes it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable from a plain method call
//! - **Portable**: Any host can drive it (terminal, browser, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 20x20 occupancy, bounds checks and free-cell selection
//! - [`game_state`]: The state machine (`start`, `reset`, `change_direction`, `tick`, `advance_timers`)
//! - [`rng`]: Seeded PCG32 random source
//! - [`scoring`]: Points, tick interval and rank tables
//! - [`snapshot`]: Immutable observation for presentation layers
//!
//! # Game Rules
//!
//! - **Food**: +10, the snake grows by one, food respawns off the snake
//! - **Bonus Fruit**: +50, spawns every 20 seconds
//! - **Boosts**: one spawns every 15 seconds; timed boosts take the single
//!   active slot (a new one replaces the old), Fruit Fiesta applies instantly
//! - **Game Over**: wall or self collision (ignored under Phase Shift), or the
//!   180 second countdown running out
//!
//! # Example
//!
//! ```
//! use pixel_python_core::GameState;
//! use pixel_python_types::{Direction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.change_direction(Direction::Left);
//! game.tick();
//! game.advance_timers();
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.game_timer_s(), 179);
//! ```
//!
//! # Timing
//!
//! The crate never schedules anything. The host calls
//! [`GameState::tick`](game_state::GameState::tick) every
//! [`tick_interval_ms`](game_state::GameState::tick_interval_ms) and
//! [`GameState::advance_timers`](game_state::GameState::advance_timers) every second.

pub mod game_state;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use pixel_python_types as types;

// Re-export commonly used types for convenience
pub use game_state::GameState;
pub use grid::{hits_body, is_out_of_bounds, random_free_cell, Occupancy};
pub use rng::GameRng;
pub use scoring::{
    bonus_fruit_points, food_points, format_clock, rank_for_score, tick_interval_ms,
    tier_for_score,
};
pub use snapshot::{GameSnapshot, TimersSnapshot};
