//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data (with serde derives for snapshots and CLI output),
//! usable from the simulation, the host engine and any presentation layer.
//!
//! # Grid
//!
//! The playfield is a fixed 20x20 grid:
//!
//! - **Columns**: x in 0..20 (left to right)
//! - **Rows**: y in 0..20 (top to bottom)
//! - **Spawn position**: (10, 10), heading up
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GAME_SPEED_START_MS` | 200 | Baseline tick interval |
//! | `TIMER_STEP_MS` | 1000 | Countdown step interval |
//! | `GAME_TIMER_START_S` | 180 | Seconds until forced game over |
//! | `BONUS_FRUIT_SPAWN_RATE_S` | 20 | Seconds between bonus fruit spawns |
//! | `BOOST_SPAWN_RATE_S` | 15 | Seconds between boost pickup spawns |
//!
//! # Boosts
//!
//! | Kind | Symbol | Effect |
//! |------|--------|--------|
//! | Chrono Brake | `S` | 8s, tick interval doubled |
//! | Pixel Rush | `»` | 10s, tick interval halved, +5 per food |
//! | Glitch Multiplier | `x2` | 7s, food and bonus fruit score doubled |
//! | Phase Shift | `░` | 6s, wrap around walls, no collisions |
//! | Fruit Fiesta | `!!!` | instant, relocates the food |
//!
//! # Examples
//!
//! ```
//! use pixel_python_types::{BoostKind, Coord, Direction, GameAction, GRID_SIZE};
//!
//! // Parse a boost by name (case-insensitive)
//! let boost = BoostKind::from_str("Phase_Shift").unwrap();
//! assert_eq!(boost, BoostKind::PhaseShift);
//! assert_eq!(boost.duration_s(), 6);
//!
//! // Reversal detection
//! assert!(Direction::Up.is_opposite(Direction::Down));
//!
//! // Stepping and wrapping
//! let head = Coord::new(0, 5).step(Direction::Left);
//! assert!(!head.in_bounds());
//! assert_eq!(head.wrapped(), Coord::new(GRID_SIZE - 1, 5));
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("left"), Some(GameAction::Turn(Direction::Left)));
//! ```

use serde::{Deserialize, Serialize};

/// Grid width and height in cells (20x20)
pub const GRID_SIZE: i32 = 20;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Baseline tick interval in milliseconds
pub const GAME_SPEED_START_MS: u32 = 200;

/// Interval of the countdown loop in milliseconds
pub const TIMER_STEP_MS: u32 = 1000;

/// Game length in seconds
pub const GAME_TIMER_START_S: u32 = 180;

/// Points for eating the food
pub const SCORE_FOOD: u32 = 10;

/// Points for eating a bonus fruit
pub const SCORE_BONUS_FRUIT: u32 = 50;

/// Flat bonus per food while Pixel Rush is active
pub const SCORE_PIXEL_RUSH_BONUS: u32 = 5;

/// Score factor while Glitch Multiplier is active
pub const SCORE_MULTIPLIER: u32 = 2;

/// Seconds between bonus fruit spawns
pub const BONUS_FRUIT_SPAWN_RATE_S: u32 = 20;

/// Seconds between boost pickup spawns
pub const BOOST_SPAWN_RATE_S: u32 = 15;

/// Boost durations in seconds
pub const CHRONO_BRAKE_DURATION_S: u32 = 8;
pub const PIXEL_RUSH_DURATION_S: u32 = 10;
pub const GLITCH_MULTIPLIER_DURATION_S: u32 = 7;
pub const PHASE_SHIFT_DURATION_S: u32 = 6;

/// Starting head position (grid center)
pub const SPAWN_COORD: Coord = Coord {
    x: GRID_SIZE / 2,
    y: GRID_SIZE / 2,
};

/// A rank awarded for reaching a minimum score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringTier {
    pub min: u32,
    pub rank: &'static str,
}

/// Rank table, ascending by minimum score
pub const SCORING_TIERS: [ScoringTier; 5] = [
    ScoringTier {
        min: 0,
        rank: "Pixel Pilot",
    },
    ScoringTier {
        min: 500,
        rank: "Grid Runner",
    },
    ScoringTier {
        min: 1000,
        rank: "Vector Viper",
    },
    ScoringTier {
        min: 1500,
        rank: "CRT Conqueror",
    },
    ScoringTier {
        min: 2000,
        rank: "Glitch God",
    },
];


/// A grid cell position
///
/// Signed so that a step off the edge can be represented before it is
/// wrapped or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir` (may be off the grid)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Check if the coordinate lies on the grid
    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Wrap each axis onto the grid (off one edge comes back on the opposite edge)
    pub fn wrapped(self) -> Self {
        Self {
            x: self.x.rem_euclid(GRID_SIZE),
            y: self.y.rem_euclid(GRID_SIZE),
        }
    }

    /// Manhattan distance, ignoring wrap-around
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Movement direction (unit vector on the grid, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)`
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Build from a unit vector; `None` for anything else
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// What a boost does when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostEffect {
    /// Occupies the active boost slot for `duration_s` seconds
    Timed { duration_s: u32 },
    /// Applies once on pickup, never occupies the slot
    Instant,
}

/// The five boost kinds
///
/// - **ChronoBrake**: slows the snake down (tick interval doubled)
/// - **PixelRush**: speeds the snake up and adds a flat food bonus
/// - **GlitchMultiplier**: doubles food and bonus fruit points
/// - **PhaseShift**: walls wrap around and collisions are ignored
/// - **FruitFiesta**: instant, relocates the food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostKind {
    ChronoBrake,
    PixelRush,
    GlitchMultiplier,
    PhaseShift,
    FruitFiesta,
}

impl BoostKind {
    /// Every kind, in spawn-table order
    pub const ALL: [BoostKind; 5] = [
        BoostKind::ChronoBrake,
        BoostKind::PixelRush,
        BoostKind::GlitchMultiplier,
        BoostKind::PhaseShift,
        BoostKind::FruitFiesta,
    ];

    pub fn effect(self) -> BoostEffect {
        match self {
            BoostKind::ChronoBrake => BoostEffect::Timed {
                duration_s: CHRONO_BRAKE_DURATION_S,
            },
            BoostKind::PixelRush => BoostEffect::Timed {
                duration_s: PIXEL_RUSH_DURATION_S,
            },
            BoostKind::GlitchMultiplier => BoostEffect::Timed {
                duration_s: GLITCH_MULTIPLIER_DURATION_S,
            },
            BoostKind::PhaseShift => BoostEffect::Timed {
                duration_s: PHASE_SHIFT_DURATION_S,
            },
            BoostKind::FruitFiesta => BoostEffect::Instant,
        }
    }

    /// Duration in seconds (0 for instant boosts)
    pub fn duration_s(self) -> u32 {
        match self.effect() {
            BoostEffect::Timed { duration_s } => duration_s,
            BoostEffect::Instant => 0,
        }
    }

    pub fn is_instant(self) -> bool {
        self.effect() == BoostEffect::Instant
    }

    /// Display symbol used by HUDs
    pub fn symbol(self) -> &'static str {
        match self {
            BoostKind::ChronoBrake => "S",
            BoostKind::PixelRush => "»",
            BoostKind::GlitchMultiplier => "x2",
            BoostKind::PhaseShift => "░",
            BoostKind::FruitFiesta => "!!!",
        }
    }

    /// Parse boost kind from its snake_case name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chrono_brake" => Some(BoostKind::ChronoBrake),
            "pixel_rush" => Some(BoostKind::PixelRush),
            "glitch_multiplier" => Some(BoostKind::GlitchMultiplier),
            "phase_shift" => Some(BoostKind::PhaseShift),
            "fruit_fiesta" => Some(BoostKind::FruitFiesta),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoostKind::ChronoBrake => "chrono_brake",
            BoostKind::PixelRush => "pixel_rush",
            BoostKind::GlitchMultiplier => "glitch_multiplier",
            BoostKind::PhaseShift => "phase_shift",
            BoostKind::FruitFiesta => "fruit_fiesta",
        }
    }
}

/// A boost waiting on the grid to be collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: BoostKind,
    pub location: Coord,
}

/// The timed boost currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveBoost {
    pub kind: BoostKind,
    pub remaining_s: u32,
}

/// Game lifecycle status
///
/// Only `Playing` lets ticks and timers have an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverCause {
    /// Head left the grid without Phase Shift
    HitWall,
    /// Head ran into the body without Phase Shift
    HitSelf,
    /// Countdown reached zero
    TimeUp,
    /// No free cell left for the food
    BoardFull,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::HitWall => "hit_wall",
            GameOverCause::HitSelf => "hit_self",
            GameOverCause::TimeUp => "time_up",
            GameOverCause::BoardFull => "board_full",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are used by both human input and the autopilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Change heading (reversals are ignored)
    Turn(Direction),
    /// Start a game from the current (idle) state
    Start,
    /// Reset then start
    Restart,
    /// Back to idle with fresh state
    Reset,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use pixel_python_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("UP"), Some(GameAction::Turn(Direction::Up)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(dir) = Direction::from_str(s) {
            return Some(GameAction::Turn(dir));
        }
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "restart" => Some(GameAction::Restart),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Turn(dir) => dir.as_str(),
            GameAction::Start => "start",
            GameAction::Restart => "restart",
            GameAction::Reset => "reset",
        }
    }
}

/// Summary of what the last tick or countdown step did.
///
/// Recorded by the simulation and readable by observers; it carries no state
/// that the snapshot does not already expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameEvent {
    pub ate_food: bool,
    pub ate_bonus_fruit: bool,
    pub points: u32,
    pub collected: Option<BoostKind>,
    pub boost_expired: Option<BoostKind>,
    pub spawned_bonus_fruit: bool,
    pub spawned_pickup: Option<BoostKind>,
    pub game_over: Option<GameOverCause>,
}
