//! Host engine for the Pixel Python simulation.
//!
//! The core crate never schedules anything; this crate supplies the drivers:
//!
//! - [`clock`]: deterministic fixed-step clock (tick loop + one-second loop)
//! - [`runtime`]: tokio session with real intervals, mpsc input and a `watch` snapshot feed
//! - [`autopilot`]: greedy input source that only reads snapshots
//! - [`headless`]: plays whole games on the fixed-step clock and reports metrics

pub mod autopilot;
pub mod clock;
pub mod headless;
pub mod runtime;

pub use pixel_python_core as core;
pub use pixel_python_types as types;

pub use autopilot::Autopilot;
pub use clock::{ClockReport, GameClock};
pub use headless::{play, play_game, HeadlessConfig, RunMetrics};
pub use runtime::{run_session, Session, SessionCommand, SessionSummary};
