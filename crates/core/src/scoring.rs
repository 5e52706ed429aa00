//! Scoring module - points, tick speed and ranks
//!
//! Every rule that depends on the active boost lives here so the state
//! machine only asks "how much" and "how fast":
//! - Food is worth 10, +5 under Pixel Rush, doubled under Glitch Multiplier.
//! - Bonus fruit is worth 50, doubled under Glitch Multiplier.
//! - Tick interval is 200ms, halved under Pixel Rush, doubled under Chrono Brake.

use crate::types::{
    BoostKind, ScoringTier, GAME_SPEED_START_MS, SCORE_BONUS_FRUIT, SCORE_FOOD, SCORE_MULTIPLIER,
    SCORE_PIXEL_RUSH_BONUS, SCORING_TIERS,
};

/// Points for eating the food under the given active boost
pub fn food_points(active: Option<BoostKind>) -> u32 {
    match active {
        Some(BoostKind::PixelRush) => SCORE_FOOD + SCORE_PIXEL_RUSH_BONUS,
        Some(BoostKind::GlitchMultiplier) => SCORE_FOOD * SCORE_MULTIPLIER,
        _ => SCORE_FOOD,
    }
}

/// Points for eating a bonus fruit under the given active boost
pub fn bonus_fruit_points(active: Option<BoostKind>) -> u32 {
    match active {
        Some(BoostKind::GlitchMultiplier) => SCORE_BONUS_FRUIT * SCORE_MULTIPLIER,
        _ => SCORE_BONUS_FRUIT,
    }
}

/// Tick interval in milliseconds for the given active boost
pub fn tick_interval_ms(active: Option<BoostKind>) -> u32 {
    match active {
        Some(BoostKind::PixelRush) => GAME_SPEED_START_MS / 2,
        Some(BoostKind::ChronoBrake) => GAME_SPEED_START_MS * 2,
        _ => GAME_SPEED_START_MS,
    }
}

/// Highest tier whose minimum the score reaches
pub fn tier_for_score(score: u32) -> ScoringTier {
    SCORING_TIERS
        .iter()
        .rev()
        .find(|tier| score >= tier.min)
        .copied()
        .unwrap_or(SCORING_TIERS[0])
}

/// Rank name for a final score
pub fn rank_for_score(score: u32) -> &'static str {
    tier_for_score(score).rank
}

/// Render a countdown as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
