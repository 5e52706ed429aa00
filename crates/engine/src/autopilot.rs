//! Autopilot - a greedy input source for headless play.
//!
//! Looks only at a [`GameSnapshot`], like any other observer, and suggests a
//! heading:
//! - never a reversal, never a cell that would end the game
//! - prefers moves that keep at least a snake-length of open space reachable
//! - among those, the one closest to the nearest target (bonus fruit first)

use arrayvec::ArrayVec;

use crate::core::{GameSnapshot, Occupancy};
use crate::types::{BoostKind, Coord, Direction};

/// A candidate move and how good it looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    dir: Direction,
    trapped: bool,
    distance: u32,
}

/// Greedy snake pilot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autopilot {
    /// Whether boost pickups count as targets
    pub chase_boosts: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { chase_boosts: true }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suggest the next heading, or `None` when not playing or boxed in
    pub fn choose(&self, snap: &GameSnapshot) -> Option<Direction> {
        if !snap.playable() {
            return None;
        }

        let phasing = snap.active_boost.map(|b| b.kind) == Some(BoostKind::PhaseShift);
        let head = snap.head();
        let body = Occupancy::from_coords(&snap.snake);
        let targets = self.targets(snap);

        let mut candidates: ArrayVec<Candidate, 4> = ArrayVec::new();
        for dir in Direction::ALL {
            if dir.is_opposite(snap.direction) {
                continue;
            }
            let mut next = head.step(dir);
            if phasing {
                next = next.wrapped();
            } else if !next.in_bounds() || body.is_taken(next) {
                continue;
            }

            let distance = targets
                .iter()
                .map(|t| next.manhattan(*t))
                .min()
                .unwrap_or(0);
            let trapped = !phasing && open_space(&body, next, snap.snake.len()) < snap.snake.len();
            candidates.push(Candidate {
                dir,
                trapped,
                distance,
            });
        }

        candidates
            .iter()
            .min_by_key(|c| (c.trapped, c.distance, c.dir != snap.direction))
            .map(|c| c.dir)
    }

    fn targets(&self, snap: &GameSnapshot) -> Vec<Coord> {
        if let Some(fruit) = snap.bonus_fruit {
            return vec![fruit];
        }
        let mut targets = vec![snap.food];
        if self.chase_boosts {
            targets.extend(snap.pickups.iter().map(|p| p.location));
        }
        targets
    }
}

/// Cells reachable from `start` without crossing the body, counted up to `limit`
fn open_space(body: &Occupancy, start: Coord, limit: usize) -> usize {
    let mut seen = body.clone();
    let mut stack = vec![start];
    seen.mark(start);
    let mut count = 0usize;

    while let Some(c) = stack.pop() {
        count += 1;
        if count >= limit {
            break;
        }
        for dir in Direction::ALL {
            let n = c.step(dir);
            if n.in_bounds() && !seen.is_taken(n) {
                seen.mark(n);
                stack.push(n);
            }
        }
    }
    count
}
