//! Grid module - occupancy, bounds and free-cell selection
//!
//! The grid is 20x20 and stored as a flat occupancy array (row-major,
//! `y * GRID_SIZE + x`). Nothing persists here between calls: the game state
//! builds an occupancy map from the snake and items whenever it needs a
//! free cell.

use crate::rng::GameRng;
use crate::types::{Coord, GRID_CELLS, GRID_SIZE};

/// Rejection-sampling attempts before falling back to the explicit free list
pub const MAX_REJECTION_ATTEMPTS: u32 = 64;

/// Which cells are taken - flat array of `GRID_CELLS` flags
#[derive(Debug, Clone, PartialEq)]
pub struct Occupancy {
    cells: [bool; GRID_CELLS],
    taken: usize,
}

impl Occupancy {
    /// Create an empty occupancy map
    pub fn new() -> Self {
        Self {
            cells: [false; GRID_CELLS],
            taken: 0,
        }
    }

    /// Build from any set of coordinates (off-grid ones are ignored)
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Self {
        let mut occ = Self::new();
        for &c in coords {
            occ.mark(c);
        }
        occ
    }

    #[inline(always)]
    fn index(c: Coord) -> Option<usize> {
        if !c.in_bounds() {
            return None;
        }
        Some((c.y as usize) * (GRID_SIZE as usize) + (c.x as usize))
    }

    /// Mark a cell as taken. Returns false if off-grid.
    pub fn mark(&mut self, c: Coord) -> bool {
        match Self::index(c) {
            Some(idx) => {
                if !self.cells[idx] {
                    self.cells[idx] = true;
                    self.taken += 1;
                }
                true
            }
            None => false,
        }
    }

    pub fn is_taken(&self, c: Coord) -> bool {
        Self::index(c).is_some_and(|idx| self.cells[idx])
    }

    pub fn free_count(&self) -> usize {
        GRID_CELLS - self.taken
    }

    /// Pick a free cell uniformly at random.
    ///
    /// Tries rejection sampling first, then walks the explicit free list so a
    /// nearly full grid still terminates. `None` when no cell is free.
    pub fn random_free(&self, rng: &mut GameRng) -> Option<Coord> {
        let free = self.free_count();
        if free == 0 {
            return None;
        }

        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let c = Coord::new(rng.next_axis(), rng.next_axis());
            if !self.is_taken(c) {
                return Some(c);
            }
        }

        let nth = rng.next_range(free);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .nth(nth)
            .map(|(idx, _)| {
                Coord::new(
                    (idx % GRID_SIZE as usize) as i32,
                    (idx / GRID_SIZE as usize) as i32,
                )
            })
    }
}

impl Default for Occupancy {
    fn default() -> Self {
        Self::new()
    }
}

/// Random cell not in `exclude`
pub fn random_free_cell<'a>(
    rng: &mut GameRng,
    exclude: impl IntoIterator<Item = &'a Coord>,
) -> Option<Coord> {
    Occupancy::from_coords(exclude).random_free(rng)
}

/// Check if the coordinate is off the grid
pub fn is_out_of_bounds(c: Coord) -> bool {
    !c.in_bounds()
}

/// Check `head` against every body segment except the current head
pub fn hits_body<'a>(head: Coord, body: impl IntoIterator<Item = &'a Coord>) -> bool {
    body.into_iter().skip(1).any(|&segment| segment == head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(!is_out_of_bounds(Coord::new(0, 0)));
        assert!(!is_out_of_bounds(Coord::new(19, 19)));
        assert!(is_out_of_bounds(Coord::new(-1, 0)));
        assert!(is_out_of_bounds(Coord::new(0, 20)));
        assert!(is_out_of_bounds(Coord::new(20, 5)));
    }

    #[test]
    fn test_hits_body_ignores_head() {
        let body = [Coord::new(5, 5), Coord::new(5, 6), Coord::new(5, 7)];
        assert!(!hits_body(Coord::new(5, 5), &body));
        assert!(hits_body(Coord::new(5, 6), &body));
        assert!(hits_body(Coord::new(5, 7), &body));
        assert!(!hits_body(Coord::new(4, 5), &body));
    }

    #[test]
    fn test_mark_counts_once() {
        let mut occ = Occupancy::new();
        assert!(occ.mark(Coord::new(1, 1)));
        assert!(occ.mark(Coord::new(1, 1)));
        assert!(!occ.mark(Coord::new(-1, 1)));
        assert_eq!(occ.free_count(), GRID_CELLS - 1);
        assert!(occ.is_taken(Coord::new(1, 1)));
        assert!(!occ.is_taken(Coord::new(2, 1)));
    }

    #[test]
    fn test_random_free_avoids_excluded() {
        let mut rng = GameRng::new(3);
        let exclude: Vec<Coord> = (0..GRID_SIZE).map(|x| Coord::new(x, 0)).collect();
        for _ in 0..500 {
            let c = random_free_cell(&mut rng, &exclude).unwrap();
            assert!(c.in_bounds());
            assert_ne!(c.y, 0);
        }
    }

    #[test]
    fn test_random_free_single_cell_left() {
        let mut rng = GameRng::new(11);
        let mut occ = Occupancy::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if (x, y) != (13, 17) {
                    occ.mark(Coord::new(x, y));
                }
            }
        }
        assert_eq!(occ.free_count(), 1);
        assert_eq!(occ.random_free(&mut rng), Some(Coord::new(13, 17)));
    }

    #[test]
    fn test_random_free_full_grid() {
        let mut rng = GameRng::new(11);
        let mut occ = Occupancy::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                occ.mark(Coord::new(x, y));
            }
        }
        assert_eq!(occ.random_free(&mut rng), None);
    }
}
