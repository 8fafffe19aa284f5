use std::collections::HashSet;

use crate::log;

use super::grid::{GridSize, Point};
use super::session_rng::SessionRng;
use super::snake::Snake;

const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Static lethal cells. The set grows by one cell per level-up and never
/// shrinks within a session.
#[derive(Clone, Debug, Default)]
pub struct BarrierField {
    cells: HashSet<Point>,
}

impl BarrierField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &HashSet<Point> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, p: Point) {
        self.cells.insert(p);
    }

    /// Inserts one barrier on a cell disjoint from the snake, the food and
    /// existing barriers. Bounded rejection sampling; gives up silently on
    /// a crowded board.
    pub fn add_random(
        &mut self,
        rng: &mut SessionRng,
        grid: GridSize,
        snake: &Snake,
        food: Point,
    ) {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = Point::new(
                rng.random_range(0..grid.width),
                rng.random_range(0..grid.height),
            );

            if snake.occupies(candidate) || candidate == food || self.cells.contains(&candidate) {
                continue;
            }

            self.cells.insert(candidate);
            log!("Barrier added at ({}, {})", candidate.x, candidate.y);
            return;
        }
    }
}
