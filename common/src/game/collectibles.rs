use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::log;

use super::grid::{GridSize, Point};
use super::session_rng::SessionRng;
use super::snake::Snake;
use super::types::PowerUpKind;

pub const POWER_UP_LIFETIME: Duration = Duration::from_millis(10_000);
pub const POWER_UP_SPAWN_INTERVAL: Duration = Duration::from_millis(15_000);

fn free_cells(
    grid: GridSize,
    snake: &Snake,
    barriers: &HashSet<Point>,
    also_excluded: Option<Point>,
) -> Vec<Point> {
    grid.cells()
        .filter(|p| !snake.occupies(*p))
        .filter(|p| !barriers.contains(p))
        .filter(|p| Some(*p) != also_excluded)
        .collect()
}

/// The single active food cell. Eating it triggers a respawn; on a full
/// board the previous position is kept rather than failing.
#[derive(Clone, Debug)]
pub struct Food {
    position: Point,
}

impl Food {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn respawn(
        &mut self,
        rng: &mut SessionRng,
        grid: GridSize,
        snake: &Snake,
        barriers: &HashSet<Point>,
    ) {
        let candidates = free_cells(grid, snake, barriers, None);
        if let Some(position) = rng.pick(&candidates) {
            self.position = *position;
        }
    }
}

/// At most one transient power-up exists at a time. While inactive its
/// position is stale and must not be read for gameplay decisions.
#[derive(Clone, Debug)]
pub struct PowerUp {
    position: Point,
    kind: PowerUpKind,
    spawned_at: Instant,
    active: bool,
}

impl PowerUp {
    pub fn new(now: Instant) -> Self {
        Self {
            position: Point::new(0, 0),
            kind: PowerUpKind::Speed,
            spawned_at: now,
            active: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_state(kind: PowerUpKind, position: Point, now: Instant) -> Self {
        Self {
            position,
            kind,
            spawned_at: now,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub fn spawned_at(&self) -> Instant {
        self.spawned_at
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn should_despawn(&self, now: Instant) -> bool {
        self.active && now.duration_since(self.spawned_at) > POWER_UP_LIFETIME
    }

    /// Re-rolls the kind and places the power-up on a cell free of the
    /// snake, barriers and the food. Stays inactive when the board is full.
    pub fn respawn(
        &mut self,
        rng: &mut SessionRng,
        grid: GridSize,
        snake: &Snake,
        barriers: &HashSet<Point>,
        food: Point,
        now: Instant,
    ) {
        let candidates = free_cells(grid, snake, barriers, Some(food));
        let Some(position) = rng.pick(&candidates) else {
            return;
        };

        self.position = *position;
        let kind_index = rng.random_range(0..PowerUpKind::ALL.len());
        self.kind = PowerUpKind::ALL[kind_index];
        self.spawned_at = now;
        self.active = true;
        log!(
            "Power-up {:?} spawned at ({}, {})",
            self.kind,
            self.position.x,
            self.position.y
        );
    }
}
