use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use super::grid::{GridSize, Point, WallMode};
use super::types::{Direction, PowerUpKind};

pub const EFFECT_DURATION: Duration = Duration::from_millis(5000);

/// The player snake: an ordered body (head first, length >= 1) plus the
/// timed status effects power-ups grant. All timestamps are injected by the
/// caller so a whole frame observes one consistent `now`.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    pending_direction: Option<Direction>,
    grow_pending: u32,
    invincible_until: Option<Instant>,
    speed_modifier: f32,
    speed_until: Option<Instant>,
}

impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start_pos);

        Self {
            body,
            direction,
            pending_direction: None,
            grow_pending: 0,
            invincible_until: None,
            speed_modifier: 1.0,
            speed_until: None,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    pub fn is_invincible(&self, now: Instant) -> bool {
        self.invincible_until.is_some_and(|until| now <= until)
    }

    /// Buffers a heading change for the next move. Rejected when it would
    /// reverse the committed direction in place.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Commits the buffered direction and advances one cell. Movement wraps
    /// toroidally unless walls are lethal; an invincible snake passes
    /// through lethal walls, so its head always stays in bounds.
    pub fn advance(&mut self, grid: GridSize, wall_mode: WallMode, now: Instant) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let head = self.head();
        let (dx, dy) = self.direction.vector();
        let mut next = Point::new(head.x + dx, head.y + dy);
        if wall_mode == WallMode::Wrap || self.is_invincible(now) {
            next = grid.wrap(next);
        }

        self.body.push_front(next);
        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.body.pop_back();
        }
    }

    pub fn grow(&mut self, amount: u32) {
        self.grow_pending += amount;
    }

    pub fn grow_pending(&self) -> u32 {
        self.grow_pending
    }

    /// Removes up to `amount` tail cells, never dropping below length 1.
    pub fn shrink(&mut self, amount: usize) {
        let removable = amount.min(self.body.len() - 1);
        for _ in 0..removable {
            self.body.pop_back();
        }
    }

    pub fn self_collision(&self, now: Instant) -> bool {
        if self.is_invincible(now) {
            return false;
        }
        let head = self.head();
        self.body.iter().skip(1).any(|cell| *cell == head)
    }

    pub fn wall_collision(&self, grid: GridSize, wall_mode: WallMode, now: Instant) -> bool {
        if wall_mode == WallMode::Wrap || self.is_invincible(now) {
            return false;
        }
        !grid.contains(self.head())
    }

    pub fn barrier_collision(&self, barriers: &HashSet<Point>, now: Instant) -> bool {
        if self.is_invincible(now) {
            return false;
        }
        barriers.contains(&self.head())
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind, now: Instant) {
        match kind {
            PowerUpKind::Speed => {
                self.speed_modifier = 1.5;
                self.speed_until = Some(now + EFFECT_DURATION);
            }
            PowerUpKind::Slow => {
                self.speed_modifier = 0.5;
                self.speed_until = Some(now + EFFECT_DURATION);
            }
            PowerUpKind::Invincible => {
                self.invincible_until = Some(now + EFFECT_DURATION);
            }
            PowerUpKind::Shrink => {
                let half = (self.body.len() / 2).max(1);
                self.shrink(half);
            }
            // Scored by the session, not a snake effect.
            PowerUpKind::BonusPoints => {}
        }
    }

    /// Clears expired timed effects. Idempotent, called every tick.
    pub fn update_effects(&mut self, now: Instant) {
        if let Some(until) = self.invincible_until
            && now > until
        {
            self.invincible_until = None;
        }
        if let Some(until) = self.speed_until
            && now > until
        {
            self.speed_modifier = 1.0;
            self.speed_until = None;
        }
    }
}
