use std::time::{Duration, Instant};

use crate::log;
use crate::settings::GameSettings;

use super::barriers::BarrierField;
use super::collectibles::{Food, POWER_UP_SPAWN_INTERVAL, PowerUp};
use super::grid::{GridSize, WallMode};
#[cfg(test)]
use super::grid::Point;
use super::session_rng::SessionRng;
use super::snake::Snake;
use super::sounds::{SoundEffect, SoundPlayer};
use super::types::{Direction, InputEvent, PowerUpKind, SessionCommand, SessionState};

pub const MENU_ITEMS: [&str; 4] = ["Play", "Options", "High Scores", "Quit"];
pub const OPTION_ROWS: usize = 5;

const BASE_MOVE_DELAY_MS: f32 = 150.0;
const MIN_MOVE_DELAY_MS: f32 = 50.0;
const DEFAULT_PLAYER_NAME: &str = "Player";

/// Owns every piece of mutable game state and advances it from two inputs
/// only: discrete input events and the per-frame monotonic timestamp. All
/// fields are always initialized; `reset` rebuilds them for a replay.
pub struct GameSession {
    grid: GridSize,
    settings: GameSettings,
    rng: SessionRng,
    state: SessionState,
    snake: Snake,
    food: Food,
    power_up: PowerUp,
    barriers: BarrierField,
    score: u32,
    level: u32,
    move_timer: Instant,
    move_delay: Duration,
    power_up_timer: Instant,
    menu_cursor: usize,
    options_cursor: usize,
}

impl GameSession {
    pub fn new(grid: GridSize, settings: GameSettings, rng: SessionRng, now: Instant) -> Self {
        let mut session = Self {
            grid,
            settings,
            rng,
            state: SessionState::Menu,
            snake: Snake::new(grid.center(), Direction::Right),
            food: Food::new(grid.center()),
            power_up: PowerUp::new(now),
            barriers: BarrierField::new(),
            score: 0,
            level: 1,
            move_timer: now,
            move_delay: Duration::ZERO,
            power_up_timer: now,
            menu_cursor: 0,
            options_cursor: 0,
        };
        session.reset(now);
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn power_up(&self) -> &PowerUp {
        &self.power_up
    }

    pub fn barriers(&self) -> &BarrierField {
        &self.barriers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn move_delay(&self) -> Duration {
        self.move_delay
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn options_cursor(&self) -> usize {
        self.options_cursor
    }

    fn wall_mode(&self) -> WallMode {
        if self.settings.walls_enabled {
            WallMode::Lethal
        } else {
            WallMode::Wrap
        }
    }

    /// Rebuilds the playing field for a fresh run. Settings and high
    /// scores survive; score, level, snake and barriers do not.
    pub fn reset(&mut self, now: Instant) {
        self.snake = Snake::new(self.grid.center(), Direction::Right);
        self.barriers.clear();
        self.food
            .respawn(&mut self.rng, self.grid, &self.snake, self.barriers.cells());
        self.power_up = PowerUp::new(now);
        self.score = 0;
        self.level = 1;
        self.move_timer = now;
        self.power_up_timer = now;
        self.move_delay = self.compute_move_delay();
    }

    fn start_game(&mut self, now: Instant) {
        self.reset(now);
        self.state = SessionState::Playing;
        log!("Game started (difficulty {})", self.settings.difficulty);
    }

    /// Applies one discrete input event to the state machine. Returns a
    /// command when the shell has to persist settings or quit.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Option<SessionCommand> {
        match self.state {
            SessionState::Menu => self.handle_menu_input(event, now),
            SessionState::Playing => {
                match event {
                    InputEvent::Direction(d) => self.snake.set_direction(d),
                    InputEvent::Escape => self.state = SessionState::Paused,
                    InputEvent::Confirm | InputEvent::Replay => {}
                }
                None
            }
            SessionState::Paused => {
                match event {
                    InputEvent::Escape => self.state = SessionState::Playing,
                    InputEvent::Confirm => self.state = SessionState::Menu,
                    InputEvent::Direction(_) | InputEvent::Replay => {}
                }
                None
            }
            SessionState::GameOver => {
                match event {
                    InputEvent::Confirm => self.state = SessionState::Menu,
                    InputEvent::Replay => self.start_game(now),
                    InputEvent::Direction(_) | InputEvent::Escape => {}
                }
                None
            }
            SessionState::HighScores => {
                if event == InputEvent::Escape {
                    self.state = SessionState::Menu;
                }
                None
            }
            SessionState::Options => self.handle_options_input(event),
        }
    }

    fn handle_menu_input(&mut self, event: InputEvent, now: Instant) -> Option<SessionCommand> {
        match event {
            InputEvent::Direction(Direction::Up) => {
                self.menu_cursor = (self.menu_cursor + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
            }
            InputEvent::Direction(Direction::Down) => {
                self.menu_cursor = (self.menu_cursor + 1) % MENU_ITEMS.len();
            }
            InputEvent::Confirm => match self.menu_cursor {
                0 => self.start_game(now),
                1 => {
                    self.options_cursor = 0;
                    self.state = SessionState::Options;
                }
                2 => self.state = SessionState::HighScores,
                _ => return Some(SessionCommand::Quit),
            },
            _ => {}
        }
        None
    }

    fn handle_options_input(&mut self, event: InputEvent) -> Option<SessionCommand> {
        match event {
            InputEvent::Direction(Direction::Up) => {
                self.options_cursor = (self.options_cursor + OPTION_ROWS - 1) % OPTION_ROWS;
            }
            InputEvent::Direction(Direction::Down) => {
                self.options_cursor = (self.options_cursor + 1) % OPTION_ROWS;
            }
            InputEvent::Direction(Direction::Left) => {
                if self.options_cursor == 0 {
                    self.settings.lower_difficulty();
                }
            }
            InputEvent::Direction(Direction::Right) => {
                if self.options_cursor == 0 {
                    self.settings.raise_difficulty();
                }
            }
            InputEvent::Confirm => match self.options_cursor {
                1 => self.settings.sound_enabled = !self.settings.sound_enabled,
                2 => self.settings.music_enabled = !self.settings.music_enabled,
                3 => self.settings.grid_enabled = !self.settings.grid_enabled,
                4 => self.settings.walls_enabled = !self.settings.walls_enabled,
                _ => {}
            },
            InputEvent::Escape => {
                self.state = SessionState::Menu;
                return Some(SessionCommand::SaveSettings);
            }
            InputEvent::Replay => {}
        }
        None
    }

    /// One simulation pass. Only `Playing` advances anything; the snake
    /// moves when the move delay elapsed, and collisions are evaluated only
    /// on ticks where a move occurred.
    pub fn tick(
        &mut self,
        now: Instant,
        sounds: &mut dyn SoundPlayer,
    ) -> Option<SessionCommand> {
        if self.state != SessionState::Playing {
            return None;
        }

        self.snake.update_effects(now);

        let mut command = None;
        if now.duration_since(self.move_timer) > self.move_delay {
            self.move_timer = now;
            self.snake.advance(self.grid, self.wall_mode(), now);
            self.move_delay = self.compute_move_delay();
            command = self.resolve_after_move(now, sounds);
        }

        if self.power_up.should_despawn(now) {
            self.power_up.deactivate();
        }
        if !self.power_up.is_active()
            && now.duration_since(self.power_up_timer) > POWER_UP_SPAWN_INTERVAL
        {
            self.power_up.respawn(
                &mut self.rng,
                self.grid,
                &self.snake,
                self.barriers.cells(),
                self.food.position(),
                now,
            );
            self.power_up_timer = now;
        }

        command
    }

    fn resolve_after_move(
        &mut self,
        now: Instant,
        sounds: &mut dyn SoundPlayer,
    ) -> Option<SessionCommand> {
        if self.snake.self_collision(now)
            || self.snake.wall_collision(self.grid, self.wall_mode(), now)
            || self.snake.barrier_collision(self.barriers.cells(), now)
        {
            self.play(sounds, SoundEffect::Crash);
            self.settings
                .add_score(DEFAULT_PLAYER_NAME, self.score, self.level);
            self.state = SessionState::GameOver;
            log!(
                "Game over at score {} (level {})",
                self.score,
                self.level
            );
            return Some(SessionCommand::SaveSettings);
        }

        if self.snake.head() == self.food.position() {
            self.play(sounds, SoundEffect::Eat);
            self.snake.grow(1);
            self.score += 10 * self.level;
            log!("Food eaten. Score: {}", self.score);

            // Every fifth food within a level crosses this threshold.
            if self.score % (5 * 10 * self.level) == 0 {
                self.level += 1;
                self.barriers
                    .add_random(&mut self.rng, self.grid, &self.snake, self.food.position());
                log!("Level up: {}", self.level);
            }

            self.food
                .respawn(&mut self.rng, self.grid, &self.snake, self.barriers.cells());
        } else if self.power_up.is_active() && self.snake.head() == self.power_up.position() {
            self.play(sounds, SoundEffect::PowerUp);
            match self.power_up.kind() {
                PowerUpKind::BonusPoints => self.score += 50,
                kind => self.snake.apply_power_up(kind, now),
            }
            self.power_up.deactivate();
        }

        None
    }

    fn play(&self, sounds: &mut dyn SoundPlayer, effect: SoundEffect) {
        if self.settings.sound_enabled {
            sounds.play(effect);
        }
    }

    /// Difficulty and level each shave the base delay down to a fixed
    /// floor; the snake's speed modifier divides the result last.
    fn compute_move_delay(&self) -> Duration {
        let difficulty_factor = self.settings.difficulty as f32 * 10.0;
        let level_factor = (self.level as f32 * 5.0).min(50.0);
        let delay_ms =
            (BASE_MOVE_DELAY_MS - difficulty_factor - level_factor).max(MIN_MOVE_DELAY_MS);
        Duration::from_micros((delay_ms / self.snake.speed_modifier() * 1000.0) as u64)
    }

    #[cfg(test)]
    pub(crate) fn set_food_position(&mut self, position: Point) {
        self.food = Food::new(position);
    }

    #[cfg(test)]
    pub(crate) fn place_barrier(&mut self, position: Point) {
        self.barriers.insert(position);
    }

    #[cfg(test)]
    pub(crate) fn force_power_up(&mut self, kind: PowerUpKind, position: Point, now: Instant) {
        self.power_up = PowerUp::with_state(kind, position, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sounds::NullSoundPlayer;

    const STEP: Duration = Duration::from_millis(300);

    struct RecordingSounds {
        played: Vec<SoundEffect>,
    }

    impl RecordingSounds {
        fn new() -> Self {
            Self { played: Vec::new() }
        }
    }

    impl SoundPlayer for RecordingSounds {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    fn new_session(settings: GameSettings) -> (GameSession, Instant) {
        let now = Instant::now();
        let session = GameSession::new(GridSize::new(40, 30), settings, SessionRng::new(42), now);
        (session, now)
    }

    fn started_session(settings: GameSettings) -> (GameSession, Instant) {
        let (mut session, now) = new_session(settings);
        session.handle_input(InputEvent::Confirm, now);
        assert_eq!(session.state(), SessionState::Playing);
        (session, now)
    }

    #[test]
    fn test_initial_state_is_menu() {
        let (session, _) = new_session(GameSettings::default());
        assert_eq!(session.state(), SessionState::Menu);
        assert_eq!(session.menu_cursor(), 0);
    }

    #[test]
    fn test_menu_cursor_wraps_both_ways() {
        let (mut session, now) = new_session(GameSettings::default());
        session.handle_input(InputEvent::Direction(Direction::Up), now);
        assert_eq!(session.menu_cursor(), MENU_ITEMS.len() - 1);
        session.handle_input(InputEvent::Direction(Direction::Down), now);
        assert_eq!(session.menu_cursor(), 0);
    }

    #[test]
    fn test_quit_selected_from_menu() {
        let (mut session, now) = new_session(GameSettings::default());
        session.handle_input(InputEvent::Direction(Direction::Up), now);
        let command = session.handle_input(InputEvent::Confirm, now);
        assert_eq!(command, Some(SessionCommand::Quit));
    }

    #[test]
    fn test_start_game_resets_field() {
        let (session, _) = started_session(GameSettings::default());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.snake().head(), session.grid().center());
        assert!(session.barriers().is_empty());
        assert!(!session.power_up().is_active());
    }

    #[test]
    fn test_no_move_before_delay_elapsed() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();
        session.tick(now + Duration::from_millis(50), &mut NullSoundPlayer);
        assert_eq!(session.snake().head(), head);
        session.tick(now + Duration::from_millis(200), &mut NullSoundPlayer);
        assert_eq!(
            session.snake().head(),
            Point::new(head.x + 1, head.y)
        );
    }

    #[test]
    fn test_eating_food_scores_and_grows() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();
        let food_cell = Point::new(head.x + 1, head.y);
        session.set_food_position(food_cell);

        let mut sounds = RecordingSounds::new();
        session.tick(now + STEP, &mut sounds);
        assert_eq!(session.score(), 10);
        assert_eq!(session.level(), 1);
        assert_eq!(session.snake().len(), 1);
        assert_eq!(sounds.played, vec![SoundEffect::Eat]);
        assert_ne!(session.food().position(), food_cell);

        session.tick(now + STEP * 2, &mut sounds);
        assert_eq!(session.snake().len(), 2);
    }

    #[test]
    fn test_level_up_adds_exactly_one_barrier() {
        let (mut session, now) = started_session(GameSettings::default());

        for i in 1..=5u32 {
            let head = session.snake().head();
            session.set_food_position(Point::new(head.x + 1, head.y));
            session.tick(now + STEP * i, &mut NullSoundPlayer);
        }

        assert_eq!(session.score(), 50);
        assert_eq!(session.level(), 2);
        assert_eq!(session.barriers().len(), 1);
        for cell in session.barriers().cells() {
            assert!(!session.snake().occupies(*cell));
            assert_ne!(*cell, session.food().position());
        }
    }

    #[test]
    fn test_lethal_wall_ends_session() {
        let (mut session, now) = started_session(GameSettings::default());
        session.set_food_position(Point::new(0, 0));

        let mut last_command = None;
        for i in 1..=25u32 {
            last_command = session.tick(now + STEP * i, &mut NullSoundPlayer);
            if session.state() == SessionState::GameOver {
                break;
            }
        }

        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(last_command, Some(SessionCommand::SaveSettings));
        assert_eq!(session.settings().high_scores.len(), 1);
    }

    #[test]
    fn test_wrap_mode_survives_edge_crossing() {
        let settings = GameSettings {
            walls_enabled: false,
            ..GameSettings::default()
        };
        let (mut session, now) = started_session(settings);
        session.set_food_position(Point::new(0, 0));

        for i in 1..=25u32 {
            session.tick(now + STEP * i, &mut NullSoundPlayer);
        }
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.grid().contains(session.snake().head()));
    }

    #[test]
    fn test_barrier_collision_ends_session_with_crash() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();
        session.set_food_position(Point::new(0, 0));
        session.place_barrier(Point::new(head.x + 1, head.y));

        let mut sounds = RecordingSounds::new();
        let command = session.tick(now + STEP, &mut sounds);
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(command, Some(SessionCommand::SaveSettings));
        assert_eq!(sounds.played, vec![SoundEffect::Crash]);
    }

    #[test]
    fn test_sound_disabled_silences_effects() {
        let settings = GameSettings {
            sound_enabled: false,
            ..GameSettings::default()
        };
        let (mut session, now) = started_session(settings);
        let head = session.snake().head();
        session.set_food_position(Point::new(0, 0));
        session.place_barrier(Point::new(head.x + 1, head.y));

        let mut sounds = RecordingSounds::new();
        session.tick(now + STEP, &mut sounds);
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(sounds.played.is_empty());
    }

    #[test]
    fn test_bonus_points_power_up_scores_directly() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();
        session.set_food_position(Point::new(0, 0));
        session.force_power_up(PowerUpKind::BonusPoints, Point::new(head.x + 1, head.y), now);

        let mut sounds = RecordingSounds::new();
        session.tick(now + STEP, &mut sounds);
        assert_eq!(session.score(), 50);
        assert!(!session.power_up().is_active());
        assert_eq!(session.snake().len(), 1);
        assert_eq!(sounds.played, vec![SoundEffect::PowerUp]);
    }

    #[test]
    fn test_speed_power_up_shortens_move_delay() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();
        session.set_food_position(Point::new(0, 0));
        session.force_power_up(PowerUpKind::Speed, Point::new(head.x + 1, head.y), now);

        session.tick(now + STEP, &mut NullSoundPlayer);
        assert_eq!(session.snake().speed_modifier(), 1.5);

        session.tick(now + STEP * 2, &mut NullSoundPlayer);
        // 150 - 10 (difficulty 1) - 5 (level 1) = 135 ms, divided by 1.5.
        assert_eq!(session.move_delay().as_millis(), 90);
    }

    #[test]
    fn test_power_up_spawn_cadence_and_expiry() {
        let (mut session, now) = started_session(GameSettings::default());
        session.set_food_position(Point::new(0, 0));

        session.tick(now + Duration::from_millis(14_000), &mut NullSoundPlayer);
        assert!(!session.power_up().is_active());

        let spawn_time = now + Duration::from_millis(15_100);
        session.tick(spawn_time, &mut NullSoundPlayer);
        assert!(session.power_up().is_active());

        session.tick(spawn_time + Duration::from_millis(10_050), &mut NullSoundPlayer);
        assert!(!session.power_up().is_active());
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();

        session.handle_input(InputEvent::Escape, now);
        assert_eq!(session.state(), SessionState::Paused);
        session.tick(now + STEP, &mut NullSoundPlayer);
        assert_eq!(session.snake().head(), head);

        session.handle_input(InputEvent::Escape, now + STEP);
        assert_eq!(session.state(), SessionState::Playing);

        session.handle_input(InputEvent::Escape, now + STEP);
        session.handle_input(InputEvent::Confirm, now + STEP);
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_options_toggles_and_saves_on_exit() {
        let (mut session, now) = new_session(GameSettings::default());
        session.handle_input(InputEvent::Direction(Direction::Down), now);
        session.handle_input(InputEvent::Confirm, now);
        assert_eq!(session.state(), SessionState::Options);

        session.handle_input(InputEvent::Direction(Direction::Right), now);
        session.handle_input(InputEvent::Direction(Direction::Right), now);
        assert_eq!(session.settings().difficulty, 3);
        session.handle_input(InputEvent::Direction(Direction::Left), now);
        assert_eq!(session.settings().difficulty, 2);

        session.handle_input(InputEvent::Direction(Direction::Down), now);
        session.handle_input(InputEvent::Confirm, now);
        assert!(!session.settings().sound_enabled);

        let command = session.handle_input(InputEvent::Escape, now);
        assert_eq!(command, Some(SessionCommand::SaveSettings));
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_replay_from_game_over_restarts() {
        let (mut session, now) = started_session(GameSettings::default());
        let head = session.snake().head();
        session.set_food_position(Point::new(0, 0));
        session.place_barrier(Point::new(head.x + 1, head.y));
        session.tick(now + STEP, &mut NullSoundPlayer);
        assert_eq!(session.state(), SessionState::GameOver);

        session.handle_input(InputEvent::Replay, now + STEP * 2);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert!(session.barriers().is_empty());
    }

    #[test]
    fn test_high_scores_navigation() {
        let (mut session, now) = new_session(GameSettings::default());
        session.handle_input(InputEvent::Direction(Direction::Down), now);
        session.handle_input(InputEvent::Direction(Direction::Down), now);
        session.handle_input(InputEvent::Confirm, now);
        assert_eq!(session.state(), SessionState::HighScores);
        session.handle_input(InputEvent::Escape, now);
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_move_delay_formula() {
        let settings = GameSettings {
            difficulty: 5,
            ..GameSettings::default()
        };
        let (session, _) = new_session(settings);
        // 150 - 50 - 5 = 95 ms at level 1.
        assert_eq!(session.move_delay().as_millis(), 95);

        let (session, _) = new_session(GameSettings::default());
        assert_eq!(session.move_delay().as_millis(), 135);
    }
}
