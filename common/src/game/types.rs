#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    /// Screen-space step vector: y grows downwards.
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    GameOver,
    HighScores,
    Options,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Speed,
    Slow,
    BonusPoints,
    Invincible,
    Shrink,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Speed,
        PowerUpKind::Slow,
        PowerUpKind::BonusPoints,
        PowerUpKind::Invincible,
        PowerUpKind::Shrink,
    ];
}

/// A discrete input occurrence, consumed once. Directional keys steer the
/// snake while playing and move menu cursors elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Direction(Direction),
    Confirm,
    Escape,
    Replay,
}

/// Side effects the session asks its shell to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    SaveSettings,
    Quit,
}
