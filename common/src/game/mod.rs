mod barriers;
mod collectibles;
mod grid;
mod session;
mod session_rng;
mod snake;
mod sounds;
mod types;

pub use barriers::BarrierField;
pub use collectibles::{Food, POWER_UP_LIFETIME, POWER_UP_SPAWN_INTERVAL, PowerUp};
pub use grid::{GridSize, Point, WallMode};
pub use session::{GameSession, MENU_ITEMS, OPTION_ROWS};
pub use session_rng::SessionRng;
pub use snake::{EFFECT_DURATION, Snake};
pub use sounds::{NullSoundPlayer, SoundEffect, SoundPlayer};
pub use types::{Direction, InputEvent, PowerUpKind, SessionCommand, SessionState};
