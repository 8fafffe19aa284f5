pub mod config;
pub mod game;
pub mod logger;
pub mod settings;

pub use settings::{GameSettings, HighScoreEntry};
