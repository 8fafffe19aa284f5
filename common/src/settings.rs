use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub timestamp: i64,
}

/// Player-facing settings persisted between runs, together with the
/// high-score table. Loaded once at startup, written on options exit and
/// on every new score insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub difficulty: u32,
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub grid_enabled: bool,
    pub walls_enabled: bool,
    #[serde(default)]
    pub high_scores: Vec<HighScoreEntry>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: 1,
            sound_enabled: true,
            music_enabled: true,
            grid_enabled: true,
            walls_enabled: true,
            high_scores: Vec::new(),
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(1..=5).contains(&self.difficulty) {
            return Err("Difficulty must be between 1 and 5".to_string());
        }
        Ok(())
    }
}

impl GameSettings {
    /// Inserts a finished game into the high-score table, keeping it
    /// sorted descending by score and capped at [`MAX_HIGH_SCORES`].
    pub fn add_score(&mut self, name: &str, score: u32, level: u32) {
        self.high_scores.push(HighScoreEntry {
            name: name.to_string(),
            score,
            level,
            timestamp: Utc::now().timestamp(),
        });
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(MAX_HIGH_SCORES);
    }

    pub fn raise_difficulty(&mut self) {
        self.difficulty = (self.difficulty + 1).min(5);
    }

    pub fn lower_difficulty(&mut self) {
        self.difficulty = (self.difficulty - 1).max(1);
    }
}
