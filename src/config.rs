//! Settings passed explicitly into the session driver and the host.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, QuizError};
use crate::problem_engine::{resolve_tier, DifficultyTier, GameMode};

/// What one session is played with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Seconds per arithmetic round; word problems stretch it, see
    /// [`round_duration`](crate::problem_engine::round_duration).
    pub time_budget: u32,
    /// Fixed seed for a reproducible session.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Arithmetic,
            time_budget: DifficultyTier::Easy.time_budget(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(mode: GameMode, time_budget: u32) -> Self {
        Self { mode, time_budget, rng_seed: None }
    }

    /// Preset budget for `tier`.
    pub fn for_tier(mode: GameMode, tier: DifficultyTier) -> Self {
        Self::new(mode, tier.time_budget())
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn tier(&self) -> DifficultyTier {
        resolve_tier(self.time_budget)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.time_budget == 0 {
            return Err(QuizError::InvalidConfig {
                field: "time_budget",
                value: self.time_budget.to_string(),
            });
        }
        Ok(())
    }
}

/// Host-level settings: the game plus who plays it and where scores go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    /// Signed-in player; `None` plays anonymously and nothing is saved.
    pub player_name: Option<String>,
    pub store_path: PathBuf,
    pub log_level: String,
    pub leaderboard_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            player_name: None,
            store_path: PathBuf::from("math_drill_scores.json"),
            log_level: "info".to_string(),
            leaderboard_limit: 50,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `MATH_DRILL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a TOML file, then apply environment overrides on top.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let base: AppConfig = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name, then validate.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MATH_DRILL_MODE") {
            self.game.mode = v.parse()?;
        }
        if let Some(v) = lookup("MATH_DRILL_TIME_BUDGET") {
            self.game.time_budget = parse_field("time_budget", &v)?;
        }
        if let Some(v) = lookup("MATH_DRILL_SEED") {
            self.game.rng_seed = Some(parse_field("rng_seed", &v)?);
        }
        if let Some(v) = lookup("MATH_DRILL_PLAYER") {
            let name = v.trim();
            self.player_name = (!name.is_empty()).then(|| name.to_string());
        }
        if let Some(v) = lookup("MATH_DRILL_STORE") {
            self.store_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("MATH_DRILL_LOG") {
            self.log_level = v;
        }
        if let Some(v) = lookup("MATH_DRILL_LEADERBOARD_LIMIT") {
            self.leaderboard_limit = parse_field("leaderboard_limit", &v)?;
        }
        self.game.validate()?;
        Ok(self)
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, QuizError> {
    value
        .trim()
        .parse()
        .map_err(|_| QuizError::InvalidConfig { field, value: value.to_string() })
}
