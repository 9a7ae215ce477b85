use std::env;
use std::str::FromStr;

use crate::domain::rules::DEFAULT_WINNING_SCORE;
use crate::error::AppError;

/// Per-session game settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Cumulative team score that ends the game; `0` ends the game after the
    /// first completed round.
    pub winning_score: i32,
    /// Base RNG seed. `None` draws a fresh seed from OS entropy per game.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            winning_score: DEFAULT_WINNING_SCORE,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Build a config from `TICHU_WINNING_SCORE` and `TICHU_RNG_SEED`,
    /// falling back to defaults when a variable is unset.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(score) = optional_var::<i32>("TICHU_WINNING_SCORE")? {
            config = config.with_winning_score(score)?;
        }
        config.rng_seed = optional_var::<u64>("TICHU_RNG_SEED")?;
        Ok(config)
    }

    pub fn with_winning_score(mut self, winning_score: i32) -> Result<Self, AppError> {
        if winning_score < 0 {
            return Err(AppError::config(format!(
                "Winning score must not be negative, got {winning_score}"
            )));
        }
        self.winning_score = winning_score;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Read and parse an optional environment variable.
fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(AppError::config(format!("{name} is not valid unicode")))
        }
    }
}
