use std::time::Duration;

use thiserror::Error;

pub const MAX_SPEED: u8 = 20;
pub const MAX_COLOR: u8 = 9;

/// How the score shown to the player is worked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    /// Body length minus one.
    BodyLength,
    /// A fixed number of points for every food eaten.
    PerFood(u64),
}

/// Everything the game needs to know at startup. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub interval: Duration,
    pub grow_amount: u32,
    pub food_count: usize,
    /// Growth queued on the freshly spawned one-segment snake.
    pub initial_growth: u32,
    pub scoring: Scoring,
    /// Skip every other tick while heading up or down. Terminal cells are
    /// taller than they are wide, so this evens out the apparent speed.
    pub vertical_skip: bool,
    pub color: u8,
    pub party: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("food count must be at least 1")]
    NoFood,
    #[error("tick interval must be non-zero")]
    ZeroInterval,
    #[error("score step must be non-zero")]
    ZeroScoreStep,
    #[error("color {0} is out of range [0-{max}]", max = MAX_COLOR)]
    ColorOutOfRange(u8),
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            interval: interval_for_speed(18),
            grow_amount: 10,
            food_count: 10,
            initial_growth: 10,
            scoring: Scoring::BodyLength,
            vertical_skip: false,
            color: 3,
            party: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.food_count == 0 {
            return Err(ConfigError::NoFood);
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.scoring == Scoring::PerFood(0) {
            return Err(ConfigError::ZeroScoreStep);
        }
        if self.color > MAX_COLOR {
            return Err(ConfigError::ColorOutOfRange(self.color));
        }
        Ok(())
    }
}

/// Speed 0 ticks every 250ms; each step up takes 12.5ms off, down to a 1ms
/// floor at the top of the range.
pub fn interval_for_speed(speed: u8) -> Duration {
    let speed = speed.min(MAX_SPEED) as u64;
    let millis = 250u64.saturating_sub((25 * speed) / 2);
    Duration::from_millis(millis.max(1))
}
