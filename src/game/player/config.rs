// Player tunables

use serde::{Deserialize, Serialize};

use crate::config::{ensure_positive, Validate};
use crate::error::BehaviorError;

/// Movement and timing values for the player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Ground speed in units per second
    pub move_speed: f32,
    /// Fraction of ground speed available in the air
    pub air_multiplier: f32,
    /// Upward velocity of a jump
    pub jump_force: f32,
    /// Seconds before another jump is accepted
    pub jump_cooldown: f32,
    /// Seconds the double-jump flag stays raised
    pub double_jump_window: f32,
    /// Facing interpolation rate (per second)
    pub turn_speed: f32,
}

/// Baseline player tuning
pub const BASE_PLAYER: PlayerConfig = PlayerConfig {
    move_speed: 7.0,
    air_multiplier: 0.4,
    jump_force: 5.0,
    jump_cooldown: 0.25,
    double_jump_window: 0.5,
    turn_speed: 10.0,
};

impl Default for PlayerConfig {
    fn default() -> Self {
        BASE_PLAYER
    }
}

impl Validate for PlayerConfig {
    fn validate(&self) -> Result<(), BehaviorError> {
        ensure_positive("move_speed", self.move_speed)?;
        ensure_positive("jump_force", self.jump_force)?;
        ensure_positive("jump_cooldown", self.jump_cooldown)?;
        ensure_positive("double_jump_window", self.double_jump_window)?;
        ensure_positive("turn_speed", self.turn_speed)?;
        if !(0.0..=1.0).contains(&self.air_multiplier) {
            return Err(BehaviorError::InvalidConfig(format!(
                "air_multiplier must be within 0..=1, got {}",
                self.air_multiplier
            )));
        }
        Ok(())
    }
}
