// Bear tunables

use serde::{Deserialize, Serialize};

use crate::config::{ensure_positive, Validate};
use crate::error::BehaviorError;

/// Detection, combat and movement values for the bear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearConfig {
    // Detection
    /// Awake bears keep fighting while the target is this close
    pub detection_range: f32,
    /// Attacks land within this distance
    pub attack_range: f32,
    /// A sleeping bear wakes when the target comes this close
    pub sleeping_detection_range: f32,

    // Combat
    /// Seconds between attacks
    pub attack_cooldown: f32,
    /// Navigation speed while fighting
    pub combat_speed: f32,
    /// Navigation speed while sleeping or walking home
    pub patrol_speed: f32,

    // Timing and motion
    /// Seconds the wake-up animation plays before combat
    pub wake_duration: f32,
    /// Navigation stopping distance, also the "arrived home" radius
    pub stopping_distance: f32,
    /// Facing interpolation rate (per second)
    pub turn_speed: f32,

    // Health
    pub max_health: f32,
    /// Seconds a dead bear stays in the world
    pub corpse_lifetime: f32,
}

/// Baseline bear tuning
pub const BASE_BEAR: BearConfig = BearConfig {
    detection_range: 10.0,
    attack_range: 2.0,
    sleeping_detection_range: 5.0,

    attack_cooldown: 2.0,
    combat_speed: 5.0,
    patrol_speed: 3.0,

    wake_duration: 1.5,
    // 80% of the attack range
    stopping_distance: 1.6,
    turn_speed: 5.0,

    max_health: 100.0,
    corpse_lifetime: 5.0,
};

impl Default for BearConfig {
    fn default() -> Self {
        BASE_BEAR
    }
}

impl Validate for BearConfig {
    fn validate(&self) -> Result<(), BehaviorError> {
        ensure_positive("detection_range", self.detection_range)?;
        ensure_positive("attack_range", self.attack_range)?;
        ensure_positive("sleeping_detection_range", self.sleeping_detection_range)?;
        ensure_positive("attack_cooldown", self.attack_cooldown)?;
        ensure_positive("combat_speed", self.combat_speed)?;
        ensure_positive("patrol_speed", self.patrol_speed)?;
        ensure_positive("wake_duration", self.wake_duration)?;
        ensure_positive("stopping_distance", self.stopping_distance)?;
        ensure_positive("turn_speed", self.turn_speed)?;
        ensure_positive("max_health", self.max_health)?;
        ensure_positive("corpse_lifetime", self.corpse_lifetime)?;

        if self.sleeping_detection_range > self.detection_range {
            return Err(BehaviorError::InvalidConfig(format!(
                "sleeping_detection_range ({}) exceeds detection_range ({})",
                self.sleeping_detection_range, self.detection_range
            )));
        }
        if self.stopping_distance > self.attack_range {
            return Err(BehaviorError::InvalidConfig(format!(
                "stopping_distance ({}) exceeds attack_range ({})",
                self.stopping_distance, self.attack_range
            )));
        }
        Ok(())
    }
}
