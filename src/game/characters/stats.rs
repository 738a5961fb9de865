// Character tuning - movement stats and combat profile
//
// Values mirror the shipped tuning of the platformer's player character.
// Everything is overridable from the RON game config.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// How the per-tick acceleration is applied to velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccelerationMode {
    /// Add the raw acceleration once per tick (frame-rate dependent)
    #[default]
    PerTick,
    /// Scale the acceleration by the tick duration
    TimeScaled,
}

/// Movement tuning for one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementStats {
    /// Horizontal speed cap while walking (units/second)
    pub walk_speed_max: f32,
    /// Horizontal speed cap while running (units/second)
    pub run_speed_max: f32,
    /// Horizontal acceleration per unit of axis input
    pub acceleration: f32,
    /// How `acceleration` is applied each tick
    pub acceleration_mode: AccelerationMode,
    /// Vertical velocity set by a jump
    pub jump_velocity: f32,
    /// Vertical speed on a ladder at full axis input
    pub climb_speed: f32,
    /// Airborne time after which landing becomes a roll (seconds)
    pub roll_time: f32,
    /// Window after a jump in which ladders and landings are ignored (seconds)
    pub climb_delay_time: f32,
    /// Standing collider width
    pub collider_width: f32,
    /// Standing collider height
    pub collider_height: f32,
    /// Crouching collider height
    pub crouch_height: f32,
}

/// The player character's movement tuning
pub const BASE_MOVEMENT: MovementStats = MovementStats {
    walk_speed_max: 3.0,
    run_speed_max: 6.0,
    acceleration: 0.2,
    acceleration_mode: AccelerationMode::PerTick,
    jump_velocity: 8.0,
    climb_speed: 3.0,
    roll_time: 0.8,
    climb_delay_time: 0.2,
    collider_width: 0.72,
    collider_height: 0.75,
    crouch_height: 0.4,
};

impl Default for MovementStats {
    fn default() -> Self {
        BASE_MOVEMENT
    }
}

impl MovementStats {
    /// Speed cap for the current run flag
    pub fn speed_cap(&self, running: bool) -> f32 {
        if running {
            self.run_speed_max
        } else {
            self.walk_speed_max
        }
    }

    /// Reject tuning the controller cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("walk_speed_max", self.walk_speed_max),
            ("run_speed_max", self.run_speed_max),
            ("jump_velocity", self.jump_velocity),
            ("climb_speed", self.climb_speed),
            ("collider_width", self.collider_width),
            ("collider_height", self.collider_height),
            ("crouch_height", self.crouch_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("acceleration", self.acceleration),
            ("roll_time", self.roll_time),
            ("climb_delay_time", self.climb_delay_time),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("must not be negative, got {value}")));
            }
        }

        if self.run_speed_max < self.walk_speed_max {
            return Err(ConfigError::invalid(
                "run_speed_max",
                "must be at least walk_speed_max",
            ));
        }
        if self.crouch_height > self.collider_height {
            return Err(ConfigError::invalid(
                "crouch_height",
                "must not exceed collider_height",
            ));
        }
        Ok(())
    }
}

/// Per-actor melee constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatProfile {
    /// Radius of the hit circle around the attack anchor
    pub attack_range: f32,
    /// Damage dealt to every target in range
    pub attack_damage: f32,
    /// Attacks per second (cooldown = 1 / rate)
    pub attack_rate: f32,
    /// Horizontal distance from the actor's center to the attack anchor
    pub attack_offset: f32,
    /// Horizontal knockback speed applied to this actor when hit
    pub knockback_x: f32,
    /// Vertical knockback speed applied to this actor when hit
    pub knockback_y: f32,
}

/// The player character's melee profile
pub const BASE_COMBAT: CombatProfile = CombatProfile {
    attack_range: 0.8,
    attack_damage: 5.0,
    attack_rate: 2.0,
    attack_offset: 0.6,
    knockback_x: 1.0,
    knockback_y: 0.5,
};

impl Default for CombatProfile {
    fn default() -> Self {
        BASE_COMBAT
    }
}

impl CombatProfile {
    /// Seconds between two attacks
    pub fn cooldown(&self) -> f32 {
        1.0 / self.attack_rate
    }

    /// Reject tuning the combat system cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.attack_rate > 0.0) {
            return Err(ConfigError::invalid("attack_rate", "must be positive"));
        }
        if !(self.attack_range >= 0.0) {
            return Err(ConfigError::invalid("attack_range", "must not be negative"));
        }
        Ok(())
    }
}
