// Health regeneration for training-dummy style enemies

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::game::characters::Health;

/// Heals an actor by a fixed amount every tick its health is below a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regeneration {
    pub threshold: f32,
    pub amount: f32,
}

impl Default for Regeneration {
    fn default() -> Self {
        Self {
            threshold: 200.0,
            amount: 500.0,
        }
    }
}

impl Regeneration {
    /// Heal if below the threshold. Returns true if anything was healed.
    ///
    /// Healing goes through `Health::damage` with a negative amount, so dead
    /// actors stay dead.
    pub fn apply(&self, health: &mut Health) -> bool {
        if health.is_dead() || health.current() >= self.threshold {
            return false;
        }
        health.damage(-self.amount)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.amount > 0.0) {
            return Err(ConfigError::invalid("regeneration.amount", "must be positive"));
        }
        Ok(())
    }
}
