// Game configuration loaded from RON
//
// Every field has a default, so a config file only lists what it overrides:
//
//     (
//         movement: (acceleration_mode: TimeScaled, acceleration: 12.0),
//         regeneration: (threshold: 200.0, amount: 500.0),
//     )

use std::fs;
use std::path::Path;

use glam::Vec2;
use ron::Options;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::engine::physics::DEFAULT_GRAVITY;
use crate::game::characters::controller::PLAYER_MAX_HEALTH;
use crate::game::characters::{CombatProfile, MovementStats};
use crate::game::enemies::{BreathProfile, Regeneration, GHOST_MAX_HEALTH};
use crate::game::environment::PLATFORM_SPEED;
use crate::game::ui::ALERT_WAIT_TIME;

/// All tunable values of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementStats,
    pub combat: CombatProfile,
    pub player_max_health: f32,
    pub enemy_max_health: f32,
    /// Enemies heal themselves when set
    pub regeneration: Option<Regeneration>,
    pub breath: BreathProfile,
    pub platform_speed: f32,
    pub alert_wait_time: f32,
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            movement: MovementStats::default(),
            combat: CombatProfile::default(),
            player_max_health: PLAYER_MAX_HEALTH,
            enemy_max_health: GHOST_MAX_HEALTH,
            regeneration: None,
            breath: BreathProfile::default(),
            platform_speed: PLATFORM_SPEED,
            alert_wait_time: ALERT_WAIT_TIME,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

/// RON options with `IMPLICIT_SOME`, so optional sections need no `Some(..)`
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl GameConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents, &path.display().to_string())?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text; `file` names the source in errors
    pub fn from_ron_str(contents: &str, file: &str) -> Result<Self, ConfigError> {
        let config: Self = ron_options()
            .from_str(contents)
            .map_err(|e| ConfigError::Parse {
                file: file.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.combat.validate()?;
        self.breath.validate()?;
        if let Some(regeneration) = &self.regeneration {
            regeneration.validate()?;
        }

        let positive = [
            ("player_max_health", self.player_max_health),
            ("enemy_max_health", self.enemy_max_health),
            ("platform_speed", self.platform_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        if !(self.alert_wait_time >= 0.0) {
            return Err(ConfigError::invalid("alert_wait_time", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::AccelerationMode;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enemy_max_health, 20.0);
        assert_eq!(config.alert_wait_time, 3.0);
        assert_eq!(config.platform_speed, 3.0);
        assert!(config.regeneration.is_none());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = GameConfig::from_ron_str("()", "empty.ron").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let text = r#"(
            movement: (acceleration_mode: TimeScaled, acceleration: 12.0),
            regeneration: (threshold: 150.0),
            breath: (cooldown: 1.0),
        )"#;
        let config = GameConfig::from_ron_str(text, "test.ron").unwrap();
        assert_eq!(config.movement.acceleration_mode, AccelerationMode::TimeScaled);
        assert_eq!(config.movement.acceleration, 12.0);
        assert_eq!(config.movement.walk_speed_max, 3.0);
        let regeneration = config.regeneration.unwrap();
        assert_eq!(regeneration.threshold, 150.0);
        assert_eq!(regeneration.amount, 500.0);
        assert_eq!(config.breath.cooldown, 1.0);
        assert_eq!(config.breath.breath_radius, 1.4);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = GameConfig::from_ron_str("(movement: oops)", "broken.ron").unwrap_err();
        match err {
            ConfigError::Parse { file, .. } => assert_eq!(file, "broken.ron"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_ron_str("(platform_speed: 0.0)", "bad.ron").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "platform_speed",
                ..
            }
        ));

        let err = GameConfig::from_ron_str(
            "(movement: (walk_speed_max: 8.0, run_speed_max: 6.0))",
            "bad.ron",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/game.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
