// Health record and the damageable capability

use crate::core::CapabilityError;
use crate::game::save::{SaveState, Saveable};

/// Side effects produced by health changes, drained by the owning actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthSignal {
    /// Damage was applied (play the hurt reaction)
    Damaged { amount: f32, remaining: f32 },
    /// Health reached zero: turn off hit detection and physics response
    Died,
}

/// Current health plus the dead latch
///
/// Once dead, every mutation is ignored. Health is allowed to go negative so
/// the overkill amount stays visible.
#[derive(Debug, Clone)]
pub struct Health {
    max: f32,
    current: f32,
    dead: bool,
    signals: Vec<HealthSignal>,
}

impl Health {
    /// Create a full health record
    pub fn new(max: f32) -> Self {
        Self {
            max,
            current: max,
            dead: false,
            signals: Vec::new(),
        }
    }

    /// Current health
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Starting health
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Check the dead latch
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Health as a fraction of max, clamped to [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Subtract `amount` (negative heals). Returns false when ignored because dead.
    pub fn damage(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }

        self.current -= amount;
        self.signals.push(HealthSignal::Damaged {
            amount,
            remaining: self.current,
        });

        if self.current <= 0.0 {
            self.mark_dead();
        }
        true
    }

    /// Raw scalar for persistence
    pub fn capture(&self) -> f32 {
        self.current
    }

    /// Restore a persisted scalar and re-derive the dead latch.
    /// A dead record ignores the restore, so saves never resurrect.
    pub fn restore(&mut self, value: f32) {
        if self.dead {
            log::debug!("Ignoring health restore of {value} on a dead actor");
            return;
        }

        self.current = value;
        if self.current <= 0.0 {
            self.mark_dead();
        }
    }

    /// Take all pending signals
    pub fn drain_signals(&mut self) -> Vec<HealthSignal> {
        std::mem::take(&mut self.signals)
    }

    fn mark_dead(&mut self) {
        self.dead = true;
        self.signals.push(HealthSignal::Died);
        log::info!("Actor died with {} health", self.current);
    }
}

/// Something that can take damage
///
/// `die` and `knock_back_hit` are optional hooks; actors that do not react to
/// them report `CapabilityError::Unsupported` instead of silently succeeding.
pub trait Damageable {
    /// Apply damage (ignored when dead)
    fn damage_health(&mut self, amount: f32);

    /// Check the dead latch
    fn is_dead(&self) -> bool;

    /// Current health
    fn health(&self) -> f32;

    /// Kill the actor outright
    fn die(&mut self) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported("die"))
    }

    /// Apply damage that also knocks the actor back
    fn knock_back_hit(&mut self, _amount: f32) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported("knock_back_hit"))
    }
}

impl Damageable for Health {
    fn damage_health(&mut self, amount: f32) {
        self.damage(amount);
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn health(&self) -> f32 {
        self.current
    }
}

impl Saveable for Health {
    fn capture_state(&self) -> SaveState {
        SaveState::Health(self.capture())
    }

    fn restore_state(&mut self, state: SaveState) -> Result<(), CapabilityError> {
        match state {
            SaveState::Health(value) => {
                self.restore(value);
                Ok(())
            }
            other => Err(CapabilityError::StateMismatch {
                expected: "health",
                actual: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn death_count(signals: &[HealthSignal]) -> usize {
        signals
            .iter()
            .filter(|s| matches!(s, HealthSignal::Died))
            .count()
    }

    #[test]
    fn test_damage_reduces_health() {
        let mut health = Health::new(20.0);
        assert!(health.damage(5.0));
        assert_eq!(health.current(), 15.0);
        assert!(!health.is_dead());
        assert_eq!(
            health.drain_signals(),
            vec![HealthSignal::Damaged {
                amount: 5.0,
                remaining: 15.0
            }]
        );
    }

    #[test]
    fn test_overkill_then_ignored() {
        let mut health = Health::new(20.0);
        health.damage(25.0);
        assert_eq!(health.current(), -5.0);
        assert!(health.is_dead());

        assert!(!health.damage(5.0));
        assert_eq!(health.current(), -5.0);
        assert_eq!(death_count(&health.drain_signals()), 1);
    }

    #[test]
    fn test_dead_actor_cannot_heal() {
        let mut health = Health::new(10.0);
        health.damage(10.0);
        health.damage(-500.0);
        assert_eq!(health.current(), 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_restore_zero_marks_dead_once() {
        let mut health = Health::new(20.0);
        let captured = {
            let mut saved = Health::new(20.0);
            saved.damage(20.0);
            saved.capture()
        };
        assert_eq!(captured, 0.0);

        health.restore(captured);
        assert!(health.is_dead());
        assert_eq!(death_count(&health.drain_signals()), 1);

        // Restoring again on a dead record is a no-op
        health.restore(captured);
        assert!(health.drain_signals().is_empty());
    }

    #[test]
    fn test_restore_never_resurrects() {
        let mut health = Health::new(20.0);
        health.damage(30.0);
        health.restore(15.0);
        assert!(health.is_dead());
        assert_eq!(health.current(), -10.0);
    }

    #[test]
    fn test_restore_live_value() {
        let mut health = Health::new(20.0);
        health.restore(7.5);
        assert_eq!(health.current(), 7.5);
        assert!(!health.is_dead());
        assert!(health.drain_signals().is_empty());
    }

    #[test]
    fn test_unsupported_hooks() {
        let mut health = Health::new(20.0);
        assert_eq!(health.die(), Err(CapabilityError::Unsupported("die")));
        assert_eq!(
            health.knock_back_hit(3.0),
            Err(CapabilityError::Unsupported("knock_back_hit"))
        );
        assert_eq!(health.current(), 20.0);
    }

    #[test]
    fn test_saveable_roundtrip_and_mismatch() {
        let mut health = Health::new(20.0);
        health.damage(4.0);
        let state = health.capture_state();
        assert_eq!(state, SaveState::Health(16.0));

        let mut restored = Health::new(20.0);
        assert!(restored.restore_state(state).is_ok());
        assert_eq!(restored.current(), 16.0);

        let err = restored.restore_state(SaveState::Position(Vec2::ZERO));
        assert!(matches!(err, Err(CapabilityError::StateMismatch { .. })));
    }

    #[test]
    fn test_fraction() {
        let mut health = Health::new(20.0);
        health.damage(5.0);
        assert_eq!(health.fraction(), 0.75);
        health.damage(50.0);
        assert_eq!(health.fraction(), 0.0);
    }
}
