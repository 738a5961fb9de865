// Breath attack: detect, pursue, breathe, cool down
//
// The attack is a small task object advanced once per tick. While it is not
// idle the enemy is "attacking" and cannot start another pursuit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::game::characters::{Damageable, Facing, TargetQuery};

/// Tuning for the breath attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathProfile {
    /// Distance at which a target is noticed
    pub detection_radius: f32,
    /// Steering speed while pursuing
    pub move_speed: f32,
    /// Radius of the hit check around the muzzle
    pub breath_radius: f32,
    /// Horizontal distance from the body to the muzzle
    pub muzzle_offset: f32,
    /// Seconds before the attack re-arms after a breath
    pub cooldown: f32,
    /// Damage per target hit
    pub damage: f32,
    /// How long the breath effect stays visible
    pub effect_lifetime: f32,
}

pub const BASE_BREATH: BreathProfile = BreathProfile {
    detection_radius: 5.0,
    move_speed: 3.0,
    breath_radius: 1.4,
    muzzle_offset: 0.5,
    cooldown: 2.0,
    damage: 2.0,
    effect_lifetime: 0.5,
};

impl Default for BreathProfile {
    fn default() -> Self {
        BASE_BREATH
    }
}

impl BreathProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("breath.detection_radius", self.detection_radius),
            ("breath.move_speed", self.move_speed),
            ("breath.breath_radius", self.breath_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        if !(self.cooldown >= 0.0) {
            return Err(ConfigError::invalid("breath.cooldown", "must not be negative"));
        }
        Ok(())
    }
}

/// Where the task is
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BreathPhase {
    /// Watching for a target
    #[default]
    Idle,
    /// Steering toward the target until it is inside the breath radius
    Pursuing,
    /// Breath fired, waiting to re-arm
    Cooldown { remaining: f32 },
}

/// A breath that went off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathReport {
    pub muzzle: Vec2,
    pub hits: usize,
    pub damage: f32,
}

/// What the owner should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BreathStep {
    /// New velocity for the body, if it changed
    pub steering: Option<Vec2>,
    /// New facing, if the target is on the other side
    pub facing: Option<Facing>,
    pub fired: Option<BreathReport>,
}

/// The pursue-and-breathe task
#[derive(Debug, Clone)]
pub struct BreathAttack {
    profile: BreathProfile,
    phase: BreathPhase,
}

impl BreathAttack {
    pub fn new(profile: BreathProfile) -> Self {
        Self {
            profile,
            phase: BreathPhase::Idle,
        }
    }

    pub fn profile(&self) -> &BreathProfile {
        &self.profile
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// The re-entry latch: true from detection until the cooldown ends
    pub fn is_attacking(&self) -> bool {
        self.phase != BreathPhase::Idle
    }

    /// Muzzle position for a body at `origin`
    pub fn muzzle(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + Vec2::new(facing.sign() * self.profile.muzzle_offset, 0.0)
    }

    /// Drop whatever the task is doing
    pub fn cancel(&mut self) {
        if self.phase != BreathPhase::Idle {
            log::debug!("Breath attack cancelled in {:?}", self.phase);
        }
        self.phase = BreathPhase::Idle;
    }

    /// Advance the task by one tick
    pub fn update(
        &mut self,
        dt: f32,
        origin: Vec2,
        facing: Facing,
        targets: &mut dyn TargetQuery,
    ) -> BreathStep {
        let mut step = BreathStep::default();

        match self.phase {
            BreathPhase::Idle => {
                let Some(target) = targets.locate(origin, self.profile.detection_radius) else {
                    return step;
                };
                log::debug!("Breath attack engaged target at {target}");
                self.phase = BreathPhase::Pursuing;
                step.facing = Self::facing_toward(origin, target, facing);
                let facing = step.facing.unwrap_or(facing);
                self.pursue(origin, facing, targets, &mut step);
            }
            BreathPhase::Pursuing => self.pursue(origin, facing, targets, &mut step),
            BreathPhase::Cooldown { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    BreathPhase::Idle
                } else {
                    BreathPhase::Cooldown { remaining }
                };
            }
        }
        step
    }

    /// One pursuit iteration: steer, then breathe if anything is in reach
    fn pursue(
        &mut self,
        origin: Vec2,
        facing: Facing,
        targets: &mut dyn TargetQuery,
        step: &mut BreathStep,
    ) {
        let muzzle = self.muzzle(origin, facing);
        let Some(target) = targets.locate(muzzle, f32::INFINITY) else {
            self.phase = BreathPhase::Idle;
            step.steering = Some(Vec2::ZERO);
            return;
        };
        step.steering = Some((target - muzzle).normalize_or_zero() * self.profile.move_speed);

        let damage = self.profile.damage;
        let mut burn = |target: &mut dyn Damageable| target.damage_health(damage);
        let hits = targets.for_each_in(muzzle, self.profile.breath_radius, &mut burn);
        if hits == 0 {
            return;
        }

        log::info!("Breath hit {hits} target(s) for {damage}");
        step.steering = Some(Vec2::ZERO);
        step.fired = Some(BreathReport {
            muzzle,
            hits,
            damage,
        });
        self.phase = BreathPhase::Cooldown {
            remaining: self.profile.cooldown,
        };
    }

    fn facing_toward(origin: Vec2, target: Vec2, current: Facing) -> Option<Facing> {
        let wanted = Facing::from_axis(target.x - origin.x)?;
        (wanted != current).then_some(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::Health;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    /// A single target that can be moved between ticks
    struct Victim {
        position: Vec2,
        health: Health,
    }

    impl TargetQuery for Victim {
        fn locate(&self, center: Vec2, radius: f32) -> Option<Vec2> {
            (self.position.distance(center) <= radius).then_some(self.position)
        }

        fn for_each_in(
            &mut self,
            center: Vec2,
            radius: f32,
            visit: &mut dyn FnMut(&mut dyn Damageable),
        ) -> usize {
            if self.position.distance(center) <= radius {
                visit(&mut self.health);
                1
            } else {
                0
            }
        }
    }

    fn victim_at(x: f32) -> Victim {
        Victim {
            position: Vec2::new(x, 0.0),
            health: Health::new(10.0),
        }
    }

    #[test]
    fn test_idle_without_target() {
        let mut breath = BreathAttack::new(BreathProfile::default());
        let step = breath.update(DT, Vec2::ZERO, Facing::Left, &mut victim_at(10.0));
        assert_eq!(step, BreathStep::default());
        assert!(!breath.is_attacking());
    }

    #[test]
    fn test_detect_and_steer() {
        let mut breath = BreathAttack::new(BreathProfile::default());
        let mut victim = victim_at(4.0);

        let step = breath.update(DT, Vec2::ZERO, Facing::Left, &mut victim);
        assert!(breath.is_attacking());
        assert_eq!(step.facing, Some(Facing::Right));
        let steering = step.steering.unwrap();
        assert_relative_eq!(steering.x, 3.0);
        assert_relative_eq!(steering.y, 0.0);
        assert!(step.fired.is_none());
        assert_eq!(breath.phase(), BreathPhase::Pursuing);
    }

    #[test]
    fn test_breath_fires_in_range_then_cools_down() {
        let mut breath = BreathAttack::new(BreathProfile::default());
        let mut victim = victim_at(3.0);

        breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim);
        assert_eq!(victim.health.current(), 10.0);

        // Target drifts into the breath radius around the muzzle
        victim.position = Vec2::new(1.5, 0.0);
        let step = breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim);
        let report = step.fired.unwrap();
        assert_eq!(report.hits, 1);
        assert_relative_eq!(report.muzzle.x, 0.5);
        assert_eq!(victim.health.current(), 8.0);
        assert!(matches!(breath.phase(), BreathPhase::Cooldown { .. }));

        // Latched: no second breath during the cooldown
        for _ in 0..60 {
            let step = breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim);
            assert!(step.fired.is_none());
        }
        assert_eq!(victim.health.current(), 8.0);
        assert!(breath.is_attacking());
    }

    #[test]
    fn test_rearms_after_cooldown() {
        let profile = BreathProfile {
            cooldown: 0.09,
            ..BreathProfile::default()
        };
        let mut breath = BreathAttack::new(profile);
        let mut victim = victim_at(1.0);

        assert!(breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim).fired.is_some());
        for _ in 0..6 {
            breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim);
        }
        assert_eq!(breath.phase(), BreathPhase::Idle);

        assert!(breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim).fired.is_some());
        assert_eq!(victim.health.current(), 6.0);
    }

    #[test]
    fn test_cancel_clears_latch() {
        let mut breath = BreathAttack::new(BreathProfile::default());
        breath.update(DT, Vec2::ZERO, Facing::Right, &mut victim_at(4.0));
        assert!(breath.is_attacking());

        breath.cancel();
        assert!(!breath.is_attacking());
    }

    #[test]
    fn test_muzzle_mirrors() {
        let breath = BreathAttack::new(BreathProfile::default());
        assert_relative_eq!(breath.muzzle(Vec2::ZERO, Facing::Left).x, -0.5);
        assert_relative_eq!(breath.muzzle(Vec2::ZERO, Facing::Right).x, 0.5);
    }

    #[test]
    fn test_profile_validation() {
        assert!(BreathProfile::default().validate().is_ok());
        let bad = BreathProfile {
            breath_radius: 0.0,
            ..BreathProfile::default()
        };
        assert!(bad.validate().is_err());
    }
}
