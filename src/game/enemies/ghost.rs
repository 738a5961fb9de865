// Ghost enemy: floats toward the player and breathes on it

use glam::Vec2;

use super::breath::{BreathAttack, BreathProfile, BreathReport};
use super::recovery::Regeneration;
use crate::core::CapabilityError;
use crate::game::characters::animation::params;
use crate::game::characters::{
    AnimationPlayer, AnimationSink, Damageable, Facing, Health, HealthSignal, TargetQuery,
};
use crate::game::save::{SaveState, Saveable};

/// Default ghost health
pub const GHOST_MAX_HEALTH: f32 = 20.0;

/// A breath cloud left behind after an attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathEffect {
    pub position: Vec2,
    pub facing: Facing,
    /// Seconds until it disappears
    pub remaining: f32,
}

/// Things the world must react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostEvent {
    Breathed(BreathReport),
    Hurt { amount: f32, remaining: f32 },
    Healed { amount: f32 },
    /// Hit detection and gravity must be switched off
    Died,
}

/// A floating enemy with a breath attack
#[derive(Debug)]
pub struct Ghost {
    health: Health,
    breath: BreathAttack,
    regeneration: Option<Regeneration>,
    animator: AnimationPlayer,
    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    /// Set while the breath task is steering the body
    homing: bool,
    effects: Vec<BreathEffect>,
}

impl Ghost {
    pub fn new(position: Vec2, max_health: f32, breath: BreathProfile) -> Self {
        Self {
            health: Health::new(max_health),
            breath: BreathAttack::new(breath),
            regeneration: None,
            animator: AnimationPlayer::with_ghost_animations(),
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Left,
            homing: false,
            effects: Vec::new(),
        }
    }

    /// Heal whenever health drops below the regeneration threshold
    pub fn with_regeneration(mut self, regeneration: Regeneration) -> Self {
        self.regeneration = Some(regeneration);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_homing(&self) -> bool {
        self.homing
    }

    pub fn is_attacking(&self) -> bool {
        self.breath.is_attacking()
    }

    pub fn effects(&self) -> &[BreathEffect] {
        &self.effects
    }

    pub fn animator(&self) -> &AnimationPlayer {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut AnimationPlayer {
        &mut self.animator
    }

    pub fn health_record(&self) -> &Health {
        &self.health
    }

    /// Overwrite the position (physics sync or save restore)
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Advance one tick. Health changes are handled first so a ghost killed
    /// this tick never breathes.
    pub fn update(&mut self, dt: f32, targets: &mut dyn TargetQuery) -> Vec<GhostEvent> {
        let mut events = Vec::new();

        if let Some(regeneration) = self.regeneration {
            regeneration.apply(&mut self.health);
        }
        self.handle_health_signals(&mut events);

        self.effects.retain_mut(|effect| {
            effect.remaining -= dt;
            effect.remaining > 0.0
        });

        if self.health.is_dead() {
            self.velocity = Vec2::ZERO;
            return events;
        }

        let step = self.breath.update(dt, self.position, self.facing, targets);
        if let Some(facing) = step.facing {
            self.facing = facing;
            self.animator.set_flip_horizontal(facing == Facing::Right);
        }
        if let Some(steering) = step.steering {
            self.velocity = steering;
        }
        if let Some(report) = step.fired {
            self.effects.push(BreathEffect {
                position: report.muzzle,
                facing: self.facing,
                remaining: self.breath.profile().effect_lifetime,
            });
            events.push(GhostEvent::Breathed(report));
        }
        self.homing = self.breath.is_attacking();

        self.position += self.velocity * dt;
        events
    }

    fn handle_health_signals(&mut self, events: &mut Vec<GhostEvent>) {
        for signal in self.health.drain_signals() {
            match signal {
                HealthSignal::Damaged { amount, .. } if amount < 0.0 => {
                    events.push(GhostEvent::Healed { amount: -amount });
                }
                HealthSignal::Damaged { amount, remaining } => {
                    self.animator.set_trigger(params::TAKE_DAMAGE);
                    events.push(GhostEvent::Hurt { amount, remaining });
                }
                HealthSignal::Died => {
                    self.animator.set_bool(params::IS_DEAD, true);
                    self.breath.cancel();
                    self.homing = false;
                    events.push(GhostEvent::Died);
                }
            }
        }
    }
}

impl Damageable for Ghost {
    fn damage_health(&mut self, amount: f32) {
        self.health.damage(amount);
    }

    fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    fn health(&self) -> f32 {
        self.health.current()
    }
}

impl Saveable for Ghost {
    fn capture_state(&self) -> SaveState {
        self.health.capture_state()
    }

    fn restore_state(&mut self, state: SaveState) -> Result<(), CapabilityError> {
        self.health.restore_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    struct Player {
        position: Vec2,
        health: Health,
    }

    impl TargetQuery for Player {
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

    fn player_at(x: f32) -> Player {
        Player {
            position: Vec2::new(x, 0.0),
            health: Health::new(100.0),
        }
    }

    #[test]
    fn test_ghost_homes_and_breathes() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default());
        let mut player = player_at(3.0);

        let events = ghost.update(DT, &mut player);
        assert!(events.is_empty());
        assert!(ghost.is_homing());
        assert_eq!(ghost.facing(), Facing::Right);
        assert!(ghost.animator().is_flipped_horizontal());
        assert!(ghost.position().x > 0.0);

        let mut breathed = false;
        for _ in 0..120 {
            let events = ghost.update(DT, &mut player);
            if events.iter().any(|e| matches!(e, GhostEvent::Breathed(_))) {
                breathed = true;
                break;
            }
        }
        assert!(breathed);
        assert_eq!(player.health.current(), 98.0);
        assert_eq!(ghost.effects().len(), 1);
        assert_eq!(ghost.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_effect_expires() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default());
        let mut player = player_at(1.0);

        let events = ghost.update(DT, &mut player);
        assert!(matches!(events[0], GhostEvent::Breathed(_)));
        assert_eq!(ghost.effects().len(), 1);

        for _ in 0..31 {
            ghost.update(DT, &mut player);
        }
        assert!(ghost.effects().is_empty());
    }

    #[test]
    fn test_death_cancels_breath() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default());
        let mut player = player_at(4.0);
        ghost.update(DT, &mut player);
        assert!(ghost.is_attacking());

        ghost.damage_health(25.0);
        let events = ghost.update(DT, &mut player);
        assert!(events.contains(&GhostEvent::Died));
        assert!(!ghost.is_attacking());
        assert!(!ghost.is_homing());
        assert_eq!(ghost.velocity(), Vec2::ZERO);
        assert!(ghost.animator().get_bool(params::IS_DEAD));

        // Corpses never breathe again
        player.position = Vec2::new(0.5, 0.0);
        for _ in 0..10 {
            assert!(ghost.update(DT, &mut player).is_empty());
        }
        assert_eq!(player.health.current(), 100.0);
    }

    #[test]
    fn test_hurt_trigger() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default());
        ghost.damage_health(5.0);
        let events = ghost.update(DT, &mut player_at(50.0));
        assert_eq!(
            events,
            vec![GhostEvent::Hurt {
                amount: 5.0,
                remaining: 15.0
            }]
        );
        assert_eq!(ghost.animator().current_clip(), "Hurt");
    }

    #[test]
    fn test_regenerating_ghost() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default())
            .with_regeneration(Regeneration::default());
        ghost.damage_health(5.0);

        let events = ghost.update(DT, &mut player_at(50.0));
        assert!(events.contains(&GhostEvent::Healed { amount: 500.0 }));
        assert_eq!(ghost.health(), 515.0);
    }

    #[test]
    fn test_unsupported_hooks() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default());
        assert_eq!(ghost.die(), Err(CapabilityError::Unsupported("die")));
        assert_eq!(
            ghost.knock_back_hit(1.0),
            Err(CapabilityError::Unsupported("knock_back_hit"))
        );
    }

    #[test]
    fn test_restore_dead_health() {
        let mut ghost = Ghost::new(Vec2::ZERO, GHOST_MAX_HEALTH, BreathProfile::default());
        ghost.restore_state(SaveState::Health(0.0)).unwrap();
        let events = ghost.update(DT, &mut player_at(1.0));
        assert_eq!(events, vec![GhostEvent::Died]);
        assert!(ghost.is_dead());
    }
}
