// Melee combat: attack anchor, cooldown and area damage

use glam::Vec2;

use super::animation::params;
use super::health::Damageable;
use super::state::Facing;
use super::stats::CombatProfile;

/// Which melee move was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    /// Animation trigger fired for this attack
    pub fn trigger(&self) -> &'static str {
        match self {
            Self::Punch => params::PUNCH,
            Self::Kick => params::KICK,
        }
    }
}

/// Spatial lookup of damageable actors, supplied by the world
pub trait TargetQuery {
    /// Position of the first target within `radius` of `center`
    fn locate(&self, center: Vec2, radius: f32) -> Option<Vec2>;

    /// Visit every damageable target within `radius` of `center`, returns the count
    fn for_each_in(
        &mut self,
        center: Vec2,
        radius: f32,
        visit: &mut dyn FnMut(&mut dyn Damageable),
    ) -> usize;
}

/// Query that never finds anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTargets;

impl TargetQuery for NoTargets {
    fn locate(&self, _center: Vec2, _radius: f32) -> Option<Vec2> {
        None
    }

    fn for_each_in(
        &mut self,
        _center: Vec2,
        _radius: f32,
        _visit: &mut dyn FnMut(&mut dyn Damageable),
    ) -> usize {
        0
    }
}

/// Result of an attack that went off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackReport {
    pub kind: AttackKind,
    /// Where the hit circle was centered
    pub anchor: Vec2,
    /// Number of targets damaged
    pub hits: usize,
    /// Damage dealt to each target
    pub damage: f32,
}

/// Cooldown-gated melee attacks around a facing-mirrored anchor
#[derive(Debug, Clone)]
pub struct MeleeCombat {
    profile: CombatProfile,
    next_attack_time: f32,
}

impl MeleeCombat {
    pub fn new(profile: CombatProfile) -> Self {
        Self {
            profile,
            next_attack_time: 0.0,
        }
    }

    pub fn profile(&self) -> &CombatProfile {
        &self.profile
    }

    /// Earliest time the next attack may fire
    pub fn next_attack_time(&self) -> f32 {
        self.next_attack_time
    }

    /// Check if the cooldown has elapsed
    pub fn ready(&self, now: f32) -> bool {
        now >= self.next_attack_time
    }

    /// How far the cooldown has recharged, in [0, 1]
    pub fn charge(&self, now: f32) -> f32 {
        let cooldown = self.profile.cooldown();
        if cooldown <= 0.0 {
            return 1.0;
        }
        (1.0 - (self.next_attack_time - now) / cooldown).clamp(0.0, 1.0)
    }

    /// Attack anchor for an actor at `origin` facing `facing`
    pub fn anchor(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + Vec2::new(facing.sign() * self.profile.attack_offset, 0.0)
    }

    /// Try to attack. Returns None while on cooldown.
    pub fn attack(
        &mut self,
        now: f32,
        kind: AttackKind,
        origin: Vec2,
        facing: Facing,
        targets: &mut dyn TargetQuery,
    ) -> Option<AttackReport> {
        if !self.ready(now) {
            return None;
        }

        let anchor = self.anchor(origin, facing);
        let damage = self.profile.attack_damage;
        let mut hit = |target: &mut dyn Damageable| target.damage_health(damage);
        let hits = targets.for_each_in(anchor, self.profile.attack_range, &mut hit);
        self.next_attack_time = now + self.profile.cooldown();

        if hits > 0 {
            log::debug!("{kind:?} hit {hits} target(s) for {damage}");
        }

        Some(AttackReport {
            kind,
            anchor,
            hits,
            damage,
        })
    }
}
