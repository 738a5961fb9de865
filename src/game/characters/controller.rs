// Player locomotion and combat controller
//
// One `simulate` call per fixed tick. The caller supplies input and contact
// snapshots and applies the returned velocity, gravity scale and position
// patch to the physics body. Checks run in a fixed order and later checks see
// the state left by earlier ones:
//   landing, crouch/roll, ledge mount, climb, horizontal, jump, roll end,
//   attack, fall

use glam::Vec2;

use super::acceleration::accelerate;
use super::animation::{params, AnimationPlayer, AnimationSink};
use super::combat::{AttackKind, AttackReport, MeleeCombat, TargetQuery};
use super::health::{Damageable, Health, HealthSignal};
use super::state::{Facing, LandingStyle, MovementState, MovementStateMachine};
use super::stats::{CombatProfile, MovementStats};
use crate::core::math::axis_active;
use crate::core::{CapabilityError, ConfigError};
use crate::engine::input::InputSample;
use crate::engine::physics::{CollisionLayer, ContactState, LayerMask};
use crate::game::save::{SaveState, Saveable};
use crate::game::upgrades::{Upgrade, UpgradeSet};

/// Starting health of the player character
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    StateChanged {
        from: MovementState,
        to: MovementState,
    },
    Jumped {
        jumps_used: u8,
    },
    Landed(LandingStyle),
    Attacked(AttackReport),
    KnockedBack {
        push: Facing,
    },
    LedgeMounted {
        displacement: Vec2,
    },
    Damaged {
        amount: f32,
        remaining: f32,
    },
    Died,
}

/// Everything the caller must apply after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Velocity to write back to the body
    pub velocity: Vec2,
    pub state: MovementState,
    /// 0 while climbing or hanging on a ledge
    pub gravity_scale: f32,
    /// Animation playback speed (0 = frozen pose)
    pub animation_speed: f32,
    /// Instant displacement to apply to the body (ledge mount)
    pub position_patch: Option<Vec2>,
    /// Whether the crouching collider should be active
    pub crouch_profile: bool,
    pub facing: Facing,
    pub events: Vec<ControllerEvent>,
}

/// Builds a `PlayerController`, validating tuning and collaborators
#[derive(Debug)]
pub struct PlayerControllerBuilder<A> {
    stats: MovementStats,
    combat: CombatProfile,
    upgrades: UpgradeSet,
    animator: Option<A>,
    position: Vec2,
    max_health: f32,
}

impl<A: AnimationSink> Default for PlayerControllerBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AnimationSink> PlayerControllerBuilder<A> {
    pub fn new() -> Self {
        Self {
            stats: MovementStats::default(),
            combat: CombatProfile::default(),
            upgrades: UpgradeSet::new(),
            animator: None,
            position: Vec2::ZERO,
            max_health: PLAYER_MAX_HEALTH,
        }
    }

    pub fn stats(mut self, stats: MovementStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn combat(mut self, combat: CombatProfile) -> Self {
        self.combat = combat;
        self
    }

    pub fn upgrades(mut self, upgrades: UpgradeSet) -> Self {
        self.upgrades = upgrades;
        self
    }

    /// Animation parameter sink (required)
    pub fn animator(mut self, animator: A) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn build(self) -> Result<PlayerController<A>, ConfigError> {
        self.stats.validate()?;
        self.combat.validate()?;
        if !(self.max_health > 0.0) {
            return Err(ConfigError::invalid("max_health", "must be positive"));
        }
        let animator = self
            .animator
            .ok_or(ConfigError::MissingCollaborator("animator"))?;

        Ok(PlayerController {
            stats: self.stats,
            combat: MeleeCombat::new(self.combat),
            upgrades: self.upgrades,
            health: Health::new(self.max_health),
            animator,
            machine: MovementStateMachine::new(),
            position: self.position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            gravity_scale: 1.0,
            clock: 0.0,
            last_jump: None,
            airborne_since: 0.0,
            jumps_used: 0,
            may_fall: false,
            last_contacts: ContactState::default(),
            pending: Vec::new(),
        })
    }
}

/// The player's movement state machine plus melee combat and health
#[derive(Debug)]
pub struct PlayerController<A = AnimationPlayer> {
    stats: MovementStats,
    combat: MeleeCombat,
    upgrades: UpgradeSet,
    health: Health,
    animator: A,
    machine: MovementStateMachine,

    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    gravity_scale: f32,

    /// Simulated seconds since construction
    clock: f32,
    /// Time of the last jump, cleared by vertical input
    last_jump: Option<f32>,
    /// Jump or fall start, used to pick the landing style
    airborne_since: f32,
    jumps_used: u8,
    /// Armed by a contact-exit event, disarmed on landing
    may_fall: bool,
    last_contacts: ContactState,
    pending: Vec<ControllerEvent>,
}

impl PlayerController<AnimationPlayer> {
    /// Default tuning with the stock player animation set
    pub fn with_defaults(position: Vec2) -> Result<Self, ConfigError> {
        PlayerControllerBuilder::new()
            .animator(AnimationPlayer::with_player_animations())
            .position(position)
            .build()
    }
}

impl<A: AnimationSink> PlayerController<A> {
    pub fn builder() -> PlayerControllerBuilder<A> {
        PlayerControllerBuilder::new()
    }

    pub fn state(&self) -> MovementState {
        self.machine.state()
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

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn jumps_used(&self) -> u8 {
        self.jumps_used
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn stats(&self) -> &MovementStats {
        &self.stats
    }

    pub fn combat(&self) -> &MeleeCombat {
        &self.combat
    }

    pub fn health_record(&self) -> &Health {
        &self.health
    }

    pub fn upgrades(&self) -> &UpgradeSet {
        &self.upgrades
    }

    pub fn upgrades_mut(&mut self) -> &mut UpgradeSet {
        &mut self.upgrades
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Pull the body's position and velocity after the physics step
    pub fn sync_body(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Run one tick
    pub fn simulate(
        &mut self,
        dt: f32,
        input: &InputSample,
        contacts: ContactState,
        targets: &mut dyn TargetQuery,
    ) -> TickOutput {
        self.clock += dt;
        self.machine.tick(dt);
        self.last_contacts = contacts;

        if self.machine.state().is_airborne() && contacts.touching_ground {
            self.try_land();
        }

        let mut position_patch = None;
        if self.machine.state().accepts_input() && !self.health.is_dead() {
            self.handle_crouch(input, contacts);
            position_patch = self.handle_ledge(input);
            self.handle_climb(input, contacts);
            self.handle_horizontal(input, contacts, dt);
            self.handle_jump(input, contacts);
            self.handle_roll_end(input);
            self.handle_attack(input, targets);
        }
        self.check_for_falling(contacts);
        self.collect_health_signals();

        TickOutput {
            velocity: self.velocity,
            state: self.machine.state(),
            gravity_scale: self.gravity_scale,
            animation_speed: self.animator.speed(),
            position_patch,
            crouch_profile: self.machine.state().uses_crouch_profile(),
            facing: self.facing,
            events: std::mem::take(&mut self.pending),
        }
    }

    /// Feet started touching something on `layer`
    pub fn on_contact_enter(&mut self, layer: CollisionLayer) {
        if self.machine.state().is_airborne() && LayerMask::FOOTING.contains(layer) {
            self.try_land();
        }
    }

    /// Feet stopped touching something; arms the fall check
    pub fn on_contact_exit(&mut self) {
        self.may_fall = true;
    }

    /// Push the actor away and ignore input until `end_knock_back`
    pub fn knock_back(&mut self, push: Facing) {
        self.animator.set_bool(params::KNOCKED_BACK, true);
        self.velocity = Vec2::new(
            push.sign() * self.combat.profile().knockback_x,
            self.combat.profile().knockback_y,
        );
        self.gravity_scale = 1.0;
        self.animator.set_speed(1.0);
        self.enter(MovementState::KnockedBack);
        self.pending.push(ControllerEvent::KnockedBack { push });
    }

    /// Give control back after a knockback
    pub fn end_knock_back(&mut self) {
        if self.machine.state() != MovementState::KnockedBack {
            return;
        }
        self.animator.set_bool(params::KNOCKED_BACK, false);
        if self.last_contacts.touching_ground {
            self.enter(MovementState::Grounded);
        } else {
            self.start_falling();
        }
    }

    /// Grab a ledge: freeze gravity and animation until the next key press
    pub fn begin_ledge_climb(&mut self) {
        self.reset_air_flags();
        self.animator.set_bool(params::IS_LEDGING, true);
        self.animator.set_speed(0.0);
        self.gravity_scale = 0.0;
        self.velocity = Vec2::ZERO;
        self.enter(MovementState::LedgeMount);
    }

    fn handle_crouch(&mut self, input: &InputSample, contacts: ContactState) {
        match self.machine.state() {
            MovementState::Grounded if input.down_pressed && contacts.touching_ground => {
                self.animator.set_bool(params::IS_CROUCHING, true);
                self.enter(MovementState::Crouching);
            }
            MovementState::Crouching if axis_active(input.horizontal) => {
                self.animator.set_trigger(params::ROLL);
                self.enter(MovementState::Rolling);
            }
            MovementState::Crouching if input.vertical >= 0.0 => {
                self.animator.set_bool(params::IS_CROUCHING, false);
                self.enter(MovementState::Grounded);
            }
            _ => {}
        }
    }

    fn handle_ledge(&mut self, input: &InputSample) -> Option<Vec2> {
        let hanging = self.machine.state() == MovementState::LedgeMount
            && self.animator.get_bool(params::IS_LEDGING)
            && self.animator.speed() == 0.0;
        if !hanging || !input.any_key {
            return None;
        }

        let displacement = Vec2::new(
            self.facing.sign() * self.stats.collider_width,
            self.stats.collider_height,
        );
        self.position += displacement;
        self.animator.set_bool(params::IS_LEDGING, false);
        self.animator.set_speed(1.0);
        self.gravity_scale = 1.0;
        self.enter(MovementState::Grounded);
        self.pending
            .push(ControllerEvent::LedgeMounted { displacement });
        Some(displacement)
    }

    fn handle_climb(&mut self, input: &InputSample, contacts: ContactState) {
        let axis = input.vertical;
        if axis_active(axis) {
            self.last_jump = None;
        }

        let state = self.machine.state();
        if self.ladder_in_reach(contacts) {
            if !contacts.touching_ground
                && state != MovementState::Climbing
                && state != MovementState::LedgeMount
            {
                self.gravity_scale = 0.0;
                self.animator.set_bool(params::IS_CLIMBING, true);
                self.animator.set_bool(params::IS_FALLING, false);
                self.enter(MovementState::Climbing);
            }

            if axis_active(axis) {
                self.animator.set_speed(1.0);
                self.velocity.y = self.stats.climb_speed * axis;
            } else if self.machine.state() == MovementState::Climbing {
                self.animator.set_speed(0.0);
                self.velocity.y = 0.0;
            }
        } else if state == MovementState::Climbing {
            self.gravity_scale = 1.0;
            self.animator.set_speed(1.0);
            self.animator.set_bool(params::IS_CLIMBING, false);
            self.animator.set_trigger(params::LANDED_NO_ROLL);
            if contacts.touching_ground {
                self.enter(MovementState::Grounded);
            } else {
                self.start_falling();
            }
        }
    }

    fn handle_horizontal(&mut self, input: &InputSample, contacts: ContactState, dt: f32) {
        let axis = input.horizontal;
        if !axis_active(axis) {
            self.velocity.x = 0.0;
            self.animator.set_bool(params::IS_RUNNING, false);
            self.animator.set_bool(params::IS_WALKING, false);
            return;
        }

        self.velocity = accelerate(self.velocity, axis, input.run_held, dt, &self.stats);
        if contacts.touching_ground {
            self.animator.set_bool(params::IS_WALKING, true);
            self.animator.set_bool(params::IS_RUNNING, input.run_held);
        }
        if let Some(facing) = Facing::from_axis(axis) {
            self.facing = facing;
        }
    }

    fn handle_jump(&mut self, input: &InputSample, contacts: ContactState) {
        if !input.jump_pressed || !self.machine.state().can_jump() {
            return;
        }

        let capacity = self.upgrades.jump_capacity();
        let allowed = contacts.touching_ground
            || self.ladder_in_reach(contacts)
            || self.jumps_used < capacity;
        if !allowed {
            return;
        }

        if self.upgrades.has(Upgrade::DoubleJump) {
            self.jumps_used = (self.jumps_used + 1).min(capacity);
        } else {
            self.jumps_used = capacity;
        }

        if self.machine.state() == MovementState::Climbing {
            self.gravity_scale = 1.0;
            self.animator.set_speed(1.0);
            self.animator.set_bool(params::IS_CLIMBING, false);
        }
        self.animator.set_bool(params::IS_CROUCHING, false);

        self.velocity.y = self.stats.jump_velocity;
        self.animator.set_trigger(params::JUMP);
        self.last_jump = Some(self.clock);
        self.airborne_since = self.clock;
        self.enter(MovementState::JUMPING);
        self.pending.push(ControllerEvent::Jumped {
            jumps_used: self.jumps_used,
        });
    }

    fn handle_roll_end(&mut self, input: &InputSample) {
        if self.machine.state() != MovementState::Rolling || self.machine.state_just_changed() {
            return;
        }
        if self.animator.current_clip() == params::ROLL_CLIP {
            return;
        }

        if input.vertical < 0.0 {
            self.enter(MovementState::Crouching);
        } else {
            self.animator.set_bool(params::IS_CROUCHING, false);
            self.enter(MovementState::Grounded);
        }
    }

    fn handle_attack(&mut self, input: &InputSample, targets: &mut dyn TargetQuery) {
        let kind = if input.kick_pressed {
            AttackKind::Kick
        } else if input.punch_pressed {
            AttackKind::Punch
        } else {
            return;
        };

        if let Some(report) =
            self.combat
                .attack(self.clock, kind, self.position, self.facing, targets)
        {
            self.animator.set_trigger(kind.trigger());
            self.pending.push(ControllerEvent::Attacked(report));
        }
    }

    fn check_for_falling(&mut self, contacts: ContactState) {
        let state = self.machine.state();
        let blocked = matches!(
            state,
            MovementState::Climbing | MovementState::KnockedBack | MovementState::LedgeMount
        ) || state == MovementState::FALLING;

        if self.velocity.y < -f32::EPSILON && !contacts.touching_ground && self.may_fall && !blocked {
            self.start_falling();
        }
    }

    fn try_land(&mut self) {
        if self.in_jump_window() {
            return;
        }

        let airtime = self.clock - self.airborne_since;
        let style = LandingStyle::for_airtime(airtime, self.stats.roll_time);
        self.animator.set_bool(params::IS_FALLING, false);
        self.animator.set_trigger(match style {
            LandingStyle::Roll => params::LANDED,
            LandingStyle::Soft => params::LANDED_NO_ROLL,
        });
        self.jumps_used = 0;
        self.may_fall = false;
        self.enter(MovementState::Grounded);
        self.pending.push(ControllerEvent::Landed(style));
    }

    fn start_falling(&mut self) {
        self.animator.set_bool(params::IS_FALLING, true);
        self.animator.set_bool(params::IS_CROUCHING, false);
        self.airborne_since = self.clock;
        self.enter(MovementState::FALLING);
    }

    fn reset_air_flags(&mut self) {
        self.animator.set_bool(params::IS_CLIMBING, false);
        self.animator.set_bool(params::IS_FALLING, false);
    }

    /// Ladder contact, ignored for a short window after a jump
    fn ladder_in_reach(&self, contacts: ContactState) -> bool {
        contacts.touching_ladder && !self.in_jump_window()
    }

    fn in_jump_window(&self) -> bool {
        self.last_jump
            .is_some_and(|t| self.clock - t <= self.stats.climb_delay_time)
    }

    fn enter(&mut self, state: MovementState) {
        let from = self.machine.state();
        if self.machine.transition(state) {
            // Back on footing by any route, not only a landing
            if state == MovementState::Grounded && !from.is_grounded() {
                self.jumps_used = 0;
                self.may_fall = false;
            }
            self.pending
                .push(ControllerEvent::StateChanged { from, to: state });
        }
    }

    fn collect_health_signals(&mut self) {
        for signal in self.health.drain_signals() {
            match signal {
                HealthSignal::Damaged { amount, remaining } => {
                    self.animator.set_trigger(params::TAKE_DAMAGE);
                    self.pending
                        .push(ControllerEvent::Damaged { amount, remaining });
                }
                HealthSignal::Died => {
                    self.animator.set_bool(params::IS_DEAD, true);
                    self.velocity.x = 0.0;
                    self.pending.push(ControllerEvent::Died);
                }
            }
        }
    }
}

impl<A: AnimationSink> Damageable for PlayerController<A> {
    fn damage_health(&mut self, amount: f32) {
        self.health.damage(amount);
    }

    fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    fn health(&self) -> f32 {
        self.health.current()
    }

    /// Damage plus a push away from the way the player faces
    fn knock_back_hit(&mut self, amount: f32) -> Result<(), CapabilityError> {
        if self.health.damage(amount) {
            self.knock_back(self.facing.opposite());
        }
        Ok(())
    }
}

impl<A: AnimationSink> Saveable for PlayerController<A> {
    fn capture_state(&self) -> SaveState {
        SaveState::Position(self.position)
    }

    fn restore_state(&mut self, state: SaveState) -> Result<(), CapabilityError> {
        match state {
            SaveState::Position(position) => {
                self.position = position;
                Ok(())
            }
            other => Err(CapabilityError::StateMismatch {
                expected: "position",
                actual: other.kind(),
            }),
        }
    }
}
