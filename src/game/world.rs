// Arena: one physics world holding the player, ghosts and moving platforms
//
// A single `step` runs a whole tick in a fixed order:
// contact sensing, controller tick (with melee combat), enemy tasks,
// platform motion, then the physics step and the HUD refresh.

use glam::Vec2;

use crate::core::math::within_radius;
use crate::core::{CapabilityError, ConfigError, SaveError};
use crate::engine::input::InputSample;
use crate::engine::physics::{
    presets, ActorColliders, ColliderHandle, CollisionEvent, CollisionLayer, PhysicsWorld,
    RigidBodyHandle,
};
use crate::game::characters::{
    AnimationPlayer, ControllerEvent, Damageable, PlayerController, PlayerControllerBuilder,
    TargetQuery, TickOutput,
};
use crate::game::config::GameConfig;
use crate::game::enemies::{Ghost, GhostEvent};
use crate::game::environment::{MovingPlatform, RiderId};
use crate::game::save::SaveStore;
use crate::game::ui::{Alert, PlayerHud};
use crate::game::upgrades::Upgrade;

/// Rider id the player uses on moving platforms
pub const PLAYER_RIDER: RiderId = 0;

/// Seconds a knockback keeps player input locked
pub const KNOCKBACK_TIME: f32 = 0.25;

/// Radius of a ghost's body collider
const GHOST_RADIUS: f32 = 0.4;

const PLAYER_SAVE_ID: &str = "player";

fn ghost_save_id(index: usize) -> String {
    format!("ghost_{index}")
}

#[derive(Debug)]
struct GhostSlot {
    ghost: Ghost,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

#[derive(Debug)]
struct PlatformSlot {
    platform: MovingPlatform,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

/// What happened during one arena tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub player: TickOutput,
    /// Events raised by ghosts, tagged with the ghost's index
    pub ghost_events: Vec<(usize, GhostEvent)>,
}

/// Ghosts as seen by the player's melee attacks
struct GhostTargets<'a> {
    physics: &'a PhysicsWorld,
    ghosts: &'a mut [GhostSlot],
}

impl TargetQuery for GhostTargets<'_> {
    fn locate(&self, center: Vec2, radius: f32) -> Option<Vec2> {
        self.ghosts
            .iter()
            .filter(|slot| !slot.ghost.is_dead())
            .map(|slot| slot.ghost.position())
            .filter(|position| within_radius(*position, center, radius))
            .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)))
    }

    fn for_each_in(
        &mut self,
        center: Vec2,
        radius: f32,
        visit: &mut dyn FnMut(&mut dyn Damageable),
    ) -> usize {
        let hits = self
            .physics
            .colliders_in_circle(center, radius, CollisionLayer::Enemies.into());

        let mut count = 0;
        for slot in self.ghosts.iter_mut() {
            if hits.contains(&slot.collider) {
                visit(&mut slot.ghost);
                count += 1;
            }
        }
        count
    }
}

/// The player as seen by enemy attacks
struct PlayerTarget<'a> {
    physics: &'a PhysicsWorld,
    colliders: &'a ActorColliders,
    player: &'a mut PlayerController,
}

impl TargetQuery for PlayerTarget<'_> {
    fn locate(&self, center: Vec2, radius: f32) -> Option<Vec2> {
        if self.player.is_dead() {
            return None;
        }
        let position = self.player.position();
        within_radius(position, center, radius).then_some(position)
    }

    fn for_each_in(
        &mut self,
        center: Vec2,
        radius: f32,
        visit: &mut dyn FnMut(&mut dyn Damageable),
    ) -> usize {
        if self.player.is_dead() {
            return 0;
        }
        let hits = self
            .physics
            .colliders_in_circle(center, radius, CollisionLayer::Player.into());
        if hits.iter().any(|collider| self.colliders.owns(*collider)) {
            visit(&mut *self.player);
            1
        } else {
            0
        }
    }
}

/// A playable level: physics, actors, platforms and HUD state
pub struct Arena {
    config: GameConfig,
    physics: PhysicsWorld,
    player: PlayerController,
    player_colliders: ActorColliders,
    ghosts: Vec<GhostSlot>,
    platforms: Vec<PlatformSlot>,
    alert: Alert,
    hud: PlayerHud,
    /// Counts down while a knockback holds the player
    knockback_remaining: Option<f32>,
    /// Hands overlapped a ledge last tick; grabs happen on the rising edge
    was_touching_ledge: bool,
    tick_count: u64,
}

impl Arena {
    /// Create an empty arena with the player standing at `spawn`
    pub fn new(config: GameConfig, spawn: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut physics = PhysicsWorld::with_gravity(config.gravity);
        let stats = &config.movement;
        let player_colliders = ActorColliders::spawn(
            &mut physics,
            spawn.x,
            spawn.y,
            stats.collider_width,
            stats.collider_height,
            stats.crouch_height,
        );
        physics.update_queries();

        let player = PlayerControllerBuilder::new()
            .stats(config.movement.clone())
            .combat(config.combat.clone())
            .max_health(config.player_max_health)
            .animator(AnimationPlayer::with_player_animations())
            .position(spawn)
            .build()?;

        log::info!("Arena created, player spawned at ({:.2}, {:.2})", spawn.x, spawn.y);

        Ok(Self {
            alert: Alert::new(config.alert_wait_time),
            hud: PlayerHud::new(config.player_max_health),
            config,
            physics,
            player,
            player_colliders,
            ghosts: Vec::new(),
            platforms: Vec::new(),
            knockback_remaining: None,
            was_touching_ledge: false,
            tick_count: 0,
        })
    }

    /// Add a solid floor or wall block centred on `center`
    pub fn add_ground(&mut self, center: Vec2, size: Vec2) -> ColliderHandle {
        self.add_block(CollisionLayer::Ground, center, size)
    }

    /// Add a grabbable ledge block
    pub fn add_ledge(&mut self, center: Vec2, size: Vec2) -> ColliderHandle {
        self.add_block(CollisionLayer::Ledges, center, size)
    }

    /// Add a climbable ladder volume
    pub fn add_ladder(&mut self, center: Vec2, size: Vec2) -> ColliderHandle {
        let body = self
            .physics
            .add_rigid_body(presets::static_body(center.x, center.y));
        let collider = self
            .physics
            .add_collider(presets::ladder_collider(size.x, size.y), body);
        self.physics.update_queries();
        collider
    }

    fn add_block(&mut self, layer: CollisionLayer, center: Vec2, size: Vec2) -> ColliderHandle {
        let body = self
            .physics
            .add_rigid_body(presets::static_body(center.x, center.y));
        let collider = self
            .physics
            .add_collider(presets::block_collider(layer, size.x, size.y), body);
        self.physics.update_queries();
        collider
    }

    /// Add a moving platform; returns its index
    pub fn add_platform(
        &mut self,
        position: Vec2,
        size: Vec2,
        waypoints: Vec<Vec2>,
        start_index: usize,
    ) -> Result<usize, ConfigError> {
        let platform =
            MovingPlatform::new(position, waypoints, self.config.platform_speed, start_index)?;
        let body = self
            .physics
            .add_rigid_body(presets::kinematic_body(position.x, position.y));
        let collider = self
            .physics
            .add_collider(presets::platform_collider(size.x, size.y), body);
        self.physics.update_queries();

        self.platforms.push(PlatformSlot {
            platform,
            body,
            collider,
        });
        Ok(self.platforms.len() - 1)
    }

    /// Spawn a ghost; returns its index
    pub fn spawn_ghost(&mut self, position: Vec2) -> usize {
        let mut ghost = Ghost::new(
            position,
            self.config.enemy_max_health,
            self.config.breath.clone(),
        );
        if let Some(regeneration) = self.config.regeneration {
            ghost = ghost.with_regeneration(regeneration);
        }

        let body = self
            .physics
            .add_rigid_body(presets::kinematic_body(position.x, position.y));
        let collider = self
            .physics
            .add_collider(presets::enemy_collider(GHOST_RADIUS), body);
        self.physics.update_queries();

        log::debug!("Ghost {} spawned at ({:.2}, {:.2})", self.ghosts.len(), position.x, position.y);
        self.ghosts.push(GhostSlot {
            ghost,
            body,
            collider,
        });
        self.ghosts.len() - 1
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn player_colliders(&self) -> &ActorColliders {
        &self.player_colliders
    }

    pub fn ghost(&self, index: usize) -> Option<&Ghost> {
        self.ghosts.get(index).map(|slot| &slot.ghost)
    }

    pub fn ghost_mut(&mut self, index: usize) -> Option<&mut Ghost> {
        self.ghosts.get_mut(index).map(|slot| &mut slot.ghost)
    }

    pub fn ghost_collider(&self, index: usize) -> Option<ColliderHandle> {
        self.ghosts.get(index).map(|slot| slot.collider)
    }

    pub fn ghost_count(&self) -> usize {
        self.ghosts.len()
    }

    pub fn platform(&self, index: usize) -> Option<&MovingPlatform> {
        self.platforms.get(index).map(|slot| &slot.platform)
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn hud(&self) -> &PlayerHud {
        &self.hud
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Unlock an upgrade and announce it on the alert sign
    pub fn pick_up(&mut self, upgrade: Upgrade) -> bool {
        self.player
            .upgrades_mut()
            .unlock_and_notify(upgrade, &mut [&mut self.alert])
    }

    /// Hit the player with a knockback (hazards, scripted damage)
    pub fn hit_player(&mut self, amount: f32) -> Result<(), CapabilityError> {
        self.player.knock_back_hit(amount)
    }

    /// Advance the whole arena by one tick
    pub fn step(&mut self, dt: f32, input: &InputSample) -> StepReport {
        self.tick_count += 1;
        self.physics.update_queries();

        let contacts = self.player_colliders.sense(&self.physics);
        self.route_collision_events();
        if contacts.touching_ledge && !self.was_touching_ledge && self.player.state().is_airborne()
        {
            log::debug!("Player grabbed a ledge");
            self.player.begin_ledge_climb();
        }
        self.was_touching_ledge = contacts.touching_ledge;
        self.tick_knockback(dt);

        let body = self.player_colliders.body;
        let position = self
            .physics
            .translation(body)
            .unwrap_or_else(|| self.player.position());
        let velocity = self.physics.linvel(body).unwrap_or(Vec2::ZERO);
        self.player.sync_body(position, velocity);

        let mut targets = GhostTargets {
            physics: &self.physics,
            ghosts: &mut self.ghosts,
        };
        let output = self.player.simulate(dt, input, contacts, &mut targets);
        self.apply_player_output(&output, position);

        let ghost_events = self.update_ghosts(dt);
        self.move_platforms(dt);

        self.physics.step(dt);
        if let (Some(position), Some(velocity)) =
            (self.physics.translation(body), self.physics.linvel(body))
        {
            self.player.sync_body(position, velocity);
        }

        self.update_presentation(dt);

        StepReport {
            player: output,
            ghost_events,
        }
    }

    /// Feed last step's feet contacts to the controller and platforms
    fn route_collision_events(&mut self) {
        let feet = self.player_colliders.feet;
        for event in self.physics.collision_events() {
            if let Some(other) = event.other(feet) {
                self.route_feet_event(event, other);
            }
        }
    }

    fn route_feet_event(&mut self, event: CollisionEvent, other: ColliderHandle) {
        let platform = self
            .platforms
            .iter_mut()
            .find(|slot| slot.collider == other)
            .map(|slot| &mut slot.platform);

        if event.is_started() {
            if let Some(layer) = self.physics.layer_of(other) {
                self.player.on_contact_enter(layer);
            }
            if let Some(platform) = platform {
                platform.attach(PLAYER_RIDER);
            }
        } else {
            self.player.on_contact_exit();
            if let Some(platform) = platform {
                platform.detach(PLAYER_RIDER);
            }
        }
    }

    fn tick_knockback(&mut self, dt: f32) {
        let Some(remaining) = self.knockback_remaining else {
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.knockback_remaining = Some(remaining);
        } else {
            self.knockback_remaining = None;
            self.player.end_knock_back();
        }
    }

    fn apply_player_output(&mut self, output: &TickOutput, position: Vec2) {
        let body = self.player_colliders.body;
        if self.player.is_dead() {
            // Corpses take no hits and no longer fall
            self.player_colliders.disable(&mut self.physics);
            self.physics.set_gravity_scale(body, 0.0);
            self.physics.set_linvel(body, Vec2::ZERO);
        } else {
            self.physics.set_linvel(body, output.velocity);
            self.physics.set_gravity_scale(body, output.gravity_scale);
            if let Some(patch) = output.position_patch {
                self.physics.set_translation(body, position + patch);
            }
            self.player_colliders
                .set_crouching(&mut self.physics, output.crouch_profile);
        }

        for event in &output.events {
            match event {
                ControllerEvent::KnockedBack { .. } => {
                    self.knockback_remaining = Some(KNOCKBACK_TIME);
                }
                ControllerEvent::Died => log::info!("Player died"),
                ControllerEvent::StateChanged { from, to } => {
                    log::trace!("Player {} -> {}", from.label(), to.label());
                }
                _ => {}
            }
        }
    }

    fn update_ghosts(&mut self, dt: f32) -> Vec<(usize, GhostEvent)> {
        let mut events = Vec::new();
        let mut target = PlayerTarget {
            physics: &self.physics,
            colliders: &self.player_colliders,
            player: &mut self.player,
        };
        for (index, slot) in self.ghosts.iter_mut().enumerate() {
            for event in slot.ghost.update(dt, &mut target) {
                events.push((index, event));
            }
        }

        for slot in &self.ghosts {
            self.physics
                .set_next_kinematic_translation(slot.body, slot.ghost.position());
        }
        for (index, event) in &events {
            match event {
                GhostEvent::Died => {
                    log::info!("Ghost {index} died");
                    let slot = &self.ghosts[*index];
                    self.physics.set_collider_enabled(slot.collider, false);
                    self.physics.set_gravity_scale(slot.body, 0.0);
                }
                GhostEvent::Breathed(report) => {
                    log::debug!("Ghost {index} breathed, {} hit", report.hits);
                }
                _ => {}
            }
        }
        events
    }

    fn move_platforms(&mut self, dt: f32) {
        let player_body = self.player_colliders.body;
        for slot in &mut self.platforms {
            let displacement = slot.platform.update(dt);
            self.physics
                .set_next_kinematic_translation(slot.body, slot.platform.position());

            if slot.platform.carries(PLAYER_RIDER) {
                if let Some(position) = self.physics.translation(player_body) {
                    self.physics
                        .set_translation(player_body, position + displacement);
                }
            }
        }
    }

    fn update_presentation(&mut self, dt: f32) {
        let animator = self.player.animator_mut();
        animator.update(dt);
        for trigger in animator.take_fired_triggers() {
            log::trace!("Player animation trigger {trigger}");
        }
        for slot in &mut self.ghosts {
            slot.ghost.animator_mut().update(dt);
        }

        self.alert.update(dt);
        self.hud.update_health(self.player.health());
        let charge = self.player.combat().charge(self.player.clock());
        self.hud.update_charge(charge);
    }

    /// Capture the player's position and every ghost's health
    pub fn save(&self) -> SaveStore {
        let mut store = SaveStore::new();
        store.capture(PLAYER_SAVE_ID, &self.player);
        for (index, slot) in self.ghosts.iter().enumerate() {
            store.capture(&ghost_save_id(index), &slot.ghost);
        }
        store
    }

    /// Put actors back the way a save found them
    ///
    /// Ghosts restored with no health die on their next update, which turns
    /// their colliders off.
    pub fn restore(&mut self, store: &SaveStore) -> Result<(), SaveError> {
        store.restore(PLAYER_SAVE_ID, &mut self.player)?;
        let body = self.player_colliders.body;
        self.physics.set_translation(body, self.player.position());
        self.physics.set_linvel(body, Vec2::ZERO);

        for (index, slot) in self.ghosts.iter_mut().enumerate() {
            store.restore(&ghost_save_id(index), &mut slot.ghost)?;
        }
        self.physics.update_queries();
        log::info!("Arena restored from save ({} entries)", store.len());
        Ok(())
    }
}
