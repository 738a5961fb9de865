use glam::Vec2;
use rapier2d::prelude::*;

use super::layers::{CollisionEvent as GameCollisionEvent, CollisionEventQueue, CollisionLayer, LayerMask};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Default world gravity (units/s²)
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Physics world that manages all physics simulation
///
/// Gameplay code never steps bodies itself: it writes velocity intents and
/// gravity scales, then asks the world which layers an actor's sensors touch.
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for overlap tests
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity
    pub fn new() -> Self {
        Self::with_gravity(DEFAULT_GRAVITY)
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = crate::engine::game_loop::FIXED_TIMESTEP;

        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by `dt` seconds
    pub fn step(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;

        // Clear previous step's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Rebuild the query acceleration structure without stepping
    /// (needed before the first step, or after adding colliders)
    pub fn update_queries(&mut self) {
        self.query_pipeline
            .update(&self.rigid_body_set, &self.collider_set);
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Layer a collider belongs to
    pub fn layer_of(&self, handle: ColliderHandle) -> Option<CollisionLayer> {
        self.collider_set
            .get(handle)
            .and_then(|collider| CollisionLayer::from_group(collider.collision_groups().memberships))
    }

    /// Enable or disable a collider (disabled colliders are invisible to queries)
    pub fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_enabled(enabled);
        }
    }

    /// Get a body's translation
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Teleport a body
    pub fn set_translation(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    /// Move a kinematic body to `position` during the next step
    pub fn set_next_kinematic_translation(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y]);
        }
    }

    /// Get a body's linear velocity
    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
    }

    /// Set a body's linear velocity
    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Set a body's gravity scale (0.0 while climbing or hanging on a ledge)
    pub fn set_gravity_scale(&mut self, handle: RigidBodyHandle, scale: Real) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_gravity_scale(scale, true);
        }
    }

    /// Check whether a collider overlaps any enabled collider on the masked layers.
    /// Colliders attached to the same body are ignored.
    pub fn is_touching_layers(&self, handle: ColliderHandle, mask: LayerMask) -> bool {
        let Some(probe) = self.collider_set.get(handle) else {
            return false;
        };
        if !probe.is_enabled() {
            return false;
        }

        let predicate = |_other: ColliderHandle, collider: &Collider| {
            collider.is_enabled() && mask.matches(collider.collision_groups().memberships)
        };
        let mut filter = QueryFilter::new()
            .exclude_collider(handle)
            .predicate(&predicate);
        if let Some(parent) = probe.parent() {
            filter = filter.exclude_rigid_body(parent);
        }

        let mut touching = false;
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            probe.position(),
            probe.shape(),
            filter,
            |_| {
                touching = true;
                false // stop at the first hit
            },
        );
        touching
    }

    /// All enabled colliders on the masked layers overlapping a circle
    pub fn colliders_in_circle(&self, center: Vec2, radius: Real, mask: LayerMask) -> Vec<ColliderHandle> {
        let ball = SharedShape::ball(radius);
        let position = Isometry::translation(center.x, center.y);
        let predicate = |_other: ColliderHandle, collider: &Collider| {
            collider.is_enabled() && mask.matches(collider.collision_groups().memberships)
        };
        let filter = QueryFilter::new().predicate(&predicate);

        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &position,
            &*ball,
            filter,
            |collider| {
                hits.push(collider);
                true
            },
        );
        hits
    }

    /// Get all collision events from the last step
    pub fn collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::presets;
    use super::*;

    fn world_with_floor() -> (PhysicsWorld, ColliderHandle) {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::static_body(0.0, -0.5));
        let floor_collider =
            world.add_collider(presets::block_collider(CollisionLayer::Ground, 20.0, 1.0), floor);
        (world, floor_collider)
    }

    #[test]
    fn test_feet_sensor_touches_floor() {
        let (mut world, _) = world_with_floor();
        // Body center half a body height above the floor surface
        let body = world.add_rigid_body(presets::player_body(0.0, 0.375));
        let feet = world.add_collider(presets::feet_sensor(0.72, 0.75), body);
        world.update_queries();

        assert!(world.is_touching_layers(feet, LayerMask::FOOTING));
        assert!(!world.is_touching_layers(feet, CollisionLayer::Ladders.into()));
    }

    #[test]
    fn test_feet_sensor_in_air() {
        let (mut world, _) = world_with_floor();
        let body = world.add_rigid_body(presets::player_body(0.0, 5.0));
        let feet = world.add_collider(presets::feet_sensor(0.72, 0.75), body);
        world.update_queries();

        assert!(!world.is_touching_layers(feet, LayerMask::FOOTING));
    }

    #[test]
    fn test_colliders_in_circle_filters_layers() {
        let (mut world, floor_collider) = world_with_floor();
        let ghost = world.add_rigid_body(presets::kinematic_body(3.0, 2.0));
        let ghost_collider = world.add_collider(presets::enemy_collider(0.4), ghost);
        world.update_queries();

        let enemies = world.colliders_in_circle(Vec2::new(3.0, 2.0), 0.5, CollisionLayer::Enemies.into());
        assert_eq!(enemies, vec![ghost_collider]);

        let ground = world.colliders_in_circle(Vec2::new(0.0, 0.0), 0.5, CollisionLayer::Ground.into());
        assert_eq!(ground, vec![floor_collider]);
    }

    #[test]
    fn test_disabled_collider_is_ignored() {
        let (mut world, floor_collider) = world_with_floor();
        world.set_collider_enabled(floor_collider, false);
        world.update_queries();

        let hits = world.colliders_in_circle(Vec2::ZERO, 0.5, LayerMask::ALL);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_layer_of() {
        let (world, floor_collider) = world_with_floor();
        assert_eq!(world.layer_of(floor_collider), Some(CollisionLayer::Ground));
    }

    #[test]
    fn test_gravity_scale_and_velocity() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(0.72, 0.75), body);
        world.set_gravity_scale(body, 0.0);
        world.set_linvel(body, Vec2::ZERO);
        world.step(1.0 / 60.0);

        let velocity = world.linvel(body).unwrap_or(Vec2::ONE);
        assert!(velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_falling_body_gains_speed() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(0.72, 0.75), body);
        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        let velocity = world.linvel(body).unwrap_or(Vec2::ZERO);
        assert!(velocity.y < -1.0);
    }
}
