use super::layers::CollisionLayer;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType, gravity_scale: Real) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            gravity_scale,
            can_sleep: body_type == RigidBodyType::Dynamic,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic, 1.0)
    }

    /// Create a new kinematic position-based body (moved by game logic)
    pub fn new_kinematic_position_based() -> Self {
        Self::with_type(RigidBodyType::KinematicPositionBased, 0.0)
    }

    /// Create a new fixed (static) body
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed, 0.0)
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters never tip over)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders on a named layer
pub struct ColliderBuilder2D {
    shape: SharedShape,
    layer: CollisionLayer,
    offset: Vector<Real>,
    is_sensor: bool,
    enabled: bool,
    friction: Real,
    density: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            layer: CollisionLayer::Default,
            offset: Vector::zeros(),
            is_sensor: false,
            enabled: true,
            friction: 0.5,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Set the collision layer
    pub fn layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Offset the collider from its parent body's origin
    pub fn offset(mut self, x: Real, y: Real) -> Self {
        self.offset = vector![x, y];
        self
    }

    /// Make this a sensor (detects overlaps but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        if is_sensor {
            // Sensors must not add mass to the actor they ride on
            self.density = 0.0;
        }
        self
    }

    /// Start disabled (swapped in later, e.g. the crouch profile)
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .translation(self.offset)
            .collision_groups(self.layer.to_interaction_groups())
            .sensor(self.is_sensor)
            .enabled(self.enabled)
            .friction(self.friction)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// Common rigid body configurations for level geometry and actors
pub mod presets {
    use super::*;

    /// Height of the feet sensor strip below an actor
    pub const FEET_SENSOR_HEIGHT: Real = 0.1;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false) // Players should never sleep
            .build()
    }

    /// Standing body collider
    pub fn player_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Player)
            .friction(0.0) // No friction for smooth movement
            .build()
    }

    /// Crouching body collider: same footprint, lower top, starts disabled
    pub fn player_crouch_collider(width: Real, height: Real, crouch_height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, crouch_height / 2.0)
            .offset(0.0, (crouch_height - height) / 2.0)
            .layer(CollisionLayer::Player)
            .friction(0.0)
            .enabled(false)
            .build()
    }

    /// Thin sensor strip under the actor's feet
    pub fn feet_sensor(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width * 0.45, FEET_SENSOR_HEIGHT / 2.0)
            .offset(0.0, -height / 2.0)
            .layer(CollisionLayer::Sensor)
            .sensor(true)
            .build()
    }

    /// Sensor covering the actor's body, slightly wider, for ladders and ledges
    pub fn hands_sensor(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width * 0.6, height * 0.45)
            .layer(CollisionLayer::Sensor)
            .sensor(true)
            .build()
    }

    /// Create a fixed body for static level geometry
    pub fn static_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a level block on the given layer (ground, ledge)
    pub fn block_collider(layer: CollisionLayer, width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(layer)
            .friction(0.3)
            .build()
    }

    /// Create a ladder trigger volume
    pub fn ladder_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Ladders)
            .sensor(true)
            .build()
    }

    /// Create a body moved by game logic (platforms, flying enemies)
    pub fn kinematic_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(x, y)
            .build()
    }

    /// Create a moving platform collider
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Platform)
            .friction(0.8)
            .build()
    }

    /// Create a floating enemy collider
    pub fn enemy_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .layer(CollisionLayer::Enemies)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic().position(10.0, 20.0).build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_collider_builder_layer() {
        let collider = ColliderBuilder2D::box_shape(1.0, 2.0)
            .layer(CollisionLayer::Ground)
            .friction(0.3)
            .build();

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.3);
        assert_eq!(
            CollisionLayer::from_group(collider.collision_groups().memberships),
            Some(CollisionLayer::Ground)
        );
    }

    #[test]
    fn test_player_preset() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(0.72, 0.75);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert!(!collider.is_sensor());
    }

    #[test]
    fn test_crouch_collider_starts_disabled() {
        let collider = presets::player_crouch_collider(0.72, 0.75, 0.4);
        assert!(!collider.is_enabled());
    }

    #[test]
    fn test_ladder_is_sensor() {
        let collider = presets::ladder_collider(1.0, 4.0);
        assert!(collider.is_sensor());
        assert_eq!(
            CollisionLayer::from_group(collider.collision_groups().memberships),
            Some(CollisionLayer::Ladders)
        );
    }
}
