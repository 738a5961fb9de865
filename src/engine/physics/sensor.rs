// Contact sensing: actor colliders -> per-tick ContactState

use super::body::presets;
use super::layers::{CollisionLayer, LayerMask};
use super::world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

/// Per-tick contact snapshot for one actor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactState {
    /// Feet overlap ground, ledges or platforms
    pub touching_ground: bool,
    /// Hands overlap a ladder volume
    pub touching_ladder: bool,
    /// Hands overlap a ledge
    pub touching_ledge: bool,
}

impl ContactState {
    /// Standing on solid ground and nothing else
    pub fn grounded() -> Self {
        Self {
            touching_ground: true,
            ..Self::default()
        }
    }

    /// Touching nothing at all
    pub fn airborne() -> Self {
        Self::default()
    }

    /// Add ladder contact
    pub fn with_ladder(mut self) -> Self {
        self.touching_ladder = true;
        self
    }

    /// Add ledge contact
    pub fn with_ledge(mut self) -> Self {
        self.touching_ledge = true;
        self
    }
}

/// The rigid body and colliders making up one physical actor
///
/// All handles are created together in `spawn`, so a constructed value always
/// carries every sensor the controller depends on.
#[derive(Debug, Clone, Copy)]
pub struct ActorColliders {
    pub body: RigidBodyHandle,
    /// Standing body collider
    pub standing: ColliderHandle,
    /// Smaller crouching profile, disabled while standing
    pub crouching: ColliderHandle,
    /// Strip under the feet used for ground checks
    pub feet: ColliderHandle,
    /// Body-sized sensor used for ladder and ledge checks
    pub hands: ColliderHandle,
}

impl ActorColliders {
    /// Create the body and all colliders for a player-like actor
    pub fn spawn(
        world: &mut PhysicsWorld,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        crouch_height: f32,
    ) -> Self {
        let body = world.add_rigid_body(presets::player_body(x, y));
        let standing = world.add_collider(presets::player_collider(width, height), body);
        let crouching = world.add_collider(
            presets::player_crouch_collider(width, height, crouch_height),
            body,
        );
        let feet = world.add_collider(presets::feet_sensor(width, height), body);
        let hands = world.add_collider(presets::hands_sensor(width, height), body);

        Self {
            body,
            standing,
            crouching,
            feet,
            hands,
        }
    }

    /// Query the world for this actor's contacts
    pub fn sense(&self, world: &PhysicsWorld) -> ContactState {
        ContactState {
            touching_ground: world.is_touching_layers(self.feet, LayerMask::FOOTING),
            touching_ladder: world.is_touching_layers(self.hands, CollisionLayer::Ladders.into()),
            touching_ledge: world.is_touching_layers(self.hands, CollisionLayer::Ledges.into()),
        }
    }

    /// Check if a collider belongs to this actor
    pub fn owns(&self, collider: ColliderHandle) -> bool {
        collider == self.standing
            || collider == self.crouching
            || collider == self.feet
            || collider == self.hands
    }

    /// Swap between the standing and crouching collision profiles
    pub fn set_crouching(&self, world: &mut PhysicsWorld, crouching: bool) {
        world.set_collider_enabled(self.standing, !crouching);
        world.set_collider_enabled(self.crouching, crouching);
    }

    /// Turn off hit detection for every collider (death)
    pub fn disable(&self, world: &mut PhysicsWorld) {
        for collider in [self.standing, self.crouching, self.feet, self.hands] {
            world.set_collider_enabled(collider, false);
        }
    }
}
