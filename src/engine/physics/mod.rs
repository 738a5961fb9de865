// Physics collaborator using rapier2d
//
// The controller never integrates motion itself. This module owns the rapier
// pipeline, the named collision layers, and the overlap queries that turn an
// actor's sensors into a per-tick `ContactState`.

pub mod body;
mod layers;
mod sensor;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D};
pub use layers::{CollisionEvent, CollisionLayer, LayerMask};
pub use sensor::{ActorColliders, ContactState};
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle, DEFAULT_GRAVITY};
