// Player character
//
// This module contains everything the player controller is built from:
// - Movement tuning and the acceleration model
// - Movement state machine and the controller that drives it
// - Melee combat and the damageable health record
// - Animation parameter sink

pub mod acceleration;
pub mod animation;
pub mod combat;
pub mod controller;
pub mod health;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use acceleration::accelerate;
pub use animation::{AnimationClip, AnimationPlayer, AnimationSink};
pub use combat::{AttackKind, AttackReport, MeleeCombat, NoTargets, TargetQuery};
pub use controller::{ControllerEvent, PlayerController, PlayerControllerBuilder, TickOutput};
pub use health::{Damageable, Health, HealthSignal};
pub use state::{AirPhase, Facing, LandingStyle, MovementState, MovementStateMachine};
pub use stats::{AccelerationMode, CombatProfile, MovementStats};
