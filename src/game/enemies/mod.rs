// Enemy actors
//
// - `breath`: pursue-and-breathe attack task
// - `ghost`: floating enemy built on the breath attack
// - `recovery`: health regeneration

pub mod breath;
pub mod ghost;
pub mod recovery;

pub use breath::{BreathAttack, BreathPhase, BreathProfile, BreathReport, BreathStep};
pub use ghost::{BreathEffect, Ghost, GhostEvent, GHOST_MAX_HEALTH};
pub use recovery::Regeneration;
