// Game logic built on the engine layer
//
// - `characters`: player controller, combat, health, animation
// - `enemies`: ghost and its breath attack
// - `environment`: moving platforms
// - `ui`: alert sign and HUD state
// - `upgrades`, `save`, `config`: progression, persistence, tuning
// - `world`: the arena that wires everything to the physics world

pub mod characters;
pub mod config;
pub mod enemies;
pub mod environment;
pub mod save;
pub mod ui;
pub mod upgrades;
pub mod world;

pub use config::GameConfig;
pub use save::{SaveState, SaveStore, Saveable};
pub use upgrades::{Upgrade, UpgradeObserver, UpgradeSet};
pub use world::{Arena, StepReport};
