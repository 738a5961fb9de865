// Rusted Platformer
//
// Headless locomotion and combat logic for a 2D platformer:
// - `core`: math helpers and error types
// - `engine`: fixed timestep loop, input edge tracking, rapier2d physics collaborator
// - `game`: player controller, enemies, environment, HUD and save state

pub mod core;
pub mod engine;
pub mod game;
