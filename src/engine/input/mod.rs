// Input handling system
//
// Input devices are out of scope: callers press and release abstract actions,
// and once per tick the per-player state is condensed into an immutable
// `InputSample` for the controller.
//
// ## Architecture
//
// - `action`: Defines game actions
// - `player`: Per-player pressed / just-pressed tracking
// - `sample`: The per-tick snapshot consumed by the controller
//
// ## Usage Example
//
// ```rust
// use rusted_platformer::engine::input::{Action, PlayerInput};
//
// let mut input = PlayerInput::new(0);
// input.press(Action::MoveRight);
// input.press(Action::Jump);
//
// let sample = input.sample();
// assert!(sample.jump_pressed);
//
// // At the end of each tick, age the edge state
// input.update();
// assert!(!input.sample().jump_pressed);
// ```

pub mod action;
pub mod player;
pub mod sample;

// Re-export commonly used types
pub use action::Action;
pub use player::PlayerInput;
pub use sample::InputSample;
