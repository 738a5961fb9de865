// Per-player input state management

use super::action::Action;
use super::sample::InputSample;
use std::collections::HashSet;

/// Represents the input state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID
    player_id: usize,

    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this tick (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this tick (release events)
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous tick
    previous_pressed: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            previous_pressed: HashSet::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple ticks)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.contains(&action) {
            self.just_released.insert(action);
            self.pressed.remove(&action);
        }
    }

    /// Replace the pressed set with `actions`, generating press/release edges
    pub fn set_pressed(&mut self, actions: &[Action]) {
        for action in Action::ALL {
            if actions.contains(&action) {
                self.press(action);
            } else {
                self.release(action);
            }
        }
    }

    /// Update input state for a new tick
    /// Call this once per tick after the sample has been consumed
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed = self.pressed.clone();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
    }

    /// Get all currently pressed actions
    pub fn get_pressed_actions(&self) -> Vec<Action> {
        self.pressed.iter().copied().collect()
    }

    /// Get directional input as (horizontal, vertical), each in -1.0 to 1.0
    pub fn get_direction(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::Down) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::Up) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }

    /// Condense the current state into a per-tick sample
    pub fn sample(&self) -> InputSample {
        let (horizontal, vertical) = self.get_direction();

        InputSample {
            horizontal,
            vertical,
            jump_pressed: self.just_pressed(Action::Jump),
            down_pressed: self.just_pressed(Action::Down),
            run_held: self.is_pressed(Action::Run),
            punch_pressed: self.just_pressed(Action::Punch),
            kick_pressed: self.just_pressed(Action::Kick),
            any_key: self.pressed.iter().any(|action| action.is_gameplay()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.update();
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_held_detection() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(!input.is_held(Action::Jump)); // Not held on first tick

        input.update();
        assert!(input.is_held(Action::Jump));
    }

    #[test]
    fn test_jump_edge_only_on_first_tick() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.sample().jump_pressed);

        // Holding jump must not re-trigger it
        input.update();
        input.press(Action::Jump);
        assert!(!input.sample().jump_pressed);

        // Releasing re-arms the edge
        input.release(Action::Jump);
        input.update();
        input.press(Action::Jump);
        assert!(input.sample().jump_pressed);
    }

    #[test]
    fn test_sample_direction_and_run() {
        let mut input = PlayerInput::new(0);
        input.set_pressed(&[Action::MoveLeft, Action::Run, Action::Up]);
        let sample = input.sample();
        assert_eq!(sample.horizontal, -1.0);
        assert_eq!(sample.vertical, 1.0);
        assert!(sample.run_held);
        assert!(sample.any_key);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        assert_eq!(input.get_direction(), (0.0, 0.0));
    }

    #[test]
    fn test_pause_is_not_any_key() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Pause);
        assert!(!input.sample().any_key);
    }

    #[test]
    fn test_set_pressed_releases_missing() {
        let mut input = PlayerInput::new(0);
        input.set_pressed(&[Action::Kick]);
        input.update();
        input.set_pressed(&[]);
        assert!(input.just_released(Action::Kick));
        assert!(input.get_pressed_actions().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::Punch);
        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert!(input.get_pressed_actions().is_empty());
    }
}
