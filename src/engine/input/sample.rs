// Per-tick input snapshot

/// Immutable snapshot of one player's input for a single tick
///
/// Axes are in `[-1, 1]`. Fields ending in `_pressed` are edges: true only on
/// the tick the action went down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Horizontal axis (-1 = left, 1 = right)
    pub horizontal: f32,
    /// Vertical axis (-1 = down, 1 = up)
    pub vertical: f32,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Down went down this tick (crouch)
    pub down_pressed: bool,
    /// Run modifier is held
    pub run_held: bool,
    /// Punch went down this tick
    pub punch_pressed: bool,
    /// Kick went down this tick
    pub kick_pressed: bool,
    /// Any gameplay action is held
    pub any_key: bool,
}

impl InputSample {
    /// A sample with no input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Hold the horizontal axis
    pub fn with_horizontal(mut self, axis: f32) -> Self {
        self.horizontal = axis.clamp(-1.0, 1.0);
        self.any_key |= axis != 0.0;
        self
    }

    /// Hold the vertical axis
    pub fn with_vertical(mut self, axis: f32) -> Self {
        self.vertical = axis.clamp(-1.0, 1.0);
        self.any_key |= axis != 0.0;
        self
    }

    /// Press jump this tick
    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self.any_key = true;
        self
    }

    /// Press down this tick (also holds the vertical axis down)
    pub fn with_crouch(mut self) -> Self {
        self.down_pressed = true;
        self.vertical = -1.0;
        self.any_key = true;
        self
    }

    /// Hold the run modifier
    pub fn with_run(mut self) -> Self {
        self.run_held = true;
        self.any_key = true;
        self
    }

    /// Press punch this tick
    pub fn with_punch(mut self) -> Self {
        self.punch_pressed = true;
        self.any_key = true;
        self
    }

    /// Press kick this tick
    pub fn with_kick(mut self) -> Self {
        self.kick_pressed = true;
        self.any_key = true;
        self
    }

    /// Check if any attack went down this tick
    pub fn attack_pressed(&self) -> bool {
        self.punch_pressed || self.kick_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_sample() {
        let sample = InputSample::idle();
        assert_eq!(sample.horizontal, 0.0);
        assert!(!sample.any_key);
        assert!(!sample.attack_pressed());
    }

    #[test]
    fn test_builders_mark_any_key() {
        assert!(InputSample::idle().with_jump().any_key);
        assert!(InputSample::idle().with_horizontal(-1.0).any_key);
        assert!(!InputSample::idle().with_horizontal(0.0).any_key);
    }

    #[test]
    fn test_axis_clamped() {
        let sample = InputSample::idle().with_horizontal(3.0).with_vertical(-2.0);
        assert_eq!(sample.horizontal, 1.0);
        assert_eq!(sample.vertical, -1.0);
    }

    #[test]
    fn test_crouch_holds_down() {
        let sample = InputSample::idle().with_crouch();
        assert!(sample.down_pressed);
        assert_eq!(sample.vertical, -1.0);
    }
}
