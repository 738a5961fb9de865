// Movement state machine states

/// Vertical phase while airborne
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirPhase {
    /// Rising after a jump
    Jumping,
    /// Falling, either after a jump apex or off an edge
    Falling,
}

/// Represents the current movement state of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    /// Standing or walking on a surface
    #[default]
    Grounded,
    /// In the air
    Airborne(AirPhase),
    /// Holding onto a ladder, gravity off
    Climbing,
    /// Ducking with the small collision profile
    Crouching,
    /// One-shot roll out of a crouch
    Rolling,
    /// Pushed back by a hit, input ignored
    KnockedBack,
    /// Hanging on a ledge, waiting for input to mount it
    LedgeMount,
}

impl MovementState {
    pub const JUMPING: MovementState = MovementState::Airborne(AirPhase::Jumping);
    pub const FALLING: MovementState = MovementState::Airborne(AirPhase::Falling);

    /// Check if the actor is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Airborne(_))
    }

    /// Check if the actor is standing on something
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded | Self::Crouching | Self::Rolling)
    }

    /// Check if player input is processed in this state
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::KnockedBack)
    }

    /// Check if a jump may start from this state (contacts permitting)
    pub fn can_jump(&self) -> bool {
        !matches!(self, Self::KnockedBack | Self::LedgeMount | Self::Rolling)
    }

    /// Check if the small collision profile is active
    pub fn uses_crouch_profile(&self) -> bool {
        matches!(self, Self::Crouching | Self::Rolling)
    }

    /// Label for logs and HUD
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grounded => "grounded",
            Self::Airborne(AirPhase::Jumping) => "jumping",
            Self::Airborne(AirPhase::Falling) => "falling",
            Self::Climbing => "climbing",
            Self::Crouching => "crouching",
            Self::Rolling => "rolling",
            Self::KnockedBack => "knocked_back",
            Self::LedgeMount => "ledge_mount",
        }
    }
}

/// Horizontal direction a sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left
    pub fn sign(&self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    /// Facing implied by a horizontal axis, if it is nonzero
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Self::Right)
        } else if axis < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }

    /// Whether the sprite must be drawn mirrored
    pub fn flip_x(&self) -> bool {
        matches!(self, Self::Left)
    }
}

/// How a landing was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingStyle {
    /// Short drop
    Soft,
    /// Long drop, rolls on impact
    Roll,
}

impl LandingStyle {
    /// Pick the landing for a given airborne time
    pub fn for_airtime(airtime: f32, roll_time: f32) -> Self {
        if airtime >= roll_time {
            Self::Roll
        } else {
            Self::Soft
        }
    }
}

/// Tracks the current state plus how long it has been active
#[derive(Debug)]
pub struct MovementStateMachine {
    current_state: MovementState,
    previous_state: MovementState,
    state_time: f32,
}

impl Default for MovementStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: MovementState::Grounded,
            previous_state: MovementState::Grounded,
            state_time: 0.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> MovementState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> MovementState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Check if the state changed during the current tick
    pub fn state_just_changed(&self) -> bool {
        self.state_time == 0.0
    }

    /// Advance the state timer (called once per tick before transitions)
    pub fn tick(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Transition to a new state, returns whether anything changed
    pub fn transition(&mut self, new_state: MovementState) -> bool {
        if self.current_state == new_state {
            return false;
        }
        log::debug!(
            "Movement state {} -> {}",
            self.current_state.label(),
            new_state.label()
        );
        self.previous_state = self.current_state;
        self.current_state = new_state;
        self.state_time = 0.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = MovementStateMachine::new();
        assert_eq!(sm.state(), MovementState::Grounded);
    }

    #[test]
    fn test_state_transition() {
        let mut sm = MovementStateMachine::new();
        assert!(sm.transition(MovementState::JUMPING));
        assert_eq!(sm.state(), MovementState::JUMPING);
        assert_eq!(sm.previous_state(), MovementState::Grounded);
    }

    #[test]
    fn test_same_state_is_not_a_transition() {
        let mut sm = MovementStateMachine::new();
        sm.tick(0.5);
        assert!(!sm.transition(MovementState::Grounded));
        assert_eq!(sm.state_time(), 0.5);
    }

    #[test]
    fn test_state_just_changed() {
        let mut sm = MovementStateMachine::new();
        sm.transition(MovementState::Climbing);
        assert!(sm.state_just_changed());
        sm.tick(0.1);
        assert!(!sm.state_just_changed());
    }

    #[test]
    fn test_state_helpers() {
        assert!(MovementState::FALLING.is_airborne());
        assert!(MovementState::Crouching.is_grounded());
        assert!(!MovementState::KnockedBack.accepts_input());
        assert!(!MovementState::LedgeMount.can_jump());
        assert!(MovementState::Rolling.uses_crouch_profile());
    }

    #[test]
    fn test_labels() {
        assert_eq!(MovementState::JUMPING.label(), "jumping");
        assert_eq!(MovementState::FALLING.label(), "falling");
        assert_eq!(MovementState::LedgeMount.label(), "ledge_mount");
    }

    #[test]
    fn test_facing() {
        assert_eq!(Facing::from_axis(0.3), Some(Facing::Right));
        assert_eq!(Facing::from_axis(-1.0), Some(Facing::Left));
        assert_eq!(Facing::from_axis(0.0), None);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.opposite(), Facing::Left);
        assert!(Facing::Left.flip_x());
    }

    #[test]
    fn test_landing_style_threshold() {
        assert_eq!(LandingStyle::for_airtime(0.79, 0.8), LandingStyle::Soft);
        assert_eq!(LandingStyle::for_airtime(0.8, 0.8), LandingStyle::Roll);
        assert_eq!(LandingStyle::for_airtime(2.0, 0.8), LandingStyle::Roll);
    }
}
