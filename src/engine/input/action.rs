// Game action definitions

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Up,
    Down,
    Jump,
    Run,

    // Attacks
    Punch,
    Kick,

    // Meta actions
    Pause,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 9] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Run,
        Action::Punch,
        Action::Kick,
        Action::Pause,
    ];

    /// Check if the action is a gameplay action (counts as "any key")
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, Self::Pause)
    }

    /// Check if the action triggers an attack
    pub fn is_attack(&self) -> bool {
        matches!(self, Self::Punch | Self::Kick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::Down);
    }

    #[test]
    fn test_attack_actions() {
        let attacks: Vec<_> = Action::ALL.iter().filter(|a| a.is_attack()).collect();
        assert_eq!(attacks, vec![&Action::Punch, &Action::Kick]);
    }

    #[test]
    fn test_pause_is_not_gameplay() {
        assert!(!Action::Pause.is_gameplay());
        assert!(Action::Jump.is_gameplay());
    }
}
