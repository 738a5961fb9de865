// Pickup alert sign

use crate::game::upgrades::{Upgrade, UpgradeObserver};

/// Seconds an alert stays visible
pub const ALERT_WAIT_TIME: f32 = 3.0;

/// A timed message sign. A new message restarts the timer.
#[derive(Debug, Clone)]
pub struct Alert {
    wait_time: f32,
    text: String,
    remaining: f32,
}

impl Default for Alert {
    fn default() -> Self {
        Self::new(ALERT_WAIT_TIME)
    }
}

impl Alert {
    pub fn new(wait_time: f32) -> Self {
        Self {
            wait_time,
            text: String::new(),
            remaining: 0.0,
        }
    }

    /// Show a pickup message, replacing any message on screen
    pub fn receive_text(&mut self, message: &str) {
        self.text = format!("You have picked up {message}!");
        self.remaining = self.wait_time;
        log::info!("{}", self.text);
    }

    /// Count down the display timer
    pub fn update(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0
    }

    /// Text on the sign while it is visible
    pub fn text(&self) -> Option<&str> {
        self.is_visible().then_some(self.text.as_str())
    }

    /// Seconds until the sign hides
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl UpgradeObserver for Alert {
    fn receive_upgrade(&mut self, upgrade: Upgrade) {
        self.receive_text(upgrade.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::upgrades::UpgradeSet;

    #[test]
    fn test_hidden_by_default() {
        let alert = Alert::default();
        assert!(!alert.is_visible());
        assert_eq!(alert.text(), None);
    }

    #[test]
    fn test_shows_then_hides() {
        let mut alert = Alert::default();
        alert.receive_text("Double Jump");
        assert_eq!(alert.text(), Some("You have picked up Double Jump!"));

        alert.update(2.9);
        assert!(alert.is_visible());
        alert.update(0.2);
        assert!(!alert.is_visible());
    }

    #[test]
    fn test_new_message_restarts_timer() {
        let mut alert = Alert::new(1.0);
        alert.receive_text("a key");
        alert.update(0.8);
        alert.receive_text("a map");
        alert.update(0.8);
        assert_eq!(alert.text(), Some("You have picked up a map!"));
    }

    #[test]
    fn test_observes_upgrades() {
        let mut alert = Alert::default();
        let mut upgrades = UpgradeSet::new();
        upgrades.unlock_and_notify(Upgrade::DoubleJump, &mut [&mut alert]);
        assert_eq!(alert.text(), Some("You have picked up Double Jump!"));
    }
}
