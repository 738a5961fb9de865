// Unlockable capabilities and pickup notification

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A capability the player can pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    /// Allows a second jump while airborne
    DoubleJump,
}

impl Upgrade {
    /// Display name shown in the pickup alert
    pub fn message(&self) -> &'static str {
        match self {
            Self::DoubleJump => "Double Jump",
        }
    }
}

/// Receives upgrade pickups
pub trait UpgradeObserver {
    fn receive_upgrade(&mut self, upgrade: Upgrade);
}

/// The set of upgrades an actor owns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeSet {
    owned: HashSet<Upgrade>,
}

impl UpgradeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an upgrade, returns true if it was not already owned
    pub fn unlock(&mut self, upgrade: Upgrade) -> bool {
        let added = self.owned.insert(upgrade);
        if added {
            log::info!("Unlocked upgrade: {}", upgrade.message());
        }
        added
    }

    /// Unlock and tell every observer about a new pickup
    pub fn unlock_and_notify(
        &mut self,
        upgrade: Upgrade,
        observers: &mut [&mut dyn UpgradeObserver],
    ) -> bool {
        if !self.unlock(upgrade) {
            return false;
        }
        for observer in observers.iter_mut() {
            observer.receive_upgrade(upgrade);
        }
        true
    }

    /// Check ownership
    pub fn has(&self, upgrade: Upgrade) -> bool {
        self.owned.contains(&upgrade)
    }

    /// Jumps available before landing again
    pub fn jump_capacity(&self) -> u8 {
        if self.has(Upgrade::DoubleJump) {
            2
        } else {
            1
        }
    }
}
