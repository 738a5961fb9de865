use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Named collision layers
///
/// Contact sensing is expressed as "is this shape touching any collider on
/// these layers", so every collider in the world belongs to exactly one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Default layer - interacts with everything
    Default = 0b0000_0001,

    /// Solid floors and walls
    Ground = 0b0000_0010,

    /// Climbable ladders (trigger volumes)
    Ladders = 0b0000_0100,

    /// Grabbable ledges, solid like ground
    Ledges = 0b0000_1000,

    /// Moving platforms
    Platform = 0b0001_0000,

    /// Player characters
    Player = 0b0010_0000,

    /// Enemy characters
    Enemies = 0b0100_0000,

    /// Actor sensors (feet, hands) - never cause physical collision
    Sensor = 0b1000_0000,
}

impl CollisionLayer {
    /// Every layer, in bit order
    pub const ALL: [CollisionLayer; 8] = [
        CollisionLayer::Default,
        CollisionLayer::Ground,
        CollisionLayer::Ladders,
        CollisionLayer::Ledges,
        CollisionLayer::Platform,
        CollisionLayer::Player,
        CollisionLayer::Enemies,
        CollisionLayer::Sensor,
    ];

    /// Raw membership bit
    pub fn bit(self) -> u32 {
        self as u32
    }

    /// Find the layer a membership group belongs to
    pub fn from_group(group: Group) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|layer| group.bits() & layer.bit() != 0)
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self.bit());

        let filter = match self {
            // Players stand on ground, ledges and platforms, bump into enemies
            // and overlap ladders
            CollisionLayer::Player => LayerMask::of(&[
                CollisionLayer::Ground,
                CollisionLayer::Ladders,
                CollisionLayer::Ledges,
                CollisionLayer::Platform,
                CollisionLayer::Enemies,
                CollisionLayer::Sensor,
            ]),

            CollisionLayer::Enemies => LayerMask::of(&[
                CollisionLayer::Ground,
                CollisionLayer::Ledges,
                CollisionLayer::Platform,
                CollisionLayer::Player,
                CollisionLayer::Sensor,
            ]),

            // Level geometry only reacts to actors and their sensors
            CollisionLayer::Ground | CollisionLayer::Ledges | CollisionLayer::Platform => {
                LayerMask::of(&[
                    CollisionLayer::Player,
                    CollisionLayer::Enemies,
                    CollisionLayer::Sensor,
                ])
            }

            CollisionLayer::Ladders => {
                LayerMask::of(&[CollisionLayer::Player, CollisionLayer::Sensor])
            }

            CollisionLayer::Sensor | CollisionLayer::Default => LayerMask::ALL,
        };

        InteractionGroups::new(memberships, Group::from_bits_truncate(filter.bits()))
    }
}

/// A set of collision layers used to filter queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Layers the feet sensor treats as standing surface
    pub const FOOTING: LayerMask = LayerMask(
        CollisionLayer::Ground as u32 | CollisionLayer::Ledges as u32 | CollisionLayer::Platform as u32,
    );

    /// Build a mask from a list of layers
    pub fn of(layers: &[CollisionLayer]) -> Self {
        Self(layers.iter().fold(0, |bits, layer| bits | layer.bit()))
    }

    /// Raw bits
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Check if the mask includes a layer
    pub fn contains(self, layer: CollisionLayer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Check if any membership bit of `group` is in the mask
    pub fn matches(self, group: Group) -> bool {
        self.0 & group.bits() != 0
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        Self(layer.bit())
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// If `collider` is part of this event, return the other collider
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        let (a, b) = match *self {
            Self::Started {
                collider1,
                collider2,
            }
            | Self::Stopped {
                collider1,
                collider2,
            } => (collider1, collider2),
        };

        if a == collider {
            Some(b)
        } else if b == collider {
            Some(a)
        } else {
            None
        }
    }

    /// Check if this is a contact start
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
