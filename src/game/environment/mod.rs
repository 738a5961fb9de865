// Level furniture

pub mod platform;

pub use platform::{MovingPlatform, RiderId, PLATFORM_SPEED};
