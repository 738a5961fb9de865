// Headless UI state
//
// Nothing here draws. These types hold what a renderer would show: the pickup
// alert and the player's health and charge bars.

pub mod alert;
pub mod hud;

pub use alert::{Alert, ALERT_WAIT_TIME};
pub use hud::PlayerHud;
