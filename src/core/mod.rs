// Core utilities shared by every other module

pub mod error;
pub mod math;

pub use error::{CapabilityError, ConfigError, SaveError};
