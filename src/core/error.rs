// Error types
//
// Gameplay gates never fail: a blocked jump or an attack on cooldown is a silent
// no-op. Errors only surface for misconfiguration, save data problems and
// capability hooks an actor does not implement.

/// Construction and configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Shorthand for an `InvalidValue` error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors returned by actor capabilities (damageable, saveable)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapabilityError {
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Save state mismatch: expected {expected}, got {actual}")]
    StateMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Save file errors
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to serialize save data: {0}")]
    Serialize(String),

    #[error("Failed to parse save data: {0}")]
    Parse(String),

    #[error("No saved state for actor {0}")]
    MissingEntry(String),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
