use std::time::Duration;

/// Domain-level errors shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Recoverable input validation failure (empty title, oversized file, etc).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The per-board placement cooldown has not elapsed yet.
    #[error("Cooldown active: {} seconds remaining", remaining.as_secs())]
    CooldownActive { remaining: Duration },

    /// The client-local key-value store could not be read or written.
    #[error("Local store error: {0}")]
    Store(#[from] std::io::Error),

    /// The client-local store held a value that failed to serialize.
    #[error("Local store serialization error: {0}")]
    StoreSerialization(#[from] serde_json::Error),
}
