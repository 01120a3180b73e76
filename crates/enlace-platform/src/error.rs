//! Platform error types.

use enlace_core::ResolveError;

/// Result type alias for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Platform adapter errors.
///
/// Capability absence never shows up here; the adapter turns it into a
/// boolean, an `Option` or a host fallback before returning.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Resolution failed (registry unreachable, ambiguous, mistyped).
    #[error("resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// A transaction coordinator was demanded but none is registered.
    #[error("no transaction coordinator is registered")]
    CoordinatorUnavailable,

    /// The host could not start a task.
    #[error("failed to launch task: {0}")]
    Spawn(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PlatformError {
    /// Creates a spawn error.
    #[must_use]
    pub fn spawn(msg: impl Into<String>) -> Self {
        Self::Spawn(msg.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error means the deployment is broken and the
    /// session must not start.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Resolve(err) => err.is_fatal(),
            Self::CoordinatorUnavailable | Self::Spawn(_) | Self::Config(_) => false,
        }
    }
}
