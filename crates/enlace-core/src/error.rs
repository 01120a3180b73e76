//! Error types for enlace-core.
//!
//! Per Iron Lotus Framework: All errors are explicit, no panics allowed.
//! Capability absence is never an error; it is [`crate::Resolution::Unsatisfied`].

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Failures that can occur while resolving a capability.
///
/// Only infrastructure failures live here. A registry with no matching
/// entry answers `Ok(None)`, which the resolver turns into
/// [`crate::Resolution::Unsatisfied`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The registry could not be queried at all.
    #[error("registry unreachable: {0}")]
    RegistryUnreachable(String),

    /// The registry holds more than one entry for the same type and tag.
    #[error("ambiguous registry match for {capability} (qualifier: {qualifier})")]
    Ambiguous {
        /// Capability type name.
        capability: String,
        /// Qualifier used for the query, or `untagged`.
        qualifier: String,
    },

    /// The registry answered with a handle of a different type.
    #[error("registry returned a handle that is not a {capability}")]
    TypeMismatch {
        /// Capability type name.
        capability: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ResolveError {
    /// Creates a registry unreachable error.
    #[must_use]
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::RegistryUnreachable(msg.into())
    }

    /// Creates an ambiguous match error.
    #[must_use]
    pub fn ambiguous(capability: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self::Ambiguous {
            capability: capability.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(capability: impl Into<String>) -> Self {
        Self::TypeMismatch {
            capability: capability.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error indicates a broken deployment.
    ///
    /// Fatal errors abort adapter construction or the probe that hit them.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Returns true if the registry itself could not be reached.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::RegistryUnreachable(_))
    }
}
