//! Qualifying tags.
//!
//! A qualifier marks a registry entry as intended for this integration
//! rather than generic. It is an opaque, stable string; no reflection or
//! annotation machinery is involved.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque qualifying tag attached to registry entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qualifier(Cow<'static, str>);

impl Qualifier {
    /// The tag designating entries meant for the persistence integration.
    pub const DESIGNATED: Self = Self(Cow::Borrowed("enlace"));

    /// Creates a qualifier from a static string.
    #[must_use]
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// Creates a qualifier from any string.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    /// Returns the tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the tag is usable: non-empty, made of alphanumerics,
    /// `-`, `_` or `.`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl Default for Qualifier {
    fn default() -> Self {
        Self::DESIGNATED
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Qualifier {
    fn from(tag: &'static str) -> Self {
        Self::from_static(tag)
    }
}

/// Renders an optional qualifier for log fields and error messages.
#[must_use]
pub fn describe(qualifier: Option<&Qualifier>) -> &str {
    qualifier.map_or("untagged", Qualifier::as_str)
}
