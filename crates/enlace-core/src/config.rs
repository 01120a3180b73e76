//! Resolver configuration.
//!
//! Per Iron Lotus Framework: Configuration is validated at load time (Poka-Yoke),
//! with sensible defaults and clear error messages.
//!
//! ```toml
//! qualifier = "enlace"
//!
//! [executor]
//! lookups = ["tagged", "untagged"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::policy::{CapabilityPolicy, Fallback, PolicySet};
use crate::qualifier::Qualifier;
use crate::resolver::Lookup;

/// Enlace configuration.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Fallback actions are fixed per capability; only lookup order and the
/// designated qualifier are configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnlaceConfig {
    /// Tag marking registry entries intended for this integration.
    #[serde(default)]
    pub qualifier: Qualifier,

    /// Lookup order for the transaction coordinator presence check.
    #[serde(default = "LookupConfig::untagged_only")]
    pub transaction_coordinator: LookupConfig,

    /// Lookup order for the task executor.
    #[serde(default = "LookupConfig::tagged_then_untagged")]
    pub executor: LookupConfig,

    /// Lookup order for the management endpoint.
    #[serde(default = "LookupConfig::tagged_then_untagged")]
    pub management: LookupConfig,
}

impl Default for EnlaceConfig {
    fn default() -> Self {
        Self {
            qualifier: Qualifier::default(),
            transaction_coordinator: LookupConfig::untagged_only(),
            executor: LookupConfig::tagged_then_untagged(),
            management: LookupConfig::tagged_then_untagged(),
        }
    }
}

impl EnlaceConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.qualifier.is_well_formed() {
            return Err(ResolveError::config(format!(
                "qualifier {:?} must be non-empty and contain only alphanumeric characters, hyphens, underscores and dots",
                self.qualifier.as_str()
            )));
        }

        self.transaction_coordinator
            .validate("transaction_coordinator")?;
        self.executor.validate("executor")?;
        self.management.validate("management")?;

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text cannot be parsed or is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ResolveError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ResolveError::config(format!("failed to read config: {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Builds the policies described by this configuration.
    #[must_use]
    pub fn policies(&self) -> PolicySet {
        PolicySet {
            transaction_coordinator: self
                .transaction_coordinator
                .policy(&self.qualifier, Fallback::DisableFeature),
            executor: self
                .executor
                .policy(&self.qualifier, Fallback::DefaultExecution),
            management: self
                .management
                .policy(&self.qualifier, Fallback::DeferToHost),
        }
    }
}

/// A step in a configured lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStep {
    /// Entries carrying the designated qualifier.
    Tagged,
    /// Entries carrying no qualifier.
    Untagged,
}

/// Lookup order for one capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    /// Steps tried in order until one matches.
    pub lookups: Vec<LookupStep>,
}

impl LookupConfig {
    /// Untagged entries only.
    #[must_use]
    pub fn untagged_only() -> Self {
        Self {
            lookups: vec![LookupStep::Untagged],
        }
    }

    /// Tagged entries first, then untagged entries.
    #[must_use]
    pub fn tagged_then_untagged() -> Self {
        Self {
            lookups: vec![LookupStep::Tagged, LookupStep::Untagged],
        }
    }

    fn validate(&self, section: &str) -> Result<()> {
        if self.lookups.is_empty() {
            return Err(ResolveError::config(format!(
                "{section}.lookups cannot be empty"
            )));
        }

        let mut seen = HashSet::new();
        if let Some(step) = self.lookups.iter().find(|step| !seen.insert(**step)) {
            return Err(ResolveError::config(format!(
                "{section}.lookups lists {step:?} more than once"
            )));
        }

        Ok(())
    }

    fn policy(&self, qualifier: &Qualifier, fallback: Fallback) -> CapabilityPolicy {
        let lookups = self
            .lookups
            .iter()
            .map(|step| match step {
                LookupStep::Tagged => Lookup::Tagged(qualifier.clone()),
                LookupStep::Untagged => Lookup::Untagged,
            })
            .collect();
        CapabilityPolicy::new(lookups, fallback)
    }
}
