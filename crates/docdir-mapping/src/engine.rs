//! TOML-driven symptom table implementation.
//!
//! `TomlSymptomMapping` loads a `MappingConfig` from a TOML string or file and
//! implements the `SymptomMapping` trait from docdir-core.
//!
//! Lookup algorithm:
//!
//! 1. Lowercase the symptom text.
//! 2. Return the specialties of the first rule whose key is a substring.
//! 3. If no rule matched → the table's `default` list.

use std::path::Path;

use tracing::{debug, error};

use docdir_contracts::error::{DirectoryError, DirectoryResult};
use docdir_core::traits::SymptomMapping;

use crate::rule::MappingConfig;

/// The table shipped with docdir.
pub const BUILTIN_TABLE: &str = include_str!("../mappings/symptoms.toml");

/// A `SymptomMapping` backed by a TOML document.
///
/// ```rust,ignore
/// use docdir_mapping::TomlSymptomMapping;
///
/// let mapping = TomlSymptomMapping::from_file(Path::new("mappings/symptoms.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct TomlSymptomMapping {
    config: MappingConfig,
}

impl TomlSymptomMapping {
    /// Parse `s` as TOML and build a validated table.
    ///
    /// Returns `DirectoryError::ConfigError` if the TOML is malformed, if a
    /// rule has an empty key (it would match every symptom), or if any rule
    /// or the default has no specialties.
    pub fn from_toml_str(s: &str) -> DirectoryResult<Self> {
        let mut config: MappingConfig = toml::from_str(s).map_err(|e| DirectoryError::ConfigError {
            reason: format!("failed to parse symptom table TOML: {}", e),
        })?;

        if config.default.is_empty() {
            return Err(DirectoryError::ConfigError {
                reason: "symptom table default must name at least one specialty".to_string(),
            });
        }

        for (index, rule) in config.rules.iter_mut().enumerate() {
            rule.key = rule.key.trim().to_lowercase();
            if rule.key.is_empty() {
                return Err(DirectoryError::ConfigError {
                    reason: format!("symptom rule #{} has an empty key", index + 1),
                });
            }
            if rule.specialties.is_empty() {
                return Err(DirectoryError::ConfigError {
                    reason: format!("symptom rule '{}' lists no specialties", rule.key),
                });
            }
        }

        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a symptom table.
    pub fn from_file(path: &Path) -> DirectoryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DirectoryError::ConfigError {
            reason: format!("failed to read symptom table '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The six-entry table embedded at build time. Falls back to a
    /// default-only table if the embedded document fails validation.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_TABLE).unwrap_or_else(|e| {
            error!(error = %e, "embedded symptom table is invalid");
            Self {
                config: MappingConfig::default(),
            }
        })
    }

    /// Load from `path` when given, otherwise use the built-in table.
    pub fn load(path: Option<&Path>) -> DirectoryResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }
}

impl SymptomMapping for TomlSymptomMapping {
    fn specialties_for(&self, symptom: &str) -> Vec<String> {
        let lowercase = symptom.to_lowercase();

        match self.config.rules.iter().find(|rule| rule.matches(&lowercase)) {
            Some(rule) => {
                debug!(symptom, key = %rule.key, "symptom rule matched");
                rule.specialties.clone()
            }
            None => {
                debug!(symptom, "no symptom rule matched; using default");
                self.config.default.clone()
            }
        }
    }
}
