//! Symptom table types and configuration schema.
//!
//! A `MappingConfig` is deserialized from TOML and holds an ordered list of
//! `SymptomRule`s. Rules are evaluated in declaration order — the first rule
//! whose key occurs in the symptom text wins. If no rule matches, the table's
//! `default` specialties apply.

use serde::{Deserialize, Serialize};

/// A single symptom rule loaded from TOML.
///
/// Example:
/// ```toml
/// [[rules]]
/// key = "back pain"
/// specialties = ["Orthopedic", "Physiotherapist"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRule {
    /// Lowercase fragment searched for in the symptom text.
    pub key: String,

    /// Specialties returned when this rule matches, in display order.
    pub specialties: Vec<String>,
}

impl SymptomRule {
    /// Return true if this rule's key occurs in `lowercase_symptom`.
    ///
    /// The caller lowercases the symptom once; keys are lowercased at load.
    pub fn matches(&self, lowercase_symptom: &str) -> bool {
        lowercase_symptom.contains(self.key.as_str())
    }
}

fn default_fallback() -> Vec<String> {
    vec!["General Physician".to_string()]
}

/// The top-level structure deserialized from a TOML symptom table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Returned when no rule matches.
    #[serde(default = "default_fallback")]
    pub default: Vec<String>,

    /// Ordered list of rules. First match wins.
    #[serde(default)]
    pub rules: Vec<SymptomRule>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            default: default_fallback(),
            rules: Vec::new(),
        }
    }
}
