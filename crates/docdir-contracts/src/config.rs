//! Runtime configuration loaded from TOML.
//!
//! Every key is optional; an empty document yields the defaults below.
//!
//! ```toml
//! doctors_url = "https://example.org/doctors.json"
//! debounce_ms = 250
//! mapping_path = "mappings/symptoms.toml"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, DirectoryResult};

pub const DEFAULT_DOCTORS_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
pub const DEFAULT_SYMPTOMS_URL: &str =
    "https://clinicaltables.nlm.nih.gov/api/symptoms/v3/search";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Static JSON endpoint serving the doctor array.
    pub doctors_url: String,
    /// Symptom search endpoint; queried with `terms` and `maxList`.
    pub symptoms_url: String,
    /// Value sent as `maxList` to the symptom endpoint.
    pub symptom_max_list: usize,
    /// Entries kept per suggestion group.
    pub suggestion_cap: usize,
    /// Quiet period before an autocomplete lookup fires.
    pub debounce_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// Symptom table to load instead of the built-in one.
    pub mapping_path: Option<PathBuf>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            doctors_url: DEFAULT_DOCTORS_URL.to_string(),
            symptoms_url: DEFAULT_SYMPTOMS_URL.to_string(),
            symptom_max_list: 5,
            suggestion_cap: crate::suggest::GROUP_CAP,
            debounce_ms: 300,
            connect_timeout_ms: 5_000,
            request_timeout_ms: 10_000,
            mapping_path: None,
        }
    }
}

impl DirectoryConfig {
    /// Parse `s` as a TOML configuration document.
    pub fn from_toml_str(s: &str) -> DirectoryResult<Self> {
        toml::from_str(s).map_err(|e| DirectoryError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_file(path: &Path) -> DirectoryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DirectoryError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load(path: Option<&Path>) -> DirectoryResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
