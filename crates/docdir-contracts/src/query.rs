//! Query parameters: the shareable, URL-encoded listing state.
//!
//! `QueryParams` behaves like a browser's `URLSearchParams` restricted to
//! one value per key: insertion order is kept, `set` replaces in place, and
//! setting an empty value removes the key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-text doctor name search.
pub const SEARCH: &str = "search";
/// Single specialty, matched exactly.
pub const SPECIALTY: &str = "specialty";
/// Comma-joined specialty names written by the filter panel.
pub const SPECIALTIES: &str = "specialties";
/// Symptom text, resolved through the symptom table.
pub const SYMPTOM: &str = "symptom";
/// Clinic name, matched exactly.
pub const CLINIC: &str = "clinic";
/// Consultation mode: `video` or `clinic`.
pub const MODE: &str = "mode";
/// Sort key: `fees` or `experience`.
pub const SORT: &str = "sort";

/// The keys a new search clears. At most one of them is active at a time.
pub const SEARCH_KEYS: [&str; 4] = [SEARCH, SPECIALTY, SYMPTOM, CLINIC];

/// An ordered mapping from parameter name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a form-urlencoded query string. A leading `?` is ignored and
    /// the first value of a repeated key wins, as `URLSearchParams.get` reads it.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if params.pairs.iter().any(|(k, _)| k == key.as_ref()) {
                continue;
            }
            params.pairs.push((key.into_owned(), value.into_owned()));
        }
        // An empty first value still shadows later ones, then reads as absent.
        params.pairs.retain(|(_, v)| !v.is_empty());
        params
    }

    /// Serialize as a form-urlencoded query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Return the value for `key`, treating an empty value as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Set `key` to `value`, replacing any existing value in place.
    /// An empty `value` deletes the key instead.
    pub fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.delete(key);
            return;
        }
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `sort` parameter, if it names a known sort key.
    pub fn sort(&self) -> Option<SortKey> {
        self.get(SORT).and_then(SortKey::parse)
    }

    /// The comma-joined `specialties` parameter split into names.
    pub fn specialties(&self) -> Vec<&str> {
        self.get(SPECIALTIES)
            .map(|v| v.split(',').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.to_query_string())
    }
}

/// How the listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by numeric fee.
    Fees,
    /// Descending by years of experience.
    Experience,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fees" => Some(Self::Fees),
            "experience" => Some(Self::Experience),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fees => "fees",
            Self::Experience => "experience",
        }
    }
}

/// Consultation mode filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultMode {
    Video,
    Clinic,
}

impl ConsultMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(Self::Video),
            "clinic" => Some(Self::Clinic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Clinic => "clinic",
        }
    }
}
