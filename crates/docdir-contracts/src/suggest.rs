//! Autocomplete suggestion groups and the selection event they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum entries shown per suggestion group.
pub const GROUP_CAP: usize = 3;

/// What a search term refers to. The listing maps each category onto one
/// query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Symptoms,
    Doctors,
    Specialists,
    Clinics,
    /// Free text confirmed without picking a suggestion.
    Search,
}

impl SearchCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symptoms => "symptoms",
            Self::Doctors => "doctors",
            Self::Specialists => "specialists",
            Self::Clinics => "clinics",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted by the autocomplete when the user commits a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    pub term: String,
    pub category: SearchCategory,
}

impl SearchEvent {
    pub fn new(term: impl Into<String>, category: SearchCategory) -> Self {
        Self {
            term: term.into(),
            category,
        }
    }
}

/// A single selectable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SearchCategory,
    /// Text placed in the input and emitted as the search term.
    pub label: String,
}

/// The four suggestion groups shown under the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub symptoms: Vec<String>,
    pub doctors: Vec<String>,
    pub specialists: Vec<String>,
    pub clinics: Vec<String>,
}

impl SuggestionSet {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
            && self.doctors.is_empty()
            && self.specialists.is_empty()
            && self.clinics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len() + self.doctors.len() + self.specialists.len() + self.clinics.len()
    }

    /// Groups in display order, each paired with its category.
    pub fn groups(&self) -> [(SearchCategory, &[String]); 4] {
        [
            (SearchCategory::Symptoms, self.symptoms.as_slice()),
            (SearchCategory::Doctors, self.doctors.as_slice()),
            (SearchCategory::Specialists, self.specialists.as_slice()),
            (SearchCategory::Clinics, self.clinics.as_slice()),
        ]
    }

    /// All suggestions flattened in display order.
    pub fn flatten(&self) -> Vec<Suggestion> {
        self.groups()
            .into_iter()
            .flat_map(|(category, items)| {
                items.iter().map(move |label| Suggestion {
                    category,
                    label: label.clone(),
                })
            })
            .collect()
    }
}
