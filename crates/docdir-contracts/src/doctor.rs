//! Doctor records as served by the remote directory feed.
//!
//! Every field except `id` and `name` is defaulted on deserialization so a
//! single sparse record does not reject the whole feed. A `null` counts as
//! missing, and text fields also take numbers.

use serde::{Deserialize, Deserializer, Serialize};

/// One doctor listing. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_initials: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub doctor_introduction: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialities: Vec<Speciality>,
    /// Currency-prefixed fee, e.g. "₹ 500".
    #[serde(default, deserialize_with = "lenient_text")]
    pub fees: String,
    /// Leading integer plus unit, e.g. "13 Years of experience".
    #[serde(default, deserialize_with = "lenient_text")]
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clinic: Clinic,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub in_clinic: bool,
}

impl Doctor {
    /// Iterate over the display names of this doctor's specialities.
    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|s| s.name.as_str())
    }

    /// Return true if any speciality name equals `name` exactly.
    pub fn has_speciality(&self, name: &str) -> bool {
        self.speciality_names().any(|s| s == name)
    }

    /// The identifier the clinic filter and clinic suggestions use.
    pub fn clinic_id(&self) -> &str {
        &self.clinic.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

impl Speciality {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "lenient_text")]
    pub locality: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
}

impl RawText {
    fn into_string(self) -> String {
        match self {
            RawText::Text(s) => s,
            RawText::Number(n) => n.to_string(),
        }
    }
}

/// Feeds disagree on whether `id` is a string or a number; accept both.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawText::deserialize(deserializer).map(RawText::into_string)
}

/// A string or a number; `null` and any other shape become empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Known(RawText),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Known(text) => text.into_string(),
        Raw::Other(_) => String::new(),
    })
}

/// `null` or a value of the wrong shape falls back to `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(matches!(Raw::deserialize(deserializer)?, Raw::Flag(true)))
}

/// `null` or a value of the wrong shape falls back to `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::<T>::deserialize(deserializer)? {
        Raw::Value(value) => value,
        Raw::Other(_) => T::default(),
    })
}
