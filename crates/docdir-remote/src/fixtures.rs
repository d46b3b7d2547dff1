//! Offline stand-ins for the remote doctor feed and symptom search.
//!
//! All data in this module is hardcoded and fictional. No external systems
//! are contacted. Used by `--offline` in the front-ends and by tests across
//! the workspace.

use async_trait::async_trait;

use docdir_contracts::{
    doctor::Doctor,
    error::{DirectoryError, DirectoryResult},
};
use docdir_core::traits::{DoctorSource, SymptomSource};

// ── Doctor list (mock) ────────────────────────────────────────────────────────

/// Eight doctors in the shape the remote feed serves.
const SAMPLE_DOCTORS_JSON: &str = r#"[
  {
    "id": "D-101", "name": "Dr. Meera Iyer", "name_initials": "MI",
    "specialities": [{ "name": "Neurologist" }],
    "fees": "₹ 800", "experience": "15 Years of experience",
    "languages": ["English", "Tamil"],
    "clinic": { "name": "NeuroCare Clinic", "address": { "locality": "Adyar", "city": "Chennai" } },
    "video_consult": true, "in_clinic": true
  },
  {
    "id": "D-102", "name": "Dr. Arjun Shah", "name_initials": "AS",
    "specialities": [{ "name": "Dentist" }],
    "fees": "₹ 300", "experience": "6 Years of experience",
    "languages": ["English", "Gujarati"],
    "clinic": { "name": "Smile Dental Studio", "address": { "locality": "Andheri West", "city": "Mumbai" } },
    "video_consult": false, "in_clinic": true
  },
  {
    "id": "D-103", "name": "Dr. Kavya Menon", "name_initials": "KM",
    "specialities": [{ "name": "General Physician" }, { "name": "Dermatologist" }],
    "fees": "₹ 500", "experience": "22 Years of experience",
    "languages": ["English", "Malayalam"],
    "clinic": { "name": "City Health Centre", "address": { "locality": "Kakkanad", "city": "Kochi" } },
    "video_consult": true, "in_clinic": false
  },
  {
    "id": "D-104", "name": "Dr. Rahul Verma", "name_initials": "RV",
    "specialities": [{ "name": "Cardiologist" }],
    "fees": "₹ 1,200", "experience": "18 Years of experience",
    "languages": ["English", "Hindi"],
    "clinic": { "name": "Heart Point Hospital", "address": { "locality": "Kothrud", "city": "Pune" } },
    "video_consult": true, "in_clinic": true
  },
  {
    "id": "D-105", "name": "Dr. Sana Qureshi", "name_initials": "SQ",
    "specialities": [{ "name": "Ophthalmologist" }],
    "fees": "₹ 650", "experience": "9 Years of experience",
    "languages": ["English", "Urdu"],
    "clinic": { "name": "Clear Vision Eye Clinic", "address": { "locality": "Banjara Hills", "city": "Hyderabad" } },
    "video_consult": false, "in_clinic": true
  },
  {
    "id": "D-106", "name": "Dr. Vikram Rao", "name_initials": "VR",
    "specialities": [{ "name": "Orthopedic" }, { "name": "Physiotherapist" }],
    "fees": "₹ 700", "experience": "12 Years of experience",
    "languages": ["English", "Kannada"],
    "clinic": { "name": "City Health Centre", "address": { "locality": "Kakkanad", "city": "Kochi" } },
    "video_consult": true, "in_clinic": true
  },
  {
    "id": "D-107", "name": "Dr. Nisha Kapoor", "name_initials": "NK",
    "specialities": [{ "name": "Dermatologist" }],
    "fees": "₹ 450", "experience": "4 Years of experience",
    "languages": ["English", "Punjabi"],
    "clinic": { "name": "Skin Deep Clinic", "address": { "locality": "Saket", "city": "Delhi" } },
    "video_consult": true, "in_clinic": false
  },
  {
    "id": "D-108", "name": "Dr. Farhan Ali", "name_initials": "FA",
    "specialities": [{ "name": "General Physician" }],
    "fees": "₹ 250", "experience": "3 Years of experience",
    "languages": ["English", "Hindi"],
    "clinic": { "name": "Family First Clinic", "address": { "locality": "Indiranagar", "city": "Bangalore" } },
    "video_consult": true, "in_clinic": true
  }
]"#;

/// Parse the embedded sample roster.
pub fn sample_doctors() -> DirectoryResult<Vec<Doctor>> {
    serde_json::from_str(SAMPLE_DOCTORS_JSON).map_err(|e| DirectoryError::Decode {
        reason: format!("sample doctor fixture: {e}"),
    })
}

/// A `DoctorSource` that always returns the same list.
#[derive(Debug, Clone, Default)]
pub struct StaticDoctorSource {
    doctors: Vec<Doctor>,
}

impl StaticDoctorSource {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// A source serving [`sample_doctors`].
    pub fn sample() -> DirectoryResult<Self> {
        Ok(Self::new(sample_doctors()?))
    }
}

#[async_trait]
impl DoctorSource for StaticDoctorSource {
    async fn fetch_doctors(&self) -> DirectoryResult<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }
}

// ── Symptom vocabulary (mock) ─────────────────────────────────────────────────

const SAMPLE_SYMPTOMS: &[&str] = &[
    "Headache",
    "Migraine headache",
    "Tension headache",
    "Back pain",
    "Lower back pain",
    "Toothache",
    "Tooth sensitivity",
    "Skin rash",
    "Itchy skin",
    "Eye pain",
    "Red eye",
    "Heart palpitations",
    "Chest pain",
    "Fever",
    "Cough",
    "Fatigue",
];

/// A `SymptomSource` that substring-matches a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct StaticSymptomSource {
    terms: Vec<String>,
    max_list: usize,
}

impl StaticSymptomSource {
    pub fn new(terms: Vec<String>, max_list: usize) -> Self {
        Self { terms, max_list }
    }

    /// A source over the built-in sample vocabulary.
    pub fn sample(max_list: usize) -> Self {
        Self::new(SAMPLE_SYMPTOMS.iter().map(|s| s.to_string()).collect(), max_list)
    }
}

#[async_trait]
impl SymptomSource for StaticSymptomSource {
    async fn search_symptoms(&self, query: &str) -> DirectoryResult<Vec<String>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .terms
            .iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .take(self.max_list)
            .cloned()
            .collect())
    }
}
