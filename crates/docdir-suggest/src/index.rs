//! In-memory matching over the loaded doctor list.

use std::collections::HashSet;

use docdir_contracts::{doctor::Doctor, suggest::SuggestionSet};

/// Doctor names, distinct specialties, and distinct clinics, in first-seen
/// order. Built once per doctor list.
#[derive(Debug, Clone, Default)]
pub struct LocalIndex {
    doctors: Vec<String>,
    specialties: Vec<String>,
    clinics: Vec<String>,
}

impl LocalIndex {
    pub fn from_doctors(doctors: &[Doctor]) -> Self {
        let mut seen_specialties = HashSet::new();
        let mut seen_clinics = HashSet::new();
        let mut index = Self::default();

        for doctor in doctors {
            index.doctors.push(doctor.name.clone());
            for name in doctor.speciality_names() {
                if seen_specialties.insert(name) {
                    index.specialties.push(name.to_string());
                }
            }
            let clinic = doctor.clinic_id();
            if !clinic.is_empty() && seen_clinics.insert(clinic) {
                index.clinics.push(clinic.to_string());
            }
        }
        index
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn clinics(&self) -> &[String] {
        &self.clinics
    }

    /// Match `query` against the three local groups. The symptom group is
    /// left empty; it comes from the remote source.
    pub fn lookup(&self, query: &str, cap: usize) -> SuggestionSet {
        let needle = query.to_lowercase();
        SuggestionSet {
            symptoms: Vec::new(),
            doctors: first_matches(&self.doctors, &needle, cap),
            specialists: first_matches(&self.specialties, &needle, cap),
            clinics: first_matches(&self.clinics, &needle, cap),
        }
    }
}

fn first_matches(items: &[String], needle: &str, cap: usize) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.to_lowercase().contains(needle))
        .take(cap)
        .cloned()
        .collect()
}
