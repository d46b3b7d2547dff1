//! The filter/sort engine.
//!
//! Turns the full doctor list plus the current query parameters into the
//! ordered subset the listing displays. Everything here is pure and
//! synchronous.
//!
//! Evaluation order:
//!
//! 1. Resolve `QueryParams` into a `FilterCriteria` (the symptom filter is
//!    expanded through the `SymptomMapping` once, not per doctor).
//! 2. Keep every doctor that satisfies all active filters (logical AND).
//! 3. Stable-sort by the `sort` key, if one is recognized.

use std::cmp::Reverse;

use tracing::debug;

use docdir_contracts::{
    doctor::Doctor,
    query::{self, ConsultMode, QueryParams, SortKey},
};

use crate::traits::SymptomMapping;

/// How the `mode` parameter constrains consultation flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeFilter {
    Only(ConsultMode),
    /// A value that is neither `video` nor `clinic`. Matches nothing.
    Unrecognized(String),
}

impl ModeFilter {
    fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            ModeFilter::Only(ConsultMode::Video) => doctor.video_consult,
            ModeFilter::Only(ConsultMode::Clinic) => doctor.in_clinic,
            ModeFilter::Unrecognized(_) => false,
        }
    }
}

/// The resolved form of the query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Lowercased name fragment from `search`.
    pub name: Option<String>,
    /// Exact speciality name from `specialty`.
    pub specialty: Option<String>,
    /// Any-of speciality names from the panel's `specialties`.
    pub specialties: Vec<String>,
    /// Specialties the `symptom` parameter resolved to.
    pub symptom_specialties: Option<Vec<String>>,
    /// Exact clinic name from `clinic`.
    pub clinic: Option<String>,
    pub mode: Option<ModeFilter>,
    pub sort: Option<SortKey>,
}

impl FilterCriteria {
    /// Resolve `params` into criteria, expanding `symptom` via `mapping`.
    pub fn from_params(params: &QueryParams, mapping: &dyn SymptomMapping) -> Self {
        let symptom_specialties = params.get(query::SYMPTOM).map(|symptom| {
            let specialties = mapping.specialties_for(symptom);
            debug!(symptom, ?specialties, "symptom resolved to specialties");
            specialties
        });

        let mode = params.get(query::MODE).map(|raw| match ConsultMode::parse(raw) {
            Some(mode) => ModeFilter::Only(mode),
            None => ModeFilter::Unrecognized(raw.to_string()),
        });

        Self {
            name: params.get(query::SEARCH).map(str::to_lowercase),
            specialty: params.get(query::SPECIALTY).map(str::to_string),
            specialties: params.specialties().into_iter().map(str::to_string).collect(),
            symptom_specialties,
            clinic: params.get(query::CLINIC).map(str::to_string),
            mode,
            sort: params.sort(),
        }
    }

    /// Return true if `doctor` passes every active filter.
    pub fn matches(&self, doctor: &Doctor) -> bool {
        if let Some(name) = &self.name {
            if !doctor.name.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        if let Some(specialty) = &self.specialty {
            if !doctor.has_speciality(specialty) {
                return false;
            }
        }
        if !self.specialties.is_empty()
            && !self.specialties.iter().any(|s| doctor.has_speciality(s))
        {
            return false;
        }
        if let Some(relevant) = &self.symptom_specialties {
            if !doctor.speciality_names().any(|s| relevant.iter().any(|r| r == s)) {
                return false;
            }
        }
        if let Some(clinic) = &self.clinic {
            if doctor.clinic_id() != clinic {
                return false;
            }
        }
        if let Some(mode) = &self.mode {
            if !mode.matches(doctor) {
                return false;
            }
        }
        true
    }
}

/// Filter `doctors` by `criteria` and sort the survivors.
///
/// The returned order is the input order when no sort key is active; sorting
/// is stable, so doctors with equal keys keep their relative order.
pub fn apply<'d>(doctors: &'d [Doctor], criteria: &FilterCriteria) -> Vec<&'d Doctor> {
    let mut selected: Vec<&Doctor> = doctors.iter().filter(|d| criteria.matches(d)).collect();

    match criteria.sort {
        Some(SortKey::Fees) => selected.sort_by_key(|d| parse_fee(&d.fees)),
        Some(SortKey::Experience) => selected.sort_by_key(|d| Reverse(parse_experience(&d.experience))),
        None => {}
    }

    debug!(
        total = doctors.len(),
        selected = selected.len(),
        sort = ?criteria.sort,
        "filter applied"
    );
    selected
}

/// Numeric fee: every digit in the string, concatenated. `"₹ 1,200"` → 1200.
/// A string without digits is 0; overflowing values saturate.
pub fn parse_fee(fees: &str) -> u64 {
    fees.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}

/// Years of experience: the leading digit run after optional whitespace.
/// `"13 Years of experience"` → 13; `"Over 5 years"` → 0.
pub fn parse_experience(experience: &str) -> u64 {
    experience
        .trim_start()
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}
