//! The filter panel model.
//!
//! The panel holds no draft copy of the filters: checked/selected states are
//! read straight from `QueryParams`, and every control produces a
//! `ParamUpdate` that the listing applies immediately. The only local state is
//! presentational (the specialty search box and collapsed sections).

use std::collections::BTreeSet;

use docdir_contracts::{
    doctor::Doctor,
    query::{self, ConsultMode, QueryParams, SortKey},
};

use crate::listing::ParamUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSection {
    Sort,
    Specialties,
    Mode,
}

#[derive(Debug, Clone)]
pub struct FilterPanel {
    /// Every distinct speciality name, sorted.
    specialties: Vec<String>,
    search_term: String,
    sort_expanded: bool,
    specialties_expanded: bool,
    mode_expanded: bool,
}

impl FilterPanel {
    /// Build the panel's specialty list from the loaded doctors.
    pub fn from_doctors(doctors: &[Doctor]) -> Self {
        let unique: BTreeSet<&str> = doctors.iter().flat_map(|d| d.speciality_names()).collect();
        Self {
            specialties: unique.into_iter().map(str::to_string).collect(),
            search_term: String::new(),
            sort_expanded: true,
            specialties_expanded: true,
            mode_expanded: true,
        }
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Specialties whose name contains the search term, case-insensitively.
    pub fn visible_specialties(&self) -> Vec<&str> {
        let needle = self.search_term.to_lowercase();
        self.specialties
            .iter()
            .map(String::as_str)
            .filter(|s| s.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn is_expanded(&self, section: PanelSection) -> bool {
        match section {
            PanelSection::Sort => self.sort_expanded,
            PanelSection::Specialties => self.specialties_expanded,
            PanelSection::Mode => self.mode_expanded,
        }
    }

    pub fn toggle_section(&mut self, section: PanelSection) {
        let flag = match section {
            PanelSection::Sort => &mut self.sort_expanded,
            PanelSection::Specialties => &mut self.specialties_expanded,
            PanelSection::Mode => &mut self.mode_expanded,
        };
        *flag = !*flag;
    }

    // ── Bound controls ────────────────────────────────────────────────────────

    pub fn select_sort(key: SortKey) -> ParamUpdate {
        ParamUpdate::set(query::SORT, key.as_str())
    }

    /// `None` is the "All" choice and removes the mode parameter.
    pub fn select_mode(mode: Option<ConsultMode>) -> ParamUpdate {
        ParamUpdate::set(query::MODE, mode.map(ConsultMode::as_str).unwrap_or(""))
    }

    pub fn is_checked(params: &QueryParams, specialty: &str) -> bool {
        params.specialties().contains(&specialty)
    }

    /// Add `specialty` to the comma-joined list, or remove it if present.
    pub fn toggle_specialty(params: &QueryParams, specialty: &str) -> ParamUpdate {
        let mut selected = params.specialties();
        if selected.contains(&specialty) {
            selected.retain(|s| *s != specialty);
        } else {
            selected.push(specialty);
        }
        ParamUpdate::set(query::SPECIALTIES, selected.join(","))
    }

    pub fn clear_all() -> ParamUpdate {
        ParamUpdate::ClearAll
    }
}
