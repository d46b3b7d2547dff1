//! The listing: fetch-once doctor state plus the query-parameter state object.
//!
//! `Listing` is the single owner of both the fetched doctors and the current
//! `QueryParams`. Every user action is expressed as one `ParamUpdate`; the
//! listing computes the next parameter set from the current one and swaps it
//! in, so the view never observes a half-applied change.
//!
//! ```rust,ignore
//! let mut listing = Listing::new(Arc::new(mapping));
//! listing.load(&source).await;
//! listing.apply(ParamUpdate::Search(SearchEvent::new("tooth", SearchCategory::Symptoms)));
//! match listing.view() { ... }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use docdir_contracts::{
    doctor::Doctor,
    error::DirectoryResult,
    query::{self, QueryParams},
    suggest::{SearchCategory, SearchEvent},
};

use crate::{
    engine::{self, FilterCriteria},
    traits::{DoctorSource, SymptomMapping},
};

/// Whether the one-time doctor fetch has finished.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    /// The fetch finished. A failed fetch lands here with an empty list.
    Ready {
        doctors: Vec<Doctor>,
        fetched_at: DateTime<Utc>,
    },
}

/// What the listing should render right now.
#[derive(Debug)]
pub enum ListingView<'a> {
    /// The doctor fetch is still in flight.
    Loading,
    /// Loaded, but no doctor matches the current parameters.
    Empty,
    Doctors(Vec<&'a Doctor>),
}

/// One user action against the query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamUpdate {
    /// A committed autocomplete search. Clears every other search key first.
    Search(SearchEvent),
    /// Set `key` to `value`; an empty value deletes the key.
    Set { key: String, value: String },
    /// Reset every parameter.
    ClearAll,
}

impl ParamUpdate {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Compute the parameters that result from applying `update` to `current`.
pub fn next_params(current: &QueryParams, update: &ParamUpdate) -> QueryParams {
    match update {
        ParamUpdate::Search(event) => {
            let mut next = current.clone();
            for key in query::SEARCH_KEYS {
                next.delete(key);
            }
            let key = match event.category {
                SearchCategory::Symptoms => query::SYMPTOM,
                SearchCategory::Specialists => query::SPECIALTY,
                SearchCategory::Clinics => query::CLINIC,
                SearchCategory::Doctors | SearchCategory::Search => query::SEARCH,
            };
            next.set(key, &event.term);
            next
        }
        ParamUpdate::Set { key, value } => {
            let mut next = current.clone();
            next.set(key, value);
            next
        }
        ParamUpdate::ClearAll => QueryParams::new(),
    }
}

/// Doctor list and query-parameter state for one session.
pub struct Listing {
    state: LoadState,
    params: QueryParams,
    mapping: Arc<dyn SymptomMapping>,
}

impl Listing {
    /// Create a listing in the `Loading` state with empty parameters.
    pub fn new(mapping: Arc<dyn SymptomMapping>) -> Self {
        Self {
            state: LoadState::Loading,
            params: QueryParams::new(),
            mapping,
        }
    }

    /// Start from previously shared parameters (e.g. a restored query string).
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// The full, unfiltered doctor list. Empty while loading.
    pub fn doctors(&self) -> &[Doctor] {
        match &self.state {
            LoadState::Loading => &[],
            LoadState::Ready { doctors, .. } => doctors.as_slice(),
        }
    }

    /// Fetch the doctor list from `source` and record the outcome.
    pub async fn load(&mut self, source: &dyn DoctorSource) {
        self.state = LoadState::Loading;
        let result = source.fetch_doctors().await;
        self.finish_loading(result);
    }

    /// Record the outcome of a doctor fetch performed elsewhere.
    ///
    /// A failure is logged and leaves the listing ready with no doctors; it is
    /// never surfaced as an error state.
    pub fn finish_loading(&mut self, result: DirectoryResult<Vec<Doctor>>) {
        let doctors = match result {
            Ok(doctors) => {
                info!(count = doctors.len(), "doctor list loaded");
                doctors
            }
            Err(e) => {
                warn!(error = %e, "doctor fetch failed; showing an empty directory");
                Vec::new()
            }
        };
        self.state = LoadState::Ready {
            doctors,
            fetched_at: Utc::now(),
        };
    }

    /// Apply one user action to the query parameters.
    pub fn apply(&mut self, update: ParamUpdate) {
        let next = next_params(&self.params, &update);
        debug!(?update, params = %next, "query parameters updated");
        self.params = next;
    }

    /// Replace all parameters at once (e.g. on navigation to a shared link).
    pub fn replace_params(&mut self, params: QueryParams) {
        self.params = params;
    }

    /// The criteria the current parameters resolve to.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_params(&self.params, self.mapping.as_ref())
    }

    /// Derive the current view from the loaded doctors and parameters.
    pub fn view(&self) -> ListingView<'_> {
        match &self.state {
            LoadState::Loading => ListingView::Loading,
            LoadState::Ready { doctors, .. } => {
                let selected = engine::apply(doctors, &self.criteria());
                if selected.is_empty() {
                    ListingView::Empty
                } else {
                    ListingView::Doctors(selected)
                }
            }
        }
    }
}
