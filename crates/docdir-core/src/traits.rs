//! Collaborator traits for the docdir listing.
//!
//! These three traits are the seams between the pure listing logic and the
//! outside world:
//!
//! - `DoctorSource`   — where the doctor list comes from (fetched once)
//! - `SymptomSource`  — ranked symptom terms for a partial query
//! - `SymptomMapping` — which specialties treat a given symptom
//!
//! The listing and the autocomplete only ever see these traits, so HTTP
//! clients, fixtures, and test doubles are interchangeable.

use async_trait::async_trait;

use docdir_contracts::{doctor::Doctor, error::DirectoryResult};

/// The remote doctor feed.
///
/// Implementations return the whole list in one call; there is no paging.
/// Errors are returned as-is; `Listing::finish_loading` decides how to
/// degrade them.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_doctors(&self) -> DirectoryResult<Vec<Doctor>>;
}

/// The remote symptom term search.
#[async_trait]
pub trait SymptomSource: Send + Sync {
    /// Return matched symptom terms for `query`, best match first.
    ///
    /// A service answer that signals "no success" is an empty `Ok`, not an
    /// error; `Err` is reserved for transport and decoding failures.
    async fn search_symptoms(&self, query: &str) -> DirectoryResult<Vec<String>>;
}

/// Symptom → specialty lookup used by the `symptom` filter.
///
/// Must be deterministic and cheap; it runs on every view recomputation.
pub trait SymptomMapping: Send + Sync {
    /// Return the specialty names relevant to `symptom`. Never empty.
    fn specialties_for(&self, symptom: &str) -> Vec<String>;
}
