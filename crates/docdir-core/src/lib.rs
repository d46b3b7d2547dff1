//! # docdir-core
//!
//! The listing logic of the docdir doctor directory.
//!
//! This crate provides:
//! - The collaborator traits (`DoctorSource`, `SymptomSource`, `SymptomMapping`)
//! - The filter/sort engine that derives the displayed subset
//! - The `Listing` state object that owns doctors and query parameters
//! - The `FilterPanel` model and the `DoctorCard` display model
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docdir_core::{Listing, ParamUpdate, traits::{DoctorSource, SymptomMapping}};
//! ```

pub mod card;
pub mod engine;
pub mod listing;
pub mod panel;
pub mod traits;

pub use listing::{Listing, ListingView, LoadState, ParamUpdate};
