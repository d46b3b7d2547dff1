//! # docdir-mapping
//!
//! A TOML-driven symptom → specialty table for the docdir listing.
//!
//! ## Overview
//!
//! This crate provides [`TomlSymptomMapping`], which implements the
//! [`SymptomMapping`](docdir_core::traits::SymptomMapping) trait. Rules are
//! declared in a TOML file, evaluated in order, and the first rule whose key
//! occurs in the symptom text wins. If no rule matches, the table's default
//! specialties apply.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use docdir_mapping::TomlSymptomMapping;
//!
//! let mapping = TomlSymptomMapping::load(Some(Path::new("my-table.toml")))?;
//! // Pass `Arc::new(mapping)` to `docdir_core::Listing::new(...)`.
//! ```

pub mod engine;
pub mod rule;

pub use engine::TomlSymptomMapping;
pub use rule::{MappingConfig, SymptomRule};

// ── Tests ─────────────────────────────────────────────────────────────────────
