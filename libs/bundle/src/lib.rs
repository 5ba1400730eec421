//! FHIR bundle model, indexing and reference resolution
//!
//! This crate provides the data model for patient-record bundles and the
//! lookup machinery the note-generation pipeline is built on:
//!
//! - `bundle`: the raw `Bundle`/`Entry` container, kept loss-free over
//!   `serde_json::Value` so an output copy round-trips unknown fields
//! - `resource`: strongly-typed views of the resource kinds the pipeline
//!   reads (Patient, Encounter, DocumentReference, ...)
//! - `index`: `BundleIndex`, built once per run for lookup by `fullUrl`,
//!   by resource id and by resource type
//! - `resolve`: `ReferenceResolver`, mapping reference strings to the
//!   entry they point at
//! - `correlate`: filtering resource collections down to one encounter
//!
//! # Example
//!
//! ```rust
//! use scribe_bundle::{Bundle, BundleIndex};
//! use serde_json::json;
//!
//! let bundle: Bundle = serde_json::from_value(json!({
//!     "resourceType": "Bundle",
//!     "entry": [
//!         {
//!             "fullUrl": "urn:uuid:p1",
//!             "resource": { "resourceType": "Patient", "id": "p1" }
//!         }
//!     ]
//! })).unwrap();
//!
//! let index = BundleIndex::new(&bundle);
//! assert_eq!(index.resources_of_type("Patient").len(), 1);
//! ```

pub mod bundle;
pub mod correlate;
pub mod error;
pub mod index;
pub mod resolve;
pub mod resource;

// Re-export commonly used types
pub use bundle::{Bundle, Entry};
pub use correlate::{for_encounter, EncounterScoped};
pub use error::{Error, Result};
pub use index::BundleIndex;
pub use resolve::ReferenceResolver;
pub use resource::*;
