//! Template context construction and prompt selection
//!
//! Derives the flat, display-ready context a note template needs from one
//! patient/encounter pair (`context`), normalizes source display strings
//! (`display`), and maps an encounter's type code to a template and a
//! generation persona (`prompt`).

pub mod context;
pub mod display;
pub mod error;
pub mod prompt;

// Re-export commonly used types
pub use context::{build, NoteContext, US_CORE_RACE};
pub use display::{clean_condition_display, clean_encounter_type_display, clean_procedure_display};
pub use error::{Error, Result};
pub use prompt::{
    select, NoteTemplate, PromptSelection, DEATH_CERTIFICATION_CODE, EMERGENCY_ENCOUNTER_CODE,
};
