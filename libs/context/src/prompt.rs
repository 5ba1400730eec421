//! Prompt selection and rendering
//!
//! A three-way decision table keyed on the encounter type's structured
//! code picks the note template and the persona the generation service is
//! instructed to take. Encounters with an unrecognized code and no reason
//! produce no prompt at all; the pipeline skips those document references
//! without error.

use crate::context::NoteContext;
use std::fmt::Write;

/// SNOMED code for an emergency room admission.
pub const EMERGENCY_ENCOUNTER_CODE: &str = "50849002";
/// SNOMED code for death certification.
pub const DEATH_CERTIFICATION_CODE: &str = "308646001";

/// The note templates the pipeline can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteTemplate {
    EmergencyRoom,
    DeathCertification,
    EncounterForProblem,
}

/// One row of the decision table: which template to render and which
/// persona to hand the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSelection {
    pub template: NoteTemplate,
    pub system_role: &'static str,
}

const SCRIBE_ROLE: &str = "You are a medical scribe.";
const EXAMINER_ROLE: &str = "You are a medical examiner.";

/// Decide whether and how to generate for one encounter.
///
/// Returns `None` when no template applies; the document reference is then
/// skipped, which is not an error.
pub fn select(type_code: &str, has_reason: bool) -> Option<PromptSelection> {
    match type_code {
        EMERGENCY_ENCOUNTER_CODE => Some(PromptSelection {
            template: NoteTemplate::EmergencyRoom,
            system_role: SCRIBE_ROLE,
        }),
        DEATH_CERTIFICATION_CODE => Some(PromptSelection {
            template: NoteTemplate::DeathCertification,
            system_role: EXAMINER_ROLE,
        }),
        _ if has_reason => Some(PromptSelection {
            template: NoteTemplate::EncounterForProblem,
            system_role: SCRIBE_ROLE,
        }),
        _ => None,
    }
}

impl NoteTemplate {
    /// Render the user prompt for this template from a context.
    ///
    /// Deterministic and side-effect-free; the same context always yields
    /// the same prompt string.
    pub fn render(&self, context: &NoteContext) -> String {
        match self {
            NoteTemplate::EmergencyRoom => {
                let mut prompt = format!(
                    "Write the clinical note for an emergency room visit, charted the way \
                     the attending physician would write it.\n\n{}",
                    demographics(context)
                );
                if let Some(reason) = &context.reason {
                    let _ = writeln!(prompt, "Presenting complaint: {reason}");
                }
                prompt.push_str(&orders(context));
                prompt.push_str(
                    "\nThe note should cover presentation, examination, interventions and \
                     disposition in plain prose.\n",
                );
                prompt
            }
            NoteTemplate::DeathCertification => {
                let mut prompt = format!(
                    "Write the death certification note for the following decedent.\n\n{}",
                    demographics(context)
                );
                if let Some(reason) = &context.reason {
                    let _ = writeln!(prompt, "Documented cause: {reason}");
                }
                prompt.push_str(&orders(context));
                prompt.push_str(
                    "\nThe note should state the circumstances and certified cause of death \
                     in formal prose.\n",
                );
                prompt
            }
            NoteTemplate::EncounterForProblem => {
                let mut prompt = format!(
                    "Write the clinical note for a {} encounter.\n\n{}",
                    context.encounter_type,
                    demographics(context)
                );
                if let Some(reason) = &context.reason {
                    let _ = writeln!(prompt, "Reason for encounter: {reason}");
                }
                prompt.push_str(&orders(context));
                prompt.push_str(
                    "\nThe note should cover history, assessment and plan in plain prose.\n",
                );
                prompt
            }
        }
    }
}

fn demographics(context: &NoteContext) -> String {
    format!(
        "Patient: {}, a {}-year-old {} {} patient.\n",
        context.name, context.age, context.race, context.gender
    )
}

fn orders(context: &NoteContext) -> String {
    let mut section = String::new();
    if !context.medications.is_empty() {
        section.push_str("Medications ordered during the encounter:\n");
        for medication in &context.medications {
            let _ = writeln!(section, "- {medication}");
        }
    }
    if !context.procedures.is_empty() {
        section.push_str("Procedures performed during the encounter:\n");
        for procedure in &context.procedures {
            let _ = writeln!(section, "- {procedure}");
        }
    }
    section
}
