//! Template context construction
//!
//! `build` derives the flat, display-ready field mapping one template
//! rendering needs from a patient/encounter pair and the indexed bundle.
//! It is a pure function of its inputs: nothing is mutated, and identical
//! inputs produce identical contexts.

use crate::display::{clean_condition_display, clean_encounter_type_display, clean_procedure_display};
use crate::error::{Error, Result};
use scribe_bundle::{
    for_encounter, BundleIndex, Encounter, Immunization, Medication, MedicationRequest, Patient,
    Procedure, ReferenceResolver,
};
use serde::Serialize;

/// Extension URL carrying the patient's race coding.
pub const US_CORE_RACE: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-race";

/// The flat field mapping handed to template rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteContext {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub encounter_type: String,
    /// Present only when the encounter carries a reason code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub race: String,
    pub medications: Vec<String>,
    pub procedures: Vec<String>,
}

/// Build the template context for one patient/encounter pair.
pub fn build(patient: &Patient, encounter: &Encounter, index: &BundleIndex) -> Result<NoteContext> {
    let name = patient
        .name
        .first()
        .ok_or_else(|| Error::MissingField("Patient.name".to_string()))?;
    let family = name
        .family
        .as_deref()
        .ok_or_else(|| Error::MissingField("Patient.name.family".to_string()))?;
    let full_name = format!("{} {}", name.given.join(" "), family);

    let birth_date = patient
        .birth_date
        .ok_or_else(|| Error::MissingField("Patient.birthDate".to_string()))?;
    let encounter_date = encounter.start_date()?;
    // Fixed 365-day divisor with floor division; an approximation the
    // downstream templates rely on, not calendar-accurate age.
    let age = (encounter_date - birth_date).num_days().div_euclid(365);

    let gender = patient
        .gender
        .clone()
        .ok_or_else(|| Error::MissingField("Patient.gender".to_string()))?;

    let encounter_type = encounter
        .type_display()
        .map(clean_encounter_type_display)
        .ok_or_else(|| Error::MissingField("Encounter.type".to_string()))?;

    let reason = encounter.reason_display().map(clean_condition_display);

    let race = extract_race(patient)?;

    let resolver = ReferenceResolver::new(index);
    let requests: Vec<MedicationRequest> = index.typed_resources("MedicationRequest")?;
    let medications = medication_names(&for_encounter(&requests, encounter), &resolver)?;

    let procedures: Vec<Procedure> = index.typed_resources("Procedure")?;
    let procedures = for_encounter(&procedures, encounter)
        .into_iter()
        .map(procedure_name)
        .collect::<Result<Vec<_>>>()?;

    // Immunizations are correlated and named but no template consumes
    // them yet.
    let immunizations: Vec<Immunization> = index.typed_resources("Immunization")?;
    let _ = immunization_names(&for_encounter(&immunizations, encounter));

    Ok(NoteContext {
        name: full_name,
        age,
        gender,
        encounter_type,
        reason,
        race,
        medications,
        procedures,
    })
}

/// Lowercased display of the first nested coding under the patient's race
/// extension.
fn extract_race(patient: &Patient) -> Result<String> {
    let race_extension = patient
        .extension_by_url(US_CORE_RACE)
        .ok_or_else(|| Error::RaceExtensionMissing(US_CORE_RACE.to_string()))?;
    race_extension
        .extension
        .first()
        .and_then(|e| e.value_coding.as_ref())
        .and_then(|c| c.display.as_deref())
        .map(|d| d.to_lowercase())
        .ok_or_else(|| Error::MissingField("Patient.extension.valueCoding.display".to_string()))
}

/// Display names of the correlated medication requests, in bundle order.
///
/// A request either embeds its medication coding or references a separate
/// Medication resource; the referenced form goes through the resolver.
fn medication_names(
    requests: &[&MedicationRequest],
    resolver: &ReferenceResolver,
) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(requests.len());
    for request in requests {
        let name = match &request.medication_codeable_concept {
            Some(concept) => concept
                .primary_display()
                .ok_or_else(|| {
                    Error::MissingField("MedicationRequest.medicationCodeableConcept".to_string())
                })?
                .to_string(),
            None => {
                let reference = request
                    .medication_reference
                    .as_ref()
                    .and_then(|r| r.reference.as_deref())
                    .ok_or_else(|| {
                        Error::MissingField("MedicationRequest.medicationReference".to_string())
                    })?;
                let medication = Medication::from_value(resolver.resolve(reference)?)?;
                medication
                    .code
                    .as_ref()
                    .and_then(|c| c.primary_display())
                    .ok_or_else(|| Error::MissingField("Medication.code".to_string()))?
                    .to_string()
            }
        };
        names.push(name);
    }
    Ok(names)
}

fn procedure_name(procedure: &Procedure) -> Result<String> {
    procedure
        .code
        .as_ref()
        .and_then(|c| c.primary_display())
        .map(clean_procedure_display)
        .ok_or_else(|| Error::MissingField("Procedure.code".to_string()))
}

fn immunization_names(immunizations: &[&Immunization]) -> Vec<String> {
    immunizations
        .iter()
        .filter_map(|iz| iz.vaccine_code.as_ref().and_then(|c| c.primary_display()))
        .map(str::to_string)
        .collect()
}
