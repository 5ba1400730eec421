//! Encounter correlation
//!
//! Clinical resources carry an `encounter` reference of the form
//! `urn:uuid:<encounter-id>` linking them to exactly one encounter.
//! Correlation filters a resource collection down to one encounter's
//! subsequence, preserving bundle order. An empty result is valid: an
//! encounter may have no medications, procedures or immunizations.

use crate::resource::{Encounter, Immunization, MedicationRequest, Procedure};

/// Resources that carry an encounter back-reference.
pub trait EncounterScoped {
    fn encounter_reference(&self) -> Option<&str>;
}

impl EncounterScoped for MedicationRequest {
    fn encounter_reference(&self) -> Option<&str> {
        self.encounter.as_ref().and_then(|r| r.reference.as_deref())
    }
}

impl EncounterScoped for Procedure {
    fn encounter_reference(&self) -> Option<&str> {
        self.encounter.as_ref().and_then(|r| r.reference.as_deref())
    }
}

impl EncounterScoped for Immunization {
    fn encounter_reference(&self) -> Option<&str> {
        self.encounter.as_ref().and_then(|r| r.reference.as_deref())
    }
}

/// The subsequence of `resources` whose encounter reference points at
/// `encounter`, in input order.
pub fn for_encounter<'a, T: EncounterScoped>(
    resources: &'a [T],
    encounter: &Encounter,
) -> Vec<&'a T> {
    let urn = encounter.urn();
    resources
        .iter()
        .filter(|r| r.encounter_reference() == Some(urn.as_str()))
        .collect()
}
