//! Typed views of the resource kinds the pipeline reads
//!
//! Each view names only the fields the note-generation pipeline touches;
//! everything else stays behind in the entry's raw `Value`. Views are
//! parsed on demand with `from_value` and never written back, so the
//! input bundle is read-only throughout a run.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// A coded value with an optional human-readable display string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept carried as one or more codings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Display string of the first coding.
    pub fn primary_display(&self) -> Option<&str> {
        self.coding.first().and_then(|c| c.display.as_deref())
    }

    /// Structured code of the first coding.
    pub fn primary_code(&self) -> Option<&str> {
        self.coding.first().and_then(|c| c.code.as_deref())
    }
}

/// A reference string pointing at another entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A name part of a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HumanName {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

/// A typed extension, possibly nesting further extensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_coding: Option<Coding>,
}

/// A time period; only the start is read by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

fn parse<T: DeserializeOwned>(value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(Error::from)
}

/// Patient demographics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Patient {
    /// Parse from a JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        parse(value)
    }

    /// The patient's extension with the given URL, if present.
    pub fn extension_by_url(&self, url: &str) -> Option<&Extension> {
        self.extension.iter().find(|e| e.url == url)
    }
}

/// One clinical encounter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub encounter_type: Vec<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_code: Vec<CodeableConcept>,
}

impl Encounter {
    /// Parse from a JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        parse(value)
    }

    /// The synthetic urn-style identifier other resources use to point
    /// back at this encounter.
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.id)
    }

    /// Structured code of the encounter's type.
    pub fn type_code(&self) -> Option<&str> {
        self.encounter_type.first().and_then(|t| t.primary_code())
    }

    /// Display string of the encounter's type.
    pub fn type_display(&self) -> Option<&str> {
        self.encounter_type
            .first()
            .and_then(|t| t.primary_display())
    }

    /// Display string of the encounter's reason code, if any.
    pub fn reason_display(&self) -> Option<&str> {
        self.reason_code.first().and_then(|r| r.primary_display())
    }

    /// Date portion of the encounter's start timestamp.
    pub fn start_date(&self) -> Result<NaiveDate> {
        let start = self
            .period
            .as_ref()
            .and_then(|p| p.start.as_deref())
            .ok_or_else(|| Error::MissingField("Encounter.period.start".to_string()))?;
        let date = start
            .get(0..10)
            .ok_or_else(|| Error::MissingField("Encounter.period.start".to_string()))?;
        date.parse()
            .map_err(|_| Error::InvalidFieldValue(format!("Encounter.period.start: {start}")))
    }
}

/// A document slot whose attachment receives the generated note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<DocumentContext>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<DocumentContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encounter: Vec<Reference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    #[serde(default)]
    pub attachment: Attachment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl DocumentReference {
    /// Parse from a JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        parse(value)
    }

    /// Reference string of the encounter this document belongs to.
    pub fn encounter_reference(&self) -> Result<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.encounter.first())
            .and_then(|r| r.reference.as_deref())
            .ok_or_else(|| {
                Error::MissingField("DocumentReference.context.encounter".to_string())
            })
    }
}

/// An order for a medication, embedded or referenced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_codeable_concept: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_reference: Option<Reference>,
}

/// A standalone Medication resource, reached via `medicationReference`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

impl Medication {
    /// Parse from a JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        parse(value)
    }
}

/// A procedure performed during an encounter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

/// An immunization administered during an encounter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccine_code: Option<CodeableConcept>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_patient() {
        let patient = Patient::from_value(&json!({
            "resourceType": "Patient",
            "id": "p1",
            "name": [{ "given": ["Ada", "May"], "family": "Lovelace" }],
            "birthDate": "1980-01-01",
            "gender": "female",
            "extension": [
                {
                    "url": "http://hl7.org/fhir/us/core/StructureDefinition/us-core-race",
                    "extension": [
                        { "url": "ombCategory", "valueCoding": { "display": "White" } }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(patient.name[0].given, vec!["Ada", "May"]);
        assert_eq!(
            patient.birth_date,
            Some(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())
        );
        let race = patient
            .extension_by_url("http://hl7.org/fhir/us/core/StructureDefinition/us-core-race")
            .unwrap();
        assert_eq!(
            race.extension[0].value_coding.as_ref().unwrap().display,
            Some("White".to_string())
        );
    }

    #[test]
    fn test_encounter_accessors() {
        let encounter = Encounter::from_value(&json!({
            "resourceType": "Encounter",
            "id": "e1",
            "period": { "start": "2020-01-01T09:30:00+00:00" },
            "type": [
                { "coding": [{ "code": "50849002", "display": "Emergency room admission (procedure)" }] }
            ],
            "reasonCode": [
                { "coding": [{ "display": "Chest pain (finding)" }] }
            ]
        }))
        .unwrap();

        assert_eq!(encounter.urn(), "urn:uuid:e1");
        assert_eq!(encounter.type_code(), Some("50849002"));
        assert_eq!(
            encounter.type_display(),
            Some("Emergency room admission (procedure)")
        );
        assert_eq!(encounter.reason_display(), Some("Chest pain (finding)"));
        assert_eq!(
            encounter.start_date().unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_encounter_without_reason() {
        let encounter = Encounter::from_value(&json!({
            "resourceType": "Encounter",
            "id": "e2",
            "type": [{ "coding": [{ "code": "185349003" }] }]
        }))
        .unwrap();

        assert_eq!(encounter.reason_display(), None);
        assert!(encounter.start_date().is_err());
    }

    #[test]
    fn test_document_reference_encounter_reference() {
        let dr = DocumentReference::from_value(&json!({
            "resourceType": "DocumentReference",
            "id": "d1",
            "context": { "encounter": [{ "reference": "urn:uuid:e1" }] },
            "content": [{ "attachment": { "contentType": "text/plain" } }]
        }))
        .unwrap();

        assert_eq!(dr.encounter_reference().unwrap(), "urn:uuid:e1");
        assert_eq!(dr.content[0].attachment.data, None);
    }
}
