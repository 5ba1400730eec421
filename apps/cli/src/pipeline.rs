//! The note-generation pipeline
//!
//! Document references are processed one at a time, strictly in bundle
//! order; generation calls are never in flight concurrently. That keeps
//! the pipeline inside the external service's quota and is deliberate,
//! not incidental. The first fatal error aborts the run; there is no
//! partial-success mode.

use crate::error::Result;
use crate::output;
use scribe_bundle::{Bundle, BundleIndex, DocumentReference, Encounter, Patient, ReferenceResolver};
use scribe_context::{build, select};
use scribe_llm::{ChatClient, NoteGenerator};
use std::time::Duration;
use tokio::time::sleep;

/// Pause after every successful generation before the next one starts.
pub const INTER_REQUEST_DELAY: Duration = Duration::from_secs(15);

/// Run the pipeline over one bundle; returns the annotated output copy.
///
/// The input bundle is never mutated. The output starts as a deep copy
/// and only its DocumentReference attachment payloads change.
pub async fn run<C: ChatClient>(
    bundle: &Bundle,
    generator: &NoteGenerator<C>,
    inter_request_delay: Duration,
) -> Result<Bundle> {
    let index = BundleIndex::new(bundle);
    let resolver = ReferenceResolver::new(&index);
    let patient: Patient = index.first_of_type("Patient")?;

    let mut annotated = bundle.clone();

    for resource in index.resources_of_type("DocumentReference") {
        let document_reference = DocumentReference::from_value(resource)?;
        let encounter_reference = document_reference.encounter_reference()?;
        let encounter = Encounter::from_value(resolver.resolve(encounter_reference)?)?;

        let context = build(&patient, &encounter, &index)?;
        let type_code = encounter.type_code().unwrap_or_default();
        let Some(selection) = select(type_code, context.reason.is_some()) else {
            tracing::info!(
                document_reference = %document_reference.id,
                encounter = %encounter.id,
                "No template applies, skipping"
            );
            continue;
        };

        tracing::info!(
            document_reference = %document_reference.id,
            encounter = %encounter.id,
            template = ?selection.template,
            "Generating note"
        );
        let prompt = selection.template.render(&context);
        let text = generator.generate(selection.system_role, &prompt).await?;

        output::apply(&mut annotated, &document_reference.id, &text)?;

        // Fixed inter-call spacing toward the service quota.
        sleep(inter_request_delay).await;
    }

    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use scribe_llm::{Error as LlmError, RetryPolicy};
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct ScriptedClient {
        calls: Arc<AtomicU32>,
    }

    impl ScriptedClient {
        fn new() -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(&self, system: &str, user: &str) -> scribe_llm::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("[{system}] note for: {}", user.lines().next().unwrap_or("")))
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        async fn complete(&self, _system: &str, _user: &str) -> scribe_llm::Result<String> {
            Err(LlmError::Api("service unavailable".to_string()))
        }
    }

    fn emergency_bundle() -> Bundle {
        Bundle::from_value(&json!({
            "resourceType": "Bundle",
            "entry": [
                {
                    "fullUrl": "urn:uuid:p1",
                    "resource": {
                        "resourceType": "Patient",
                        "id": "p1",
                        "name": [{ "given": ["Jane"], "family": "Doe" }],
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
                    }
                },
                {
                    "fullUrl": "urn:uuid:e1",
                    "resource": {
                        "resourceType": "Encounter",
                        "id": "e1",
                        "period": { "start": "2020-01-01T08:00:00+00:00" },
                        "type": [
                            { "coding": [{ "code": "50849002", "display": "Emergency room admission (procedure)" }] }
                        ]
                    }
                },
                {
                    "fullUrl": "urn:uuid:d1",
                    "resource": {
                        "resourceType": "DocumentReference",
                        "id": "d1",
                        "context": { "encounter": [{ "reference": "urn:uuid:e1" }] },
                        "content": [{ "attachment": { "contentType": "text/plain" } }]
                    }
                },
                {
                    "fullUrl": "urn:uuid:mr1",
                    "resource": {
                        "resourceType": "MedicationRequest",
                        "id": "mr1",
                        "encounter": { "reference": "urn:uuid:e1" },
                        "medicationCodeableConcept": {
                            "coding": [{ "display": "Aspirin 81 MG Oral Tablet" }]
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_populates_attachment_and_nothing_else() {
        let bundle = emergency_bundle();
        let (client, calls) = ScriptedClient::new();
        let generator = NoteGenerator::new(client, RetryPolicy::default());

        let annotated = run(&bundle, &generator, INTER_REQUEST_DELAY).await.unwrap();

        // The attachment payload is the only difference from the input.
        let data = annotated.entry[2].resource["content"][0]["attachment"]["data"]
            .as_str()
            .unwrap();
        assert!(!data.is_empty());
        let decoded = String::from_utf8(STANDARD.decode(data).unwrap()).unwrap();
        assert!(decoded.contains("You are a medical scribe."));

        let mut expected = bundle.clone();
        expected.entry[2].resource["content"][0]["attachment"]["data"] = json!(data);
        assert_eq!(annotated, expected);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_skips_unrecognized_encounter_without_reason() {
        let mut bundle = emergency_bundle();
        bundle.entry[1].resource["type"][0]["coding"][0]["code"] = json!("185349003");

        let (client, calls) = ScriptedClient::new();
        let generator = NoteGenerator::new(client, RetryPolicy::default());

        let annotated = run(&bundle, &generator, INTER_REQUEST_DELAY).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(annotated, bundle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_aborts_on_generation_failure() {
        let bundle = emergency_bundle();
        let generator = NoteGenerator::new(FailingClient, RetryPolicy::default());

        let err = run(&bundle, &generator, INTER_REQUEST_DELAY).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Generation(LlmError::Api(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_never_mutates_the_input() {
        let bundle = emergency_bundle();
        let before = bundle.clone();
        let (client, _calls) = ScriptedClient::new();
        let generator = NoteGenerator::new(client, RetryPolicy::default());

        run(&bundle, &generator, INTER_REQUEST_DELAY).await.unwrap();
        assert_eq!(bundle, before);
    }
}
