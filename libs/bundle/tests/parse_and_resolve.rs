use scribe_bundle::{
    for_encounter, Bundle, BundleIndex, DocumentReference, Encounter, Medication,
    MedicationRequest, Patient, Procedure, ReferenceResolver,
};
use std::{fs::File, path::PathBuf};

fn load_fixture(name: &str) -> Bundle {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let file = File::open(&path).expect("failed to open fixture");
    let value = serde_json::from_reader(file).expect("failed to parse fixture");
    Bundle::from_value(&value).expect("failed to deserialize bundle")
}

#[test]
fn parse_transaction_bundle() {
    let bundle = load_fixture("emergency_bundle.json");

    assert_eq!(bundle.entries().len(), 6);
    // Transaction request blocks survive in the entry's extension map.
    assert!(bundle.entries()[0].extensions.contains_key("request"));

    let patient = Patient::from_value(&bundle.entries()[0].resource).unwrap();
    assert_eq!(patient.name[0].family.as_deref(), Some("Bartoletti"));
    assert_eq!(patient.gender.as_deref(), Some("male"));
}

#[test]
fn locate_encounter_from_document_reference() {
    let bundle = load_fixture("emergency_bundle.json");
    let index = BundleIndex::new(&bundle);
    let resolver = ReferenceResolver::new(&index);

    let document_reference: DocumentReference = index.first_of_type("DocumentReference").unwrap();
    let reference = document_reference.encounter_reference().unwrap();
    let encounter = Encounter::from_value(resolver.resolve(reference).unwrap()).unwrap();

    assert_eq!(encounter.type_code(), Some("50849002"));
    assert_eq!(encounter.reason_display(), Some("Whiplash injury to neck"));
}

#[test]
fn correlate_and_resolve_medication() {
    let bundle = load_fixture("emergency_bundle.json");
    let index = BundleIndex::new(&bundle);
    let resolver = ReferenceResolver::new(&index);

    let encounter: Encounter = index.first_of_type("Encounter").unwrap();
    let requests: Vec<MedicationRequest> = index.typed_resources("MedicationRequest").unwrap();
    let correlated = for_encounter(&requests, &encounter);
    assert_eq!(correlated.len(), 1);

    let reference = correlated[0]
        .medication_reference
        .as_ref()
        .unwrap()
        .reference
        .as_deref()
        .unwrap();
    let medication = Medication::from_value(resolver.resolve(reference).unwrap()).unwrap();
    assert_eq!(
        medication.code.unwrap().primary_display(),
        Some("Naproxen sodium 220 MG Oral Tablet")
    );

    let procedures: Vec<Procedure> = index.typed_resources("Procedure").unwrap();
    let correlated = for_encounter(&procedures, &encounter);
    assert_eq!(
        correlated[0].code.as_ref().unwrap().primary_display(),
        Some("Cervical collar application (procedure)")
    );
}
