//! Display-string cleanup
//!
//! Source display strings carry trailing SNOMED hierarchy qualifiers like
//! `(procedure)` or `(disorder)`. The cleanup functions strip each
//! qualifier only when it is the literal trailing suffix, at most once, in
//! a fixed order, then normalize whitespace. That makes every function
//! here idempotent on its own output.

/// Normalize an encounter-type display for template use.
///
/// Strips a trailing `(procedure)` then `(environment)`, lowercases, trims.
pub fn clean_encounter_type_display(display: &str) -> String {
    let display = display.strip_suffix("(procedure)").unwrap_or(display);
    let display = display.strip_suffix("(environment)").unwrap_or(display);
    display.to_lowercase().trim().to_string()
}

/// Normalize a condition/reason display for template use.
///
/// Strips a trailing `(situation)`, `(finding)`, `(disorder)` in that
/// order, then trims. Case is kept as-is.
pub fn clean_condition_display(display: &str) -> String {
    let display = display.strip_suffix("(situation)").unwrap_or(display);
    let display = display.strip_suffix("(finding)").unwrap_or(display);
    let display = display.strip_suffix("(disorder)").unwrap_or(display);
    display.trim().to_string()
}

/// Normalize a procedure display for template use.
pub fn clean_procedure_display(display: &str) -> String {
    let display = display.strip_suffix("(procedure)").unwrap_or(display);
    display.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_encounter_type_display() {
        assert_eq!(
            clean_encounter_type_display("Emergency room admission (procedure)"),
            "emergency room admission"
        );
        assert_eq!(
            clean_encounter_type_display("Patient encounter procedure (environment)"),
            "patient encounter procedure"
        );
        assert_eq!(clean_encounter_type_display("Follow-up visit"), "follow-up visit");
    }

    #[test]
    fn test_clean_encounter_type_display_strips_each_suffix_at_most_once() {
        // Only the literal trailing qualifier goes; inner parentheticals stay.
        assert_eq!(
            clean_encounter_type_display("Fall (accident) (procedure)"),
            "fall (accident)"
        );
    }

    #[test]
    fn test_clean_encounter_type_display_is_idempotent() {
        let once = clean_encounter_type_display("Fall (accident) (procedure)");
        assert_eq!(clean_encounter_type_display(&once), once);
    }

    #[test]
    fn test_clean_condition_display() {
        assert_eq!(
            clean_condition_display("Acute bronchitis (disorder)"),
            "Acute bronchitis"
        );
        assert_eq!(clean_condition_display("Chest pain (finding)"), "Chest pain");
        assert_eq!(
            clean_condition_display("Full-time employment (situation)"),
            "Full-time employment"
        );
        // Case is preserved
        assert_eq!(clean_condition_display("Fracture of bone"), "Fracture of bone");
    }

    #[test]
    fn test_clean_procedure_display() {
        assert_eq!(
            clean_procedure_display("Suture open wound (procedure)"),
            "suture open wound"
        );
        assert_eq!(clean_procedure_display("Bone immobilization"), "bone immobilization");
    }
}
