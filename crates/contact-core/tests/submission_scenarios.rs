#![forbid(unsafe_code)]

//! End-to-end checks of the store, engine, and binding together.

use contact_core::validation::{
    MSG_EMAIL_INVALID, MSG_FIRST_NAME_SHORT, MSG_REQUIRED, validate,
};
use contact_core::{
    FieldEdit, FieldErrorView, FieldKey, FieldSet, InputLimits, QueryType, ValidationResult,
    error_for,
};

fn filled() -> FieldSet {
    FieldSet::new()
        .update(FieldEdit::FirstName("Grace".into()))
        .update(FieldEdit::LastName("Hopper".into()))
        .update(FieldEdit::Email("grace@navy.mil".into()))
        .update(FieldEdit::QueryType(Some(QueryType::General)))
        .update(FieldEdit::Message("Found a moth.".into()))
        .update(FieldEdit::Consent(true))
}

fn submit(fields: &FieldSet) -> FieldSet {
    match validate(fields) {
        ValidationResult::Accepted(_) => FieldSet::new(),
        ValidationResult::Rejected(errors) => fields.with_errors(errors),
    }
}

#[test]
fn empty_first_name_is_required() {
    let fields = submit(&filled().update(FieldEdit::FirstName(String::new())));
    assert_eq!(error_for(&fields, FieldKey::FirstName), Some(MSG_REQUIRED));
}

#[test]
fn one_letter_first_name_is_too_short() {
    let fields = submit(&filled().update(FieldEdit::FirstName("A".into())));
    assert_eq!(
        error_for(&fields, FieldKey::FirstName),
        Some(MSG_FIRST_NAME_SHORT)
    );
}

#[test]
fn malformed_email_is_flagged() {
    let fields = submit(&filled().update(FieldEdit::Email("notanemail".into())));
    assert_eq!(error_for(&fields, FieldKey::Email), Some(MSG_EMAIL_INVALID));
    assert_eq!(fields.errors.len(), 1);
}

#[test]
fn rejected_submit_keeps_values() {
    let input = filled().update(FieldEdit::Email("nope".into()));
    let after = submit(&input);
    assert_eq!(after.first_name, "Grace");
    assert_eq!(after.email, "nope");
    assert_eq!(after.query_type, Some(QueryType::General));
}

#[test]
fn accepted_submit_resets_form() {
    assert!(submit(&filled()).is_pristine());
}

#[test]
fn correcting_flagged_fields_then_resubmitting() {
    let first = submit(
        &filled()
            .update(FieldEdit::FirstName("A".into()))
            .update(FieldEdit::Email("bad".into())),
    );
    assert_eq!(first.errors.len(), 2);

    // correct only the first name; email error stays until resubmit
    let edited = first.update(FieldEdit::FirstName("Ann".into()));
    assert!(!FieldErrorView::new(&edited, FieldKey::FirstName).is_visible());
    assert!(FieldErrorView::new(&edited, FieldKey::Email).is_visible());

    let second = submit(&edited);
    assert_eq!(second.errors.keys().collect::<Vec<_>>(), vec![FieldKey::Email]);
}

#[test]
fn resubmit_replaces_errors_wholesale() {
    let first = submit(&filled().update(FieldEdit::Message(String::new())));
    assert!(first.errors.contains(FieldKey::Message));

    // fix message directly in the struct, break consent; no edit clears anything
    let mut tampered = first.clone();
    tampered.message = "fixed".into();
    tampered.consent = false;
    let second = submit(&tampered);
    assert!(!second.errors.contains(FieldKey::Message));
    assert!(second.errors.contains(FieldKey::Consent));
}

#[test]
fn edited_field_shows_no_error_while_still_invalid() {
    let rejected = submit(&filled().update(FieldEdit::Email("bad".into())));
    let edited = rejected.update(FieldEdit::Email("still bad".into()));
    assert_eq!(error_for(&edited, FieldKey::Email), None);
    assert!(!validate(&edited).is_accepted());
}

#[test]
fn capped_input_can_still_fail_validation() {
    let limits = InputLimits::default();
    let edit = limits.clamp(FieldEdit::Email(format!("{}@example.com", "a".repeat(60))));
    let fields = filled().update(edit);
    assert_eq!(fields.email.chars().count(), 40);
    assert_eq!(
        validate(&fields).errors().and_then(|e| e.get(FieldKey::Email)),
        Some(MSG_EMAIL_INVALID)
    );
}

#[cfg(feature = "serde")]
#[test]
fn accepted_record_serializes_with_wire_names() {
    let ValidationResult::Accepted(record) = validate(&filled()) else {
        panic!("expected acceptance");
    };
    let json = serde_json::to_value(&record).expect("serialize");
    assert_eq!(json["firstName"], "Grace");
    assert_eq!(json["queryType"], "general");
    assert_eq!(json["consent"], true);
}
