#![forbid(unsafe_code)]

//! Submission controller.
//!
//! A submit runs validation synchronously and settles in one step:
//!
//! ```text
//! Editing --submit--> Submitting --validate--> Accepted --> Editing
//!                                          \-> Rejected --> Editing
//! ```
//!
//! `Accepted` and `Rejected` are never held; they only name which effect
//! the submit produced. On acceptance the form resets and the notice is
//! requested. On rejection every value is kept and the error map is
//! replaced wholesale by the fresh result.

use contact_core::validation::ContactSchema;
use contact_core::{ErrorMap, FieldKey, FieldSet, ValidatedContact, ValidationResult};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Editing,
    Submitting,
    Accepted,
    Rejected,
}

/// What one submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The form state to store next.
    pub fields: FieldSet,
    pub result: ValidationResult,
}

impl Submission {
    /// Whether the confirmation notice should be shown.
    pub fn show_notice(&self) -> bool {
        self.result.is_accepted()
    }

    pub fn accepted(&self) -> Option<&ValidatedContact> {
        match &self.result {
            ValidationResult::Accepted(data) => Some(data),
            ValidationResult::Rejected(_) => None,
        }
    }
}

/// Drives validate-then-settle for each submit.
#[derive(Debug, Default)]
pub struct SubmissionController {
    schema: ContactSchema,
    phase: SubmitPhase,
    history: Vec<SubmitPhase>,
    attempts: u64,
}

impl SubmissionController {
    pub fn new(schema: ContactSchema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Current phase; `Editing` whenever control is back with the user.
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Phases visited by the most recent submit, ending in `Editing`.
    pub fn history(&self) -> &[SubmitPhase] {
        &self.history
    }

    /// Number of submits so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn schema(&self) -> &ContactSchema {
        &self.schema
    }

    /// Validate `fields` and compute the next form state.
    pub fn submit(&mut self, fields: &FieldSet) -> Submission {
        self.attempts += 1;
        self.history.clear();
        self.history.push(self.phase);
        self.enter(SubmitPhase::Submitting);

        let result = self.schema.validate(fields);
        let next = match &result {
            ValidationResult::Accepted(data) => {
                self.enter(SubmitPhase::Accepted);
                tracing::info!(
                    attempt = self.attempts,
                    query_type = %data.query_type,
                    email = %data.email,
                    "validation successful"
                );
                FieldSet::default()
            }
            ValidationResult::Rejected(errors) => {
                self.enter(SubmitPhase::Rejected);
                tracing::debug!(
                    attempt = self.attempts,
                    failed = %field_list(errors),
                    "validation failed"
                );
                fields.with_errors(errors.clone())
            }
        };

        self.enter(SubmitPhase::Editing);
        Submission {
            fields: next,
            result,
        }
    }

    fn enter(&mut self, phase: SubmitPhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "submit phase");
        self.phase = phase;
        self.history.push(phase);
    }
}

fn field_list(errors: &ErrorMap) -> String {
    errors
        .keys()
        .map(FieldKey::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::validation::MSG_REQUIRED;
    use contact_core::{FieldEdit, QueryType};

    fn filled() -> FieldSet {
        FieldSet::new()
            .update(FieldEdit::FirstName("Ada".into()))
            .update(FieldEdit::LastName("Lovelace".into()))
            .update(FieldEdit::Email("ada@example.com".into()))
            .update(FieldEdit::QueryType(Some(QueryType::General)))
            .update(FieldEdit::Message("Hi".into()))
            .update(FieldEdit::Consent(true))
    }

    #[test]
    fn accepted_resets_and_requests_notice() {
        let mut controller = SubmissionController::default();
        let submission = controller.submit(&filled());
        assert!(submission.show_notice());
        assert!(submission.fields.is_pristine());
        assert_eq!(submission.accepted().map(|d| d.first_name.as_str()), Some("Ada"));
        assert_eq!(
            controller.history(),
            &[
                SubmitPhase::Editing,
                SubmitPhase::Submitting,
                SubmitPhase::Accepted,
                SubmitPhase::Editing
            ]
        );
    }

    #[test]
    fn rejected_keeps_values_and_replaces_errors() {
        let mut controller = SubmissionController::default();
        let stale: ErrorMap = [(FieldKey::Consent, "old")].into_iter().collect();
        let input = filled()
            .update(FieldEdit::Message(String::new()))
            .with_errors(stale);

        let submission = controller.submit(&input);
        assert!(!submission.show_notice());
        assert_eq!(submission.fields.first_name, "Ada");
        assert_eq!(submission.fields.message, "");
        assert_eq!(submission.fields.errors.len(), 1);
        assert_eq!(
            submission.fields.errors.get(FieldKey::Message),
            Some(MSG_REQUIRED)
        );
        assert_eq!(controller.history()[2], SubmitPhase::Rejected);
    }

    #[test]
    fn always_returns_to_editing() {
        let mut controller = SubmissionController::default();
        controller.submit(&FieldSet::new());
        assert_eq!(controller.phase(), SubmitPhase::Editing);
        controller.submit(&filled());
        assert_eq!(controller.phase(), SubmitPhase::Editing);
        assert_eq!(controller.attempts(), 2);
    }

    #[test]
    fn field_list_in_form_order() {
        let errors: ErrorMap = [(FieldKey::Message, "x"), (FieldKey::FirstName, "y")]
            .into_iter()
            .collect();
        assert_eq!(field_list(&errors), "firstName,message");
    }
}
