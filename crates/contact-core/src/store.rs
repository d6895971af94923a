#![forbid(unsafe_code)]

//! The field value store.
//!
//! [`FieldSet`] is an immutable snapshot of every field value plus the
//! errors currently shown. Each edit produces a new snapshot; the previous
//! one is left untouched, so hosts can compare revisions with `==`.
//!
//! Editing a field clears that field's error immediately. The new value is
//! not re-checked until the next submit.

use crate::errors::ErrorMap;
use crate::field::{FieldEdit, FieldKey, FieldValue, QueryType};

/// Complete form state: values and the errors on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub query_type: Option<QueryType>,
    pub message: String,
    pub consent: bool,
    pub errors: ErrorMap,
}

impl FieldSet {
    /// The initial, empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one edit, returning the next revision.
    ///
    /// The edited field takes the new value and loses its error entry,
    /// whether or not the value actually changed. No rule is evaluated.
    #[must_use]
    pub fn update(&self, edit: FieldEdit) -> FieldSet {
        let mut next = self.clone();
        next.errors.remove(edit.key());
        match edit {
            FieldEdit::FirstName(v) => next.first_name = v,
            FieldEdit::LastName(v) => next.last_name = v,
            FieldEdit::Email(v) => next.email = v,
            FieldEdit::QueryType(v) => next.query_type = v,
            FieldEdit::Message(v) => next.message = v,
            FieldEdit::Consent(v) => next.consent = v,
        }
        next
    }

    /// Same values, with `errors` replaced wholesale.
    #[must_use]
    pub fn with_errors(&self, errors: ErrorMap) -> FieldSet {
        FieldSet {
            errors,
            ..self.clone()
        }
    }

    /// Current value of `key`.
    #[must_use]
    pub fn value(&self, key: FieldKey) -> FieldValue<'_> {
        match key {
            FieldKey::FirstName => FieldValue::Text(&self.first_name),
            FieldKey::LastName => FieldValue::Text(&self.last_name),
            FieldKey::Email => FieldValue::Text(&self.email),
            FieldKey::QueryType => FieldValue::Choice(self.query_type),
            FieldKey::Message => FieldValue::Text(&self.message),
            FieldKey::Consent => FieldValue::Flag(self.consent),
        }
    }

    /// `true` when this is indistinguishable from the initial form.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}
