#![forbid(unsafe_code)]

//! The validation engine.
//!
//! Validation is a pure function from a [`FieldSet`](crate::FieldSet) to
//! either an accepted record or a sparse map of per-field messages. Every
//! field is checked on its own; within a field the rules run in order and
//! only the first failure is reported.
//!
//! ```rust
//! use contact_core::validation::{validate, ValidationResult};
//! use contact_core::{FieldEdit, FieldKey, FieldSet};
//!
//! let fields = FieldSet::new().update(FieldEdit::FirstName("A".into()));
//! let ValidationResult::Rejected(errors) = validate(&fields) else {
//!     unreachable!();
//! };
//! assert_eq!(
//!     errors.get(FieldKey::FirstName),
//!     Some("First name must contain at least 2 characters")
//! );
//! ```

mod schema;
pub mod validators;

pub use schema::{
    Consent, ContactSchema, MSG_CONSENT, MSG_EMAIL_INVALID, MSG_FIRST_NAME_SHORT,
    MSG_LAST_NAME_SHORT, MSG_QUERY_TYPE, MSG_REQUIRED, NAME_MIN_CHARS, ValidatedContact,
    ValidationResult, validate,
};
pub use validators::{
    ERROR_CODE_CHOICE, ERROR_CODE_EMAIL, ERROR_CODE_LITERAL, ERROR_CODE_MIN_LENGTH,
    ERROR_CODE_REQUIRED, Email, FieldCheck, MinLength, MustBeTrue, Required, RuleError, Selected,
    Then, Validator,
};
