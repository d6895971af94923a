#![forbid(unsafe_code)]

//! The contact form schema: one rule chain per field.

use crate::errors::ErrorMap;
use crate::field::{FieldKey, QueryType};
use crate::store::FieldSet;

use super::validators::{
    Email, FieldCheck, MinLength, MustBeTrue, Required, Selected, Then, Validator,
};

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_FIRST_NAME_SHORT: &str = "First name must contain at least 2 characters";
pub const MSG_LAST_NAME_SHORT: &str = "Last name must contain at least 2 characters";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_QUERY_TYPE: &str = "Please select a query type";
pub const MSG_CONSENT: &str = "To submit this form, please consent to being contacted";

/// Minimum characters for first and last name.
pub const NAME_MIN_CHARS: usize = 2;

/// Proof that consent was given. Only constructible as granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consent(());

impl Consent {
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        true
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Consent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

/// A submission that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidatedContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub query_type: QueryType,
    pub message: String,
    pub consent: Consent,
}

/// Result of checking a whole [`FieldSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(ValidatedContact),
    /// Exactly the failing fields, one message each.
    Rejected(ErrorMap),
}

impl ValidationResult {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    #[must_use]
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(errors) => Some(errors),
        }
    }
}

type TextRule = Box<dyn Validator<str>>;

/// Per-field rule chains for the contact form.
pub struct ContactSchema {
    first_name: TextRule,
    last_name: TextRule,
    email: TextRule,
    query_type: Selected,
    message: TextRule,
    consent: MustBeTrue,
}

impl Default for ContactSchema {
    fn default() -> Self {
        Self {
            first_name: Box::new(Then::new(
                Required::new(),
                MinLength::new(NAME_MIN_CHARS).with_message(MSG_FIRST_NAME_SHORT),
            )),
            last_name: Box::new(Then::new(
                Required::new(),
                MinLength::new(NAME_MIN_CHARS).with_message(MSG_LAST_NAME_SHORT),
            )),
            email: Box::new(Then::new(
                Required::new(),
                Email::new().with_message(MSG_EMAIL_INVALID),
            )),
            query_type: Selected::new(MSG_QUERY_TYPE),
            message: Box::new(Required::new()),
            consent: MustBeTrue::new(MSG_CONSENT),
        }
    }
}

impl std::fmt::Debug for ContactSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactSchema").finish_non_exhaustive()
    }
}

impl ContactSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one field of `fields`.
    #[must_use]
    pub fn check(&self, fields: &FieldSet, key: FieldKey) -> FieldCheck {
        match key {
            FieldKey::FirstName => self.first_name.validate(&fields.first_name),
            FieldKey::LastName => self.last_name.validate(&fields.last_name),
            FieldKey::Email => self.email.validate(&fields.email),
            FieldKey::QueryType => self.query_type.validate(&fields.query_type),
            FieldKey::Message => self.message.validate(&fields.message),
            FieldKey::Consent => self.consent.validate(&fields.consent),
        }
    }

    /// Check every field independently and build the result.
    #[must_use]
    pub fn validate(&self, fields: &FieldSet) -> ValidationResult {
        let errors: ErrorMap = FieldKey::ALL
            .into_iter()
            .filter_map(|key| match self.check(fields, key) {
                FieldCheck::Valid => None,
                FieldCheck::Invalid(err) => Some((key, err.message)),
            })
            .collect();

        if !errors.is_empty() {
            return ValidationResult::Rejected(errors);
        }
        settle(fields)
    }
}

/// Build the accepted record from fields that passed every rule.
///
/// The query and consent rules already guarantee both values; if a caller's
/// fields slip through without them, each missing one is reported against
/// its own field.
fn settle(fields: &FieldSet) -> ValidationResult {
    match (fields.query_type, fields.consent) {
        (Some(query_type), true) => ValidationResult::Accepted(ValidatedContact {
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            email: fields.email.clone(),
            query_type,
            message: fields.message.clone(),
            consent: Consent(()),
        }),
        (query_type, consent) => {
            let mut errors = ErrorMap::new();
            if query_type.is_none() {
                errors.insert(FieldKey::QueryType, MSG_QUERY_TYPE);
            }
            if !consent {
                errors.insert(FieldKey::Consent, MSG_CONSENT);
            }
            ValidationResult::Rejected(errors)
        }
    }
}

/// Validate with the default schema.
#[must_use]
pub fn validate(fields: &FieldSet) -> ValidationResult {
    ContactSchema::default().validate(fields)
}
