#![forbid(unsafe_code)]

//! Contact form public facade crate.
//!
//! Re-exports the field store, validation rules, and runtime from the
//! internal crates, and offers a prelude for day-to-day usage.
//!
//! ```
//! use contact_form::prelude::*;
//!
//! let fields = FieldSet::new()
//!     .update(FieldEdit::FirstName("A".into()))
//!     .update(FieldEdit::Email("notanemail".into()));
//!
//! match validate(&fields) {
//!     ValidationResult::Rejected(errors) => {
//!         assert_eq!(
//!             errors.get(FieldKey::FirstName),
//!             Some("First name must contain at least 2 characters")
//!         );
//!     }
//!     ValidationResult::Accepted(_) => unreachable!(),
//! }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use contact_core::binding::{FieldErrorView, error_for};
pub use contact_core::descriptor::{FieldDescriptor, InputKind};
pub use contact_core::errors::{ErrorMap, FieldValidationError};
pub use contact_core::field::{
    FieldEdit, FieldKey, FieldValue, ParseFieldKeyError, ParseQueryTypeError, QueryType,
};
pub use contact_core::input::InputLimits;
pub use contact_core::store::FieldSet;
pub use contact_core::validation::{
    ContactSchema, ValidatedContact, ValidationResult, Validator, validate,
};

// --- Runtime re-exports ----------------------------------------------------

pub use contact_runtime::{
    Cmd, ConfigError, ContactForm, Dispatch, FormConfig, FormMsg, FormRuntime, Model, Notice,
    NoticeScheduler, NoticeToken, ProgramSimulator, SubmitPhase, SubmissionController,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for contact form hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more settings were rejected.
    Config(Vec<ConfigError>),
    /// A field name from the host did not match any field.
    UnknownField(ParseFieldKeyError),
    /// A query type value from the host was not recognized.
    UnknownQueryType(ParseQueryTypeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                write!(f, "invalid configuration")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
            Self::UnknownField(err) => write!(f, "{err}"),
            Self::UnknownQueryType(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseFieldKeyError> for Error {
    fn from(err: ParseFieldKeyError) -> Self {
        Self::UnknownField(err)
    }
}

impl From<ParseQueryTypeError> for Error {
    fn from(err: ParseQueryTypeError) -> Self {
        Self::UnknownQueryType(err)
    }
}

/// Standard result type for contact form APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Read configuration from the environment, failing on any bad setting.
///
/// Use [`FormConfig::from_env`] to fall back to defaults instead.
pub fn load_config() -> Result<FormConfig> {
    strict(FormConfig::from_env_with_diagnostics())
}

/// Like [`load_config`], reading settings through `get`.
pub fn load_config_with<F>(get: F) -> Result<FormConfig>
where
    F: FnMut(&str) -> Option<String>,
{
    strict(contact_runtime::config::from_env_with(get))
}

fn strict(parsed: contact_runtime::FormConfigParse) -> Result<FormConfig> {
    if !parsed.errors.is_empty() {
        return Err(Error::Config(parsed.errors));
    }
    parsed.config.validate().map_err(Error::Config)?;
    Ok(parsed.config)
}

/// Build an edit from host-supplied `(name, value)` strings.
///
/// Text fields take `value` verbatim. `queryType` accepts `general`,
/// `support`, or an empty string for "nothing selected". `consent` is set
/// by any non-empty value other than `false`.
pub fn edit_from_pair(name: &str, value: &str) -> Result<FieldEdit> {
    let key: FieldKey = name.parse()?;
    Ok(match key {
        FieldKey::FirstName => FieldEdit::FirstName(value.to_string()),
        FieldKey::LastName => FieldEdit::LastName(value.to_string()),
        FieldKey::Email => FieldEdit::Email(value.to_string()),
        FieldKey::QueryType if value.is_empty() => FieldEdit::QueryType(None),
        FieldKey::QueryType => FieldEdit::QueryType(Some(value.parse()?)),
        FieldKey::Message => FieldEdit::Message(value.to_string()),
        FieldKey::Consent => FieldEdit::Consent(!value.is_empty() && value != "false"),
    })
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cmd, ContactForm, Error, ErrorMap, FieldEdit, FieldErrorView, FieldKey, FieldSet,
        FormConfig, FormMsg, FormRuntime, Model, ProgramSimulator, QueryType, Result,
        ValidationResult, validate,
    };
}
