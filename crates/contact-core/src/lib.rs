#![forbid(unsafe_code)]

//! Contact form core.
//!
//! Pure state and rules for a six-field contact form: first name, last
//! name, email, query type, message, and consent.
//!
//! # Key Components
//!
//! - [`FieldSet`] - immutable form snapshot; [`FieldSet::update`] writes one
//!   field and clears its error
//! - [`validation`] - per-field rule chains and [`validation::validate`]
//! - [`binding`] - per-field error lookup for rendering
//! - [`InputLimits`] - character caps applied at the input boundary
//! - [`FieldDescriptor`] - labels, input kinds, autofill hints
//!
//! Nothing here performs I/O or spawns threads. Event handling and the
//! confirmation notice live in `contact-runtime`.

pub mod binding;
pub mod descriptor;
pub mod errors;
pub mod field;
pub mod input;
pub mod store;
pub mod validation;

pub use binding::{FieldErrorView, error_for};
pub use descriptor::{FieldDescriptor, InputKind};
pub use errors::{ErrorMap, FieldValidationError};
pub use field::{
    FieldEdit, FieldKey, FieldValue, ParseFieldKeyError, ParseQueryTypeError, QueryType,
};
pub use input::InputLimits;
pub use store::FieldSet;
pub use validation::{ValidatedContact, ValidationResult};
