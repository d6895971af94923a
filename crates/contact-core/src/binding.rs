#![forbid(unsafe_code)]

//! Error presentation binding.
//!
//! Each field renders its own error directly beneath its input, so the
//! lookup is per field rather than a single form-level summary.

use crate::field::FieldKey;
use crate::store::FieldSet;

/// The error currently shown for `field`, if any.
#[must_use]
pub fn error_for(fields: &FieldSet, field: FieldKey) -> Option<&str> {
    fields.errors.get(field)
}

/// What a host needs to render one field's error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldErrorView<'a> {
    pub field: FieldKey,
    pub message: Option<&'a str>,
}

impl<'a> FieldErrorView<'a> {
    #[must_use]
    pub fn new(fields: &'a FieldSet, field: FieldKey) -> Self {
        Self {
            field,
            message: error_for(fields, field),
        }
    }

    /// One view per field, in form order.
    pub fn all(fields: &'a FieldSet) -> impl Iterator<Item = FieldErrorView<'a>> + 'a {
        FieldKey::ALL
            .into_iter()
            .map(move |field| Self::new(fields, field))
    }

    /// Whether the error slot should be shown at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// Text for the slot; empty when hidden.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.message.unwrap_or("")
    }

    /// Input should be styled as invalid (red border, `aria-invalid`).
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.is_visible()
    }
}
