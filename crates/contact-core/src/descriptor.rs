#![forbid(unsafe_code)]

//! Static field metadata for hosts that render the form.

use crate::field::FieldKey;
use crate::input::InputLimits;

/// Kind of input control a field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    /// Mutually exclusive options, none preselected.
    Radio,
    TextArea,
    /// Unchecked by default.
    Checkbox,
}

/// How one field is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub label: &'static str,
    pub required: bool,
    pub input: InputKind,
    /// Browser autofill hint.
    pub autocomplete: Option<&'static str>,
    pub max_chars: Option<usize>,
}

impl FieldDescriptor {
    /// Descriptor for `key` using `limits` for text caps.
    #[must_use]
    pub fn for_key(key: FieldKey, limits: &InputLimits) -> Self {
        let (label, input, autocomplete) = match key {
            FieldKey::FirstName => ("First Name", InputKind::Text, Some("given-name")),
            FieldKey::LastName => ("Last Name", InputKind::Text, Some("family-name")),
            FieldKey::Email => ("Email Address", InputKind::Email, Some("email")),
            FieldKey::QueryType => ("Query Type", InputKind::Radio, None),
            FieldKey::Message => ("Message", InputKind::TextArea, None),
            FieldKey::Consent => (
                "I consent to being contacted by the team",
                InputKind::Checkbox,
                None,
            ),
        };
        Self {
            key,
            label,
            required: true,
            input,
            autocomplete,
            max_chars: limits.max_for(key),
        }
    }

    /// Every field, in form order.
    #[must_use]
    pub fn all(limits: &InputLimits) -> [FieldDescriptor; 6] {
        FieldKey::ALL.map(|key| Self::for_key(key, limits))
    }
}
