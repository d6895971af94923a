#![forbid(unsafe_code)]

//! Input boundary caps.
//!
//! Hosts cap how much text a field accepts before the value reaches the
//! store. The cap is separate from validation: a capped value can still be
//! rejected on submit.
//!
//! Caps are measured in UTF-16 code units, like an HTML `maxlength`
//! attribute, so a value accepted here is one a browser would also accept.
//! Truncation only cuts at grapheme cluster boundaries: a cluster that would
//! straddle the cap is dropped whole rather than split.

use unicode_segmentation::UnicodeSegmentation;

use crate::field::{FieldEdit, FieldKey};

/// Default cap for name and email inputs.
pub const DEFAULT_TEXT_MAX: usize = 40;
/// Default cap for the message textarea.
pub const DEFAULT_MESSAGE_MAX: usize = 1000;

/// Per-field caps, counted in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub name_max: usize,
    pub email_max: usize,
    pub message_max: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            name_max: DEFAULT_TEXT_MAX,
            email_max: DEFAULT_TEXT_MAX,
            message_max: DEFAULT_MESSAGE_MAX,
        }
    }
}

impl InputLimits {
    /// Cap for `key`, or `None` for choice and flag fields.
    #[must_use]
    pub const fn max_for(&self, key: FieldKey) -> Option<usize> {
        match key {
            FieldKey::FirstName | FieldKey::LastName => Some(self.name_max),
            FieldKey::Email => Some(self.email_max),
            FieldKey::Message => Some(self.message_max),
            FieldKey::QueryType | FieldKey::Consent => None,
        }
    }

    /// Truncate a text edit to its field's cap.
    ///
    /// Never splits a grapheme cluster. Non-text edits pass through.
    #[must_use]
    pub fn clamp(&self, edit: FieldEdit) -> FieldEdit {
        let Some(max) = self.max_for(edit.key()) else {
            return edit;
        };
        match edit {
            FieldEdit::FirstName(v) => FieldEdit::FirstName(truncate_utf16(v, max)),
            FieldEdit::LastName(v) => FieldEdit::LastName(truncate_utf16(v, max)),
            FieldEdit::Email(v) => FieldEdit::Email(truncate_utf16(v, max)),
            FieldEdit::Message(v) => FieldEdit::Message(truncate_utf16(v, max)),
            other => other,
        }
    }
}

fn truncate_utf16(mut value: String, max: usize) -> String {
    let mut units = 0;
    let cut = value.grapheme_indices(true).find_map(|(at, cluster)| {
        units += cluster.encode_utf16().count();
        (units > max).then_some(at)
    });
    if let Some(cut) = cut {
        value.truncate(cut);
    }
    value
}
