#![forbid(unsafe_code)]

//! Per-field error storage.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::field::FieldKey;

/// A validation failure for one field: the only error kind the form knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: FieldKey,
    pub message: String,
}

impl FieldValidationError {
    #[must_use]
    pub fn new(field: FieldKey, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldValidationError {}

/// Sparse mapping from field to its single error message.
///
/// A field with no entry has no error shown. Entries are kept in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ErrorMap {
    entries: BTreeMap<FieldKey, String>,
}

impl ErrorMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for `field`, returning the one it replaced.
    pub fn insert(&mut self, field: FieldKey, message: impl Into<String>) -> Option<String> {
        self.entries.insert(field, message.into())
    }

    /// Clear the error for `field`.
    pub fn remove(&mut self, field: FieldKey) -> Option<String> {
        self.entries.remove(&field)
    }

    #[must_use]
    pub fn get(&self, field: FieldKey) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: FieldKey) -> bool {
        self.entries.contains_key(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.entries.keys().copied()
    }

    /// Convert into one [`FieldValidationError`] per entry, in form order.
    #[must_use]
    pub fn into_errors(self) -> Vec<FieldValidationError> {
        self.entries
            .into_iter()
            .map(|(field, message)| FieldValidationError { field, message })
            .collect()
    }
}

impl FromIterator<(FieldKey, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(FieldKey, &'a str)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (FieldKey, &'a str)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}

impl IntoIterator for ErrorMap {
    type Item = (FieldKey, String);
    type IntoIter = btree_map::IntoIter<FieldKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
