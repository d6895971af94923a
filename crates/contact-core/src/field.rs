#![forbid(unsafe_code)]

//! Field identity, typed edits, and read-side values.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// FieldKey
// ---------------------------------------------------------------------------

/// Identifier for one of the six contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldKey {
    FirstName,
    LastName,
    Email,
    QueryType,
    Message,
    Consent,
}

impl FieldKey {
    /// Every field, in form order.
    pub const ALL: [FieldKey; 6] = [
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Email,
        FieldKey::QueryType,
        FieldKey::Message,
        FieldKey::Consent,
    ];

    /// Stable field name used by hosts (`firstName`, `queryType`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::QueryType => "queryType",
            Self::Message => "message",
            Self::Consent => "consent",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldKeyError {
    pub input: String,
}

impl fmt::Display for ParseFieldKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form field: {:?}", self.input)
    }
}

impl std::error::Error for ParseFieldKeyError {}

impl FromStr for FieldKey {
    type Err = ParseFieldKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseFieldKeyError {
                input: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// QueryType
// ---------------------------------------------------------------------------

/// The two mutually exclusive query kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QueryType {
    General,
    Support,
}

impl QueryType {
    pub const ALL: [QueryType; 2] = [QueryType::General, QueryType::Support];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Support => "support",
        }
    }

    /// Human-readable option label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General Enquiry",
            Self::Support => "Support Request",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `general` nor `support`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQueryTypeError {
    pub input: String,
}

impl fmt::Display for ParseQueryTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown query type: {:?}", self.input)
    }
}

impl std::error::Error for ParseQueryTypeError {}

impl FromStr for QueryType {
    type Err = ParseQueryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "support" => Ok(Self::Support),
            _ => Err(ParseQueryTypeError {
                input: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldEdit
// ---------------------------------------------------------------------------

/// A single user edit: the field being written and its new value.
///
/// Each variant carries the value type of its field, so an edit can never
/// target the error slot or store a flag in a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    FirstName(String),
    LastName(String),
    Email(String),
    QueryType(Option<QueryType>),
    Message(String),
    Consent(bool),
}

impl FieldEdit {
    /// The field this edit writes.
    #[must_use]
    pub const fn key(&self) -> FieldKey {
        match self {
            Self::FirstName(_) => FieldKey::FirstName,
            Self::LastName(_) => FieldKey::LastName,
            Self::Email(_) => FieldKey::Email,
            Self::QueryType(_) => FieldKey::QueryType,
            Self::Message(_) => FieldKey::Message,
            Self::Consent(_) => FieldKey::Consent,
        }
    }

    /// The text carried by a text edit, if this is one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::FirstName(s) | Self::LastName(s) | Self::Email(s) | Self::Message(s) => Some(s),
            Self::QueryType(_) | Self::Consent(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// Read-side view of one field's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Choice(Option<QueryType>),
    Flag(bool),
}
