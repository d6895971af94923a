#![forbid(unsafe_code)]

//! Rule primitives and the built-in validators the contact schema uses.

use std::fmt;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Value was empty.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Value was shorter than required.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Value did not look like an email address.
pub const ERROR_CODE_EMAIL: &str = "email";
/// No option was chosen.
pub const ERROR_CODE_CHOICE: &str = "choice";
/// Flag was not set to the one accepted value.
pub const ERROR_CODE_LITERAL: &str = "literal";

// ---------------------------------------------------------------------------
// RuleError / FieldCheck
// ---------------------------------------------------------------------------

/// A failed rule: stable code plus the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    pub code: &'static str,
    pub message: String,
}

impl RuleError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuleError {}

/// Outcome of checking one value against one rule chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldCheck {
    #[default]
    Valid,
    Invalid(RuleError),
}

impl FieldCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn error(&self) -> Option<&RuleError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Keep the first failure; only consult `next` when this one passed.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> FieldCheck) -> FieldCheck {
        match self {
            Self::Valid => next(),
            Self::Invalid(_) => self,
        }
    }

    fn fail(code: &'static str, message: &str) -> Self {
        Self::Invalid(RuleError::new(code, message))
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// Checks values of type `T`.
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> FieldCheck;
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Fails on the empty string.
///
/// Whitespace counts as content unless `trim` is set: `" "` is a present
/// value, it just may fail a later length rule.
#[derive(Debug, Clone)]
pub struct Required {
    pub trim: bool,
    pub message: String,
}

impl Default for Required {
    fn default() -> Self {
        Self {
            trim: false,
            message: "This field is required".to_string(),
        }
    }
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat whitespace-only values as empty.
    #[must_use]
    pub fn trim_whitespace(mut self) -> Self {
        self.trim = true;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> FieldCheck {
        let empty = if self.trim {
            value.trim().is_empty()
        } else {
            value.is_empty()
        };
        if empty {
            FieldCheck::fail(ERROR_CODE_REQUIRED, &self.message)
        } else {
            FieldCheck::Valid
        }
    }
}

/// Fails when the value is shorter than `min`.
///
/// Length is counted in UTF-16 code units, the unit browsers and JavaScript
/// string length use. A character outside the Basic Multilingual Plane
/// (most emoji, mathematical letters) counts as two.
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min: usize,
    pub message: String,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: format!("Must contain at least {min} characters"),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> FieldCheck {
        if value.encode_utf16().count() < self.min {
            FieldCheck::fail(ERROR_CODE_MIN_LENGTH, &self.message)
        } else {
            FieldCheck::Valid
        }
    }
}

/// Fails unless the value has the shape `local@domain.tld`.
///
/// Accepted shape:
/// - local part of ASCII letters, digits, and `_ ' + - .`, not starting
///   with `.` and ending in a letter, digit, `_`, `+` or `-`
/// - no `..` anywhere
/// - exactly one `@`
/// - one or more domain labels (`[A-Za-z0-9][A-Za-z0-9-]*`) each followed
///   by `.`, then an alphabetic TLD of at least two letters
///
/// The empty string fails too; pair with [`Required`] so empty input reports
/// as missing rather than malformed.
#[derive(Debug, Clone)]
pub struct Email {
    pub message: String,
}

impl Default for Email {
    fn default() -> Self {
        Self {
            message: "Invalid email address".to_string(),
        }
    }
}

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Shape check without building an error.
    #[must_use]
    pub fn is_match(value: &str) -> bool {
        if value.starts_with('.') || value.contains("..") {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        local_part_ok(local) && domain_ok(domain)
    }
}

fn local_part_ok(local: &str) -> bool {
    let Some(last) = local.chars().last() else {
        return false;
    };
    let body_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.'));
    let last_ok = last.is_ascii_alphanumeric() || matches!(last, '_' | '+' | '-');
    body_ok && last_ok
}

fn domain_ok(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    if hosts.is_empty() {
        return false;
    }
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    let hosts_ok = hosts.iter().all(|label| {
        let mut chars = label.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphanumeric() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
            }
            _ => false,
        }
    });
    tld_ok && hosts_ok
}

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> FieldCheck {
        if Self::is_match(value) {
            FieldCheck::Valid
        } else {
            FieldCheck::fail(ERROR_CODE_EMAIL, &self.message)
        }
    }
}

/// Fails when no option is chosen.
#[derive(Debug, Clone)]
pub struct Selected {
    pub message: String,
}

impl Selected {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<T> Validator<Option<T>> for Selected {
    fn validate(&self, value: &Option<T>) -> FieldCheck {
        if value.is_some() {
            FieldCheck::Valid
        } else {
            FieldCheck::fail(ERROR_CODE_CHOICE, &self.message)
        }
    }
}

/// Fails unless the flag is `true`.
#[derive(Debug, Clone)]
pub struct MustBeTrue {
    pub message: String,
}

impl MustBeTrue {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator<bool> for MustBeTrue {
    fn validate(&self, value: &bool) -> FieldCheck {
        if *value {
            FieldCheck::Valid
        } else {
            FieldCheck::fail(ERROR_CODE_LITERAL, &self.message)
        }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Runs `first`, then `second` only if `first` passed.
///
/// At most one message surfaces per value: the first failing rule's.
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Then<A, B> {
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<T: ?Sized, A, B> Validator<T> for Then<A, B>
where
    A: Validator<T>,
    B: Validator<T>,
{
    fn validate(&self, value: &T) -> FieldCheck {
        self.first
            .validate(value)
            .and_then(|| self.second.validate(value))
    }
}
