#![forbid(unsafe_code)]

//! Form configuration.
//!
//! Defaults match the stock form. Each setting can be overridden from the
//! environment:
//!
//! | Variable | Setting | Default |
//! |---|---|---|
//! | `CONTACT_NOTICE_DELAY_MS` | notice auto-hide delay | 5000 |
//! | `CONTACT_NAME_MAX_CHARS` | first/last name cap | 40 |
//! | `CONTACT_EMAIL_MAX_CHARS` | email cap | 40 |
//! | `CONTACT_MESSAGE_MAX_CHARS` | message cap | 1000 |
//!
//! Unparseable or zero values keep the default and are reported as
//! [`ConfigError`]s.

use std::env;
use std::fmt;
use std::time::Duration;

use contact_core::InputLimits;

use crate::notice::{DEFAULT_NOTICE_DELAY, Notice};

pub const ENV_NOTICE_DELAY_MS: &str = "CONTACT_NOTICE_DELAY_MS";
pub const ENV_NAME_MAX_CHARS: &str = "CONTACT_NAME_MAX_CHARS";
pub const ENV_EMAIL_MAX_CHARS: &str = "CONTACT_EMAIL_MAX_CHARS";
pub const ENV_MESSAGE_MAX_CHARS: &str = "CONTACT_MESSAGE_MAX_CHARS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub notice_delay: Duration,
    pub limits: InputLimits,
    pub notice: Notice,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            notice_delay: DEFAULT_NOTICE_DELAY,
            limits: InputLimits::default(),
            notice: Notice::default(),
        }
    }
}

/// Config plus any problems found while reading it.
#[derive(Debug, Clone)]
pub struct FormConfigParse {
    pub config: FormConfig,
    pub errors: Vec<ConfigError>,
}

/// A rejected setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl FormConfig {
    #[must_use]
    pub fn from_env() -> FormConfig {
        let parsed = Self::from_env_with_diagnostics();
        for err in &parsed.errors {
            tracing::warn!(%err, "ignoring invalid form setting");
        }
        parsed.config
    }

    #[must_use]
    pub fn from_env_with_diagnostics() -> FormConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Check constraints and return every violation.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.notice_delay.is_zero() {
            errors.push(ConfigError::new(
                "notice_delay",
                "0",
                "notice delay must be positive",
            ));
        }
        validate_positive("name_max", self.limits.name_max, &mut errors);
        validate_positive("email_max", self.limits.email_max, &mut errors);
        validate_positive("message_max", self.limits.message_max, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Read settings through `get` instead of the process environment.
pub fn from_env_with<F>(mut get: F) -> FormConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = FormConfig::default();
    let mut errors = Vec::new();

    if let Some(ms) = parse_positive(ENV_NOTICE_DELAY_MS, &mut get, &mut errors) {
        config.notice_delay = Duration::from_millis(ms as u64);
    }
    if let Some(n) = parse_positive(ENV_NAME_MAX_CHARS, &mut get, &mut errors) {
        config.limits.name_max = n;
    }
    if let Some(n) = parse_positive(ENV_EMAIL_MAX_CHARS, &mut get, &mut errors) {
        config.limits.email_max = n;
    }
    if let Some(n) = parse_positive(ENV_MESSAGE_MAX_CHARS, &mut get, &mut errors) {
        config.limits.message_max = n;
    }

    FormConfigParse { config, errors }
}

fn parse_positive<F>(key: &'static str, get: &mut F, errors: &mut Vec<ConfigError>) -> Option<usize>
where
    F: FnMut(&str) -> Option<String>,
{
    let raw = get(key)?;
    match raw.trim().parse::<usize>() {
        Ok(0) => {
            errors.push(ConfigError::new(key, raw, "must be greater than zero"));
            None
        }
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(ConfigError::new(key, raw, "expected a whole number"));
            None
        }
    }
}

fn validate_positive(field: &'static str, value: usize, errors: &mut Vec<ConfigError>) {
    if value == 0 {
        errors.push(ConfigError::new(field, "0", "must be greater than zero"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(pairs: &[(&str, &str)]) -> FormConfigParse {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_env_gives_defaults() {
        let parsed = parse(&[]);
        assert_eq!(parsed.config, FormConfig::default());
        assert!(parsed.errors.is_empty());
        assert!(parsed.config.validate().is_ok());
    }

    #[test]
    fn overrides_apply() {
        let parsed = parse(&[
            (ENV_NOTICE_DELAY_MS, "1500"),
            (ENV_NAME_MAX_CHARS, " 20 "),
            (ENV_EMAIL_MAX_CHARS, "80"),
            (ENV_MESSAGE_MAX_CHARS, "500"),
        ]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config.notice_delay, Duration::from_millis(1500));
        assert_eq!(parsed.config.limits.name_max, 20);
        assert_eq!(parsed.config.limits.email_max, 80);
        assert_eq!(parsed.config.limits.message_max, 500);
    }

    #[test]
    fn bad_values_keep_defaults_and_report() {
        let parsed = parse(&[(ENV_NOTICE_DELAY_MS, "soon"), (ENV_NAME_MAX_CHARS, "0")]);
        assert_eq!(parsed.config.notice_delay, DEFAULT_NOTICE_DELAY);
        assert_eq!(parsed.config.limits.name_max, 40);
        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].field, ENV_NOTICE_DELAY_MS);
        assert_eq!(
            parsed.errors[0].to_string(),
            "CONTACT_NOTICE_DELAY_MS=soon (expected a whole number)"
        );
        assert_eq!(parsed.errors[1].message, "must be greater than zero");
    }

    #[test]
    fn validate_flags_zero_settings() {
        let config = FormConfig {
            notice_delay: Duration::ZERO,
            limits: InputLimits {
                name_max: 0,
                email_max: 40,
                message_max: 0,
            },
            notice: Notice::default(),
        };
        let errors = config.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["notice_delay", "name_max", "message_max"]);
    }
}
