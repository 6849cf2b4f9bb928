//! ConfigField trait for dynamic get/set access to config sections.
//!
//! Sections implement this trait so options can be read and written by
//! name, which powers `alive config get/set` and
//! [`ConfigHandler::set_global`](super::ConfigHandler::set_global).

use std::ops::RangeInclusive;
use std::str::FromStr;

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Get the section name for this config type.
    fn section_name() -> &'static str
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("style.length") // Ok(("style", "length"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Format an optional string value for display.
pub fn format_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "(not set)".to_string())
}

/// Parse an optional string; empty and `(not set)` clear it.
pub fn parse_optional(value: &str) -> Option<String> {
    match value.trim() {
        "" | "(not set)" => None,
        v => Some(v.to_string()),
    }
}

/// Parse a boolean from various string representations.
pub fn parse_bool(value: &str) -> Result<bool, FieldError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(FieldError::InvalidValue {
            key: "bool".into(),
            expected: "true/false, yes/no, 1/0, on/off".into(),
        }),
    }
}

/// Parse a boolean that may also be left to auto-detection.
pub fn parse_tristate(key: &str, value: &str) -> Result<Option<bool>, FieldError> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    parse_bool(value).map(Some).map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: "auto, true or false".into(),
    })
}

/// Format a value that may be left to auto-detection.
pub fn format_tristate(value: Option<bool>) -> String {
    value.map_or_else(|| "auto".to_string(), |v| v.to_string())
}

/// Parse a number that must fall inside `range`.
pub fn parse_in_range<T>(key: &str, value: &str, range: RangeInclusive<T>) -> Result<T, FieldError>
where
    T: FromStr + PartialOrd + std::fmt::Display,
{
    let invalid = || FieldError::InvalidValue {
        key: key.into(),
        expected: format!("a number between {} and {}", range.start(), range.end()),
    };
    let parsed: T = value.trim().parse().map_err(|_| invalid())?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_valid() {
        let (section, field) = split_path("style.length").unwrap();
        assert_eq!(section, "style");
        assert_eq!(field, "length");
    }

    #[test]
    fn test_split_path_invalid() {
        let result = split_path("invalid");
        assert!(matches!(result.unwrap_err(), FieldError::InvalidPath(_)));
    }

    #[test]
    fn test_format_and_parse_optional() {
        assert_eq!(format_optional(&Some("Downloading".into())), "Downloading");
        assert_eq!(format_optional(&None), "(not set)");
        assert_eq!(parse_optional("  "), None);
        assert_eq!(parse_optional("(not set)"), None);
        assert_eq!(parse_optional("title"), Some("title".into()));
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_parse_tristate() {
        assert_eq!(parse_tristate("force_tty", "auto").unwrap(), None);
        assert_eq!(parse_tristate("force_tty", "yes").unwrap(), Some(true));
        assert_eq!(parse_tristate("force_tty", "false").unwrap(), Some(false));
        let err = parse_tristate("force_tty", "sometimes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for force_tty: expected auto, true or false"
        );
        assert_eq!(format_tristate(None), "auto");
        assert_eq!(format_tristate(Some(true)), "true");
    }

    #[test]
    fn test_parse_in_range() {
        assert_eq!(parse_in_range("length", "40", 3..=1000).unwrap(), 40usize);
        assert_eq!(parse_in_range("length", " 3 ", 3..=1000).unwrap(), 3usize);
        let err = parse_in_range::<usize>("length", "2", 3..=1000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for length: expected a number between 3 and 1000"
        );
        assert!(parse_in_range::<usize>("length", "abc", 3..=1000).is_err());
        assert!(parse_in_range("refresh_secs", "0.5", 0.0..=60.0).is_ok());
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnknownKey("style.nope".into());
        assert_eq!(err.to_string(), "Unknown config key: style.nope");

        let err = FieldError::InvalidPath("invalid".into());
        assert_eq!(err.to_string(), "Invalid path format: invalid");
    }
}
