//! ConfigField trait implementations for config sections.
//!
//! Every setter validates its input, so a [`ConfigOptions`](super::ConfigOptions)
//! edited key by key always holds values a bar can be started with.

use super::field::{
    format_optional, format_tristate, parse_bool, parse_in_range, parse_optional, parse_tristate,
    ConfigField, FieldError,
};
use super::{BehaviourConfig, StyleConfig, WidgetsConfig, NONE_STYLE};
use crate::styles;

fn bool_value(key: &str, value: &str) -> Result<bool, FieldError> {
    parse_bool(value).map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: "true or false".into(),
    })
}

/// Parse an optional style name, checking it exists in its catalog.
fn style_name(key: &str, value: &str, names: &[&str]) -> Result<Option<String>, FieldError> {
    match parse_optional(value) {
        None => Ok(None),
        Some(name) if name == NONE_STYLE || names.contains(&name.as_str()) => Ok(Some(name)),
        Some(_) => Err(FieldError::InvalidValue {
            key: key.into(),
            expected: format!("{NONE_STYLE} or one of: {}", names.join(", ")),
        }),
    }
}

fn format_calibrate(value: Option<f64>) -> String {
    value.map_or_else(|| "auto".to_string(), |v| v.to_string())
}

impl ConfigField for StyleConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "theme" => Some(self.theme.clone()),
            "spinner" => Some(format_optional(&self.spinner)),
            "bar" => Some(format_optional(&self.bar)),
            "unknown" => Some(format_optional(&self.unknown)),
            "length" => Some(self.length.to_string()),
            "spinner_length" => Some(self.spinner_length.to_string()),
            "max_cols" => Some(self.max_cols.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "theme" => {
                let theme = styles::theme(value.trim()).ok_or_else(|| FieldError::InvalidValue {
                    key: key.into(),
                    expected: format!(
                        "one of: {}",
                        styles::theme_names().collect::<Vec<_>>().join(", ")
                    ),
                })?;
                self.theme = theme.name.to_string();
            }
            "spinner" => self.spinner = style_name(key, value, styles::SPINNER_NAMES)?,
            "bar" => self.bar = style_name(key, value, styles::BAR_NAMES)?,
            "unknown" => self.unknown = style_name(key, value, styles::SPINNER_NAMES)?,
            "length" => self.length = parse_in_range(key, value, 3..=1000)?,
            "spinner_length" => self.spinner_length = parse_in_range(key, value, 0..=1000)?,
            "max_cols" => self.max_cols = parse_in_range(key, value, 3..=1000)?,
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "theme",
            "spinner",
            "bar",
            "unknown",
            "length",
            "spinner_length",
            "max_cols",
        ]
    }

    fn section_name() -> &'static str {
        "style"
    }
}

impl ConfigField for WidgetsConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "title" => Some(format_optional(&self.title)),
            "title_length" => Some(self.title_length.to_string()),
            "monitor" => Some(self.monitor.to_string()),
            "elapsed" => Some(self.elapsed.to_string()),
            "stats" => Some(self.stats.to_string()),
            "receipt" => Some(self.receipt.to_string()),
            "receipt_text" => Some(self.receipt_text.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "title" => self.title = parse_optional(value),
            "title_length" => self.title_length = parse_in_range(key, value, 0..=1000)?,
            "monitor" => self.monitor = bool_value(key, value)?,
            "elapsed" => self.elapsed = bool_value(key, value)?,
            "stats" => self.stats = bool_value(key, value)?,
            "receipt" => self.receipt = bool_value(key, value)?,
            "receipt_text" => self.receipt_text = bool_value(key, value)?,
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "title",
            "title_length",
            "monitor",
            "elapsed",
            "stats",
            "receipt",
            "receipt_text",
        ]
    }

    fn section_name() -> &'static str {
        "widgets"
    }
}

impl ConfigField for BehaviourConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "force_tty" => Some(format_tristate(self.force_tty)),
            "disable" => Some(self.disable.to_string()),
            "manual" => Some(self.manual.to_string()),
            "enrich_print" => Some(self.enrich_print.to_string()),
            "refresh_secs" => Some(self.refresh_secs.to_string()),
            "calibrate" => Some(format_calibrate(self.calibrate)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "force_tty" => self.force_tty = parse_tristate(key, value)?,
            "disable" => self.disable = bool_value(key, value)?,
            "manual" => self.manual = bool_value(key, value)?,
            "enrich_print" => self.enrich_print = bool_value(key, value)?,
            "refresh_secs" => self.refresh_secs = parse_in_range(key, value, 0.0..=60.0)?,
            "calibrate" => {
                self.calibrate = if value.trim().eq_ignore_ascii_case("auto") {
                    None
                } else {
                    Some(parse_in_range(key, value, 0.000_001..=1e12)?)
                };
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "force_tty",
            "disable",
            "manual",
            "enrich_print",
            "refresh_secs",
            "calibrate",
        ]
    }

    fn section_name() -> &'static str {
        "behaviour"
    }
}
