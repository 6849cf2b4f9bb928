//! Configuration for progress bars.
//!
//! [`ConfigOptions`] is the raw, serialisable form: three sections of plain
//! values, loadable from `alive.toml` and editable key by key. It is
//! resolved into a [`Config`], where style names became factories, before a
//! bar is started.
//!
//! A process-wide [`ConfigHandler`] keeps the global defaults. Contexts are
//! created from it with per-bar overrides, so changing the globals never
//! affects bars already running.

pub mod field;
pub mod metadata;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::animations::{BarFactory, SpinnerFactory};
use crate::styles;
pub use field::{ConfigField, FieldError};

/// Default config file path.
pub const CONFIG_FILE: &str = "alive.toml";

/// Value of a style key that disables the widget.
pub const NONE_STYLE: &str = "none";

/// Look and size of the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Theme providing the styles not set explicitly.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Spinner name, or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spinner: Option<String>,
    /// Bar name, or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar: Option<String>,
    /// Spinner name for bars with an unknown total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown: Option<String>,
    /// Bar length in cells.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Spinner length in cells; 0 uses its natural length.
    #[serde(default)]
    pub spinner_length: usize,
    /// Maximum columns used when the terminal size is unknown.
    #[serde(default = "default_max_cols")]
    pub max_cols: usize,
}

fn default_theme() -> String {
    "smooth".to_string()
}

fn default_length() -> usize {
    40
}

fn default_max_cols() -> usize {
    80
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            spinner: None,
            bar: None,
            unknown: None,
            length: default_length(),
            spinner_length: 0,
            max_cols: default_max_cols(),
        }
    }
}

/// Which widgets are shown around the bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetsConfig {
    /// Title shown before the bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fixed title length in cells; 0 leaves it unbounded.
    #[serde(default)]
    pub title_length: usize,
    /// Show the count and percentage.
    #[serde(default = "default_true")]
    pub monitor: bool,
    /// Show the elapsed time.
    #[serde(default = "default_true")]
    pub elapsed: bool,
    /// Show the rate and eta.
    #[serde(default = "default_true")]
    pub stats: bool,
    /// Print a final receipt line.
    #[serde(default = "default_true")]
    pub receipt: bool,
    /// Keep the last text in the receipt.
    #[serde(default)]
    pub receipt_text: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            title: None,
            title_length: 0,
            monitor: true,
            elapsed: true,
            stats: true,
            receipt: true,
            receipt_text: false,
        }
    }
}

/// How the bar runs and interacts with the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Force the animated mode on or off; auto-detected when not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_tty: Option<bool>,
    /// Render nothing at all.
    #[serde(default)]
    pub disable: bool,
    /// Progress is set as a percentage instead of counted.
    #[serde(default)]
    pub manual: bool,
    /// Prefix captured prints with the current position.
    #[serde(default = "default_true")]
    pub enrich_print: bool,
    /// Fixed refresh interval in seconds; 0 calibrates by throughput.
    #[serde(default)]
    pub refresh_secs: f64,
    /// Throughput that reaches the maximum refresh rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibrate: Option<f64>,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            force_tty: None,
            disable: false,
            manual: false,
            enrich_print: true,
            refresh_secs: 0.0,
            calibrate: None,
        }
    }
}

/// All configuration options, as stored in `alive.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOptions {
    /// Look and size.
    #[serde(default)]
    pub style: StyleConfig,
    /// Widgets.
    #[serde(default)]
    pub widgets: WidgetsConfig,
    /// Behaviour.
    #[serde(default)]
    pub behaviour: BehaviourConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file TOML.
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Error serialising the config.
    #[error("Failed to serialise config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    /// A key or value was rejected.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// A style name is not in its catalog.
    #[error("Unknown {kind}: {name}")]
    UnknownStyle {
        /// Catalog searched.
        kind: &'static str,
        /// Name not found.
        name: String,
    },
}

impl ConfigOptions {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// `path` defaults to `alive.toml` in the current directory.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let options: ConfigOptions = toml::from_str(&contents)?;
        Ok(options)
    }

    /// Save configuration to a file, creating parent directories if needed.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get a config value by dot-notation path (e.g., "style.length").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "style" => self.style.get_field(key),
            "widgets" => self.widgets.get_field(key),
            "behaviour" => self.behaviour.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        let result = match section {
            "style" => self.style.set_field(key, value),
            "widgets" => self.widgets.set_field(key, value),
            "behaviour" => self.behaviour.set_field(key, value),
            _ => return Err(FieldError::UnknownKey(path.into())),
        };
        result.map_err(|e| match e {
            FieldError::UnknownKey(_) => FieldError::UnknownKey(path.into()),
            FieldError::InvalidValue { expected, .. } => FieldError::InvalidValue {
                key: path.into(),
                expected,
            },
            other => other,
        })
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["style", "widgets", "behaviour"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "style" => Some(StyleConfig::field_names()),
            "widgets" => Some(WidgetsConfig::field_names()),
            "behaviour" => Some(BehaviourConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        Self::section_names()
            .iter()
            .filter_map(|section| {
                Self::fields_for_section(section)
                    .map(|fields| fields.iter().map(move |f| format!("{section}.{f}")))
            })
            .flatten()
            .collect()
    }

    /// Reset a section to its default values.
    pub fn reset_section(&mut self, section: &str) -> Result<(), FieldError> {
        match section {
            "style" => self.style = StyleConfig::default(),
            "widgets" => self.widgets = WidgetsConfig::default(),
            "behaviour" => self.behaviour = BehaviourConfig::default(),
            _ => return Err(FieldError::UnknownKey(section.into())),
        }
        Ok(())
    }

    /// Reset a specific field to its default value.
    pub fn reset_field(&mut self, path: &str) -> Result<(), FieldError> {
        let default = Self::default().get_by_path(path)?;
        self.set_by_path(path, &default)
    }

    /// Resolve style names into factories.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let theme = styles::theme(&self.style.theme).ok_or_else(|| ConfigError::UnknownStyle {
            kind: "theme",
            name: self.style.theme.clone(),
        })?;

        let spinner_name = self.style.spinner.as_deref().unwrap_or(theme.spinner);
        let bar_name = self.style.bar.as_deref().unwrap_or(theme.bar);
        let unknown_name = self.style.unknown.as_deref().unwrap_or(theme.unknown);

        let spinner = lookup(spinner_name, "spinner", styles::spinner)?;
        let bar = lookup(bar_name, "bar", styles::bar)?;
        let unknown = lookup(unknown_name, "spinner", styles::spinner)?;

        let behaviour = &self.behaviour;
        let widgets = &self.widgets;
        Ok(Config {
            title: widgets.title.clone(),
            length: self.style.length,
            max_cols: self.style.max_cols,
            spinner,
            bar,
            unknown,
            spinner_length: self.style.spinner_length,
            title_length: widgets.title_length,
            force_tty: behaviour.force_tty,
            disable: behaviour.disable,
            manual: behaviour.manual,
            enrich_print: behaviour.enrich_print,
            receipt: widgets.receipt,
            receipt_text: widgets.receipt_text,
            monitor: widgets.monitor,
            elapsed: widgets.elapsed,
            stats: widgets.stats,
            refresh_secs: behaviour.refresh_secs,
            calibrate: behaviour.calibrate,
        })
    }
}

fn lookup<T>(
    name: &str,
    kind: &'static str,
    find: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    if name == NONE_STYLE {
        return Ok(None);
    }
    find(name).map(Some).ok_or_else(|| ConfigError::UnknownStyle {
        kind,
        name: name.to_string(),
    })
}

/// A resolved configuration, ready to start bars with.
#[derive(Debug, Clone)]
pub struct Config {
    /// Title shown before the bar.
    pub title: Option<String>,
    /// Bar length in cells.
    pub length: usize,
    /// Maximum columns when the terminal size is unknown.
    pub max_cols: usize,
    /// Spinner, if shown.
    pub spinner: Option<SpinnerFactory>,
    /// Bar, if shown.
    pub bar: Option<BarFactory>,
    /// Spinner played inside the bar when the total is unknown.
    pub unknown: Option<SpinnerFactory>,
    /// Spinner length in cells; 0 uses its natural length.
    pub spinner_length: usize,
    /// Fixed title length; 0 leaves it unbounded.
    pub title_length: usize,
    /// Animated mode override.
    pub force_tty: Option<bool>,
    /// Render nothing.
    pub disable: bool,
    /// Progress is set as a percentage.
    pub manual: bool,
    /// Prefix captured prints with the current position.
    pub enrich_print: bool,
    /// Print a final receipt.
    pub receipt: bool,
    /// Keep the last text in the receipt.
    pub receipt_text: bool,
    /// Show the count and percentage.
    pub monitor: bool,
    /// Show the elapsed time.
    pub elapsed: bool,
    /// Show the rate and eta.
    pub stats: bool,
    /// Fixed refresh interval; 0 calibrates.
    pub refresh_secs: f64,
    /// Throughput reaching the maximum refresh rate.
    pub calibrate: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        let options = ConfigOptions::default();
        let theme = styles::THEMES[0];
        Self {
            title: None,
            length: options.style.length,
            max_cols: options.style.max_cols,
            spinner: styles::spinner(theme.spinner),
            bar: styles::bar(theme.bar),
            unknown: styles::spinner(theme.unknown),
            spinner_length: options.style.spinner_length,
            title_length: options.widgets.title_length,
            force_tty: options.behaviour.force_tty,
            disable: options.behaviour.disable,
            manual: options.behaviour.manual,
            enrich_print: options.behaviour.enrich_print,
            receipt: options.widgets.receipt,
            receipt_text: options.widgets.receipt_text,
            monitor: options.widgets.monitor,
            elapsed: options.widgets.elapsed,
            stats: options.widgets.stats,
            refresh_secs: options.behaviour.refresh_secs,
            calibrate: options.behaviour.calibrate,
        }
    }
}

/// Holder of the global default options.
#[derive(Debug, Default)]
pub struct ConfigHandler {
    options: RwLock<ConfigOptions>,
}

impl ConfigHandler {
    /// A handler with the given defaults.
    pub fn new(options: ConfigOptions) -> Self {
        Self {
            options: RwLock::new(options),
        }
    }

    /// Change one global option.
    pub fn set_global(&self, path: &str, value: &str) -> Result<(), FieldError> {
        self.options.write().set_by_path(path, value)
    }

    /// Replace all global options.
    pub fn set_options(&self, options: ConfigOptions) {
        *self.options.write() = options;
    }

    /// Restore the built-in defaults.
    pub fn reset(&self) {
        *self.options.write() = ConfigOptions::default();
    }

    /// A copy of the global options.
    pub fn options(&self) -> ConfigOptions {
        self.options.read().clone()
    }

    /// Resolve the global options with `overrides` applied on top.
    ///
    /// Overrides are `(path, value)` pairs validated like [`set_global`](Self::set_global);
    /// the globals are left untouched.
    pub fn create_context(&self, overrides: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let mut options = self.options();
        for (path, value) in overrides {
            options.set_by_path(path, value)?;
        }
        options.resolve()
    }
}

static HANDLER: LazyLock<ConfigHandler> = LazyLock::new(ConfigHandler::default);

/// The process-wide config handler.
pub fn config_handler() -> &'static ConfigHandler {
    &HANDLER
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_style_config_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.theme, "smooth");
        assert_eq!(style.length, 40);
        assert_eq!(style.max_cols, 80);
        assert_eq!(style.spinner_length, 0);
        assert!(style.spinner.is_none());
    }

    #[test]
    fn test_widgets_and_behaviour_defaults() {
        let widgets = WidgetsConfig::default();
        assert!(widgets.monitor && widgets.elapsed && widgets.stats && widgets.receipt);
        assert!(!widgets.receipt_text);

        let behaviour = BehaviourConfig::default();
        assert_eq!(behaviour.force_tty, None);
        assert!(behaviour.enrich_print);
        assert!(!behaviour.manual);
        assert_eq!(behaviour.refresh_secs, 0.0);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let options = ConfigOptions::load(Some(&temp.path().join("missing.toml"))).unwrap();
        assert_eq!(options, ConfigOptions::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/alive.toml");

        let mut options = ConfigOptions::default();
        options.set_by_path("style.length", "25").unwrap();
        options.set_by_path("style.spinner", "dots").unwrap();
        options.set_by_path("behaviour.force_tty", "true").unwrap();
        options.save(Some(&path)).unwrap();

        let loaded = ConfigOptions::load(Some(&path)).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_load_partial_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("alive.toml");
        fs::write(&path, "[style]\nlength = 12\n\n[widgets]\nstats = false\n").unwrap();

        let options = ConfigOptions::load(Some(&path)).unwrap();
        assert_eq!(options.style.length, 12);
        assert_eq!(options.style.max_cols, 80);
        assert!(!options.widgets.stats);
        assert!(options.widgets.monitor);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("alive.toml");
        fs::write(&path, "[style\nlength = ").unwrap();
        assert!(matches!(
            ConfigOptions::load(Some(&path)),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_get_by_path() {
        let options = ConfigOptions::default();
        assert_eq!(options.get_by_path("style.length").unwrap(), "40");
        assert_eq!(options.get_by_path("style.spinner").unwrap(), "(not set)");
        assert_eq!(options.get_by_path("behaviour.force_tty").unwrap(), "auto");
        assert_eq!(options.get_by_path("behaviour.calibrate").unwrap(), "auto");
        assert!(matches!(
            options.get_by_path("style.nope"),
            Err(FieldError::UnknownKey(_))
        ));
        assert!(matches!(
            options.get_by_path("nope"),
            Err(FieldError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_set_by_path_unknown_key_reports_full_path() {
        let mut options = ConfigOptions::default();
        let err = options.set_by_path("style.nope", "1").unwrap_err();
        assert_eq!(err.to_string(), "Unknown config key: style.nope");
        let err = options.set_by_path("nope.length", "1").unwrap_err();
        assert_eq!(err.to_string(), "Unknown config key: nope.length");
        let err = options.set_by_path("style.length", "2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for style.length: expected a number between 3 and 1000"
        );
    }

    #[test]
    fn test_all_keys() {
        let keys = ConfigOptions::all_keys();
        assert!(keys.contains(&"style.length".to_string()));
        assert!(keys.contains(&"widgets.receipt_text".to_string()));
        assert!(keys.contains(&"behaviour.calibrate".to_string()));
        for key in &keys {
            assert!(metadata::get_metadata(key).is_some(), "undocumented key {key}");
        }
    }

    #[test]
    fn test_reset_section_and_field() {
        let mut options = ConfigOptions::default();
        options.set_by_path("style.length", "10").unwrap();
        options.set_by_path("style.max_cols", "100").unwrap();
        options.reset_field("style.length").unwrap();
        assert_eq!(options.style.length, 40);
        assert_eq!(options.style.max_cols, 100);

        options.reset_section("style").unwrap();
        assert_eq!(options.style, StyleConfig::default());
        assert!(options.reset_section("nope").is_err());
    }

    #[test]
    fn test_reset_optional_field() {
        let mut options = ConfigOptions::default();
        options.set_by_path("style.bar", "classic").unwrap();
        options.set_by_path("behaviour.force_tty", "false").unwrap();
        options.reset_field("style.bar").unwrap();
        options.reset_field("behaviour.force_tty").unwrap();
        assert_eq!(options.style.bar, None);
        assert_eq!(options.behaviour.force_tty, None);
    }

    #[test]
    fn test_resolve_uses_theme() {
        let config = ConfigOptions::default().resolve().unwrap();
        assert!(config.spinner.is_some());
        assert!(config.bar.is_some());
        assert!(config.unknown.is_some());
        assert_eq!(config.length, 40);
    }

    #[test]
    fn test_default_config_matches_resolved_defaults() {
        let resolved = ConfigOptions::default().resolve().unwrap();
        let default = Config::default();
        assert_eq!(default.length, resolved.length);
        assert_eq!(
            default.spinner.map(|s| s.natural()),
            resolved.spinner.map(|s| s.natural())
        );
        assert_eq!(default.bar, resolved.bar);
    }

    #[test]
    fn test_resolve_explicit_styles_override_theme() {
        let mut options = ConfigOptions::default();
        options.set_by_path("style.theme", "ascii").unwrap();
        options.set_by_path("style.bar", "classic").unwrap();
        let config = options.resolve().unwrap();
        let bar = config.bar.unwrap().compile(4).unwrap();
        assert_eq!(bar.render(0.5, false).to_string(), "[==> ]");
    }

    #[test]
    fn test_resolve_none_disables_widgets() {
        let mut options = ConfigOptions::default();
        options.set_by_path("style.spinner", "none").unwrap();
        options.set_by_path("style.bar", "none").unwrap();
        let config = options.resolve().unwrap();
        assert!(config.spinner.is_none());
        assert!(config.bar.is_none());
    }

    #[test]
    fn test_resolve_unknown_style_from_file() {
        let mut options = ConfigOptions::default();
        options.style.spinner = Some("nope".into());
        match options.resolve() {
            Err(ConfigError::UnknownStyle { kind, name }) => {
                assert_eq!(kind, "spinner");
                assert_eq!(name, "nope");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_handler_contexts_do_not_leak() {
        let handler = ConfigHandler::default();
        handler.set_global("style.length", "20").unwrap();

        let context = handler.create_context(&[("style.length", "30")]).unwrap();
        assert_eq!(context.length, 30);
        assert_eq!(handler.options().style.length, 20);
        assert_eq!(handler.create_context(&[]).unwrap().length, 20);

        handler.reset();
        assert_eq!(handler.options().style.length, 40);
    }

    #[test]
    fn test_handler_rejects_invalid_values() {
        let handler = ConfigHandler::default();
        assert!(handler.set_global("style.length", "2").is_err());
        assert!(handler.create_context(&[("style.spinner", "nope")]).is_err());
        assert_eq!(handler.options(), ConfigOptions::default());
    }

    #[test]
    fn test_global_handler_is_shared() {
        assert!(std::ptr::eq(config_handler(), config_handler()));
    }
}
