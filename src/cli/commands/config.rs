//! Config command implementations.
//!
//! This module implements the `alive config` subcommands for managing
//! `alive.toml` without editing TOML directly.

use std::path::{Path, PathBuf};

use crate::config::{
    metadata::{self, KeyMetadata},
    ConfigOptions, FieldError, CONFIG_FILE,
};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// A key or value was rejected.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be read or written.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// The editor could not be started.
    #[error("Failed to open editor: {0}")]
    EditorError(String),

    /// `$EDITOR` is not set.
    #[error("No EDITOR environment variable set")]
    NoEditor,

    /// The section does not exist.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(path: Option<&Path>, section_filter: Option<&str>) -> ConfigCommandResult {
    let options = ConfigOptions::load(path)?;

    println!("\x1b[1m=== alive config ===\x1b[0m");
    println!();

    let sections: Vec<&str> = match section_filter {
        Some(filter) if ConfigOptions::fields_for_section(filter).is_some() => vec![filter],
        Some(filter) => return Err(ConfigCommandError::UnknownSection(filter.into())),
        None => ConfigOptions::section_names().to_vec(),
    };

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = ConfigOptions::fields_for_section(section) {
            for field in fields {
                let key = format!("{section}.{field}");
                let value = options.get_by_path(&key).unwrap_or_else(|_| "?".into());
                println!("  {:<24} {}", field, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    let options = ConfigOptions::load(path)?;
    println!("{}", options.get_by_path(key)?);
    Ok(())
}

/// Set a config value.
pub fn config_set(path: Option<&Path>, key: &str, value: &str) -> ConfigCommandResult {
    let mut options = ConfigOptions::load(path)?;
    let old_value = options.get_by_path(key).ok();

    options.set_by_path(key, value)?;
    options.save(path)?;

    let new_value = options.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => {
            println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}");
        }
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset a key, a section or everything to defaults.
pub fn config_reset(path: Option<&Path>, key: Option<&str>) -> ConfigCommandResult {
    let mut options = ConfigOptions::load(path)?;

    match key {
        Some(k) if ConfigOptions::fields_for_section(k).is_some() => {
            options.reset_section(k)?;
            println!("\x1b[32m✓\x1b[0m Reset section '{k}' to defaults");
        }
        Some(k) if k.contains('.') => {
            options.reset_field(k)?;
            let new_value = options.get_by_path(k)?;
            println!("\x1b[32m✓\x1b[0m Reset {k} to default: {new_value}");
        }
        Some(k) => return Err(ConfigCommandError::UnknownSection(k.into())),
        None => {
            options = ConfigOptions::default();
            println!("\x1b[32m✓\x1b[0m Reset all config to defaults");
        }
    }

    options.save(path)?;
    Ok(())
}

/// Open the config file in `$EDITOR`, creating it first if needed.
pub fn config_edit(path: Option<&Path>) -> ConfigCommandResult {
    use std::process::Command;

    let editor = std::env::var("EDITOR").map_err(|_| ConfigCommandError::NoEditor)?;
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    if !config_path.exists() {
        ConfigOptions::default().save(Some(&config_path))?;
        println!(
            "\x1b[2mCreated default config at {}\x1b[0m",
            config_path.display()
        );
    }

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| ConfigCommandError::EditorError(e.to_string()))?;

    if !status.success() {
        eprintln!("\x1b[31mEditor exited with error\x1b[0m");
        return Ok(());
    }

    // Styles are checked too, an unknown spinner name parses fine
    match ConfigOptions::load(Some(&config_path)).map(|options| options.resolve()) {
        Ok(Ok(_)) => println!("\x1b[32m✓\x1b[0m Config saved and validated"),
        Ok(Err(e)) | Err(e) => eprintln!("\x1b[31mWarning:\x1b[0m Config may be invalid: {e}"),
    }
    Ok(())
}

/// Show documentation for config keys.
pub fn config_explain(path: Option<&Path>, key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => explain_key(path, k),
        None => explain_all(),
    }
}

fn explain_key(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    if let Some(meta) = metadata::get_metadata(key) {
        print_key_help(path, meta);
        return Ok(());
    }

    if ConfigOptions::fields_for_section(key).is_some() {
        println!("\x1b[1m{key}\x1b[0m section");
        println!();
        let prefix = format!("{key}.");
        for meta in metadata::keys_for_section(key) {
            let field = meta.key.strip_prefix(&prefix).unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", meta.description.lines().next().unwrap_or(""));
            println!();
        }
        return Ok(());
    }

    let matches = metadata::search_keys(key);
    if matches.is_empty() {
        eprintln!("\x1b[31mUnknown key:\x1b[0m {key}");
        eprintln!();
        suggest_similar_keys(key);
        return Err(FieldError::UnknownKey(key.into()).into());
    }

    println!("\x1b[33mDid you mean:\x1b[0m");
    for meta in matches.iter().take(5) {
        println!("  {}", meta.key);
    }
    Ok(())
}

fn first_sentence(description: &str) -> String {
    let sentence = description.split(". ").next().unwrap_or(description);
    let sentence = sentence.trim_end_matches('.');
    if sentence.chars().count() > 55 {
        let cut: String = sentence.chars().take(52).collect();
        format!("{cut}...")
    } else {
        sentence.to_string()
    }
}

fn explain_all() -> ConfigCommandResult {
    println!("\x1b[1m=== alive config keys ===\x1b[0m");
    println!();
    println!("Use \x1b[36malive config explain <key>\x1b[0m for details.");
    println!();

    for &section in ConfigOptions::section_names() {
        println!("\x1b[1m{section}\x1b[0m");
        for field in ConfigOptions::fields_for_section(section).unwrap_or(&[]) {
            println!("  \x1b[36m{field}\x1b[0m");
            if let Some(meta) = metadata::get_metadata(&format!("{section}.{field}")) {
                println!("    {}", first_sentence(meta.description));
            }
        }
        println!();
    }

    Ok(())
}

fn print_key_help(path: Option<&Path>, meta: &KeyMetadata) {
    let current = ConfigOptions::load(path)
        .ok()
        .and_then(|options| options.get_by_path(meta.key).ok());

    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m     {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m  {}", meta.default);
    match current {
        Some(curr) if curr == meta.default => {
            println!("  \x1b[2mCurrent:\x1b[0m  {curr} \x1b[2m(default)\x1b[0m");
        }
        Some(curr) => println!("  \x1b[2mCurrent:\x1b[0m  \x1b[33m{curr}\x1b[0m"),
        None => {}
    }
    println!();
    println!("  \x1b[2mExamples:\x1b[0m");
    for example in meta.examples {
        println!("    alive config set {} {}", meta.key, example);
    }
}

fn similar_keys(key: &str) -> Vec<&'static str> {
    let parts: Vec<&str> = key.split(['.', '_']).filter(|p| !p.is_empty()).collect();
    metadata::all_keys()
        .filter(|k| parts.iter().any(|p| k.contains(p)))
        .take(5)
        .collect()
}

fn suggest_similar_keys(key: &str) {
    let suggestions = similar_keys(key);
    if suggestions.is_empty() {
        eprintln!("Run \x1b[36malive config explain\x1b[0m to see all available keys.");
        return;
    }
    eprintln!("\x1b[33mSimilar keys:\x1b[0m");
    for s in suggestions {
        eprintln!("  {s}");
    }
}

/// List all valid config keys.
pub fn config_keys() -> ConfigCommandResult {
    for key in ConfigOptions::all_keys() {
        println!("{key}");
    }
    Ok(())
}
