//! Config key metadata for documentation and help.
//!
//! This module provides descriptions, types, defaults, and examples
//! for all config keys, used by `alive config explain`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "style.length").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "integer", "bool", "string").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    // style section
    KeyMetadata {
        key: "style.theme",
        description: "Theme providing the spinner, bar and unknown bar that are not set \
                      explicitly.",
        value_type: "smooth | classic | ascii",
        default: "smooth",
        examples: &["smooth", "classic", "ascii"],
    },
    KeyMetadata {
        key: "style.spinner",
        description: "Spinner shown next to the bar. Use 'none' to hide it. See \
                      `alive showtime spinners`.",
        value_type: "spinner name (optional)",
        default: "(not set)",
        examples: &["dots_waves", "classic", "none"],
    },
    KeyMetadata {
        key: "style.bar",
        description: "Bar style. Use 'none' to hide the bar. See `alive showtime bars`.",
        value_type: "bar name (optional)",
        default: "(not set)",
        examples: &["smooth", "classic2", "none"],
    },
    KeyMetadata {
        key: "style.unknown",
        description: "Spinner played inside the bar when the total is unknown.",
        value_type: "spinner name (optional)",
        default: "(not set)",
        examples: &["triangles", "brackets"],
    },
    KeyMetadata {
        key: "style.length",
        description: "Bar length in cells, borders excluded.",
        value_type: "integer (3..=1000)",
        default: "40",
        examples: &["20", "60"],
    },
    KeyMetadata {
        key: "style.spinner_length",
        description: "Spinner length in cells. 0 uses the natural length of the spinner.",
        value_type: "integer (0..=1000)",
        default: "0",
        examples: &["0", "8", "20"],
    },
    KeyMetadata {
        key: "style.max_cols",
        description: "Columns available when the terminal size cannot be detected.",
        value_type: "integer (3..=1000)",
        default: "80",
        examples: &["80", "120"],
    },
    // widgets section
    KeyMetadata {
        key: "widgets.title",
        description: "Title shown before the bar.",
        value_type: "string (optional)",
        default: "(not set)",
        examples: &["Downloading", "Processing files"],
    },
    KeyMetadata {
        key: "widgets.title_length",
        description: "Fixed title length in cells. Shorter titles are padded, longer ones \
                      end with an ellipsis. 0 leaves the title unbounded.",
        value_type: "integer (0..=1000)",
        default: "0",
        examples: &["0", "12"],
    },
    KeyMetadata {
        key: "widgets.monitor",
        description: "Show the count, total and percentage.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "widgets.elapsed",
        description: "Show the elapsed time.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "widgets.stats",
        description: "Show the processing rate and the estimated time left.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "widgets.receipt",
        description: "Print a final receipt line when the bar finishes.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "widgets.receipt_text",
        description: "Keep the last text message in the final receipt.",
        value_type: "bool",
        default: "false",
        examples: &["true", "false"],
    },
    // behaviour section
    KeyMetadata {
        key: "behaviour.force_tty",
        description: "Force the animated mode on or off. When 'auto', animations run only \
                      if stdout is an interactive terminal.",
        value_type: "auto | true | false",
        default: "auto",
        examples: &["auto", "true", "false"],
    },
    KeyMetadata {
        key: "behaviour.disable",
        description: "Disable all output; the bar still counts.",
        value_type: "bool",
        default: "false",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "behaviour.manual",
        description: "Set progress as a percentage instead of counting items.",
        value_type: "bool",
        default: "false",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "behaviour.enrich_print",
        description: "Prefix lines printed while the bar runs with the current position, \
                      as in 'on 42: message'.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "behaviour.refresh_secs",
        description: "Fixed refresh interval in seconds. 0 adapts the refresh rate to the \
                      processing throughput.",
        value_type: "number (0..=60)",
        default: "0",
        examples: &["0", "0.1", "1"],
    },
    KeyMetadata {
        key: "behaviour.calibrate",
        description: "Throughput at which the refresh rate reaches its maximum. 'auto' uses \
                      1000000 for counting bars and 1 for manual percentage bars.",
        value_type: "number or auto",
        default: "auto",
        examples: &["auto", "100", "50000"],
    },
];

/// Get metadata for a specific key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}

/// Get all keys in the metadata table.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    METADATA.iter().map(|m| m.key)
}

/// Search for keys matching a query (prefix or contains).
pub fn search_keys(query: &str) -> Vec<&'static KeyMetadata> {
    let query_lower = query.to_lowercase();
    METADATA
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Get all keys for a specific section.
pub fn keys_for_section(section: &str) -> Vec<&'static KeyMetadata> {
    let prefix = format!("{section}.");
    METADATA
        .iter()
        .filter(|m| m.key.starts_with(&prefix))
        .collect()
}
