//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Animated progress bars and spinners for the terminal.
///
/// Inspect the spinner and bar catalogs, try them in a live demo, and manage
/// the defaults stored in alive.toml.
#[derive(Parser, Debug)]
#[command(name = "alive")]
#[command(author, version = crate::BUILD_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file to use instead of ./alive.toml.
    #[arg(long, global = true, env = "ALIVE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command to run; a short usage note is printed when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for alive.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how a spinner or bar is compiled.
    ///
    /// Spinners print their specs at every verbosity; frames are added from
    /// -v 1, code points at -v 2 and 5, and -v 3 to 5 also play the
    /// animation until Ctrl+C.
    ///
    /// Examples:
    ///   alive check dots_waves          # Specs and frames
    ///   alive check arrows -v 5         # Everything, then animate
    ///   alive check classic --bar       # Bar at several percentages
    Check(CheckCommand),

    /// Play every spinner, bar or theme of the catalog.
    ///
    /// Examples:
    ///   alive showtime                  # All spinners
    ///   alive showtime bars -p "^s"     # Bars starting with s
    ///   alive showtime themes -s 10
    Showtime(ShowtimeCommand),

    /// Run a bar over simulated work, using the configured defaults.
    ///
    /// Examples:
    ///   alive demo                      # 1000 items
    ///   alive demo --unknown            # Total unknown
    ///   alive demo --manual --total 0   # Manual percentage
    Demo(DemoCommand),

    /// Manage alive configuration.
    ///
    /// View, set, and understand config keys without editing TOML directly.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the 'check' command.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Spinner or bar name.
    pub name: String,

    /// Report verbosity, 0 to 5.
    #[arg(short = 'v', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub verbosity: u8,

    /// Compile for this length instead of the natural one.
    #[arg(short = 'l', long)]
    pub length: Option<usize>,

    /// Check the bar of that name, for names that are also spinners.
    #[arg(long)]
    pub bar: bool,

    /// Stop the animation after this many seconds.
    #[arg(short = 's', long)]
    pub seconds: Option<f64>,
}

/// What `showtime` plays.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Show {
    /// The spinner catalog.
    Spinners,
    /// The bar catalog.
    Bars,
    /// The themes.
    Themes,
}

/// Arguments for the 'showtime' command.
#[derive(Args, Debug)]
pub struct ShowtimeCommand {
    /// Catalog to play.
    #[arg(value_enum, default_value_t = Show::Spinners)]
    pub show: Show,

    /// Only names matching this regular expression.
    #[arg(short = 'p', long)]
    pub pattern: Option<String>,

    /// How long to play.
    #[arg(short = 's', long, default_value_t = 5.0)]
    pub seconds: f64,

    /// Length of spinners and bars.
    #[arg(short = 'l', long, default_value_t = 20)]
    pub length: usize,
}

/// Arguments for the 'demo' command.
#[derive(Args, Debug)]
pub struct DemoCommand {
    /// Number of items to process.
    #[arg(short = 't', long, default_value_t = 1000)]
    pub total: u64,

    /// Do not tell the bar the total.
    #[arg(short = 'u', long)]
    pub unknown: bool,

    /// Set the progress as a percentage.
    #[arg(short = 'm', long)]
    pub manual: bool,

    /// Simulated work per item, in milliseconds.
    #[arg(short = 'd', long, default_value_t = 5)]
    pub delay_ms: u64,

    /// Title shown before the bar.
    #[arg(long)]
    pub title: Option<String>,
}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    ///
    /// Displays all config sections and their current values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation for nested keys (e.g., style.length).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Use dot notation for keys. Values are validated before saving.
    Set(ConfigSetCommand),

    /// Reset config to defaults.
    ///
    /// Can reset a specific key, a section, or all config.
    Reset(ConfigResetCommand),

    /// Open config file in your editor.
    ///
    /// Uses $EDITOR environment variable.
    Edit(ConfigEditCommand),

    /// Show documentation for config keys.
    ///
    /// Displays description, type, default value, and examples.
    Explain(ConfigExplainCommand),

    /// List all valid config keys.
    Keys(ConfigKeysCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'style', 'behaviour').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., style.length).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation (e.g., style.length).
    pub key: String,

    /// Value to set.
    pub value: String,
}

/// Arguments for 'config reset' command.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Key or section to reset. If omitted, resets all config.
    pub key: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for 'config edit' command.
#[derive(Args, Debug)]
pub struct ConfigEditCommand {}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Config key to explain. If omitted, lists all keys with brief descriptions.
    pub key: Option<String>,
}

/// Arguments for 'config keys' command.
#[derive(Args, Debug)]
pub struct ConfigKeysCommand {}

// ============================================================================
// Command implementations
// ============================================================================

fn exit_on_error<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("\x1b[31mError:\x1b[0m {e}");
        std::process::exit(1);
    }
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(&self) {
        let result = if self.bar {
            commands::check::check_bar(&self.name, self.length)
        } else {
            commands::check::check(&self.name, self.verbosity, self.length, self.seconds)
        };
        exit_on_error(result);
    }
}

impl ShowtimeCommand {
    /// Execute the showtime command.
    pub fn execute(&self) {
        exit_on_error(commands::showtime::showtime(
            self.show,
            self.pattern.as_deref(),
            self.seconds,
            self.length,
        ));
    }
}

impl DemoCommand {
    /// Execute the demo command.
    pub fn execute(&self, config: Option<&Path>) {
        let options = commands::demo::DemoOptions {
            total: (!self.unknown).then_some(self.total),
            manual: self.manual,
            delay_ms: self.delay_ms,
            title: self.title.clone(),
        };
        exit_on_error(commands::demo::demo(config, &options));
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self, config: Option<&Path>) {
        exit_on_error(commands::config::config_show(config, self.section.as_deref()));
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self, config: Option<&Path>) {
        exit_on_error(commands::config::config_get(config, &self.key));
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self, config: Option<&Path>) {
        exit_on_error(commands::config::config_set(config, &self.key, &self.value));
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self, config: Option<&Path>) {
        use std::io::{self, Write};

        // Confirm unless --yes (for resetting all)
        if self.key.is_none() && !self.yes {
            print!("Reset all config to defaults? [Y/n]: ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input == "n" || input == "no" {
                    println!("Cancelled.");
                    return;
                }
            }
        }

        exit_on_error(commands::config::config_reset(config, self.key.as_deref()));
    }
}

impl ConfigEditCommand {
    /// Execute the config edit command.
    pub fn execute(&self, config: Option<&Path>) {
        exit_on_error(commands::config::config_edit(config));
    }
}

impl ConfigExplainCommand {
    /// Execute the config explain command.
    pub fn execute(&self, config: Option<&Path>) {
        exit_on_error(commands::config::config_explain(config, self.key.as_deref()));
    }
}

impl ConfigKeysCommand {
    /// Execute the config keys command.
    pub fn execute(&self) {
        exit_on_error(commands::config::config_keys());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["alive", "check", "dots", "-v", "3", "--length", "8"]);
        match cli.command {
            Some(Commands::Check(check)) => {
                assert_eq!(check.name, "dots");
                assert_eq!(check.verbosity, 3);
                assert_eq!(check.length, Some(8));
                assert!(!check.bar);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_check_verbosity_is_bounded() {
        assert!(Cli::try_parse_from(["alive", "check", "dots", "-v", "6"]).is_err());
    }

    #[test]
    fn test_parse_showtime_defaults() {
        let cli = Cli::parse_from(["alive", "showtime"]);
        match cli.command {
            Some(Commands::Showtime(show)) => {
                assert_eq!(show.show, Show::Spinners);
                assert_eq!(show.seconds, 5.0);
                assert_eq!(show.length, 20);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["alive", "config", "show", "--config", "other.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommands::Show(_)))
        ));
    }
}
