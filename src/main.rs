//! alive - animated progress bars and spinners for the terminal.
//!
//! This is the main entry point for the alive CLI tool.

use alive_progress::cli::{Cli, Commands, ConfigCommands};
use clap::Parser;

fn main() {
    alive_progress::logging::init();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        None => {
            println!("alive - animated progress bars and spinners for the terminal.");
            println!();
            println!("Run 'alive --help' for available commands.");
            println!();
            println!("Quick start:");
            println!("  alive showtime             # Play every spinner");
            println!("  alive showtime bars        # Play every bar");
            println!("  alive check dots_waves     # See how a spinner compiles");
            println!("  alive demo                 # Run a bar over 1000 items");
        }
        Some(cmd) => match cmd {
            Commands::Check(c) => c.execute(),
            Commands::Showtime(c) => c.execute(),
            Commands::Demo(c) => c.execute(config),
            Commands::Config(subcmd) => match subcmd {
                ConfigCommands::Show(c) => c.execute(config),
                ConfigCommands::Get(c) => c.execute(config),
                ConfigCommands::Set(c) => c.execute(config),
                ConfigCommands::Reset(c) => c.execute(config),
                ConfigCommands::Edit(c) => c.execute(config),
                ConfigCommands::Explain(c) => c.execute(config),
                ConfigCommands::Keys(c) => c.execute(),
            },
        },
    }
}
