//! OpenFarm CLI - firmware source generation from module descriptors
//!
//! Takes a set of module type descriptors and module instance descriptors
//! (JSON) and emits a single sketch source file wired up for the selected
//! communication plugins.

use clap::{Parser, Subcommand};
use commands::generate::GenerateCommand;

mod commands;
mod error;

/// OpenFarm CLI - Generate firmware sources from module descriptors
#[derive(Debug, Parser)]
#[command(name = "openfarm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate firmware source from type and instance descriptors
    #[command(name = "generate")]
    Generate(GenerateCommand),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(cmd) => cmd.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
