//! # apptpl CLI entry point
//!
//! Parses command-line arguments, sets up logging, and dispatches to
//! subcommand handlers.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apptpl_cli::schema::{run_schema, SchemaArgs};
use apptpl_cli::validate::{run_validate, ValidateArgs};

/// Application template validator.
///
/// Checks application template YAML documents for syntax, structure, and
/// cross-field consistency.
#[derive(Parser, Debug)]
#[command(name = "apptpl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate template files and report per-file results.
    Validate(ValidateArgs),

    /// Print the template schema as a JSON Schema document.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "apptpl starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &mut out),
        Commands::Schema(args) => run_schema(&args, &mut out),
    };

    if let Err(e) = out.flush() {
        tracing::error!("failed to flush stdout: {e}");
        return ExitCode::from(1);
    }

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
