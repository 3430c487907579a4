//! # Schema Subcommand
//!
//! Prints the compiled-in template schema as a JSON Schema document, for
//! editors and external tooling that understand JSON Schema.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use apptpl_schema::application_template_schema;

/// Arguments for the `apptpl schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Emit the schema on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the schema subcommand. Always returns exit code 0 on success.
pub fn run_schema(args: &SchemaArgs, out: &mut dyn Write) -> Result<u8> {
    let document = application_template_schema().to_json_schema();
    let written = if args.compact {
        serde_json::to_writer(&mut *out, &document)
    } else {
        serde_json::to_writer_pretty(&mut *out, &document)
    };
    written.context("failed to serialize schema")?;
    writeln!(out)?;
    Ok(0)
}
