//! # apptpl-cli — Application Template Validator CLI
//!
//! Provides the `apptpl` command-line interface over `apptpl-schema`.
//!
//! ## Subcommands
//!
//! - `apptpl validate [--strict] [--format text|json] <PATH>...` — validate
//!   template files (or every `*.yaml`/`*.yml` under a directory).
//! - `apptpl schema [--compact]` — print the template schema as JSON Schema.
//!
//! ```bash
//! apptpl validate templates/web.yaml templates/batch.yaml
//! apptpl validate --strict templates/
//! apptpl -v validate --format json templates/ > report.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing and report rendering live here; validation logic
//!   lives in `apptpl-schema`.
//! - Handlers write to a caller-supplied writer and return the process
//!   exit code.

pub mod schema;
pub mod validate;
