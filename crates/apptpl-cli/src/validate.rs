//! # Validate Subcommand
//!
//! Batch validation of application template files with per-file reporting.
//!
//! Each path argument is validated in the order given. Directory arguments
//! expand in place to the `*.yaml` / `*.yml` files beneath them, sorted.
//! Text output streams one `Validating` line per file followed by its
//! verdict and indented detail lines; JSON output emits a single document
//! once the batch is complete.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use apptpl_schema::{BatchObserver, FileReport, RunOutcome, TemplateValidator};

/// Report format for `apptpl validate`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines, streamed per file.
    #[default]
    Text,
    /// One JSON document with every file's result.
    Json,
}

/// Arguments for the `apptpl validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Template files or directories to validate.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Treat business-rule warnings as failures for the exit status.
    #[arg(long)]
    pub strict: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand, writing the report to `out`.
///
/// Returns exit code: 0 when every file passes, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<u8> {
    let paths = expand_inputs(&args.paths);
    if paths.is_empty() {
        writeln!(out, "ERROR: no template files found")?;
        return Ok(1);
    }

    tracing::info!(files = paths.len(), strict = args.strict, "validating templates");

    let validator = TemplateValidator::default();

    let outcome = match args.format {
        OutputFormat::Text => {
            let mut reporter = TextReporter::new(&mut *out);
            let outcome = validator.run_batch_with(&paths, args.strict, &mut reporter);
            reporter.finish().context("failed to write validation report")?;
            write_summary(out, &outcome)?;
            outcome
        }
        OutputFormat::Json => {
            let outcome = validator.run_batch(&paths, args.strict);
            write_json(out, &outcome)?;
            outcome
        }
    };

    Ok(outcome.exit_code())
}

/// Streams per-file text lines as the batch runs.
///
/// Observer callbacks cannot fail, so the first write error is held and
/// surfaced by [`TextReporter::finish`].
struct TextReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextReporter<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_none() {
            if let Err(e) = write(&mut self.out) {
                self.error = Some(e);
            }
        }
    }

    fn finish(mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }
}

impl<W: Write> BatchObserver for TextReporter<W> {
    fn file_started(&mut self, path: &Path) {
        self.emit(|out| writeln!(out, "Validating {}", path.display()));
    }

    fn file_finished(&mut self, report: &FileReport) {
        self.emit(|out| write_file_report(out, report));
    }
}

fn write_file_report(out: &mut impl Write, report: &FileReport) -> io::Result<()> {
    let result = report.result();
    let path = report.path().display();

    if !result.is_valid() {
        writeln!(out, "FAIL: {path}")?;
    } else if result.has_warnings() {
        let n = result.warnings().len();
        let noun = if n == 1 { "warning" } else { "warnings" };
        writeln!(out, "OK ({n} {noun}): {path}")?;
    } else {
        writeln!(out, "OK: {path}")?;
    }

    for error in result.errors() {
        writeln!(out, "  ERROR: {error}")?;
    }
    for warning in result.warnings() {
        writeln!(out, "  WARN: {warning}")?;
    }
    Ok(())
}

fn write_summary(out: &mut dyn Write, outcome: &RunOutcome) -> Result<()> {
    writeln!(
        out,
        "\nTemplates: {}/{} valid, {} with warnings",
        outcome.valid_count(),
        outcome.files().len(),
        outcome.warning_count()
    )?;
    if outcome.strict() && outcome.warning_count() > 0 {
        writeln!(out, "strict mode: warnings are treated as failures")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    strict: bool,
    exit_code: u8,
    files: &'a [FileReport],
}

fn write_json(out: &mut dyn Write, outcome: &RunOutcome) -> Result<()> {
    let report = JsonReport {
        strict: outcome.strict(),
        exit_code: outcome.exit_code(),
        files: outcome.files(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

/// Replace each directory argument with the template files beneath it.
///
/// Non-directory paths pass through untouched, including ones that do not
/// exist; the batch runner reports those as unreadable.
fn expand_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut expanded = Vec::with_capacity(paths.len());
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk_for_templates(path, &mut found);
            found.sort();
            if found.is_empty() {
                tracing::warn!(dir = %path.display(), "no template files in directory");
            }
            expanded.extend(found);
        } else {
            expanded.push(path.clone());
        }
    }
    expanded
}

fn walk_for_templates(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during file walk"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks, so a link back to
        // an ancestor cannot make the walk revisit a directory.
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to stat directory entry");
                continue;
            }
        };
        if file_type.is_dir() {
            walk_for_templates(&path, acc);
        } else if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "not following directory symlink");
        } else if is_template_file(&path) {
            acc.push(path);
        }
    }
}

fn is_template_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
