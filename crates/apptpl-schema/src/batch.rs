//! # Batch Runner
//!
//! Drives the validation pipeline over one or many template files:
//!
//! ```text
//! read file -> check_syntax -> check_schema -> check_business_rules
//! ```
//!
//! Each stage short-circuits the ones after it for that file only. A bad
//! file never aborts the batch: IO failures, syntax errors, schema errors,
//! and even panics inside the pipeline are caught at the file boundary and
//! recorded against that file. Files are processed and reported in input
//! order.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::error::{FileError, SyntaxError};
use crate::report::{FileReport, RunOutcome, ValidationResult};
use crate::rules::check_business_rules;
use crate::schema::{application_template_schema, SchemaNode};
use crate::structure::check_schema;
use crate::syntax::check_syntax;

/// Receives progress events while a batch runs.
///
/// Both methods default to no-ops.
pub trait BatchObserver {
    /// Called before `path` is read.
    fn file_started(&mut self, _path: &Path) {}

    /// Called once `report` is final.
    fn file_finished(&mut self, _report: &FileReport) {}
}

impl BatchObserver for () {}

/// Validates application template documents against a fixed schema.
///
/// The schema is supplied once at construction and only read afterwards.
#[derive(Debug, Clone)]
pub struct TemplateValidator {
    schema: SchemaNode,
}

impl Default for TemplateValidator {
    fn default() -> Self {
        Self::new(application_template_schema())
    }
}

impl TemplateValidator {
    pub fn new(schema: SchemaNode) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Run syntax, schema, and rule checks on raw document text.
    pub fn validate_str(&self, raw: &str) -> ValidationResult {
        match self.check_document(raw) {
            Ok(warnings) => ValidationResult::valid(warnings),
            Err(e) => ValidationResult::invalid(e.to_string()),
        }
    }

    /// Read `path` and validate its content.
    ///
    /// An unreadable file is an invalid result, not an error. Content that
    /// is not UTF-8 is reported as invalid YAML.
    pub fn validate_path(&self, path: &Path) -> ValidationResult {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(source) => {
                return ValidationResult::invalid(
                    FileError::Io {
                        path: path.to_path_buf(),
                        source,
                    }
                    .to_string(),
                )
            }
        };
        match String::from_utf8(bytes) {
            Ok(raw) => self.validate_str(&raw),
            Err(e) => ValidationResult::invalid(
                FileError::from(SyntaxError::new(format!(
                    "document is not valid UTF-8: {}",
                    e.utf8_error()
                )))
                .to_string(),
            ),
        }
    }

    /// Validate every path in order.
    pub fn run_batch(&self, paths: &[PathBuf], strict: bool) -> RunOutcome {
        self.run_batch_with(paths, strict, &mut ())
    }

    /// Validate every path in order, notifying `observer` around each file.
    pub fn run_batch_with<O>(&self, paths: &[PathBuf], strict: bool, observer: &mut O) -> RunOutcome
    where
        O: BatchObserver + ?Sized,
    {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            observer.file_started(path);
            tracing::debug!(path = %path.display(), "validating template");

            let result = self.validate_path_guarded(path);
            if !result.is_valid() {
                tracing::info!(
                    path = %path.display(),
                    errors = ?result.errors(),
                    "template is invalid"
                );
            } else if result.has_warnings() {
                tracing::debug!(
                    path = %path.display(),
                    warnings = result.warnings().len(),
                    "template passed with warnings"
                );
            }

            let report = FileReport::new(path.clone(), result);
            observer.file_finished(&report);
            files.push(report);
        }

        let outcome = RunOutcome::new(strict, files);
        tracing::debug!(
            total = outcome.files().len(),
            invalid = outcome.invalid_count(),
            with_warnings = outcome.warning_count(),
            strict,
            "batch complete"
        );
        outcome
    }

    fn check_document(&self, raw: &str) -> Result<Vec<String>, FileError> {
        let parsed = check_syntax(raw)?;
        check_schema(&parsed, &self.schema)?;
        Ok(check_business_rules(&parsed)
            .into_iter()
            .map(|w| w.to_string())
            .collect())
    }

    fn validate_path_guarded(&self, path: &Path) -> ValidationResult {
        guard_file(path, || self.validate_path(path))
    }
}

/// Runs one file's pipeline, turning a panic into an `internal error`
/// result for that file.
fn guard_file(path: &Path, validate: impl FnOnce() -> ValidationResult) -> ValidationResult {
    panic::catch_unwind(AssertUnwindSafe(validate)).unwrap_or_else(|payload| {
        let reason = panic_message(payload.as_ref());
        tracing::error!(path = %path.display(), %reason, "panic while validating template");
        ValidationResult::invalid(FileError::Internal(reason).to_string())
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "validation panicked".to_string())
}
