//! # Validation Reports
//!
//! Per-file results and the aggregate outcome of a batch run.
//!
//! Two signals are tracked separately: `is_valid` (syntax and schema
//! passed) and the effective pass/fail used for the exit status, which
//! under strict mode also fails on warnings.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Outcome of validating one document.
///
/// A result is either valid (no errors, any number of warnings) or invalid
/// (at least one error). The constructors are the only way to build one,
/// so `is_valid` can never be `true` alongside errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// A document that passed syntax and schema checks.
    pub fn valid(warnings: Vec<String>) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings,
        }
    }

    /// A document rejected for `error`.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result for one input path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    path: PathBuf,
    #[serde(flatten)]
    result: ValidationResult,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, result: ValidationResult) -> Self {
        Self {
            path: path.into(),
            result,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Whether this file counts as a failure for the exit status.
    pub fn fails(&self, strict: bool) -> bool {
        !self.result.is_valid() || (strict && self.result.has_warnings())
    }
}

/// Aggregate of one batch run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    strict: bool,
    files: Vec<FileReport>,
}

impl RunOutcome {
    pub fn new(strict: bool, files: Vec<FileReport>) -> Self {
        Self { strict, files }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// True when no file fails under this run's policy.
    pub fn is_success(&self) -> bool {
        !self.files.iter().any(|f| f.fails(self.strict))
    }

    /// Process exit status: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn valid_count(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.files.len() - self.valid_count()
    }

    /// Number of files carrying at least one warning.
    pub fn warning_count(&self) -> usize {
        self.files.iter().filter(|f| f.result.has_warnings()).count()
    }
}
