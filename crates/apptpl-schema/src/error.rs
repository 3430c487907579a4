//! # Error Types
//!
//! Per-file failure taxonomy for template validation. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - No error here is fatal to a batch. Each one marks a single file
//!   invalid and its `Display` output is what gets reported.
//! - Schema errors name the offending field path and, for type
//!   mismatches, the expected vs actual shape.
//! - Rule warnings are not errors and live in [`crate::rules`].

use std::path::PathBuf;

use thiserror::Error;

/// The raw text could not be parsed as a YAML document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid YAML: {reason}")]
pub struct SyntaxError {
    /// Parser-supplied description of the failure.
    pub reason: String,
    /// 1-based line of the failure, when the parser reports one.
    pub line: Option<usize>,
    /// 1-based column of the failure, when the parser reports one.
    pub column: Option<usize>,
}

impl SyntaxError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            line: None,
            column: None,
        }
    }
}

/// A parsed document does not match the structural schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field marked required is absent from its parent object.
    #[error("missing required field '{path}'")]
    MissingField {
        /// Dotted path of the missing field.
        path: String,
    },

    /// A present value has the wrong type.
    #[error("field '{path}' must be {expected}, found {actual}")]
    TypeMismatch {
        /// Dotted path of the offending value, `(root)` for the document.
        path: String,
        /// Type declared by the schema.
        expected: &'static str,
        /// Type actually found in the document.
        actual: &'static str,
    },
}

impl SchemaError {
    /// Returns the path of the field this error is about.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path } | Self::TypeMismatch { path, .. } => path,
        }
    }
}

/// Reason a single file was marked invalid.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not well-formed YAML.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The document does not match the structural schema.
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaError),

    /// Validation of this file panicked; the batch carries on.
    #[error("internal error: {0}")]
    Internal(String),
}
