//! # apptpl-schema — Application Template Validation
//!
//! Validates declarative application template documents (YAML) in three
//! layers, then aggregates per-file results across a batch.
//!
//! ## Pipeline
//!
//! 1. [`syntax`] — parse raw text into a [`serde_json::Value`] tree,
//!    reporting malformed YAML as a [`SyntaxError`].
//! 2. [`structure`] — check the tree against the [`SchemaNode`] built by
//!    [`application_template_schema`]. First error wins.
//! 3. [`rules`] — cross-field [`BusinessRule`]s that only ever warn.
//! 4. [`batch`] — [`TemplateValidator`] runs the pipeline per file and
//!    produces a [`RunOutcome`] whose exit code honours strict mode.
//!
//! ## Crate Policy
//!
//! - The schema is the only shared state. It is built once, passed into
//!   [`TemplateValidator::new`], and never mutated.
//! - No failure in one file affects another file in the same batch.
//! - Unknown document keys are accepted; templates are extensible.

pub mod batch;
pub mod error;
pub mod report;
pub mod rules;
pub mod schema;
pub mod structure;
pub mod syntax;

pub use batch::{BatchObserver, TemplateValidator};
pub use error::{FileError, SchemaError, SyntaxError};
pub use report::{FileReport, RunOutcome, ValidationResult};
pub use rules::{check_business_rules, BusinessRule, RuleWarning, BUSINESS_RULES};
pub use schema::{application_template_schema, Field, SchemaNode};
pub use structure::check_schema;
pub use syntax::check_syntax;
