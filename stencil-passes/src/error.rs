//! Error types for pipeline assembly
//!
//! Only configuration mistakes by the caller end up here. Diagnostics about
//! the templates themselves go through the error reporter, and an early
//! STOP from a pass is a normal outcome.

use thiserror::Error;

/// Main assembly error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("missing required builder field: {0}")]
    MissingField(&'static str),

    #[error("the following continuation rules don't match any pass: {rules}")]
    UnmatchedContinuationRules {
        /// `name=RULE` pairs, sorted by name
        rules: String,
        names: Vec<String>,
    },

    #[error("pass factory returned '{actual}' for pass '{expected}'")]
    PassNameMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}
