//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Parameter errors ──────────────────────────────────────────────────────────

/// Errors raised while validating Terraform option overrides.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("Invalid parameter type: {value} is {actual}, expected {expected}")]
    InvalidParameterType {
        value: String,
        actual: &'static str,
        expected: &'static str,
    },

    /// The value cannot be placed on a `sh -c` command line as rendered.
    #[error("Invalid parameter value for {name}: {value:?} {reason}")]
    UnsafeValue {
        name: String,
        value: String,
        reason: String,
    },
}

// ── Terraform errors ──────────────────────────────────────────────────────────

/// Errors raised after a Terraform command has run.
#[derive(Debug, Error)]
pub enum TerraformError {
    /// The command output did not contain the expected success phrase.
    #[error("Exception raised while {command}")]
    Provisioning { command: String },

    #[error("terraform output is not valid JSON: {0}")]
    OutputParse(#[from] serde_json::Error),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
