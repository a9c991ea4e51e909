//! Error types for readiness operations.
//!
//! This module defines [`ReadinessError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A missing tool is never an error: probes report
//!   [`ProbeResult::Unavailable`](crate::requirements::ProbeResult::Unavailable)
//! - Use `ReadinessError` for caller mistakes (unknown keys, bad overrides)
//!   and for failed account verification
//! - Use `anyhow::Error` (via `ReadinessError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for readiness operations.
#[derive(Debug, Error)]
pub enum ReadinessError {
    /// The requirement key is not in the registry.
    #[error("Unknown requirement: {key}")]
    UnknownRequirement { key: String },

    /// The stage key is not in the stage table.
    #[error("Unknown stage: {key}")]
    UnknownStage { key: String },

    /// An override could not be parsed.
    #[error("Invalid override '{value}': {message}")]
    InvalidOverride { value: String, message: String },

    /// A platform name could not be parsed.
    #[error("Invalid platform '{value}' (expected Windows, macOS or Linux)")]
    InvalidPlatform { value: String },

    /// Failed to parse a configuration or settings file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The WordPress.org account lookup failed or the account does not exist.
    #[error("Could not verify WordPress.org account '{username}': {message}")]
    AccountVerificationFailed { username: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for readiness operations.
pub type Result<T> = std::result::Result<T, ReadinessError>;
