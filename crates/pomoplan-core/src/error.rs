//! Core error types for pomoplan-core.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomoplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan-extraction errors
    #[error("Plan extraction error: {0}")]
    Plan(#[from] PlanError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No platform configuration directory available
    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Failure taxonomy for the plan-extraction request path.
///
/// These never escape [`crate::PlanClient::extract_tasks`]; they exist so the
/// error log carries typed context before the call degrades to an empty
/// result.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Transport-level failure or undecodable response body
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the model endpoint
    #[error("Model API error (HTTP {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response decoded but carried no candidate text
    #[error("Model response contained no candidate text")]
    EmptyResponse,

    /// Candidate text was not valid plan JSON
    #[error("Failed to parse plan JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
