//! Error types for mocovoice-mcp.
//!
//! Each layer owns its own error enum: [`crate::files::FileRejection`] for local
//! file checks, [`crate::api::ApiCallError`] for remote calls and
//! [`crate::workflow::WorkflowError`] for the tool-facing boundary. This module
//! holds the crate-level error used by configuration and process plumbing.

use thiserror::Error;

/// Library-level error type for configuration and I/O plumbing.
#[derive(Error, Debug)]
pub enum MocoVoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for mocovoice-mcp operations.
pub type Result<T> = std::result::Result<T, MocoVoiceError>;
