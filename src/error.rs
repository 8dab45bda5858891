//! Error types and result aliases for LatexGenius.
//!
//! This module defines the core error type [`LatexGeniusError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LatexGeniusError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A generation attempt failed. The payload is the user-facing detail.
    #[error("{0}")]
    GenerationFailed(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Editor launch error: {0}")]
    EditorError(String),
}

pub type Result<T> = std::result::Result<T, LatexGeniusError>;
