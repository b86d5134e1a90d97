//! Error types for Runnel operations.

use std::io;

use thiserror::Error;

use runnel_model::ModelError;

/// The main error type for Runnel operations.
#[derive(Debug, Error)]
pub enum RunnelError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("document error: {0}")]
    Document(String),

    #[error("config error: {0}")]
    Config(String),
}
