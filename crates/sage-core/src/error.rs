//! Error types for Sage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SageError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Recipe search error: {0}")]
    Search(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
