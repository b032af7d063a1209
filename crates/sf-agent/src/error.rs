//! Agent-input error type.

use thiserror::Error;

/// Errors produced while loading customer profiles.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("profile {index}: {reason}")]
    InvalidProfile { index: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
