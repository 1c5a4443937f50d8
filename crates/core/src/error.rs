// Central Error Type for the Pipeline

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A unit was interrupted at one of its blocking or idling points
    #[error("Cancelled while waiting")]
    Cancelled,

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

impl AppError {
    /// True for the cooperative-cancellation path
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
