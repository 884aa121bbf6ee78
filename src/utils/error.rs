use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the output sink or the event source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON deserialization of an event
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error compiling a search pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Printer options that cannot be honored
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed decoded input
    #[error("Input error: {0}")]
    Input(String),
}

/// Result type for application
pub type AppResult<T> = Result<T, AppError>;
