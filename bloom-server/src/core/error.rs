use shared::AppError;
use thiserror::Error;

/// Startup and runtime failures of the server process itself.
///
/// Request-level failures are [`AppError`] and never reach this type.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
