// Defines the application error type and a result type alias using the thiserror crate.
use thiserror::Error;

// Make the response module public
pub mod notify;
pub mod response;

// Re-export commonly used types
pub use notify::{NotifyError, NotifyResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // The #[from] attribute automatically converts a redis::RedisError into an AppError::Store using the From trait.
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Template error: {0}")]
    Template(#[from] std::io::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
