use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed value {value:?} at byte offset {offset} in {}", .path.display())]
    MalformedValue {
        path: PathBuf,
        offset: u64,
        value: String,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Failed to persist output file: {0}")]
    OutputPersist(#[from] tempfile::PersistError),
}

impl From<config::ConfigError> for ProcessingError {
    fn from(err: config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}
