use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetoqueError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{description} failed after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        description: String,
        attempts: u32,
        last_error: anyhow::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}
