use std::path::PathBuf;

/// Errors raised by the tracker core. The binary wraps these in `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown status '{0}' (expected applied, interview, offer or rejected)")]
    UnknownStatus(String),

    #[error("Failed to load seed file {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
