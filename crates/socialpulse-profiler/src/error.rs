use socialpulse_scraper::ScraperError;
use thiserror::Error;

/// Failure from a [`crate::SnapshotStore`] backend.
#[derive(Debug, Error)]
#[error("snapshot store error: {0}")]
pub struct StoreError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] ScraperError),

    #[error("profile fetch exceeded the {secs}s deadline")]
    DeadlineExceeded { secs: u64 },

    #[error(transparent)]
    Persistence(#[from] StoreError),
}
