use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {timeout_secs}s waiting for \"{selector}\"")]
    Timeout { selector: String, timeout_secs: u64 },

    #[error("script evaluation failed for {context}: {reason}")]
    Evaluation { context: String, reason: String },

    #[error("unexpected extraction result for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("browser error: {0}")]
    Browser(String),
}
