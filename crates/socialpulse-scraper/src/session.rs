//! Browser engine seam.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;

/// One isolated browser with a single open page.
///
/// Implementations must make [`close`](BrowserSession::close) idempotent and
/// must release the underlying browser on drop if `close` was never reached
/// (cancellation, panic).
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates the page to `url`.
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError>;

    /// Waits until an element matching `selector` exists, or fails with
    /// [`ScraperError::Timeout`] after `timeout`.
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError>;

    /// Evaluates `script` in the page and returns its JSON value.
    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError>;

    /// Shuts the browser down.
    async fn close(&mut self) -> Result<(), ScraperError>;
}

/// Starts fresh browser sessions. Sessions are never shared between scrapes.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScraperError>;
}
