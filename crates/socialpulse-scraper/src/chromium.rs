//! Chromium-backed [`BrowserSession`] built on `chromiumoxide`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use crate::error::ScraperError;
use crate::session::{BrowserLauncher, BrowserSession};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launch options for [`ChromiumLauncher`].
#[derive(Debug, Clone)]
pub struct ChromiumSettings {
    /// Browser binary. `None` lets chromiumoxide search the usual locations.
    pub executable: Option<PathBuf>,
    pub user_agent: String,
    /// Per-CDP-command timeout.
    pub request_timeout: Duration,
}

/// Launches one headless Chromium process per session.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: ChromiumSettings,
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new(settings: ChromiumSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir)
            .no_sandbox()
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--mute-audio")
            .window_size(1920, 1080)
            .request_timeout(self.settings.request_timeout);

        if let Some(path) = &self.settings.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(ScraperError::Launch)
    }
}

/// Fresh Chrome profile directory, removed when the returned guard drops.
fn new_profile_dir() -> Result<TempDir, ScraperError> {
    tempfile::Builder::new()
        .prefix("socialpulse-chromium-")
        .tempdir()
        .map_err(|e| ScraperError::Launch(format!("failed to create profile dir: {e}")))
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScraperError> {
        let profile_dir = new_profile_dir()?;
        let config = self.browser_config(profile_dir.path())?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Launch(e.to_string()))?;

        // The CDP handler must be polled for the browser to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "chromium handler event error");
                }
            }
        });

        let page = match open_page(&browser, &self.settings.user_agent).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.kill().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(e);
            }
        };

        tracing::debug!(profile_dir = %profile_dir.path().display(), "chromium session started");
        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            page,
            handler_task,
            profile_dir: Some(profile_dir),
        }))
    }
}

async fn open_page(browser: &Browser, user_agent: &str) -> Result<Page, ScraperError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| ScraperError::Browser(format!("failed to open page: {e}")))?;
    page.execute(SetUserAgentOverrideParams::new(user_agent))
        .await
        .map_err(|e| ScraperError::Browser(format!("failed to set user agent: {e}")))?;
    Ok(page)
}

/// A running Chromium process with one page and its own profile directory.
///
/// Dropping an unclosed session aborts the CDP handler and kills the
/// browser process on the current runtime. The profile directory is removed
/// once the process has exited.
pub struct ChromiumSession {
    browser: Option<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
    profile_dir: Option<TempDir>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let page = &self.page;
        let poll = async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| ScraperError::Timeout {
                selector: selector.to_string(),
                timeout_secs: timeout.as_secs(),
            })
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value, ScraperError> {
        let result = self
            .page
            .evaluate_expression(script)
            .await
            .map_err(|e| ScraperError::Evaluation {
                context: "page script".to_string(),
                reason: e.to_string(),
            })?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = browser.close().await;
        if closed.is_err() {
            let _ = browser.kill().await;
        }
        let _ = browser.wait().await;
        self.handler_task.abort();
        drop(self.profile_dir.take());

        closed
            .map(|_| ())
            .map_err(|e| ScraperError::Browser(format!("failed to close browser: {e}")))
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        let Some(mut browser) = self.browser.take() else {
            return;
        };
        tracing::warn!("chromium session dropped without close; killing browser");
        self.handler_task.abort();
        let profile_dir = self.profile_dir.take();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                let _ = browser.kill().await;
                let _ = browser.wait().await;
                drop(profile_dir);
            });
        }
    }
}
