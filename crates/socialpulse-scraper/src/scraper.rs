//! Profile scrape orchestration: navigate, wait, extract.

use std::time::Duration;

use async_trait::async_trait;
use socialpulse_core::MAX_POSTS;

use crate::adapter::ExtractionAdapter;
use crate::error::ScraperError;
use crate::session::{BrowserLauncher, BrowserSession};
use crate::types::{
    PostsOutcome, ProfileFields, RawPost, RawProfileFields, ScrapedPost, ScrapedProfile,
};

/// Anything that can turn a handle into a [`ScrapedProfile`].
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetches one profile.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the profile page could not be loaded or
    /// its fields could not be read. Post extraction problems are reported
    /// through [`PostsOutcome::Unavailable`] instead.
    async fn fetch_profile(&self, handle: &str) -> Result<ScrapedProfile, ScraperError>;
}

#[derive(Debug, Clone, Copy)]
pub struct ScraperSettings {
    /// Bound on each selector wait.
    pub wait_timeout: Duration,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(10),
        }
    }
}

/// Scrapes profiles with one fresh browser session per call.
pub struct ProfileScraper<L, A> {
    launcher: L,
    adapter: A,
    settings: ScraperSettings,
}

impl<L, A> ProfileScraper<L, A>
where
    L: BrowserLauncher,
    A: ExtractionAdapter,
{
    pub fn new(launcher: L, adapter: A, settings: ScraperSettings) -> Self {
        Self {
            launcher,
            adapter,
            settings,
        }
    }

    async fn scrape(
        &self,
        session: &mut dyn BrowserSession,
        handle: &str,
    ) -> Result<ScrapedProfile, ScraperError> {
        let url = self.adapter.profile_url(handle);
        tracing::debug!(handle, url = %url, "navigating to profile");
        session.goto(&url).await?;

        for selector in self.adapter.ready_selectors() {
            session
                .wait_for_selector(selector, self.settings.wait_timeout)
                .await?;
        }

        let raw = session
            .evaluate(&self.adapter.profile_script(handle))
            .await?;
        let fields: RawProfileFields =
            serde_json::from_value(raw).map_err(|e| ScraperError::Decode {
                context: format!("profile fields of {handle}"),
                source: e,
            })?;
        let fields = ProfileFields::from(fields);

        let posts = self.scrape_posts(session, handle).await;

        Ok(ScrapedProfile { fields, posts })
    }

    async fn scrape_posts(&self, session: &mut dyn BrowserSession, handle: &str) -> PostsOutcome {
        match self.read_posts(session).await {
            Ok(posts) => PostsOutcome::Posts(posts),
            Err(e) => {
                tracing::warn!(handle, error = %e, "post extraction unavailable");
                PostsOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn read_posts(
        &self,
        session: &mut dyn BrowserSession,
    ) -> Result<Vec<ScrapedPost>, ScraperError> {
        session
            .wait_for_selector(
                self.adapter.post_container_selector(),
                self.settings.wait_timeout,
            )
            .await?;

        let raw = session
            .evaluate(&self.adapter.posts_script(MAX_POSTS))
            .await?;
        let raw: Vec<RawPost> = serde_json::from_value(raw).map_err(|e| ScraperError::Decode {
            context: "post list".to_string(),
            source: e,
        })?;

        Ok(raw
            .into_iter()
            .take(MAX_POSTS)
            .map(ScrapedPost::from)
            .collect())
    }
}

#[async_trait]
impl<L, A> ProfileSource for ProfileScraper<L, A>
where
    L: BrowserLauncher,
    A: ExtractionAdapter,
{
    async fn fetch_profile(&self, handle: &str) -> Result<ScrapedProfile, ScraperError> {
        let mut session = self.launcher.launch().await?;

        let outcome = self.scrape(session.as_mut(), handle).await;

        if let Err(e) = session.close().await {
            tracing::warn!(handle, error = %e, "browser session did not close cleanly");
        }

        outcome
    }
}
