//! Profile pipeline orchestration.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use socialpulse_core::{PostRecord, PostsStatus, ProfileSnapshot, SentimentSummary};
use socialpulse_scraper::{PostsOutcome, ProfileSource, ScrapedProfile, ScraperError};
use socialpulse_sentiment::{analyze, Lexicon};
use tokio::sync::Semaphore;

use crate::error::PipelineError;
use crate::store::SnapshotStore;

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    /// Browser sessions allowed to run at once across all requests.
    pub max_concurrent_sessions: usize,
    /// Bound on waiting for a session slot plus the whole fetch. `None`
    /// disables the bound.
    pub deadline: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_concurrent_sessions: 2,
            deadline: Some(Duration::from_secs(60)),
        }
    }
}

/// Scrape → score → assemble → persist.
pub struct ProfilePipeline {
    source: Arc<dyn ProfileSource>,
    store: Arc<dyn SnapshotStore>,
    lexicon: Arc<Lexicon>,
    sessions: Semaphore,
    deadline: Option<Duration>,
}

impl ProfilePipeline {
    pub fn new(
        source: Arc<dyn ProfileSource>,
        store: Arc<dyn SnapshotStore>,
        lexicon: Arc<Lexicon>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            source,
            store,
            lexicon,
            sessions: Semaphore::new(settings.max_concurrent_sessions.max(1)),
            deadline: settings.deadline,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    /// Runs the pipeline for one handle and returns the persisted snapshot.
    ///
    /// 1. Normalize the handle; a blank handle fails before any browser work.
    /// 2. Fetch the profile under the session limit and overall deadline.
    /// 3. Score each post's text, preserving page order.
    /// 4. Assemble and persist the snapshot.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Validation`] for a blank handle.
    /// - [`PipelineError::Fetch`] when the scraper fails; nothing is persisted.
    /// - [`PipelineError::DeadlineExceeded`] when the fetch overruns; nothing
    ///   is persisted.
    /// - [`PipelineError::Persistence`] when the store rejects the write.
    pub async fn run(&self, handle: &str) -> Result<ProfileSnapshot, PipelineError> {
        let handle = normalize_handle(handle)
            .ok_or_else(|| PipelineError::Validation("handle is required".to_string()))?;

        let scraped = match self.fetch_bounded(&handle).await {
            Ok(scraped) => scraped,
            Err(e) => {
                tracing::warn!(
                    handle = %handle,
                    phase = "fetch",
                    error = %e,
                    "profile fetch failed"
                );
                return Err(e);
            }
        };

        let snapshot = assemble_snapshot(&handle, scraped, &self.lexicon);

        match self.store.insert_snapshot(&snapshot).await {
            Ok(id) => {
                tracing::info!(
                    handle = %handle,
                    snapshot_id = id,
                    posts = snapshot.posts.len(),
                    posts_status = snapshot.posts_status.as_str(),
                    overall = snapshot.summary.overall.as_str(),
                    "profile snapshot persisted"
                );
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(
                    handle = %handle,
                    phase = "persist",
                    error = %e,
                    "snapshot write failed"
                );
                Err(e.into())
            }
        }
    }

    async fn fetch_bounded(&self, handle: &str) -> Result<ScrapedProfile, PipelineError> {
        let fetch = self.fetch_with_permit(handle);

        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fetch)
                .await
                .map_err(|_| PipelineError::DeadlineExceeded {
                    secs: deadline.as_secs(),
                })?
                .map_err(PipelineError::from),
            None => fetch.await.map_err(PipelineError::from),
        }
    }

    async fn fetch_with_permit(&self, handle: &str) -> Result<ScrapedProfile, ScraperError> {
        let _permit = self
            .sessions
            .acquire()
            .await
            .map_err(|_| ScraperError::Browser("session pool closed".to_string()))?;
        self.source.fetch_profile(handle).await
    }
}

/// Trims whitespace and one leading `@`. Returns `None` if nothing is left.
#[must_use]
pub fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}

/// Attaches sentiment to each scraped post and builds the snapshot.
#[must_use]
pub fn assemble_snapshot(
    handle: &str,
    scraped: ScrapedProfile,
    lexicon: &Lexicon,
) -> ProfileSnapshot {
    let posts_status = if scraped.posts.is_available() {
        PostsStatus::Available
    } else {
        PostsStatus::Unavailable
    };

    let posts: Vec<PostRecord> = match scraped.posts {
        PostsOutcome::Posts(posts) => posts
            .into_iter()
            .map(|post| {
                let sentiment = analyze(&post.text, lexicon);
                PostRecord {
                    text: post.text,
                    published_at: post.published_at,
                    like_label: post.like_label,
                    sentiment_score: sentiment.score,
                    sentiment_comparative: sentiment.comparative,
                }
            })
            .collect(),
        PostsOutcome::Unavailable { .. } => Vec::new(),
    };

    let summary = SentimentSummary::from_posts(&posts);
    let fields = scraped.fields;

    ProfileSnapshot {
        handle: handle.to_string(),
        post_count: fields.post_count,
        avatar_url: fields.avatar_url,
        following_count: fields.following_count,
        follower_count: fields.follower_count,
        joined_label: fields.joined_label,
        bio: fields.bio,
        posts,
        posts_status,
        summary,
        captured_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handle_trims_and_strips_at() {
        assert_eq!(normalize_handle("  @rustlang "), Some("rustlang".to_string()));
        assert_eq!(normalize_handle("rustlang"), Some("rustlang".to_string()));
    }

    #[test]
    fn normalize_handle_rejects_blank() {
        assert_eq!(normalize_handle(""), None);
        assert_eq!(normalize_handle("   "), None);
        assert_eq!(normalize_handle("@"), None);
    }
}
