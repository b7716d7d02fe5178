//! Wiring shared by the server and CLI binaries.

use std::time::Duration;

use socialpulse_core::AppConfig;
use socialpulse_scraper::{
    ChromiumLauncher, ChromiumSettings, ProfileScraper, ScraperSettings, XProfileAdapter,
};
use socialpulse_sentiment::{Lexicon, LexiconError};

use crate::pipeline::PipelineSettings;

/// CDP command timeout floor, so short selector waits never starve
/// navigation commands.
const MIN_CDP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl PipelineSettings {
    /// A deadline of `0` disables the overall fetch bound.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_concurrent_sessions: config.max_concurrent_sessions,
            deadline: (config.request_deadline_secs > 0)
                .then(|| Duration::from_secs(config.request_deadline_secs)),
        }
    }
}

/// Loads the lexicon file named in the config, or the built-in word list.
///
/// # Errors
///
/// Returns [`LexiconError`] if a configured file cannot be read or parsed.
pub fn load_lexicon(config: &AppConfig) -> Result<Lexicon, LexiconError> {
    if let Some(path) = &config.lexicon_path {
        return Lexicon::from_path(path);
    }
    let lexicon = Lexicon::builtin();
    tracing::info!(words = lexicon.len(), "using built-in lexicon");
    Ok(lexicon)
}

/// Builds the Chromium-backed scraper for the configured profile site.
#[must_use]
pub fn chromium_scraper(config: &AppConfig) -> ProfileScraper<ChromiumLauncher, XProfileAdapter> {
    let wait_timeout = Duration::from_secs(config.scraper_wait_timeout_secs);
    let launcher = ChromiumLauncher::new(ChromiumSettings {
        executable: config.browser_executable.clone(),
        user_agent: config.browser_user_agent.clone(),
        request_timeout: wait_timeout.max(MIN_CDP_REQUEST_TIMEOUT),
    });
    ProfileScraper::new(
        launcher,
        XProfileAdapter::new(&config.profile_base_url),
        ScraperSettings { wait_timeout },
    )
}
