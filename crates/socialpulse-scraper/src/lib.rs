//! Headless-browser profile scraper.
//!
//! The browser engine sits behind [`BrowserLauncher`]/[`BrowserSession`], and
//! every CSS selector the scraper depends on lives in an
//! [`ExtractionAdapter`]. [`ProfileScraper`] combines the two and is exposed
//! to callers through the [`ProfileSource`] trait.

pub mod adapter;
pub mod chromium;
pub mod error;
pub mod scraper;
pub mod session;
pub mod types;

pub use adapter::{ExtractionAdapter, XProfileAdapter};
pub use chromium::{ChromiumLauncher, ChromiumSettings};
pub use error::ScraperError;
pub use scraper::{ProfileScraper, ProfileSource, ScraperSettings};
pub use session::{BrowserLauncher, BrowserSession};
pub use types::{PostsOutcome, ProfileFields, ScrapedPost, ScrapedProfile};
