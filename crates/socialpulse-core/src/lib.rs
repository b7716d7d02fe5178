//! Shared data model and configuration for SocialPulse.

pub mod app_config;
pub mod config;
pub mod profile;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{
    Polarity, PostRecord, PostsStatus, ProfileSnapshot, SentimentSummary, MAX_POSTS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
