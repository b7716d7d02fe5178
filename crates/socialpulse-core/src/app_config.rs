use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub profile_base_url: String,
    pub browser_executable: Option<PathBuf>,
    pub browser_user_agent: String,
    pub scraper_wait_timeout_secs: u64,
    pub max_concurrent_sessions: usize,
    pub request_deadline_secs: u64,
    pub lexicon_path: Option<PathBuf>,
}

impl AppConfig {
    /// Returns the database URL, or an error for binaries that cannot run
    /// without one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` was not set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("profile_base_url", &self.profile_base_url)
            .field("browser_executable", &self.browser_executable)
            .field("browser_user_agent", &self.browser_user_agent)
            .field("scraper_wait_timeout_secs", &self.scraper_wait_timeout_secs)
            .field("max_concurrent_sessions", &self.max_concurrent_sessions)
            .field("request_deadline_secs", &self.request_deadline_secs)
            .field("lexicon_path", &self.lexicon_path)
            .finish()
    }
}
