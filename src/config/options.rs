// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub store: StoreOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Origin that relative page references resolve against.
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Upper bound on concurrent page fetches.
    pub workers: usize,
    pub pause_ms: u64,
    pub jitter_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
        }
    }
}

impl ScrapeOptions {
    /// No pauses between requests; for fixtures and tests.
    pub fn unthrottled(mut self) -> Self {
        self.pause_ms = 0;
        self.jitter_ms = 0;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub path: PathBuf,
    pub log_file: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(STORE_DIR).join(NETWORK_FILE),
            log_file: PathBuf::from(STORE_DIR).join(LOG_FILE),
        }
    }
}
