use crate::error::{CrawlError, Result};
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://hollywood-graph-crawler.bridgesuncc.org/neighbors/";
pub const DEFAULT_MAX_WORKERS: usize = 8;
pub const MAX_WORKERS_CAP: usize = 64;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_SERVICE_URL: &str = "LEVELCRAWL_SERVICE_URL";
const ENV_MAX_WORKERS: &str = "LEVELCRAWL_MAX_WORKERS";
const ENV_TIMEOUT_MS: &str = "LEVELCRAWL_TIMEOUT_MS";

/// Crawl settings handed to [`crate::Crawler`] and [`crate::HttpNeighborFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Base URL of the neighbor-lookup service; the node is appended as a path segment
    pub service_url: String,

    /// Upper bound on concurrent workers per level
    pub max_workers: usize,

    /// Per-request transport timeout
    pub request_timeout: Duration,

    pub user_agent: String,

    /// Log request URLs and raw responses at debug level
    pub verbose: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: format!("levelcrawl/{}", env!("CARGO_PKG_VERSION")),
            verbose: false,
        }
    }
}

impl CrawlConfig {
    /// Defaults overlaid with `LEVELCRAWL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_SERVICE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            config.service_url = url;
        }
        config.max_workers =
            parse_max_workers(lookup(ENV_MAX_WORKERS).as_deref(), DEFAULT_MAX_WORKERS);
        if let Some(ms) = lookup(ENV_TIMEOUT_MS)
            .as_deref()
            .map(str::trim)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            config.request_timeout = Duration::from_millis(ms);
        }
        config
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(CrawlError::InvalidConfig(
                "max_workers must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "request_timeout must be positive".to_string(),
            ));
        }
        self.base_url()?;
        Ok(())
    }

    /// Service URL parsed and normalized so that it can take one more path segment.
    pub(crate) fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.service_url).map_err(|e| {
            CrawlError::InvalidConfig(format!("service_url '{}': {e}", self.service_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(CrawlError::InvalidConfig(format!(
                "service_url '{}' cannot take a path",
                self.service_url
            )));
        }
        Ok(url)
    }
}

/// Parses a worker count, falling back to `default_value` on garbage and clamping to a sane range.
pub fn parse_max_workers(raw: Option<&str>, default_value: usize) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default_value)
        .clamp(1, MAX_WORKERS_CAP)
}
