use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Url};

/// Remote neighbor lookup: one request per node, no retry, no caching.
///
/// Returns the raw body of any completed exchange, whatever its status and whether or not
/// it parses.
#[async_trait]
pub trait NeighborSource: Send + Sync {
    async fn fetch(&self, node: &str) -> std::result::Result<String, FetchError>;
}

/// [`NeighborSource`] backed by an HTTP service at `<service_url>/<percent-encoded node>`.
///
/// The inner `reqwest::Client` is pooled and cheap to share across workers.
#[derive(Debug, Clone)]
pub struct HttpNeighborFetcher {
    client: Client,
    base_url: Url,
    verbose: bool,
}

impl HttpNeighborFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| CrawlError::Initialization(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            verbose: config.verbose,
        })
    }

    /// Request URL for `node`, appended as a single escaped path segment.
    pub fn request_url(&self, node: &str) -> std::result::Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(node);
        Ok(url)
    }
}

#[async_trait]
impl NeighborSource for HttpNeighborFetcher {
    async fn fetch(&self, node: &str) -> std::result::Result<String, FetchError> {
        let url = self.request_url(node)?;
        if self.verbose {
            debug!("Sending request to: {url}");
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        // The body of a non-2xx reply still goes to the decoder.
        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {status} from {url}");
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        if self.verbose {
            debug!("Response received for {node}: {body}");
        }
        Ok(body)
    }
}
