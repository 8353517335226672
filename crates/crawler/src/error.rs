use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrawlError>;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Failed to fetch neighbors of {node}: {source}")]
    Fetch {
        node: String,
        #[source]
        source: FetchError,
    },

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Transport-level failure of a single neighbor lookup.
///
/// An error status, an empty body or a malformed body is not a `FetchError`; the body
/// reaches the decoder unchanged.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        Self::Transport(err.to_string())
    }
}
