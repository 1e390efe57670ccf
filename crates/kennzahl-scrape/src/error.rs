use thiserror::Error;

/// Failure of a single GET attempt; the fetcher retries these and hands back the
/// last one once its attempts are spent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

impl TransportError {
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Request { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// A marker the locator looked for is missing from the document.
///
/// Never leaves the extractor; it is swapped for a sentinel value there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field not found: {0}")]
pub struct FieldNotFound(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    #[error("max_attempts must be at least 1")]
    NoAttempts,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("url template {0:?} has no {{isin}} placeholder")]
    MissingPlaceholder(String),

    #[error("user agent pool is empty")]
    EmptyUserAgentPool,
}

/// Failure to put a reqwest-backed fetcher together.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
