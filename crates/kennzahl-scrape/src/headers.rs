use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

pub const CHROME_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
];

pub const ACCEPT_LANGUAGE_DE: &str = "de-DE,de;q=0.9";
pub const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const REFERER_GOOGLE: &str = "https://www.google.com/";

/// How the `User-Agent` header is chosen for each attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAgentPolicy {
    /// Uniform pick from the pool, re-rolled on every attempt.
    Rotate(Vec<String>),
    Fixed(String),
}

impl UserAgentPolicy {
    pub fn chrome() -> Self {
        Self::Rotate(CHROME_USER_AGENTS.iter().map(|ua| ua.to_string()).collect())
    }

    /// `None` only for an empty rotation pool, which config validation rejects.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        match self {
            Self::Rotate(pool) => pool.choose(rng).map(String::as_str),
            Self::Fixed(ua) => Some(ua.as_str()),
        }
    }
}

impl Default for UserAgentPolicy {
    fn default() -> Self {
        Self::chrome()
    }
}

/// The header set sent with a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserHeaders {
    pub user_agent: String,
    pub accept_language: String,
    pub accept: String,
    pub referer: String,
}

impl BrowserHeaders {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept_language: ACCEPT_LANGUAGE_DE.to_string(),
            accept: ACCEPT_HTML.to_string(),
            referer: REFERER_GOOGLE.to_string(),
        }
    }

    /// Values that aren't valid header text are skipped rather than sent mangled.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let pairs = [
            (USER_AGENT, &self.user_agent),
            (ACCEPT_LANGUAGE, &self.accept_language),
            (ACCEPT, &self.accept),
            (REFERER, &self.referer),
        ];
        for (name, value) in pairs {
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(e) => tracing::warn!("dropping header {name}: {e}"),
            }
        }
        headers
    }
}
