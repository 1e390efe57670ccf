//! Quote page fetching with browser-like headers and exponential backoff.

use crate::backoff::{backoff_delay, Sleeper, TokioSleeper};
use crate::client_ext::{build_client, Transport};
use crate::config::FetchConfig;
use crate::error::{BuildError, TransportError};
use crate::headers::{BrowserHeaders, CHROME_USER_AGENTS};
use crate::schema::RawDocument;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use std::sync::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, error, trace, warn};

pub struct Fetcher<T = Client, S = TokioSleeper> {
    config: FetchConfig,
    transport: T,
    sleeper: S,
    rng: Mutex<StdRng>,
}

impl Fetcher {
    /// Validate `config` and build a reqwest-backed fetcher from it.
    pub fn new(config: FetchConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let client = build_client(&config)?;
        Ok(Self::with_parts(config, client, TokioSleeper))
    }
}

impl<T: Transport, S: Sleeper> Fetcher<T, S> {
    pub fn with_parts(config: FetchConfig, transport: T, sleeper: S) -> Self {
        Self {
            config,
            transport,
            sleeper,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the header RNG, e.g. with a seeded one to pin the User-Agent.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn next_headers(&self) -> BrowserHeaders {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let user_agent = self
            .config
            .user_agent
            .pick(&mut *rng)
            .unwrap_or(CHROME_USER_AGENTS[0]);
        BrowserHeaders::new(user_agent)
    }

    /// GET the quote page for `identifier`, retrying transient failures.
    ///
    /// Makes at most `max_attempts` requests, sleeping `backoff_base * 2^n` after
    /// failed attempt `n`. Returns the last error once the attempts are used up.
    pub async fn fetch(&self, identifier: &str) -> Result<RawDocument, TransportError> {
        let url = self.config.url_for(identifier);
        let max_attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            let headers = self.next_headers();
            trace!(
                "GET {url} (attempt {}/{max_attempts}) as {:?}",
                attempt + 1,
                headers.user_agent
            );

            match self.transport.get_html(&url, &headers).await {
                Ok(document) => {
                    debug!(
                        "[{identifier}] fetched {} bytes after {} attempt(s)",
                        document.body.len(),
                        attempt + 1
                    );
                    return Ok(document);
                }
                Err(e) if attempt + 1 >= max_attempts => {
                    error!("[{identifier}] giving up after {max_attempts} attempt(s): {e}");
                    return Err(e);
                }
                Err(e) => {
                    let delay = backoff_delay(self.config.backoff_base, attempt);
                    warn!(
                        "[{identifier}] attempt {} failed: {e}; retrying in {delay:?}",
                        attempt + 1
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// [`fetch`](Self::fetch) for callers without a runtime.
    ///
    /// Spins up a current-thread runtime. Called from inside a runtime it returns
    /// [`TransportError::Request`] without sending anything; use `fetch` there.
    pub fn fetch_blocking(&self, identifier: &str) -> Result<RawDocument, TransportError> {
        if Handle::try_current().is_ok() {
            return Err(TransportError::Request {
                url: self.config.url_for(identifier),
                message: "fetch_blocking called from inside a Tokio runtime".to_string(),
            });
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TransportError::Request {
                url: self.config.url_for(identifier),
                message: format!("failed to start runtime: {e}"),
            })?;
        runtime.block_on(self.fetch(identifier))
    }
}
