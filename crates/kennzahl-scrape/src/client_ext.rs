use crate::config::FetchConfig;
use crate::error::TransportError;
use crate::headers::BrowserHeaders;
use crate::schema::RawDocument;
use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

/// One GET of an HTML page. Any non-2xx status is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_html(
        &self,
        url: &str,
        headers: &BrowserHeaders,
    ) -> Result<RawDocument, TransportError>;
}

/// Build the client used for quote pages: ambient proxies ignored, fixed timeout.
pub fn build_client(config: &FetchConfig) -> reqwest::Result<Client> {
    reqwest::ClientBuilder::new()
        .no_proxy()
        .timeout(config.timeout())
        .build()
}

/// Sends `headers` with the GET and reads the whole body as text.
#[async_trait]
impl Transport for Client {
    async fn get_html(
        &self,
        url: &str,
        headers: &BrowserHeaders,
    ) -> Result<RawDocument, TransportError> {
        let response = self
            .get(url)
            .headers(headers.to_header_map())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    url: url.to_string(),
                }
            } else {
                TransportError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        trace!("read {} bytes from {url}", body.len());

        Ok(RawDocument {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

fn classify(url: &str, e: reqwest::Error) -> TransportError {
    let url = url.to_string();
    if e.is_timeout() {
        TransportError::Timeout { url }
    } else if e.is_connect() {
        TransportError::Connect {
            url,
            message: e.to_string(),
        }
    } else {
        TransportError::Request {
            url,
            message: e.to_string(),
        }
    }
}
