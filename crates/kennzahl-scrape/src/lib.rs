//! Fetch an onvista.de quote page by ISIN and read name, price and valuation
//! ratios out of it.
//!
//! ```text
//! ISIN → Fetcher (browser headers, retry + backoff) → RawDocument
//!      → Extractor (MetricLocator) → FinancialSnapshot
//! ```
//!
//! ```ignore
//! let fetcher = Fetcher::new(FetchConfig::from_env()?)?;
//! let snapshot = kennzahl_scrape::scrape(&fetcher, &Extractor::new(), "DE000BASF111").await?;
//! println!("{} {}", snapshot.name, snapshot.price);
//! ```

pub mod backoff;
pub mod client_ext;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod headers;
pub mod locator;
pub mod schema;

pub use backoff::{Sleeper, TokioSleeper};
pub use client_ext::Transport;
pub use config::FetchConfig;
pub use error::{BuildError, ConfigError, FieldNotFound, TransportError};
pub use extractor::Extractor;
pub use fetcher::Fetcher;
pub use headers::{BrowserHeaders, UserAgentPolicy};
pub use locator::{MetricLocator, OnvistaLocator};
pub use schema::{FinancialSnapshot, Metric, RawDocument};

/// Fetch the page for `identifier` and extract it.
///
/// Only transport failures escape; missing fields come back as sentinels.
pub async fn scrape<T, S, L>(
    fetcher: &Fetcher<T, S>,
    extractor: &Extractor<L>,
    identifier: &str,
) -> Result<FinancialSnapshot, TransportError>
where
    T: Transport,
    S: Sleeper,
    L: MetricLocator,
{
    let document = fetcher.fetch(identifier).await?;
    Ok(extractor.extract_document(&document))
}

/// Blocking [`scrape`]; inside a Tokio runtime it returns an error, see [`Fetcher::fetch_blocking`].
pub fn scrape_blocking<T, S, L>(
    fetcher: &Fetcher<T, S>,
    extractor: &Extractor<L>,
    identifier: &str,
) -> Result<FinancialSnapshot, TransportError>
where
    T: Transport,
    S: Sleeper,
    L: MetricLocator,
{
    let document = fetcher.fetch_blocking(identifier)?;
    Ok(extractor.extract_document(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::{page, unavailable, RecordingSleeper, ScriptedTransport};
    use std::time::Duration;

    const URL: &str = "https://www.onvista.de/aktien/DE000BASF111";
    const HTML: &str = r#"<html><body>
        <h1 class="headline">BASF SE</h1>
        <span class="price">45,10</span>
        <table><tr><td>KBV</td><td>1.1</td></tr></table>
    </body></html>"#;

    fn fetcher(
        results: Vec<Result<RawDocument, TransportError>>,
    ) -> Fetcher<ScriptedTransport, RecordingSleeper> {
        Fetcher::with_parts(
            FetchConfig::default(),
            ScriptedTransport::new(results),
            RecordingSleeper::default(),
        )
    }

    #[tokio::test]
    async fn test_scrape_after_retry() {
        let fetcher = fetcher(vec![Err(unavailable(URL)), Ok(page(URL, HTML))]);
        let snapshot = scrape(&fetcher, &Extractor::new(), "DE000BASF111")
            .await
            .unwrap();
        assert_eq!(snapshot.name, "BASF SE");
        assert_eq!(snapshot.price, "45.10");
        assert_eq!(snapshot.get("KBV"), Some("1.1"));
        assert_eq!(snapshot.get("KGV"), Some("N/A"));
    }

    #[tokio::test]
    async fn test_scrape_surfaces_transport_error() {
        let fetcher = fetcher(vec![]);
        let err = scrape(&fetcher, &Extractor::new(), "DE000BASF111")
            .await
            .unwrap_err();
        assert_eq!(err, unavailable(URL));
        assert_eq!(fetcher.transport().calls(), 3);
    }

    #[test]
    fn test_scrape_blocking() {
        let sleeper = RecordingSleeper::default();
        let fetcher = Fetcher::with_parts(
            FetchConfig::default(),
            ScriptedTransport::new(vec![
                Err(unavailable(URL)),
                Err(unavailable(URL)),
                Ok(page(URL, HTML)),
            ]),
            sleeper.clone(),
        );
        let snapshot = scrape_blocking(&fetcher, &Extractor::new(), "DE000BASF111").unwrap();
        assert_eq!(snapshot.name, "BASF SE");
        assert_eq!(sleeper.total(), Duration::from_secs(3));
    }
}
