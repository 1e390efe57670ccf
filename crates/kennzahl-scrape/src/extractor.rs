//! Turns a quote page into a [`FinancialSnapshot`].
//!
//! Extraction never fails: a missing field is logged and replaced by its sentinel.

use crate::error::FieldNotFound;
use crate::locator::{MetricLocator, OnvistaLocator};
use crate::schema::{
    FinancialSnapshot, Metric, RawDocument, METRIC_SENTINEL, NAME_SENTINEL, PRICE_SENTINEL,
};
use scraper::Html;
use tracing::debug;

pub struct Extractor<L = OnvistaLocator> {
    locator: L,
    metrics: Vec<Metric>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::with_locator(OnvistaLocator)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: MetricLocator> Extractor<L> {
    /// Extracts every [`Metric`] unless narrowed with [`with_metrics`](Self::with_metrics).
    pub fn with_locator(locator: L) -> Self {
        Self {
            locator,
            metrics: Metric::ALL.to_vec(),
        }
    }

    /// Restrict the snapshot to `metrics`. Duplicates collapse to one entry.
    pub fn with_metrics(mut self, metrics: &[Metric]) -> Self {
        self.metrics = metrics.to_vec();
        self
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    pub fn extract(&self, html: &str) -> FinancialSnapshot {
        let document = Html::parse_document(html);

        let name = recover(self.locator.name(&document), NAME_SENTINEL);
        let price = recover(self.locator.price(&document), PRICE_SENTINEL);
        let metrics = self
            .metrics
            .iter()
            .map(|&metric| {
                let value = recover(self.locator.metric(&document, metric), METRIC_SENTINEL);
                (metric, value)
            })
            .collect();

        FinancialSnapshot {
            name,
            price,
            metrics,
        }
    }

    pub fn extract_document(&self, document: &RawDocument) -> FinancialSnapshot {
        let snapshot = self.extract(&document.body);
        if snapshot.is_empty() {
            debug!("no fields found in {}; page layout may have changed", document.url);
        }
        snapshot
    }
}

fn recover(result: Result<String, FieldNotFound>, sentinel: &str) -> String {
    result.unwrap_or_else(|e| {
        debug!("{e}; using {sentinel:?}");
        sentinel.to_string()
    })
}
