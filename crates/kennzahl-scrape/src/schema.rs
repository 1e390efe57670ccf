use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const NAME_SENTINEL: &str = "N/A";
pub const PRICE_SENTINEL: &str = "0.0";
pub const METRIC_SENTINEL: &str = "N/A";

pub const NAME_KEY: &str = "Name";
pub const PRICE_KEY: &str = "Price";

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Fetch output
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// The body of one successful GET, kept only until it has been extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub url: String,
    pub status: u16,
    pub body: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Extract output
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Valuation ratios read from the quote page's key figure tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    /// price-to-earnings
    #[serde(rename = "KGV")]
    Kgv,
    /// price-to-book
    #[serde(rename = "KBV")]
    Kbv,
    /// price-to-sales
    #[serde(rename = "KUV")]
    Kuv,
    Dividendenrendite,
    Eigenkapitalrendite,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Kgv,
        Metric::Kbv,
        Metric::Kuv,
        Metric::Dividendenrendite,
        Metric::Eigenkapitalrendite,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Kgv => "KGV",
            Metric::Kbv => "KBV",
            Metric::Kuv => "KUV",
            Metric::Dividendenrendite => "Dividendenrendite",
            Metric::Eigenkapitalrendite => "Eigenkapitalrendite",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = Metric::ALL.iter().map(|m| m.key()).collect();
                format!("unknown metric {s:?}, expected one of {}", known.join(", "))
            })
    }
}

/// Name, price and the requested ratios of one security, as display text.
///
/// Every requested metric has an entry; fields the page lacked hold a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSnapshot {
    pub name: String,
    pub price: String,
    pub metrics: BTreeMap<Metric, String>,
}

impl FinancialSnapshot {
    /// Look up a value by display key: `"Name"`, `"Price"` or a metric key like `"KGV"`.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            NAME_KEY => Some(self.name.as_str()),
            PRICE_KEY => Some(self.price.as_str()),
            _ => {
                let metric = key.parse::<Metric>().ok()?;
                self.metrics.get(&metric).map(String::as_str)
            }
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<&str> {
        self.metrics.get(&metric).map(String::as_str)
    }

    /// Name and Price first, then metrics in [`Metric`] order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![(NAME_KEY, self.name.as_str()), (PRICE_KEY, self.price.as_str())];
        entries.extend(self.metrics.iter().map(|(m, v)| (m.key(), v.as_str())));
        entries
    }

    pub fn metrics_by_key(&self) -> BTreeMap<&'static str, &str> {
        self.metrics
            .iter()
            .map(|(m, v)| (m.key(), v.as_str()))
            .collect()
    }

    /// True when no field was found at all, usually a blocked or redesigned page.
    pub fn is_empty(&self) -> bool {
        self.name == NAME_SENTINEL
            && self.price == PRICE_SENTINEL
            && self.metrics.values().all(|v| v == METRIC_SENTINEL)
    }
}
