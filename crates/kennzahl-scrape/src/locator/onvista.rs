use super::{select_first, selector, sole_text, stripped_text, MetricLocator};
use crate::error::FieldNotFound;
use crate::schema::Metric;
use scraper::{ElementRef, Html};

const NAME_SELECTOR: &str = "h1.headline";
const PRICE_SELECTOR: &str = "span.price";
const CELL_SELECTOR: &str = "td";

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// onvista.de stock pages: https://www.onvista.de/aktien/{isin}
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reads the headline, the quote span and the key figure tables of an onvista.de
/// stock page.
///
/// Ratios are found by the first `<td>` whose sole text node contains the metric's label;
/// the value is the next `<td>` in the same row.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnvistaLocator;

impl MetricLocator for OnvistaLocator {
    fn name(&self, document: &Html) -> Result<String, FieldNotFound> {
        let headline = select_first(document, NAME_SELECTOR)?;
        Ok(stripped_text(&headline))
    }

    fn price(&self, document: &Html) -> Result<String, FieldNotFound> {
        let price = select_first(document, PRICE_SELECTOR)?;
        Ok(stripped_text(&price).replace(',', "."))
    }

    fn label(&self, metric: Metric) -> &str {
        match metric {
            Metric::Kgv => "KGV (aktuell)",
            Metric::Kbv => "KBV",
            Metric::Kuv => "KUV",
            Metric::Dividendenrendite => "Dividendenrendite",
            Metric::Eigenkapitalrendite => "Eigenkapitalrendite",
        }
    }

    fn metric(&self, document: &Html, metric: Metric) -> Result<String, FieldNotFound> {
        let label = self.label(metric);
        let cells = selector(CELL_SELECTOR)?;

        let label_cell = document
            .select(&cells)
            .find(|cell| sole_text(cell).is_some_and(|text| text.contains(label)))
            .ok_or_else(|| FieldNotFound(format!("{metric} label cell {label:?}")))?;

        let value_cell = label_cell
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|sibling| sibling.value().name() == CELL_SELECTOR)
            .ok_or_else(|| FieldNotFound(format!("{metric} value cell after {label:?}")))?;

        Ok(stripped_text(&value_cell))
    }
}
