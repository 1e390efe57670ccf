//! Site-specific knowledge of where fields sit in a quote page.
//!
//! A layout change on the source site means a new [`MetricLocator`], not changes
//! to the fetcher or extractor.

mod onvista;

pub use onvista::OnvistaLocator;

use crate::error::FieldNotFound;
use crate::schema::Metric;
use scraper::{ElementRef, Html, Node, Selector};

pub trait MetricLocator: Send + Sync {
    fn name(&self, document: &Html) -> Result<String, FieldNotFound>;

    /// Price as display text, already normalized to a decimal point.
    fn price(&self, document: &Html) -> Result<String, FieldNotFound>;

    /// Row label the site uses for `metric`.
    fn label(&self, metric: Metric) -> &str;

    fn metric(&self, document: &Html, metric: Metric) -> Result<String, FieldNotFound>;
}

/// Text of `element` with every text node trimmed and the pieces joined.
pub fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Text of `element` when it has exactly one child, followed down to a single
/// text node. Cells that wrap several nodes (a nested table, say) have none.
pub fn sole_text<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    let mut node = **element;
    loop {
        let mut children = node.children();
        let child = children.next()?;
        if children.next().is_some() {
            return None;
        }
        match child.value() {
            Node::Text(text) => return Some(&**text),
            Node::Element(_) => node = child,
            _ => return None,
        }
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, FieldNotFound> {
    Selector::parse(css).map_err(|e| FieldNotFound(format!("invalid selector {css:?}: {e:?}")))
}

/// First element matching `css`, in document order.
pub(crate) fn select_first<'a>(
    document: &'a Html,
    css: &str,
) -> Result<ElementRef<'a>, FieldNotFound> {
    let selector = selector(css)?;
    document
        .select(&selector)
        .next()
        .ok_or_else(|| FieldNotFound(css.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripped_text_joins_trimmed_nodes() {
        let html = Html::parse_fragment("<p>  12,34 <b> € </b>\n</p>");
        let p = select_first(&html, "p").unwrap();
        assert_eq!(stripped_text(&p), "12,34€");
    }

    #[test]
    fn test_sole_text_follows_single_child() {
        let html = Html::parse_fragment("<p><span><b> KUV </b></span></p>");
        let p = select_first(&html, "p").unwrap();
        assert_eq!(sole_text(&p), Some(" KUV "));
    }

    #[test]
    fn test_sole_text_none_for_several_children() {
        let html = Html::parse_fragment("<p>KBV <b>1.5</b></p><div></div>");
        assert_eq!(sole_text(&select_first(&html, "p").unwrap()), None);
        assert_eq!(sole_text(&select_first(&html, "div").unwrap()), None);
    }

    #[test]
    fn test_select_first_missing() {
        let html = Html::parse_document("<html><body></body></html>");
        let err = select_first(&html, "h1.headline").unwrap_err();
        assert_eq!(err, FieldNotFound("h1.headline".to_string()));
    }

    #[test]
    fn test_invalid_selector_is_field_not_found() {
        assert!(selector("td[").is_err());
    }
}
