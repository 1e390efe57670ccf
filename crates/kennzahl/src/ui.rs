use chrono::{DateTime, TimeZone};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use kennzahl_scrape::{FinancialSnapshot, Metric, MetricLocator, TransportError};
use std::fmt::Display;
use std::time::Duration;

const CARD_WIDTH: usize = 24;

/// Cards after Preis, in the order the quote page groups them.
const CARD_ORDER: [Metric; 5] = [
    Metric::Kgv,
    Metric::Dividendenrendite,
    Metric::Kbv,
    Metric::Kuv,
    Metric::Eigenkapitalrendite,
];

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn card(title: &str, value: &str) -> String {
    format!("  {} {}", format!("{title:<CARD_WIDTH$}").bold(), value)
}

/// Price first, then one card per extracted metric, then the timestamp.
pub fn snapshot_cards<Tz>(snapshot: &FinancialSnapshot, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = vec![format!("{}", snapshot.name.green().bold()), String::new()];
    lines.push(card("Preis", &format!("{} €", snapshot.price)));
    for metric in CARD_ORDER {
        if let Some(value) = snapshot.metric(metric) {
            lines.push(card(metric.key(), value));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{}",
        format!("Letzte Aktualisierung: {}", now.format("%d.%m.%Y %H:%M")).dimmed()
    ));
    lines.join("\n")
}

pub fn failure_report(e: &TransportError) -> String {
    [
        format!("{}", "Fehler beim Abruf der Daten:".red().bold()),
        format!("    {e}"),
        "Versuchen Sie es später erneut oder nutzen Sie eine VPN-Verbindung.".to_string(),
        String::new(),
        format!("{}", "Tipps für beste Ergebnisse:".bold()),
        "  1. Bei Blockierungen 1-2 Minuten warten".to_string(),
        "  2. VPN-Verbindung nutzen".to_string(),
        "  3. Alternative ISINs testen".to_string(),
    ]
    .join("\n")
}

pub fn metric_table<L: MetricLocator>(locator: &L) -> String {
    Metric::ALL
        .iter()
        .map(|&metric| card(metric.key(), &format!("{:?}", locator.label(metric))))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use kennzahl_scrape::OnvistaLocator;
    use std::collections::BTreeMap;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_snapshot_cards() {
        plain();
        let snapshot = FinancialSnapshot {
            name: "BASF SE".to_string(),
            price: "45.10".to_string(),
            metrics: BTreeMap::from([
                (Metric::Kgv, "12.3".to_string()),
                (Metric::Kbv, "N/A".to_string()),
            ]),
        };
        let now = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 9, 7, 0)
            .unwrap();

        let out = snapshot_cards(&snapshot, &now);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "BASF SE");
        assert_eq!(lines[2], format!("  {:<24} 45.10 €", "Preis"));
        assert_eq!(lines[3], format!("  {:<24} 12.3", "KGV"));
        assert_eq!(lines[4], format!("  {:<24} N/A", "KBV"));
        assert_eq!(lines.last(), Some(&"Letzte Aktualisierung: 05.03.2024 09:07"));
    }

    #[test]
    fn test_cards_follow_page_grouping() {
        plain();
        let snapshot = FinancialSnapshot {
            name: "BASF SE".to_string(),
            price: "45.10".to_string(),
            metrics: Metric::ALL
                .iter()
                .map(|&m| (m, format!("v-{}", m.key())))
                .collect(),
        };
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 0)
            .unwrap();

        let out = snapshot_cards(&snapshot, &now);
        let titles: Vec<_> = out
            .lines()
            .skip(2)
            .take(6)
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(
            titles,
            ["Preis", "KGV", "Dividendenrendite", "KBV", "KUV", "Eigenkapitalrendite"]
        );
    }

    #[test]
    fn test_failure_report_carries_cause() {
        plain();
        let e = TransportError::Status {
            url: "https://www.onvista.de/aktien/X".to_string(),
            status: 403,
        };
        let out = failure_report(&e);
        assert!(out.starts_with("Fehler beim Abruf der Daten:"));
        assert!(out.contains("HTTP 403 for https://www.onvista.de/aktien/X"));
        assert!(out.contains("VPN-Verbindung nutzen"));
    }

    #[test]
    fn test_metric_table_lists_labels() {
        plain();
        let out = metric_table(&OnvistaLocator);
        assert_eq!(out.lines().count(), Metric::ALL.len());
        assert!(out.contains("\"KGV (aktuell)\""));
    }
}
