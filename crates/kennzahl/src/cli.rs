use clap::{Args, Parser, Subcommand, ValueEnum};
use kennzahl_scrape::{FetchConfig, Metric, UserAgentPolicy};
use tracing::Level;

pub const DEFAULT_ISIN: &str = "DE000BASF111";
pub const ISIN_MAX_CHARS: usize = 12;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, global = true, ignore_case = true, default_value = "INFO")]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the onvista.de page of a security and show its key figures.
    Analyse(AnalyseArgs),

    /// List the metrics that can be extracted, with the row label matched on the page.
    Metrics,
}

#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// ISIN of the security, e.g. DE000BASF111
    #[arg(default_value = DEFAULT_ISIN, value_parser = parse_isin)]
    pub isin: String,

    /// Print the snapshot as JSON instead of cards.
    #[arg(long)]
    pub json: bool,

    /// Total attempts before giving up (overrides KENNZAHL_MAX_ATTEMPTS).
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Per-attempt timeout in seconds (overrides KENNZAHL_TIMEOUT_SECS).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Always send this User-Agent instead of rotating Chrome strings.
    #[arg(long)]
    pub fixed_user_agent: Option<String>,

    /// Comma separated metrics to extract; all of them when omitted.
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<Metric>,
}

impl AnalyseArgs {
    /// Lay command line overrides over the environment-derived config.
    pub fn apply(&self, config: &mut FetchConfig) {
        if let Some(attempts) = self.attempts {
            config.max_attempts = attempts;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(ua) = &self.fixed_user_agent {
            config.user_agent = UserAgentPolicy::Fixed(ua.clone());
        }
    }

    pub fn requested_metrics(&self) -> Vec<Metric> {
        if self.metrics.is_empty() {
            Metric::ALL.to_vec()
        } else {
            self.metrics.clone()
        }
    }
}

/// The scraper accepts any string; the length cap and empty check live here.
pub fn parse_isin(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Bitte eine ISIN eingeben!".to_string());
    }
    if s.chars().count() > ISIN_MAX_CHARS {
        return Err(format!(
            "ISIN darf höchstens {ISIN_MAX_CHARS} Zeichen lang sein"
        ));
    }
    Ok(s.to_string())
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<TraceLevel> for Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::WARN => Level::WARN,
            TraceLevel::ERROR => Level::ERROR,
        }
    }
}
