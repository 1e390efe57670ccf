use anyhow::Result;
use clap::Parser;
use cli::{AnalyseArgs, Cli, Commands::*};
use dotenv::dotenv;
use kennzahl_scrape::{self as scrape, Extractor, FetchConfig, Fetcher, OnvistaLocator};
use tracing::{debug, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod ui;

fn preprocess(trace_level: Level) -> Result<()> {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    preprocess(cli.trace.into())?;
    trace!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> kennzahl <COMMAND>"
    match &cli.command {
        // "> kennzahl analyse [ISIN] [--json]"
        Analyse(args) => {
            if !analyse(args).await? {
                std::process::exit(1);
            }
        }

        // "> kennzahl metrics"
        Metrics => println!("{}", ui::metric_table(&OnvistaLocator)),
    }

    Ok(())
}

/// Returns `false` when the page could not be fetched; the report is already printed.
async fn analyse(args: &AnalyseArgs) -> Result<bool> {
    let mut config = FetchConfig::from_env()?;
    args.apply(&mut config);
    debug!("Fetch config: {config:?}");

    let fetcher = Fetcher::new(config)?;
    let extractor = Extractor::new().with_metrics(&args.requested_metrics());

    let pb = ui::spinner("Daten werden über Chrome-Request abgerufen...");
    let result = scrape::scrape(&fetcher, &extractor, &args.isin).await;
    pb.finish_and_clear();

    match result {
        Ok(snapshot) if args.json => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Ok(snapshot) => {
            println!("{}", ui::snapshot_cards(&snapshot, &chrono::Local::now()));
        }
        Err(e) => {
            eprintln!("{}", ui::failure_report(&e));
            return Ok(false);
        }
    }

    Ok(true)
}
