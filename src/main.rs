mod directory;
mod enrich;
mod fetch;
mod model;
mod parser;

use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Client;
use tracing::error;

use model::LocationStub;
use parser::extract::SectionPolicy;

const LOG_FILE: &str = "pnr_scraper.log";

#[derive(Parser)]
#[command(name = "pnr_scraper", about = "TfGM park-and-ride details scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the directory page and list the location stubs
    List,
    /// Full pipeline: directory, then per-location detail enrichment
    Run {
        /// Max locations to enrich (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Concurrent detail-page fetches
        #[arg(long)]
        concurrency: Option<usize>,
        /// Fail a location when an expected section is missing
        /// (default: leave the field unset and continue)
        #[arg(long)]
        strict: bool,
        /// Sort output ascending by a capacity category
        #[arg(long)]
        sort: Option<SortKey>,
        /// Print records as JSON lines instead of flat summaries
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Spaces,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let client = fetch::build_client()?;

    match cli.command {
        Commands::List => {
            let stubs = fetch_directory(&client).await?;
            for stub in &stubs {
                println!("{}", stub);
            }
            println!("\n{} locations", stubs.len());
        }
        Commands::Run {
            limit,
            concurrency,
            strict,
            sort,
            json,
        } => {
            let mut stubs = fetch_directory(&client).await?;
            if let Some(limit) = limit {
                stubs.truncate(limit);
            }
            if stubs.is_empty() {
                return Ok(());
            }

            let policy = if strict {
                SectionPolicy::Strict
            } else {
                SectionPolicy::Lenient
            };

            println!("Enriching {} locations...", stubs.len());
            let outcome = enrich::enrich_all(&client, stubs, policy, concurrency).await?;

            let mut records = outcome.records;
            if let Some(SortKey::Spaces) = sort {
                model::sort_by_spaces(&mut records);
            }

            for record in &records {
                if json {
                    println!("{}", serde_json::to_string(record)?);
                } else {
                    println!("{}", record);
                }
            }

            let stats = outcome.stats;
            println!(
                "\nDone: {} fetched ({} enriched, {} failed) in {:.1}s",
                stats.total,
                stats.ok,
                stats.errors,
                t0.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}

/// Fetch and parse the directory page. Zero stubs is treated as a probable
/// upstream markup change and logged as an error, but the run still exits
/// cleanly with whatever was gathered.
async fn fetch_directory(client: &Client) -> Result<Vec<LocationStub>> {
    let html = fetch::fetch_with_retry(client, directory::DIRECTORY_URL).await?;
    let stubs = match directory::parse_directory(&html) {
        Ok(stubs) => stubs,
        Err(e) => {
            error!("{} on {}", e, directory::DIRECTORY_URL);
            Vec::new()
        }
    };
    if stubs.is_empty() {
        error!(
            "Failed to fetch park-and-ride locations from {}",
            directory::DIRECTORY_URL
        );
    }
    Ok(stubs)
}

/// Console logging plus an append-only run log file.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    guard
}
