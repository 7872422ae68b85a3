use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gbooks_zotero::config::{find_config_file, load_config, Config};
use gbooks_zotero::harvest::{BatchRunner, Paginator, RunConfig};
use gbooks_zotero::models::load_author_list;
use gbooks_zotero::source::GoogleBooksClient;
use gbooks_zotero::zotero::export_dir;

/// Harvest Google Books metadata for an author list and export Zotero CSV
#[derive(Parser, Debug)]
#[command(name = "gbooks-zotero")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Harvest Google Books metadata and export Zotero-compatible CSV", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch all volumes for every author in a list and persist one
    /// consolidated artifact per author
    #[command(alias = "h")]
    Harvest {
        /// Author list document (SPARQL SELECT results in JSON form)
        input: PathBuf,

        /// Output directory for artifacts, run log and summary
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Page size for pagination requests
        #[arg(long)]
        page_size: Option<u32>,

        /// Delay between page requests in milliseconds
        #[arg(long)]
        page_delay_ms: Option<u64>,

        /// Delay between authors in seconds
        #[arg(long)]
        author_delay_secs: Option<u64>,
    },

    /// Classify the items of harvested artifacts and export the
    /// matches / non-matches CSVs
    #[command(alias = "e")]
    Export {
        /// Directory containing consolidated artifacts
        input: PathBuf,

        /// Output CSV for author matches
        #[arg(long)]
        matches: Option<PathBuf>,

        /// Output CSV for included non-matches
        #[arg(long)]
        non_matches: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("gbooks_zotero={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("using config file: {}", config_path.display());
        load_config(&config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Harvest {
            input,
            output,
            page_size,
            page_delay_ms,
            author_delay_secs,
        } => {
            // Fail closed before any network activity.
            let api_key = config.require_api_key()?.to_string();

            let run_config = RunConfig {
                page_size: page_size.unwrap_or(config.harvest.page_size),
                page_delay_ms: page_delay_ms.unwrap_or(config.harvest.page_delay_ms),
                author_delay_secs: author_delay_secs.unwrap_or(config.harvest.author_delay_secs),
            };
            let out_dir = output.unwrap_or_else(|| config.harvest.output_dir.clone());

            let authors = load_author_list(&input)
                .with_context(|| format!("failed to load author list {}", input.display()))?;
            tracing::info!(authors = authors.len(), "loaded author list");

            let client = GoogleBooksClient::new(api_key)?;
            let paginator = Paginator::new(
                client,
                run_config.page_size,
                Duration::from_millis(run_config.page_delay_ms),
            );
            let runner = BatchRunner::new(paginator, run_config);

            let summary = runner.run(&authors, &out_dir).await?;

            println!(
                "Processed {} authors ({} with results, {} items fetched, {} persistence failures)",
                summary.authors_processed.len(),
                summary.authors_with_results(),
                summary.total_items_fetched(),
                summary.persistence_failures(),
            );
        }

        Commands::Export {
            input,
            matches,
            non_matches,
        } => {
            let matches_path = matches.unwrap_or_else(|| config.export.matches_file.clone());
            let non_matches_path =
                non_matches.unwrap_or_else(|| config.export.non_matches_file.clone());

            let outcome = export_dir(&input, &matches_path, &non_matches_path)?;

            println!(
                "Exported {} matches and {} non-matches from {} files ({} excluded)",
                outcome.matches,
                outcome.non_matches,
                outcome.files_processed,
                outcome.excluded,
            );
            println!("Matches: {}", matches_path.display());
            println!("Non-matches: {}", non_matches_path.display());
        }
    }

    Ok(())
}
