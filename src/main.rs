//! Prowl main entry point
//!
//! Command-line interface for the product-link discovery crawler.

use anyhow::Context;
use clap::Parser;
use prowl::config::{load_config, Config};
use prowl::crawler::{DomainOutcome, DomainScheduler};
use prowl::fetcher::HttpFetcher;
use prowl::output::JsonlSink;
use prowl::seeds::load_seeds;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Prowl: a product-link discovery crawler
///
/// Crawls the seed domains concurrently, discovers product-page links, and
/// writes one JSONL file per domain into a timestamped run directory.
#[derive(Parser, Debug)]
#[command(name = "prowl")]
#[command(version)]
#[command(about = "A product-link discovery crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed-file path, overriding the configured one
    #[arg(long, value_name = "FILE")]
    seeds: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seeds, show what would be crawled, then exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let seed_path = cli
        .seeds
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.input.seed_file));

    // A missing or empty seed list is the one fatal startup condition.
    let seeds_by_domain = load_seeds(&seed_path)?;

    if cli.dry_run {
        handle_dry_run(&config, &seeds_by_domain);
        return Ok(());
    }

    run_crawl(config, seeds_by_domain).await
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("prowl=info,warn"),
            1 => EnvFilter::new("prowl=debug,info"),
            2 => EnvFilter::new("prowl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Shows the effective configuration and seed plan without crawling
fn handle_dry_run(
    config: &Config,
    seeds_by_domain: &std::collections::HashMap<String, Vec<url::Url>>,
) {
    println!("=== Prowl Dry Run ===\n");

    println!("Crawler:");
    println!("  Auto-scale: {}", config.crawler.auto_scale);
    println!(
        "  Max concurrency per domain: {}",
        config.crawler.max_concurrency_limit
    );
    println!(
        "  Concurrent domains: {}",
        config.crawler.domain_concurrency_limit
    );
    println!(
        "  Domain timeout: {}h, URL task timeout: {}s",
        config.crawler.domain_scraping_timeout_hours, config.crawler.url_task_timeout_seconds
    );
    println!(
        "  Product patterns: {:?}",
        config.crawler.product_url_patterns
    );

    println!("\nFetcher:");
    println!(
        "  Page fetch timeout: {}ms, retries: {}, backoff base: {}s",
        config.fetcher.page_fetch_timeout_ms,
        config.fetcher.max_fetch_retries,
        config.fetcher.retry_backoff_base_seconds
    );

    println!("\nSeed domains ({}):", seeds_by_domain.len());
    let mut domains: Vec<_> = seeds_by_domain.keys().collect();
    domains.sort();
    for domain in domains {
        println!("  - {} ({} seeds)", domain, seeds_by_domain[domain].len());
    }

    println!("\nOutput directory: {}", config.output.directory);
    println!("\n✓ Configuration is valid");
}

/// Runs the full crawl and prints the per-domain summary
async fn run_crawl(
    config: Config,
    seeds_by_domain: std::collections::HashMap<String, Vec<url::Url>>,
) -> anyhow::Result<()> {
    let run_dir = Path::new(&config.output.directory).join(format!(
        "results_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    tracing::info!("Writing results to {}", run_dir.display());

    let sink = JsonlSink::new(run_dir.clone()).context("failed to create output directory")?;

    // The fetch-session pool is shared by every domain; size it for the
    // worst case of all admitted domains running at their maximum budget.
    let pool_size = config.crawler.max_concurrency_limit * config.crawler.domain_concurrency_limit;
    let fetcher = HttpFetcher::new(config.fetcher.clone(), pool_size)
        .context("failed to build HTTP fetcher")?;

    let scheduler =
        DomainScheduler::new(config.crawler.clone(), Arc::new(fetcher), Arc::new(sink));

    let start = std::time::Instant::now();
    let reports = scheduler.run(seeds_by_domain).await;

    let mut total_products = 0usize;
    for report in &reports {
        match report.outcome {
            DomainOutcome::Completed => {
                tracing::info!(
                    "{}: {} pages, {} product links, {} abandoned",
                    report.domain,
                    report.pages_processed,
                    report.product_links_found,
                    report.abandoned_urls.len()
                );
            }
            DomainOutcome::TimedOut => {
                tracing::warn!("{}: timed out", report.domain);
            }
        }
        total_products += report.product_links_found;
    }

    tracing::info!(
        "Crawl finished: {} domains, {} product links in {:?}",
        reports.len(),
        total_products,
        start.elapsed()
    );

    Ok(())
}
