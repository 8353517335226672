use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use levelcrawl_crawler::{CrawlConfig, Crawler, MAX_WORKERS_CAP};
use std::time::Duration;

mod report;

#[derive(Parser)]
#[command(name = "levelcrawl")]
#[command(about = "Level-synchronized parallel BFS over a remote neighbor service", long_about = None)]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Node to start the traversal from
    start: String,

    /// Number of expansion steps (integer; a negative value expands nothing)
    #[arg(value_parser = parse_depth)]
    depth: i64,

    /// Maximum concurrent workers per level (overrides LEVELCRAWL_MAX_WORKERS)
    #[arg(long)]
    workers: Option<usize>,

    /// Neighbor service base URL (overrides LEVELCRAWL_SERVICE_URL)
    #[arg(long)]
    service_url: Option<String>,

    /// Per-request timeout in milliseconds (overrides LEVELCRAWL_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging (request URLs and raw responses)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,

    /// Print the traversal as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn parse_depth(raw: &str) -> std::result::Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("Depth must be an integer, got '{raw}'"))
}

impl Cli {
    /// Expansion steps to run; a negative depth runs none and reports the start level only.
    fn steps(&self) -> usize {
        usize::try_from(self.depth).unwrap_or(0)
    }

    fn crawl_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::from_env().with_verbose(self.verbose);
        if let Some(url) = &self.service_url {
            config = config.with_service_url(url.clone());
        }
        if let Some(workers) = self.workers {
            config = config.with_max_workers(workers.clamp(1, MAX_WORKERS_CAP));
        }
        if let Some(ms) = self.timeout_ms.filter(|ms| *ms > 0) {
            config = config.with_request_timeout(Duration::from_millis(ms));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit with 1; help and version output exit with 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let usage_error = err.use_stderr();
            let _ = err.print();
            std::process::exit(if usage_error { 1 } else { 0 });
        }
    };

    let quiet = cli.quiet || cli.json;
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper internals are noisy at debug level
    if !cli.verbose {
        builder.filter_module("hyper_util", log::LevelFilter::Off);
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    if cli.depth < 0 {
        log::warn!("Negative depth {} expands nothing", cli.depth);
    }

    let crawler =
        Crawler::from_config(cli.crawl_config()).context("Failed to initialize crawler")?;
    let config = crawler.config();
    log::debug!(
        "service_url={} max_workers={} timeout={:?}",
        config.service_url,
        config.max_workers,
        config.request_timeout
    );

    let traversal = crawler.traverse(&cli.start, cli.steps()).await;
    log::info!(
        "Crawled {} nodes over {} levels",
        traversal.total_nodes(),
        traversal.depth() + 1
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&traversal)?);
    } else {
        print!("{}", report::render_text(&traversal));
    }

    Ok(())
}
