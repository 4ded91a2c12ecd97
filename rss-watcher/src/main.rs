use clap::Parser;
use interfaces::SqliteStorage;
use rss_watcher::{ChangeDetector, FetchConfig, OutputMode, StdoutHost, WatcherConfig};
use std::env;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Watch syndication feeds and report items not seen before.
#[derive(Debug, Parser)]
#[command(name = "rss-watcher", version)]
struct Cli {
    /// Feed URL to watch; repeat for several feeds
    #[arg(long = "feed", required = true)]
    feeds: Vec<String>,

    /// Space-separated keywords; items must mention at least one
    #[arg(long)]
    keywords: Option<String>,

    /// Report a single digest per tick or one notification per item
    #[arg(long, value_enum, default_value_t = OutputMode::Digest)]
    mode: OutputMode,

    /// Name scoping this watcher's stored history
    #[arg(long, default_value = "default")]
    watcher: String,

    /// Seconds between ticks
    #[arg(long, default_value_t = 1800)]
    interval_secs: u64,

    /// Run a single tick and exit
    #[arg(long)]
    once: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting RSS Watcher ({} feed(s), {:?} mode)", cli.feeds.len(), cli.mode);

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://rss-watcher.db".to_string());
    info!("Using history database: {} (watcher: {})", database_url, cli.watcher);

    let storage = SqliteStorage::new(&database_url, &cli.watcher).await.map_err(|e| {
        error!("Failed to open history database {}: {:#}", database_url, e);
        e
    })?;
    storage.setup_schema().await?;

    let mut config = WatcherConfig::new(cli.feeds)
        .with_mode(cli.mode)
        .with_fetch_config(FetchConfig {
            timeout_seconds: cli.timeout_secs,
            ..FetchConfig::default()
        });
    if let Some(keywords) = cli.keywords {
        config = config.with_keywords(keywords);
    }

    let detector = ChangeDetector::from_config(&config, storage)?;
    let host = StdoutHost::new();

    if cli.once {
        let delivered = detector.run_tick(&host).await?;
        info!("Delivered {} notification(s)", delivered);
        return Ok(());
    }

    // Ticks run back to back on this task, so they never overlap.
    let mut ticker = tokio::time::interval(Duration::from_secs(cli.interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match detector.run_tick(&host).await {
                    Ok(delivered) => info!("Tick finished, delivered {} notification(s)", delivered),
                    Err(e) => error!("Tick failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down RSS Watcher");
                break;
            }
        }
    }

    detector.storage().close().await;
    Ok(())
}
