use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use hlscheck::{
    check::RetryPolicy, config::MonitorConfig, dispatch::Dispatcher, logging,
    logging::TracingSink,
};
use url::Url;

/// Continuously checks that every segment of a live HLS stream can be fetched
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the stream to check (master or variant playlist)
    #[arg(long, env = "HLSCHECK_URL")]
    url: String,

    /// Log file to append output to instead of stdout
    #[arg(long, env = "HLSCHECK_LOGFILE")]
    logfile: Option<PathBuf>,

    /// Milliseconds between playlist refreshes
    #[arg(long, env = "HLSCHECK_POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Attempts per segment before it is counted as failed
    #[arg(long, env = "HLSCHECK_RETRY_ATTEMPTS", default_value_t = RetryPolicy::DEFAULT_ATTEMPTS)]
    retry_attempts: u32,

    /// Milliseconds to wait between segment attempts
    #[arg(long, env = "HLSCHECK_RETRY_DELAY_MS", default_value_t = 250)]
    retry_delay_ms: u64,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "HLSCHECK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Largest response body to read, in bytes (unbounded when unset)
    #[arg(long, env = "HLSCHECK_MAX_BODY_BYTES")]
    max_body_bytes: Option<u64>,
}

impl Args {
    fn config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            retry: RetryPolicy::new(
                self.retry_attempts,
                Duration::from_millis(self.retry_delay_ms),
            ),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::subscriber::init(args.logfile.as_deref())?;

    let config = args.config();
    config.validate()?;

    let url = Url::parse(&args.url).with_context(|| format!("Invalid stream URL {}", args.url))?;
    let fetcher = Arc::new(config.http_client()?);

    tracing::info!("Starting HLS check of {}", url);

    let dispatcher = Dispatcher::new(config, fetcher, Arc::new(TracingSink));
    let monitors = dispatcher
        .start(&url)
        .await
        .context("Fetching playlist failed")?;

    wait_for_shutdown().await?;
    tracing::info!("Caught shutdown signal, stopping {} monitor(s)", monitors.len());

    for monitor in monitors {
        monitor.abort();
    }

    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
