use clap::Parser;
use dnsfwd_domain::CliOverrides;
use dnsfwd_jobs::{CacheSweepJob, JobRunner, TransactionExpiryJob};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "dnsfwd")]
#[command(version)]
#[command(about = "Caching DNS forwarder over UDP")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (IP, IP:PORT or udp://IP:PORT)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            port: self.port,
            bind_address: self.bind.clone(),
            upstream: self.upstream.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting dnsfwd v{}", env!("CARGO_PKG_VERSION"));

    let services = di::ForwarderServices::new(&config).await?;
    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new()
        .with_transaction_expiry(TransactionExpiryJob::new(services.engine.clone()))
        .with_shutdown_token(shutdown.clone());
    if let Some(sweep) = &services.cache_sweep {
        jobs = jobs.with_cache_sweep(
            CacheSweepJob::new(sweep.clone()).with_interval(config.cache.sweep_interval_secs),
        );
    }
    jobs.start().await;

    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            return;
        }
        info!("Shutdown requested");
        ctrl_c_token.cancel();
    });

    let bind_addr: SocketAddr = config.server.listen_addr().parse()?;
    server::start_dns_server(bind_addr, &services, shutdown).await?;

    if let Some(cache_stats) = &services.cache_stats {
        let stats = cache_stats.execute();
        info!(
            entries = stats.entries,
            hits = stats.hits,
            misses = stats.misses,
            insertions = stats.insertions,
            evictions = stats.evictions,
            hit_rate = stats.hit_rate,
            "Final cache statistics"
        );
    }

    info!("Server shutdown complete");
    Ok(())
}
