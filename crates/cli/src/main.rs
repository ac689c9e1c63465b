use clap::Parser;
use serverwatch_api::AppState;
use serverwatch_domain::CliOverrides;
use serverwatch_jobs::{CacheMaintenanceJob, JobRunner};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "serverwatch")]
#[command(version)]
#[command(about = "Serverwatch - cached game server status API")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Server registry JSON path
    #[arg(long, value_name = "FILE")]
    servers: Option<String>,

    /// Settings JSON path (cache intervals)
    #[arg(long, value_name = "FILE")]
    settings: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.port,
        bind_address: cli.bind.clone(),
        servers_path: cli.servers.clone(),
        settings_path: cli.settings.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Serverwatch v{}", env!("CARGO_PKG_VERSION"));

    let adapters = di::Adapters::new(&config);
    let use_cases = di::UseCases::new(&config, &adapters);

    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_cache_maintenance(
            CacheMaintenanceJob::new(adapters.maintenance.clone())
                .with_interval(config.cache.sweep_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let app_state = AppState {
        server_status: use_cases.server_status,
        cache_stats: use_cases.cache_stats,
        manage_cache: use_cases.manage_cache,
        query_pool: adapters.query_pool.clone(),
        admin_key: config
            .server
            .admin_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(Arc::from),
    };

    if app_state.admin_key.is_none() {
        warn!("No admin key configured, admin routes are open");
    }

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.web_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    server::start_web_server(web_addr, app_state, shutdown.clone()).await?;

    shutdown.cancel();
    if tokio::time::timeout(DRAIN_TIMEOUT, adapters.query_pool.drain())
        .await
        .is_err()
    {
        warn!(
            timeout_secs = DRAIN_TIMEOUT.as_secs(),
            "Query pool did not drain in time"
        );
    }

    info!("Server shutdown complete");
    Ok(())
}
