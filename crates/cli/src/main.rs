use clap::Parser;
use std::sync::Arc;
use tinu_dns_domain::CliOverrides;
use tinu_dns_jobs::CacheMaintenanceJob;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "tinu-dns")]
#[command(version = "0.1.0")]
#[command(about = "Tinu DNS - iterative DNS resolver over UDP")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    log_file: Option<String>,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,

    /// Disable inbound rate limiting
    #[arg(long)]
    no_rate_limit: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dns_port: self.dns_port,
            bind_address: self.bind.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            no_cache: self.no_cache,
            no_rate_limit: self.no_rate_limit,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;

    if let Some(path) = cli.write_config.as_deref() {
        bootstrap::write_config(&config, path)?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    bootstrap::init_logging(&config.logging)?;

    info!("Starting Tinu DNS v{}", env!("CARGO_PKG_VERSION"));

    let listen_addr = config.listen_addr()?;
    let dns_services = di::DnsServices::new(&config);
    let socket = server::bind_udp_socket(listen_addr)?;

    let shutdown = CancellationToken::new();

    let purge_job = dns_services.cache.as_ref().map(|cache| {
        Arc::new(
            CacheMaintenanceJob::new(cache.clone())
                .with_interval(config.cache.purge_interval_secs)
                .with_cancellation(shutdown.clone()),
        )
        .start()
    });

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    server::run_dns_server(
        socket,
        dns_services.handler,
        config.server.max_in_flight,
        shutdown.clone(),
    )
    .await;

    shutdown.cancel();
    if let Some(job) = purge_job {
        if let Err(e) = job.await {
            error!(error = %e, "Cache purge job ended abnormally");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
