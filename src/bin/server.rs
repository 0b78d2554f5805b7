use std::net::IpAddr;

use clap::Parser;
use tracing::error;

use uno_net::config::{ServerConfig, DEFAULT_PORT};
use uno_net::server;
use uno_net::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "uno-server")]
#[command(about = "Authoritative UNO table server")]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Shuffle seed, for reproducible matches
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let config = ServerConfig {
        bind_addr: args.bind,
        port: args.port,
        seed: args.seed,
        ..ServerConfig::default()
    };

    if let Err(e) = server::serve(config).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
    Ok(())
}
