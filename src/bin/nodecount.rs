//! Count active Stellar nodes by role

use anyhow::Result;
use clap::Parser;
use tracing::info;

use stellar_telemetry::api::StellarbeatClient;
use stellar_telemetry::models::Config;
use stellar_telemetry::node_count::{count_nodes, format_tally};
use stellar_telemetry::utils::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tally full validators, basic validators and watchers", long_about = None)]
struct Args {
    /// Stellarbeat endpoint returning `{ "nodes": [...] }`
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("stellar_telemetry=info,nodecount=info");

    let mut config = Config::from_env()?;
    if let Some(url) = args.url {
        config.stellarbeat_url = url;
    }

    info!("🌐 Reading nodes from {}", config.stellarbeat_url);
    let client = StellarbeatClient::new(&config)?;
    let nodes = client.get_nodes().await?;
    let tally = count_nodes(&nodes);

    println!("{}", format_tally(&tally));
    Ok(())
}
