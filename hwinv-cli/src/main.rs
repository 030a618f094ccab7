mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use hwinv_core::{
    CommandExecutor, DiscoverHardwareOperation, DiscoverHardwareOperationRequest,
    LoadInventoryOperation, get_ip_address, set_ip_address,
};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "hwinv")]
#[command(about = "Discover and load cluster node hardware inventory")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe local hardware and store it under this node's key
    Discover {
        #[arg(long)]
        node_id: Option<String>,
    },
    /// Load the inventory of every discovered node and print it as JSON
    Load,
    /// Print the IP address recorded for a node
    GetIp {
        #[arg(long)]
        node_id: Option<String>,
    },
    /// Record the IP address of a node
    SetIp {
        #[arg(long)]
        node_id: Option<String>,
        ip_address: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwinv=info,hwinv_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        tracing::error!("{:#}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = Config::from_file(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config))?;
    let store = cfg
        .store_builder()
        .build()
        .await
        .context("failed to connect to the inventory store")?;

    match cli.command {
        Commands::Discover { node_id } => {
            let node_id = cfg.resolve_node_id(node_id)?;
            let executor = Arc::new(CommandExecutor::new(cfg.probe.command_timeout()));
            let operation = DiscoverHardwareOperation::new(store, executor, cfg.namespace.clone());

            let result = operation
                .run(DiscoverHardwareOperationRequest {
                    node_id: node_id.clone(),
                })
                .await
                .with_context(|| format!("hardware discovery failed for node {}", node_id))?;

            tracing::info!(
                "Discovered {} disks for node {} ({})",
                result.disks.len(),
                node_id,
                result.config_key
            );
        }
        Commands::Load => {
            let result = LoadInventoryOperation::new(store, cfg.namespace.clone())
                .with_policy(cfg.load_policy.clone())
                .run()
                .await
                .context("failed to load node inventory")?;

            println!("{}", serde_json::to_string_pretty(&result.nodes)?);
        }
        Commands::GetIp { node_id } => {
            let node_id = cfg.resolve_node_id(node_id)?;
            let ip_address = get_ip_address(store.as_ref(), &cfg.namespace, &node_id).await?;
            println!("{}", ip_address);
        }
        Commands::SetIp {
            node_id,
            ip_address,
        } => {
            let node_id = cfg.resolve_node_id(node_id)?;
            set_ip_address(store.as_ref(), &cfg.namespace, &node_id, &ip_address).await?;
        }
    }

    Ok(())
}
