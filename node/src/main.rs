use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use weave_p2p::{
    BridgeActor, BridgeConfig, FirewallActor, HttpPeerManager, InProcessGossipMesh, PeerManager,
    ReqwestWireAdapter, StaticPeerManager, SubstringSignatureEngine, WireAdapter,
};

mod config;

use config::NodeConfig;

#[derive(Parser, Debug)]
#[command(name = "weave-node")]
#[command(about = "Transaction admission and gossip-bridge node", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Run with development defaults (genesis-bootstrap ledger writes allowed)
    #[arg(long)]
    dev: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local HTTP port peers use to reach us
    #[arg(long)]
    port: Option<u16>,

    /// External peer-list endpoint to poll on the get-more-peers timer
    #[arg(long)]
    peer_list_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        NodeConfig::from_file(path)?
    } else if args.dev {
        NodeConfig::development()
    } else {
        NodeConfig::default()
    };

    if let Some(port) = args.port {
        config.network.port = port;
    }

    init_logging(&config.operational);

    info!(port = config.network.port, "starting weave node");

    let signature_engine = match &config.firewall.signature_file {
        Some(path) => {
            info!(?path, "loading firewall signatures");
            Arc::new(SubstringSignatureEngine::load_from_file(path)?)
        }
        None => Arc::new(SubstringSignatureEngine::new(vec![])),
    };
    let firewall = FirewallActor::spawn(signature_engine);

    let gossip = Arc::new(InProcessGossipMesh::new());
    let wire: Arc<dyn WireAdapter> = Arc::new(ReqwestWireAdapter::new()?);

    let bridge_config = BridgeConfig {
        port: config.network.port,
        ..BridgeConfig::default()
    };
    let bridge = BridgeActor::spawn(bridge_config, gossip, firewall, wire.clone());

    for peer in config.seed_peer_endpoints() {
        bridge.add_peer_remote(peer);
    }

    let peer_manager: Arc<dyn PeerManager> = match &args.peer_list_endpoint {
        Some(endpoint) => Arc::new(HttpPeerManager::new(endpoint.clone())?),
        None => Arc::new(StaticPeerManager::new(vec![])),
    };

    tokio::spawn(weave_p2p::peer_maintainer::run(
        bridge.clone(),
        peer_manager,
        wire,
        weave_p2p::bridge::GET_MORE_PEERS_TIME,
    ));

    info!("node is running, press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, goodbye");

    Ok(())
}

fn init_logging(config: &config::OperationalConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone()));

    if config.structured_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
