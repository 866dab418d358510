//! Chainprobe: checks every fleet RPC endpoint against the services registry.
//!
//! Reads the load-balancer `.cfg` files from a configuration directory,
//! fetches the expected chain name for each service from the registry, then
//! asks every backend over WebSocket which chain it actually serves.
//!
//! ## Usage
//!
//! ```bash
//! # Verify the whole fleet with defaults
//! chainprobe
//!
//! # One network, matches reported too, generous probe timeout
//! chainprobe --network westend --show-matches --probe-timeout-secs 30
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chainprobe::{
    ConfDirStore, ConsoleReporter, HttpRegistry, Network, ProbeConfig, RegistryConfig, Verifier,
    VerifierConfig, WsChainProbe, DEFAULT_CONF_DIR, DEFAULT_REGISTRY_URL,
};

/// Verifies fleet RPC endpoints against the services registry
#[derive(Parser, Debug)]
#[command(name = "chainprobe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the load-balancer `.cfg` files
    #[arg(long, default_value = DEFAULT_CONF_DIR)]
    conf_dir: PathBuf,

    /// Services registry URL
    #[arg(long, default_value = DEFAULT_REGISTRY_URL)]
    registry_url: String,

    /// WebSocket scheme for probes, `ws` or `wss`
    #[arg(long, default_value = "ws")]
    scheme: String,

    /// Wall-clock bound for one probe attempt, in seconds
    #[arg(long, default_value = "10")]
    probe_timeout_secs: u64,

    /// Bound for the registry fetch, in seconds
    #[arg(long, default_value = "10")]
    registry_timeout_secs: u64,

    /// Probes in flight at once within one source
    #[arg(long, default_value = "8")]
    concurrency: usize,

    /// Verify only this network; may be repeated
    #[arg(long = "network")]
    networks: Vec<Network>,

    /// Report matching endpoints too, not only problems
    #[arg(long)]
    show_matches: bool,
}

impl Args {
    fn into_config(self) -> (VerifierConfig, Vec<Network>, bool) {
        let config = VerifierConfig {
            conf_dir: self.conf_dir,
            registry: RegistryConfig {
                url: self.registry_url,
                timeout: Duration::from_secs(self.registry_timeout_secs),
            },
            probe: ProbeConfig {
                scheme: self.scheme,
                timeout: Duration::from_secs(self.probe_timeout_secs),
                concurrency: self.concurrency,
            },
        };
        (config, self.networks, self.show_matches)
    }
}

/// `RUST_LOG` wins; the fallback keeps WebSocket handshake noise below the
/// report lines.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,tungstenite=warn,tokio_tungstenite=warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let (config, networks, show_matches) = args.into_config();
    config.validate().context("invalid configuration")?;

    let store = ConfDirStore::new(&config.conf_dir);
    let registry = HttpRegistry::new(&config.registry.url, config.registry.timeout);
    let probe = WsChainProbe::new(&config.probe.scheme, config.probe.timeout);
    let reporter = ConsoleReporter::stdout(&config.probe.scheme, show_matches);

    let mut verifier = Verifier::new(store, registry, probe, reporter, config);
    if !networks.is_empty() {
        verifier = verifier.with_networks(&networks);
    }

    let summary = verifier.run().await.context("verification pass failed")?;
    info!(%summary, clean = summary.is_clean(), "done");
    Ok(())
}
