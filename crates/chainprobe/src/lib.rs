// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! Chainprobe - Verifies that fleet RPC endpoints serve the chain they claim.
//!
//! Load-balancer configuration declares which backends serve which network;
//! the services registry declares which chain each service must report. This
//! crate reconciles the two against live endpoints.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         VERIFIER                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐          ┌───────────────────┐             │
//! │  │ SourceStore  │          │ RegistryProvider  │             │
//! │  │ (conf dir)   │          │ (services JSON)   │             │
//! │  └──────┬───────┘          └─────────┬─────────┘             │
//! │         │  *.cfg bodies             │ expected chain names  │
//! │  ┌──────┴───────┐          ┌─────────┴─────────┐             │
//! │  │  extractor   │          │      lookup       │             │
//! │  │ server lines │          │ (case-insensitive)│             │
//! │  └──────┬───────┘          └─────────┬─────────┘             │
//! │         └──────────┬────────────────┘                       │
//! │                    │ (endpoint, expected)                   │
//! │          ┌─────────┴─────────┐                              │
//! │          │    ChainProbe     │  one system_chain call        │
//! │          │  (WebSocket RPC)  │  per endpoint, bounded        │
//! │          └─────────┬─────────┘                              │
//! │                    │ outcome stream, source order           │
//! │          ┌─────────┴─────────┐                              │
//! │          │     Reporter      │                              │
//! │          └───────────────────┘                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use chainprobe::{
//!     ConfDirStore, ConsoleReporter, HttpRegistry, Verifier, VerifierConfig, WsChainProbe,
//! };
//!
//! let config = VerifierConfig::default();
//! config.validate()?;
//! let verifier = Verifier::new(
//!     ConfDirStore::new(&config.conf_dir),
//!     HttpRegistry::new(&config.registry.url, config.registry.timeout),
//!     WsChainProbe::new(&config.probe.scheme, config.probe.timeout),
//!     ConsoleReporter::stdout(&config.probe.scheme, false),
//!     config,
//! );
//! let summary = verifier.run().await?;
//! ```
//!
//! # Failure policy
//!
//! - Registry or store failure aborts the pass with nothing probed
//! - A source that fails to parse is reported and skipped; siblings proceed
//! - An unreachable endpoint is an outcome, never an abort

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports for public API
pub use adapters::{ConfDirStore, ConsoleReporter, HttpRegistry, WsChainProbe};
pub use domain::config::{
    ConfigError, ProbeConfig, RegistryConfig, VerifierConfig, DEFAULT_CONF_DIR,
    DEFAULT_REGISTRY_URL,
};
pub use domain::error::{
    NameError, ParseError, ProbeError, RegistryError, SourceError, StoreError, VerifyError,
};
pub use domain::extract::{extract_addresses, EndpointAddress};
pub use domain::network::{Network, UnknownNetwork};
pub use domain::outcome::{ProbeOutcome, RunSummary, VerifyEvent};
pub use domain::registry::{Registry, ServiceDescriptor};
pub use domain::source::{ConfigSource, ServiceName};
pub use ports::outbound::{ChainProbe, RegistryProvider, Reporter, SourceStore};
pub use service::Verifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
