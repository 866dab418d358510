//! Pure domain types and logic. No IO lives here; everything in this module
//! is testable without a network or a filesystem.

pub mod config;
pub mod error;
pub mod extract;
pub mod network;
pub mod outcome;
pub mod registry;
pub mod source;

pub use config::{ConfigError, ProbeConfig, RegistryConfig, VerifierConfig};
pub use error::{
    NameError, ParseError, ProbeError, RegistryError, SourceError, StoreError, VerifyError,
};
pub use extract::{extract_addresses, EndpointAddress};
pub use network::{Network, UnknownNetwork};
pub use outcome::{ProbeOutcome, RunSummary, VerifyEvent};
pub use registry::{Registry, ServiceDescriptor};
pub use source::{ConfigSource, ServiceName};
