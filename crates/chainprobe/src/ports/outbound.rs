//! Outbound ports.
//!
//! The engine only ever talks to these traits. Production adapters live in
//! [`crate::adapters`]; test doubles implement the same traits next to the
//! tests that use them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::{ProbeError, RegistryError, StoreError};
use crate::domain::extract::EndpointAddress;
use crate::domain::outcome::VerifyEvent;
use crate::domain::registry::Registry;
use crate::domain::source::ConfigSource;

/// Supplies the configuration sources for one pass.
pub trait SourceStore: Send + Sync {
    /// Returns every source the store knows about, already classified by
    /// network. Loading is fallible as a whole: an unreadable store aborts
    /// the pass, while problems inside a readable source are the engine's
    /// business.
    fn load_all(&self) -> Result<Vec<ConfigSource>, StoreError>;
}

/// Fetches the expected-identity registry.
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    /// One fetch per pass. Any failure here is fatal to the run.
    async fn fetch(&self) -> Result<Registry, RegistryError>;
}

/// Asks one endpoint which chain it serves.
#[async_trait]
pub trait ChainProbe: Send + Sync {
    /// Opens a connection to `endpoint`, issues a single identity query,
    /// and returns the chain name as the endpoint reports it.
    ///
    /// Implementations must bound the whole attempt with a wall-clock
    /// timeout and must tear the connection down whether or not the query
    /// succeeded. One attempt per call; retrying is not this layer's job.
    async fn chain_name(&self, endpoint: &EndpointAddress) -> Result<String, ProbeError>;
}

/// Consumes the ordered event stream of a pass.
///
/// A pure sink: implementations never influence control flow and should
/// return quickly so reporting does not back up reconciliation.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &VerifyEvent);
}

impl<T: Reporter + ?Sized> Reporter for Arc<T> {
    fn report(&self, event: &VerifyEvent) {
        (**self).report(event);
    }
}
