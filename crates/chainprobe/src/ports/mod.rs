//! Trait seams between the verification engine and the outside world.

pub mod outbound;

pub use outbound::{ChainProbe, RegistryProvider, Reporter, SourceStore};
