//! The expected-identity registry.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::error::RegistryError;
use crate::domain::source::ServiceName;

/// Registry entry for one service: the chain name its endpoints must report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub expected_network_name: String,
}

/// Lookup from service name to descriptor.
///
/// Keys are normalized to lowercase at construction and lookups lowercase
/// their argument, so the map is case-insensitive end to end. Configuration
/// file names are free-form, registry keys are PascalCase; neither side can
/// be trusted to agree on case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    services: HashMap<String, ServiceDescriptor>,
}

#[derive(Debug, Deserialize)]
struct RawService {
    #[serde(rename = "Configuration")]
    configuration: RawConfiguration,
}

#[derive(Debug, Deserialize)]
struct RawConfiguration {
    #[serde(rename = "NetworkName")]
    network_name: String,
}

impl Registry {
    /// Decodes the registry payload.
    ///
    /// The payload is a JSON object keyed by service name; every entry must
    /// carry `Configuration.NetworkName` and may carry anything else, which
    /// is ignored. Any shape violation is a [`RegistryError::Malformed`];
    /// the caller treats that as fatal because a partially decoded registry
    /// would silently skip endpoints.
    pub fn from_json(payload: &str) -> Result<Self, RegistryError> {
        let raw: HashMap<String, RawService> =
            serde_json::from_str(payload).map_err(|err| RegistryError::Malformed {
                reason: err.to_string(),
            })?;
        let services = raw
            .into_iter()
            .map(|(name, service)| {
                (
                    name.to_ascii_lowercase(),
                    ServiceDescriptor {
                        expected_network_name: service.configuration.network_name,
                    },
                )
            })
            .collect();
        Ok(Self { services })
    }

    /// Builds a registry from already-known entries, normalizing keys the
    /// same way the decoder does.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ServiceDescriptor)>,
    {
        let services = entries
            .into_iter()
            .map(|(name, descriptor)| (name.to_ascii_lowercase(), descriptor))
            .collect();
        Self { services }
    }

    /// Case-insensitive descriptor lookup.
    pub fn lookup(&self, service: &ServiceName) -> Option<&ServiceDescriptor> {
        self.get(service.as_str())
    }

    /// Case-insensitive lookup by raw key.
    pub fn get(&self, service: &str) -> Option<&ServiceDescriptor> {
        self.services.get(&service.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
