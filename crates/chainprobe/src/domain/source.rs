//! Configuration sources and the service-name convention.

use std::fmt;

use crate::domain::error::NameError;
use crate::domain::network::Network;

/// One load-balancer configuration file, read once at pass start and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Network the file was classified under.
    pub network: Network,
    /// Bare file name, e.g. `kusama-rpc-ibp.cfg`.
    pub file: String,
    /// Full file body.
    pub text: String,
}

impl ConfigSource {
    pub fn new(network: Network, file: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            network,
            file: file.into(),
            text: text.into(),
        }
    }

    /// Derives the registry lookup key for this source.
    pub fn service_name(&self) -> Result<ServiceName, NameError> {
        ServiceName::from_file_name(&self.file)
    }
}

/// Lowercase service identifier derived from a config file name.
///
/// File names follow `<network>-<service>.cfg`; the service segment is
/// everything after the first `-` with the `.cfg` suffix stripped. The
/// convention is enforced, not guessed: a violating name fails its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn from_file_name(file: &str) -> Result<Self, NameError> {
        let Some((_, rest)) = file.split_once('-') else {
            return Err(NameError::MissingSeparator {
                file: file.to_string(),
            });
        };
        let service = rest.strip_suffix(".cfg").unwrap_or(rest);
        if service.is_empty() {
            return Err(NameError::EmptyService {
                file: file.to_string(),
            });
        }
        Ok(Self(service.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
