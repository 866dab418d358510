//! Verifier configuration with validation.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default location of the load-balancer configuration directory.
pub const DEFAULT_CONF_DIR: &str = "/opt/haproxy-3.0.2/etc/conf/";

/// Default URL of the services registry.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/ibp-network/config/main/services_rpc.json";

/// Top-level configuration for one verification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Directory holding the `.cfg` sources.
    pub conf_dir: PathBuf,
    /// Registry fetch settings.
    pub registry: RegistryConfig,
    /// Probe settings.
    pub probe: ProbeConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            conf_dir: PathBuf::from(DEFAULT_CONF_DIR),
            registry: RegistryConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl VerifierConfig {
    /// Validate configuration before a pass starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conf_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfDir);
        }
        self.registry.validate()?;
        self.probe.validate()
    }
}

/// Registry fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry URL.
    pub url: String,
    /// Bound for the whole fetch, connect through body.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RegistryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::InvalidUrl("url cannot be empty".into()));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(format!(
                "`{}` is not an http(s) url",
                self.url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "registry timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Connection scheme, `ws` or `wss`.
    pub scheme: String,
    /// Wall-clock bound for one probe attempt. An unreachable endpoint
    /// costs at most this long.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Probes in flight at once within one source; 1 probes sequentially.
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            scheme: "ws".to_string(),
            timeout: Duration::from_secs(10),
            concurrency: 8,
        }
    }
}

impl ProbeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.scheme != "ws" && self.scheme != "wss" {
            return Err(ConfigError::InvalidScheme(self.scheme.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "probe timeout cannot be 0".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("config directory path cannot be empty")]
    InvalidConfDir,
    #[error("invalid registry url: {0}")]
    InvalidUrl(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("unsupported probe scheme `{0}` (expected ws or wss)")]
    InvalidScheme(String),
    #[error("probe concurrency cannot be 0")]
    InvalidConcurrency,
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // `ms` must be tried before the bare `s` suffix.
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| "invalid minutes")
        } else {
            // Plain number means seconds.
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
