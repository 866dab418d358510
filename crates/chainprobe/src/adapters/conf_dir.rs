//! Filesystem source store reading a directory of `.cfg` files.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::error::StoreError;
use crate::domain::network::Network;
use crate::domain::source::ConfigSource;
use crate::ports::outbound::SourceStore;

/// Extension admitted by the store.
const CONF_EXTENSION: &str = "cfg";

/// Reads every `<network>-<service>.cfg` file under one directory.
///
/// Files whose names carry no known network identifier are ignored; the
/// directory also holds frontend and unrelated load-balancer config that is
/// none of our business. Results come back sorted by file name so passes
/// are reproducible regardless of directory enumeration order.
pub struct ConfDirStore {
    dir: PathBuf,
}

impl ConfDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SourceStore for ConfDirStore {
    fn load_all(&self) -> Result<Vec<ConfigSource>, StoreError> {
        let read_dir_error = |err: std::io::Error| StoreError::ReadDir {
            path: self.dir.display().to_string(),
            reason: err.to_string(),
        };
        let entries = fs::read_dir(&self.dir).map_err(read_dir_error)?;

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry.map_err(read_dir_error)?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(CONF_EXTENSION) {
                continue;
            }
            let Some(file) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(network) = Network::classify(file) else {
                debug!(file, "no network identifier in file name, ignoring");
                continue;
            };
            let text = fs::read_to_string(&path).map_err(|err| StoreError::ReadFile {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
            sources.push(ConfigSource::new(network, file, text));
        }
        sources.sort_by(|a, b| a.file.cmp(&b.file));
        debug!(dir = %self.dir.display(), count = sources.len(), "sources loaded");
        Ok(sources)
    }
}
