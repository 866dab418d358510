//! Error taxonomy for the verification pass.
//!
//! Per-source and per-address errors are converted into reported events at
//! their boundary; only [`VerifyError`] aborts a run. Variants carry plain
//! data so the domain stays free of transport library types.

use std::time::Duration;

/// A configuration line that does not follow the server grammar.
///
/// Scoped to one source. The extractor fails the whole source on the first
/// malformed line instead of silently skipping it: a line that stopped
/// parsing means the configuration format has drifted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line starts with the `server` token but has no address field.
    #[error("line {line}: server entry has no address field: `{content}`")]
    MissingAddress { line: usize, content: String },
    /// The address field has no `:port` suffix.
    #[error("line {line}: endpoint `{address}` is missing a `:port` suffix")]
    MissingPort { line: usize, address: String },
    /// The address field has nothing before the final `:`.
    #[error("line {line}: endpoint `{address}` has an empty host")]
    EmptyHost { line: usize, address: String },
    /// The port does not parse as a 16-bit integer.
    #[error("line {line}: endpoint `{address}` has an invalid port")]
    InvalidPort { line: usize, address: String },
}

/// A config file name that violates the `<network>-<service>.cfg` convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("config file `{file}` has no `-` separating network from service")]
    MissingSeparator { file: String },
    #[error("config file `{file}` has an empty service segment")]
    EmptyService { file: String },
}

/// Why one source was skipped. Carried by `VerifyEvent::SourceFailed`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failure to obtain the expected-identity registry.
///
/// Fatal to the entire run: with a partial registry, endpoints whose entry
/// went missing would be silently skipped instead of flagged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry fetch failed: {reason}")]
    Http { reason: String },
    #[error("registry fetch returned HTTP {status}")]
    Status { status: u16 },
    #[error("registry payload is not usable: {reason}")]
    Malformed { reason: String },
}

/// Why a single probe produced no chain name. Scoped to one address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The whole attempt (connect, request, response) exceeded its bound.
    #[error("no response within {timeout:?}")]
    Timeout { timeout: Duration },
    /// Connection, handshake, or transport failure.
    #[error("connection failed: {reason}")]
    Connect { reason: String },
    /// The endpoint closed the connection before answering.
    #[error("endpoint closed the connection before responding")]
    ConnectionClosed,
    /// The response was not a usable JSON-RPC frame.
    #[error("malformed rpc response: {reason}")]
    Protocol { reason: String },
    /// The endpoint answered with an explicit JSON-RPC error.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

/// Failure to read the configuration sources. Fatal at pass start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read config directory `{path}`: {reason}")]
    ReadDir { path: String, reason: String },
    #[error("cannot read config file `{path}`: {reason}")]
    ReadFile { path: String, reason: String },
}

/// The run-fatal union returned by the verifier.
///
/// Everything below a source boundary is reported, never propagated; these
/// two are the only failures that abort a pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
