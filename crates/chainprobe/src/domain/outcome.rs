//! Probe outcomes, reporter events, and pass accounting.

use std::fmt;

use crate::domain::error::{ProbeError, SourceError};
use crate::domain::extract::EndpointAddress;
use crate::domain::network::Network;
use crate::domain::source::ServiceName;

/// Terminal result of probing one endpoint. Never retried, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint reported exactly the expected chain name.
    Match { observed: String },
    /// The endpoint answered with a different chain name.
    Mismatch { expected: String, observed: String },
    /// The probe could not complete.
    ConnectionFailed { error: ProbeError },
}

impl ProbeOutcome {
    /// Classifies one probe observation against the expected chain name.
    ///
    /// Comparison is exact and case-sensitive; no normalization rule exists
    /// upstream, so none is applied here.
    pub fn classify(expected: &str, observation: Result<String, ProbeError>) -> Self {
        match observation {
            Ok(observed) if observed == expected => ProbeOutcome::Match { observed },
            Ok(observed) => ProbeOutcome::Mismatch {
                expected: expected.to_string(),
                observed,
            },
            Err(error) => ProbeOutcome::ConnectionFailed { error },
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Match { .. })
    }
}

/// One entry in the ordered event stream consumed by a reporter.
///
/// Events arrive in (network, source, address) order regardless of how
/// probes were scheduled internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyEvent {
    /// A network's sources are about to be processed.
    NetworkStarted { network: Network },
    /// A source has no registry entry; it was skipped without probing.
    NoConfiguration {
        network: Network,
        file: String,
        service: ServiceName,
    },
    /// A source was skipped because its name or body does not parse.
    SourceFailed {
        network: Network,
        file: String,
        error: SourceError,
    },
    /// One endpoint was probed.
    Endpoint {
        network: Network,
        file: String,
        endpoint: EndpointAddress,
        outcome: ProbeOutcome,
    },
}

/// Counters for one verification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: usize,
    pub skipped_sources: usize,
    pub endpoints: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub connection_failures: usize,
}

impl RunSummary {
    pub fn record_outcome(&mut self, outcome: &ProbeOutcome) {
        self.endpoints += 1;
        match outcome {
            ProbeOutcome::Match { .. } => self.matches += 1,
            ProbeOutcome::Mismatch { .. } => self.mismatches += 1,
            ProbeOutcome::ConnectionFailed { .. } => self.connection_failures += 1,
        }
    }

    /// True when every endpoint matched and nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.mismatches == 0 && self.connection_failures == 0 && self.skipped_sources == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} endpoints across {} sources: {} match, {} mismatch, {} unreachable, {} sources skipped",
            self.endpoints,
            self.sources,
            self.matches,
            self.mismatches,
            self.connection_failures,
            self.skipped_sources
        )
    }
}
