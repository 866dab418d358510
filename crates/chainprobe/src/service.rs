//! The reconciliation engine driving one verification pass.

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::domain::config::VerifierConfig;
use crate::domain::error::{SourceError, VerifyError};
use crate::domain::extract::extract_addresses;
use crate::domain::network::Network;
use crate::domain::outcome::{ProbeOutcome, RunSummary, VerifyEvent};
use crate::domain::registry::Registry;
use crate::domain::source::ConfigSource;
use crate::ports::outbound::{ChainProbe, RegistryProvider, Reporter, SourceStore};

/// Drives one full pass: registry fetch, source enumeration, probing,
/// classification, event emission.
///
/// Generic over its ports so the pipeline runs identically against the
/// production adapters and test doubles. Failures below a source boundary
/// become events; only registry and store failures abort.
pub struct Verifier<S, R, P, O> {
    store: S,
    registry: R,
    probe: P,
    reporter: O,
    config: VerifierConfig,
    networks: Vec<Network>,
}

impl<S, R, P, O> Verifier<S, R, P, O>
where
    S: SourceStore,
    R: RegistryProvider,
    P: ChainProbe,
    O: Reporter,
{
    pub fn new(store: S, registry: R, probe: P, reporter: O, config: VerifierConfig) -> Self {
        Self {
            store,
            registry,
            probe,
            reporter,
            config,
            networks: Network::ALL.to_vec(),
        }
    }

    /// Restricts the pass to the given networks. Canonical order is kept
    /// regardless of the order given here.
    pub fn with_networks(mut self, networks: &[Network]) -> Self {
        self.networks = Network::ALL
            .into_iter()
            .filter(|network| networks.contains(network))
            .collect();
        self
    }

    /// Runs one verification pass and returns its accounting.
    ///
    /// The registry resolves before any source is touched, so a dead
    /// registry aborts with zero work done.
    pub async fn run(&self) -> Result<RunSummary, VerifyError> {
        let registry = self.registry.fetch().await?;
        info!(services = registry.len(), "registry resolved");

        let mut sources = self.store.load_all()?;
        sources.sort_by(|a, b| a.file.cmp(&b.file));
        info!(sources = sources.len(), "configuration sources loaded");

        let mut summary = RunSummary::default();
        for network in self.networks.iter().copied() {
            self.reporter
                .report(&VerifyEvent::NetworkStarted { network });
            for source in sources.iter().filter(|s| s.network == network) {
                self.verify_source(source, &registry, &mut summary).await;
            }
        }
        info!(%summary, "verification pass complete");
        Ok(summary)
    }

    async fn verify_source(
        &self,
        source: &ConfigSource,
        registry: &Registry,
        summary: &mut RunSummary,
    ) {
        summary.sources += 1;

        let service = match source.service_name() {
            Ok(service) => service,
            Err(err) => {
                summary.skipped_sources += 1;
                self.reporter.report(&VerifyEvent::SourceFailed {
                    network: source.network,
                    file: source.file.clone(),
                    error: SourceError::Name(err),
                });
                return;
            }
        };

        let Some(descriptor) = registry.lookup(&service) else {
            summary.skipped_sources += 1;
            self.reporter.report(&VerifyEvent::NoConfiguration {
                network: source.network,
                file: source.file.clone(),
                service,
            });
            return;
        };

        let addresses = match extract_addresses(&source.text) {
            Ok(addresses) => addresses,
            Err(err) => {
                summary.skipped_sources += 1;
                self.reporter.report(&VerifyEvent::SourceFailed {
                    network: source.network,
                    file: source.file.clone(),
                    error: SourceError::Parse(err),
                });
                return;
            }
        };
        debug!(file = %source.file, endpoints = addresses.len(), "probing source");

        // buffered() polls up to `concurrency` probes at once but yields
        // results in input order, which keeps the report order at
        // (network, source, address) no matter which probe finishes first.
        let mut outcomes = stream::iter(addresses)
            .map(|endpoint| {
                let expected = descriptor.expected_network_name.as_str();
                async move {
                    let observation = self.probe.chain_name(&endpoint).await;
                    (endpoint, ProbeOutcome::classify(expected, observation))
                }
            })
            .buffered(self.config.probe.concurrency.max(1));

        while let Some((endpoint, outcome)) = outcomes.next().await {
            summary.record_outcome(&outcome);
            if let ProbeOutcome::Match { observed } = &outcome {
                debug!(endpoint = %endpoint, chain = %observed, "identity confirmed");
            }
            self.reporter.report(&VerifyEvent::Endpoint {
                network: source.network,
                file: source.file.clone(),
                endpoint,
                outcome,
            });
        }
    }
}
