//! Full pipeline flows: conf directory through probes to the event stream.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use chainprobe::{
        ConfDirStore, HttpRegistry, Network, ProbeOutcome, RegistryError, Verifier, VerifierConfig,
        VerifyError, VerifyEvent, WsChainProbe,
    };
    use tempfile::TempDir;

    use crate::support::registry::{registry_body, spawn_registry};
    use crate::support::reporting::CollectingReporter;
    use crate::support::ws::{refused_port, spawn_endpoint, WsBehavior};

    fn write_conf(dir: &TempDir, name: &str, body: &str) {
        fs::write(dir.path().join(name), body).unwrap();
    }

    fn server_line(port: u16) -> String {
        format!("  server node-{port} 127.0.0.1:{port} check\n")
    }

    fn verifier_for(
        dir: &TempDir,
        registry_url: &str,
        reporter: Arc<CollectingReporter>,
    ) -> Verifier<ConfDirStore, HttpRegistry, WsChainProbe, Arc<CollectingReporter>> {
        let config = VerifierConfig {
            conf_dir: dir.path().to_path_buf(),
            ..VerifierConfig::default()
        };
        Verifier::new(
            ConfDirStore::new(dir.path()),
            HttpRegistry::new(registry_url, Duration::from_secs(5)),
            WsChainProbe::new("ws", Duration::from_secs(2)),
            reporter,
            config,
        )
    }

    #[tokio::test]
    async fn test_full_pass_over_a_mixed_fleet() {
        let polkadot = spawn_endpoint(WsBehavior::Chain("Polkadot")).await;
        let kusama = spawn_endpoint(WsBehavior::Chain("Kusama")).await;
        let dead_port = refused_port().await;

        let dir = TempDir::new().unwrap();
        // One healthy endpoint and one serving the wrong chain.
        write_conf(
            &dir,
            "polkadot-rpc.cfg",
            &format!(
                "backend rpc_nodes\n  mode http\n{}{}",
                server_line(polkadot.port()),
                server_line(kusama.port()),
            ),
        );
        write_conf(&dir, "westend-down.cfg", &server_line(dead_port));
        // Known network, no registry entry.
        write_conf(&dir, "kusama-ghost.cfg", &server_line(kusama.port()));
        // Peer links only; extracts to nothing.
        write_conf(
            &dir,
            "paseo-peers.cfg",
            "  server wsp2p-validator 10.0.0.9:30333 check\n",
        );
        // Not classifiable to a network; the store never surfaces it.
        write_conf(&dir, "frontend.cfg", &server_line(9999));
        fs::write(dir.path().join("README.md"), "not a config").unwrap();

        let registry_url = spawn_registry(
            StatusCode::OK,
            registry_body(&[
                ("Rpc", "Polkadot"),
                ("Down", "Westend"),
                ("Peers", "Paseo"),
            ]),
        )
        .await;

        let reporter = Arc::new(CollectingReporter::default());
        let verifier = verifier_for(&dir, &registry_url, Arc::clone(&reporter));
        let summary = verifier.run().await.unwrap();

        assert_eq!(summary.sources, 4);
        assert_eq!(summary.skipped_sources, 1);
        assert_eq!(summary.endpoints, 3);
        assert_eq!(summary.matches, 1);
        assert_eq!(summary.mismatches, 1);
        assert_eq!(summary.connection_failures, 1);
        assert!(!summary.is_clean());

        let events = reporter.events();
        assert_eq!(events.len(), 8);
        assert!(matches!(
            events[0],
            VerifyEvent::NetworkStarted {
                network: Network::Kusama
            }
        ));
        assert!(matches!(
            &events[1],
            VerifyEvent::NoConfiguration { file, .. } if file == "kusama-ghost.cfg"
        ));
        assert!(matches!(
            events[2],
            VerifyEvent::NetworkStarted {
                network: Network::Paseo
            }
        ));
        assert!(matches!(
            events[3],
            VerifyEvent::NetworkStarted {
                network: Network::Polkadot
            }
        ));
        assert!(matches!(
            &events[4],
            VerifyEvent::Endpoint {
                outcome: ProbeOutcome::Match { .. },
                ..
            }
        ));
        assert!(matches!(
            &events[5],
            VerifyEvent::Endpoint {
                outcome: ProbeOutcome::Mismatch { expected, observed },
                ..
            } if expected == "Polkadot" && observed == "Kusama"
        ));
        assert!(matches!(
            events[6],
            VerifyEvent::NetworkStarted {
                network: Network::Westend
            }
        ));
        assert!(matches!(
            &events[7],
            VerifyEvent::Endpoint {
                file,
                outcome: ProbeOutcome::ConnectionFailed { .. },
                ..
            } if file == "westend-down.cfg"
        ));
    }

    #[tokio::test]
    async fn test_all_matching_fleet_is_clean() {
        let westend = spawn_endpoint(WsBehavior::Chain("Westend")).await;
        let dir = TempDir::new().unwrap();
        write_conf(&dir, "westend-rpc.cfg", &server_line(westend.port()));
        let registry_url =
            spawn_registry(StatusCode::OK, registry_body(&[("Rpc", "Westend")])).await;

        let reporter = Arc::new(CollectingReporter::default());
        let verifier = verifier_for(&dir, &registry_url, Arc::clone(&reporter))
            .with_networks(&[Network::Westend]);
        let summary = verifier.run().await.unwrap();

        assert!(summary.is_clean());
        assert_eq!(summary.matches, 1);
        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            VerifyEvent::Endpoint {
                outcome: ProbeOutcome::Match { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_dead_registry_aborts_with_nothing_probed() {
        let dir = TempDir::new().unwrap();
        write_conf(&dir, "polkadot-rpc.cfg", &server_line(1234));
        let registry_url = spawn_registry(StatusCode::INTERNAL_SERVER_ERROR, "maintenance").await;

        let reporter = Arc::new(CollectingReporter::default());
        let verifier = verifier_for(&dir, &registry_url, Arc::clone(&reporter));
        let err = verifier.run().await.unwrap_err();

        assert!(matches!(
            err,
            VerifyError::Registry(RegistryError::Status { status: 500 })
        ));
        assert!(reporter.events().is_empty());
    }

    #[tokio::test]
    async fn test_missing_conf_dir_aborts() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-there");
        let registry_url = spawn_registry(StatusCode::OK, registry_body(&[])).await;

        let config = VerifierConfig {
            conf_dir: missing.clone(),
            ..VerifierConfig::default()
        };
        let verifier = Verifier::new(
            ConfDirStore::new(&missing),
            HttpRegistry::new(&registry_url, Duration::from_secs(5)),
            WsChainProbe::new("ws", Duration::from_secs(2)),
            Arc::new(CollectingReporter::default()),
            config,
        );
        let err = verifier.run().await.unwrap_err();
        assert!(matches!(err, VerifyError::Store(_)));
    }
}
