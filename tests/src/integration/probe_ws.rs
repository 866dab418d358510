//! Probe behavior against endpoints with scripted personalities.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::{Duration, Instant};

    use chainprobe::{ChainProbe, EndpointAddress, ProbeError, WsChainProbe};
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_tungstenite::tungstenite::Message;

    use crate::support::ws::{refused_port, spawn_endpoint, WsBehavior};

    fn endpoint(addr: SocketAddr) -> EndpointAddress {
        EndpointAddress::new("127.0.0.1", addr.port())
    }

    fn probe() -> WsChainProbe {
        WsChainProbe::new("ws", Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_probe_reads_the_reported_chain() {
        let addr = spawn_endpoint(WsBehavior::Chain("Kusama")).await;
        let chain = probe().chain_name(&endpoint(addr)).await.unwrap();
        assert_eq!(chain, "Kusama");
    }

    #[tokio::test]
    async fn test_probe_closes_the_connection_after_the_answer() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (closed_tx, closed_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let Some(Ok(Message::Text(text))) = ws.next().await else {
                return;
            };
            let request: serde_json::Value = serde_json::from_str(&text).unwrap();
            let answer = json!({ "jsonrpc": "2.0", "id": request["id"], "result": "Paseo" });
            ws.send(Message::Text(answer.to_string().into()))
                .await
                .unwrap();

            let mut saw_close = false;
            while let Some(Ok(message)) = ws.next().await {
                if matches!(message, Message::Close(_)) {
                    saw_close = true;
                    break;
                }
            }
            let _ = closed_tx.send(saw_close);
        });

        let chain = probe().chain_name(&endpoint(addr)).await.unwrap();
        assert_eq!(chain, "Paseo");

        let saw_close = tokio::time::timeout(Duration::from_secs(2), closed_rx)
            .await
            .expect("fixture never observed the connection end")
            .unwrap();
        assert!(saw_close, "probe must close the socket after its answer");
    }

    #[tokio::test]
    async fn test_rpc_error_reaches_the_caller() {
        let addr = spawn_endpoint(WsBehavior::RpcError {
            code: -32601,
            message: "Method not found",
        })
        .await;
        let err = probe().chain_name(&endpoint(addr)).await.unwrap_err();
        assert!(matches!(err, ProbeError::Rpc { code: -32601, .. }));
    }

    #[tokio::test]
    async fn test_close_before_the_reply_is_connection_closed() {
        let addr = spawn_endpoint(WsBehavior::CloseEarly).await;
        let err = probe().chain_name(&endpoint(addr)).await.unwrap_err();
        assert!(matches!(err, ProbeError::ConnectionClosed));
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_connect_failure() {
        let port = refused_port().await;
        let err = probe()
            .chain_name(&EndpointAddress::new("127.0.0.1", port))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Connect { .. }));
    }

    #[tokio::test]
    async fn test_unresponsive_endpoint_times_out() {
        let addr = spawn_endpoint(WsBehavior::Silent).await;
        let probe = WsChainProbe::new("ws", Duration::from_millis(200));
        let started = Instant::now();
        let err = probe.chain_name(&endpoint(addr)).await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_stalled_handshake_times_out() {
        // Accepts TCP and holds the socket without ever upgrading.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let probe = WsChainProbe::new("ws", Duration::from_millis(200));
        let err = probe.chain_name(&endpoint(addr)).await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_foreign_frames_are_skipped_until_the_answer() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let Some(Ok(Message::Text(text))) = ws.next().await else {
                return;
            };
            let request: serde_json::Value = serde_json::from_str(&text).unwrap();

            // A subscription push and a stale response, then the real answer.
            let push = json!({
                "jsonrpc": "2.0",
                "method": "chain_newHead",
                "params": { "subscription": "sub0", "result": "0x01" },
            });
            let stale = json!({ "jsonrpc": "2.0", "id": 999_999, "result": "Rococo" });
            let answer = json!({ "jsonrpc": "2.0", "id": request["id"], "result": "Westend" });
            for frame in [push, stale, answer] {
                ws.send(Message::Text(frame.to_string().into()))
                    .await
                    .unwrap();
            }
        });

        let chain = probe().chain_name(&endpoint(addr)).await.unwrap();
        assert_eq!(chain, "Westend");
    }
}
