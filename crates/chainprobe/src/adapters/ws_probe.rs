//! WebSocket identity probe.
//!
//! One probe is one connection, one `system_chain` call, one response, and
//! an unconditional close. Nothing is reused across probes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use crate::domain::error::ProbeError;
use crate::domain::extract::EndpointAddress;
use crate::ports::outbound::ChainProbe;

/// JSON-RPC method every Substrate-style node answers with its chain name.
const IDENTITY_METHOD: &str = "system_chain";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    method: &'static str,
    params: T,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    id: Option<u64>,
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Probes endpoints at `scheme://host:port` under a bounded timeout.
pub struct WsChainProbe {
    scheme: String,
    timeout: Duration,
    request_id: AtomicU64,
}

impl WsChainProbe {
    pub fn new(scheme: impl Into<String>, timeout: Duration) -> Self {
        Self {
            scheme: scheme.into(),
            timeout,
            request_id: AtomicU64::new(1),
        }
    }

    fn endpoint_url(&self, endpoint: &EndpointAddress) -> String {
        format!("{}://{}", self.scheme, endpoint)
    }

    async fn request_chain(&self, url: &str) -> Result<String, ProbeError> {
        let (mut stream, _) = connect_async(url)
            .await
            .map_err(|err| ProbeError::Connect {
                reason: err.to_string(),
            })?;

        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let result = Self::exchange(&mut stream, id).await;
        // Teardown happens on both paths; close errors change nothing about
        // the outcome already in hand.
        let _ = stream.close(None).await;
        result
    }

    async fn exchange(stream: &mut WsStream, id: u64) -> Result<String, ProbeError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: IDENTITY_METHOD,
            params: Vec::<()>::new(),
            id,
        };
        let frame = serde_json::to_string(&request).map_err(|err| ProbeError::Protocol {
            reason: err.to_string(),
        })?;
        stream
            .send(Message::Text(frame.into()))
            .await
            .map_err(|err| ProbeError::Connect {
                reason: err.to_string(),
            })?;

        while let Some(message) = stream.next().await {
            let message = message.map_err(|err| ProbeError::Connect {
                reason: err.to_string(),
            })?;
            match message {
                Message::Text(text) => {
                    let response: JsonRpcResponse =
                        serde_json::from_str(&text).map_err(|err| ProbeError::Protocol {
                            reason: err.to_string(),
                        })?;
                    if response.id != Some(id) {
                        // Subscription pushes and foreign responses carry a
                        // different id; we only ever asked one question.
                        trace!("ignoring frame with foreign id");
                        continue;
                    }
                    if let Some(error) = response.error {
                        return Err(ProbeError::Rpc {
                            code: error.code,
                            message: error.message,
                        });
                    }
                    return response.result.ok_or(ProbeError::Protocol {
                        reason: "response carries neither result nor error".to_string(),
                    });
                }
                Message::Ping(payload) => {
                    stream
                        .send(Message::Pong(payload))
                        .await
                        .map_err(|err| ProbeError::Connect {
                            reason: err.to_string(),
                        })?;
                }
                Message::Close(_) => return Err(ProbeError::ConnectionClosed),
                _ => {}
            }
        }
        Err(ProbeError::ConnectionClosed)
    }
}

#[async_trait]
impl ChainProbe for WsChainProbe {
    async fn chain_name(&self, endpoint: &EndpointAddress) -> Result<String, ProbeError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "probing endpoint identity");
        match tokio::time::timeout(self.timeout, self.request_chain(&url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout {
                timeout: self.timeout,
            }),
        }
    }
}
