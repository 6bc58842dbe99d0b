//! # Outbound Ports
//!
//! The seam to the external light-client engine. The real engine
//! (consensus, networking, block sync) lives behind [`ChainEngine`];
//! this crate only ships [`MockChainEngine`] for tests and demos.

use crate::domain::{ChainHandle, RequestEnvelope, SessionError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Light-client engine - outbound port.
///
/// One `run_chain` invocation drives one chain for its whole lifetime.
/// The registry hands the engine a private pair of queues; the engine
/// owns the receiving end of requests and the sending end of responses,
/// so two chains can never observe each other's traffic.
#[async_trait]
pub trait ChainEngine: Send + Sync + 'static {
    /// Validate a chain specification document before a session starts.
    ///
    /// # Errors
    ///
    /// - `InvalidSpec` if the document is malformed or unrecognized
    async fn validate_spec(&self, spec: &str) -> Result<(), SessionError>;

    /// Drive one chain: consume submitted requests in FIFO order and push
    /// produced responses, until the request channel closes or the future
    /// is dropped by chain removal.
    ///
    /// A single request may produce zero, one, or many responses
    /// (subscription-style APIs).
    async fn run_chain(
        &self,
        chain: ChainHandle,
        spec: String,
        requests: mpsc::Receiver<RequestEnvelope>,
        responses: mpsc::Sender<String>,
    );
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Default cadence for mock `chain_newHead` notifications.
pub const DEFAULT_HEAD_INTERVAL: Duration = Duration::from_millis(250);

/// Mock engine for testing and the demo host.
///
/// Speaks just enough JSON-RPC 2.0 to exercise the session layer:
///
/// | Method | Behavior |
/// |--------|----------|
/// | `chain_subscribeNewHeads` | Returns a subscription id, then periodic `chain_newHead` notifications |
/// | `chain_unsubscribeNewHeads` | Stops notifications for the given subscription |
/// | `system_chain` | Returns the chain name from the spec |
/// | `system_version` | Returns the crate version |
/// | anything else | JSON-RPC `-32601` method-not-found error payload |
#[derive(Clone, Debug)]
pub struct MockChainEngine {
    /// Interval between simulated new-head notifications.
    pub head_interval: Duration,
}

impl Default for MockChainEngine {
    fn default() -> Self {
        Self {
            head_interval: DEFAULT_HEAD_INTERVAL,
        }
    }
}

impl MockChainEngine {
    /// Mock engine with a custom notification cadence.
    #[must_use]
    pub fn with_head_interval(head_interval: Duration) -> Self {
        Self { head_interval }
    }

    /// Produce the reply for one request. Subscriptions mutate the
    /// active-subscription list consumed by the notification ticker.
    fn answer(
        chain_name: &str,
        subscriptions: &mut Vec<u64>,
        next_subscription: &mut u64,
        request: &str,
    ) -> String {
        let Ok(value) = serde_json::from_str::<Value>(request) else {
            return json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": { "code": -32700, "message": "Parse error" },
            })
            .to_string();
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let method = value.get("method").and_then(Value::as_str).unwrap_or("");

        match method {
            "chain_subscribeNewHeads" => {
                let subscription = *next_subscription;
                *next_subscription += 1;
                subscriptions.push(subscription);
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": subscription.to_string(),
                })
                .to_string()
            }
            "chain_unsubscribeNewHeads" => {
                let target = value
                    .get("params")
                    .and_then(|params| params.get(0))
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<u64>().ok());
                let found = match target {
                    Some(subscription) if subscriptions.contains(&subscription) => {
                        subscriptions.retain(|s| *s != subscription);
                        true
                    }
                    _ => false,
                };
                json!({ "jsonrpc": "2.0", "id": id, "result": found }).to_string()
            }
            "system_chain" => {
                json!({ "jsonrpc": "2.0", "id": id, "result": chain_name }).to_string()
            }
            "system_version" => {
                json!({ "jsonrpc": "2.0", "id": id, "result": crate::VERSION }).to_string()
            }
            "" => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32600, "message": "Invalid Request" },
            })
            .to_string(),
            _ => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": "Method not found" },
            })
            .to_string(),
        }
    }
}

#[async_trait]
impl ChainEngine for MockChainEngine {
    async fn validate_spec(&self, spec: &str) -> Result<(), SessionError> {
        let value: Value = serde_json::from_str(spec)
            .map_err(|e| SessionError::InvalidSpec(e.to_string()))?;
        let object = value.as_object().ok_or_else(|| {
            SessionError::InvalidSpec("chain specification must be a JSON object".to_string())
        })?;
        if !object.contains_key("id") && !object.contains_key("name") {
            return Err(SessionError::InvalidSpec(
                "chain specification is missing an `id` or `name` field".to_string(),
            ));
        }
        Ok(())
    }

    async fn run_chain(
        &self,
        chain: ChainHandle,
        spec: String,
        mut requests: mpsc::Receiver<RequestEnvelope>,
        responses: mpsc::Sender<String>,
    ) {
        let chain_name = serde_json::from_str::<Value>(&spec)
            .ok()
            .and_then(|value| {
                value
                    .get("name")
                    .or_else(|| value.get("id"))
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "unknown".to_string());

        let mut subscriptions: Vec<u64> = Vec::new();
        let mut next_subscription = 1u64;
        let mut height = 0u64;
        let mut heads = tokio::time::interval(self.head_interval);
        heads.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                envelope = requests.recv() => {
                    let Some(envelope) = envelope else { break };
                    debug!(%chain, sequence = envelope.sequence(), "mock engine processing request");
                    let reply = Self::answer(
                        &chain_name,
                        &mut subscriptions,
                        &mut next_subscription,
                        envelope.text(),
                    );
                    if responses.send(reply).await.is_err() {
                        break;
                    }
                }
                _ = heads.tick(), if !subscriptions.is_empty() => {
                    height += 1;
                    for subscription in &subscriptions {
                        let notification = json!({
                            "jsonrpc": "2.0",
                            "method": "chain_newHead",
                            "params": {
                                "subscription": subscription.to_string(),
                                "result": { "chain": chain_name, "number": height },
                            },
                        })
                        .to_string();
                        if responses.send(notification).await.is_err() {
                            return;
                        }
                    }
                }
            }
        }

        debug!(%chain, "mock engine chain loop ended");
    }
}
