//! # Lightcell Host Runtime
//!
//! The demo host driving the session layer end to end:
//!
//! 1. Load a chain specification (argv path, or the built-in demo spec)
//! 2. Register the chain and obtain a handle
//! 3. Submit a `chain_subscribeNewHeads` request
//! 4. Loop: wait for the next response, release it, print it
//! 5. On Ctrl+C, remove the chain and exit
//!
//! Responses are opaque JSON-RPC text to this program; it only
//! distinguishes payload deliveries from the `Closed` shutdown signal.

use anyhow::{Context, Result};
use chain_session::{ChainRegistry, MockChainEngine, NextResponse, SessionConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const SUBSCRIBE_NEW_HEADS: &str =
    r#"{"id":1,"jsonrpc":"2.0","method":"chain_subscribeNewHeads","params":[]}"#;

/// Built-in chain specification, used when no path is given on argv.
const DEMO_CHAIN_SPEC: &str = r#"{
    "name": "Lightcell Demo",
    "id": "lightcell-demo",
    "bootNodes": []
}"#;

/// Read the chain specification. The file's buffer stays ours: the session
/// layer copies what it needs before `add_chain` returns.
fn load_chain_spec() -> Result<String> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("couldn't read chain spec file {path}")),
        None => Ok(DEMO_CHAIN_SPEC.to_string()),
    }
}

/// Notification cadence for the bundled mock engine, overridable via
/// `HOST_HEAD_INTERVAL_MS`.
fn head_interval() -> Duration {
    std::env::var("HOST_HEAD_INTERVAL_MS")
        .ok()
        .and_then(|ms| ms.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(chain_session::DEFAULT_HEAD_INTERVAL)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let spec = load_chain_spec()?;
    let engine = Arc::new(MockChainEngine::with_head_interval(head_interval()));
    let registry = ChainRegistry::new(SessionConfig::default(), engine);

    let chain = registry.add_chain(&spec).await?;
    info!(%chain, "chain registered");

    registry.submit_request(chain, SUBSCRIBE_NEW_HEADS)?;
    info!("subscribed to new heads; press Ctrl+C to stop");

    loop {
        tokio::select! {
            delivered = registry.wait_next_response(chain) => match delivered {
                Ok(NextResponse::Response(envelope)) => {
                    // Releasing the envelope transfers the text to us.
                    println!("JSON-RPC response: {}", envelope.into_text());
                }
                Ok(NextResponse::Closed) => {
                    info!("chain closed, stopping");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "response wait failed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested, removing chain");
                registry.remove_chain(chain).await?;
                break;
            }
        }
    }

    info!("host runtime stopped");
    Ok(())
}
