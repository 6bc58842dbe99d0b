//! # Response Stream
//!
//! A `Stream` adapter over repeated `wait_next_response` calls, for hosts
//! that prefer combinators over an explicit wait loop. The stream ends
//! when the chain is removed.

use crate::domain::{ChainHandle, NextResponse, ResponseEnvelope, SessionError};
use crate::ports::ChainRegistryApi;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_stream::Stream;

type WaitFuture = Pin<Box<dyn Future<Output = Result<NextResponse, SessionError>> + Send>>;

/// A stream of owned response envelopes for one chain.
///
/// Yields envelopes in engine production order and terminates on `Closed`
/// or any error (including removal racing the next poll). Holds the
/// single-consumer slot for its handle while a poll is in flight.
pub struct ResponseStream {
    registry: Arc<dyn ChainRegistryApi>,
    handle: ChainHandle,
    pending: Option<WaitFuture>,
}

impl ResponseStream {
    /// Create a stream over one chain's responses.
    #[must_use]
    pub fn new(registry: Arc<dyn ChainRegistryApi>, handle: ChainHandle) -> Self {
        Self {
            registry,
            handle,
            pending: None,
        }
    }

    /// Handle of the chain this stream drains.
    #[must_use]
    pub fn handle(&self) -> ChainHandle {
        self.handle
    }
}

impl Stream for ResponseStream {
    type Item = ResponseEnvelope;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.pending.is_none() {
            let registry = Arc::clone(&this.registry);
            let handle = this.handle;
            this.pending = Some(Box::pin(async move {
                registry.wait_next_response(handle).await
            }));
        }

        let Some(wait) = this.pending.as_mut() else {
            return Poll::Ready(None);
        };

        match wait.as_mut().poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(outcome) => {
                this.pending = None;
                match outcome {
                    Ok(NextResponse::Response(envelope)) => Poll::Ready(Some(envelope)),
                    Ok(NextResponse::Closed) | Err(_) => Poll::Ready(None),
                }
            }
        }
    }
}
