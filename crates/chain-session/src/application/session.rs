//! # Chain Session
//!
//! Runtime state for one registered chain: its request queue, its
//! response queue, and its liveness signal. Owned by the registry's slot
//! table; operations borrow it as `Arc` clones.

use crate::domain::{ChainHandle, NextResponse, RequestEnvelope, ResponseEnvelope, SessionError};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, watch, Mutex};
use uuid::Uuid;

pub(crate) struct ChainSession {
    handle: ChainHandle,
    session_id: Uuid,
    /// Host → engine. Bounded; `try_send` keeps submission non-blocking.
    requests: mpsc::Sender<RequestEnvelope>,
    /// Engine → host. The async mutex serializes consumers so each
    /// response is delivered to exactly one waiter.
    responses: Mutex<mpsc::Receiver<String>>,
    /// Flipped once by `close()`; observed by the worker and by waiters.
    shutdown: watch::Sender<bool>,
    next_sequence: AtomicU64,
}

impl ChainSession {
    pub(crate) fn new(
        handle: ChainHandle,
        session_id: Uuid,
        requests: mpsc::Sender<RequestEnvelope>,
        responses: mpsc::Receiver<String>,
        shutdown: watch::Sender<bool>,
    ) -> Self {
        Self {
            handle,
            session_id,
            requests,
            responses: Mutex::new(responses),
            shutdown,
            next_sequence: AtomicU64::new(0),
        }
    }

    pub(crate) fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Enqueue a request without blocking. The text is copied here; the
    /// caller keeps ownership of its buffer.
    pub(crate) fn submit(&self, request: &str) -> Result<(), SessionError> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let envelope = RequestEnvelope::new(sequence, request.to_owned());
        self.requests.try_send(envelope).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SessionError::ResourceExhausted(format!(
                "request queue full for {}",
                self.handle
            )),
            // The worker is gone: a benign race with concurrent removal.
            mpsc::error::TrySendError::Closed(_) => SessionError::UnknownHandle(self.handle),
        })
    }

    /// Suspend until a response arrives or the session is closed.
    ///
    /// `wait_for` (not `changed`) on the shutdown watch: a close that
    /// happened between lookup and this call must still unblock us.
    pub(crate) async fn wait_next(&self) -> NextResponse {
        let mut shutdown = self.shutdown.subscribe();
        let mut responses = self.responses.lock().await;
        tokio::select! {
            next = responses.recv() => match next {
                Some(text) => NextResponse::Response(ResponseEnvelope::new(self.handle, text)),
                None => NextResponse::Closed,
            },
            _ = shutdown.wait_for(|stopped| *stopped) => NextResponse::Closed,
        }
    }

    /// Signal shutdown. The worker's select drops the engine future and
    /// every outstanding waiter returns `Closed`. Pending queue entries
    /// are discarded when the channels drop with the session.
    pub(crate) fn close(&self) {
        let _ = self.shutdown.send(true);
    }
}
