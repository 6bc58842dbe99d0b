//! # Chain Registry
//!
//! The handle table and lifecycle service. This is the only state shared
//! across chains; each session's queues are private to that session.
//!
//! The registry is an explicitly owned object, not process-global state:
//! a host may run several independent registries (and does, in tests).

use crate::application::session::ChainSession;
use crate::config::SessionConfig;
use crate::domain::{ChainHandle, NextResponse, SessionError};
use crate::ports::{ChainEngine, ChainRegistryApi};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};
use uuid::Uuid;

/// One entry in the handle table. Generation is bumped when the slot is
/// freed, invalidating every handle minted for the previous occupant.
#[derive(Default)]
struct Slot {
    generation: u32,
    session: Option<Arc<ChainSession>>,
}

/// Chain registry - maps opaque handles to chain sessions.
pub struct ChainRegistry<E: ChainEngine> {
    config: SessionConfig,
    engine: Arc<E>,
    slots: RwLock<Vec<Slot>>,
}

impl<E: ChainEngine> ChainRegistry<E> {
    /// Create a registry driving the given engine.
    pub fn new(config: SessionConfig, engine: Arc<E>) -> Self {
        Self {
            config,
            engine,
            slots: RwLock::new(Vec::new()),
        }
    }

    /// Number of currently registered chains.
    #[must_use]
    pub fn chain_count(&self) -> usize {
        self.slots
            .read()
            .iter()
            .filter(|slot| slot.session.is_some())
            .count()
    }

    /// Generation-checked lookup. Every operation goes through this, so a
    /// stale handle fails here rather than touching another chain's state.
    fn lookup(&self, handle: ChainHandle) -> Result<Arc<ChainSession>, SessionError> {
        let slots = self.slots.read();
        let slot = slots
            .get(handle.index())
            .ok_or(SessionError::UnknownHandle(handle))?;
        if slot.generation != handle.generation() {
            return Err(SessionError::UnknownHandle(handle));
        }
        slot.session
            .clone()
            .ok_or(SessionError::UnknownHandle(handle))
    }

    /// Validate a spec, allocate a slot, and spawn the engine worker.
    pub async fn add_chain(&self, spec: &str) -> Result<ChainHandle, SessionError> {
        // Cheap syntactic gate before handing the document to the engine.
        let value: Value = serde_json::from_str(spec)
            .map_err(|e| SessionError::InvalidSpec(e.to_string()))?;
        if !value.is_object() {
            return Err(SessionError::InvalidSpec(
                "chain specification must be a JSON object".to_string(),
            ));
        }
        self.engine.validate_spec(spec).await?;

        let (req_tx, req_rx) = mpsc::channel(self.config.request_queue_capacity);
        let (resp_tx, resp_rx) = mpsc::channel(self.config.response_queue_capacity);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let session_id = Uuid::new_v4();

        let mut slots = self.slots.write();
        let index = match slots.iter().position(|slot| slot.session.is_none()) {
            Some(free) => free,
            None if slots.len() < self.config.max_chains => {
                slots.push(Slot::default());
                slots.len() - 1
            }
            None => {
                return Err(SessionError::ResourceExhausted(format!(
                    "chain table full ({} chains)",
                    self.config.max_chains
                )));
            }
        };
        let handle = ChainHandle::new(index as u32, slots[index].generation);

        let engine = Arc::clone(&self.engine);
        let spec_owned = spec.to_owned();
        tokio::spawn(async move {
            tokio::select! {
                () = engine.run_chain(handle, spec_owned, req_rx, resp_tx) => {
                    debug!(%handle, "engine worker finished");
                }
                _ = shutdown_rx.wait_for(|stopped| *stopped) => {
                    debug!(%handle, "engine worker stopped by chain removal");
                }
            }
        });

        slots[index].session = Some(Arc::new(ChainSession::new(
            handle,
            session_id,
            req_tx,
            resp_rx,
            shutdown_tx,
        )));

        info!(%handle, %session_id, "chain session created");
        Ok(handle)
    }

    /// Stop a session and invalidate its handle.
    pub async fn remove_chain(&self, handle: ChainHandle) -> Result<(), SessionError> {
        let session = {
            let mut slots = self.slots.write();
            let slot = slots
                .get_mut(handle.index())
                .ok_or(SessionError::UnknownHandle(handle))?;
            if slot.generation != handle.generation() {
                return Err(SessionError::UnknownHandle(handle));
            }
            let session = slot
                .session
                .take()
                .ok_or(SessionError::UnknownHandle(handle))?;
            slot.generation = slot.generation.wrapping_add(1);
            session
        };

        // Outside the table lock: unblocks waiters and drops the worker.
        session.close();
        info!(%handle, session_id = %session.session_id(), "chain session removed");
        Ok(())
    }

    /// Non-blocking request submission.
    pub fn submit_request(&self, handle: ChainHandle, request: &str) -> Result<(), SessionError> {
        serde_json::from_str::<Value>(request)
            .map_err(|e| SessionError::MalformedRequest(e.to_string()))?;
        self.lookup(handle)?.submit(request)
    }

    /// Suspend until the chain produces a response or is removed.
    pub async fn wait_next_response(
        &self,
        handle: ChainHandle,
    ) -> Result<NextResponse, SessionError> {
        let session = self.lookup(handle)?;
        Ok(session.wait_next().await)
    }
}

#[async_trait]
impl<E: ChainEngine> ChainRegistryApi for ChainRegistry<E> {
    async fn add_chain(&self, spec: &str) -> Result<ChainHandle, SessionError> {
        Self::add_chain(self, spec).await
    }

    async fn remove_chain(&self, handle: ChainHandle) -> Result<(), SessionError> {
        Self::remove_chain(self, handle).await
    }

    async fn submit_request(
        &self,
        handle: ChainHandle,
        request: &str,
    ) -> Result<(), SessionError> {
        Self::submit_request(self, handle, request)
    }

    async fn wait_next_response(
        &self,
        handle: ChainHandle,
    ) -> Result<NextResponse, SessionError> {
        Self::wait_next_response(self, handle).await
    }
}
