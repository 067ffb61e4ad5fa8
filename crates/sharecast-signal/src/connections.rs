//! Connection registry: live connection ids mapped to their outbound queues.

use std::collections::HashMap;
use std::sync::Arc;

use sharecast_common::{ConnectionId, SignalError};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, RwLock};

use crate::protocol::ServerMessage;

pub type OutboundSender = mpsc::Sender<ServerMessage>;

/// Thread-safe registry of live connections.
///
/// Sending is fire-and-forget: a full or closed queue drops the message and
/// reports it, it never waits.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    senders: Arc<RwLock<HashMap<ConnectionId, OutboundSender>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound queue, replacing any previous one.
    pub async fn register(&self, id: ConnectionId, tx: OutboundSender) {
        self.senders.write().await.insert(id, tx);
    }

    /// Forget a connection. Returns true if it was registered.
    pub async fn unregister(&self, id: &ConnectionId) -> bool {
        self.senders.write().await.remove(id).is_some()
    }

    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.senders.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.senders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.senders.read().await.is_empty()
    }

    /// Enqueue `msg` for `id` without waiting.
    pub async fn send(&self, id: &ConnectionId, msg: ServerMessage) -> Result<(), SignalError> {
        let map = self.senders.read().await;
        let tx = map
            .get(id)
            .ok_or_else(|| SignalError::UnknownTargetConnection(id.clone()))?;

        tx.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) | TrySendError::Closed(_) => SignalError::DeliveryFailed(id.clone()),
        })
    }
}
