use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Server end of one live websocket: frames pushed here get forwarded to the
/// client by the connection's pump task.
pub type ConnectionHandle = UnboundedSender<String>;

/// Live connections, one per user. A reconnect replaces the previous entry.
///
/// Cloning is cheap; every clone sees the same map. Constructed once in `main`
/// and carried in `AppState`.
#[derive(Clone, Default)]
pub struct Registry {
    connections: Arc<DashMap<Uuid, ConnectionHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing handle for `user_id`.
    pub fn register(&self, user_id: Uuid, handle: ConnectionHandle) {
        self.connections.insert(user_id, handle);
    }

    /// Idempotent; no-op when the user has no entry.
    pub fn unregister(&self, user_id: Uuid) {
        self.connections.remove(&user_id);
    }

    /// Disconnect path: removes the entry only if it still belongs to `handle`.
    /// A disconnect that lost the race against a reconnect leaves the newer
    /// connection registered.
    pub fn unregister_handle(&self, user_id: Uuid, handle: &ConnectionHandle) {
        self.connections
            .remove_if(&user_id, |_, current| current.same_channel(handle));
    }

    pub fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        self.connections.get(&user_id).map(|entry| entry.value().clone())
    }
}
