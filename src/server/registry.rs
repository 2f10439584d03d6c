use std::net::IpAddr;
use std::sync::Arc;

use dashmap::DashSet;

/// Concurrent set of client addresses with live connections.
///
/// Used only for connect/disconnect logging. Handlers on different
/// connections insert and remove concurrently without external locking.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: Arc<DashSet<IpAddr>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the address; returns true when it was not already present,
    /// so callers can log first connections without a separate lookup.
    pub fn add(&self, addr: IpAddr) -> bool {
        self.clients.insert(addr)
    }

    /// Removes the address; returns true when it was present.
    pub fn remove(&self, addr: IpAddr) -> bool {
        self.clients.remove(&addr).is_some()
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        self.clients.contains(&addr)
    }
}
