use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

const CHANNEL_CAPACITY: usize = 16;

/// Emitted after a product has been written, telling any open catalog view
/// that its rows are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogChanged {
    pub revision: u64,
}

/// Invalidation hub between the intake form (publisher) and catalog views
/// (subscribers).
#[derive(Debug, Clone)]
pub struct CatalogEvents {
    sender: broadcast::Sender<CatalogChanged>,
    revision: Arc<AtomicU64>,
}

impl CatalogEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogChanged> {
        self.sender.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn publish(&self) -> CatalogChanged {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let event = CatalogChanged { revision };
        // No subscribers is not an error: nobody has the catalog open.
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::debug!(revision, receivers, "catalog changed");
        event
    }
}

impl Default for CatalogEvents {
    fn default() -> Self {
        Self::new()
    }
}
