//! Snapshot handoff between the builder and view readers.
//!
//! A world has two phases: an exclusive write phase while the snapshot
//! builder populates it, then a read-only phase shared by any number of
//! readers. The feed enforces the boundary in the type system - publishing
//! consumes the `World` and hands out frozen `Arc` snapshots.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::World;

/// The publishing half of a snapshot feed.
///
/// Held by the evaluation cycle that builds worlds; one publish per cycle.
#[derive(Debug)]
pub struct WorldFeed {
    tx: watch::Sender<Arc<World>>,
}

/// The reading half of a snapshot feed.
///
/// Cheap to clone; every handle observes the most recently published
/// snapshot. Snapshots already obtained stay valid unchanged - a new
/// publish replaces what `current` returns, never what readers hold.
#[derive(Debug, Clone)]
pub struct WorldHandle {
    rx: watch::Receiver<Arc<World>>,
}

impl WorldFeed {
    /// Create a feed pair, seeded with an empty world.
    pub fn channel() -> (Self, WorldHandle) {
        let (tx, rx) = watch::channel(Arc::new(World::default()));
        (Self { tx }, WorldHandle { rx })
    }

    /// Freeze a snapshot and publish it, ending its write phase.
    pub fn publish(&self, world: World) {
        debug!(
            applications = world.applications.len(),
            services = world.services.len(),
            nodes = world.nodes.len(),
            "publishing world snapshot"
        );
        self.tx.send_replace(Arc::new(world));
    }
}

impl WorldHandle {
    /// The most recently published snapshot.
    pub fn current(&self) -> Arc<World> {
        self.rx.borrow().clone()
    }

    /// Wait for a snapshot newer than the last one seen by this handle.
    ///
    /// Errors only when the feed half has been dropped.
    pub async fn changed(&mut self) -> Result<Arc<World>, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
