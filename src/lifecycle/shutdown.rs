//! Stop signal shared by `ElbServer` and its serve task.
//!
//! `ElbServer::stop` and `Drop` fire it; the axum graceful-shutdown future
//! waits on it, after which the listener is closed.

use tokio::sync::broadcast;

/// Stop handle for one simulator instance.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver resolved once the server is told to stop.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell the serve task to stop. Firing twice is harmless.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Serve tasks still waiting for the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
