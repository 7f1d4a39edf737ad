//! Graceful shutdown for the query service.
//!
//! Every connection task holds a [`ShutdownToken`]. Shutting down broadcasts
//! the stop signal and then waits until every token has been dropped, which
//! happens when the last task returns.

use tokio::sync::{broadcast, mpsc};

pub struct ShutdownToken {
    _alive: mpsc::Sender<()>,
    stop: broadcast::Receiver<()>,
}

impl ShutdownToken {
    /// Resolves once shutdown has been requested, or when the controller is gone.
    pub async fn wait_for_shutdown(&mut self) {
        self.stop.recv().await.ok();
    }
}

pub struct ShutdownController {
    tokens_dropped: mpsc::Receiver<()>,
    alive: mpsc::Sender<()>,
    stop: broadcast::Sender<()>,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    pub fn new() -> Self {
        let (alive, tokens_dropped) = mpsc::channel(1);
        let (stop, _) = broadcast::channel(1);

        ShutdownController {
            tokens_dropped,
            alive,
            stop,
        }
    }

    pub fn token(&self) -> ShutdownToken {
        ShutdownToken {
            _alive: self.alive.clone(),
            stop: self.stop.subscribe(),
        }
    }

    pub async fn shutdown(mut self) {
        self.stop.send(()).ok();

        drop(self.alive);
        // Nothing is ever sent; this returns when the last token is dropped.
        self.tokens_dropped.recv().await;
    }
}
