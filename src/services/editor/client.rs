//! Editor Event Bus
//!
//! Single-consumer channel connecting event producers (simulator, file
//! watcher, background workers) to the tracker. Producers clone the
//! client freely; only the tracker loop drains the receiver, so shared
//! state is mutated from one place.

use tokio::sync::mpsc;
use tracing::warn;

use super::events::EditorEvent;

/// Sending half of the editor event bus. Cheap to clone.
#[derive(Clone)]
pub struct EditorClient {
    tx: mpsc::UnboundedSender<EditorEvent>,
}

/// Receiving half, held by the tracker loop
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<EditorEvent>,
}

/// Create a connected client/receiver pair
pub fn event_bus() -> (EditorClient, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EditorClient { tx }, EventReceiver { rx })
}

impl EditorClient {
    /// Post an event to the tracker. Dropped silently (with a warning)
    /// if the tracker has shut down.
    pub fn emit(&self, event: EditorEvent) {
        if self.tx.send(event).is_err() {
            warn!("Editor event dropped: tracker receiver is gone");
        }
    }
}

impl EventReceiver {
    /// Wait for the next event; `None` once every client is dropped
    pub async fn recv(&mut self) -> Option<EditorEvent> {
        self.rx.recv().await
    }

    /// Non-blocking poll, used when draining between frames
    pub fn try_recv(&mut self) -> Option<EditorEvent> {
        self.rx.try_recv().ok()
    }
}
