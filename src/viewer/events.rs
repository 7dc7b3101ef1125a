// SPDX-License-Identifier: MPL-2.0
//! Viewer notifications.
//!
//! Every subscriber receives every event, in emission order, over an
//! unbounded channel. Nothing is coalesced: a burst of drag steps produces
//! one `FrameChanged` per step and the last one is always the true frame.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Something the surrounding UI may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The committed frame changed (1-based).
    FrameChanged { frame: u32 },
    /// A frame finished loading; `progress` is the new ready fraction.
    FrameLoaded { frame: u32, progress: f32 },
    /// A frame failed to load (1-based).
    FrameFailed { frame: u32, reason: String },
    /// Auto-rotate started or stopped.
    AutoRotateChanged { active: bool },
}

/// Fan-out of [`ViewerEvent`]s to any number of subscribers.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<ViewerEvent>>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ViewerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Delivers `event` to every live subscriber; dropped receivers are pruned.
    pub fn emit(&self, event: ViewerEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Drops every subscriber; their receivers observe the end of the stream.
    pub fn close(&self) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
