//! # Flash Messages
//!
//! One-shot status messages queued by a mutating request and handed out,
//! then forgotten, by the next rendered page. There is a single user, so
//! the queue lives in the shared application state rather than a session.

use std::collections::VecDeque;

use eventcal_core::models::message::FlashMessage;
use tokio::sync::Mutex;

/// Messages kept while no page is rendered; older ones are dropped first.
pub const MAX_QUEUED: usize = 32;

#[derive(Debug, Default)]
pub struct FlashMessages {
    queue: Mutex<VecDeque<FlashMessage>>,
}

impl FlashMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, message: FlashMessage) {
        let mut queue = self.queue.lock().await;
        if queue.len() >= MAX_QUEUED {
            queue.pop_front();
        }
        queue.push_back(message);
    }

    pub async fn success(&self, text: impl Into<String>) {
        self.push(FlashMessage::success(text)).await;
    }

    pub async fn error(&self, text: impl Into<String>) {
        self.push(FlashMessage::error(text)).await;
    }

    /// Drains every queued message in insertion order.
    pub async fn take(&self) -> Vec<FlashMessage> {
        self.queue.lock().await.drain(..).collect()
    }
}
