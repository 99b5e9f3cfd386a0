//! Queue of transient user-facing notices.
//!
//! Created once at startup and handed to every component that reports
//! to the user. Cleared on logout. Notices stay queued until they are
//! drained or dismissed.

use orienta_core::notice::Notice;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use uuid::Uuid;

const BROADCAST_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct MessageCenter {
    queue: Arc<Mutex<VecDeque<Notice>>>,
    sender: broadcast::Sender<Notice>,
}

impl MessageCenter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            sender,
        }
    }

    pub fn success(&self, text: impl Into<String>) -> Notice {
        self.push(Notice::success(text))
    }

    pub fn error(&self, text: impl Into<String>) -> Notice {
        self.push(Notice::error(text))
    }

    /// Queues a notice and broadcasts it to subscribers.
    pub fn push(&self, notice: Notice) -> Notice {
        tracing::debug!("[MessageCenter] {}: {}", notice.kind, notice.text);
        self.with_queue(|queue| queue.push_back(notice.clone()));
        // No subscribers is fine; the queue still holds the notice.
        let _ = self.sender.send(notice.clone());
        notice
    }

    /// Notices not yet drained or dismissed, oldest first.
    pub fn pending(&self) -> Vec<Notice> {
        self.with_queue(|queue| queue.iter().cloned().collect())
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.with_queue(|queue| queue.drain(..).collect())
    }

    /// Removes one notice. Returns whether it was still queued.
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.with_queue(|queue| {
            let before = queue.len();
            queue.retain(|notice| notice.id != id);
            queue.len() != before
        })
    }

    pub fn clear(&self) {
        self.with_queue(VecDeque::clear);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut VecDeque<Notice>) -> R) -> R {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut queue)
    }
}

impl Default for MessageCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orienta_core::notice::NoticeKind;

    #[test]
    fn test_push_pending_and_drain() {
        let center = MessageCenter::new();
        center.success("Login successful!");
        center.error("Connection error. Check your internet.");

        let pending = center.pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].kind, NoticeKind::Success);
        assert!(pending[1].is_error());

        assert_eq!(center.drain().len(), 2);
        assert!(center.pending().is_empty());
    }

    #[test]
    fn test_dismiss_removes_only_that_notice() {
        let center = MessageCenter::new();
        let first = center.error("first");
        center.error("second");

        assert!(center.dismiss(first.id));
        assert!(!center.dismiss(first.id));
        let pending = center.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].text, "second");
    }

    #[test]
    fn test_clear_and_clones_share_queue() {
        let center = MessageCenter::new();
        let clone = center.clone();
        clone.success("saved");
        assert_eq!(center.pending().len(), 1);

        center.clear();
        assert!(clone.pending().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_receive_new_notices() {
        let center = MessageCenter::new();
        let mut rx = center.subscribe();

        center.error("Some guide data is invalid.");
        let received = rx.recv().await.unwrap();
        assert_eq!(received.text, "Some guide data is invalid.");
    }
}
