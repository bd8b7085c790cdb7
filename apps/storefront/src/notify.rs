//! # Notifications
//!
//! User-facing toasts. Fire-and-forget: callers never look at a result.
//!
//! ```text
//! CartEngine / commands ──notify(kind, title, message)──► Notifier
//!                                                          ├── TracingNotifier   (logs)
//!                                                          ├── RecordingNotifier (tests, shell)
//!                                                          └── (A, B)            (both)
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{info, warn};

use bite_core::NotificationKind;

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str);

    fn success(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Success, title, message);
    }

    fn destructive(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Destructive, title, message);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        match kind {
            NotificationKind::Success => info!(title, message, "notification"),
            NotificationKind::Destructive => warn!(title, message, "notification"),
        }
    }
}

/// Keeps every notification in memory.
///
/// The shell drains it after each command to print toasts; tests inspect it.
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn all(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes and clears everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                kind,
                title: title.to_string(),
                message: message.to_string(),
            });
    }
}

/// Sends every notification to both sinks.
impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        self.0.notify(kind, title, message);
        self.1.notify(kind, title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_drain() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.success("Added to Cart", "Pizza has been added to your cart.");
        notifier.destructive("Item Unavailable", "Soup is currently not available.");

        assert_eq!(handle.all().len(), 2);
        assert_eq!(
            handle.last().map(|n| n.kind),
            Some(NotificationKind::Destructive)
        );

        let drained = handle.drain();
        assert_eq!(drained[0].title, "Added to Cart");
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn test_pair_forwards_to_both() {
        let first = RecordingNotifier::new();
        let second = RecordingNotifier::new();
        let pair = (first.clone(), (second.clone(), TracingNotifier));

        pair.success("Address Validated", "Your delivery address has been confirmed.");

        assert_eq!(first.all(), second.all());
        assert_eq!(first.all().len(), 1);
    }
}
