//! User-facing notices.
//!
//! Handlers push notices and move on; the next page render drains the queue
//! and shows them as toasts. Nothing can await or inspect a notice after it
//! is pushed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    /// CSS modifier used by the toast template.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Shared notice queue. Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifications {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice for the next render.
    pub fn push(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::info!(message = %notice.message, "Error notice"),
            NoticeLevel::Success | NoticeLevel::Info => {
                tracing::debug!(level = notice.level.as_str(), message = %notice.message, "Notice");
            }
        }
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notice);
    }

    /// Take every queued notice, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order_and_empties() {
        let notifications = Notifications::new();
        notifications.push(Notice::success("one"));
        notifications.push(Notice::error("two"));

        let drained = notifications.drain();
        assert_eq!(drained, vec![Notice::success("one"), Notice::error("two")]);
        assert!(notifications.drain().is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let notifications = Notifications::new();
        notifications.clone().push(Notice::info("shared"));
        assert_eq!(notifications.drain().len(), 1);
    }
}
