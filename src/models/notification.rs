//! Snackbar notifications.

use crate::config::SNACKBAR_AUTO_HIDE_MS;

/// Visual severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, non-blocking message.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub auto_hide_ms: u32,
}

impl Notification {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: 0,
            severity,
            message: message.into(),
            auto_hide_ms: SNACKBAR_AUTO_HIDE_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

/// Bounded queue of visible notifications.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    /// Enqueue, dropping the oldest entries beyond `capacity`. Returns the assigned id.
    pub fn push(&mut self, mut notification: Notification, capacity: usize) -> u64 {
        self.next_id += 1;
        notification.id = self.next_id;
        self.items.push(notification);
        if self.items.len() > capacity {
            let excess = self.items.len() - capacity;
            self.items.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut queue = NotificationQueue::default();
        let a = queue.push(Notification::info("a"), 3);
        let b = queue.push(Notification::info("b"), 3);
        assert_ne!(a, b);
        assert_eq!(queue.items().len(), 2);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = NotificationQueue::default();
        for msg in ["a", "b", "c", "d"] {
            queue.push(Notification::warning(msg), 3);
        }
        let messages: Vec<_> = queue.items().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_dismiss() {
        let mut queue = NotificationQueue::default();
        let id = queue.push(Notification::success("done"), 3);
        queue.push(Notification::error("bad"), 3);
        queue.dismiss(id);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].severity, Severity::Error);
        assert_eq!(queue.items()[0].auto_hide_ms, SNACKBAR_AUTO_HIDE_MS);
    }
}
