//! Transient notifications for cross-cutting operations.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A notification waiting to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: ToastLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: ToastLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: ToastLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub id: u64,
    pub toast: Toast,
    pub shown_at: Instant,
}

/// Queue of visible toasts; each expires after the TTL.
#[derive(Debug, Clone)]
pub struct ToastStore {
    toasts: Vec<ActiveToast>,
    ttl: Duration,
    next_id: u64,
    max_visible: usize,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

impl ToastStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            ttl,
            next_id: 0,
            max_visible: 3,
        }
    }

    pub fn push(&mut self, toast: Toast, now: Instant) -> u64 {
        self.next_id += 1;
        self.toasts.push(ActiveToast {
            id: self.next_id,
            toast,
            shown_at: now,
        });
        if self.toasts.len() > self.max_visible {
            self.toasts.remove(0);
        }
        self.next_id
    }

    /// Drop toasts older than the TTL. Errors stay twice as long.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts.retain(|t| {
            let limit = if t.toast.level == ToastLevel::Error { ttl * 2 } else { ttl };
            now.saturating_duration_since(t.shown_at) < limit
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn visible(&self) -> &[ActiveToast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&ActiveToast> {
        self.toasts.last()
    }
}
