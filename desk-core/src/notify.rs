//! Notification side channel.
//!
//! Resource hooks report outcomes here instead of propagating them past
//! their boundary. Delivery (toasts, dialogs, logs) is up to the embedder.

use std::sync::{Mutex, PoisonError};

use crate::errors::{DeskError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Error class for failures, e.g. `not-found`.
    pub class_name: Option<&'static str>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            class_name: None,
        }
    }

    /// Generic failure notice. Network and server failures get a fixed
    /// message; other kinds keep the backend's message.
    pub fn failure(err: &DeskError) -> Self {
        let message = match err.kind {
            ErrorKind::Network => "Unable to reach the server".to_string(),
            kind if kind.is_server() => "Something went wrong, please try again".to_string(),
            _ => err.message.clone(),
        };
        Self {
            level: NoticeLevel::Error,
            message,
            class_name: Some(err.class_name()),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::warn!(
                class = notice.class_name.unwrap_or("unknown"),
                "{}",
                notice.message
            ),
        }
    }
}

/// Keeps notices in memory for a UI layer (or a test) to drain.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_notices_hide_server_details() {
        let n = Notice::failure(&DeskError::general_error("NullPointerException at line 3"));
        assert_eq!(n.message, "Something went wrong, please try again");
        assert_eq!(n.class_name, Some("general-error"));

        let n = Notice::failure(&DeskError::not_found("Organization not found"));
        assert_eq!(n.message, "Organization not found");
    }

    #[test]
    fn memory_notifier_drains() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::success("saved"));
        notifier.notify(Notice::failure(&DeskError::network("refused")));

        assert_eq!(notifier.errors().len(), 1);
        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.notices().is_empty());
    }
}
