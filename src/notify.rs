//! User notification capability
//!
//! The client never renders UI; it hands [`Notification`]s to whatever the
//! embedding application registers (a toast widget, a TUI status line, ...).

use tracing::{error, info, warn};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something the user should look at
    Warning,
    /// Informational
    Info,
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Short title
    pub title: String,
    /// Longer message
    pub message: String,
}

impl Notification {
    /// Build an error notification
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Build a success notification
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications
pub trait Notifier: Send + Sync {
    /// Deliver a notification to the user
    fn notify(&self, notification: Notification);
}

/// Notifier that writes to the log instead of a UI
///
/// Useful as a default for headless embedders and in examples.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                error!(title = %notification.title, "{}", notification.message);
            }
            NotificationKind::Warning => {
                warn!(title = %notification.title, "{}", notification.message);
            }
            NotificationKind::Success | NotificationKind::Info => {
                info!(title = %notification.title, "{}", notification.message);
            }
        }
    }
}
