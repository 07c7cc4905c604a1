//! Best-effort user notification channel.
//!
//! The collection emits a [`Notice`] for every operation outcome; the
//! presentation layer drains the receiving end and renders toasts. The
//! channel is fire-and-forget: a missing receiver never affects the
//! collection's correctness, and no acknowledgment flows back.
//!
//! The [`Notifier`] is an injected dependency of the collection rather
//! than ambient process-wide state, so the core stays testable without
//! a UI tree.

use tokio::sync::mpsc;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
    /// Something degraded but recoverable happened.
    Warning,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Short headline.
    pub title: String,
    /// Optional longer detail line.
    pub detail: Option<String>,
}

/// Sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    /// Creates a connected notifier and its receiving end.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emits a success notice.
    pub fn success(&self, title: impl Into<String>, detail: impl Into<String>) {
        self.send(NoticeKind::Success, title.into(), Some(detail.into()));
    }

    /// Emits an error notice.
    pub fn error(&self, title: impl Into<String>, detail: impl Into<String>) {
        self.send(NoticeKind::Error, title.into(), Some(detail.into()));
    }

    /// Emits a warning notice.
    pub fn warning(&self, title: impl Into<String>, detail: impl Into<String>) {
        self.send(NoticeKind::Warning, title.into(), Some(detail.into()));
    }

    fn send(&self, kind: NoticeKind, title: String, detail: Option<String>) {
        let notice = Notice {
            kind,
            title,
            detail,
        };
        if self.tx.send(notice).is_err() {
            tracing::trace!("notice dropped: no listener attached");
        }
    }
}
