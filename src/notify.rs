//! Transient user notices.
//!
//! One message slot with a fixed three-second lifetime. Posting replaces
//! whatever was showing; the host polls [`NoticeBoard::current`] each tick
//! and the board expires the message itself. Explicit dismissal ends it
//! early.

use chrono::{DateTime, Duration, Utc};

/// How long a notice stays visible.
const NOTICE_TTL_SECONDS: i64 = 3;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation of a completed action.
    Info,
    /// A recovered failure the user should know about.
    Error,
}

/// One transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Tone, for presentation.
    pub kind: NoticeKind,
    /// When the notice auto-dismisses.
    pub expires_at: DateTime<Utc>,
}

/// Holder of the current transient notice, if any.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a notice, replacing the current one and restarting the timer.
    pub fn post(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(kind = ?kind, %text, "posted notice");
        self.current = Some(Notice {
            text,
            kind,
            expires_at: Utc::now() + Duration::seconds(NOTICE_TTL_SECONDS),
        });
    }

    /// Posts an informational notice.
    pub fn info(&mut self, text: impl Into<String>) {
        self.post(NoticeKind::Info, text);
    }

    /// Posts an error notice.
    pub fn error(&mut self, text: impl Into<String>) {
        self.post(NoticeKind::Error, text);
    }

    /// Returns the notice still visible at `now`, expiring it lazily.
    pub fn current(&mut self, now: DateTime<Utc>) -> Option<&Notice> {
        if self
            .current
            .as_ref()
            .is_some_and(|notice| notice.expires_at <= now)
        {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Dismisses the notice before its timer runs out.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
