#![forbid(unsafe_code)]

//! Transient confirmation notice.
//!
//! The notice is shown after an accepted submit and hides itself after a
//! fixed delay. At most one notice exists; showing it again while visible
//! restarts the delay from that moment.
//!
//! The dismissal timer is declared as a subscription whose id carries the
//! show generation. Calling [`NoticeScheduler::show`] bumps the generation,
//! so reconciliation cancels the old timer and starts a fresh one. A late
//! message from a cancelled timer carries a stale token and is ignored.

use std::time::Duration;

use web_time::Instant;

use crate::subscription::{After, SubId, Subscription};

/// Default time the notice stays up.
pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_millis(5000);

const NOTICE_SUB_BASE: SubId = 0x4E4F_5449_0000_0000; // "NOTI"

/// Identifies one showing of the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeToken(pub u64);

/// Notice copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub heading: String,
    pub body: String,
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            heading: "Message Sent!".to_string(),
            body: "Thanks for completing the form. We'll be in touch soon!".to_string(),
        }
    }
}

/// Visibility plus the one pending dismissal timer.
#[derive(Debug, Clone)]
pub struct NoticeScheduler {
    notice: Notice,
    delay: Duration,
    visible: bool,
    generation: u64,
    shown_at: Option<Instant>,
}

impl Default for NoticeScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DELAY)
    }
}

impl NoticeScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            notice: Notice::default(),
            delay,
            visible: false,
            generation: 0,
            shown_at: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = notice;
        self
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Token of the current showing, if visible.
    pub fn token(&self) -> Option<NoticeToken> {
        self.visible.then_some(NoticeToken(self.generation))
    }

    /// Show the notice and (re)start the full delay.
    pub fn show(&mut self) -> NoticeToken {
        self.generation = self.generation.wrapping_add(1);
        self.visible = true;
        self.shown_at = Some(Instant::now());
        tracing::debug!(
            generation = self.generation,
            delay_ms = self.delay.as_millis() as u64,
            "notice shown"
        );
        NoticeToken(self.generation)
    }

    /// Hide now and cancel the pending timer.
    pub fn hide(&mut self) {
        if self.visible {
            tracing::debug!(generation = self.generation, "notice dismissed");
        }
        self.visible = false;
        self.shown_at = None;
    }

    /// Timer expiry for `token`.
    ///
    /// Returns `true` if this hid the notice; stale tokens do nothing.
    pub fn expire(&mut self, token: NoticeToken) -> bool {
        if !self.visible || token.0 != self.generation {
            tracing::trace!(
                token = token.0,
                current = self.generation,
                "stale notice timer ignored"
            );
            return false;
        }
        self.visible = false;
        self.shown_at = None;
        tracing::debug!(generation = self.generation, "notice expired");
        true
    }

    /// Wall-clock time left before the notice hides.
    pub fn remaining(&self) -> Option<Duration> {
        let shown_at = self.shown_at?;
        self.visible.then(|| self.delay.saturating_sub(shown_at.elapsed()))
    }

    /// The dismissal timer to declare, while visible.
    pub fn subscription<M, F>(&self, make_msg: F) -> Option<Box<dyn Subscription<M>>>
    where
        M: Send + 'static,
        F: Fn(NoticeToken) -> M + Send + Sync + 'static,
    {
        let token = self.token()?;
        Some(Box::new(After::new(
            NOTICE_SUB_BASE ^ token.0,
            self.delay,
            move || make_msg(token),
        )))
    }
}
