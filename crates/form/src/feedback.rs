//! Success and error banners shown after a submission.
//!
//! Each banner is a two-state machine (hidden, visible). Showing one banner
//! hides the other at once and schedules its own hide after the dismiss
//! delay. A hide scheduled by an earlier show is never cancelled, so a banner
//! shown twice in quick succession may disappear early; it never reappears
//! with stale content.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Delay before a banner hides itself.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// The two banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Error,
}

/// Visibility of both banners at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banners {
    pub success_visible: bool,
    pub error_visible: bool,
    /// Text of the error banner. Kept after hiding, like the element's text.
    pub error_message: String,
}

impl Banners {
    pub fn is_visible(&self, banner: Banner) -> bool {
        match banner {
            Banner::Success => self.success_visible,
            Banner::Error => self.error_visible,
        }
    }
}

/// Drives the banners on the Tokio timer.
///
/// Hides are scheduled on the current Tokio runtime, so tests can drive them
/// with paused time.
#[derive(Debug, Clone)]
pub struct FeedbackController {
    state: Arc<watch::Sender<Banners>>,
    dismiss_after: Duration,
}

impl FeedbackController {
    pub fn new(dismiss_after: Duration) -> Self {
        let (tx, _rx) = watch::channel(Banners::default());
        Self {
            state: Arc::new(tx),
            dismiss_after,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Show the success banner and hide the error banner.
    pub fn show_success(&self) {
        self.state.send_modify(|b| {
            b.success_visible = true;
            b.error_visible = false;
        });
        debug!("success banner shown");
        self.schedule_hide(Banner::Success);
    }

    /// Show `message` in the error banner and hide the success banner.
    pub fn show_error(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "error banner shown");
        self.state.send_modify(|b| {
            b.error_message = message;
            b.error_visible = true;
            b.success_visible = false;
        });
        self.schedule_hide(Banner::Error);
    }

    /// Snapshot of the current banner state.
    pub fn current(&self) -> Banners {
        self.state.borrow().clone()
    }

    /// Watch banner transitions.
    pub fn subscribe(&self) -> watch::Receiver<Banners> {
        self.state.subscribe()
    }

    fn schedule_hide(&self, banner: Banner) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(?banner, "no runtime available, banner will not auto-hide");
            return;
        };
        // Deadline is taken at show time, not when the task first runs.
        let deadline = Instant::now() + self.dismiss_after;
        let state = Arc::clone(&self.state);
        handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            state.send_modify(|b| match banner {
                Banner::Success => b.success_visible = false,
                Banner::Error => b.error_visible = false,
            });
            debug!(?banner, "banner auto-hidden");
        });
    }
}

impl Default for FeedbackController {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn success_hides_after_delay() {
        let feedback = FeedbackController::default();
        feedback.show_success();
        assert!(feedback.current().success_visible);
        assert!(!feedback.current().error_visible);

        sleep_ms(4999).await;
        assert!(feedback.current().success_visible);

        sleep_ms(2).await;
        assert!(!feedback.current().success_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn error_sets_text_and_hides_success() {
        let feedback = FeedbackController::default();
        feedback.show_success();
        feedback.show_error("Please complete all required fields.");

        let banners = feedback.current();
        assert!(banners.is_visible(Banner::Error));
        assert!(!banners.is_visible(Banner::Success));
        assert_eq!(banners.error_message, "Please complete all required fields.");

        sleep_ms(5001).await;
        assert!(!feedback.current().error_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn banners_are_never_both_visible() {
        let feedback = FeedbackController::default();
        let mut rx = feedback.subscribe();

        feedback.show_error("boom");
        feedback.show_success();
        feedback.show_error("again");

        let seen = rx.borrow_and_update().clone();
        assert!(!(seen.success_visible && seen.error_visible));
        assert!(seen.error_visible);
        assert_eq!(seen.error_message, "again");
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_timer_may_hide_a_later_show_early() {
        let feedback = FeedbackController::default();
        feedback.show_success();
        sleep_ms(3000).await;
        feedback.show_success();

        // The first show's timer fires at t=5000 and hides the banner.
        sleep_ms(2001).await;
        assert!(!feedback.current().success_visible);

        // The second timer fires at t=8000 without re-showing anything.
        sleep_ms(3000).await;
        assert!(!feedback.current().success_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_delay() {
        let feedback = FeedbackController::new(Duration::from_millis(100));
        feedback.show_error("x");
        sleep_ms(101).await;
        assert!(!feedback.current().error_visible);
    }

    #[test]
    fn without_runtime_banner_stays_visible() {
        let feedback = FeedbackController::default();
        feedback.show_success();
        assert!(feedback.current().success_visible);
    }
}
