//! Timed advisory messages, kept apart from session state.
//!
//! Each kind has a single slot. Posting to a slot replaces its message and
//! restarts its expiry; the other slot is untouched. Expiry is measured on
//! [`tokio::time::Instant`], so paused-clock tests can step through it.

use std::time::Duration;

use derive_getters::Getters;
use strum::{Display, EnumIter};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    /// Something failed.
    Error,
    /// Something completed.
    Success,
}

/// A message shown until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notification {
    kind: NotificationKind,
    message: String,
    expires_at: Instant,
}

impl Notification {
    /// Whether the notification should still be displayed at `now`.
    pub fn is_active_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Two independent self-clearing slots, one per kind.
#[derive(Debug, Clone)]
pub struct Notifications {
    error_ttl: Duration,
    success_ttl: Duration,
    error: Option<Notification>,
    success: Option<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(3))
    }
}

impl Notifications {
    /// Creates empty slots with the given display durations.
    #[instrument]
    pub fn new(error_ttl: Duration, success_ttl: Duration) -> Self {
        Self {
            error_ttl,
            success_ttl,
            error: None,
            success: None,
        }
    }

    /// Posts an error, replacing any pending one.
    #[instrument(skip(self, message))]
    pub fn error(&mut self, message: impl Into<String>) {
        self.post(NotificationKind::Error, message.into());
    }

    /// Posts a success message, replacing any pending one.
    #[instrument(skip(self, message))]
    pub fn success(&mut self, message: impl Into<String>) {
        self.post(NotificationKind::Success, message.into());
    }

    fn post(&mut self, kind: NotificationKind, message: String) {
        let ttl = match kind {
            NotificationKind::Error => self.error_ttl,
            NotificationKind::Success => self.success_ttl,
        };
        info!(%kind, %message, ?ttl, "Notification posted");
        let notification = Notification {
            kind,
            message,
            expires_at: Instant::now() + ttl,
        };
        *self.slot_mut(kind) = Some(notification);
    }

    fn slot(&self, kind: NotificationKind) -> &Option<Notification> {
        match kind {
            NotificationKind::Error => &self.error,
            NotificationKind::Success => &self.success,
        }
    }

    fn slot_mut(&mut self, kind: NotificationKind) -> &mut Option<Notification> {
        match kind {
            NotificationKind::Error => &mut self.error,
            NotificationKind::Success => &mut self.success,
        }
    }

    /// The notification of `kind` still on display, if any.
    pub fn active(&self, kind: NotificationKind) -> Option<&Notification> {
        let now = Instant::now();
        self.slot(kind).as_ref().filter(|n| n.is_active_at(now))
    }

    /// Drops expired notifications.
    pub fn clear_expired(&mut self) {
        let now = Instant::now();
        for slot in [&mut self.error, &mut self.success] {
            if slot.as_ref().is_some_and(|n| !n.is_active_at(now)) {
                debug!("Notification expired");
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(notifications: &Notifications, kind: NotificationKind) -> Option<String> {
        notifications.active(kind).map(|n| n.message().clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_clears_after_five_seconds() {
        let mut notifications = Notifications::default();
        notifications.error("boom");
        tokio::time::advance(Duration::from_millis(4_900)).await;
        assert_eq!(message(&notifications, NotificationKind::Error).as_deref(), Some("boom"));
        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(message(&notifications, NotificationKind::Error), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_after_three_seconds() {
        let mut notifications = Notifications::default();
        notifications.success("done");
        tokio::time::advance(Duration::from_millis(2_900)).await;
        assert!(notifications.active(NotificationKind::Success).is_some());
        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(notifications.active(NotificationKind::Success).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_notification_restarts_its_own_timer_only() {
        let mut notifications = Notifications::default();
        notifications.error("first");
        notifications.success("ok");
        tokio::time::advance(Duration::from_secs(2)).await;
        notifications.success("ok again");

        tokio::time::advance(Duration::from_millis(3_500)).await;
        // Error was posted 5.5s ago, the second success only 3.5s ago.
        assert_eq!(message(&notifications, NotificationKind::Error), None);
        assert_eq!(message(&notifications, NotificationKind::Success), None);

        notifications.error("second");
        tokio::time::advance(Duration::from_secs(4)).await;
        notifications.error("third");
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(message(&notifications, NotificationKind::Error).as_deref(), Some("third"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacing_success_extends_display() {
        let mut notifications = Notifications::default();
        notifications.success("one");
        tokio::time::advance(Duration::from_secs(2)).await;
        notifications.success("two");
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(message(&notifications, NotificationKind::Success).as_deref(), Some("two"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_expired_drops_stale_slots() {
        let mut notifications = Notifications::new(Duration::from_secs(1), Duration::from_secs(10));
        notifications.error("gone soon");
        notifications.success("stays");
        tokio::time::advance(Duration::from_secs(2)).await;
        notifications.clear_expired();
        assert!(notifications.error.is_none());
        assert!(notifications.success.is_some());
    }
}
