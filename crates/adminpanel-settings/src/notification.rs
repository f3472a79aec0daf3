//! Single-slot notification toast

use adminpanel_core::Severity;
use std::time::{Duration, Instant};

/// Default delay before a shown notification hides itself
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(6000);

/// Transient feedback for the last action
///
/// Only one message is held at a time; showing a new one replaces the old
/// one and restarts the auto-hide delay.
#[derive(Debug, Clone)]
pub struct Notification {
    open: bool,
    message: String,
    severity: Severity,
    shown_at: Option<Instant>,
    auto_hide: Duration,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_HIDE)
    }
}

impl Notification {
    /// Hidden notification that auto-hides after `auto_hide` once shown
    #[must_use]
    pub const fn new(auto_hide: Duration) -> Self {
        Self {
            open: false,
            message: String::new(),
            severity: Severity::Success,
            shown_at: None,
            auto_hide,
        }
    }

    /// Show `message`, replacing whatever was shown before
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    /// Same as [`Self::show`] with an explicit clock reading
    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.open = true;
        self.message = message.into();
        self.severity = severity;
        self.shown_at = Some(now);
    }

    /// Hide the notification; message and severity are kept for inspection
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Hide the notification if its delay has elapsed at `now`
    ///
    /// Returns `true` when this call hid it.
    pub fn dismiss_expired(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(shown_at) if self.open && now.saturating_duration_since(shown_at) >= self.auto_hide => {
                self.open = false;
                true
            }
            _ => false,
        }
    }

    /// Whether the toast is visible
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Last message shown
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity of the last message shown
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Configured auto-hide delay
    #[must_use]
    pub const fn auto_hide(&self) -> Duration {
        self.auto_hide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_hidden() {
        let notification = Notification::default();
        assert!(!notification.is_open());
        assert!(notification.message().is_empty());
        assert_eq!(notification.auto_hide(), Duration::from_secs(6));
    }

    #[test]
    fn test_latest_message_wins() {
        let mut notification = Notification::default();
        notification.show("Sub-admin added successfully", Severity::Success);
        notification.show("Failed to fetch sub-admins", Severity::Error);

        assert!(notification.is_open());
        assert_eq!(notification.message(), "Failed to fetch sub-admins");
        assert_eq!(notification.severity(), Severity::Error);
    }

    #[test]
    fn test_close() {
        let mut notification = Notification::default();
        notification.show("done", Severity::Success);
        notification.close();

        assert!(!notification.is_open());
        assert_eq!(notification.message(), "done");
    }

    #[test]
    fn test_auto_hide() {
        let start = Instant::now();
        let mut notification = Notification::new(Duration::from_millis(100));
        notification.show_at("done", Severity::Success, start);

        assert!(!notification.dismiss_expired(start + Duration::from_millis(99)));
        assert!(notification.is_open());

        assert!(notification.dismiss_expired(start + Duration::from_millis(100)));
        assert!(!notification.is_open());

        // Already hidden
        assert!(!notification.dismiss_expired(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_new_message_restarts_delay() {
        let start = Instant::now();
        let mut notification = Notification::new(Duration::from_millis(100));
        notification.show_at("first", Severity::Success, start);
        notification.show_at("second", Severity::Error, start + Duration::from_millis(80));

        assert!(!notification.dismiss_expired(start + Duration::from_millis(150)));
        assert!(notification.dismiss_expired(start + Duration::from_millis(180)));
    }
}
