//! Per-call notification collector.
//!
//! Handlers (and anything they call) raise notifications instead of
//! returning early; the notification behavior merges them into the outcome
//! once the handler returns.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// A message raised during handling, with an optional fault description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    message: String,
    fault: Option<String>,
    raised_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fault: None,
            raised_at: Utc::now(),
        }
    }

    /// Attach the description of the fault that caused this notification
    pub fn with_fault(mut self, fault: impl std::fmt::Display) -> Self {
        self.fault = Some(fault.to_string());
        self
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Attached fault description, if any
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    /// When the notification was raised
    pub fn raised_at(&self) -> DateTime<Utc> {
        self.raised_at
    }
}

/// Collects notifications for exactly one in-flight request.
///
/// A notifier is owned by the [`RequestContext`](crate::RequestContext) of a
/// single dispatch and never shared across calls. Interior mutability lets
/// handlers notify through a shared reference.
#[derive(Debug, Default)]
pub struct Notifier {
    notifications: Mutex<Vec<Notification>>,
}

impl Notifier {
    /// Create an empty notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a notification
    pub fn notify(&self, message: impl Into<String>) {
        self.push(Notification::new(message));
    }

    /// Raise a notification caused by a fault
    pub fn notify_fault(&self, message: impl Into<String>, fault: impl std::fmt::Display) {
        self.push(Notification::new(message).with_fault(fault));
    }

    /// Raise several notifications at once
    pub fn notify_all<I, S>(&self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut notifications = self.notifications.lock();
        notifications.extend(messages.into_iter().map(Notification::new));
    }

    /// Append an already built notification
    pub fn push(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }

    /// True while nothing was raised
    pub fn is_valid(&self) -> bool {
        self.notifications.lock().is_empty()
    }

    /// Number of raised notifications
    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    /// Whether nothing was raised
    pub fn is_empty(&self) -> bool {
        self.is_valid()
    }

    /// Snapshot of the raised notifications, in order
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    /// Messages of the raised notifications, in order
    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .lock()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    /// Whether any notification carries a fault
    pub fn contains_fault(&self) -> bool {
        self.notifications.lock().iter().any(|n| n.fault.is_some())
    }

    /// Take every raised notification, leaving the notifier empty
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock())
    }
}
