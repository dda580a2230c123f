//! Notifications raised by the form flow
//!
//! The form controller never talks to a UI directly. It publishes
//! [`Notification`]s on a [`NotificationBus`] built on
//! `tokio::sync::broadcast`; pages, toasts and log sinks subscribe.
//!
//! ```text
//! FormController ──▶ NotificationBus::publish() ──▶ broadcast channel ──▶ toast renderer
//!                                                                     ──▶ log subscriber
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = NotificationBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(Role::Buyer, Notification::validation_failed());
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{}: {}", envelope.notification.title, envelope.notification.description);
//! }
//! ```

use crate::core::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// How loudly the host should present a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Default,
    Destructive,
}

/// What happened to a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// One or more fields failed validation; nothing was sent
    ValidationFailed,
    /// The request left without a transport error
    Submitted,
    /// The request could not be dispatched
    SubmissionFailed,
}

/// A short message for the host UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn validation_failed() -> Self {
        Self {
            kind: NotificationKind::ValidationFailed,
            title: "Validation Error".to_string(),
            description: "Please fill in all required fields correctly.".to_string(),
            severity: Severity::Destructive,
        }
    }

    pub fn submitted() -> Self {
        Self {
            kind: NotificationKind::Submitted,
            title: "Success!".to_string(),
            description: "Your request has been submitted. Our team will contact you shortly."
                .to_string(),
            severity: Severity::Default,
        }
    }

    pub fn submission_failed() -> Self {
        Self {
            kind: NotificationKind::SubmissionFailed,
            title: "Error".to_string(),
            description: "Failed to submit form. Please try again.".to_string(),
            severity: Severity::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Envelope wrapping a notification with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    /// Unique notification ID
    pub id: Uuid,
    /// When the notification was raised
    pub timestamp: DateTime<Utc>,
    /// Role of the form that raised it
    pub role: Role,
    pub notification: Notification,
}

impl NotificationEnvelope {
    pub fn new(role: Role, notification: Notification) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role,
            notification,
        }
    }
}

/// Broadcast channel for form notifications
///
/// Cheap to clone; every clone publishes to the same subscribers.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<NotificationEnvelope>,
}

impl NotificationBus {
    /// Create a bus buffering up to `capacity` notifications per slow receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all subscribers
    ///
    /// Never fails. With no subscribers the notification is dropped.
    /// Returns the number of receivers that will see it.
    pub fn publish(&self, role: Role, notification: Notification) -> usize {
        let envelope = NotificationEnvelope::new(role, notification);
        // send() only errors when nobody is listening
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Receive every notification published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(64)
    }
}
