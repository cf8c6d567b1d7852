//! Decode/encode diagnostics.
//!
//! Non-fatal issues met while reading or writing records are collected as
//! [`Notification`] items instead of being printed or turned into hard
//! errors. Each one carries the stream location and the operation that
//! raised it, and is mirrored as a `tracing` event when recorded.

use crate::io::dxf::Location;
use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A 999 comment tag, echoed as found.
    Comment,
    /// A group code the record's schema does not know; the value was discarded.
    UnknownTag,
    /// A subclass marker the record's schema does not expect.
    SubclassMismatch,
    /// A field newer than the version being read was present and kept.
    VersionMismatch,
    /// A value that does not parse under its group code's type; the default was kept.
    InvalidValue,
    /// A record rejected during decode and left out of the result.
    InvalidRecord,
    /// A record left out of the output because it could not be encoded.
    MissingRequiredField,
    /// A record type without a schema was skipped.
    NotImplemented,
    /// Feature exists but is not supported in this context.
    NotSupported,
    /// Any other non-fatal warning.
    Warning,
    /// Error that was recovered from.
    Error,
}

impl NotificationType {
    /// Whether the notification reports data that was dropped
    pub fn is_error(self) -> bool {
        matches!(
            self,
            NotificationType::InvalidRecord
                | NotificationType::MissingRequiredField
                | NotificationType::Error
        )
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Comment => "Comment",
            Self::UnknownTag => "UnknownTag",
            Self::SubclassMismatch => "SubclassMismatch",
            Self::VersionMismatch => "VersionMismatch",
            Self::InvalidValue => "InvalidValue",
            Self::InvalidRecord => "InvalidRecord",
            Self::MissingRequiredField => "MissingRequiredField",
            Self::NotImplemented => "NotImplemented",
            Self::NotSupported => "NotSupported",
            Self::Warning => "Warning",
            Self::Error => "Error",
        };
        f.write_str(name)
    }
}

/// A single notification produced during reading or writing.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
    /// Where in the stream it happened, if known.
    pub location: Option<Location>,
    /// The operation that raised it, e.g. `decode LAYER`.
    pub context: String,
}

impl Notification {
    /// Create a new notification without location or context.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
            location: None,
            context: String::new(),
        }
    }

    /// Attach a stream location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach the raising operation.
    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.notification_type)?;
        if let Some(location) = &self.location {
            write!(f, " {}", location)?;
        }
        if !self.context.is_empty() {
            write!(f, " ({})", self.context)?;
        }
        write!(f, " {}", self.message)
    }
}

/// Collects notifications during a read/write operation.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a bare notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.push(Notification::new(notification_type, message));
    }

    /// Record a notification raised by `context` at `location`.
    pub fn report(
        &mut self,
        notification_type: NotificationType,
        location: &Location,
        context: &str,
        message: impl Into<String>,
    ) {
        self.push(
            Notification::new(notification_type, message)
                .at(location.clone())
                .in_context(context),
        );
    }

    /// Record a fully built notification.
    pub fn push(&mut self, notification: Notification) {
        match notification.notification_type {
            NotificationType::Comment => tracing::debug!(
                location = ?notification.location,
                context = %notification.context,
                "{}",
                notification.message
            ),
            kind if kind.is_error() => tracing::error!(
                kind = %kind,
                location = ?notification.location,
                context = %notification.context,
                "{}",
                notification.message
            ),
            kind => tracing::warn!(
                kind = %kind,
                location = ?notification.location,
                context = %notification.context,
                "{}",
                notification.message
            ),
        }
        self.items.push(notification);
    }

    /// Move all notifications of `other` to the end of this collection.
    ///
    /// The notifications are not re-emitted as `tracing` events.
    pub fn append(&mut self, other: &mut NotificationCollection) {
        self.items.append(&mut other.items);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
