//! Transient notifications shown to the user

use std::fmt::{Display, Error, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}



/// See [`notification_channel`]
pub type NotificationSender = tokio::sync::watch::Sender<Option<Notification>>;
/// See [`notification_channel`]
pub type NotificationReceiver = tokio::sync::watch::Receiver<Option<Notification>>;

/// Create a channel, that can be used to be told about every new notification
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    tokio::sync::watch::channel(None)
}



/// Keeps track of the notifications shown to the user
#[derive(Debug, Default)]
pub struct Notifications {
    history: Vec<Notification>,
    channel: Option<NotificationSender>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_channel(channel: NotificationSender) -> Self {
        Self { history: Vec::new(), channel: Some(channel) }
    }

    /// The notification currently displayed
    pub fn last(&self) -> Option<&Notification> {
        self.history.last()
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn info(&mut self, message: &str) {
        self.notify(message, NotificationKind::Info);
    }
    pub fn success(&mut self, message: &str) {
        self.notify(message, NotificationKind::Success);
    }
    pub fn error(&mut self, message: &str) {
        self.notify(message, NotificationKind::Error);
    }

    fn notify(&mut self, message: &str, kind: NotificationKind) {
        let notification = Notification{ message: message.to_string(), kind };
        match kind {
            NotificationKind::Error => log::warn!("{}", notification),
            _ => log::info!("{}", notification),
        }

        if let Some(sender) = &self.channel {
            // Nobody listening is fine
            let _ = sender.send(Some(notification.clone()));
        }
        self.history.push(notification);
    }
}
