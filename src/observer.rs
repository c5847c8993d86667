//! Side channel from the dashboard core to whatever renders it.
//!
//! The core never returns storage or remote failures to its callers; it
//! reports them here as [`Notification`]s alongside the usual
//! projects/stats change events.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::models::{ProjectRecord, Stats};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A user-visible message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Receives every change the dashboard core makes.
pub trait DashboardObserver: Send + Sync {
    fn projects_changed(&self, projects: &[ProjectRecord]);
    fn stats_changed(&self, stats: &Stats);
    fn notify(&self, notification: Notification);
}

/// Observer that records what it is told.
///
/// Notifications queue up until drained. Only the latest projects and stats
/// are kept.
#[derive(Default)]
pub struct NotificationLog {
    notifications: Mutex<VecDeque<Notification>>,
    projects: Mutex<Vec<ProjectRecord>>,
    stats: Mutex<Stats>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.notifications.lock().expect("notification lock poisoned");
        queue.drain(..).collect()
    }

    pub fn last_projects(&self) -> Vec<ProjectRecord> {
        self.projects.lock().expect("notification lock poisoned").clone()
    }

    pub fn last_stats(&self) -> Stats {
        *self.stats.lock().expect("notification lock poisoned")
    }
}

impl DashboardObserver for NotificationLog {
    fn projects_changed(&self, projects: &[ProjectRecord]) {
        *self.projects.lock().expect("notification lock poisoned") = projects.to_vec();
    }

    fn stats_changed(&self, stats: &Stats) {
        *self.stats.lock().expect("notification lock poisoned") = *stats;
    }

    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => tracing::error!("{}", notification.message),
            NotificationKind::Warning => tracing::warn!("{}", notification.message),
            _ => tracing::info!("{}", notification.message),
        }
        self.notifications
            .lock()
            .expect("notification lock poisoned")
            .push_back(notification);
    }
}
