/// Notification and icon presentation, driven by lifecycle transitions
use serde::Serialize;

use crate::reminder::Reminder;

/// Options object for chrome.notifications.create
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub icon_url: &'static str,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<NotificationButton>,
    pub priority: i32,
    /// The system sound is always suppressed; the extension plays its own
    pub silent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationButton {
    pub title: &'static str,
}

/// Icon path map for chrome.action.setIcon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconPaths {
    #[serde(rename = "16")]
    pub px16: &'static str,
    #[serde(rename = "48")]
    pub px48: &'static str,
    #[serde(rename = "128")]
    pub px128: &'static str,
}

/// The notification shown when a reminder fires
pub fn fired_notification(reminder: &Reminder) -> NotificationSpec {
    let message = if reminder.comment.is_empty() {
        format!("URL: {}", reminder.url)
    } else {
        format!("Note: {}\nURL: {}", reminder.comment, reminder.url)
    };

    NotificationSpec {
        kind: "basic",
        icon_url: "icons/icon48_red.png",
        title: format!("Reminder: {}", reminder.title),
        message,
        buttons: vec![NotificationButton { title: "Open Page" }],
        priority: 2,
        silent: true,
    }
}

/// The confirmation shown after a shortcut-created reminder
pub fn created_notification(duration_minutes: i64, tab_title: &str) -> NotificationSpec {
    NotificationSpec {
        kind: "basic",
        icon_url: "icons/icon128.png",
        title: "Reminder Set!".to_string(),
        message: format!(
            "{} reminder saved for \"{}\"",
            format_duration(duration_minutes),
            tab_title
        ),
        buttons: Vec::new(),
        priority: 0,
        silent: true,
    }
}

/// Icon asset set for the overdue aggregate
pub fn icon_paths(overdue: bool) -> IconPaths {
    if overdue {
        IconPaths {
            px16: "icons/icon16_red.png",
            px48: "icons/icon48_red.png",
            px128: "icons/icon128_red.png",
        }
    } else {
        IconPaths {
            px16: "icons/icon16.png",
            px48: "icons/icon48.png",
            px128: "icons/icon128.png",
        }
    }
}

/// Human-readable duration: whole days, then whole hours, else minutes
pub fn format_duration(minutes: i64) -> String {
    if minutes % 1440 == 0 {
        let days = minutes / 1440;
        format!("{} day{}", days, if days > 1 { "s" } else { "" })
    } else if minutes % 60 == 0 {
        let hours = minutes / 60;
        format!("{} hour{}", hours, if hours > 1 { "s" } else { "" })
    } else {
        format!("{} minutes", minutes)
    }
}
