/// Reminder data model, stored under the "reminders" key in chrome.storage.sync
///
/// The wire format keeps the flat field names the popup and background
/// surfaces have always written (reminderTime, timestamp, groupUrls, ...) so
/// records created by older extension versions load unchanged.
use serde::{Deserialize, Serialize};

use crate::domain::display_title;

pub const MS_PER_MINUTE: i64 = 60_000;

/// The nine colors chrome.tabGroups supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    /// chrome's group color name (the serde wire name)
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }

    /// Hex value used by the popup to tint group labels
    pub fn hex(&self) -> &'static str {
        match self {
            GroupColor::Grey => "#9E9E9E",
            GroupColor::Blue => "#8AB4F8",
            GroupColor::Red => "#F28B82",
            GroupColor::Yellow => "#FDD663",
            GroupColor::Green => "#81C995",
            GroupColor::Pink => "#FF8BCB",
            GroupColor::Purple => "#D7AEFB",
            GroupColor::Cyan => "#78D9EC",
            GroupColor::Orange => "#FFAD70",
        }
    }
}

/// Captured composition of a tab group at reminder-creation or fire time.
///
/// `ordered_urls` holds every URL of the group in tab order with the
/// reminder's own URL stripped out; `reminder_index` is the position the own
/// URL occupied in the full order, so reconstruction can reinsert it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSnapshot {
    /// Live group handle at capture time; stale once the group is closed
    pub group_id: i32,
    pub title: String,
    pub color: GroupColor,
    pub ordered_urls: Vec<String>,
    /// None means "append at the end"
    pub reminder_index: Option<usize>,
}

/// A single timed reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ReminderWire", into = "ReminderWire")]
pub struct Reminder {
    pub url: String,
    /// Short hostname-derived label
    pub title: String,
    /// Page title of the source tab, display only
    pub tab_title: Option<String>,
    pub comment: String,
    /// Creation time, ms epoch
    pub timestamp: i64,
    /// Requested delay in minutes
    pub duration_minutes: i64,
    /// timestamp + duration_minutes * 60000
    pub end_time: i64,
    pub group: Option<GroupSnapshot>,
}

/// Flat on-disk shape shared with the pre-rewrite JS surfaces
#[derive(Serialize, Deserialize)]
struct ReminderWire {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "tabTitle", default, skip_serializing_if = "Option::is_none")]
    tab_title: Option<String>,
    #[serde(default)]
    comment: String,
    timestamp: i64,
    #[serde(rename = "reminderTime")]
    reminder_time: i64,
    #[serde(rename = "endTime")]
    end_time: i64,
    #[serde(rename = "groupId", default, skip_serializing_if = "Option::is_none")]
    group_id: Option<i32>,
    #[serde(rename = "groupTitle", default, skip_serializing_if = "Option::is_none")]
    group_title: Option<String>,
    #[serde(rename = "groupColor", default, skip_serializing_if = "Option::is_none")]
    group_color: Option<GroupColor>,
    #[serde(rename = "groupUrls", default, skip_serializing_if = "Option::is_none")]
    group_urls: Option<Vec<String>>,
    #[serde(
        rename = "reminderIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    reminder_index: Option<i64>,
}

impl From<ReminderWire> for Reminder {
    fn from(wire: ReminderWire) -> Self {
        // A group is only usable when both the handle and the URL list
        // survived; legacy records sometimes carry one without the other
        let group = match (wire.group_id, wire.group_urls) {
            (Some(group_id), Some(ordered_urls)) => Some(GroupSnapshot {
                group_id,
                title: wire.group_title.unwrap_or_default(),
                color: wire.group_color.unwrap_or_default(),
                ordered_urls,
                // Negative indexOf results from old records mean "unknown"
                reminder_index: wire.reminder_index.filter(|i| *i >= 0).map(|i| i as usize),
            }),
            _ => None,
        };

        Reminder {
            url: wire.url,
            title: wire.title,
            tab_title: wire.tab_title,
            comment: wire.comment,
            timestamp: wire.timestamp,
            duration_minutes: wire.reminder_time,
            end_time: wire.end_time,
            group,
        }
    }
}

impl From<Reminder> for ReminderWire {
    fn from(r: Reminder) -> Self {
        let (group_id, group_title, group_color, group_urls, reminder_index) = match r.group {
            Some(g) => (
                Some(g.group_id),
                Some(g.title),
                Some(g.color),
                Some(g.ordered_urls),
                g.reminder_index.map(|i| i as i64),
            ),
            None => (None, None, None, None, None),
        };

        ReminderWire {
            url: r.url,
            title: r.title,
            tab_title: r.tab_title,
            comment: r.comment,
            timestamp: r.timestamp,
            reminder_time: r.duration_minutes,
            end_time: r.end_time,
            group_id,
            group_title,
            group_color,
            group_urls,
            reminder_index,
        }
    }
}

impl Reminder {
    /// Build a validated reminder. Rejects empty URLs and non-positive
    /// durations without touching storage.
    pub fn new(
        url: &str,
        duration_minutes: i64,
        comment: &str,
        tab_title: Option<String>,
        now_ms: i64,
    ) -> Result<Reminder, String> {
        if url.trim().is_empty() {
            return Err("Please enter a valid URL".to_string());
        }
        if duration_minutes <= 0 {
            return Err("Please enter a valid time in minutes".to_string());
        }

        Ok(Reminder {
            url: url.to_string(),
            title: display_title(url),
            tab_title,
            comment: comment.trim().to_string(),
            timestamp: now_ms,
            duration_minutes,
            end_time: now_ms + duration_minutes * MS_PER_MINUTE,
            group: None,
        })
    }

    pub fn is_overdue(&self, now_ms: i64) -> bool {
        self.end_time < now_ms
    }
}

/// Storage/alarm/notification key for a reminder created at `now_ms`
pub fn reminder_key(now_ms: i64) -> String {
    format!("reminder_{}", now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_698_508_200_000;

    #[test]
    fn test_new_computes_end_time_exactly() {
        let r = Reminder::new("https://example.com/ticket/5", 30, "", None, NOW).unwrap();
        assert_eq!(r.end_time, NOW + 30 * 60_000);
        assert_eq!(r.duration_minutes, 30);
        assert_eq!(r.timestamp, NOW);
        assert!(r.group.is_none());
    }

    #[test]
    fn test_new_derives_display_title() {
        let r = Reminder::new("https://www.example.com/x", 10, "", None, NOW).unwrap();
        assert_eq!(r.title, "example.com");
    }

    #[test]
    fn test_new_rejects_invalid_input() {
        assert!(Reminder::new("", 30, "", None, NOW).is_err());
        assert!(Reminder::new("   ", 30, "", None, NOW).is_err());
        assert!(Reminder::new("https://a.com", 0, "", None, NOW).is_err());
        assert!(Reminder::new("https://a.com", -5, "", None, NOW).is_err());
    }

    #[test]
    fn test_is_overdue() {
        let r = Reminder::new("https://a.com", 30, "", None, NOW).unwrap();
        assert!(!r.is_overdue(NOW));
        assert!(!r.is_overdue(r.end_time));
        assert!(r.is_overdue(r.end_time + 1));
    }

    #[test]
    fn test_reminder_key_format() {
        assert_eq!(reminder_key(NOW), "reminder_1698508200000");
    }

    #[test]
    fn test_wire_format_matches_legacy_records() {
        // A record written by the pre-rewrite JS background script
        let json = r#"{
            "url": "https://example.com/ticket/5",
            "reminderTime": 30,
            "timestamp": 1698508200000,
            "endTime": 1698510000000,
            "title": "example.com",
            "tabTitle": "Ticket 5",
            "comment": "follow up",
            "groupId": 311,
            "groupTitle": "Sprint",
            "groupColor": "blue",
            "groupUrls": ["https://a.com", "https://c.com"],
            "reminderIndex": 1
        }"#;

        let r: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(r.duration_minutes, 30);
        assert_eq!(r.tab_title.as_deref(), Some("Ticket 5"));
        let g = r.group.as_ref().unwrap();
        assert_eq!(g.group_id, 311);
        assert_eq!(g.title, "Sprint");
        assert_eq!(g.color, GroupColor::Blue);
        assert_eq!(g.ordered_urls.len(), 2);
        assert_eq!(g.reminder_index, Some(1));

        // And it round-trips under the same field names
        let back = serde_json::to_string(&r).unwrap();
        assert!(back.contains("\"reminderTime\":30"));
        assert!(back.contains("\"groupUrls\""));
        assert!(back.contains("\"groupColor\":\"blue\""));
    }

    #[test]
    fn test_group_absent_when_fields_missing() {
        let json = r#"{
            "url": "https://example.com",
            "reminderTime": 60,
            "timestamp": 1698508200000,
            "endTime": 1698511800000,
            "title": "example.com"
        }"#;
        let r: Reminder = serde_json::from_str(json).unwrap();
        assert!(r.group.is_none());
        assert_eq!(r.comment, "");

        let back = serde_json::to_string(&r).unwrap();
        assert!(!back.contains("groupUrls"));
        assert!(!back.contains("tabTitle"));
    }

    #[test]
    fn test_group_without_index_still_loads() {
        // Shortcut-created records from old versions lack reminderIndex
        let json = r#"{
            "url": "https://b.com",
            "reminderTime": 60,
            "timestamp": 1,
            "endTime": 3600001,
            "title": "b.com",
            "groupId": 9,
            "groupUrls": ["https://a.com"]
        }"#;
        let r: Reminder = serde_json::from_str(json).unwrap();
        let g = r.group.unwrap();
        assert_eq!(g.reminder_index, None);
        assert_eq!(g.color, GroupColor::Grey);
        assert_eq!(g.title, "");
    }

    #[test]
    fn test_negative_wire_index_becomes_none() {
        let json = r#"{
            "url": "https://b.com",
            "reminderTime": 60,
            "timestamp": 1,
            "endTime": 3600001,
            "title": "b.com",
            "groupId": 9,
            "groupUrls": ["https://a.com"],
            "reminderIndex": -1
        }"#;
        let r: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(r.group.unwrap().reminder_index, None);
    }

    #[test]
    fn test_group_color_names_and_hex() {
        assert_eq!(GroupColor::Blue.as_str(), "blue");
        assert_eq!(GroupColor::Grey.hex(), "#9E9E9E");
        assert_eq!(GroupColor::Orange.hex(), "#FFAD70");
        let c: GroupColor = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(c, GroupColor::Purple);
    }
}
