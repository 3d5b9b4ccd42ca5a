/// List shaping for the popup: sort/filter toggles and countdown text
use serde::Serialize;

use crate::reminder::Reminder;
use crate::storage::ReminderMap;

/// "Hide long reminders" keeps only reminders due within 12 hours
const LONG_REMINDER_CUTOFF_MS: i64 = 12 * 60 * 60 * 1000;

/// One popup row, with the display fields precomputed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRow {
    pub key: String,
    pub url: String,
    pub title: String,
    pub tab_title: Option<String>,
    pub comment: String,
    pub end_time: i64,
    pub time_left: String,
    pub overdue: bool,
    pub group_title: Option<String>,
    pub group_color_hex: Option<&'static str>,
    /// Tab count of the recorded group, including the reminder's own tab
    pub group_tab_count: Option<usize>,
}

/// Shape the live reminder map into popup rows, honoring the sort and
/// visibility toggles. Unsorted rows keep creation order (oldest first).
pub fn visible_reminders(
    map: &ReminderMap,
    sort_by_time_left: bool,
    hide_long: bool,
    now_ms: i64,
) -> Vec<ReminderRow> {
    let mut entries: Vec<(&String, &Reminder)> = map
        .entries()
        .filter(|(_, r)| !hide_long || r.end_time - now_ms <= LONG_REMINDER_CUTOFF_MS)
        .collect();

    if sort_by_time_left {
        entries.sort_by_key(|(_, r)| r.end_time);
    } else {
        entries.sort_by_key(|(_, r)| r.timestamp);
    }

    entries
        .into_iter()
        .map(|(key, r)| ReminderRow {
            key: key.clone(),
            url: r.url.clone(),
            title: r.title.clone(),
            tab_title: r.tab_title.clone(),
            comment: r.comment.clone(),
            end_time: r.end_time,
            time_left: format_time_left(r.end_time, now_ms),
            overdue: r.is_overdue(now_ms),
            group_title: r.group.as_ref().map(|g| g.title.clone()),
            group_color_hex: r.group.as_ref().map(|g| g.color.hex()),
            group_tab_count: r.group.as_ref().map(|g| g.ordered_urls.len() + 1),
        })
        .collect()
}

/// Countdown text: "3m 20s", or "-1m 5s" once overdue
pub fn format_time_left(end_time: i64, now_ms: i64) -> String {
    let diff = end_time - now_ms;
    let abs = diff.abs();
    let minutes = abs / 60_000;
    let seconds = (abs % 60_000) / 1_000;
    if diff >= 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("-{}m {}s", minutes, seconds)
    }
}
