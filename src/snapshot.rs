/// Group snapshot engine: capture a tab group's composition, re-derive it
/// from live browser state, and reconstruct it when the group is gone.
use log::warn;

use crate::bridge;
use crate::domain::urls_match;
use crate::reminder::{GroupSnapshot, Reminder};
use crate::tab_data::{GroupInfo, TabInfo};

/// Snapshot a group's ordered composition around one reminder URL.
///
/// `group_tabs` is the live membership of the group; the reminder's own URL
/// is recorded by position (`reminder_index`) and stripped from
/// `ordered_urls` so reconstruction can reinsert it exactly once.
pub fn capture(
    group_id: i32,
    info: &GroupInfo,
    group_tabs: &[TabInfo],
    own_url: &str,
) -> GroupSnapshot {
    let mut tabs: Vec<&TabInfo> = group_tabs.iter().collect();
    tabs.sort_by_key(|t| t.index);

    let full_order: Vec<&str> = tabs.iter().map(|t| t.url.as_str()).collect();
    let reminder_index = full_order.iter().position(|url| *url == own_url);

    GroupSnapshot {
        group_id,
        title: info.title.clone(),
        color: info.color,
        ordered_urls: full_order
            .into_iter()
            .filter(|url| *url != own_url)
            .map(str::to_string)
            .collect(),
        reminder_index,
    }
}

/// Recover the full original tab order from a snapshot: drop any stray copy
/// of the reminder's URL, then reinsert it at its recorded position (clamped
/// into range; appended when unknown).
pub fn restore_order(snapshot: &GroupSnapshot, own_url: &str) -> Vec<String> {
    let mut urls: Vec<String> = snapshot
        .ordered_urls
        .iter()
        .filter(|url| *url != own_url)
        .cloned()
        .collect();

    match snapshot.reminder_index {
        Some(index) => urls.insert(index.min(urls.len()), own_url.to_string()),
        None => urls.push(own_url.to_string()),
    }
    urls
}

/// How an open request should be carried out, given the tabs currently open
/// at the reminder's URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionPlan {
    /// The tab is already where the user left it
    Focus { tab_id: i32, window_id: i32 },
    /// Rebuild the recorded group; `reuse_tab` is an open-but-ungrouped tab
    /// at the reminder URL that gets folded in instead of duplicated
    Reconstruct { reuse_tab: Option<TabInfo> },
    /// No group recorded and nothing open: one new active tab
    OpenSingle,
}

/// Decide between focusing, reconstructing and opening fresh.
///
/// A tab that is open but ungrouped loses to a recorded group: the user's
/// original grouped context takes precedence over a lone tab.
pub fn plan_resolution(reminder: &Reminder, existing: &[TabInfo]) -> ResolutionPlan {
    match existing.first() {
        Some(tab) if tab.is_grouped() => ResolutionPlan::Focus {
            tab_id: tab.id,
            window_id: tab.window_id,
        },
        Some(tab) => {
            if reminder.group.is_some() {
                ResolutionPlan::Reconstruct {
                    reuse_tab: Some(tab.clone()),
                }
            } else {
                ResolutionPlan::Focus {
                    tab_id: tab.id,
                    window_id: tab.window_id,
                }
            }
        }
        None => {
            if reminder.group.is_some() {
                ResolutionPlan::Reconstruct { reuse_tab: None }
            } else {
                ResolutionPlan::OpenSingle
            }
        }
    }
}

/// Pick the created tab to focus: exact URL match ignoring #fragment, else
/// the first created tab.
pub fn focus_target<'a>(created: &'a [TabInfo], own_url: &str) -> Option<&'a TabInfo> {
    created
        .iter()
        .find(|tab| urls_match(&tab.url, own_url))
        .or_else(|| created.first())
}

/// Re-derive the snapshot from the live group the given tab sits in.
/// Returns None when the tab is not grouped; lookup failures degrade to None
/// with a warning so firing can continue on the stored snapshot.
pub async fn refresh_live(own_url: &str, tab: &TabInfo) -> Option<GroupSnapshot> {
    if !tab.is_grouped() {
        return None;
    }

    let info: GroupInfo = match bridge::get_tab_group(tab.group_id).await {
        Ok(value) => match serde_wasm_bindgen::from_value(value) {
            Ok(info) => info,
            Err(e) => {
                warn!("Failed to parse group metadata: {:?}", e);
                return None;
            }
        },
        Err(e) => {
            warn!("Group fetch failed: {:?}", e);
            return None;
        }
    };

    let group_tabs = match query_group_tabs(tab.group_id).await {
        Ok(tabs) => tabs,
        Err(e) => {
            warn!("Group tab listing failed: {}", e);
            return None;
        }
    };

    Some(capture(tab.group_id, &info, &group_tabs, own_url))
}

/// Rebuild the recorded group as new tabs, restore its title and color, and
/// focus the reminder's own tab.
pub async fn reconstruct_group(
    reminder: &Reminder,
    snapshot: &GroupSnapshot,
    reuse_tab: Option<&TabInfo>,
) -> Result<(), String> {
    match reuse_tab {
        Some(tab) => {
            // The reminder's URL is already open; create only the rest and
            // fold the existing tab into the new group at its old position
            let others: Vec<String> = snapshot
                .ordered_urls
                .iter()
                .filter(|url| *url != &reminder.url)
                .cloned()
                .collect();
            let created = create_tabs(&others).await?;

            let mut tab_ids: Vec<i32> = created.iter().map(|t| t.id).collect();
            let index = snapshot.reminder_index.unwrap_or(tab_ids.len());
            tab_ids.insert(index.min(created.len()), tab.id);

            apply_group(&tab_ids, snapshot).await?;
            focus_tab(tab.id, tab.window_id).await
        }
        None => {
            let urls = restore_order(snapshot, &reminder.url);
            let created = create_tabs(&urls).await?;

            let tab_ids: Vec<i32> = created.iter().map(|t| t.id).collect();
            apply_group(&tab_ids, snapshot).await?;

            match focus_target(&created, &reminder.url) {
                Some(target) => focus_tab(target.id, target.window_id).await,
                None => Err("No tabs were created for the group".to_string()),
            }
        }
    }
}

/// Activate a tab and bring its window to the foreground
pub async fn focus_tab(tab_id: i32, window_id: i32) -> Result<(), String> {
    bridge::activate_tab(tab_id)
        .await
        .map_err(|e| format!("Failed to activate tab: {:?}", e))?;
    bridge::focus_window(window_id)
        .await
        .map_err(|e| format!("Failed to focus window: {:?}", e))
}

/// List the live tabs of a group, in window order
pub async fn query_group_tabs(group_id: i32) -> Result<Vec<TabInfo>, String> {
    let value = bridge::query_tabs_in_group(group_id)
        .await
        .map_err(|e| format!("Failed to query group tabs: {:?}", e))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| format!("Failed to parse tabs: {:?}", e))
}

async fn create_tabs(urls: &[String]) -> Result<Vec<TabInfo>, String> {
    let urls_js = serde_wasm_bindgen::to_value(urls)
        .map_err(|e| format!("Failed to serialize urls: {:?}", e))?;

    // The bridge creates all tabs in parallel and returns them in input order
    let created = bridge::create_tabs(urls_js)
        .await
        .map_err(|e| format!("Failed to create tabs: {:?}", e))?;
    serde_wasm_bindgen::from_value(created).map_err(|e| format!("Failed to parse tabs: {:?}", e))
}

async fn apply_group(tab_ids: &[i32], snapshot: &GroupSnapshot) -> Result<(), String> {
    let ids_js = serde_wasm_bindgen::to_value(tab_ids)
        .map_err(|e| format!("Failed to serialize tab ids: {:?}", e))?;

    let group_id = bridge::group_tabs(ids_js)
        .await
        .map_err(|e| format!("Failed to group tabs: {:?}", e))?
        .as_f64()
        .ok_or_else(|| "Grouping returned no group id".to_string())? as i32;

    bridge::update_tab_group(group_id, &snapshot.title, snapshot.color.as_str())
        .await
        .map_err(|e| format!("Failed to style group: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::GroupColor;

    fn tab(id: i32, url: &str, group_id: i32, index: i32) -> TabInfo {
        TabInfo {
            id,
            url: url.to_string(),
            title: format!("Tab {}", id),
            window_id: 1,
            group_id,
            index,
        }
    }

    fn group_info(title: &str, color: GroupColor) -> GroupInfo {
        GroupInfo {
            title: title.to_string(),
            color,
        }
    }

    fn snapshot(urls: &[&str], index: Option<usize>) -> GroupSnapshot {
        GroupSnapshot {
            group_id: 7,
            title: "Sprint".to_string(),
            color: GroupColor::Blue,
            ordered_urls: urls.iter().map(|u| u.to_string()).collect(),
            reminder_index: index,
        }
    }

    #[test]
    fn test_capture_strips_own_url_and_records_index() {
        let tabs = vec![
            tab(1, "https://a.com", 7, 0),
            tab(2, "https://b.com", 7, 1),
            tab(3, "https://c.com", 7, 2),
        ];
        let snap = capture(7, &group_info("Sprint", GroupColor::Blue), &tabs, "https://b.com");

        assert_eq!(snap.ordered_urls, vec!["https://a.com", "https://c.com"]);
        assert_eq!(snap.reminder_index, Some(1));
        assert_eq!(snap.title, "Sprint");
        assert_eq!(snap.color, GroupColor::Blue);
    }

    #[test]
    fn test_capture_orders_by_tab_index() {
        let tabs = vec![
            tab(3, "https://c.com", 7, 2),
            tab(1, "https://a.com", 7, 0),
            tab(2, "https://b.com", 7, 1),
        ];
        let snap = capture(7, &group_info("", GroupColor::Grey), &tabs, "https://c.com");

        assert_eq!(snap.ordered_urls, vec!["https://a.com", "https://b.com"]);
        assert_eq!(snap.reminder_index, Some(2));
    }

    #[test]
    fn test_capture_own_url_missing_from_group() {
        // The reminder URL was typed into the form, not taken from the group
        let tabs = vec![tab(1, "https://a.com", 7, 0)];
        let snap = capture(7, &group_info("", GroupColor::Grey), &tabs, "https://other.com");

        assert_eq!(snap.ordered_urls, vec!["https://a.com"]);
        assert_eq!(snap.reminder_index, None);
    }

    #[test]
    fn test_restore_order_round_trip() {
        let snap = snapshot(&["https://a.com", "https://c.com"], Some(1));
        assert_eq!(
            restore_order(&snap, "https://b.com"),
            vec!["https://a.com", "https://b.com", "https://c.com"]
        );
    }

    #[test]
    fn test_restore_order_appends_when_index_unknown() {
        let snap = snapshot(&["https://a.com", "https://c.com"], None);
        assert_eq!(
            restore_order(&snap, "https://b.com"),
            vec!["https://a.com", "https://c.com", "https://b.com"]
        );
    }

    #[test]
    fn test_restore_order_clamps_out_of_range_index() {
        let snap = snapshot(&["https://a.com"], Some(99));
        assert_eq!(
            restore_order(&snap, "https://b.com"),
            vec!["https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_restore_order_dedups_own_url() {
        // Defensive: a stale snapshot may still contain the reminder's URL
        let snap = snapshot(&["https://a.com", "https://b.com"], Some(0));
        assert_eq!(
            restore_order(&snap, "https://b.com"),
            vec!["https://b.com", "https://a.com"]
        );
    }

    fn grouped_reminder() -> Reminder {
        let mut r = Reminder::new("https://b.com", 30, "", None, 1_000).unwrap();
        r.group = Some(snapshot(&["https://a.com", "https://c.com"], Some(1)));
        r
    }

    #[test]
    fn test_plan_focuses_grouped_tab() {
        let existing = vec![tab(5, "https://b.com", 7, 0)];
        assert_eq!(
            plan_resolution(&grouped_reminder(), &existing),
            ResolutionPlan::Focus {
                tab_id: 5,
                window_id: 1
            }
        );
    }

    #[test]
    fn test_plan_reconstructs_around_ungrouped_tab() {
        let existing = vec![tab(5, "https://b.com", -1, 0)];
        match plan_resolution(&grouped_reminder(), &existing) {
            ResolutionPlan::Reconstruct { reuse_tab: Some(t) } => assert_eq!(t.id, 5),
            other => panic!("expected reconstruct with reuse, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_focuses_ungrouped_tab_without_recorded_group() {
        let r = Reminder::new("https://b.com", 30, "", None, 1_000).unwrap();
        let existing = vec![tab(5, "https://b.com", -1, 0)];
        assert_eq!(
            plan_resolution(&r, &existing),
            ResolutionPlan::Focus {
                tab_id: 5,
                window_id: 1
            }
        );
    }

    #[test]
    fn test_plan_reconstructs_when_nothing_open() {
        assert_eq!(
            plan_resolution(&grouped_reminder(), &[]),
            ResolutionPlan::Reconstruct { reuse_tab: None }
        );
    }

    #[test]
    fn test_plan_opens_single_when_no_group_and_nothing_open() {
        let r = Reminder::new("https://b.com", 30, "", None, 1_000).unwrap();
        assert_eq!(plan_resolution(&r, &[]), ResolutionPlan::OpenSingle);
    }

    #[test]
    fn test_focus_target_ignores_fragment() {
        let created = vec![
            tab(1, "https://a.com", 7, 0),
            tab(2, "https://b.com#section", 7, 1),
        ];
        assert_eq!(focus_target(&created, "https://b.com").unwrap().id, 2);
    }

    #[test]
    fn test_focus_target_falls_back_to_first_tab() {
        // Redirects or trailing slashes can defeat the exact match
        let created = vec![
            tab(1, "https://a.com", 7, 0),
            tab(2, "https://b.com/", 7, 1),
        ];
        assert_eq!(focus_target(&created, "https://b.com").unwrap().id, 1);
        assert!(focus_target(&[], "https://b.com").is_none());
    }
}
