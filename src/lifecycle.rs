/// Reminder lifecycle: create, fire, resolve, cancel, overdue aggregate
///
/// Every transition re-fetches the reminder map from the synced store before
/// mutating it; nothing is cached in-process, so the popup and the background
/// worker cannot drift apart.
use log::{info, warn};

use crate::bridge;
use crate::commands::duration_for_command;
use crate::notify;
use crate::reminder::{reminder_key, Reminder};
use crate::settings;
use crate::snapshot::{self, ResolutionPlan};
use crate::storage;
use crate::tab_data::TabInfo;

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Create a reminder from the popup form. The URL and duration come from the
/// form; tab title and group context come from the active tab. Returns the
/// new reminder's key.
pub async fn create_reminder(url: &str, duration_minutes: i64, comment: &str) -> Result<String, String> {
    let now = now_ms();
    let mut reminder = Reminder::new(url, duration_minutes, comment, None, now)?;

    if let Some(tab) = active_tab().await {
        reminder.tab_title = Some(tab.title.clone()).filter(|t| !t.is_empty());
        // Group lookup failures degrade to a no-group reminder
        reminder.group = snapshot::refresh_live(&tab.url, &tab).await;
    }

    let key = reminder_key(now);
    persist_and_schedule(&key, reminder).await?;
    recompute_overdue().await;
    Ok(key)
}

/// Create a reminder for the active tab from a quick-reminder keyboard
/// shortcut. Unknown commands and windows without an active tab are ignored.
pub async fn create_from_command(command: &str) -> Result<(), String> {
    let Some(duration_minutes) = duration_for_command(command) else {
        return Ok(());
    };
    let Some(tab) = active_tab().await else {
        return Ok(());
    };
    if tab.url.is_empty() {
        return Ok(());
    }

    let now = now_ms();
    let mut reminder = Reminder::new(&tab.url, duration_minutes, "", Some(tab.title.clone()), now)?;
    reminder.group = snapshot::refresh_live(&tab.url, &tab).await;

    let key = reminder_key(now);
    persist_and_schedule(&key, reminder).await?;
    info!("Quick reminder {} set for {}", key, tab.url);

    // Silent confirmation toast; empty id lets chrome pick one
    let spec = notify::created_notification(duration_minutes, &tab.title);
    if let Err(e) = show_notification("", &spec).await {
        warn!("Confirmation notification failed: {}", e);
    }
    if settings::sound_enabled().await {
        bridge::play_sound();
    }

    recompute_overdue().await;
    Ok(())
}

/// Alarm fire: refresh the group snapshot from live state when the original
/// tab is still open and grouped, then notify. A fire for an id that is no
/// longer stored (already cancelled) is a silent no-op.
pub async fn handle_alarm(key: &str) -> Result<(), String> {
    let mut map = storage::load_reminders().await?;
    let Some(mut reminder) = map.get(key).cloned() else {
        info!("Alarm {} fired for a resolved reminder, ignoring", key);
        return Ok(());
    };

    match query_tabs(&reminder.url).await {
        Ok(tabs) => {
            if let Some(tab) = tabs.first() {
                if let Some(fresh) = snapshot::refresh_live(&reminder.url, tab).await {
                    // Persist before notifying so a later open uses the
                    // refreshed composition; failure is logged, the
                    // notification must still show
                    reminder.group = Some(fresh);
                    map.insert(key.to_string(), reminder.clone());
                    if let Err(e) = storage::save_reminders(&map).await {
                        warn!("Snapshot refresh not persisted: {}", e);
                    }
                }
            }
        }
        Err(e) => warn!("Tab lookup failed at fire time: {}", e),
    }

    show_notification(key, &notify::fired_notification(&reminder)).await?;
    if settings::sound_enabled().await {
        bridge::play_sound();
    }

    recompute_overdue().await;
    Ok(())
}

/// Open a reminder's target: focus an existing tab, rebuild its group, or
/// open a fresh tab. With `should_delete` the reminder is resolved
/// afterwards (record, alarm and notification all removed); without it this
/// is a peek from the popup and the reminder stays scheduled.
pub async fn open_reminder(key: &str, should_delete: bool) -> Result<(), String> {
    let map = storage::load_reminders().await?;
    let Some(reminder) = map.get(key) else {
        // Already resolved elsewhere; just drop the stale notification
        let _ = bridge::clear_notification(key).await;
        return Ok(());
    };

    let existing = match query_tabs(&reminder.url).await {
        Ok(tabs) => tabs,
        Err(e) => {
            warn!("Tab lookup failed, opening fresh: {}", e);
            Vec::new()
        }
    };

    match snapshot::plan_resolution(reminder, &existing) {
        ResolutionPlan::Focus { tab_id, window_id } => {
            snapshot::focus_tab(tab_id, window_id).await?;
        }
        ResolutionPlan::Reconstruct { reuse_tab } => {
            if let Some(snap) = reminder.group.as_ref() {
                snapshot::reconstruct_group(reminder, snap, reuse_tab.as_ref()).await?;
            }
        }
        ResolutionPlan::OpenSingle => {
            let tab = open_single_tab(&reminder.url).await?;
            bridge::focus_window(tab.window_id)
                .await
                .map_err(|e| format!("Failed to focus window: {:?}", e))?;
        }
    }

    if should_delete {
        resolve(key).await?;
    }
    Ok(())
}

/// User-initiated cancel from the popup. Idempotent: cancelling an absent id
/// still clears the alarm and notification and succeeds.
pub async fn cancel_reminder(key: &str) -> Result<(), String> {
    resolve(key).await
}

/// Terminal transition: remove the record and every trace of it
async fn resolve(key: &str) -> Result<(), String> {
    let mut map = storage::load_reminders().await?;
    if map.remove(key) {
        storage::save_reminders(&map).await?;
    }
    let _ = bridge::clear_alarm(key).await;
    let _ = bridge::clear_notification(key).await;
    recompute_overdue().await;
    Ok(())
}

/// Recompute the overdue aggregate and swap the toolbar icon accordingly.
/// Runs after every transition and once at worker start; never fatal.
pub async fn recompute_overdue() {
    let overdue = match storage::load_reminders().await {
        Ok(map) => map.any_overdue(now_ms()),
        Err(e) => {
            warn!("Overdue check skipped: {}", e);
            return;
        }
    };

    match serde_wasm_bindgen::to_value(&notify::icon_paths(overdue)) {
        Ok(paths) => {
            if let Err(e) = bridge::set_action_icon(paths).await {
                warn!("Failed to update icon: {:?}", e);
            }
        }
        Err(e) => warn!("Failed to serialize icon paths: {:?}", e),
    }
}

/// Popup list: live reminders shaped by the stored sort/filter toggles
pub async fn list_reminders() -> Result<Vec<crate::listing::ReminderRow>, String> {
    let map = storage::load_reminders().await?;
    let sort = settings::sort_by_time_left().await;
    let hide_long = settings::hide_long_reminders().await;
    Ok(crate::listing::visible_reminders(&map, sort, hide_long, now_ms()))
}

// -- helpers --

async fn persist_and_schedule(key: &str, reminder: Reminder) -> Result<(), String> {
    // Re-fetch right before the read-modify-write; last write still wins but
    // the window for lost updates stays small
    let mut map = storage::load_reminders().await?;
    let duration_minutes = reminder.duration_minutes;
    map.insert(key.to_string(), reminder);
    storage::save_reminders(&map).await?;

    bridge::create_alarm(key, duration_minutes as f64)
        .await
        .map_err(|e| format!("Failed to schedule alarm: {:?}", e))
}

async fn active_tab() -> Option<TabInfo> {
    match bridge::get_active_tab().await {
        Ok(value) if !value.is_null() && !value.is_undefined() => {
            match serde_wasm_bindgen::from_value(value) {
                Ok(tab) => Some(tab),
                Err(e) => {
                    warn!("Failed to parse active tab: {:?}", e);
                    None
                }
            }
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Active tab lookup failed: {:?}", e);
            None
        }
    }
}

async fn query_tabs(url: &str) -> Result<Vec<TabInfo>, String> {
    let value = bridge::query_tabs_by_url(url)
        .await
        .map_err(|e| format!("Failed to query tabs: {:?}", e))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| format!("Failed to parse tabs: {:?}", e))
}

async fn open_single_tab(url: &str) -> Result<TabInfo, String> {
    let value = bridge::create_tab(url)
        .await
        .map_err(|e| format!("Failed to create tab: {:?}", e))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| format!("Failed to parse tab: {:?}", e))
}

async fn show_notification(id: &str, spec: &notify::NotificationSpec) -> Result<(), String> {
    let options = serde_wasm_bindgen::to_value(spec)
        .map_err(|e| format!("Failed to serialize notification: {:?}", e))?;
    bridge::create_notification(id, options)
        .await
        .map_err(|e| format!("Failed to show notification: {:?}", e))
}
