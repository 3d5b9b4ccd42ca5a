/// UI preferences in chrome.storage.local (device-local, not synced)
use log::warn;
use serde::Serialize;

use crate::bridge;

pub const ENABLE_SOUND_KEY: &str = "enableSound";
pub const SORT_BY_TIME_LEFT_KEY: &str = "sortByTimeLeft";
pub const HIDE_LONG_REMINDERS_KEY: &str = "hideLongReminders";

/// Whether the notification sound is enabled. Defaults to on; a failed read
/// also defaults to on since the worst case is an extra chime.
pub async fn sound_enabled() -> bool {
    read_flag(ENABLE_SOUND_KEY, true).await
}

pub async fn sort_by_time_left() -> bool {
    read_flag(SORT_BY_TIME_LEFT_KEY, false).await
}

pub async fn hide_long_reminders() -> bool {
    read_flag(HIDE_LONG_REMINDERS_KEY, false).await
}

/// All popup toggles in one read, for rendering the controls
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub enable_sound: bool,
    pub sort_by_time_left: bool,
    pub hide_long_reminders: bool,
}

pub async fn load_preferences() -> Preferences {
    Preferences {
        enable_sound: sound_enabled().await,
        sort_by_time_left: sort_by_time_left().await,
        hide_long_reminders: hide_long_reminders().await,
    }
}

/// Persist one toggle; unknown keys are rejected so the popup cannot
/// scribble arbitrary entries into local storage
pub async fn set_flag(key: &str, value: bool) -> Result<(), String> {
    if !matches!(
        key,
        ENABLE_SOUND_KEY | SORT_BY_TIME_LEFT_KEY | HIDE_LONG_REMINDERS_KEY
    ) {
        return Err(format!("Unknown setting: {}", key));
    }
    bridge::set_local_storage(key, wasm_bindgen::JsValue::from_bool(value))
        .await
        .map_err(|e| format!("Failed to save setting {}: {:?}", key, e))
}

async fn read_flag(key: &str, default: bool) -> bool {
    match bridge::get_local_storage(key).await {
        Ok(value) => value.as_bool().unwrap_or(default),
        Err(e) => {
            warn!("Failed to read setting {}: {:?}", key, e);
            default
        }
    }
}
