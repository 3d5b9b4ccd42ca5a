/// Tab Reminder - Chrome extension that resurfaces a tab (and its original
/// tab group) after a chosen delay. Built with Rust + WASM; the service
/// worker and popup call the exported handlers below, and chrome.* APIs are
/// reached through js/bridge.js.

mod bridge;
mod commands;
mod domain;
mod lifecycle;
mod listing;
mod notify;
mod reminder;
mod settings;
mod snapshot;
mod storage;
mod tab_data;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

fn js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

/// Form submit from the popup; resolves with the new reminder key
#[wasm_bindgen]
pub async fn create_reminder(url: String, duration_minutes: f64, comment: String) -> Result<String, JsValue> {
    lifecycle::create_reminder(&url, duration_minutes as i64, &comment)
        .await
        .map_err(js_err)
}

/// chrome.commands.onCommand
#[wasm_bindgen]
pub async fn handle_command(command: String) -> Result<(), JsValue> {
    lifecycle::create_from_command(&command).await.map_err(js_err)
}

/// chrome.alarms.onAlarm; the alarm name is the reminder key
#[wasm_bindgen]
pub async fn handle_alarm(name: String) -> Result<(), JsValue> {
    lifecycle::handle_alarm(&name).await.map_err(js_err)
}

/// chrome.notifications.onClicked — open and resolve
#[wasm_bindgen]
pub async fn handle_notification_click(id: String) -> Result<(), JsValue> {
    lifecycle::open_reminder(&id, true).await.map_err(js_err)
}

/// chrome.notifications.onButtonClicked ("Open Page") — open and resolve
#[wasm_bindgen]
pub async fn handle_notification_button(id: String, _button_index: u32) -> Result<(), JsValue> {
    lifecycle::open_reminder(&id, true).await.map_err(js_err)
}

/// Open request from the popup list: a peek that keeps the reminder alive
#[wasm_bindgen]
pub async fn open_reminder_from_popup(key: String) -> Result<(), JsValue> {
    lifecycle::open_reminder(&key, false).await.map_err(js_err)
}

/// Cancel button in the popup list
#[wasm_bindgen]
pub async fn cancel_reminder(key: String) -> Result<(), JsValue> {
    lifecycle::cancel_reminder(&key).await.map_err(js_err)
}

/// Overdue re-check, wired to onStartup/onInstalled and popup messages
#[wasm_bindgen]
pub async fn check_overdue() {
    lifecycle::recompute_overdue().await;
}

/// Rows for the popup list, shaped by the stored sort/filter toggles
#[wasm_bindgen]
pub async fn reminder_list() -> Result<JsValue, JsValue> {
    let rows = lifecycle::list_reminders().await.map_err(js_err)?;
    serde_wasm_bindgen::to_value(&rows).map_err(|e| js_err(format!("{:?}", e)))
}

/// Current popup toggles as { enableSound, sortByTimeLeft, hideLongReminders }
#[wasm_bindgen]
pub async fn get_preferences() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&settings::load_preferences().await)
        .map_err(|e| js_err(format!("{:?}", e)))
}

/// Persist one popup toggle
#[wasm_bindgen]
pub async fn set_preference(key: String, value: bool) -> Result<(), JsValue> {
    settings::set_flag(&key, value).await.map_err(js_err)
}

// Re-export countdown formatting for the popup's per-second ticker
#[wasm_bindgen]
pub fn format_time_left(end_time: f64) -> String {
    listing::format_time_left(end_time as i64, js_sys::Date::now() as i64)
}
