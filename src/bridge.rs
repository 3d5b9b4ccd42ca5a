/// Bindings to the chrome.* wrappers in js/bridge.js
///
/// Every wrapper resolves with plain JSON-shaped values so the structs in
/// tab_data/reminder can deserialize them with serde-wasm-bindgen.
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/bridge.js")]
extern "C" {
    // -- storage --

    /// chrome.storage.sync.get, resolving with the value under `key` (or null)
    #[wasm_bindgen(catch, js_name = getSyncStorage)]
    pub async fn get_sync_storage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = setSyncStorage)]
    pub async fn set_sync_storage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = getLocalStorage)]
    pub async fn get_local_storage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = setLocalStorage)]
    pub async fn set_local_storage(key: &str, value: JsValue) -> Result<(), JsValue>;

    // -- alarms --

    #[wasm_bindgen(catch, js_name = createAlarm)]
    pub async fn create_alarm(name: &str, delay_minutes: f64) -> Result<(), JsValue>;

    /// Clearing an unknown alarm is a no-op
    #[wasm_bindgen(catch, js_name = clearAlarm)]
    pub async fn clear_alarm(name: &str) -> Result<(), JsValue>;

    // -- tabs and windows --

    /// All open tabs whose URL matches exactly
    #[wasm_bindgen(catch, js_name = queryTabsByUrl)]
    pub async fn query_tabs_by_url(url: &str) -> Result<JsValue, JsValue>;

    /// The active tab of the current window, or null
    #[wasm_bindgen(catch, js_name = getActiveTab)]
    pub async fn get_active_tab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = queryTabsInGroup)]
    pub async fn query_tabs_in_group(group_id: i32) -> Result<JsValue, JsValue>;

    /// Create one active tab
    #[wasm_bindgen(catch, js_name = createTab)]
    pub async fn create_tab(url: &str) -> Result<JsValue, JsValue>;

    /// Create background tabs for all URLs in parallel, preserving order
    #[wasm_bindgen(catch, js_name = createTabs)]
    pub async fn create_tabs(urls: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = activateTab)]
    pub async fn activate_tab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = focusWindow)]
    pub async fn focus_window(window_id: i32) -> Result<(), JsValue>;

    // -- tab groups --

    /// chrome.tabs.group over the given ids, resolving with the new group id
    #[wasm_bindgen(catch, js_name = groupTabs)]
    pub async fn group_tabs(tab_ids: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = updateTabGroup)]
    pub async fn update_tab_group(group_id: i32, title: &str, color: &str)
        -> Result<(), JsValue>;

    /// chrome.tabGroups.get: { title, color }
    #[wasm_bindgen(catch, js_name = getTabGroup)]
    pub async fn get_tab_group(group_id: i32) -> Result<JsValue, JsValue>;

    // -- notifications and icon --

    #[wasm_bindgen(catch, js_name = createNotification)]
    pub async fn create_notification(id: &str, options: JsValue) -> Result<(), JsValue>;

    /// Clearing an unknown notification is a no-op
    #[wasm_bindgen(catch, js_name = clearNotification)]
    pub async fn clear_notification(id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = setActionIcon)]
    pub async fn set_action_icon(paths: JsValue) -> Result<(), JsValue>;

    // -- sound --

    /// Fire-and-forget playSound message to the offscreen document; the
    /// acknowledgment is ignored
    #[wasm_bindgen(js_name = playSound)]
    pub fn play_sound();
}
