/// Reminder store over the synced key-value storage
///
/// chrome.storage.sync offers no transaction isolation and two extension
/// surfaces can write at nearly the same time; last write wins. Every
/// mutation therefore re-fetches the map immediately before changing it.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::bridge;
use crate::reminder::Reminder;

/// chrome.storage.sync key holding the id → reminder mapping
pub const REMINDERS_KEY: &str = "reminders";

/// In-memory copy of the persisted id → reminder mapping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderMap {
    reminders: HashMap<String, Reminder>,
}

impl ReminderMap {
    pub fn new() -> Self {
        ReminderMap {
            reminders: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Reminder> {
        self.reminders.get(key)
    }

    pub fn insert(&mut self, key: String, reminder: Reminder) {
        self.reminders.insert(key, reminder);
    }

    /// Remove a reminder; false when the key was already absent
    pub fn remove(&mut self, key: &str) -> bool {
        self.reminders.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Reminder)> {
        self.reminders.iter()
    }

    /// True iff any live reminder's fire time has passed
    pub fn any_overdue(&self, now_ms: i64) -> bool {
        self.reminders.values().any(|r| r.is_overdue(now_ms))
    }
}

/// Fetch the reminder map from the synced store. A missing key is an empty
/// map, not an error.
pub async fn load_reminders() -> Result<ReminderMap, String> {
    let value = bridge::get_sync_storage(REMINDERS_KEY)
        .await
        .map_err(|e| format!("Failed to read reminders: {:?}", e))?;

    if value.is_null() || value.is_undefined() {
        return Ok(ReminderMap::new());
    }

    serde_wasm_bindgen::from_value(value).map_err(|e| format!("Failed to parse reminders: {:?}", e))
}

/// Write the whole reminder map back to the synced store. Fails when the
/// sync quota is exceeded or sync is unavailable.
pub async fn save_reminders(map: &ReminderMap) -> Result<(), String> {
    let value = to_js(map)?;
    bridge::set_sync_storage(REMINDERS_KEY, value)
        .await
        .map_err(|e| format!("Failed to save reminders: {:?}", e))
}

fn to_js(map: &ReminderMap) -> Result<JsValue, String> {
    // json-compatible serializer so maps become plain objects, matching the
    // records the JS surfaces read
    map.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize reminders: {:?}", e))
}
