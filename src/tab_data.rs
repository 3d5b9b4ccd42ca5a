/// Data structures mirroring the browser's tab and tab-group surfaces
use serde::{Deserialize, Serialize};

/// chrome.tabs uses -1 as the groupId of an ungrouped tab
pub const TAB_GROUP_ID_NONE: i32 = -1;

/// Information about a live browser tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub window_id: i32,
    #[serde(default = "default_group_id")]
    pub group_id: i32,
    pub index: i32,
}

fn default_group_id() -> i32 {
    TAB_GROUP_ID_NONE
}

impl TabInfo {
    pub fn is_grouped(&self) -> bool {
        self.group_id != TAB_GROUP_ID_NONE
    }
}

/// Metadata of a live tab group, as returned by chrome.tabGroups.get
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub color: crate::reminder::GroupColor,
}
