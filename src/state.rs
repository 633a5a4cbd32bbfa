// Shared payload structs sent to the chrome UI.
// No Tauri imports: the desktop shell serializes these, the core produces them.

use serde::{Deserialize, Serialize};

/// One entry of the tab strip as the UI renders it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub label: String,
    pub surface_count: usize,
    pub last_url: Option<String>,
}

/// Payload of the `update-tabs` event.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabStripSnapshot {
    pub tabs: Vec<TabSnapshot>,
    pub active_index: Option<usize>,
    pub address_bar: String,
}

/// A single UI change caused by a surface notification.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChromeUpdate {
    AddressBar { text: String },
    TabLabel { index: usize, label: String },
}
