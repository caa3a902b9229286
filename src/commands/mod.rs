//! Host Command Wrappers
//!
//! Frontend bindings to the host's data-store commands, organized by
//! domain. `HostRemote` exposes them as the remote store the sync hooks
//! consume.

mod content;
mod records;

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::{FieldMap, NewRecord, Record, RecordId};
use crate::sync::{ContentStore, RecordStore, SyncError, SyncResult};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use content::*;
pub use records::*;

/// Whether the host command bridge is injected into this page
pub fn host_available() -> bool {
    let Some(window) = web_sys::window() else { return false };
    js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__"))
        .map(|bridge| !bridge.is_undefined())
        .unwrap_or(false)
}

/// Serialize command arguments as plain JS objects (not `Map`s)
fn to_args<T: Serialize>(args: &T) -> SyncResult<JsValue> {
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| SyncError::Decode(e.to_string()))
}

/// Run `cmd`, turning a rejected promise into a remote error
async fn call(cmd: &str, args: JsValue) -> SyncResult<JsValue> {
    invoke(cmd, args)
        .await
        .map_err(|e| SyncError::remote(cmd, e.as_string().unwrap_or_else(|| format!("{:?}", e))))
}

fn from_result<T: serde::de::DeserializeOwned>(value: JsValue) -> SyncResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Remote store backed by host commands
pub struct HostRemote {
    content_table: String,
}

impl HostRemote {
    pub fn new(content_table: &str) -> Self {
        Self {
            content_table: content_table.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl ContentStore for HostRemote {
    async fn fetch_content(&self, key: &str) -> SyncResult<Option<String>> {
        content::fetch_content(&self.content_table, key).await
    }

    async fn upsert_content(&self, key: &str, value: &str) -> SyncResult<()> {
        content::upsert_content(&self.content_table, key, value).await
    }
}

#[async_trait(?Send)]
impl RecordStore for HostRemote {
    async fn select_records(&self, table: &str, parent_ids: &[String]) -> SyncResult<Vec<Record>> {
        records::select_records(table, parent_ids).await
    }

    async fn insert_record(&self, table: &str, record: &NewRecord) -> SyncResult<Record> {
        records::insert_record(table, record).await
    }

    async fn update_record(&self, table: &str, id: RecordId, fields: &FieldMap) -> SyncResult<()> {
        records::update_record(table, id, fields).await
    }

    async fn delete_record(&self, table: &str, id: RecordId) -> SyncResult<()> {
        records::delete_record(table, id).await
    }
}
