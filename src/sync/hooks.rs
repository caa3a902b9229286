//! Sync Hooks
//!
//! Reactive wrappers around `SyncField` and `CollectionSync`. Results
//! are published with `try_set` so a late resolution after unmount is
//! dropped quietly.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use super::collection::{Collection, CollectionSync};
use super::error::{SyncError, SyncResult};
use super::field::SyncField;
use crate::models::{FieldMap, Record, RecordId, SyncedValue, ValueSource};

// ========================
// Single values
// ========================

#[derive(Clone, Copy)]
pub struct SyncedFieldHandle {
    key: StoredValue<String>,
    field: StoredValue<SyncField, LocalStorage>,
    value: RwSignal<SyncedValue>,
    has_error: RwSignal<bool>,
}

impl SyncedFieldHandle {
    pub fn value(&self) -> String {
        self.value.with(|v| v.value.clone())
    }

    pub fn source(&self) -> ValueSource {
        self.value.with(|v| v.source)
    }

    pub fn has_error(&self) -> bool {
        self.has_error.get()
    }

    /// Apply `new_value` now; the remote upsert runs in the background
    pub fn write(&self, new_value: String) {
        let Some(field) = self.field.try_get_value() else { return };
        let key = self.key.get_value();
        let pending = field.write(&key, &new_value);
        self.value
            .set(field.peek(&key).unwrap_or_else(|| SyncedValue::unset(&key)));

        let value = self.value;
        let has_error = self.has_error;
        spawn_local(async move {
            pending.await;
            if let Some(current) = field.peek(&key) {
                let _ = value.try_set(current);
            }
            let _ = has_error.try_set(field.has_error());
        });
    }

    /// Re-read from the remote, keeping the current value on failure
    pub fn refresh(&self) {
        let Some(field) = self.field.try_get_value() else { return };
        let key = self.key.get_value();
        let value = self.value;
        let has_error = self.has_error;
        spawn_local(async move {
            let refreshed = field.refresh(&key).await;
            let _ = value.try_set(refreshed);
            let _ = has_error.try_set(field.has_error());
        });
    }

    pub fn dismiss_error(&self) {
        self.field.with_value(SyncField::clear_error);
        self.has_error.set(false);
    }
}

/// Bind `key` of `field`, fetching it on mount
pub fn use_synced_field(field: SyncField, key: &str) -> SyncedFieldHandle {
    let value = RwSignal::new(field.peek(key).unwrap_or_else(|| SyncedValue::unset(key)));
    let has_error = RwSignal::new(field.has_error());

    let loader = field.clone();
    let load_key = key.to_string();
    spawn_local(async move {
        let loaded = loader.read(&load_key).await;
        let _ = value.try_set(loaded);
        let _ = has_error.try_set(loader.has_error());
    });

    SyncedFieldHandle {
        key: StoredValue::new(key.to_string()),
        field: StoredValue::new_local(field),
        value,
        has_error,
    }
}

// ========================
// Collections
// ========================

/// Snapshot of a collection for rendering
#[derive(Clone, Debug, Default, Store)]
pub struct CollectionView {
    pub collection: Collection,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
pub struct CollectionHandle {
    sync: StoredValue<CollectionSync, LocalStorage>,
    view: Store<CollectionView>,
}

impl CollectionHandle {
    pub fn view(&self) -> Store<CollectionView> {
        self.view
    }

    /// Ordered records of `table` under `parent_id` (tracked)
    pub fn records(&self, table: &str, parent_id: &str) -> Vec<Record> {
        self.view.collection().with(|collection| {
            collection
                .records(table, parent_id)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn load_all(&self, scope_keys: Vec<String>) {
        let Some(sync) = self.sync.try_get_value() else { return };
        let handle = *self;
        handle.view.loading().set(true);
        spawn_local(async move {
            // Failures are recorded on the collection and shown by the panel.
            let _ = sync.load_all(&scope_keys).await;
            handle.publish();
        });
    }

    /// Insert under `parent_id`. Fails with `Disposed` once the owning
    /// component is gone.
    pub async fn add(&self, table: &str, parent_id: &str, fields: FieldMap) -> SyncResult<()> {
        let sync = self.live_sync()?;
        self.view.loading().set(true);
        let result = sync.add(table, parent_id, fields).await;
        self.publish();
        result
    }

    pub async fn update(&self, table: &str, id: RecordId, fields: FieldMap) -> SyncResult<()> {
        let sync = self.live_sync()?;
        self.view.loading().set(true);
        let result = sync.update(table, id, fields).await;
        self.publish();
        result
    }

    pub async fn delete(&self, table: &str, id: RecordId) -> SyncResult<()> {
        let sync = self.live_sync()?;
        self.view.loading().set(true);
        let result = sync.delete(table, id).await;
        self.publish();
        result
    }

    fn live_sync(&self) -> SyncResult<CollectionSync> {
        self.sync.try_get_value().ok_or(SyncError::Disposed("collection"))
    }

    fn publish(&self) {
        let Some(sync) = self.sync.try_get_value() else { return };
        let _ = self.view.try_set(CollectionView {
            collection: sync.collection(),
            loading: sync.is_loading(),
            error: sync.error().map(|e| e.to_string()),
        });
    }
}

/// Collection over `sync`, loaded for `scope_keys` on mount
pub fn use_collection(sync: CollectionSync, scope_keys: Vec<String>) -> CollectionHandle {
    let handle = CollectionHandle {
        sync: StoredValue::new_local(sync),
        view: Store::new(CollectionView::default()),
    };
    handle.load_all(scope_keys);
    handle
}
