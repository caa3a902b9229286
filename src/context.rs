//! Application Context
//!
//! Shared stores and UI signals provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::DashboardConfig;
use crate::sync::{CollectionSync, RecordStore, SyncField};

/// App-wide stores and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<DashboardConfig>,
    /// Synced single values (vision, positioning, ...)
    content: StoredValue<SyncField, LocalStorage>,
    /// Backend for related-record collections
    records: StoredValue<Rc<dyn RecordStore>, LocalStorage>,
    /// Current toast message - read
    pub toast: ReadSignal<Option<String>>,
    /// Current toast message - write
    set_toast: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        config: DashboardConfig,
        content: SyncField,
        records: Rc<dyn RecordStore>,
        toast: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self {
            config: StoredValue::new(config),
            content: StoredValue::new_local(content),
            records: StoredValue::new_local(records),
            toast: toast.0,
            set_toast: toast.1,
        }
    }

    pub fn config(&self) -> DashboardConfig {
        self.config.get_value()
    }

    pub fn content(&self) -> SyncField {
        self.content.get_value()
    }

    /// Fresh collection sync over the configured record tables
    pub fn collection_sync(&self) -> CollectionSync {
        CollectionSync::new(self.records.get_value(), self.config().record_tables)
    }

    /// Show a transient message (mutation failures and the like)
    pub fn show_toast(&self, message: String) {
        self.set_toast.set(Some(message));
    }

    pub fn dismiss_toast(&self) {
        self.set_toast.set(None);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
