//! Content Synchronization
//!
//! Optimistic single-value sync with a local fallback, and reload-after-
//! mutation CRUD over related record tables.

mod error;
mod remote;
mod local;
mod field;
mod collection;
mod hooks;

pub use error::{SyncError, SyncResult};
pub use remote::{ContentStore, MemoryRemote, RecordStore};
pub use local::{BrowserStorage, LocalCache, MemoryCache};
pub use field::SyncField;
pub use collection::CollectionSync;
pub use hooks::{use_collection, use_synced_field, CollectionHandle, CollectionViewStoreFields};
