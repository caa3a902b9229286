//! Synced Field
//!
//! Editable values bound to remote content records. Writes land in memory
//! and in the local cache immediately; the remote upsert is best effort
//! and never rolls the value back. Reads fall back to the local cache when
//! the remote has no record or cannot be reached.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use super::error::SyncError;
use super::local::LocalCache;
use super::remote::ContentStore;
use crate::models::{SyncedValue, ValueSource};

struct FieldInner {
    remote: Rc<dyn ContentStore>,
    local: Rc<dyn LocalCache>,
    values: RefCell<HashMap<String, SyncedValue>>,
    // bumped on every write; in-flight reads compare against it
    revisions: RefCell<HashMap<String, u64>>,
    error: RefCell<Option<SyncError>>,
}

impl FieldInner {
    fn revision(&self, key: &str) -> u64 {
        self.revisions.borrow().get(key).copied().unwrap_or(0)
    }

    fn bump(&self, key: &str) -> u64 {
        let mut revisions = self.revisions.borrow_mut();
        let revision = revisions.entry(key.to_string()).or_insert(0);
        *revision += 1;
        *revision
    }

    fn peek(&self, key: &str) -> Option<SyncedValue> {
        self.values.borrow().get(key).cloned()
    }

    fn store(&self, value: SyncedValue) {
        self.values.borrow_mut().insert(value.key.clone(), value);
    }

    fn fallback(&self, key: &str) -> SyncedValue {
        match self.local.get(key) {
            Some(value) => SyncedValue::new(key, value, ValueSource::LocalFallback),
            None => SyncedValue::unset(key),
        }
    }

    fn record_error(&self, error: SyncError) {
        *self.error.borrow_mut() = Some(error);
    }
}

/// Content synchronization for single values, keyed by content key
#[derive(Clone)]
pub struct SyncField {
    inner: Rc<FieldInner>,
}

impl SyncField {
    pub fn new(remote: Rc<dyn ContentStore>, local: Rc<dyn LocalCache>) -> Self {
        Self {
            inner: Rc::new(FieldInner {
                remote,
                local,
                values: RefCell::new(HashMap::new()),
                revisions: RefCell::new(HashMap::new()),
                error: RefCell::new(None),
            }),
        }
    }

    /// Current value of `key`, fetching it on first access
    pub async fn read(&self, key: &str) -> SyncedValue {
        if let Some(value) = self.inner.peek(key) {
            return value;
        }
        self.fetch(key).await
    }

    /// Re-read `key` from the remote store
    pub async fn refresh(&self, key: &str) -> SyncedValue {
        self.fetch(key).await
    }

    /// In-memory value if `key` has been materialized
    pub fn peek(&self, key: &str) -> Option<SyncedValue> {
        self.inner.peek(key)
    }

    /// Apply `value` locally right away and return the remote upsert.
    ///
    /// The in-memory value and the local cache are updated before this
    /// returns. The returned future only pushes to the remote store; a
    /// failure there is recorded in `error()` and the value is kept.
    pub fn write(&self, key: &str, value: &str) -> impl Future<Output = ()> + 'static {
        let revision = self.inner.bump(key);
        self.inner
            .store(SyncedValue::new(key, value, ValueSource::LocalFallback));
        if let Err(e) = self.inner.local.set(key, value) {
            log::warn!("[SYNC] local cache write for '{}' failed: {}", key, e);
            self.inner.record_error(e);
        }

        let inner = Rc::clone(&self.inner);
        let key = key.to_string();
        let value = value.to_string();
        async move {
            match inner.remote.upsert_content(&key, &value).await {
                Ok(()) => {
                    if inner.revision(&key) == revision {
                        inner.store(SyncedValue::new(&key, value, ValueSource::Remote));
                    }
                }
                Err(e) => {
                    log::warn!("[SYNC] remote write for '{}' failed, keeping local value: {}", key, e);
                    inner.record_error(e);
                }
            }
        }
    }

    pub fn error(&self) -> Option<SyncError> {
        self.inner.error.borrow().clone()
    }

    pub fn has_error(&self) -> bool {
        self.inner.error.borrow().is_some()
    }

    pub fn clear_error(&self) {
        *self.inner.error.borrow_mut() = None;
    }

    async fn fetch(&self, key: &str) -> SyncedValue {
        let revision = self.inner.revision(key);
        let fetched = self.inner.remote.fetch_content(key).await;

        // A write landed while the read was in flight; it wins.
        if self.inner.revision(key) != revision {
            return self.inner.peek(key).unwrap_or_else(|| SyncedValue::unset(key));
        }

        let resolved = match fetched {
            Ok(Some(value)) => {
                if let Err(e) = self.inner.local.set(key, &value) {
                    log::warn!("[SYNC] could not refresh local cache for '{}': {}", key, e);
                }
                SyncedValue::new(key, value, ValueSource::Remote)
            }
            Ok(None) => self
                .inner
                .peek(key)
                .unwrap_or_else(|| self.inner.fallback(key)),
            Err(e) => {
                log::warn!("[SYNC] remote read for '{}' failed, using cached value: {}", key, e);
                self.inner.record_error(e);
                self.inner
                    .peek(key)
                    .unwrap_or_else(|| self.inner.fallback(key))
            }
        };
        log::debug!("[SYNC] '{}' resolved from {:?}", key, resolved.source);
        self.inner.store(resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::error::SyncResult;
    use crate::sync::local::MemoryCache;
    use crate::sync::remote::MemoryRemote;
    use async_trait::async_trait;
    use futures::channel::oneshot;

    fn setup(remote: MemoryRemote, cache: MemoryCache) -> (Rc<MemoryRemote>, Rc<MemoryCache>, SyncField) {
        let remote = Rc::new(remote);
        let cache = Rc::new(cache);
        let field = SyncField::new(remote.clone(), cache.clone());
        (remote, cache, field)
    }

    #[tokio::test]
    async fn test_read_prefers_remote() {
        let (_, cache, field) = setup(
            MemoryRemote::new().with_content("vision", "Remote vision"),
            MemoryCache::new().with_entry("vision", "Old vision"),
        );

        let value = field.read("vision").await;
        assert_eq!(value.value, "Remote vision");
        assert_eq!(value.source, ValueSource::Remote);
        // Remote value refreshes the fallback
        assert_eq!(cache.get("vision").as_deref(), Some("Remote vision"));
        assert!(!field.has_error());
    }

    #[tokio::test]
    async fn test_read_falls_back_when_remote_has_no_record() {
        let (_, _, field) = setup(MemoryRemote::new(), MemoryCache::new().with_entry("mission", "Cached"));

        let value = field.read("mission").await;
        assert_eq!(value.value, "Cached");
        assert_eq!(value.source, ValueSource::LocalFallback);
        assert!(!field.has_error());
    }

    #[tokio::test]
    async fn test_read_unset_when_nothing_exists() {
        let (_, _, field) = setup(MemoryRemote::new(), MemoryCache::new());

        let value = field.read("tagline").await;
        assert_eq!(value, SyncedValue::unset("tagline"));
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_cache_and_flags_error() {
        let remote = MemoryRemote::new().with_content("vision", "Remote");
        remote.fail_reads(true);
        let (_, _, field) = setup(remote, MemoryCache::new().with_entry("vision", "Cached"));

        let value = field.read("vision").await;
        assert_eq!(value.value, "Cached");
        assert_eq!(value.source, ValueSource::LocalFallback);
        assert!(matches!(field.error(), Some(SyncError::Remote { .. })));
    }

    #[tokio::test]
    async fn test_write_survives_rejecting_remote() {
        let remote = MemoryRemote::new();
        remote.fail_reads(true);
        remote.fail_writes(true);
        let (remote, cache, field) = setup(remote, MemoryCache::new());

        field.write("vision", "Ship fast").await;

        let value = field.read("vision").await;
        assert_eq!(value.value, "Ship fast");
        assert!(field.has_error());
        assert_eq!(cache.get("vision").as_deref(), Some("Ship fast"));
        assert_eq!(remote.content("vision"), None);
    }

    #[tokio::test]
    async fn test_write_is_visible_before_remote_settles() {
        let (remote, _, field) = setup(MemoryRemote::new(), MemoryCache::new());

        let pending = field.write("vision", "Draft");
        assert_eq!(field.peek("vision").map(|v| v.value).as_deref(), Some("Draft"));
        assert_eq!(remote.content("vision"), None);

        pending.await;
        let value = field.read("vision").await;
        assert_eq!(value.source, ValueSource::Remote);
        assert_eq!(remote.content("vision").as_deref(), Some("Draft"));
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_current_value() {
        let (remote, _, field) = setup(MemoryRemote::new().with_content("kpi", "10%"), MemoryCache::new());
        assert_eq!(field.read("kpi").await.value, "10%");

        remote.fail_reads(true);
        let value = field.refresh("kpi").await;
        assert_eq!(value.value, "10%");
        assert!(field.has_error());

        field.clear_error();
        assert!(!field.has_error());
    }

    struct GatedRemote {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait(?Send)]
    impl ContentStore for GatedRemote {
        async fn fetch_content(&self, _key: &str) -> SyncResult<Option<String>> {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(Some("stale".to_string()))
        }

        async fn upsert_content(&self, _key: &str, _value: &str) -> SyncResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_late_read_does_not_clobber_write() {
        let (tx, rx) = oneshot::channel();
        let remote = Rc::new(GatedRemote {
            gate: RefCell::new(Some(rx)),
        });
        let field = SyncField::new(remote, Rc::new(MemoryCache::new()));
        let writer = field.clone();

        let (read, _) = futures::join!(field.read("vision"), async move {
            writer.write("vision", "fresh").await;
            let _ = tx.send(());
        });

        assert_eq!(read.value, "fresh");
        assert_eq!(field.peek("vision").map(|v| v.value).as_deref(), Some("fresh"));
    }
}
