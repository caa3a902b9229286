//! Collection Sync
//!
//! CRUD over related record tables (activities, criteria, metrics, ...)
//! scoped by parent keys. Loads are all-or-nothing; every successful
//! mutation is followed by a full reload instead of a local patch, so the
//! in-memory collection is always a projection of the remote store.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use futures::future::join_all;

use super::error::{SyncError, SyncResult};
use super::remote::RecordStore;
use crate::models::{FieldMap, NewRecord, Record, RecordId};

/// Loaded records, grouped by table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    tables: BTreeMap<String, Vec<Record>>,
}

impl Collection {
    /// Records of `table` under `parent_id`, ordered by `order_index`.
    /// Gaps in the index are normal; equal indices fall back to id order.
    pub fn records(&self, table: &str, parent_id: &str) -> Vec<&Record> {
        self.tables
            .get(table)
            .map(|records| records.iter().filter(|r| r.parent_id == parent_id).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, table: &str, parent_id: &str) -> usize {
        self.tables
            .get(table)
            .map(|records| records.iter().filter(|r| r.parent_id == parent_id).count())
            .unwrap_or(0)
    }

    pub fn find(&self, table: &str, id: RecordId) -> Option<&Record> {
        self.tables.get(table)?.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }
}

fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| {
        (a.parent_id.as_str(), a.order_index, a.id).cmp(&(b.parent_id.as_str(), b.order_index, b.id))
    });
}

struct CollectionInner {
    remote: Rc<dyn RecordStore>,
    tables: Vec<String>,
    scope: RefCell<Option<Vec<String>>>,
    collection: RefCell<Collection>,
    in_flight: Cell<usize>,
    error: RefCell<Option<SyncError>>,
}

#[derive(Clone)]
pub struct CollectionSync {
    inner: Rc<CollectionInner>,
}

impl CollectionSync {
    pub fn new(remote: Rc<dyn RecordStore>, tables: Vec<String>) -> Self {
        Self {
            inner: Rc::new(CollectionInner {
                remote,
                tables,
                scope: RefCell::new(None),
                collection: RefCell::new(Collection::default()),
                in_flight: Cell::new(0),
                error: RefCell::new(None),
            }),
        }
    }

    /// Fetch every table for `scope_keys` in parallel.
    ///
    /// If any fetch fails the previous collection stays in place and one
    /// aggregated error is recorded and returned.
    pub async fn load_all(&self, scope_keys: &[String]) -> SyncResult<()> {
        *self.inner.scope.borrow_mut() = Some(scope_keys.to_vec());
        self.reload().await
    }

    /// Insert a record at the end of its parent scope, then reload
    pub async fn add(&self, table: &str, parent_id: &str, fields: FieldMap) -> SyncResult<()> {
        self.ensure_loaded()?;
        let record = NewRecord {
            parent_id: parent_id.to_string(),
            order_index: self.next_order_index(table, parent_id),
            fields,
        };
        let created = self
            .inner
            .remote
            .insert_record(table, &record)
            .await
            .map_err(|e| {
                log::error!("[COLLECTION] add to {} failed: {}", table, e);
                e
            })?;
        log::info!("[COLLECTION] added {} #{} at {}", table, created.id, created.order_index);
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Merge `fields` into record `id`, then reload
    pub async fn update(&self, table: &str, id: RecordId, fields: FieldMap) -> SyncResult<()> {
        self.ensure_loaded()?;
        if fields.is_empty() {
            return Ok(());
        }
        self.inner
            .remote
            .update_record(table, id, &fields)
            .await
            .map_err(|e| {
                log::error!("[COLLECTION] update of {} #{} failed: {}", table, id, e);
                e
            })?;
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Remove record `id`, then reload. Remaining indices are not renumbered.
    pub async fn delete(&self, table: &str, id: RecordId) -> SyncResult<()> {
        self.ensure_loaded()?;
        self.inner
            .remote
            .delete_record(table, id)
            .await
            .map_err(|e| {
                log::error!("[COLLECTION] delete of {} #{} failed: {}", table, id, e);
                e
            })?;
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Index a new record under `parent_id` would receive
    pub fn next_order_index(&self, table: &str, parent_id: &str) -> u32 {
        self.inner.collection.borrow().count(table, parent_id) as u32
    }

    pub fn collection(&self) -> Collection {
        self.inner.collection.borrow().clone()
    }

    pub fn records(&self, table: &str, parent_id: &str) -> Vec<Record> {
        self.inner
            .collection
            .borrow()
            .records(table, parent_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.get() > 0
    }

    pub fn error(&self) -> Option<SyncError> {
        self.inner.error.borrow().clone()
    }

    fn ensure_loaded(&self) -> SyncResult<()> {
        if self.inner.scope.borrow().is_none() {
            return Err(SyncError::NotLoaded);
        }
        Ok(())
    }

    // The mutation itself succeeded; a failed reload only shows up in error().
    async fn reload_after_mutation(&self) {
        if let Err(e) = self.reload().await {
            log::warn!("[COLLECTION] reload after mutation failed: {}", e);
        }
    }

    async fn reload(&self) -> SyncResult<()> {
        let scope = self.inner.scope.borrow().clone().ok_or(SyncError::NotLoaded)?;
        self.inner.in_flight.set(self.inner.in_flight.get() + 1);

        let remote = &self.inner.remote;
        let scope_keys = &scope;
        let fetches = self.inner.tables.iter().map(|table| async move {
            let result = remote.select_records(table, scope_keys).await;
            (table.clone(), result)
        });
        let results = join_all(fetches).await;
        self.inner.in_flight.set(self.inner.in_flight.get().saturating_sub(1));

        let mut tables = BTreeMap::new();
        let mut failures = Vec::new();
        for (table, result) in results {
            match result {
                Ok(mut records) => {
                    sort_records(&mut records);
                    tables.insert(table, records);
                }
                Err(e) => failures.push(format!("{}: {}", table, e)),
            }
        }

        if !failures.is_empty() {
            let error = SyncError::Load { failures };
            log::warn!("[COLLECTION] {}", error);
            *self.inner.error.borrow_mut() = Some(error.clone());
            return Err(error);
        }

        log::debug!("[COLLECTION] loaded {} tables for {} scopes", tables.len(), scope.len());
        // Last reload to resolve wins.
        *self.inner.collection.borrow_mut() = Collection { tables };
        *self.inner.error.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::remote::MemoryRemote;
    use serde_json::json;

    const ACTIVITIES: &str = "phase_activities";
    const METRICS: &str = "phase_metrics";

    fn fields(title: &str) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("title".to_string(), json!(title));
        map
    }

    fn scope(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn setup(remote: MemoryRemote) -> (Rc<MemoryRemote>, CollectionSync) {
        let remote = Rc::new(remote);
        let sync = CollectionSync::new(remote.clone(), vec![ACTIVITIES.to_string(), METRICS.to_string()]);
        (remote, sync)
    }

    fn indices(sync: &CollectionSync, table: &str, parent: &str) -> Vec<u32> {
        sync.records(table, parent).iter().map(|r| r.order_index).collect()
    }

    #[tokio::test]
    async fn test_load_all_scopes_and_orders() {
        let remote = MemoryRemote::new();
        remote.seed(ACTIVITIES, "phase-1", 1, fields("Second"));
        remote.seed(ACTIVITIES, "phase-1", 0, fields("First"));
        remote.seed(ACTIVITIES, "phase-2", 0, fields("Elsewhere"));
        remote.seed(METRICS, "phase-1", 0, fields("NPS"));
        let (_, sync) = setup(remote);

        sync.load_all(&scope(&["phase-1"])).await.unwrap();

        let titles: Vec<String> = sync
            .records(ACTIVITIES, "phase-1")
            .iter()
            .map(|r| r.text("title").to_string())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert!(sync.records(ACTIVITIES, "phase-2").is_empty());
        assert_eq!(sync.records(METRICS, "phase-1").len(), 1);
        assert!(!sync.is_loading());
    }

    #[tokio::test]
    async fn test_add_appends_at_current_count() {
        let remote = MemoryRemote::new();
        remote.seed(ACTIVITIES, "phase-1", 0, fields("Research"));
        remote.seed(ACTIVITIES, "phase-1", 1, fields("Interviews"));
        let (_, sync) = setup(remote);
        sync.load_all(&scope(&["phase-1"])).await.unwrap();

        sync.add(ACTIVITIES, "phase-1", fields("Pilot")).await.unwrap();

        let pilots: Vec<Record> = sync
            .records(ACTIVITIES, "phase-1")
            .into_iter()
            .filter(|r| r.text("title") == "Pilot")
            .collect();
        assert_eq!(pilots.len(), 1);
        assert_eq!(pilots[0].order_index, 2);
    }

    #[tokio::test]
    async fn test_delete_does_not_renumber() {
        let remote = MemoryRemote::new();
        let ids: Vec<RecordId> = (0..5)
            .map(|i| remote.seed(ACTIVITIES, "phase-1", i, fields(&format!("Step {}", i))))
            .collect();
        let (_, sync) = setup(remote);
        sync.load_all(&scope(&["phase-1"])).await.unwrap();

        sync.delete(ACTIVITIES, ids[1]).await.unwrap();
        sync.delete(ACTIVITIES, ids[3]).await.unwrap();

        assert_eq!(indices(&sync, ACTIVITIES, "phase-1"), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_update_reloads_from_remote() {
        let remote = MemoryRemote::new();
        let id = remote.seed(METRICS, "phase-1", 0, fields("CAC"));
        let (remote, sync) = setup(remote);
        sync.load_all(&scope(&["phase-1"])).await.unwrap();
        let selects = remote.select_calls();

        let mut patch = FieldMap::new();
        patch.insert("target".to_string(), json!("< $40"));
        sync.update(METRICS, id, patch).await.unwrap();

        let record = sync.collection().find(METRICS, id).cloned().unwrap();
        assert_eq!(record.text("title"), "CAC");
        assert_eq!(record.text("target"), "< $40");
        assert_eq!(remote.select_calls(), selects + 2);
    }

    #[tokio::test]
    async fn test_empty_update_skips_remote() {
        let remote = MemoryRemote::new();
        let id = remote.seed(METRICS, "phase-1", 0, fields("CAC"));
        let (remote, sync) = setup(remote);
        sync.load_all(&scope(&["phase-1"])).await.unwrap();
        let selects = remote.select_calls();

        sync.update(METRICS, id, FieldMap::new()).await.unwrap();
        assert_eq!(remote.select_calls(), selects);
    }

    #[tokio::test]
    async fn test_failed_mutation_rejects_without_reload() {
        let (remote, sync) = setup(MemoryRemote::new());
        sync.load_all(&scope(&["phase-1"])).await.unwrap();
        let selects = remote.select_calls();

        remote.fail_writes(true);
        let result = sync.add(ACTIVITIES, "phase-1", fields("Nope")).await;

        assert!(matches!(result, Err(SyncError::Remote { .. })));
        assert_eq!(remote.select_calls(), selects);
        assert!(sync.records(ACTIVITIES, "phase-1").is_empty());
    }

    #[tokio::test]
    async fn test_load_is_all_or_nothing() {
        let remote = MemoryRemote::new();
        remote.seed(ACTIVITIES, "phase-1", 0, fields("Kickoff"));
        let (remote, sync) = setup(remote);
        sync.load_all(&scope(&["phase-1"])).await.unwrap();
        let before = sync.collection();

        remote.seed(ACTIVITIES, "phase-1", 1, fields("Hidden"));
        remote.fail_table(METRICS);
        let result = sync.load_all(&scope(&["phase-1"])).await;

        match result {
            Err(SyncError::Load { failures }) => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].starts_with(METRICS));
            }
            other => panic!("expected load error, got {:?}", other),
        }
        assert_eq!(sync.collection(), before);
        assert!(sync.error().is_some());
    }

    #[tokio::test]
    async fn test_mutation_before_load_is_rejected() {
        let (_, sync) = setup(MemoryRemote::new());
        let result = sync.delete(ACTIVITIES, 1).await;
        assert_eq!(result, Err(SyncError::NotLoaded));
    }

    #[tokio::test]
    async fn test_concurrent_mutations_each_reload() {
        let remote = MemoryRemote::new();
        let keep = remote.seed(ACTIVITIES, "phase-1", 0, fields("Keep"));
        let drop = remote.seed(ACTIVITIES, "phase-1", 1, fields("Drop"));
        let (remote, sync) = setup(remote);
        sync.load_all(&scope(&["phase-1"])).await.unwrap();
        let selects = remote.select_calls();

        let (updated, deleted) = futures::join!(
            sync.update(ACTIVITIES, keep, fields("Kept")),
            sync.delete(ACTIVITIES, drop)
        );
        updated.unwrap();
        deleted.unwrap();

        let records = sync.records(ACTIVITIES, "phase-1");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("title"), "Kept");
        assert_eq!(remote.select_calls(), selects + 4);
    }

    #[test]
    fn test_equal_indices_fall_back_to_id_order() {
        let mut records = vec![
            Record { id: 9, parent_id: "p".into(), order_index: 2, fields: FieldMap::new() },
            Record { id: 4, parent_id: "p".into(), order_index: 2, fields: FieldMap::new() },
            Record { id: 7, parent_id: "p".into(), order_index: 0, fields: FieldMap::new() },
        ];
        sort_records(&mut records);
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 4, 9]);
    }
}
