//! Remote Store Interfaces
//!
//! Abstract CRUD backend consumed by the sync hooks. The host command
//! bindings implement these over IPC; `MemoryRemote` backs tests and the
//! offline preview.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use super::error::{SyncError, SyncResult};
use crate::models::{FieldMap, NewRecord, Record, RecordId};

/// Key/value content records
#[async_trait(?Send)]
pub trait ContentStore {
    /// Fetch the value stored under `key`, `None` when there is no record
    async fn fetch_content(&self, key: &str) -> SyncResult<Option<String>>;

    /// Insert or replace the value stored under `key`
    async fn upsert_content(&self, key: &str, value: &str) -> SyncResult<()>;
}

/// Relational records addressed by table plus parent scope
#[async_trait(?Send)]
pub trait RecordStore {
    /// All records of `table` whose parent is one of `parent_ids`
    async fn select_records(&self, table: &str, parent_ids: &[String]) -> SyncResult<Vec<Record>>;

    async fn insert_record(&self, table: &str, record: &NewRecord) -> SyncResult<Record>;

    /// Merge `fields` into the record with `id`
    async fn update_record(&self, table: &str, id: RecordId, fields: &FieldMap) -> SyncResult<()>;

    async fn delete_record(&self, table: &str, id: RecordId) -> SyncResult<()>;
}

/// In-memory store with failure switches
#[derive(Default)]
pub struct MemoryRemote {
    content: RefCell<HashMap<String, String>>,
    tables: RefCell<HashMap<String, Vec<Record>>>,
    next_id: Cell<RecordId>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    failing_tables: RefCell<HashSet<String>>,
    select_calls: Cell<usize>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(self, key: &str, value: &str) -> Self {
        self.content.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    /// Seed a record directly, bypassing the failure switches
    pub fn seed(&self, table: &str, parent_id: &str, order_index: u32, fields: FieldMap) -> RecordId {
        let id = self.allocate_id();
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(Record {
                id,
                parent_id: parent_id.to_string(),
                order_index,
                fields,
            });
        id
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make every select on `table` fail
    pub fn fail_table(&self, table: &str) {
        self.failing_tables.borrow_mut().insert(table.to_string());
    }

    pub fn content(&self, key: &str) -> Option<String> {
        self.content.borrow().get(key).cloned()
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.get()
    }

    fn allocate_id(&self) -> RecordId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn check_write(&self, operation: &str) -> SyncResult<()> {
        if self.fail_writes.get() {
            return Err(SyncError::remote(operation, "store unavailable"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ContentStore for MemoryRemote {
    async fn fetch_content(&self, key: &str) -> SyncResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(SyncError::remote("fetch_content", "store unavailable"));
        }
        Ok(self.content(key))
    }

    async fn upsert_content(&self, key: &str, value: &str) -> SyncResult<()> {
        self.check_write("upsert_content")?;
        self.content.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait(?Send)]
impl RecordStore for MemoryRemote {
    async fn select_records(&self, table: &str, parent_ids: &[String]) -> SyncResult<Vec<Record>> {
        self.select_calls.set(self.select_calls.get() + 1);
        if self.fail_reads.get() || self.failing_tables.borrow().contains(table) {
            return Err(SyncError::remote("select_records", format!("{} unavailable", table)));
        }
        let tables = self.tables.borrow();
        Ok(tables
            .get(table)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| parent_ids.contains(&r.parent_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_record(&self, table: &str, record: &NewRecord) -> SyncResult<Record> {
        self.check_write("insert_record")?;
        let created = Record {
            id: self.allocate_id(),
            parent_id: record.parent_id.clone(),
            order_index: record.order_index,
            fields: record.fields.clone(),
        };
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, table: &str, id: RecordId, fields: &FieldMap) -> SyncResult<()> {
        self.check_write("update_record")?;
        let mut tables = self.tables.borrow_mut();
        let record = tables
            .get_mut(table)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| SyncError::remote("update_record", format!("no record {} in {}", id, table)))?;
        for (name, value) in fields {
            record.fields.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete_record(&self, table: &str, id: RecordId) -> SyncResult<()> {
        self.check_write("delete_record")?;
        let mut tables = self.tables.borrow_mut();
        let records = tables
            .get_mut(table)
            .ok_or_else(|| SyncError::remote("delete_record", format!("no table {}", table)))?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(SyncError::remote("delete_record", format!("no record {} in {}", id, table)));
        }
        Ok(())
    }
}
