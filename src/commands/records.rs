//! Record Commands
//!
//! Frontend bindings for related-record tables.

use serde::Serialize;

use super::{call, from_result, to_args};
use crate::models::{FieldMap, NewRecord, Record, RecordId};
use crate::sync::SyncResult;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct SelectArgs<'a> {
    table: &'a str,
    #[serde(rename = "parentIds")]
    parent_ids: &'a [String],
}

#[derive(Serialize)]
struct InsertArgs<'a> {
    table: &'a str,
    record: &'a NewRecord,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    table: &'a str,
    id: RecordId,
    fields: &'a FieldMap,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    table: &'a str,
    id: RecordId,
}

// ========================
// Commands
// ========================

pub async fn select_records(table: &str, parent_ids: &[String]) -> SyncResult<Vec<Record>> {
    let result = call("select_records", to_args(&SelectArgs { table, parent_ids })?).await?;
    from_result(result)
}

pub async fn insert_record(table: &str, record: &NewRecord) -> SyncResult<Record> {
    let result = call("insert_record", to_args(&InsertArgs { table, record })?).await?;
    from_result(result)
}

pub async fn update_record(table: &str, id: RecordId, fields: &FieldMap) -> SyncResult<()> {
    call("update_record", to_args(&UpdateArgs { table, id, fields })?).await?;
    Ok(())
}

pub async fn delete_record(table: &str, id: RecordId) -> SyncResult<()> {
    call("delete_record", to_args(&IdArgs { table, id })?).await?;
    Ok(())
}
