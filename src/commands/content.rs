//! Content Commands
//!
//! Frontend bindings for key/value content records.

use serde::Serialize;

use super::{call, from_result, to_args};
use crate::sync::SyncResult;

#[derive(Serialize)]
struct ContentKeyArgs<'a> {
    table: &'a str,
    key: &'a str,
}

#[derive(Serialize)]
struct UpsertContentArgs<'a> {
    table: &'a str,
    key: &'a str,
    value: &'a str,
}

pub async fn fetch_content(table: &str, key: &str) -> SyncResult<Option<String>> {
    let result = call("fetch_content", to_args(&ContentKeyArgs { table, key })?).await?;
    from_result(result)
}

pub async fn upsert_content(table: &str, key: &str, value: &str) -> SyncResult<()> {
    call("upsert_content", to_args(&UpsertContentArgs { table, key, value })?).await?;
    Ok(())
}
