//! Frontend Models
//!
//! Data structures shared by the sync hooks, the navigation controllers
//! and the panels that consume them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a synced value currently comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueSource {
    Remote,
    LocalFallback,
    Unset,
}

/// A single editable value bound to a remote content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedValue {
    pub key: String,
    pub value: String,
    pub source: ValueSource,
}

impl SyncedValue {
    pub fn unset(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: String::new(),
            source: ValueSource::Unset,
        }
    }

    pub fn new(key: &str, value: impl Into<String>, source: ValueSource) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
            source,
        }
    }
}

pub type RecordId = u32;

/// Free-form record fields (title, owner, target, ...)
pub type FieldMap = Map<String, Value>;

/// Generic related record (activity, criterion, metric, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(rename = "parentId")]
    pub parent_id: String,
    #[serde(rename = "orderIndex")]
    pub order_index: u32,
    #[serde(default)]
    pub fields: FieldMap,
}

impl Record {
    /// String field lookup, empty when missing or not a string
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

/// A record before the store assigns its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(rename = "parentId")]
    pub parent_id: String,
    #[serde(rename = "orderIndex")]
    pub order_index: u32,
    pub fields: FieldMap,
}

/// Renderable body of a slide or tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Markdown { text: String },
    Bullets { items: Vec<String> },
    Metrics { rows: Vec<(String, String)> },
}

/// One entry of a full-screen presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Vec<ContentBlock>,
}

impl SlideItem {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            content: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn block(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }

    /// Slide showing the same copy as `tile`, sharing its id
    pub fn from_tile(tile: &TileItem) -> Self {
        Self {
            id: tile.id.clone(),
            title: tile.title.clone(),
            description: tile.description.clone(),
            content: tile.content.clone(),
        }
    }
}

/// Drill-down overlay content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Vec<ContentBlock>,
}

impl TileItem {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            content: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn block(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }
}

/// Observable state of the presentation overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentationState {
    pub is_open: bool,
    pub current_index: usize,
}

/// Observable state of the drill-down overlay
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileState {
    pub is_open: bool,
    pub active_item: Option<TileItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_names() {
        let json = r#"{"id":3,"parentId":"phase-1","orderIndex":2,"fields":{"title":"Launch"}}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.parent_id, "phase-1");
        assert_eq!(record.order_index, 2);
        assert_eq!(record.text("title"), "Launch");
        assert_eq!(record.text("owner"), "");
    }

    #[test]
    fn test_slide_from_tile_keeps_id() {
        let tile = TileItem::new("tam", "Market size")
            .describe("Addressable market")
            .block(ContentBlock::Bullets { items: vec!["EU".into()] });
        let slide = SlideItem::from_tile(&tile);
        assert_eq!(slide.id, "tam");
        assert_eq!(slide.description.as_deref(), Some("Addressable market"));
        assert_eq!(slide.content, tile.content);
    }

    #[test]
    fn test_value_source_serialization() {
        let json = serde_json::to_string(&ValueSource::LocalFallback).unwrap();
        assert_eq!(json, "\"local-fallback\"");
    }
}
