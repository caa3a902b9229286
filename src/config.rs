//! Dashboard Configuration

use serde::{Deserialize, Serialize};

use crate::sync::{SyncError, SyncResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for localStorage keys
    pub storage_prefix: String,
    /// Remote table holding synced content values
    pub content_table: String,
    /// Related-record tables loaded per phase
    pub record_tables: Vec<String>,
    pub toast_timeout_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage_prefix: "strategy-deck:".to_string(),
            content_table: "content_sections".to_string(),
            record_tables: vec![
                "phase_activities".to_string(),
                "phase_criteria".to_string(),
                "phase_metrics".to_string(),
            ],
            toast_timeout_ms: 4000,
        }
    }
}

/// localStorage key holding a JSON override of the defaults
pub const CONFIG_STORAGE_KEY: &str = "strategy-deck:config";

impl DashboardConfig {
    pub fn from_json(json: &str) -> SyncResult<Self> {
        serde_json::from_str(json).map_err(|e| SyncError::Decode(e.to_string()))
    }

    /// Config from an optional stored JSON document. A broken document
    /// is logged and ignored.
    pub fn load(stored: Option<&str>) -> Self {
        let Some(json) = stored else { return Self::default() };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("[APP] loaded dashboard config override");
                config
            }
            Err(e) => {
                log::warn!("[APP] ignoring stored config: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = DashboardConfig::from_json(r#"{"storage_prefix":"demo:"}"#).unwrap();
        assert_eq!(config.storage_prefix, "demo:");
        assert_eq!(config.content_table, "content_sections");
        assert_eq!(config.record_tables.len(), 3);
        assert_eq!(config.toast_timeout_ms, 4000);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        assert_eq!(DashboardConfig::load(None), DashboardConfig::default());
        assert_eq!(DashboardConfig::load(Some("not json")), DashboardConfig::default());

        let config = DashboardConfig::load(Some(r#"{"toast_timeout_ms":1500}"#));
        assert_eq!(config.toast_timeout_ms, 1500);
        assert_eq!(config.storage_prefix, "strategy-deck:");
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        assert!(matches!(DashboardConfig::from_json("{"), Err(SyncError::Decode(_))));
    }
}
