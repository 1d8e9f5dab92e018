//! Suite Configuration
//!
//! Storage keys and grid bounds. Every field has a default so a partial
//! JSON override is enough.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;

/// Storage key under which an optional config override is kept
pub const CONFIG_KEY: &str = "deskboard-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteConfig {
    /// Board storage key
    pub board_key: String,
    /// Widget layout storage key
    pub layout_key: String,
    /// Prefix for saved workflows (`<prefix><workflow id>`)
    pub workflow_key_prefix: String,
    /// Widget layout format version written on save/export
    pub layout_version: String,
    pub grid: GridConfig,
    /// Pointer movement (px) before a mousedown becomes a drag
    pub drag_threshold_px: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Grid width in cells
    pub columns: u32,
    /// Rows scanned before the bound grows past the lowest widget
    pub max_rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            max_rows: 20,
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            board_key: "kanban-board".to_string(),
            layout_key: "widget-layout".to_string(),
            workflow_key_prefix: "workflow-".to_string(),
            layout_version: "1.0".to_string(),
            grid: GridConfig::default(),
            drag_threshold_px: 5,
        }
    }
}

impl SuiteConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Storage key of a saved workflow
    pub fn workflow_key(&self, workflow_id: &str) -> String {
        format!("{}{}", self.workflow_key_prefix, workflow_id)
    }
}
