//! Resolved configuration with lock provenance
//!
//! The resolved config carries the merged tree plus every instruction path
//! the lock set kept out of it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paths::get_path;

/// Instruction a locked path was filtered from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstructionSource {
    /// Secondary `globalOverride`
    Override,
    /// Client `configMerge`
    Merge,
    /// Client `configReplace`
    Replace,
}

/// A path removed from an instruction because it is locked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilteredPath {
    pub source: InstructionSource,
    pub path: String,
}

/// Result of one merge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedConfig {
    /// The merged configuration tree
    pub config: Value,

    /// Locked paths dropped from override, merge and replace instructions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filtered: Vec<FilteredPath>,
}

impl ResolvedConfig {
    pub fn into_value(self) -> Value {
        self.config
    }

    /// Whether any instruction was filtered by a lock
    pub fn was_filtered(&self) -> bool {
        !self.filtered.is_empty()
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.config, path)
    }

    /// Get a config value as u64
    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(|v| v.as_u64())
    }

    /// Get a config value as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get a config value as bool
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<ResolvedConfig> for Value {
    fn from(resolved: ResolvedConfig) -> Self {
        resolved.config
    }
}
