//! Execution configuration (`[execution]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Object attributes tried, in order, for a result's raw JSON form
    pub raw_attributes: Vec<String>,
    /// JSONL call journal path; disabled when unset
    pub journal: Option<PathBuf>,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            raw_attributes: bridge_application::DEFAULT_RAW_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            journal: None,
        }
    }
}
