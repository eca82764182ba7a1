use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Database variable the editor can attach to a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorVariable {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Server-side context for the editor: what exists in the database.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorData {
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub variables: Vec<EditorVariable>,
}

impl EditorData {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to parse editor data: {e}"))
        })
    }

    /// Variables keyed by id, in server order. Later duplicates win.
    #[must_use]
    pub fn variables_by_id(&self) -> IndexMap<i64, &EditorVariable> {
        self.variables.iter().map(|v| (v.id, v)).collect()
    }
}
