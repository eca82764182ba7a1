use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ChartId;
use crate::error::{ChartError, ChartResult};

pub const CHARTS_COLLECTION_PATH: &str = "/admin/charts";

/// Deployment settings for an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Prefix for admin navigation targets, e.g. `https://host` or empty for same-origin.
    #[serde(default)]
    pub admin_root_url: String,
    /// Base of canonical public chart URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_resize_throttle_ms")]
    pub resize_throttle_ms: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            admin_root_url: String::new(),
            public_base_url: default_public_base_url(),
            resize_throttle_ms: default_resize_throttle_ms(),
        }
    }
}

impl EditorSettings {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to parse editor settings: {e}"))
        })
    }

    #[must_use]
    pub fn with_admin_root_url(mut self, url: impl Into<String>) -> Self {
        self.admin_root_url = url.into();
        self
    }

    #[must_use]
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_resize_throttle_ms(mut self, ms: u64) -> Self {
        self.resize_throttle_ms = ms;
        self
    }

    #[must_use]
    pub fn resize_throttle_interval(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }

    /// Request path for creating or updating a chart.
    #[must_use]
    pub fn save_path(id: Option<ChartId>) -> String {
        match id {
            Some(id) => format!("{CHARTS_COLLECTION_PATH}/{id}"),
            None => CHARTS_COLLECTION_PATH.to_owned(),
        }
    }

    /// Where to go after a chart was created from the editor.
    #[must_use]
    pub fn chart_location(&self, id: ChartId) -> String {
        self.admin_url(&format!("{CHARTS_COLLECTION_PATH}/{id}"))
    }

    /// Edit page for a chart created through "save as new".
    #[must_use]
    pub fn edit_location(&self, id: ChartId) -> String {
        self.admin_url(&format!("{CHARTS_COLLECTION_PATH}/{id}/edit"))
    }

    #[must_use]
    pub fn admin_url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_root_url.trim_end_matches('/'))
    }
}

fn default_public_base_url() -> String {
    "/grapher".to_owned()
}

fn default_resize_throttle_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::EditorSettings;
    use crate::core::ChartId;

    #[test]
    fn locations_are_prefixed_with_admin_root() {
        let settings = EditorSettings::default().with_admin_root_url("https://owid.test/");
        assert_eq!(
            settings.chart_location(ChartId::new(42)),
            "https://owid.test/admin/charts/42"
        );
        assert_eq!(
            settings.edit_location(ChartId::new(42)),
            "https://owid.test/admin/charts/42/edit"
        );
    }

    #[test]
    fn save_path_depends_on_identity() {
        assert_eq!(EditorSettings::save_path(None), "/admin/charts");
        assert_eq!(
            EditorSettings::save_path(Some(ChartId::new(9))),
            "/admin/charts/9"
        );
    }
}
