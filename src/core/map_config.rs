use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::lenient::{self, lenient_number};

pub const CUSTOM_COLOR_SCHEME_NAME: &str = "custom";

/// Settings for the map tab. Missing keys fall back to `MapConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    #[serde(deserialize_with = "read_variable_id")]
    pub variable_id: i64,
    #[serde(deserialize_with = "read_min_year")]
    pub min_year: i32,
    #[serde(deserialize_with = "read_max_year")]
    pub max_year: i32,
    #[serde(deserialize_with = "read_target_year")]
    pub target_year: i32,
    pub target_year_mode: String,
    pub mode: String,
    #[serde(deserialize_with = "read_time_tolerance")]
    pub time_tolerance: u32,
    /// Year selectors: `{ "year": 1980 }` or `{ "startYear", "endYear", "interval" }`.
    pub time_ranges: Vec<Value>,
    pub timeline_mode: String,
    pub color_scheme_name: String,
    /// Either `false` (automatic) or an explicit list of bin boundaries.
    pub color_scheme_values: Value,
    pub color_scheme_labels: Vec<String>,
    pub color_scheme_values_automatic: bool,
    #[serde(deserialize_with = "read_color_scheme_interval")]
    pub color_scheme_interval: usize,
    pub color_scheme_invert: bool,
    #[serde(deserialize_with = "read_color_scheme_min_value")]
    pub color_scheme_min_value: Option<f64>,
    pub custom_color_scheme: Vec<String>,
    pub projection: String,
    pub legend_description: String,
    #[serde(deserialize_with = "read_legend_step_size")]
    pub legend_step_size: u32,
    pub legend_orientation: String,
}

lenient_number!(read_variable_id, "variableId", i64, -1);
lenient_number!(read_min_year, "minYear", i32, 1980);
lenient_number!(read_max_year, "maxYear", i32, 2000);
lenient_number!(read_target_year, "targetYear", i32, 1980);
lenient_number!(read_time_tolerance, "timeTolerance", u32, 1);
lenient_number!(read_color_scheme_interval, "colorSchemeInterval", usize, 5);
lenient_number!(read_legend_step_size, "legendStepSize", u32, 20);

fn read_color_scheme_min_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::optional_number(deserializer, "colorSchemeMinValue")
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            variable_id: -1,
            min_year: 1980,
            max_year: 2000,
            target_year: 1980,
            target_year_mode: "normal".to_owned(),
            mode: "specific".to_owned(),
            time_tolerance: 1,
            time_ranges: Vec::new(),
            timeline_mode: "timeline".to_owned(),
            color_scheme_name: "BuGn".to_owned(),
            color_scheme_values: Value::Bool(false),
            color_scheme_labels: Vec::new(),
            color_scheme_values_automatic: true,
            color_scheme_interval: 5,
            color_scheme_invert: false,
            color_scheme_min_value: None,
            custom_color_scheme: ["#000", "#c00", "#0c0", "#00c", "#c0c"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            projection: "World".to_owned(),
            legend_description: String::new(),
            legend_step_size: 20,
            legend_orientation: "landscape".to_owned(),
        }
    }
}

impl MapConfig {
    #[must_use]
    pub fn uses_custom_color_scheme(&self) -> bool {
        self.color_scheme_name == CUSTOM_COLOR_SCHEME_NAME
    }

    /// Sets the number of color bins; a custom scheme is cut down to match.
    pub fn set_color_scheme_interval(&mut self, interval: usize) {
        if self.uses_custom_color_scheme() {
            self.custom_color_scheme.truncate(interval);
        }
        self.color_scheme_interval = interval;
    }
}
