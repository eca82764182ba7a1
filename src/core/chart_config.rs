use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::lenient::lenient_number;
use crate::core::{AxisConfig, AxisName, MapConfig};
use crate::error::{ChartError, ChartResult};

/// Server-assigned chart identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(u64);

impl ChartId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    LineChart,
    ScatterPlot,
    StackedArea,
    MultiBar,
    HorizontalMultiBar,
    DiscreteBar,
    SlopeChart,
}

/// Tabs a published chart can expose to viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerTab {
    Chart,
    Map,
    Data,
    Sources,
    Download,
}

/// Main visual drawn beneath any overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryView {
    Chart,
    Map,
}

/// One selected country/entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedEntity {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectedEntity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }
}

/// Variable attached to the chart; fields other than `id` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartVariable {
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartVariable {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            extra: Map::new(),
        }
    }
}

/// Binding of a variable to a chart property (`y`, `x`, `color`, `size`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDimension {
    pub property: String,
    #[serde(rename = "variableId", default)]
    pub variable_id: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartDimension {
    /// Color dimension every scatter plot needs.
    #[must_use]
    pub fn default_scatter_color() -> Self {
        let mut extra = Map::new();
        for (key, value) in [
            ("unit", ""),
            ("name", "Color"),
            ("period", "single"),
            ("mode", "specific"),
            ("targetYear", "2000"),
            ("tolerance", "5"),
            ("maximumAge", "5"),
        ] {
            extra.insert(key.to_owned(), Value::String(value.to_owned()));
        }
        Self {
            property: "color".to_owned(),
            variable_id: Value::String("123".to_owned()),
            extra,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    #[serde(deserialize_with = "read_margin_top")]
    pub top: f64,
    #[serde(deserialize_with = "read_margin_left")]
    pub left: f64,
    #[serde(deserialize_with = "read_margin_bottom")]
    pub bottom: f64,
    #[serde(deserialize_with = "read_margin_right")]
    pub right: f64,
}

lenient_number!(read_margin_top, "margins.top", f64, 10.0);
lenient_number!(read_margin_left, "margins.left", f64, 60.0);
lenient_number!(read_margin_bottom, "margins.bottom", f64, 10.0);
lenient_number!(read_margin_right, "margins.right", f64, 10.0);

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            left: 60.0,
            bottom: 10.0,
            right: 10.0,
        }
    }
}

/// Full editable description of one chart.
///
/// Keys follow the stored JSON format. Unknown keys land in `extra` and are
/// written back untouched; they never overwrite typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChartConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ChartId>,
    #[serde(rename = "isPublished", skip_serializing_if = "std::ops::Not::not")]
    pub is_published: bool,
    pub chart_type: ChartType,
    #[serde(rename = "chart-name")]
    pub name: String,
    #[serde(rename = "chart-slug")]
    pub slug: String,
    #[serde(rename = "chart-notes")]
    pub notes: String,
    #[serde(rename = "chart-description")]
    pub description: String,
    pub cache: bool,
    #[serde(rename = "selected-countries")]
    pub selected_entities: Vec<SelectedEntity>,
    pub tabs: Vec<ViewerTab>,
    pub default_tab: ViewerTab,
    pub line_type: String,
    #[serde(rename = "chart-dimensions", deserialize_with = "deserialize_dimensions")]
    pub dimensions: Vec<ChartDimension>,
    pub variables: Vec<ChartVariable>,
    pub y_axis: AxisConfig,
    pub x_axis: AxisConfig,
    pub margins: Margins,
    pub units: String,
    pub logo: String,
    pub iframe_width: String,
    pub iframe_height: String,
    pub hide_legend: bool,
    pub group_by_variables: bool,
    pub add_country_mode: String,
    pub x_axis_scale_selector: bool,
    pub y_axis_scale_selector: bool,
    pub map_config: MapConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ChartConfiguration {
    fn default() -> Self {
        Self {
            id: None,
            is_published: false,
            chart_type: ChartType::default(),
            name: String::new(),
            slug: String::new(),
            notes: String::new(),
            description: String::new(),
            cache: true,
            selected_entities: Vec::new(),
            tabs: vec![ViewerTab::Chart, ViewerTab::Data, ViewerTab::Sources],
            default_tab: ViewerTab::Chart,
            line_type: "2".to_owned(),
            dimensions: Vec::new(),
            variables: Vec::new(),
            y_axis: AxisConfig::new().with_property("axis-label-distance", "-10"),
            x_axis: AxisConfig::new(),
            margins: Margins::default(),
            units: String::new(),
            logo: "uploads/26538.png".to_owned(),
            iframe_width: "100%".to_owned(),
            iframe_height: "660px".to_owned(),
            hide_legend: false,
            group_by_variables: false,
            add_country_mode: "add-country".to_owned(),
            x_axis_scale_selector: false,
            y_axis_scale_selector: false,
            map_config: MapConfig::default(),
            extra: Map::new(),
        }
    }
}

impl ChartConfiguration {
    /// Parses stored JSON and normalizes it for editing.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let mut config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to parse chart json: {e}"))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn from_json_value(value: Value) -> ChartResult<Self> {
        let mut config: Self = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to decode chart json: {e}"))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn to_json_value(&self) -> ChartResult<Value> {
        serde_json::to_value(self).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to serialize chart json: {e}"))
        })
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ChartError::InvalidConfiguration(format!("failed to serialize chart json: {e}"))
        })
    }

    /// Applies load-boundary fixups. Returns `true` when anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        if self.chart_type == ChartType::ScatterPlot
            && !self.dimensions.iter().any(|d| d.property == "color")
        {
            debug!("adding default color dimension to scatter plot");
            self.dimensions.push(ChartDimension::default_scatter_color());
            changed = true;
        }
        changed
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn has_map_tab(&self) -> bool {
        self.tabs.contains(&ViewerTab::Map)
    }

    #[must_use]
    pub fn primary_view(&self) -> PrimaryView {
        if self.default_tab == ViewerTab::Map && self.has_map_tab() {
            PrimaryView::Map
        } else {
            PrimaryView::Chart
        }
    }

    /// Public address the chart is served at once published.
    #[must_use]
    pub fn canonical_url(&self, public_base_url: &str) -> String {
        let base = public_base_url.trim_end_matches('/');
        if !self.slug.is_empty() {
            format!("{base}/{}", self.slug)
        } else if let Some(id) = self.id {
            format!("{base}/charts/{id}")
        } else {
            base.to_owned()
        }
    }

    /// Copy suitable for creating a new chart: identity and publish state dropped.
    #[must_use]
    pub fn detached_copy(&self) -> Self {
        Self {
            id: None,
            is_published: false,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn axis(&self, axis: AxisName) -> &AxisConfig {
        match axis {
            AxisName::X => &self.x_axis,
            AxisName::Y => &self.y_axis,
        }
    }

    pub fn set_axis_config(&mut self, axis: AxisName, prop: impl Into<String>, value: Value) {
        let target = match axis {
            AxisName::X => &mut self.x_axis,
            AxisName::Y => &mut self.y_axis,
        };
        target.set(prop, value);
    }

    #[must_use]
    pub fn find_selected_entity(&self, id: &str) -> Option<&SelectedEntity> {
        self.selected_entities.iter().find(|e| e.id == id)
    }

    /// Returns `false` when an entity with the same id is already selected.
    pub fn add_selected_entity(&mut self, entity: SelectedEntity) -> bool {
        if self.find_selected_entity(&entity.id).is_some() {
            return false;
        }
        self.selected_entities.push(entity);
        true
    }

    pub fn update_selected_entity_color(&mut self, id: &str, color: impl Into<String>) -> bool {
        match self.selected_entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.color = Some(color.into());
                true
            }
            None => false,
        }
    }

    pub fn remove_selected_entity(&mut self, id: &str) -> bool {
        let before = self.selected_entities.len();
        self.selected_entities.retain(|e| e.id != id);
        self.selected_entities.len() != before
    }

    pub fn replace_selected_entities(&mut self, entity: SelectedEntity) {
        self.selected_entities = vec![entity];
    }

    /// Returns `false` when a variable with the same id is already attached.
    pub fn add_variable(&mut self, variable: ChartVariable) -> bool {
        if self.variables.iter().any(|v| v.id == variable.id) {
            return false;
        }
        self.variables.push(variable);
        true
    }
}

fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Dimensions were historically stored as a JSON-encoded string.
fn deserialize_dimensions<'de, D>(deserializer: D) -> Result<Vec<ChartDimension>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(encoded) if encoded.trim().is_empty() => Ok(Vec::new()),
        Value::String(encoded) => serde_json::from_str(&encoded).map_err(D::Error::custom),
        other => serde_json::from_value(other).map_err(D::Error::custom),
    }
}
