use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisName {
    X,
    Y,
}

impl AxisName {
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::X => "x-axis",
            Self::Y => "y-axis",
        }
    }
}

/// Free-form axis settings keyed by property name (`axis-label-distance`, ...).
///
/// Storage emits an empty object as `[]`; deserialization normalizes any array
/// (or `null`) to an empty object so property writes never hit a list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct AxisConfig(IndexMap<String, Value>);

impl AxisConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_property(mut self, prop: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(prop, value);
        self
    }

    #[must_use]
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.0.get(prop)
    }

    pub fn set(&mut self, prop: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(prop.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AxisConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StoredAxisConfig {
            Object(IndexMap<String, Value>),
            Array(Vec<Value>),
            Null,
        }

        match StoredAxisConfig::deserialize(deserializer)? {
            StoredAxisConfig::Object(props) => Ok(Self(props)),
            StoredAxisConfig::Array(items) => {
                if !items.is_empty() {
                    warn!(
                        dropped = items.len(),
                        "axis config stored as a non-empty array; normalizing to empty object"
                    );
                }
                Ok(Self::default())
            }
            StoredAxisConfig::Null => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AxisConfig;

    #[test]
    fn empty_array_becomes_empty_object() {
        let axis: AxisConfig = serde_json::from_value(json!([])).expect("array accepted");
        assert!(axis.is_empty());
        assert_eq!(serde_json::to_value(&axis).expect("serialize"), json!({}));
    }

    #[test]
    fn object_properties_keep_insertion_order() {
        let axis: AxisConfig =
            serde_json::from_value(json!({"b": 1, "a": "2"})).expect("object accepted");
        let keys: Vec<_> = axis.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
