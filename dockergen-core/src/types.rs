//! Domain types for image definitions.
//!
//! An [`ImageDefinition`] is an open record: every key it carries is handed to
//! the template, so the type is a map rather than a fixed struct.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ScalarValue
// ---------------------------------------------------------------------------

/// A single scalar value inside an image definition.
///
/// Arrays and objects are not scalars; a collection containing them fails to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`, kept exact instead of falling to `Float`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl ScalarValue {
    /// `true` for `Null` and for the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            ScalarValue::Null => true,
            ScalarValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for ScalarValue {
    /// Text form used in path segments: strings verbatim, numbers in their
    /// JSON form (`12`, `12.4`, `12.0`), booleans lowercase, null empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Integer(i) => write!(f, "{i}"),
            ScalarValue::Unsigned(u) => write!(f, "{u}"),
            ScalarValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            ScalarValue::Float(x) => write!(f, "{x}"),
            ScalarValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u64> for ScalarValue {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::Unsigned(u), Self::Integer)
    }
}

impl From<f64> for ScalarValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// ImageDefinition
// ---------------------------------------------------------------------------

/// One record describing a single Dockerfile variant to generate.
///
/// Keys are kept sorted so that serialized forms are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageDefinition(BTreeMap<String, ScalarValue>);

impl ImageDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and programmatic callers.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ScalarValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ScalarValue> {
        self.0.get(key)
    }

    /// Text form of `key`, or `None` when absent, null or empty.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_blank())
            .map(ToString::to_string)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ScalarValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<ScalarValue>> FromIterator<(K, V)> for ImageDefinition {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// DefinitionSet
// ---------------------------------------------------------------------------

/// Root of a definitions file: `{ "docker_images": [ ... ] }`.
///
/// A file without the `docker_images` key yields an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSet {
    #[serde(default)]
    pub docker_images: Vec<ImageDefinition>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display() {
        assert_eq!(ScalarValue::from("v0.3.9").to_string(), "v0.3.9");
        assert_eq!(ScalarValue::from(12_i64).to_string(), "12");
        assert_eq!(ScalarValue::from(12.4).to_string(), "12.4");
        assert_eq!(ScalarValue::from(12.0).to_string(), "12.0");
        assert_eq!(ScalarValue::from(true).to_string(), "true");
        assert_eq!(ScalarValue::Null.to_string(), "");
    }

    #[test]
    fn blank_values() {
        assert!(ScalarValue::Null.is_blank());
        assert!(ScalarValue::from("").is_blank());
        assert!(!ScalarValue::from("x").is_blank());
        assert!(!ScalarValue::from(0_i64).is_blank());
    }

    #[test]
    fn text_skips_blank_values() {
        let def = ImageDefinition::new()
            .with("flavor", "")
            .with("cuda_version", "12.4.0")
            .with("extra", ScalarValue::Null);
        assert_eq!(def.text("flavor"), None);
        assert_eq!(def.text("extra"), None);
        assert_eq!(def.text("missing"), None);
        assert_eq!(def.text("cuda_version").as_deref(), Some("12.4.0"));
    }

    #[test]
    fn definition_set_json_shape() {
        let json = r#"{
            "docker_images": [
                {"comfyui_version": "v0.3.9", "cuda_version": "12.4.0", "python": 3.11, "gpu": true, "note": null}
            ]
        }"#;
        let set: DefinitionSet = serde_json::from_str(json).expect("parse");
        assert_eq!(set.docker_images.len(), 1);
        let def = &set.docker_images[0];
        assert_eq!(def.get("python"), Some(&ScalarValue::Float(3.11)));
        assert_eq!(def.get("gpu"), Some(&ScalarValue::Bool(true)));
        assert_eq!(def.get("note"), Some(&ScalarValue::Null));
    }

    #[test]
    fn large_integers_stay_exact() {
        let json = r#"{"docker_images": [{"build": 18446744073709551615, "small": 7}]}"#;
        let set: DefinitionSet = serde_json::from_str(json).expect("parse");
        let def = &set.docker_images[0];
        assert_eq!(def.get("build"), Some(&ScalarValue::Unsigned(u64::MAX)));
        assert_eq!(def.text("build").as_deref(), Some("18446744073709551615"));
        assert_eq!(def.get("small"), Some(&ScalarValue::Integer(7)));
        assert_eq!(ScalarValue::from(7_u64), ScalarValue::Integer(7));
    }

    #[test]
    fn missing_collection_key_is_empty() {
        let set: DefinitionSet = serde_json::from_str("{}").expect("parse");
        assert!(set.docker_images.is_empty());
    }

    #[test]
    fn nested_values_are_rejected() {
        let json = r#"{"docker_images": [{"comfyui_version": ["v0.3.9"]}]}"#;
        assert!(serde_json::from_str::<DefinitionSet>(json).is_err());
    }

    #[test]
    fn serializes_as_flat_map() {
        let def = ImageDefinition::new().with("b", 2_i64).with("a", "x");
        let json = serde_json::to_string(&def).expect("serialize");
        assert_eq!(json, r#"{"a":"x","b":2}"#);
    }
}
