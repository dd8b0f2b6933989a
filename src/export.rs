// Author: Dustin Pilgrim
// License: MIT

use crate::{ConfigError, Value};

fn export_error(format: &'static str, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Conversion {
        expected: format,
        found: e.to_string(),
    }
}

/// Export a resolved value as compact JSON.
///
/// Mappings keep document order. Non-finite floats become `null`.
///
/// # Examples
/// ```
/// use tfexp_cfg::{Loader, VariableStore, export};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let loader = Loader::builder().store(Arc::new(VariableStore::new())).build();
/// let value = loader.load_str("units: !product [32, 2]")?;
/// assert_eq!(export::to_json(&value)?, r#"{"units":64}"#);
/// # Ok(())
/// # }
/// ```
pub fn to_json(value: &Value) -> Result<String, ConfigError> {
    serde_json::to_string(value).map_err(|e| export_error("JSON-serializable value", e))
}

pub fn to_json_pretty(value: &Value) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(value).map_err(|e| export_error("JSON-serializable value", e))
}

/// Export a resolved value as YAML. The output has no tags, so loading it
/// again yields the same value unless a string is shaped like `$name` or
/// `name <= value`.
pub fn to_yaml(value: &Value) -> Result<String, ConfigError> {
    serde_yaml::to_string(value).map_err(|e| export_error("YAML-serializable value", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn sample() -> Value {
        let mut inner = IndexMap::new();
        inner.insert("lr".to_string(), Value::Float(0.5));
        inner.insert("layers".to_string(), Value::Sequence(vec![Value::Integer(2), Value::Null]));
        let mut root = IndexMap::new();
        root.insert("name".to_string(), Value::from("mnist"));
        root.insert("opt".to_string(), Value::Mapping(inner));
        Value::Mapping(root)
    }

    #[test]
    fn test_json_keeps_order() {
        let json = to_json(&sample()).unwrap();
        assert_eq!(json, r#"{"name":"mnist","opt":{"lr":0.5,"layers":[2,null]}}"#);
    }

    #[test]
    fn test_yaml_export_parses_back() {
        let yaml = to_yaml(&sample()).unwrap();
        let node: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(Value::from_plain(&node).unwrap(), sample());
    }
}
