//! Rewrite of legacy Keras architecture descriptors into the current schema.
//!
//! Old artifacts carry two obsolete constructs: an InputLayer `batch_shape`
//! (batch dimension included) where the current schema expects `input_shape`
//! without it, and a `dtype` expressed as a nested policy object where a
//! plain type name is expected.

use serde_json::Value;

/// Recursively rewrites a descriptor in place. Applies to every nested
/// mapping, including mappings inside arrays.
pub fn rewrite_legacy_config(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(batch_shape) = map.remove("batch_shape") {
                // drop the leading batch dimension; a shape of one dimension
                // or fewer carries no usable input shape at all
                if let Value::Array(dims) = batch_shape {
                    if dims.len() > 1 {
                        map.insert("input_shape".to_string(), Value::Array(dims[1..].to_vec()));
                    }
                }
            }

            let collapsed = match map.get("dtype") {
                Some(Value::Object(dtype)) => dtype
                    .get("config")
                    .and_then(|c| c.get("name"))
                    .and_then(|n| n.as_str())
                    .map(|n| Value::String(n.to_string())),
                _ => None,
            };
            if let Some(name) = collapsed {
                map.insert("dtype".to_string(), name);
            }

            for nested in map.values_mut() {
                rewrite_legacy_config(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_legacy_config(item);
            }
        }
        _ => {}
    }
}

/// Rejects descriptor nodes still carrying legacy fields; the loader uses
/// this to decide whether the rewrite pass is needed.
pub fn check_current_schema(config: &Value) -> crate::Result<()> {
    if config.get("batch_shape").is_some() {
        return Err(crate::Error::ModelLoad(
            "legacy batch_shape field in layer config".to_string(),
        ));
    }
    if matches!(config.get("dtype"), Some(Value::Object(_))) {
        return Err(crate::Error::ModelLoad(
            "legacy dtype descriptor in layer config".to_string(),
        ));
    }
    Ok(())
}
