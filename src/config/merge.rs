//! 設定レイヤーの深いマージ

use serde_json::{
    Map,
    Value,
};

/// Merges configuration layers left to right into a single object.
///
/// 同じキーの値が両方ともオブジェクトなら再帰的にマージし、それ以外は
/// 後のレイヤーの値で丸ごと置き換える。配列は不透明な値として扱う。
///
/// ```
/// use component_kit::config::merge_configs;
/// use serde_json::json;
///
/// let defaults = json!({ "threshold": 0, "i18n": { "showSection": "Show" } });
/// let overrides = json!({ "threshold": 50 });
///
/// let merged = merge_configs(&[
///     defaults.as_object().cloned().unwrap(),
///     overrides.as_object().cloned().unwrap(),
/// ]);
///
/// assert_eq!(merged.get("threshold"), Some(&json!(50)));
/// assert_eq!(merged.get("i18n"), Some(&json!({ "showSection": "Show" })));
/// ```
#[must_use]
pub fn merge_configs(layers: &[Map<String, Value>]) -> Map<String, Value> {
    let mut merged = Map::new();
    for layer in layers {
        for (key, value) in layer {
            merge_value(merged.entry(key.clone()).or_insert(Value::Null), value);
        }
    }
    merged
}

/// 単一スロットへのマージ。オブジェクト同士のときだけ再帰する。
fn merge_value(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(nested)) => {
            for (key, value) in nested {
                merge_value(existing.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
