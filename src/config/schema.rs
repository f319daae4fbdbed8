//! コンポーネント設定のスキーマ定義と検証

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// 設定フィールドが取り得る型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// 文字列のまま扱う
    String,
    /// `"true"` との比較で真偽値に変換する
    Boolean,
    /// JS の `Number()` 互換で数値に変換する
    Number,
    /// dataset の名前空間から復元されるネスト設定
    Object,
}

/// Schema entry describing a single configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// 値の型
    #[serde(rename = "type")]
    pub ty: PropertyType,
}

impl PropertyDescriptor {
    /// Creates a descriptor for the given type.
    #[must_use]
    pub const fn new(ty: PropertyType) -> Self {
        Self { ty }
    }
}

/// One condition of an `anyOf` validation group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyOfCondition {
    /// この条件を満たすために truthy であるべきフィールド名
    pub required: Vec<String>,
    /// 条件が満たされなかったときのエラーメッセージ
    pub error_message: String,
}

impl AnyOfCondition {
    /// Creates a condition over `required` fields.
    #[must_use]
    pub fn new(required: &[&str], error_message: &str) -> Self {
        Self {
            required: required.iter().map(ToString::to_string).collect(),
            error_message: error_message.to_string(),
        }
    }
}

/// Declarative schema for a component's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigSchema {
    /// フィールド名と型の対応
    pub properties: HashMap<String, PropertyDescriptor>,
    /// 少なくとも一つは満たされるべき条件グループ
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<AnyOfCondition>,
}

impl ConfigSchema {
    /// Looks up the descriptor for `field`.
    #[must_use]
    pub fn property(&self, field: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(field)
    }
}

/// JavaScript 互換の truthiness 判定。
///
/// `null`、`false`、`0`、空文字列が falsy。配列とオブジェクトは
/// 空であっても truthy。
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Validates `config` against the schema's `anyOf` group.
///
/// グループ内の条件が一つでも満たされれば妥当。全条件が失敗した場合に
/// 限り、失敗した条件のメッセージをすべて返す。
#[must_use]
pub fn validate_config(schema: &ConfigSchema, config: &Map<String, Value>) -> Vec<String> {
    let mut failures = Vec::new();
    let mut passing = 0_usize;

    for condition in &schema.any_of {
        let met = condition.required.iter().all(|field| config.get(field).is_some_and(is_truthy));
        if met {
            passing += 1;
        } else {
            failures.push(condition.error_message.clone());
        }
    }

    if passing == 0 { failures } else { Vec::new() }
}
