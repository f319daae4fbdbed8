//! 文字列と dataset の正規化
//!
//! `data-*` 属性の値はすべて文字列として届く。ここでスキーマのヒントと
//! 値の形から、真偽値・数値・ネストした設定オブジェクトに復元する。

use std::collections::BTreeMap;

use serde_json::{
    Map,
    Value,
};

use crate::config::schema::{
    ConfigSchema,
    PropertyDescriptor,
    PropertyType,
};

/// Normalises a raw attribute string into a typed JSON value.
///
/// スキーマのヒントがある場合はそれに従う:
///
/// - `boolean`: トリム後の値が `"true"` のときだけ `true`
/// - `number`: JS の `Number()` 互換で解釈し、失敗時は `null`
/// - それ以外のヒントでは値をそのまま文字列として返す
///
/// ヒントがない場合は値の形から推測する。`"true"` / `"false"` は真偽値、
/// 空でなく有限の数値として読める値は数値、それ以外 (空白のみを含む) は
/// トリムしていない元の文字列のまま。
#[must_use]
pub fn normalise_string(value: &str, property: Option<&PropertyDescriptor>) -> Value {
    let trimmed = value.trim();

    match property.map(|descriptor| descriptor.ty) {
        Some(PropertyType::Boolean) => Value::Bool(trimmed == "true"),
        Some(PropertyType::Number) => parse_number(trimmed),
        Some(PropertyType::String | PropertyType::Object) => Value::String(value.to_string()),
        None => detect_value(value, trimmed),
    }
}

/// Normalises an already typed value; only strings are reinterpreted.
#[must_use]
pub fn normalise_value(value: Value, property: Option<&PropertyDescriptor>) -> Value {
    match value {
        Value::String(raw) => normalise_string(&raw, property),
        other => other,
    }
}

/// ヒントなし値の型推測
fn detect_value(original: &str, trimmed: &str) -> Value {
    if trimmed == "true" || trimmed == "false" {
        return Value::Bool(trimmed == "true");
    }
    // An empty string would read as zero; it stays a string.
    if !trimmed.is_empty() {
        let number = parse_number(trimmed);
        if !number.is_null() {
            return number;
        }
    }
    Value::String(original.to_string())
}

/// JS の `Number()` に倣った文字列の数値解釈。
///
/// 空文字列は 0。失敗 (JS では `NaN`) と無限大は JSON で表せないため
/// `null` になる。
fn parse_number(trimmed: &str) -> Value {
    if trimmed.is_empty() {
        return Value::Number(0.into());
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.starts_with(['+', '-']) {
                return Value::Null;
            }
            return parse_radix(digits, radix);
        }
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::Number(integer.into());
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// 基数付きリテラルの解釈。u64 に収まる値は整数のまま、溢れる値は JS の
/// `Number()` と同じく f64 へ丸める。
fn parse_radix(digits: &str, radix: u32) -> Value {
    if digits.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = u64::from_str_radix(digits, radix) {
        return Value::Number(n.into());
    }
    digits
        .chars()
        .try_fold(0_f64, |acc, ch| {
            ch.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// Rebuilds the nested object encoded under `namespace` in a flat dataset.
///
/// `i18n.charactersUnderLimit.one` のようなドット区切りキーを走査して
/// ネストを復元する。名前空間そのもの (`i18n`) だけのキーは葉を持たない
/// ため読み飛ばす。スキーマ上 `namespace` が `object` 型で宣言されて
/// いなければ `None`。
///
/// キーは辞書順で処理されるため、同じ枝に浅い葉と深い葉が衝突しても
/// 結果は入力順によらず決定的になる。
#[must_use]
pub fn extract_config_by_namespace(
    schema: &ConfigSchema,
    dataset: &BTreeMap<String, String>,
    namespace: &str,
) -> Option<Map<String, Value>> {
    let property = schema.property(namespace)?;
    if property.ty != PropertyType::Object {
        return None;
    }

    let mut extracted = Map::new();
    for (key, value) in dataset {
        let mut segments = key.split('.');
        if segments.next() != Some(namespace) {
            continue;
        }
        let path: Vec<&str> = segments.collect();
        if path.is_empty() {
            continue;
        }
        insert_at_path(&mut extracted, &path, normalise_string(value, None));
    }
    Some(extracted)
}

/// ドット区切りパスの葉へ値を書き込む。途中にオブジェクト以外の値が
/// あれば空オブジェクトで置き換える。
fn insert_at_path(target: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((leaf, branches)) = path.split_last() else {
        return;
    };

    let mut current = target;
    for segment in branches {
        let slot = current.entry((*segment).to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Some(next) = slot.as_object_mut() else {
            return;
        };
        current = next;
    }
    current.insert((*leaf).to_string(), value);
}

/// Builds the dataset layer of a component's configuration.
///
/// スキーマに載っているフィールドだけを拾う。`object` 型のフィールドは
/// dataset の直接値ではなく、常に名前空間の抽出結果になる (該当キーが
/// なければ空オブジェクト)。
#[must_use]
pub fn normalise_dataset(schema: &ConfigSchema, dataset: &BTreeMap<String, String>) -> Map<String, Value> {
    let mut normalised = Map::new();

    for (field, property) in &schema.properties {
        if property.ty == PropertyType::Object {
            if let Some(extracted) = extract_config_by_namespace(schema, dataset, field) {
                normalised.insert(field.clone(), Value::Object(extracted));
            }
        } else if let Some(value) = dataset.get(field) {
            normalised.insert(field.clone(), normalise_string(value, Some(property)));
        }
    }

    normalised
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn dataset(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
    }

    fn i18n_schema() -> ConfigSchema {
        ConfigSchema {
            properties: HashMap::from([
                ("i18n".to_string(), PropertyDescriptor::new(PropertyType::Object)),
                ("threshold".to_string(), PropertyDescriptor::new(PropertyType::Number)),
                ("rememberExpanded".to_string(), PropertyDescriptor::new(PropertyType::Boolean)),
                ("label".to_string(), PropertyDescriptor::new(PropertyType::String)),
            ]),
            any_of: Vec::new(),
        }
    }

    // ===== normalise_string テスト =====

    #[rstest]
    #[case::boolean_true("true", json!(true))]
    #[case::boolean_false("false", json!(false))]
    #[case::padded_boolean("  true  ", json!(true))]
    #[case::integer("100", json!(100))]
    #[case::negative("-3", json!(-3))]
    #[case::fraction("1.5", json!(1.5))]
    #[case::scientific("1e3", json!(1000.0))]
    #[case::hex("0x1F", json!(31))]
    #[case::huge_hex("0xFFFFFFFFFFFFFFFF", json!(18_446_744_073_709_551_615_u64))]
    #[case::beyond_u64_hex("0x10000000000000000", json!(18_446_744_073_709_551_616.0))]
    #[case::bare_radix_prefix("0x", json!("0x"))]
    #[case::padded_number(" 42 ", json!(42))]
    #[case::empty("", json!(""))]
    #[case::blank("   ", json!("   "))]
    #[case::text("Show", json!("Show"))]
    #[case::not_quite_number("12px", json!("12px"))]
    #[case::infinity("Infinity", json!("Infinity"))]
    #[case::padded_text("  Show  ", json!("  Show  "))]
    fn normalise_string_detects_types_without_a_hint(#[case] raw: &str, #[case] expected: Value) {
        assert_that!(normalise_string(raw, None), eq(&expected));
    }

    #[rstest]
    #[case::exactly_true("true", true)]
    #[case::padded("  true ", true)]
    #[case::capitalised("True", false)]
    #[case::one("1", false)]
    #[case::yes("yes", false)]
    #[case::empty("", false)]
    fn boolean_hint_only_accepts_the_literal_true(#[case] raw: &str, #[case] expected: bool) {
        let property = PropertyDescriptor::new(PropertyType::Boolean);
        assert_that!(normalise_string(raw, Some(&property)), eq(&json!(expected)));
    }

    #[rstest]
    #[case::integer("100", json!(100))]
    #[case::fraction("0.75", json!(0.75))]
    #[case::unparseable("ten", json!(null))]
    // JS の Number("") は 0
    #[case::empty("", json!(0))]
    #[case::blank("   ", json!(0))]
    #[case::infinite("Infinity", json!(null))]
    fn number_hint_coerces_or_nulls(#[case] raw: &str, #[case] expected: Value) {
        let property = PropertyDescriptor::new(PropertyType::Number);
        assert_that!(normalise_string(raw, Some(&property)), eq(&expected));
    }

    #[rstest]
    fn string_hint_keeps_numeric_text_verbatim() {
        let property = PropertyDescriptor::new(PropertyType::String);
        assert_that!(normalise_string("123", Some(&property)), eq(&json!("123")));
    }

    // 正規化は冪等
    #[rstest]
    #[case("100")]
    #[case("true")]
    #[case("  Show  ")]
    #[case("")]
    fn normalise_value_is_idempotent(#[case] raw: &str) {
        let first = normalise_string(raw, None);
        let second = normalise_value(first.clone(), None);
        assert_that!(second, eq(&first));
    }

    #[rstest]
    fn normalise_value_leaves_non_strings_untouched() {
        assert_that!(normalise_value(json!(42), None), eq(&json!(42)));
        assert_that!(normalise_value(json!({ "nested": [] }), None), eq(&json!({ "nested": [] })));
    }

    // ===== extract_config_by_namespace テスト =====

    #[googletest::test]
    fn extraction_rebuilds_nested_objects() {
        let data = dataset(&[
            ("i18n.show-section", "Show"),
            ("i18n.count.one", "%{count} item"),
            ("i18n.count.other", "%{count} items"),
        ]);

        let extracted = extract_config_by_namespace(&i18n_schema(), &data, "i18n").unwrap();

        expect_that!(
            Value::Object(extracted),
            eq(&json!({
                "show-section": "Show",
                "count": { "one": "%{count} item", "other": "%{count} items" }
            }))
        );
    }

    #[googletest::test]
    fn bare_namespace_key_is_skipped() {
        let data = dataset(&[("i18n", "junk"), ("i18n.showSection", "Show")]);

        let extracted = extract_config_by_namespace(&i18n_schema(), &data, "i18n").unwrap();

        expect_that!(Value::Object(extracted), eq(&json!({ "showSection": "Show" })));
    }

    #[googletest::test]
    fn namespace_reused_as_inner_key_still_nests() {
        let data = dataset(&[("i18n.i18n", "meta")]);

        let extracted = extract_config_by_namespace(&i18n_schema(), &data, "i18n").unwrap();

        expect_that!(Value::Object(extracted), eq(&json!({ "i18n": "meta" })));
    }

    #[rstest]
    fn deeper_path_replaces_a_shallower_leaf() {
        // 辞書順で "i18n.count" が先に処理され、"i18n.count.one" が
        // その葉を空オブジェクトで置き換えてから書き込む。
        let data = dataset(&[("i18n.count", "many"), ("i18n.count.one", "one item")]);

        let extracted = extract_config_by_namespace(&i18n_schema(), &data, "i18n").unwrap();

        assert_that!(Value::Object(extracted), eq(&json!({ "count": { "one": "one item" } })));
    }

    #[rstest]
    fn unrelated_namespaces_are_ignored() {
        let data = dataset(&[("i18nx.label", "nope"), ("other.key", "nope"), ("i18n.label", "yes")]);

        let extracted = extract_config_by_namespace(&i18n_schema(), &data, "i18n").unwrap();

        assert_that!(Value::Object(extracted), eq(&json!({ "label": "yes" })));
    }

    #[rstest]
    fn extraction_requires_an_object_typed_field() {
        assert_that!(extract_config_by_namespace(&i18n_schema(), &dataset(&[]), "threshold"), none());
        assert_that!(extract_config_by_namespace(&i18n_schema(), &dataset(&[]), "missing"), none());
    }

    #[rstest]
    fn extraction_normalises_leaf_values() {
        let data = dataset(&[("i18n.limit", "100"), ("i18n.enabled", "true")]);

        let extracted = extract_config_by_namespace(&i18n_schema(), &data, "i18n").unwrap();

        assert_that!(Value::Object(extracted), eq(&json!({ "limit": 100, "enabled": true })));
    }

    // ===== normalise_dataset テスト =====

    #[googletest::test]
    fn dataset_layer_follows_schema_hints() {
        let data = dataset(&[
            ("threshold", "75"),
            ("rememberExpanded", "false"),
            ("label", "42"),
            ("ignored", "value"),
            ("i18n.showSection", "Show"),
        ]);

        let normalised = normalise_dataset(&i18n_schema(), &data);

        expect_that!(
            Value::Object(normalised),
            eq(&json!({
                "threshold": 75,
                "rememberExpanded": false,
                "label": "42",
                "i18n": { "showSection": "Show" }
            }))
        );
    }

    #[googletest::test]
    fn object_fields_always_resolve_to_the_extraction() {
        // 直接値があっても名前空間の抽出結果が優先される。
        let data = dataset(&[("i18n", "junk")]);

        let normalised = normalise_dataset(&i18n_schema(), &data);

        expect_that!(Value::Object(normalised), eq(&json!({ "i18n": {} })));
    }

    #[rstest]
    fn absent_fields_stay_absent_except_objects() {
        let normalised = normalise_dataset(&i18n_schema(), &dataset(&[]));

        assert_that!(Value::Object(normalised), eq(&json!({ "i18n": {} })));
    }
}
