//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::{
    Map,
    Value,
};

/// json! で書いたオブジェクトを設定レイヤーに変換する
///
/// # Arguments
/// * `value` - `json!({ ... })` で組み立てたオブジェクト
///
/// # Returns
/// オブジェクトのエントリを持つ `Map`。オブジェクト以外なら空
pub(crate) fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
