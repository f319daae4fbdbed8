//! 設定解決モジュール
/// 設定レイヤーの深いマージ
mod merge;
/// 文字列と dataset の正規化
mod normalise;
/// スキーマ定義と検証
mod schema;

pub use merge::merge_configs;
pub use normalise::{
    extract_config_by_namespace,
    normalise_dataset,
    normalise_string,
    normalise_value,
};
pub use schema::{
    AnyOfCondition,
    ConfigSchema,
    PropertyDescriptor,
    PropertyType,
    is_truthy,
    validate_config,
};
