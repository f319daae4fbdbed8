//! コンポーネント記述子と設定解決
//!
//! 各コンポーネントは記述子 (名前・既定値・スキーマ・上書きフック) を
//! 宣言し、初期化時にホスト要素とコンストラクタ設定を突き合わせて
//! 最終的な設定を導く。

/// 組み込みコンポーネントの記述子カタログ
pub mod catalog;

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::config::{
    ConfigSchema,
    is_truthy,
    merge_configs,
    normalise_dataset,
    validate_config,
};
use crate::element::HostElement;
use crate::i18n::{
    LocaleServices,
    Translator,
};

/// dataset レイヤーを検査して追加の設定レイヤーを返すフック
pub type ConfigOverride = fn(&Map<String, Value>) -> Map<String, Value>;

/// Everything a component declares about its configuration.
#[derive(Debug, Clone, Default)]
pub struct ComponentDescriptor {
    /// エラーメッセージの接頭辞になる名前 (例: `"character-count"`)
    pub name: String,
    /// 要求するルート要素のタグ名。`None` なら何でもよい
    pub element_kind: Option<String>,
    /// 既定値。設定を受け取るコンポーネントは宣言必須
    pub defaults: Option<Map<String, Value>>,
    /// 設定スキーマ。設定を受け取るコンポーネントは宣言必須
    pub schema: Option<ConfigSchema>,
    /// dataset レイヤーを検査する上書きフック
    pub config_override: Option<ConfigOverride>,
}

impl ComponentDescriptor {
    /// Creates a bare descriptor with only a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }
}

/// 初期化が失敗したときのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// ルート要素が渡されなかった
    #[error("{component}: Root element not found")]
    ElementNotFound {
        /// コンポーネント名
        component: String,
    },

    /// ルート要素のタグが宣言と合わない
    #[error("{component}: Root element is not of type <{expected}> (found <{actual}>)")]
    ElementWrongType {
        /// コンポーネント名
        component: String,
        /// 宣言されたタグ名
        expected: String,
        /// 実際のタグ名
        actual: String,
    },

    /// 既定値なしで設定解決が要求された
    #[error("{component}: Config passed as parameter into constructor but no defaults defined")]
    MissingDefaults {
        /// コンポーネント名
        component: String,
    },

    /// スキーマなしで設定解決が要求された
    #[error("{component}: Config passed as parameter into constructor but no schema defined")]
    MissingSchema {
        /// コンポーネント名
        component: String,
    },

    /// スキーマ検証に失敗した
    #[error("{component}: {message}")]
    Validation {
        /// コンポーネント名
        component: String,
        /// 最初の検証エラー
        message: String,
    },
}

/// Resolves the effective configuration for a component instance.
///
/// レイヤーは弱い順に 既定値、コンストラクタ設定、上書きフック、dataset
/// で、同じキーは後のレイヤーが勝つ。マージ結果がスキーマ検証に落ちた
/// 場合は最初のメッセージを致命的エラーとして返す。
pub fn resolve_config(
    descriptor: &ComponentDescriptor,
    element: Option<&dyn HostElement>,
    constructor_config: Option<&Map<String, Value>>,
) -> Result<ResolvedConfig, ComponentError> {
    // 1. ルート要素の存在と種類を確認
    let element = element
        .ok_or_else(|| ComponentError::ElementNotFound { component: descriptor.name.clone() })?;
    if let Some(expected) = &descriptor.element_kind
        && !element.tag_name().eq_ignore_ascii_case(expected)
    {
        return Err(ComponentError::ElementWrongType {
            component: descriptor.name.clone(),
            expected: expected.clone(),
            actual: element.tag_name().to_string(),
        });
    }

    // 2. 設定を受け取るコンポーネントには既定値とスキーマが必須
    let defaults = descriptor
        .defaults
        .as_ref()
        .ok_or_else(|| ComponentError::MissingDefaults { component: descriptor.name.clone() })?;
    let schema = descriptor
        .schema
        .as_ref()
        .ok_or_else(|| ComponentError::MissingSchema { component: descriptor.name.clone() })?;

    // 3. dataset レイヤーと上書きレイヤーを用意
    let dataset_config = normalise_dataset(schema, element.dataset());
    let override_config = descriptor.config_override.map_or_else(Map::new, |hook| hook(&dataset_config));

    // 4. 弱いレイヤーから順にマージ
    let merged = merge_configs(&[
        defaults.clone(),
        constructor_config.cloned().unwrap_or_default(),
        override_config,
        dataset_config,
    ]);

    // 5. スキーマ検証。最初の失敗が致命的
    if let Some(message) = validate_config(schema, &merged).into_iter().next() {
        return Err(ComponentError::Validation { component: descriptor.name.clone(), message });
    }

    tracing::debug!("Resolved configuration for {}: {:?}", descriptor.name, merged);
    Ok(ResolvedConfig::new(merged))
}

/// Immutable result of [`resolve_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// マージ済みの設定値
    values: Map<String, Value>,
}

impl ResolvedConfig {
    /// Wraps an already merged configuration.
    #[must_use]
    pub const fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Raw value of `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// `field` as a string.
    #[must_use]
    pub fn string(&self, field: &str) -> Option<&str> {
        self.get(field)?.as_str()
    }

    /// `field` as a number.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field)?.as_f64()
    }

    /// `field` as a boolean.
    #[must_use]
    pub fn boolean(&self, field: &str) -> Option<bool> {
        self.get(field)?.as_bool()
    }

    /// `field` as a nested object.
    #[must_use]
    pub fn object(&self, field: &str) -> Option<&Map<String, Value>> {
        self.get(field)?.as_object()
    }

    /// JavaScript 互換の truthiness で `field` を見る。
    #[must_use]
    pub fn is_truthy(&self, field: &str) -> bool {
        self.get(field).is_some_and(is_truthy)
    }

    /// 設定値への参照
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// 設定値そのもの
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// `namespace` の翻訳テーブルから [`Translator`] を組み立てる。
    #[must_use]
    pub fn translator(&self, namespace: &str, locale: impl Into<String>, services: LocaleServices) -> Translator {
        Translator::from_value(self.values.get(namespace).unwrap_or(&Value::Null), locale, services)
    }
}
