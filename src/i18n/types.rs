//! 翻訳テーブルの型とエラー

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::i18n::plural::PluralCategory;

/// One entry of a translation table.
///
/// 単純な文字列か、複数形カテゴリごとの文字列の束のどちらか。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationEntry {
    /// そのまま使われる翻訳文字列
    Text(String),
    /// カテゴリ別の複数形
    Plural(PluralForms),
}

impl From<&str> for TranslationEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<PluralForms> for TranslationEntry {
    fn from(forms: PluralForms) -> Self {
        Self::Plural(forms)
    }
}

/// Per-category strings of a plural translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralForms {
    /// 0 件
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    /// 単数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    /// 双数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two: Option<String>,
    /// 少数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,
    /// 多数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    /// どのカテゴリにも該当しないときの既定形
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl PluralForms {
    /// Returns the string for `category`, if present.
    #[must_use]
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        match category {
            PluralCategory::Zero => self.zero.as_deref(),
            PluralCategory::One => self.one.as_deref(),
            PluralCategory::Two => self.two.as_deref(),
            PluralCategory::Few => self.few.as_deref(),
            PluralCategory::Many => self.many.as_deref(),
            PluralCategory::Other => self.other.as_deref(),
        }
    }
}

/// i18n 処理のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// 空の翻訳キーで `t` が呼ばれた
    #[error("i18n: lookup key missing")]
    MissingLookupKey,

    /// テンプレートにプレースホルダーがあるのにオプションが無い
    #[error("i18n: cannot replace placeholders in string if no option data provided")]
    MissingOptionData,

    /// プレースホルダーに対応するデータが無い
    #[error("i18n: no data found to replace %{{{placeholder}}} placeholder in string")]
    MissingPlaceholderData {
        /// 見つからなかったプレースホルダー名
        placeholder: String,
    },

    /// 複数形テーブルに `other` が無い
    #[error("i18n: Plural form \".other\" is required for \"{locale}\" locale")]
    MissingOtherPluralForm {
        /// 対象ロケール
        locale: String,
    },
}
