//! 翻訳とロケール解決
//!
//! コンポーネント設定の `i18n` 名前空間から取り出した翻訳テーブルを
//! ロケール付きで保持し、`%{name}` プレースホルダーの置換と複数形の
//! 選択を行う。ブラウザの `Intl` に相当する機能はトレイト経由で
//! 差し替えられ、未設定なら組み込みの規則にフォールバックする。

/// プレースホルダー置換
mod interpolate;
/// 複数形カテゴリの解決
mod plural;
/// 翻訳テーブルの型とエラー
mod types;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{
    Map,
    Value,
};

use crate::element::HostElement;
use interpolate::PlaceholderValue;

pub use interpolate::NumberFormatProvider;
pub use plural::{
    PluralCategory,
    PluralRuleProvider,
    fallback_plural_category,
};
pub use types::{
    I18nError,
    PluralForms,
    TranslationEntry,
};

/// `Intl` 相当の機能の束。未設定の機能は組み込みの動作になる。
#[derive(Clone, Default)]
pub struct LocaleServices {
    /// 複数形規則のプロバイダ
    pub plural_rules: Option<Arc<dyn PluralRuleProvider>>,
    /// 数値書式のプロバイダ
    pub number_format: Option<Arc<dyn NumberFormatProvider>>,
}

impl fmt::Debug for LocaleServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleServices")
            .field("plural_rules", &self.plural_rules.as_ref().map(|_| "dyn PluralRuleProvider"))
            .field("number_format", &self.number_format.as_ref().map(|_| "dyn NumberFormatProvider"))
            .finish()
    }
}

/// Options for a single [`Translator::t`] call.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// 複数形の選択と `%{count}` の置換に使うカウント
    pub count: Option<f64>,
    /// プレースホルダー名と置換値
    pub data: Map<String, Value>,
}

impl TranslateOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count used for pluralisation and `%{count}`.
    #[must_use]
    pub const fn with_count(mut self, count: f64) -> Self {
        self.count = Some(count);
        self
    }

    /// Adds a placeholder replacement value.
    #[must_use]
    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// 複数形の選択に使うカウント。`count` フィールドが優先され、
    /// data の `count` も数値であれば同じ意味を持つ。
    fn count_value(&self) -> Option<f64> {
        if let Some(count) = self.count {
            return Some(count);
        }
        self.data.get("count").and_then(Value::as_f64)
    }

    /// `%{key}` に対応する値
    fn placeholder_value(&self, key: &str) -> Option<PlaceholderValue<'_>> {
        if key == "count"
            && let Some(count) = self.count_value()
        {
            return Some(PlaceholderValue::Number(count));
        }
        self.data.get(key).map(|value| match value {
            Value::String(text) => PlaceholderValue::Text(text),
            Value::Number(number) => {
                number.as_f64().map_or(PlaceholderValue::Empty, PlaceholderValue::Number)
            }
            _ => PlaceholderValue::Empty,
        })
    }
}

/// Translation lookup bound to a locale.
///
/// テーブルはキーの完全一致で引く。ドットを含むキーもそのまま一つの
/// キーとして扱う。見つからないキーは `t` がそのまま返すので、呼び出し
/// 側はフォールバック表示に使える。
#[derive(Debug, Clone)]
pub struct Translator {
    /// 翻訳テーブル
    translations: HashMap<String, TranslationEntry>,
    /// BCP 47 ロケールタグ
    locale: String,
    /// `Intl` 相当のプロバイダ
    services: LocaleServices,
}

impl Translator {
    /// Creates a translator with the built-in locale behaviour.
    #[must_use]
    pub fn new(translations: HashMap<String, TranslationEntry>, locale: impl Into<String>) -> Self {
        Self::with_services(translations, locale, LocaleServices::default())
    }

    /// Creates a translator with explicit [`LocaleServices`].
    #[must_use]
    pub fn with_services(
        translations: HashMap<String, TranslationEntry>,
        locale: impl Into<String>,
        services: LocaleServices,
    ) -> Self {
        Self { translations, locale: locale.into(), services }
    }

    /// Builds a translator from the `i18n` value of a resolved config.
    ///
    /// 文字列にもオブジェクトにもならないエントリは黙って読み飛ばす。
    #[must_use]
    pub fn from_value(value: &Value, locale: impl Into<String>, services: LocaleServices) -> Self {
        let translations = value
            .as_object()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(key, entry)| {
                        serde_json::from_value::<TranslationEntry>(entry.clone())
                            .ok()
                            .map(|decoded| (key.clone(), decoded))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self::with_services(translations, locale, services)
    }

    /// The locale this translator resolves plurals and numbers for.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translates `lookup_key`.
    ///
    /// 翻訳が見つからなければキーをそのまま返す。複数形レコードは
    /// カウントがあるときだけ選択され、カウントなしではキーに
    /// フォールバックする。
    pub fn t(&self, lookup_key: &str, options: Option<&TranslateOptions>) -> Result<String, I18nError> {
        if lookup_key.is_empty() {
            return Err(I18nError::MissingLookupKey);
        }

        let template = match self.translations.get(lookup_key) {
            Some(TranslationEntry::Text(text)) => Some(text.as_str()),
            Some(TranslationEntry::Plural(forms)) => {
                match options.and_then(TranslateOptions::count_value) {
                    Some(count) => {
                        let category = self.plural_category_for(forms, count)?;
                        forms.get(category)
                    }
                    None => None,
                }
            }
            None => None,
        };

        let Some(template) = template else {
            return Ok(lookup_key.to_string());
        };

        if interpolate::contains_placeholder(template) {
            let Some(options) = options else {
                return Err(I18nError::MissingOptionData);
            };
            return interpolate::replace_placeholders(
                template,
                options,
                &self.locale,
                self.services.number_format.as_deref(),
            );
        }

        Ok(template.to_string())
    }

    /// Selects the plural category for `count`.
    ///
    /// 優先カテゴリの形が無ければ警告して `other` に落ち、`other` も
    /// 無ければエラー。非有限のカウントは常に `other` 扱い。
    fn plural_category_for(&self, forms: &PluralForms, count: f64) -> Result<PluralCategory, I18nError> {
        if !count.is_finite() {
            return Ok(PluralCategory::Other);
        }

        let preferred = self
            .services
            .plural_rules
            .as_ref()
            .and_then(|provider| provider.select(&self.locale, count))
            .unwrap_or_else(|| fallback_plural_category(&self.locale, count));

        if forms.get(preferred).is_some() {
            return Ok(preferred);
        }
        if forms.get(PluralCategory::Other).is_some() {
            tracing::warn!(
                "i18n: Missing plural form \".{}\" for \"{}\" locale. Falling back to \".other\".",
                preferred,
                self.locale
            );
            return Ok(PluralCategory::Other);
        }
        Err(I18nError::MissingOtherPluralForm { locale: self.locale.clone() })
    }
}

/// Determines the locale a component should translate for.
///
/// 優先順位:
/// 1. 明示的に渡されたロケール
/// 2. 要素とその祖先の `lang` 属性
/// 3. ドキュメントの既定言語
/// 4. `"en"`
#[must_use]
pub fn resolve_locale(element: Option<&dyn HostElement>, explicit: Option<&str>) -> String {
    if let Some(locale) = explicit {
        return locale.to_string();
    }
    if let Some(element) = element {
        if let Some(lang) = element.closest_attribute("lang") {
            return lang.to_string();
        }
        if let Some(lang) = element.document_lang() {
            return lang.to_string();
        }
    }
    "en".to_string()
}
