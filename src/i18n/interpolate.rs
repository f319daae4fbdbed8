//! プレースホルダー置換
//!
//! `%{name}` 形式のプレースホルダーを翻訳オプションの値で置き換える。

use std::sync::LazyLock;

use regex::Regex;

use crate::i18n::TranslateOptions;
use crate::i18n::types::I18nError;

/// `%{name}` にマッチするパターン。名前は 2 文字以上で、2 文字目以降に
/// 空白を含まない。
#[allow(clippy::expect_used)]
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // パターンはリテラルなのでコンパイルは失敗しない
    Regex::new(r"%\{(.\S+)\}").expect("placeholder pattern is valid")
});

/// Locale-aware number formatter, e.g. a binding to `Intl.NumberFormat`.
pub trait NumberFormatProvider: Send + Sync {
    /// Formats `value` for `locale`, or `None` when the locale is not covered.
    fn format(&self, locale: &str, value: f64) -> Option<String>;
}

/// 置換に使える値。文字列と数値だけが実体を持つ。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlaceholderValue<'a> {
    /// そのまま埋め込む文字列
    Text(&'a str),
    /// ロケール書式で整形して埋め込む数値
    Number(f64),
    /// 値はあるが表示できない型 (真偽値や null など)
    Empty,
}

/// Returns `true` when `template` contains at least one placeholder.
pub(crate) fn contains_placeholder(template: &str) -> bool {
    PLACEHOLDER_PATTERN.is_match(template)
}

/// Replaces every placeholder in `template` with values from `options`.
///
/// 対応する値が無いプレースホルダーはエラー。数値はプロバイダがあれば
/// ロケール書式、なければ素の 10 進表記になる。
pub(crate) fn replace_placeholders(
    template: &str,
    options: &TranslateOptions,
    locale: &str,
    number_format: Option<&dyn NumberFormatProvider>,
) -> Result<String, I18nError> {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER_PATTERN.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let key = captures.get(1).map_or("", |group| group.as_str());

        output.push_str(template.get(cursor..whole.start()).unwrap_or(""));

        match options.placeholder_value(key) {
            Some(PlaceholderValue::Text(text)) => output.push_str(text),
            Some(PlaceholderValue::Number(number)) => {
                output.push_str(&format_number(locale, number, number_format));
            }
            Some(PlaceholderValue::Empty) => {}
            None => {
                return Err(I18nError::MissingPlaceholderData { placeholder: key.to_string() });
            }
        }
        cursor = whole.end();
    }

    output.push_str(template.get(cursor..).unwrap_or(""));
    Ok(output)
}

/// 数値の文字列化。プロバイダ優先で、なければ素の表記。
fn format_number(locale: &str, value: f64, provider: Option<&dyn NumberFormatProvider>) -> String {
    provider.and_then(|p| p.format(locale, value)).unwrap_or_else(|| value.to_string())
}
