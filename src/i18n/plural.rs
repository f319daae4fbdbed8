//! 複数形カテゴリの解決
//!
//! CLDR のカテゴリ名 (`zero`, `one`, `two`, `few`, `many`, `other`) を
//! 使う。組み込みの規則は同じ規則を共有する言語ファミリー単位でまとめて
//! あり、`Intl.PluralRules` 相当のプロバイダが無い環境でのフォールバック
//! として働く。

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    /// 0 件
    Zero,
    /// 単数
    One,
    /// 双数
    Two,
    /// 少数
    Few,
    /// 多数
    Many,
    /// 既定
    Other,
}

impl PluralCategory {
    /// Suffix used in translation tables, e.g. `"one"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale-aware plural rule source, e.g. a binding to `Intl.PluralRules`.
pub trait PluralRuleProvider: Send + Sync {
    /// Returns the category for `count` under `locale`, or `None` when the
    /// provider has no rules for that locale.
    fn select(&self, locale: &str, count: f64) -> Option<PluralCategory>;
}

/// 同じ規則を共有する言語ファミリー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleFamily {
    /// アラビア語
    Arabic,
    /// 中国語など、数で形が変わらない言語
    Chinese,
    /// フランス語系 (0 も単数扱い)
    French,
    /// ゲルマン語系ほか、単数と複数だけの言語
    German,
    /// アイルランド語
    Irish,
    /// ロシア語・ウクライナ語
    Russian,
    /// スコットランド・ゲール語
    Scottish,
    /// スペイン語系
    Spanish,
    /// ウェールズ語
    Welsh,
}

impl RuleFamily {
    /// floor 済みのカウントへファミリーの規則を適用する。
    fn category(self, n: u64) -> PluralCategory {
        match self {
            Self::Arabic => arabic(n),
            Self::Chinese => PluralCategory::Other,
            Self::French => french(n),
            Self::German => german(n),
            Self::Irish => irish(n),
            Self::Russian => russian(n),
            Self::Scottish => scottish(n),
            Self::Spanish => spanish(n),
            Self::Welsh => welsh(n),
        }
    }
}

/// Resolves the plural category for `count` using the built-in rules.
///
/// 規則が見つからないロケールと非有限のカウントは `Other`。カウントは
/// JS の `Math.floor(Math.abs(count))` と同じ丸めで整数化される。
#[must_use]
pub fn fallback_plural_category(locale: &str, count: f64) -> PluralCategory {
    let Some(family) = family_for(locale) else {
        return PluralCategory::Other;
    };
    if !count.is_finite() {
        return PluralCategory::Other;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = count.abs().floor() as u64;
    family.category(n)
}

/// ロケールをファミリーへ解決する。完全一致 (例: `pt-PT`) を先に見て、
/// 次に言語サブタグだけで見る。
fn family_for(locale: &str) -> Option<RuleFamily> {
    if let Some(family) = family_for_tag(locale) {
        return Some(family);
    }
    let primary = locale.split('-').next().unwrap_or(locale);
    family_for_tag(primary)
}

/// 個別タグとファミリーの対応表
fn family_for_tag(tag: &str) -> Option<RuleFamily> {
    match tag {
        "ar" => Some(RuleFamily::Arabic),
        "id" | "ja" | "jv" | "ko" | "ms" | "my" | "th" | "vi" | "zh" => Some(RuleFamily::Chinese),
        "bn" | "fa" | "fr" | "gu" | "hi" | "hy" | "pa" | "zu" => Some(RuleFamily::French),
        "af" | "az" | "bg" | "ca" | "da" | "de" | "el" | "en" | "et" | "eu" | "fi" | "hu" | "is"
        | "it" | "ka" | "kn" | "ml" | "mr" | "nl" | "no" | "or" | "pt" | "sq" | "sv" | "ta" | "te"
        | "tr" | "ur" => Some(RuleFamily::German),
        "ga" => Some(RuleFamily::Irish),
        "ru" | "uk" => Some(RuleFamily::Russian),
        "gd" => Some(RuleFamily::Scottish),
        "es" | "pt-PT" => Some(RuleFamily::Spanish),
        "cy" => Some(RuleFamily::Welsh),
        _ => None,
    }
}

/// アラビア語: 0/1/2 が専用カテゴリで、残りは 100 の剰余で分かれる。
fn arabic(n: u64) -> PluralCategory {
    let last_two = n % 100;
    match n {
        0 => PluralCategory::Zero,
        1 => PluralCategory::One,
        2 => PluralCategory::Two,
        _ if (3..=10).contains(&last_two) => PluralCategory::Few,
        _ if (11..=99).contains(&last_two) => PluralCategory::Many,
        _ => PluralCategory::Other,
    }
}

/// フランス語系: 0 と 1 が単数。
fn french(n: u64) -> PluralCategory {
    if n <= 1 { PluralCategory::One } else { PluralCategory::Other }
}

/// ゲルマン語系: 1 だけが単数。
fn german(n: u64) -> PluralCategory {
    if n == 1 { PluralCategory::One } else { PluralCategory::Other }
}

/// アイルランド語: 3-6 が few、7-10 が many。
fn irish(n: u64) -> PluralCategory {
    match n {
        1 => PluralCategory::One,
        2 => PluralCategory::Two,
        3..=6 => PluralCategory::Few,
        7..=10 => PluralCategory::Many,
        _ => PluralCategory::Other,
    }
}

/// ロシア語系: 下 1 桁と下 2 桁の組み合わせで分かれる。
fn russian(n: u64) -> PluralCategory {
    let last_two = n % 100;
    let last = last_two % 10;
    if last == 1 && last_two != 11 {
        return PluralCategory::One;
    }
    if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        return PluralCategory::Few;
    }
    if last == 0 || (5..=9).contains(&last) || (11..=14).contains(&last_two) {
        return PluralCategory::Many;
    }
    PluralCategory::Other
}

/// スコットランド・ゲール語: 11 と 12 が単数・双数に入り、19 まで few。
fn scottish(n: u64) -> PluralCategory {
    match n {
        1 | 11 => PluralCategory::One,
        2 | 12 => PluralCategory::Two,
        3..=10 | 13..=19 => PluralCategory::Few,
        _ => PluralCategory::Other,
    }
}

/// スペイン語系: 100 万の倍数が many。
fn spanish(n: u64) -> PluralCategory {
    if n == 1 {
        PluralCategory::One
    } else if n != 0 && n % 1_000_000 == 0 {
        PluralCategory::Many
    } else {
        PluralCategory::Other
    }
}

/// ウェールズ語: 0/1/2/3/6 がそれぞれ専用カテゴリ。
fn welsh(n: u64) -> PluralCategory {
    match n {
        0 => PluralCategory::Zero,
        1 => PluralCategory::One,
        2 => PluralCategory::Two,
        3 => PluralCategory::Few,
        6 => PluralCategory::Many,
        _ => PluralCategory::Other,
    }
}
