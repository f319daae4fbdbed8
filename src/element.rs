//! ホスト要素の抽象化
//!
//! コンポーネントが初期化される対象の要素を、実際のマークアップから
//! 切り離して扱うためのモジュール。`data-*` 属性名はブラウザ DOM の
//! `dataset` と同じ規則でキャメルケースのキーに変換される。

use std::collections::BTreeMap;

/// Markup-side view of the element a component is initialised on.
///
/// 実装はレンダラーやテストハーネス側が提供する。
pub trait HostElement {
    /// Lower-case tag name, e.g. `"div"` or `"input"`.
    fn tag_name(&self) -> &str;

    /// `data-*` attributes, keyed by their converted dataset names.
    fn dataset(&self) -> &BTreeMap<String, String>;

    /// Value of `name` on this element or the nearest ancestor carrying it.
    fn closest_attribute(&self, name: &str) -> Option<&str>;

    /// Default language of the owning document, if known.
    fn document_lang(&self) -> Option<&str> {
        None
    }
}

/// A plain, document-free [`HostElement`].
///
/// DOM を持たない環境 (サーバーサイドレンダリングやテスト) で属性の
/// 集合だけからコンポーネントを初期化するための要素。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetachedElement {
    /// 小文字に正規化されたタグ名
    tag_name: String,
    /// 変換済みキーで引ける dataset
    dataset: BTreeMap<String, String>,
    /// `data-*` 以外の属性。`closest_attribute` はここから探索する
    attributes: BTreeMap<String, String>,
    /// ドキュメントの既定言語
    document_lang: Option<String>,
}

impl DetachedElement {
    /// Creates an element with the given tag name and no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self { tag_name: tag_name.to_ascii_lowercase(), ..Self::default() }
    }

    /// Creates an element and applies `attributes` in order.
    #[must_use]
    pub fn with_attributes(tag_name: &str, attributes: &[(&str, &str)]) -> Self {
        let mut element = Self::new(tag_name);
        for (name, value) in attributes {
            element.set_attribute(name, value);
        }
        element
    }

    /// Sets a markup attribute.
    ///
    /// `data-*` 属性は dataset キーに変換して格納し、それ以外は通常の
    /// 属性として格納する。
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match dataset_name(name) {
            Some(key) => {
                self.dataset.insert(key, value.to_string());
            }
            None => {
                self.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Stores a dataset entry under an already converted key.
    pub fn set_dataset_entry(&mut self, key: &str, value: &str) {
        self.dataset.insert(key.to_string(), value.to_string());
    }

    /// Sets the language reported by [`HostElement::document_lang`].
    pub fn set_document_lang(&mut self, lang: &str) {
        self.document_lang = Some(lang.to_string());
    }
}

impl HostElement for DetachedElement {
    fn tag_name(&self) -> &str {
        &self.tag_name
    }

    fn dataset(&self) -> &BTreeMap<String, String> {
        &self.dataset
    }

    fn closest_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn document_lang(&self) -> Option<&str> {
        self.document_lang.as_deref()
    }
}

/// Converts a `data-*` attribute name to its dataset key.
///
/// HTML の dataset と同じ規則で変換する。接頭辞 `data-` を取り除き、
/// `-` の直後に ASCII 小文字が続く箇所を大文字一文字に置き換える。
/// `data-` で始まらない名前は `None`。
///
/// ```
/// use component_kit::element::dataset_name;
///
/// assert_eq!(dataset_name("data-i18n.show-section"), Some("i18n.showSection".to_string()));
/// assert_eq!(dataset_name("aria-label"), None);
/// ```
#[must_use]
pub fn dataset_name(attribute_name: &str) -> Option<String> {
    let raw = attribute_name.strip_prefix("data-")?;
    let mut key = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-'
            && let Some(next) = chars.peek().copied()
            && next.is_ascii_lowercase()
        {
            key.push(next.to_ascii_uppercase());
            chars.next();
            continue;
        }
        key.push(ch);
    }
    Some(key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    // ===== dataset_name テスト =====

    #[rstest]
    #[case("data-maxlength", Some("maxlength"))]
    #[case("data-remember-expanded", Some("rememberExpanded"))]
    #[case("data-i18n.show-section", Some("i18n.showSection"))]
    #[case("data-i18n.characters-under-limit.one", Some("i18n.charactersUnderLimit.one"))]
    #[case("data--leading", Some("Leading"))]
    #[case("data-x--y", Some("x-Y"))]
    #[case("data-", Some(""))]
    #[case("lang", None)]
    #[case("aria-label", None)]
    fn dataset_name_converts_attribute_names(#[case] attribute: &str, #[case] expected: Option<&str>) {
        assert_that!(dataset_name(attribute).as_deref(), eq(expected));
    }

    // ===== DetachedElement テスト =====

    #[rstest]
    fn set_attribute_routes_data_attributes_into_dataset() {
        let mut element = DetachedElement::new("div");
        element.set_attribute("data-maxwords", "150");
        element.set_attribute("lang", "cy");

        assert_that!(element.dataset().get("maxwords"), some(eq(&"150".to_string())));
        assert_that!(element.closest_attribute("lang"), some(eq("cy")));
        assert_that!(element.dataset().get("lang"), none());
    }

    #[googletest::test]
    fn with_attributes_converts_each_name() {
        let element = DetachedElement::with_attributes(
            "input",
            &[("type", "file"), ("data-i18n.choose-files-button", "Dewiswch ffeil")],
        );

        expect_that!(element.tag_name(), eq("input"));
        expect_that!(
            element.dataset().get("i18n.chooseFilesButton"),
            some(eq(&"Dewiswch ffeil".to_string()))
        );
        expect_that!(element.closest_attribute("type"), some(eq("file")));
    }

    #[rstest]
    fn set_dataset_entry_keeps_the_key_verbatim() {
        let mut element = DetachedElement::new("div");
        element.set_dataset_entry("i18n.show-section", "Show");

        assert_that!(element.dataset().get("i18n.show-section"), some(eq(&"Show".to_string())));
    }

    #[googletest::test]
    fn document_lang_reflects_explicit_value() {
        let mut element = DetachedElement::new("div");
        expect_that!(element.document_lang(), none());

        element.set_document_lang("en-GB");
        expect_that!(element.document_lang(), some(eq("en-GB")));
    }

    #[rstest]
    fn tag_name_is_lowercased() {
        let element = DetachedElement::new("INPUT");
        assert_that!(element.tag_name(), eq("input"));
    }
}
