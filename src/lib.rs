//! component-kit
//!
//! プログレッシブエンハンスメント型 UI コンポーネントのための設定解決と i18n コア
//!
//! HTML の data-* 属性・コンストラクタ設定・宣言済み既定値を一つの設定に
//! 畳み込み、その i18n 名前空間から複数形対応の [`Translator`] を組み立てる。

pub mod component;
pub mod config;
pub mod element;
pub mod i18n;

mod test_utils;

// 入口になる操作を再エクスポート
pub use component::resolve_config;
pub use i18n::Translator;
