//! 組み込みコンポーネントの記述子
//!
//! 既定値とスキーマはライブラリ出荷時の英語文言で、dataset や
//! コンストラクタ設定のレイヤーがそれを上書きする。

use serde_json::{
    Map,
    Value,
    json,
};

use crate::component::ComponentDescriptor;
use crate::config::{
    AnyOfCondition,
    ConfigSchema,
    PropertyDescriptor,
    PropertyType,
};

/// json! で書いたオブジェクトを設定レイヤーに落とす
fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// アコーディオン。セクションの開閉状態を覚える
#[must_use]
pub fn accordion() -> ComponentDescriptor {
    ComponentDescriptor {
        defaults: Some(object(json!({
            "i18n": {
                "hideAllSections": "Hide all sections",
                "hideSection": "Hide",
                "hideSectionAriaLabel": "Hide this section",
                "showAllSections": "Show all sections",
                "showSection": "Show",
                "showSectionAriaLabel": "Show this section"
            },
            "rememberExpanded": true
        }))),
        schema: Some(ConfigSchema {
            properties: [
                ("i18n".to_string(), PropertyDescriptor::new(PropertyType::Object)),
                ("rememberExpanded".to_string(), PropertyDescriptor::new(PropertyType::Boolean)),
            ]
            .into_iter()
            .collect(),
            any_of: Vec::new(),
        }),
        ..ComponentDescriptor::new("accordion")
    }
}

/// 文字数カウンタ。maxlength か maxwords のどちらかが必須
#[must_use]
pub fn character_count() -> ComponentDescriptor {
    ComponentDescriptor {
        defaults: Some(object(json!({
            "threshold": 0,
            "i18n": {
                "charactersUnderLimit": {
                    "one": "You have %{count} character remaining",
                    "other": "You have %{count} characters remaining"
                },
                "charactersAtLimit": "You have 0 characters remaining",
                "charactersOverLimit": {
                    "one": "You have %{count} character too many",
                    "other": "You have %{count} characters too many"
                },
                "wordsUnderLimit": {
                    "one": "You have %{count} word remaining",
                    "other": "You have %{count} words remaining"
                },
                "wordsAtLimit": "You have 0 words remaining",
                "wordsOverLimit": {
                    "one": "You have %{count} word too many",
                    "other": "You have %{count} words too many"
                },
                "textareaDescription": {
                    "other": ""
                }
            }
        }))),
        schema: Some(ConfigSchema {
            properties: [
                ("i18n".to_string(), PropertyDescriptor::new(PropertyType::Object)),
                ("maxwords".to_string(), PropertyDescriptor::new(PropertyType::Number)),
                ("maxlength".to_string(), PropertyDescriptor::new(PropertyType::Number)),
                ("threshold".to_string(), PropertyDescriptor::new(PropertyType::Number)),
            ]
            .into_iter()
            .collect(),
            any_of: vec![
                AnyOfCondition::new(&["maxwords"], "Either \"maxlength\" or \"maxwords\" must be provided"),
                AnyOfCondition::new(&["maxlength"], "Either \"maxlength\" or \"maxwords\" must be provided"),
            ],
        }),
        config_override: Some(character_count_override),
        ..ComponentDescriptor::new("character-count")
    }
}

/// dataset 側に長さ制限があれば、弱いレイヤー由来の制限を両方無効化する。
/// data-maxwords だけ指定しても既定やコンストラクタの maxlength が
/// 残らないようにするため。
fn character_count_override(dataset: &Map<String, Value>) -> Map<String, Value> {
    if dataset.contains_key("maxwords") || dataset.contains_key("maxlength") {
        return object(json!({ "maxlength": null, "maxwords": null }));
    }
    Map::new()
}

/// エラーサマリー。表示時に自動でフォーカスを移す
#[must_use]
pub fn error_summary() -> ComponentDescriptor {
    ComponentDescriptor {
        defaults: Some(object(json!({ "disableAutoFocus": false }))),
        schema: Some(ConfigSchema {
            properties: [(
                "disableAutoFocus".to_string(),
                PropertyDescriptor::new(PropertyType::Boolean),
            )]
            .into_iter()
            .collect(),
            any_of: Vec::new(),
        }),
        ..ComponentDescriptor::new("error-summary")
    }
}

/// 退出ボタン。キーボードショートカットの案内文を持つ
#[must_use]
pub fn exit_this_page() -> ComponentDescriptor {
    ComponentDescriptor {
        defaults: Some(object(json!({
            "i18n": {
                "activated": "Loading.",
                "timedOut": "Exit this page expired.",
                "pressTwoMoreTimes": "Shift, press 2 more times to exit.",
                "pressOneMoreTime": "Shift, press 1 more time to exit."
            }
        }))),
        schema: Some(ConfigSchema {
            properties: [("i18n".to_string(), PropertyDescriptor::new(PropertyType::Object))]
                .into_iter()
                .collect(),
            any_of: Vec::new(),
        }),
        ..ComponentDescriptor::new("exit-this-page")
    }
}

/// ファイル選択。ルート要素は `<input>` でなければならない
#[must_use]
pub fn file_upload() -> ComponentDescriptor {
    ComponentDescriptor {
        element_kind: Some("input".to_string()),
        defaults: Some(object(json!({
            "i18n": {
                "chooseFilesButton": "Choose file",
                "dropInstruction": "or drop file",
                "noFileChosen": "No file chosen",
                "multipleFilesChosen": {
                    "one": "%{count} file chosen",
                    "other": "%{count} files chosen"
                },
                "enteredDropZone": "Entered drop zone",
                "leftDropZone": "Left drop zone"
            }
        }))),
        schema: Some(ConfigSchema {
            properties: [("i18n".to_string(), PropertyDescriptor::new(PropertyType::Object))]
                .into_iter()
                .collect(),
            any_of: Vec::new(),
        }),
        ..ComponentDescriptor::new("file-upload")
    }
}

/// パスワード入力。表示/非表示の切り替え文言を持つ
#[must_use]
pub fn password_input() -> ComponentDescriptor {
    ComponentDescriptor {
        defaults: Some(object(json!({
            "i18n": {
                "showPassword": "Show",
                "hidePassword": "Hide",
                "showPasswordAriaLabel": "Show password",
                "hidePasswordAriaLabel": "Hide password",
                "passwordShownAnnouncement": "Your password is visible",
                "passwordHiddenAnnouncement": "Your password is hidden"
            }
        }))),
        schema: Some(ConfigSchema {
            properties: [("i18n".to_string(), PropertyDescriptor::new(PropertyType::Object))]
                .into_iter()
                .collect(),
            any_of: Vec::new(),
        }),
        ..ComponentDescriptor::new("password-input")
    }
}
