use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// UI preferences carried in the `?meta:` CSV line.
///
/// The pipeline only passes this through. Keys it does not know about are
/// kept in `extra` so a save/load cycle does not lose them.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, rename = "customCSS", skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_dividers: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unknown_keys() {
        let raw = r#"{"title":"GSEC","customCSS":"td{}","fontSize":12,"hasDividers":true,"theme":"dark"}"#;
        let meta: IndexMeta = serde_json::from_str(raw).unwrap();

        assert_eq!(meta.title.as_deref(), Some("GSEC"));
        assert_eq!(meta.custom_css.as_deref(), Some("td{}"));
        assert_eq!(meta.has_dividers, Some(true));
        assert_eq!(meta.extra.get("theme"), Some(&Value::from("dark")));

        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["theme"], "dark");
        assert_eq!(back["fontSize"], 12);
    }
}
