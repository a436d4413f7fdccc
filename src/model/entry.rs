use serde::{Deserialize, Serialize};

/// A finalized index record.
///
/// `page` is display-ready: segments are already ordered by their lowest
/// page number and joined with `", "`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub term: String,

    #[serde(default)]
    pub sub_term: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub book: i64,

    #[serde(default)]
    pub page: String,
}

/// Grouping decoration placed in front of a run of entries sharing a
/// leading character.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DividerMarker {
    pub divider: char,
}

/// Element of the rendered sequence: an entry or a divider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum IndexItem {
    Divider(DividerMarker),
    Entry(Entry),
}

impl IndexItem {
    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            IndexItem::Entry(e) => Some(e),
            IndexItem::Divider(_) => None,
        }
    }
}

impl From<Entry> for IndexItem {
    fn from(e: Entry) -> Self {
        IndexItem::Entry(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_camel_case_keys() {
        let e = Entry {
            term: "xss".into(),
            sub_term: "stored".into(),
            book: 2,
            ..Entry::default()
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["subTerm"], "stored");
        assert_eq!(v["book"], 2);
    }

    #[test]
    fn items_deserialize_both_shapes() {
        let items: Vec<IndexItem> = serde_json::from_str(
            r#"[{"divider":"A"},{"term":"acl","subTerm":"","notes":"","book":1,"page":"3"}]"#,
        )
        .unwrap();

        assert_eq!(items[0], IndexItem::Divider(DividerMarker { divider: 'A' }));
        assert_eq!(items[1].as_entry().map(|e| e.term.as_str()), Some("acl"));
    }
}
