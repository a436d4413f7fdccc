use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    Markdown,
    Csv,
}

/// Per-run knobs sent by the caller. Every field is optional; absent
/// format and header flags are auto-detected from the text.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    #[serde(default)]
    pub format: Option<TableFormat>,

    #[serde(default, alias = "hasHeader")]
    pub has_header: Option<bool>,

    #[serde(default)]
    pub dividers: bool,
}
