use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::meta::IndexMeta;
use crate::model::options::{PipelineOptions, TableFormat};
use crate::model::row::{Field, RawRow};
use crate::parsers::csv;

static DIVIDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s|:\-]*-[\s|:\-]*$").expect("valid divider regex"));

#[derive(Debug, Serialize, Clone, Default)]
pub struct ParsedTable {
    pub rows: Vec<RawRow>,
    pub meta: Option<IndexMeta>,
    pub format: Option<TableFormat>,
    pub has_header: bool,
}

/// CSV when the text has a comma and no pipe, markdown otherwise.
pub fn detect_format(text: &str) -> TableFormat {
    let t = text.trim();
    if t.contains(',') && !t.contains('|') {
        TableFormat::Csv
    } else {
        TableFormat::Markdown
    }
}

pub fn detect_header(text: &str, format: TableFormat) -> bool {
    let mut lines = non_blank_lines(text);

    match format {
        TableFormat::Markdown => {
            let first = lines.next().unwrap_or("");
            let second = lines.next().unwrap_or("");
            first.contains('|') && is_divider(second)
        }
        TableFormat::Csv => lines.next().map(csv::has_header).unwrap_or(false),
    }
}

pub fn is_divider(line: &str) -> bool {
    DIVIDER_RE.is_match(line)
}

/// Parses pasted table text into rows, honouring explicit options and
/// falling back to detection for anything left unset.
pub fn parse(text: &str, options: &PipelineOptions) -> ParsedTable {
    let format = options.format.unwrap_or_else(|| detect_format(text));
    let has_header = options
        .has_header
        .unwrap_or_else(|| detect_header(text, format));

    let (rows, meta) = match format {
        TableFormat::Markdown => (parse_markdown(text, has_header), None),
        TableFormat::Csv => csv::parse(text, has_header),
    };

    log::debug!(
        "parsed {} rows ({format:?}, header: {has_header}, meta: {})",
        rows.len(),
        meta.is_some()
    );

    ParsedTable {
        rows,
        meta,
        format: Some(format),
        has_header,
    }
}

pub fn parse_markdown(text: &str, with_header: bool) -> Vec<RawRow> {
    let mut lines = non_blank_lines(text);

    let columns: Vec<Option<Field>> = if with_header {
        let header = lines.next().map(split_cells).unwrap_or_default();
        // divider line
        lines.next();
        header.iter().map(|c| Field::from_header(c)).collect()
    } else {
        Field::ALL.iter().copied().map(Some).collect()
    };

    lines
        .filter(|l| with_header || !is_divider(l))
        .map(|l| RawRow::from_cells(&columns, &split_cells(l)))
        .collect()
}

pub fn split_cells(line: &str) -> Vec<String> {
    let mut s = line.trim();
    if let Some(stripped) = s.strip_prefix('|') {
        s = stripped;
    }
    if let Some(stripped) = s.strip_suffix('|') {
        s = stripped;
    }
    s.split('|').map(|c| c.trim().to_string()).collect()
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
}
