use crate::model::meta::IndexMeta;
use crate::model::row::{Field, RawRow};
use crate::syntax::META_PREFIX;

/// Splits one CSV line into cells.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(ch),
        }
    }

    cells.push(cell);
    cells
}

pub fn has_header(first_line: &str) -> bool {
    let names: Vec<String> = first_line
        .split(',')
        .map(|c| c.trim().trim_matches('"').trim().to_lowercase())
        .collect();

    Field::ALL
        .iter()
        .all(|f| names.iter().any(|n| n == f.name()))
}

/// Returns the JSON payload of a `?meta:` line, bare or quoted as a single
/// CSV cell. Any other line yields `None`.
pub fn meta_payload(line: &str) -> Option<String> {
    let logical = line.trim();

    if let Some(rest) = logical.strip_prefix(META_PREFIX) {
        return Some(rest.trim().to_string());
    }

    if logical.starts_with('"') {
        let first = tokenize_line(logical).into_iter().next()?;
        return first
            .trim()
            .strip_prefix(META_PREFIX)
            .map(|rest| rest.trim().to_string());
    }

    None
}

pub fn parse_meta(payload: &str) -> Option<IndexMeta> {
    match serde_json::from_str::<IndexMeta>(payload) {
        Ok(meta) => Some(meta),
        Err(e) => {
            log::warn!("ignoring malformed metadata line: {e}");
            None
        }
    }
}

pub fn parse(text: &str, with_header: bool) -> (Vec<RawRow>, Option<IndexMeta>) {
    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .peekable();

    let columns: Vec<Option<Field>> = match lines.next_if(|_| with_header) {
        Some(header) => tokenize_line(header)
            .iter()
            .map(|c| Field::from_header(c))
            .collect(),
        None => Field::ALL.iter().copied().map(Some).collect(),
    };

    let mut meta = None;
    if let Some(payload) = lines.peek().and_then(|l| meta_payload(l)) {
        lines.next();
        meta = parse_meta(&payload);
    }

    let rows = lines
        .map(|line| {
            let cells: Vec<String> = tokenize_line(line)
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect();
            RawRow::from_cells(&columns, &cells)
        })
        .collect();

    (rows, meta)
}
