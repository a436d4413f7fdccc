use crate::model::entry::Entry;
use crate::model::row::{ExpandedRow, Field};
use crate::services::markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Only `term` is filled: start a new heading, keep book and page.
    TermOnly,
    /// Only `sub-term` is filled: another sub-entry under the last term.
    SubTermOnly,
    Full,
}

pub fn classify(row: &ExpandedRow) -> RowShape {
    let filled: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| !row.get(*f).trim().is_empty())
        .collect();

    match filled.as_slice() {
        [Field::Term] => RowShape::TermOnly,
        [Field::SubTerm] => RowShape::SubTermOnly,
        _ => RowShape::Full,
    }
}

/// Leading base-10 integer, with optional sign. `"12b"` gives 12.
pub fn parse_book(value: &str) -> Option<i64> {
    let s = value.trim();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Orders comma-separated page segments by their lowest embedded number.
///
/// Segments are trimmed and empty ones dropped; segments without digits go
/// last. Markup is kept as written.
pub fn normalize_page(value: &str) -> String {
    let mut segments: Vec<(u64, &str)> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| (markup::page_key(s), s))
        .collect();

    segments.sort_by_key(|(key, _)| *key);

    segments
        .into_iter()
        .map(|(_, s)| s)
        .collect::<Vec<_>>()
        .join(", ")
}

fn entry_for(row: &ExpandedRow, last: &Entry) -> Entry {
    match classify(row) {
        RowShape::TermOnly => Entry {
            term: row.term.trim().to_string(),
            book: last.book,
            page: last.page.clone(),
            ..Entry::default()
        },
        RowShape::SubTermOnly => Entry {
            term: last.term.clone(),
            sub_term: row.sub_term.trim().to_string(),
            notes: String::new(),
            book: last.book,
            page: last.page.clone(),
        },
        RowShape::Full => {
            let page = row.page.trim();
            Entry {
                term: row.term.trim().to_string(),
                sub_term: row.sub_term.trim().to_string(),
                notes: row.notes.trim().to_string(),
                book: parse_book(&row.book).unwrap_or(last.book),
                page: if page.is_empty() {
                    last.page.clone()
                } else {
                    normalize_page(page)
                },
            }
        }
    }
}

/// Turns expanded rows into entries, skipping comment rows. Each entry
/// becomes `last` for the row after it.
pub fn normalize(rows: &[ExpandedRow]) -> Vec<Entry> {
    let (_, entries) = rows.iter().filter(|r| !r.ignored).fold(
        (Entry::default(), Vec::with_capacity(rows.len())),
        |(last, mut entries), row| {
            let entry = entry_for(row, &last);
            entries.push(entry.clone());
            (entry, entries)
        },
    );

    log::debug!("normalized {} entries", entries.len());
    entries
}
