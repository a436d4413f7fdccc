use serde::Serialize;

use crate::model::entry::{Entry, IndexItem};
use crate::model::meta::IndexMeta;
use crate::model::options::{PipelineOptions, TableFormat};
use crate::model::row::RawRow;
use crate::parsers::table;
use crate::services::{dividers, expand, inheritance, normalize, replacement, sort};
use crate::syntax::Stage;

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub raw_rows: usize,
    pub ignored_rows: usize,
    pub shorthands: usize,
    pub expanded_rows: usize,
    pub entries: usize,
    pub dividers: usize,
}

/// Everything one run produces. Owned by the caller; nothing is kept
/// between runs.
#[derive(Debug, Serialize, Clone, Default)]
pub struct IndexSession {
    /// Rows exactly as parsed, for export.
    pub original_rows: Vec<RawRow>,
    pub meta: Option<IndexMeta>,
    pub format: Option<TableFormat>,
    pub has_header: bool,
    pub items: Vec<IndexItem>,
    pub report: PipelineReport,
}

impl IndexSession {
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.items.iter().filter_map(IndexItem::as_entry)
    }
}

fn trace(stage: Stage, count: usize) {
    log::debug!("{stage}: {count} rows");
}

/// Runs every rule stage over parsed rows and returns sorted entries.
pub fn transform(rows: Vec<RawRow>) -> (Vec<Entry>, PipelineReport) {
    let mut report = PipelineReport {
        raw_rows: rows.len(),
        ..PipelineReport::default()
    };

    let mut rows = rows;

    let map = replacement::extract(&rows);
    trace(Stage::Define, map.len());
    replacement::strip(&mut rows);
    trace(Stage::Strip, rows.len());
    report.ignored_rows = rows.iter().filter(|r| r.ignored).count();
    replacement::apply(&mut rows, &map);
    trace(Stage::Substitute, rows.len());
    report.shorthands = map.len();

    let rows = inheritance::resolve(rows);
    trace(Stage::Inherit, rows.len());

    let flipped: Vec<RawRow> = rows.iter().flat_map(expand::flip).collect();
    trace(Stage::Flip, flipped.len());
    let expanded: Vec<RawRow> = flipped.iter().flat_map(expand::split).collect();
    trace(Stage::Split, expanded.len());
    report.expanded_rows = expanded.len();

    let entries = normalize::normalize(&expanded);
    trace(Stage::Normalize, entries.len());
    let entries = sort::sort(entries);
    trace(Stage::Sort, entries.len());
    report.entries = entries.len();

    (entries, report)
}

/// Parses `text` and builds the index from it.
pub fn run(text: &str, options: &PipelineOptions) -> IndexSession {
    let table = table::parse(text, options);
    let (entries, mut report) = transform(table.rows.clone());

    let items: Vec<IndexItem> = if options.dividers {
        dividers::insert(&entries)
    } else {
        entries.into_iter().map(IndexItem::from).collect()
    };
    report.dividers = items.len() - report.entries;

    IndexSession {
        original_rows: table.rows,
        meta: table.meta,
        format: table.format,
        has_header: table.has_header,
        items,
        report,
    }
}
