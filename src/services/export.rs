use csv::{Terminator, WriterBuilder};

use crate::error::Result;
use crate::model::meta::IndexMeta;
use crate::model::row::{Field, RawRow};
use crate::syntax::META_PREFIX;

/// Serializes rows as captured by the parser, before any rule ran, so the
/// text re-imports to the same pipeline input.
///
/// Layout: header record, optional `?meta:` record, one record per row. A
/// placeholder `?meta:{}` is written when there is no metadata but the first
/// row itself starts with `?meta:`, so that row is not read back as metadata.
pub fn to_csv(rows: &[RawRow], meta: Option<&IndexMeta>) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(Field::ALL.iter().map(|f| f.name()))?;

    let meta_json = match meta {
        Some(meta) => serde_json::to_string(meta)
            .map_err(|e| log::warn!("metadata not exported: {e}"))
            .ok(),
        None => None,
    };
    let first_looks_like_meta = rows
        .first()
        .is_some_and(|row| row.term.trim().starts_with(META_PREFIX));

    match meta_json {
        Some(json) => writer.write_record([format!("{META_PREFIX}{json}")])?,
        None if first_looks_like_meta => writer.write_record([format!("{META_PREFIX}{{}}")])?,
        None => {}
    }

    for row in rows {
        writer.write_record(Field::ALL.iter().map(|f| row.get(*f)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
