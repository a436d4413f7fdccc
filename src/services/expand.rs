use crate::model::row::{ExpandedRow, Field, RawRow};
use crate::syntax::{FLIP, SPLIT};

/// Emits the row with flip markers removed, then, if term or sub-term
/// carried a marker, a second copy with the two swapped.
pub fn flip(row: &RawRow) -> Vec<ExpandedRow> {
    if !row.term.contains(FLIP) && !row.sub_term.contains(FLIP) {
        return vec![row.clone()];
    }

    let mut cleaned = row.clone();
    cleaned.term = row.term.replace(FLIP, "").trim().to_string();
    cleaned.sub_term = row.sub_term.replace(FLIP, "").trim().to_string();

    let mut swapped = cleaned.clone();
    std::mem::swap(&mut swapped.term, &mut swapped.sub_term);

    vec![cleaned, swapped]
}

/// One row per combination of `&&`-separated alternatives, varying the
/// last field fastest.
pub fn split(row: &ExpandedRow) -> Vec<ExpandedRow> {
    let mut out = vec![row.clone()];

    for field in Field::ALL {
        let value = row.get(field);
        if !value.contains(SPLIT) {
            continue;
        }

        let candidates: Vec<&str> = value.split(SPLIT).map(str::trim).collect();
        out = out
            .iter()
            .flat_map(|partial| {
                candidates.iter().map(move |candidate| {
                    let mut next = partial.clone();
                    next.set(field, *candidate);
                    next
                })
            })
            .collect();
    }

    out
}
