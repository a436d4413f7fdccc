use crate::model::row::{Field, RawRow};
use crate::syntax;

/// Fold state: the last non-comment row after resolution, plus output so far.
#[derive(Debug, Default)]
struct InheritState {
    previous: RawRow,
    rows: Vec<RawRow>,
}

impl InheritState {
    fn step(mut self, mut row: RawRow) -> Self {
        if row.ignored {
            self.rows.push(row);
            return self;
        }

        for field in Field::ALL {
            let value = row.get(field);
            let inherit =
                syntax::is_inherit(value) || (field == Field::Term && value.trim().is_empty());
            if inherit {
                row.set(field, self.previous.get(field));
            }
        }

        self.previous = row.clone();
        self.rows.push(row);
        self
    }
}

/// Replaces `^^` fields, and blank terms, with the value from the nearest
/// preceding non-comment row. Comment rows pass through untouched.
pub fn resolve(rows: Vec<RawRow>) -> Vec<RawRow> {
    let capacity = rows.len();
    rows.into_iter()
        .fold(
            InheritState {
                rows: Vec::with_capacity(capacity),
                ..InheritState::default()
            },
            InheritState::step,
        )
        .rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(term: &str, sub: &str, book: &str, page: &str) -> RawRow {
        RawRow {
            term: term.into(),
            sub_term: sub.into(),
            book: book.into(),
            page: page.into(),
            ..RawRow::default()
        }
    }

    #[test]
    fn blank_term_copies_previous() {
        let out = resolve(vec![row("dns", "", "1", "4"), row("", "zone transfer", "", "")]);
        assert_eq!(out[1].term, "dns");
        assert_eq!(out[1].book, "");
    }

    #[test]
    fn marker_copies_any_field() {
        let out = resolve(vec![row("dns", "a", "2", "9"), row("smtp", "^^", " ^^ ", "^^")]);
        assert_eq!(out[1].sub_term, "a");
        assert_eq!(out[1].book, "2");
        assert_eq!(out[1].page, "9");
    }

    #[test]
    fn first_row_inherits_empty() {
        let out = resolve(vec![row("^^", "x", "^^", "")]);
        assert_eq!(out[0].term, "");
        assert_eq!(out[0].book, "");
    }

    #[test]
    fn comment_rows_neither_resolve_nor_anchor() {
        let mut comment = row("?skip", "^^", "", "");
        comment.ignored = true;

        let out = resolve(vec![row("dns", "", "1", "4"), comment, row("", "", "^^", "")]);

        assert_eq!(out[1].sub_term, "^^");
        assert_eq!(out[2].term, "dns");
        assert_eq!(out[2].book, "1");
    }

    #[test]
    fn chains_through_resolved_values() {
        let out = resolve(vec![row("dns", "", "", ""), row("", "", "", ""), row("^^", "", "", "")]);
        assert_eq!(out[2].term, "dns");
    }
}
