use serde::{Deserialize, Serialize};

/// One data line of the source table, before any rule has run.
///
/// Values are kept as authored; `ignored` marks comment rows, which stay in
/// the sequence so they can still define shorthand.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    #[serde(default)]
    pub term: String,

    #[serde(default, rename = "sub-term", alias = "subTerm")]
    pub sub_term: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub book: String,

    #[serde(default)]
    pub page: String,

    #[serde(default)]
    pub ignored: bool,
}

pub type ExpandedRow = RawRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Term,
    SubTerm,
    Notes,
    Book,
    Page,
}

impl Field {
    /// Column order assumed when the input carries no header.
    pub const ALL: [Field; 5] = [
        Field::Term,
        Field::SubTerm,
        Field::Notes,
        Field::Book,
        Field::Page,
    ];

    pub const TEXT: [Field; 3] = [Field::Term, Field::SubTerm, Field::Notes];

    pub fn name(self) -> &'static str {
        match self {
            Field::Term => "term",
            Field::SubTerm => "sub-term",
            Field::Notes => "notes",
            Field::Book => "book",
            Field::Page => "page",
        }
    }

    /// Maps a header cell to a field. Unknown columns yield `None`.
    pub fn from_header(cell: &str) -> Option<Field> {
        match cell.trim().to_lowercase().as_str() {
            "term" => Some(Field::Term),
            "sub-term" | "subterm" | "sub_term" | "sub term" => Some(Field::SubTerm),
            "notes" => Some(Field::Notes),
            "book" => Some(Field::Book),
            "page" => Some(Field::Page),
            _ => None,
        }
    }
}

impl RawRow {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Term => &self.term,
            Field::SubTerm => &self.sub_term,
            Field::Notes => &self.notes,
            Field::Book => &self.book,
            Field::Page => &self.page,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Term => &mut self.term,
            Field::SubTerm => &mut self.sub_term,
            Field::Notes => &mut self.notes,
            Field::Book => &mut self.book,
            Field::Page => &mut self.page,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Builds a row from cells laid out in `columns` order.
    pub fn from_cells(columns: &[Option<Field>], cells: &[String]) -> Self {
        let mut row = RawRow::default();

        for (column, cell) in columns.iter().zip(cells.iter()) {
            if let Some(field) = column {
                row.set(*field, cell.clone());
            }
        }

        row.ignored = crate::syntax::is_comment(&row.term);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_defaults_missing_fields() {
        let columns: Vec<Option<Field>> = Field::ALL.iter().copied().map(Some).collect();
        let row = RawRow::from_cells(&columns, &["vuln".to_string(), "web".to_string()]);

        assert_eq!(row.term, "vuln");
        assert_eq!(row.sub_term, "web");
        assert_eq!(row.notes, "");
        assert_eq!(row.page, "");
        assert!(!row.ignored);
    }

    #[test]
    fn from_cells_flags_comment_rows() {
        let columns = [Some(Field::Term)];
        let row = RawRow::from_cells(&columns, &["  ?note to self".to_string()]);
        assert!(row.ignored);
    }

    #[test]
    fn header_names_are_matched_loosely() {
        assert_eq!(Field::from_header(" Sub-Term "), Some(Field::SubTerm));
        assert_eq!(Field::from_header("PAGE"), Some(Field::Page));
        assert_eq!(Field::from_header("chapter"), None);
    }

    #[test]
    fn serializes_with_table_column_names() {
        let row = RawRow {
            sub_term: "x".into(),
            ..RawRow::default()
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["sub-term"], "x");
    }
}
