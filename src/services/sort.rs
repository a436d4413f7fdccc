use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::entry::Entry;
use crate::services::markup;

/// Folded key for headings: markup removed, accents stripped via NFD,
/// lower-cased. Keys compare by codepoint; this is not locale collation.
pub fn collation_key(text: &str) -> String {
    markup::strip_markup(text)
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

struct SortKey {
    term: String,
    sub_term: String,
    page: u64,
}

impl SortKey {
    fn of(entry: &Entry) -> Self {
        Self {
            term: collation_key(&entry.term),
            sub_term: collation_key(&entry.sub_term),
            page: markup::page_key(&entry.page),
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        self.term
            .cmp(&other.term)
            .then_with(|| self.sub_term.cmp(&other.sub_term))
            .then_with(|| self.page.cmp(&other.page))
    }
}

/// Stable sort by term, then sub-term, then lowest page number.
pub fn sort(entries: Vec<Entry>) -> Vec<Entry> {
    let mut keyed: Vec<(SortKey, Entry)> = entries
        .into_iter()
        .map(|e| (SortKey::of(&e), e))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(term: &str, sub: &str, page: &str) -> Entry {
        Entry {
            term: term.into(),
            sub_term: sub.into(),
            page: page.into(),
            ..Entry::default()
        }
    }

    fn terms(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| format!("{}/{}/{}", e.term, e.sub_term, e.page))
            .collect()
    }

    #[test]
    fn ignores_case_accents_and_markup() {
        assert_eq!(collation_key("**Élan**"), "elan");
        assert_eq!(collation_key("`DNS`"), "dns");
    }

    #[test]
    fn undecomposable_letters_compare_by_codepoint() {
        let out = sort(vec![entry("øl", "", "1"), entry("zebra", "", "1"), entry("öl", "", "1")]);
        assert_eq!(terms(&out), vec!["öl//1", "zebra//1", "øl//1"]);
    }

    #[test]
    fn orders_by_term_then_sub_term_then_page() {
        let out = sort(vec![
            entry("smtp", "", "3"),
            entry("DNS", "zone", "9"),
            entry("**dns**", "axfr", "40"),
            entry("dns", "axfr", "12, 50"),
        ]);
        assert_eq!(
            terms(&out),
            vec!["dns/axfr/12, 50", "**dns**/axfr/40", "DNS/zone/9", "smtp//3"]
        );
    }

    #[test]
    fn pages_without_numbers_go_last() {
        let out = sort(vec![entry("a", "", "see b"), entry("a", "", "2")]);
        assert_eq!(out[0].page, "2");
    }

    #[test]
    fn ties_keep_input_order() {
        let mut first = entry("acl", "", "4");
        first.notes = "first".into();
        let mut second = entry("ACL", "", "4");
        second.notes = "second".into();

        let out = sort(vec![first, second]);
        assert_eq!(out[0].notes, "first");
        assert_eq!(out[1].notes, "second");
    }
}
