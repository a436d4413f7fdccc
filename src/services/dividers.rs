use crate::model::entry::{DividerMarker, Entry, IndexItem};
use crate::services::sort::collation_key;

/// Group character for an entry: the first letter of its folded term,
/// upper-cased, or `#` for anything that does not start with a letter.
pub fn group_of(entry: &Entry) -> char {
    match collation_key(&entry.term).chars().next() {
        Some(c) if c.is_alphabetic() => c.to_uppercase().next().unwrap_or(c),
        _ => '#',
    }
}

pub fn insert(entries: &[Entry]) -> Vec<IndexItem> {
    let mut items = Vec::with_capacity(entries.len() + 26);
    let mut current: Option<char> = None;

    for entry in entries {
        let group = group_of(entry);
        if current != Some(group) {
            items.push(IndexItem::Divider(DividerMarker { divider: group }));
            current = Some(group);
        }
        items.push(IndexItem::Entry(entry.clone()));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(term: &str) -> Entry {
        Entry {
            term: term.into(),
            ..Entry::default()
        }
    }

    #[test]
    fn inserts_one_divider_per_group() {
        let items = insert(&[entry("802.1x"), entry("acl"), entry("**ARP**"), entry("dns")]);
        let dividers: Vec<char> = items
            .iter()
            .filter_map(|i| match i {
                IndexItem::Divider(d) => Some(d.divider),
                IndexItem::Entry(_) => None,
            })
            .collect();

        assert_eq!(dividers, vec!['#', 'A', 'D']);
        assert_eq!(items.len(), 7);
    }

    #[test]
    fn empty_input_has_no_dividers() {
        assert!(insert(&[]).is_empty());
    }
}
