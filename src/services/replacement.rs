use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Match, Regex};

use crate::model::row::{Field, RawRow};

static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:"(?P<sdq>[^"]+)"|'(?P<ssq>[^']+)'|(?P<sw>[\w-]+))\^(?:"(?P<rdq>[^"]+)"|'(?P<rsq>[^']+)'|(?P<rw>[\w-]+))"#,
    )
    .expect("valid definition regex")
});

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|\W+").expect("valid token regex"));

static ACRONYM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,}").expect("valid acronym regex"));

/// Lower-cased shorthand → replacement, in first-definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shorthand: &str, replacement: &str) {
        let key = shorthand.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = replacement.to_string(),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, replacement.to_string()));
            }
        }
    }

    pub fn get(&self, shorthand: &str) -> Option<&str> {
        self.index
            .get(&shorthand.to_lowercase())
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn side<'t>(caps: &Captures<'t>, names: [&str; 3]) -> &'t str {
    names
        .iter()
        .find_map(|n| caps.name(n))
        .map(|m| m.as_str())
        .unwrap_or("")
}

fn shorthand_of<'t>(caps: &Captures<'t>) -> &'t str {
    side(caps, ["sdq", "ssq", "sw"])
}

fn replacement_of<'t>(caps: &Captures<'t>) -> &'t str {
    side(caps, ["rdq", "rsq", "rw"])
}

pub fn extract(rows: &[RawRow]) -> ReplacementMap {
    let mut map = ReplacementMap::new();

    for row in rows {
        for field in Field::TEXT {
            for caps in DEFINITION_RE.captures_iter(row.get(field)) {
                let shorthand = shorthand_of(&caps).trim();
                if shorthand.is_empty() {
                    continue;
                }
                map.insert(shorthand, replacement_of(&caps).trim());
            }
        }
    }

    map
}

/// Removes definition syntax entirely; the shorthand is not left behind.
/// A row that held nothing but definitions is marked ignored.
pub fn strip(rows: &mut [RawRow]) {
    for row in rows.iter_mut() {
        let mut stripped_any = false;
        for field in Field::TEXT {
            let value = row.get_mut(field);
            if !DEFINITION_RE.is_match(value.as_str()) {
                continue;
            }
            let stripped = DEFINITION_RE.replace_all(value.as_str(), "").into_owned();
            *value = stripped;
            stripped_any = true;
        }

        if stripped_any && Field::ALL.into_iter().all(|f| row.get(f).trim().is_empty()) {
            row.ignored = true;
        }
    }
}

struct Rule<'m> {
    escaped: Regex,
    plain: Regex,
    replacement: &'m str,
}

pub struct Substitution<'m> {
    rules: Vec<Rule<'m>>,
}

type Claims = Vec<(Range<usize>, String)>;

fn claim<'t>(
    claims: &mut Claims,
    matches: impl Iterator<Item = Match<'t>>,
    render: impl Fn(&Match<'t>) -> String,
) {
    for m in matches {
        let taken = claims
            .iter()
            .any(|(r, _)| m.start() < r.end && r.start < m.end());
        if !taken {
            claims.push((m.range(), render(&m)));
        }
    }
}

impl<'m> Substitution<'m> {
    pub fn new(map: &'m ReplacementMap) -> Option<Self> {
        let rules: Vec<Rule<'m>> = map
            .iter()
            .filter_map(|(key, replacement)| {
                let word = regex::escape(key);
                let escaped = Regex::new(&format!(r"(?i)!\b{word}\b"));
                let plain = Regex::new(&format!(r"(?i)\b{word}\b"));
                match (escaped, plain) {
                    (Ok(escaped), Ok(plain)) => Some(Rule {
                        escaped,
                        plain,
                        replacement,
                    }),
                    (Err(e), _) | (_, Err(e)) => {
                        log::warn!("shorthand {key:?} skipped: {e}");
                        None
                    }
                }
            })
            .collect();

        if rules.is_empty() {
            None
        } else {
            Some(Self { rules })
        }
    }

    /// Escaped occurrences (`!vuln`) claim their spans first, then each
    /// shorthand in map order claims whatever is still free. Output is
    /// assembled from the original text, so replacements are never rescanned.
    pub fn apply_text(&self, text: &str) -> String {
        let mut claims: Claims = Vec::new();

        for rule in &self.rules {
            claim(&mut claims, rule.escaped.find_iter(text), |m| {
                m.as_str()[1..].to_string()
            });
        }
        for rule in &self.rules {
            claim(&mut claims, rule.plain.find_iter(text), |m| {
                match_capitalisation(m.as_str(), rule.replacement)
            });
        }

        if claims.is_empty() {
            return text.to_string();
        }
        claims.sort_by_key(|(r, _)| r.start);

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (range, replacement) in claims {
            out.push_str(&text[cursor..range.start]);
            out.push_str(&replacement);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

pub fn apply(rows: &mut [RawRow], map: &ReplacementMap) {
    let Some(sub) = Substitution::new(map) else {
        return;
    };

    for row in rows.iter_mut() {
        for field in Field::TEXT {
            let value = row.get_mut(field);
            if value.is_empty() {
                continue;
            }
            let substituted = sub.apply_text(value.as_str());
            *value = substituted;
        }
    }
}

/// Reshapes `replacement` to follow the case of the matched `source`.
///
/// Tokens containing an acronym (two consecutive capitals) are kept as
/// written. Otherwise an all-caps source title-cases every word, a
/// capitalised source title-cases the first word only, and anything else
/// lower-cases the lot.
pub fn match_capitalisation(source: &str, replacement: &str) -> String {
    let has_alpha = source.chars().any(char::is_alphabetic);
    let all_upper = has_alpha && !source.chars().any(char::is_lowercase);
    let first_upper = source.chars().next().is_some_and(char::is_uppercase);

    let mut out = String::with_capacity(replacement.len());
    let mut seen_word = false;

    for token in TOKEN_RE.find_iter(replacement).map(|m| m.as_str()) {
        let is_word = token.chars().any(char::is_alphabetic);
        if !is_word {
            out.push_str(token);
            continue;
        }

        let first_word = !seen_word;
        seen_word = true;

        if ACRONYM_RE.is_match(token) {
            out.push_str(token);
        } else if all_upper || (first_upper && first_word) {
            out.push_str(&title_case(token));
        } else {
            out.push_str(&token.to_lowercase());
        }
    }

    out
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
