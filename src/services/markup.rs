use std::sync::LazyLock;

use regex::Regex;

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`~]").expect("valid emphasis regex"));

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digits regex"));

pub fn strip_markup(text: &str) -> String {
    EMPHASIS_RE.replace_all(text, "").into_owned()
}

/// Smallest integer embedded anywhere in `text`, ignoring markup.
///
/// `"100-9"` yields 9; digit runs too long for `u64` are skipped.
pub fn min_embedded_int(text: &str) -> Option<u64> {
    let plain = strip_markup(text);
    DIGITS_RE
        .find_iter(&plain)
        .filter_map(|m| m.as_str().parse::<u64>().ok())
        .min()
}

/// Numeric sort key for a page string. Text without digits sorts last.
pub fn page_key(text: &str) -> u64 {
    min_embedded_int(text).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis_and_code() {
        assert_eq!(strip_markup("**bold** _it_ `code` ~~gone~~"), "bold it code gone");
    }

    #[test]
    fn min_int_ignores_markup() {
        assert_eq!(min_embedded_int("**15**-`20`"), Some(15));
        assert_eq!(min_embedded_int("100-9"), Some(9));
        assert_eq!(min_embedded_int("appendix"), None);
    }

    #[test]
    fn page_key_pushes_text_last() {
        assert_eq!(page_key("12"), 12);
        assert_eq!(page_key("see also"), u64::MAX);
    }
}
