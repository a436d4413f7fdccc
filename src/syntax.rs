use std::fmt;

pub const INHERIT: &str = "^^";
pub const FLIP: &str = "<>";
pub const SPLIT: &str = "&&";
pub const COMMENT: char = '?';
pub const META_PREFIX: &str = "?meta:";

pub fn is_comment(term: &str) -> bool {
    term.trim_start().starts_with(COMMENT)
}

pub fn is_inherit(value: &str) -> bool {
    value.trim() == INHERIT
}

/// Transformation stages. Each consumes the whole output of the one before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Define,
    Strip,
    Substitute,
    Inherit,
    Flip,
    Split,
    Normalize,
    Sort,
}

impl Stage {
    pub const ORDER: [Stage; 8] = [
        Stage::Define,
        Stage::Strip,
        Stage::Substitute,
        Stage::Inherit,
        Stage::Flip,
        Stage::Split,
        Stage::Normalize,
        Stage::Sort,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Define => "define",
            Stage::Strip => "strip",
            Stage::Substitute => "substitute",
            Stage::Inherit => "inherit",
            Stage::Flip => "flip",
            Stage::Split => "split",
            Stage::Normalize => "normalize",
            Stage::Sort => "sort",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_runs_before_inheritance_and_flip_before_split() {
        let pos = |s: Stage| Stage::ORDER.iter().position(|x| *x == s).unwrap();

        assert!(pos(Stage::Define) < pos(Stage::Strip));
        assert!(pos(Stage::Strip) < pos(Stage::Substitute));
        assert!(pos(Stage::Substitute) < pos(Stage::Inherit));
        assert!(pos(Stage::Inherit) < pos(Stage::Flip));
        assert!(pos(Stage::Flip) < pos(Stage::Split));
        assert!(pos(Stage::Split) < pos(Stage::Normalize));
        assert_eq!(Stage::ORDER.last(), Some(&Stage::Sort));
    }

    #[test]
    fn markers() {
        assert!(is_comment("  ?todo"));
        assert!(!is_comment("a?"));
        assert!(is_inherit(" ^^ "));
        assert!(!is_inherit("^^x"));
    }
}
