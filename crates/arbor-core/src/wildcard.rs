//! Case-insensitive `*`/`?` wildcard matching.
//!
//! `*` matches any run of characters (path separators included), `?` matches
//! exactly one character and everything else is literal. Matches are anchored
//! to the whole value.

use regex::{Regex, RegexBuilder};

/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile a pattern. Returns `None` for blank patterns, which never match.
    pub fn new(pattern: &str) -> Option<Self> {
        if pattern.trim().is_empty() {
            return None;
        }

        let mut expression = String::with_capacity(pattern.len() + 8);
        expression.push('^');
        let mut literal = [0u8; 4];
        for ch in pattern.chars() {
            match ch {
                '*' => expression.push_str(".*"),
                '?' => expression.push('.'),
                other => expression.push_str(&regex::escape(other.encode_utf8(&mut literal))),
            }
        }
        expression.push('$');

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .ok()?;

        Some(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern text this matcher was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether the whole value matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// One-shot match of `value` against `pattern`.
pub fn matches(value: &str, pattern: &str) -> bool {
    WildcardPattern::new(pattern).is_some_and(|p| p.is_match(value))
}

/// An ordered list of compiled patterns; blank entries are skipped.
#[derive(Debug, Clone, Default)]
pub struct WildcardSet {
    patterns: Vec<WildcardPattern>,
}

impl WildcardSet {
    /// Compile every non-blank pattern.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .filter_map(|p| WildcardPattern::new(p.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when at least one pattern matches.
    pub fn any_match(&self, value: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_and_question_mark() {
        assert!(matches("src/Program.cs", "src/*.cs"));
        assert!(matches("file1.txt", "file?.txt"));
        assert!(!matches("file10.txt", "file?.txt"));
    }

    #[test]
    fn test_star_crosses_separators() {
        assert!(matches("tests/Nested/deep", "tests*"));
        assert!(matches("src/a/b/c.rs", "src/*"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches("README.md", "readme.MD"));
    }

    #[test]
    fn test_anchored() {
        assert!(!matches("src/Program.cs", "Program.cs"));
        assert!(!matches("src/Program.cs.bak", "src/*.cs"));
    }

    #[test]
    fn test_blank_pattern_never_matches() {
        assert!(!matches("", ""));
        assert!(!matches("anything", "   "));
        assert!(WildcardPattern::new("\t").is_none());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(matches("a+b (1).txt", "a+b (1).txt"));
        assert!(!matches("aab (1).txt", "a+b (1).txt"));
        assert!(matches("[draft].md", "[draft].*"));
        assert!(matches("lib{1}.rs", "lib{?}.rs"));
    }

    #[test]
    fn test_set_skips_blank_entries() {
        let set = WildcardSet::new(&["", "*.rs", "  "]);
        assert_eq!(set.len(), 1);
        assert!(set.any_match("main.rs"));
        assert!(!set.any_match("main.py"));
        assert!(!WildcardSet::default().any_match("main.rs"));
    }
}
