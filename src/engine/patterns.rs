use regex::bytes::{Regex, RegexBuilder};

use crate::error::ConfigError;

/// Whether a pattern must match or must not match to count as a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Affirmative,
    Negative,
}

impl Polarity {
    /// The regex outcome this polarity counts as a hit
    fn expects_match(self) -> bool {
        matches!(self, Polarity::Affirmative)
    }
}

/// A single case-insensitive regular expression with a polarity
#[derive(Debug, Clone)]
pub struct Pattern {
    polarity: Polarity,
    regex: Regex,
}

impl Pattern {
    /// Compile `expression` case-insensitively
    pub fn new(polarity: Polarity, expression: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(expression)
            .case_insensitive(true)
            .build()
            .map_err(|source| ConfigError::InvalidRegex {
                pattern: expression.to_string(),
                source,
            })?;

        Ok(Pattern { polarity, regex })
    }

    /// Parse a raw command-line pattern.
    ///
    /// With `negation` enabled a leading `!` marks the pattern negative and
    /// is stripped before compiling. Otherwise the text is compiled as is.
    pub fn parse(raw: &str, negation: bool) -> Result<Self, ConfigError> {
        match raw.strip_prefix('!') {
            Some(expression) if negation => Pattern::new(Polarity::Negative, expression),
            _ => Pattern::new(Polarity::Affirmative, raw),
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The expression as compiled, without any `!` marker
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True when the regex outcome on `haystack` agrees with the polarity
    pub fn is_hit(&self, haystack: &[u8]) -> bool {
        self.regex.is_match(haystack) == self.polarity.expects_match()
    }
}

/// Pathname patterns, combined with OR.
///
/// An empty predicate matches every pathname.
#[derive(Debug, Clone, Default)]
pub struct NamePredicate {
    patterns: Vec<Pattern>,
}

impl NamePredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// True if any pattern's outcome on `pathname` agrees with its polarity
    pub fn matches(&self, pathname: &[u8]) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.is_hit(pathname))
    }
}

/// Line patterns, combined with AND.
///
/// A line is selected only when every pattern agrees with its polarity.
/// Scanning itself lives in [`super::content`].
#[derive(Debug, Clone, Default)]
pub struct ContentPredicate {
    patterns: Vec<Pattern>,
}

impl ContentPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// True if every pattern's outcome on `line` agrees with its polarity
    pub fn line_matches(&self, line: &[u8]) -> bool {
        self.patterns.iter().all(|p| p.is_hit(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> NamePredicate {
        let mut predicate = NamePredicate::new();
        for r in raw {
            predicate.push(Pattern::parse(r, true).unwrap());
        }
        predicate
    }

    fn contents(raw: &[&str]) -> ContentPredicate {
        let mut predicate = ContentPredicate::new();
        for r in raw {
            predicate.push(Pattern::parse(r, true).unwrap());
        }
        predicate
    }

    #[test]
    fn test_parse_polarity() {
        let p = Pattern::parse("!beta", true).unwrap();
        assert_eq!(p.polarity(), Polarity::Negative);
        assert_eq!(p.as_str(), "beta");

        let p = Pattern::parse("alpha", true).unwrap();
        assert_eq!(p.polarity(), Polarity::Affirmative);
        assert_eq!(p.as_str(), "alpha");
    }

    #[test]
    fn test_only_leading_bang_inverts() {
        let p = Pattern::parse("a!b", true).unwrap();
        assert_eq!(p.polarity(), Polarity::Affirmative);
        assert!(p.is_hit(b"xa!by"));

        let p = Pattern::parse("!!x", true).unwrap();
        assert_eq!(p.polarity(), Polarity::Negative);
        assert_eq!(p.as_str(), "!x");
    }

    #[test]
    fn test_negation_disabled_keeps_bang() {
        let p = Pattern::parse("!beta", false).unwrap();
        assert_eq!(p.polarity(), Polarity::Affirmative);
        assert!(p.is_hit(b"!beta"));
        assert!(!p.is_hit(b"beta"));
    }

    #[test]
    fn test_case_insensitive() {
        let p = Pattern::parse("ReadMe", true).unwrap();
        assert!(p.is_hit(b"./README.md"));
        assert!(p.is_hit(b"./readme.txt"));

        let p = Pattern::parse("!readme", true).unwrap();
        assert!(!p.is_hit(b"./README.md"));
        assert!(p.is_hit(b"./main.rs"));
    }

    #[test]
    fn test_invalid_regex() {
        let err = Pattern::parse("!(unclosed", true).unwrap_err();
        match err {
            ConfigError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_haystack() {
        let p = Pattern::parse("abc", true).unwrap();
        assert!(p.is_hit(b"\xff\xfeabc"));
    }

    #[test]
    fn test_empty_name_predicate_matches_everything() {
        let predicate = NamePredicate::new();
        assert!(predicate.matches(b"./anything"));
        assert!(predicate.matches(b""));
    }

    #[test]
    fn test_name_predicate_is_or() {
        let predicate = names(&[r"\.txt$", r"\.md$"]);
        assert!(predicate.matches(b"./a.txt"));
        assert!(predicate.matches(b"./README.MD"));
        assert!(!predicate.matches(b"./b.log"));
    }

    #[test]
    fn test_name_predicate_mixed_polarity() {
        // "ends in .txt" OR "does not mention log"
        let predicate = names(&[r"\.txt$", "!log"]);
        assert!(predicate.matches(b"./a.txt"));
        assert!(predicate.matches(b"./main.rs"));
        assert!(predicate.matches(b"./log.txt"));
        assert!(!predicate.matches(b"./b.log"));
    }

    #[test]
    fn test_name_predicate_order_does_not_change_result() {
        let forward = names(&[r"\.txt$", "!log"]);
        let reverse = names(&["!log", r"\.txt$"]);
        for path in [&b"./a.txt"[..], b"./b.log", b"./log.txt", b"./x"] {
            assert_eq!(forward.matches(path), reverse.matches(path));
        }
    }

    #[test]
    fn test_content_predicate_is_and() {
        let predicate = contents(&["alpha", "!beta"]);
        assert!(predicate.line_matches(b"alpha"));
        assert!(!predicate.line_matches(b"beta"));
        assert!(!predicate.line_matches(b"alpha beta"));
        assert!(!predicate.line_matches(b"gamma"));
    }

    #[test]
    fn test_content_predicate_single_negative() {
        let predicate = contents(&["!todo"]);
        assert!(predicate.line_matches(b"fn main() {}"));
        assert!(!predicate.line_matches(b"// TODO: tidy"));
        assert!(predicate.line_matches(b""));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let p = Pattern::parse("", true).unwrap();
        assert!(p.is_hit(b""));
        assert!(p.is_hit(b"anything"));

        let p = Pattern::parse("!", true).unwrap();
        assert!(!p.is_hit(b"anything"));
    }
}
