//! Module for lexical rules and the ordered rule table
//!
//! A rule couples a regex pattern with a capture-group selector and a style
//! tag. Rule order is part of the contract: the matcher applies rules
//! front to back and the first rule to claim an offset keeps it, so
//! keywords must be declared before any rule that could match the same
//! text. String and comment classification is not rule-driven — the
//! boundary scanner owns those, see [`crate::scanner`].

use crate::error::ConfigError;
use crate::styles::StyleTag;
use regex::Regex;

/// Python keywords
const KEYWORDS: &[&str] = &[
    "and", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except", "exec",
    "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "not", "or", "pass",
    "print", "raise", "return", "try", "while", "yield", "None", "True", "False",
];

/// Python operators, pre-escaped for use as patterns
const OPERATORS: &[&str] = &[
    "=",
    // Comparison
    "==", "!=", "<", "<=", ">", ">=",
    // Arithmetic
    r"\+", "-", r"\*", "/", "//", r"\%", r"\*\*",
    // In-place
    r"\+=", "-=", r"\*=", "/=", r"\%=",
    // Bitwise
    r"\^", r"\|", r"\&", r"\~", ">>", "<<",
];

/// Python braces, pre-escaped for use as patterns
const BRACES: &[&str] = &[r"\{", r"\}", r"\(", r"\)", r"\[", r"\]"];

/// One lexical rule: pattern, capture-group selector, style tag
///
/// A capture index of 0 styles the whole match; a nonzero index styles only
/// that group (used so `def name` tags `name` without touching `def`).
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    capture: usize,
    tag: StyleTag,
}

impl Rule {
    /// Compiles a rule, validating the pattern and the capture selector
    pub fn new(pattern: &str, capture: usize, tag: StyleTag) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::Pattern { tag, source })?;
        let available = pattern.captures_len();
        if capture >= available {
            return Err(ConfigError::CaptureOutOfRange {
                tag,
                index: capture,
                available,
            });
        }
        Ok(Self {
            pattern,
            capture,
            tag,
        })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn capture(&self) -> usize {
        self.capture
    }

    pub fn tag(&self) -> StyleTag {
        self.tag
    }
}

/// Ordered, immutable list of rules for one language
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Builds a rule set from `(pattern, capture, tag)` triples
    ///
    /// Fails on the first malformed entry; a partially valid table never
    /// reaches the matcher.
    pub fn from_triples<'a>(
        triples: impl IntoIterator<Item = (&'a str, usize, StyleTag)>,
    ) -> Result<Self, ConfigError> {
        let rules = triples
            .into_iter()
            .map(|(pattern, capture, tag)| Rule::new(pattern, capture, tag))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The rule table for Python
    ///
    /// Order matters: keywords, operators, braces, `self`, definition-name
    /// captures, numeric literals.
    pub fn python() -> Result<Self, ConfigError> {
        let mut triples: Vec<(String, usize, StyleTag)> = Vec::new();

        triples.extend(
            KEYWORDS
                .iter()
                .map(|w| (format!(r"\b{w}\b"), 0, StyleTag::Keyword)),
        );
        triples.extend(OPERATORS.iter().map(|o| (o.to_string(), 0, StyleTag::Operator)));
        triples.extend(BRACES.iter().map(|b| (b.to_string(), 0, StyleTag::Brace)));

        triples.extend([
            // 'self'
            (r"\bself\b".to_string(), 0, StyleTag::SelfRef),
            // 'def' followed by an identifier
            (r"\bdef\b\s*(\w+)".to_string(), 1, StyleTag::DefClass),
            // 'class' followed by an identifier
            (r"\bclass\b\s*(\w+)".to_string(), 1, StyleTag::DefClass),
            // Numeric literals
            (r"\b[+-]?[0-9]+[lL]?\b".to_string(), 0, StyleTag::Number),
            (
                r"\b[+-]?0[xX][0-9A-Fa-f]+[lL]?\b".to_string(),
                0,
                StyleTag::Number,
            ),
            (
                r"\b[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b".to_string(),
                0,
                StyleTag::Number,
            ),
        ]);

        Self::from_triples(
            triples
                .iter()
                .map(|(pattern, capture, tag)| (pattern.as_str(), *capture, *tag)),
        )
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Every tag this rule set can emit, plus the tags the scanner emits
    ///
    /// Used to validate a style registry up front so a missing entry is a
    /// configuration error instead of a lookup failure mid-render.
    pub fn emitted_tags(&self) -> Vec<StyleTag> {
        let mut tags = vec![StyleTag::String, StyleTag::String2, StyleTag::Comment];
        for rule in &self.rules {
            if !tags.contains(&rule.tag) {
                tags.push(rule.tag);
            }
        }
        tags
    }
}
