//! Key matchers.
//!
//! A matcher is a stateless predicate over keys. Operations take an
//! `Option<&dyn Matcher>`: `None` is the universal matcher and lets every key
//! through, which is distinct from a matcher that rejects everything.

use regex::RegexBuilder;

use crate::error::Result;

/// Predicate selecting a subset of keys.
pub trait Matcher {
    /// Whether `key` is selected.
    fn matches(&self, key: &str) -> bool;
}

/// How a CLI pattern is turned into a matcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Regex,
    Literal,
}

/// Case-insensitive, unanchored regular expression matcher.
#[derive(Debug, Clone)]
pub struct Regex {
    regex: regex::Regex,
}

impl Regex {
    /// Compile `pattern` ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_case(pattern, true)
    }

    /// Compile `pattern`, optionally ignoring case.
    pub fn with_case(pattern: &str, ignore_case: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()?;
        Ok(Self { regex })
    }

    /// Matcher for literal text; regex metacharacters lose their meaning.
    pub fn literal(text: &str) -> Result<Self> {
        Self::new(&regex::escape(text))
    }
}

impl Matcher for Regex {
    fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// Build a matcher for a CLI pattern.
///
/// An empty pattern yields `None`, the universal matcher.
///
/// # Errors
///
/// Returns `Error::Pattern` for an invalid regular expression.
pub fn build(pattern: &str, mode: MatchMode) -> Result<Option<Box<dyn Matcher>>> {
    if pattern.is_empty() {
        return Ok(None);
    }

    let matcher = match mode {
        MatchMode::Regex => Regex::new(pattern)?,
        MatchMode::Literal => Regex::literal(pattern)?,
    };
    Ok(Some(Box::new(matcher)))
}

/// Apply an optional matcher; `None` matches everything.
pub fn accepts(matcher: Option<&dyn Matcher>, key: &str) -> bool {
    matcher.map_or(true, |m| m.matches(key))
}
