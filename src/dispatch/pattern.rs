//! Fault code patterns used to select handlers.

use regex::Regex;

use crate::code::{FaultCode, MessageCode};
use crate::codes;
use crate::fault::Fault;

/// How a pattern tests a fault code.
#[derive(Debug, Clone)]
enum Matcher {
    /// Exact string comparison.
    Literal,
    /// Full-string regular expression match.
    Regex(Regex),
}

/// A pattern matched against a fault's code string.
///
/// Patterns written as strings are regular expressions that must match the
/// whole code (`app\..*` matches `app.io` but `app` does not). Patterns
/// derived from a [`FaultCode`] or a native error type compare literally.
#[derive(Debug, Clone)]
pub struct CodePattern {
    source: String,
    matcher: Matcher,
}

impl CodePattern {
    /// Compiles a regular expression pattern.
    ///
    /// # Errors
    ///
    /// Returns an [`INVALID_CODE_PATTERN`](codes::INVALID_CODE_PATTERN) fault
    /// if `pattern` is not a valid regular expression.
    pub fn regex(pattern: &str) -> Result<Self, Fault> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|err| {
            Fault::misuse(
                &codes::INVALID_CODE_PATTERN,
                [pattern.to_string(), err.to_string()],
            )
        })?;
        Ok(Self {
            source: pattern.to_string(),
            matcher: Matcher::Regex(regex),
        })
    }

    /// A pattern matching exactly `code`.
    pub fn literal(code: impl Into<String>) -> Self {
        Self {
            source: code.into(),
            matcher: Matcher::Literal,
        }
    }

    /// A pattern matching faults naturalized from native errors of type `E`.
    pub fn native<E: ?Sized + 'static>() -> Self {
        Self::literal(std::any::type_name::<E>())
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if this pattern is a regular expression.
    pub fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }

    /// Tests a fault code string.
    pub fn matches(&self, code: &str) -> bool {
        match &self.matcher {
            Matcher::Literal => self.source == code,
            Matcher::Regex(regex) => regex.is_match(code),
        }
    }
}

/// Conversion into a [`CodePattern`] when registering handlers.
pub trait IntoCodePattern {
    /// Performs the conversion.
    fn into_code_pattern(self) -> Result<CodePattern, Fault>;
}

impl IntoCodePattern for CodePattern {
    fn into_code_pattern(self) -> Result<CodePattern, Fault> {
        Ok(self)
    }
}

impl IntoCodePattern for &str {
    fn into_code_pattern(self) -> Result<CodePattern, Fault> {
        CodePattern::regex(self)
    }
}

impl IntoCodePattern for String {
    fn into_code_pattern(self) -> Result<CodePattern, Fault> {
        CodePattern::regex(&self)
    }
}

impl IntoCodePattern for &String {
    fn into_code_pattern(self) -> Result<CodePattern, Fault> {
        CodePattern::regex(self)
    }
}

impl IntoCodePattern for &FaultCode {
    fn into_code_pattern(self) -> Result<CodePattern, Fault> {
        Ok(CodePattern::literal(self.code()))
    }
}

impl IntoCodePattern for &MessageCode {
    fn into_code_pattern(self) -> Result<CodePattern, Fault> {
        Ok(CodePattern::literal(self.code()))
    }
}
