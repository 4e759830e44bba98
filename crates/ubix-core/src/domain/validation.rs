//! Parameter validation.
//!
//! Every raw value that reaches the core (command-line options, prompt
//! answers, manifest fields) passes through [`validate_param`]. Callers pick
//! the error policy: propagate with `?` to fail fast, or feed the result to
//! [`ValidationErrors::collect`] to keep going and report everything at once.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

/// Solution names: ASCII word characters, hyphen and space.
pub static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\- ]+$").expect("name pattern compiles"));

/// Three dot-separated non-negative integers.
pub static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version pattern compiles"));

/// `latest`, or a three-part version.
pub static API_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(latest|[0-9]+\.[0-9]+\.[0-9]+)$").expect("api pattern compiles")
});

/// Constraints applied to one parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamRule<'a> {
    pattern: Option<&'a Regex>,
    int: bool,
    message: Option<&'a str>,
}

impl<'a> ParamRule<'a> {
    /// A rule that accepts any non-empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule for solution names.
    pub fn name() -> ParamRule<'static> {
        ParamRule::new().pattern(&NAME_PATTERN)
    }

    /// Rule for the solution version.
    pub fn version() -> ParamRule<'static> {
        ParamRule::new().pattern(&VERSION_PATTERN)
    }

    /// Rule for the API version.
    pub fn api() -> ParamRule<'static> {
        ParamRule::new().pattern(&API_PATTERN)
    }

    /// Rule for signed integer increments.
    pub fn increment() -> ParamRule<'static> {
        ParamRule::new().int()
    }

    /// Require the raw string to match `pattern`.
    pub fn pattern(mut self, pattern: &'a Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Parse the raw string as an integer.
    pub fn int(mut self) -> Self {
        self.int = true;
        self
    }

    /// Replace the default `invalid value for <param>: <val>` message.
    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }
}

/// A successfully validated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

/// Validate a raw parameter value.
///
/// Absent and empty inputs yield `Ok(None)` so the caller can fall back to
/// its default.
pub fn validate_param(
    raw: Option<&str>,
    param: &str,
    rule: &ParamRule<'_>,
) -> Result<Option<ParamValue>, DomainError> {
    let Some(value) = raw.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return Err(DomainError::invalid_format(param, value, rule.message));
        }
    }

    if rule.int {
        return value
            .trim()
            .parse::<i64>()
            .map(|n| Some(ParamValue::Int(n)))
            .map_err(|_| DomainError::invalid_int(param, value, rule.message));
    }

    Ok(Some(ParamValue::Text(value.to_owned())))
}

/// [`validate_param`] for string-valued parameters.
pub fn validate_text(
    raw: Option<&str>,
    param: &str,
    rule: &ParamRule<'_>,
) -> Result<Option<String>, DomainError> {
    Ok(validate_param(raw, param, rule)?.map(|v| match v {
        ParamValue::Text(s) => s,
        ParamValue::Int(n) => n.to_string(),
    }))
}

/// [`validate_param`] for integer parameters.
pub fn validate_int(raw: Option<&str>, param: &str) -> Result<Option<i64>, DomainError> {
    match validate_param(raw, param, &ParamRule::increment())? {
        Some(ParamValue::Int(n)) => Ok(Some(n)),
        Some(ParamValue::Text(s)) => Err(DomainError::invalid_int(param, &s, None)),
        None => Ok(None),
    }
}

/// Errors accumulated by a batch validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<DomainError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed result and continue with "no value".
    pub fn collect<T>(&mut self, result: Result<Option<T>, DomainError>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    pub fn push(&mut self, err: DomainError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainError> {
        self.0.iter()
    }

    /// One human-readable line per error.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// `Ok` when nothing was collected. A single error is returned as-is;
    /// several are wrapped in [`DomainError::Invalid`].
    pub fn into_result(mut self) -> Result<(), DomainError> {
        match self.0.len() {
            0 => Ok(()),
            1 => Err(self.0.remove(0)),
            _ => Err(DomainError::Invalid(self)),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.0 {
            write!(f, "\n  * {}", err)?;
        }
        Ok(())
    }
}
