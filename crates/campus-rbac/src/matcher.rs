use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RbacError, Result};

/// One classification rule inside a template.
///
/// Written in configuration as a string: `sessions.` for a path matcher,
/// `/^users\.assignRoles$/` for a regex. `{ regex = "..." }` is accepted on
/// input as well.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "MatcherSpec", into = "String")]
pub enum Matcher {
    /// `"sessions."` matches on the literal prefix; `"subject.assignments"`
    /// matches that path and anything nested under it.
    Path(String),
    /// Tested against the whole name.
    Regex(Regex),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatcherSpec {
    Text(String),
    Regex { regex: String },
}

impl Matcher {
    pub fn path(pattern: &str) -> Self {
        Matcher::Path(pattern.to_string())
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        let invalid = |source| RbacError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };
        // The pattern must parse by itself so it cannot close the anchor group.
        Regex::new(pattern).map_err(invalid)?;
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Matcher::Regex)
            .map_err(invalid)
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Regex(re) => re.is_match(name),
            Matcher::Path(pattern) if pattern.ends_with('.') => name.starts_with(pattern.as_str()),
            Matcher::Path(pattern) => {
                name == pattern
                    || name
                        .strip_prefix(pattern.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            }
        }
    }

    /// The pattern as written in configuration, without the anchors
    /// [`Matcher::regex`] adds.
    pub fn source(&self) -> &str {
        match self {
            Matcher::Path(pattern) => pattern,
            Matcher::Regex(re) => {
                let s = re.as_str();
                s.strip_prefix("^(?:")
                    .and_then(|s| s.strip_suffix(")$"))
                    .unwrap_or(s)
            }
        }
    }
}

pub fn matches_pattern(name: &str, pattern: &Matcher) -> bool {
    pattern.matches(name)
}

impl TryFrom<MatcherSpec> for Matcher {
    type Error = RbacError;

    fn try_from(spec: MatcherSpec) -> Result<Self> {
        match spec {
            MatcherSpec::Text(text) => match text
                .strip_prefix('/')
                .and_then(|rest| rest.strip_suffix('/'))
            {
                Some(regex) => Matcher::regex(regex),
                None => Ok(Matcher::Path(text)),
            },
            MatcherSpec::Regex { regex } => Matcher::regex(&regex),
        }
    }
}

impl From<Matcher> for String {
    fn from(matcher: Matcher) -> Self {
        matcher.to_string()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Path(pattern) => write!(f, "Path({pattern:?})"),
            Matcher::Regex(_) => write!(f, "Regex({:?})", self.source()),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Path(pattern) => f.write_str(pattern),
            Matcher::Regex(_) => write!(f, "/{}/", self.source()),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Path(a), Matcher::Path(b)) => a == b,
            (Matcher::Regex(a), Matcher::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
