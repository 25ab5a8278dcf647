//! Route matching logic.
//!
//! # Responsibilities
//! - Match a request path against an exact route pattern
//! - Match a request path against a prefix
//!
//! # Design Decisions
//! - Matching looks at the path only (no method, no headers)
//! - Path matching is case-sensitive
//! - Trailing slash is significant: `/health` and `/health/` differ
//! - A `*` segment matches exactly one non-empty segment
//! - No regex to guarantee O(n) matching

use std::fmt;

/// Pattern segment that matches any single non-empty path segment.
pub const WILDCARD_SEGMENT: &str = "*";

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// An immutable exact-match route pattern.
///
/// Patterns are split on `/`. A pattern without wildcard segments matches by
/// plain string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: String,
    has_wildcard: bool,
}

impl Route {
    /// Create a route from a pattern such as `/health` or `/users/*/posts`.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let has_wildcard = pattern.split('/').any(|seg| seg == WILDCARD_SEGMENT);
        Self {
            pattern,
            has_wildcard,
        }
    }

    /// The pattern as registered.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern contains at least one `*` segment.
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }
}

impl Matcher for Route {
    fn matches(&self, path: &str) -> bool {
        if !self.has_wildcard {
            return self.pattern == path;
        }

        let mut expected = self.pattern.split('/');
        let mut actual = path.split('/');
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(WILDCARD_SEGMENT), Some(seg)) if !seg.is_empty() => continue,
                (Some(lit), Some(seg)) if lit == seg => continue,
                _ => return false,
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl From<&str> for Route {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for Route {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    ///
    /// Returns `None` for an empty prefix, which would match every path.
    pub fn new(prefix: impl Into<String>) -> Option<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return None;
        }
        Some(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}
