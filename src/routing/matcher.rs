//! Path matching logic.
//!
//! # Responsibilities
//! - Match a request path against a declared pattern
//! - Report the fixed path of a pattern, where one exists, for reverse lookup
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex: exact, prefix, and substring cover every declared route

/// A URL path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path exactly.
    Exact(String),
    /// Matches any path starting with the prefix. Used for mounted subtrees.
    Prefix(String),
    /// Matches any path containing the substring.
    Contains(String),
}

impl PathPattern {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    /// Returns true if the request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => path == expected,
            Self::Prefix(prefix) => path.starts_with(prefix),
            Self::Contains(needle) => path.contains(needle),
        }
    }

    /// The fixed path this pattern is anchored at, if it has one.
    ///
    /// Exact patterns yield their literal, prefix patterns their mount point.
    /// Substring patterns have no fixed path.
    pub fn fixed_path(&self) -> Option<&str> {
        match self {
            Self::Exact(path) | Self::Prefix(path) => Some(path),
            Self::Contains(_) => None,
        }
    }
}
