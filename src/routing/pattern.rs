//! Path patterns and the segment-walk matcher.
//!
//! # Responsibilities
//! - Classify a path spec as literal or pattern
//! - Compile a pattern into segments once, at registration
//! - Match a request path against a compiled pattern, capturing parameters
//!
//! # Design Decisions
//! - Patterns are split on `/` exactly like request paths, so the leading
//!   empty segment lines up on both sides
//! - Segment counts must agree unless the pattern has a `*` segment
//! - `*` captures the remaining request segments as `rest` and ends the walk;
//!   segments after it are never compared. A bare `*` therefore captures the
//!   whole path, leading `/` included
//! - `:name` matches any position, binding `""` past the end of the path
//! - No syntax validation: a non-trailing `*` simply cuts the walk short
//! - No regex

use crate::handler::Params;

/// Name of the parameter bound by a `*` segment.
pub const REST_PARAM: &str = "rest";

/// Returns true if `spec` must be registered as a pattern rather than a literal.
pub fn is_pattern(spec: &str) -> bool {
    spec.contains(':') || spec.contains('*')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Produced by a leading, trailing or doubled `/`. Never compared.
    Empty,
    Literal(String),
    /// `:name`
    Param(String),
    /// `*`
    Wildcard,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Segment::Empty
        } else if raw == "*" {
            Segment::Wildcard
        } else if let Some(name) = raw.strip_prefix(':') {
            Segment::Param(name.to_string())
        } else {
            Segment::Literal(raw.to_string())
        }
    }
}

/// A compiled path pattern such as `/users/:id` or `/static/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
    has_wildcard: bool,
}

impl Pattern {
    pub fn parse(spec: impl Into<String>) -> Self {
        let raw = spec.into();
        let segments: Vec<Segment> = raw.split('/').map(Segment::parse).collect();
        let has_wildcard = segments.contains(&Segment::Wildcard);
        Self {
            raw,
            segments,
            has_wildcard,
        }
    }

    /// The path string this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match `path` against this pattern.
    ///
    /// Returns the captured parameters on success. A `:name` segment always
    /// matches its position; with no request segment there (possible only
    /// when `*` waived the count check) it binds the empty string.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() && !self.has_wildcard {
            return None;
        }

        let mut params = Params::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => {
                    let rest = parts
                        .get(index..)
                        .map(|rest| rest.join("/"))
                        .unwrap_or_default();
                    params.insert(REST_PARAM, rest);
                    return Some(params);
                }
                Segment::Empty => continue,
                Segment::Param(name) => {
                    params.insert(name.as_str(), parts.get(index).copied().unwrap_or_default());
                }
                Segment::Literal(literal) => {
                    if parts.get(index) != Some(&literal.as_str()) {
                        return None;
                    }
                }
            }
        }

        Some(params)
    }
}
