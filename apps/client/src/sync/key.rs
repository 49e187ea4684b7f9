use std::fmt;

use crate::api::Query;

/// Composite cache key: a resource family followed by identifying segments.
///
/// Invalidation works by prefix, so `["resumes"]` covers every cached page of
/// `["resumes", <query>]` while leaving `["resume", <id>]` detail entries
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(family: &str) -> Self {
        QueryKey(vec![family.to_string()])
    }

    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Appends a canonical fingerprint of a query-parameter set. Two
    /// parameter sets that marshal to the same wire query share a key.
    pub fn with_query(self, query: &Query) -> Self {
        let fingerprint = query
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        self.with(fingerprint)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
