//! Candidate filtering.
//!
//! Drops search results whose URL contains an excluded host substring and
//! collapses duplicate URLs, keeping the first (best-ranked) occurrence.
//! Order is preserved and `rank` is left untouched.

use std::collections::HashSet;

use crate::result::CandidateResult;
use crate::url_utils::dedup_key;

/// Removes excluded and duplicate candidates.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    excluded: Vec<String>,
}

impl CandidateFilter {
    /// Build a filter over a set of excluded host substrings.
    ///
    /// Blank entries are ignored; they would otherwise match every URL.
    #[must_use]
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded = excluded
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { excluded }
    }

    /// Whether `url` contains any excluded substring.
    #[must_use]
    pub fn is_excluded(&self, url: &str) -> bool {
        self.excluded.iter().any(|bad| url.contains(bad.as_str()))
    }

    /// Filter an ordered candidate list.
    #[must_use]
    pub fn apply(&self, candidates: Vec<CandidateResult>) -> Vec<CandidateResult> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| !self.is_excluded(&c.url))
            .filter(|c| seen.insert(dedup_key(&c.url)))
            .collect()
    }
}
