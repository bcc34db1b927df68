//! Cross-page gap analysis.
//!
//! Aggregates a snapshot of page records into shared headings, frequent
//! terms and benchmark averages. The report is recomputed from scratch on
//! every call; nothing is cached between runs.

use std::collections::{HashMap, HashSet};

use crate::options::Options;
use crate::result::{Benchmarks, GapReport, PageRecord, SearchIntent};

/// Builds a [`GapReport`] from page records.
#[derive(Debug, Clone)]
pub struct GapAggregator {
    critical_heading_ratio: f64,
    secondary_keyword_limit: usize,
    common_faq_limit: usize,
    bigram_limit: usize,
}

impl GapAggregator {
    /// Build from run options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            critical_heading_ratio: options.critical_heading_ratio,
            secondary_keyword_limit: options.secondary_keyword_limit,
            common_faq_limit: options.common_faq_limit,
            bigram_limit: options.bigram_limit,
        }
    }

    /// Aggregate `pages`. An empty slice yields an empty report with zero averages.
    #[must_use]
    pub fn aggregate(&self, pages: &[PageRecord]) -> GapReport {
        let threshold = self.critical_heading_ratio * pages.len() as f64;
        let critical_headings = ranked_counts(
            pages.iter().flat_map(|p| distinct(p.h2.iter().map(|h| h.trim().to_lowercase()))),
            usize::MAX,
        )
        .into_iter()
        .filter(|(_, count)| *count as f64 >= threshold)
        .collect();

        let tokens = pages.iter().flat_map(|p| p.word_tokens.iter().cloned());
        let secondary_keywords = ranked_counts(tokens, self.secondary_keyword_limit);

        let common_faqs = ranked_counts(
            pages.iter().flat_map(|p| p.faq_candidates.iter().map(|f| f.to_lowercase())),
            self.common_faq_limit,
        );

        let stream: Vec<&String> = pages.iter().flat_map(|p| p.word_tokens.iter()).collect();
        let top_bigrams = ranked_counts(
            stream.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])),
            self.bigram_limit,
        );

        let schema_frequencies = ranked_counts(
            pages.iter().flat_map(|p| distinct(p.schema_types.iter().cloned())),
            usize::MAX,
        );

        GapReport {
            critical_headings,
            secondary_keywords,
            common_faqs,
            top_bigrams,
            schema_frequencies,
            dominant_intent: dominant_intent(pages),
            benchmarks: benchmarks(pages),
        }
    }
}

/// Most frequent intent label; the first label seen wins ties.
fn dominant_intent(pages: &[PageRecord]) -> Option<SearchIntent> {
    let mut counts: Vec<(SearchIntent, usize)> = Vec::new();
    for page in pages {
        match counts.iter_mut().find(|(intent, _)| *intent == page.search_intent) {
            Some((_, count)) => *count += 1,
            None => counts.push((page.search_intent, 1)),
        }
    }
    // max_by_key returns the last maximum; iterate in reverse so the first seen wins.
    counts.into_iter().rev().max_by_key(|(_, count)| *count).map(|(intent, _)| intent)
}

fn benchmarks(pages: &[PageRecord]) -> Benchmarks {
    Benchmarks {
        avg_word_count: mean(pages, |p| p.word_count as f64),
        avg_heading_count: mean(pages, |p| p.h2.len() as f64),
        avg_internal_links: mean(pages, |p| p.links.internal_count as f64),
        avg_external_links: mean(pages, |p| p.links.external_count as f64),
        avg_media_count: mean(pages, |p| p.media.total() as f64),
        avg_domain_authority: mean(pages, |p| f64::from(p.domain_authority_proxy)),
    }
}

fn mean<F: Fn(&PageRecord) -> f64>(pages: &[PageRecord], value: F) -> f64 {
    if pages.is_empty() {
        return 0.0;
    }
    pages.iter().map(value).sum::<f64>() / pages.len() as f64
}

/// Items of `iter` with duplicates removed, first occurrence kept.
fn distinct<I: Iterator<Item = String>>(iter: I) -> Vec<String> {
    let mut seen = HashSet::new();
    iter.filter(|item| seen.insert(item.clone())).collect()
}

/// Frequency table of `items`, most frequent first, ties by first appearance, truncated to `limit`.
pub(crate) fn ranked_counts<I: IntoIterator<Item = String>>(items: I, limit: usize) -> Vec<(String, usize)> {
    let mut table: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        table.entry(item).or_insert((0, index)).0 += 1;
    }
    let mut ranked: Vec<(String, usize, usize)> =
        table.into_iter().map(|(item, (count, first))| (item, count, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(item, count, _)| (item, count)).collect()
}
