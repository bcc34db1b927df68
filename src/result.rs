//! Result types for an analysis run.
//!
//! Everything here is plain data: produced once by the pipeline, never
//! mutated afterwards, and handed to rendering or export code as-is. All
//! types derive `Serialize` so callers can dump them without adapters.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ExtractionFailure;

/// One organic result from the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateResult {
    /// Result URL.
    pub url: String,
    /// Result title as shown on the results page.
    pub title: String,
    /// Result snippet; used when a page has no meta description.
    pub snippet: String,
    /// 1-based position in the raw result list, before any filtering.
    pub rank: usize,
}

/// Anchor counts for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Anchors pointing at the page's own host or root-relative paths.
    pub internal_count: usize,
    /// All other anchors.
    pub external_count: usize,
    /// External anchors without a `nofollow` relation.
    pub external_dofollow_count: usize,
}

/// Media counts for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaStats {
    /// `<img>` elements.
    pub image_count: usize,
    /// `<img>` elements with non-empty alt text.
    pub image_with_alt_count: usize,
    /// `<video>` and `<iframe>` elements.
    pub video_count: usize,
}

impl MediaStats {
    /// Images plus videos.
    #[must_use]
    pub fn total(&self) -> usize {
        self.image_count + self.video_count
    }
}

/// Qualitative reading-ease bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityLevel {
    /// Score of 80 or more.
    VeryEasy,
    /// Score of 60 or more.
    Easy,
    /// Score of 40 or more.
    Medium,
    /// Anything lower.
    Difficult,
    /// The score could not be computed.
    NotAvailable,
}

impl ReadabilityLevel {
    /// Bucket a Flesch reading-ease score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::VeryEasy
        } else if score >= 60.0 {
            Self::Easy
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Difficult
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryEasy => "very easy",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Difficult => "difficult",
            Self::NotAvailable => "not available",
        }
    }
}

/// Reading-ease score with its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readability {
    /// Flesch reading-ease score, when computable.
    pub score: Option<f64>,
    /// Qualitative bucket.
    pub level: ReadabilityLevel,
}

impl Readability {
    /// Readability that could not be computed.
    #[must_use]
    pub fn not_available() -> Self {
        Self { score: None, level: ReadabilityLevel::NotAvailable }
    }
}

impl fmt::Display for Readability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} ({score:.0})", self.level.label()),
            None => f.write_str(self.level.label()),
        }
    }
}

/// Coarse search intent of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchIntent {
    /// Buying-oriented vocabulary dominates.
    Transactional,
    /// Research-oriented vocabulary dominates.
    Informational,
    /// Neither dominates (including no hits at all).
    Mixed,
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Transactional => "transactional",
            Self::Informational => "informational",
            Self::Mixed => "mixed",
        })
    }
}

/// Normalised extraction of one successfully analysed URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    /// 1-based position among valid pages of the run.
    pub position: usize,
    /// Raw rank of the originating search result.
    pub rank: usize,
    /// Source URL.
    pub url: String,
    /// Document title.
    pub title: String,
    /// Meta description, or the search snippet when the page has none.
    pub meta_description: String,
    /// Publication date from article meta tags.
    pub published: Option<NaiveDate>,
    /// H1 texts.
    pub h1: Vec<String>,
    /// H2 texts after length and blacklist filtering.
    pub h2: Vec<String>,
    /// First H3 texts.
    pub h3: Vec<String>,
    /// Whitespace-delimited words in the main text.
    pub word_count: usize,
    /// Whole-word, case-insensitive matches of the target keyword.
    pub keyword_mentions: usize,
    /// Lower-cased tokens without punctuation, stopwords, or tokens of 2 chars or fewer.
    pub word_tokens: Vec<String>,
    /// Main text.
    pub raw_text: String,
    /// Leading slice of the main text.
    pub content_sample: String,
    /// Anchor counts.
    pub links: LinkStats,
    /// Image and video counts.
    pub media: MediaStats,
    /// JSON-LD `@type` values.
    pub schema_types: Vec<String>,
    /// Reading ease.
    pub readability: Readability,
    /// Heuristic authority score in `[0, 100]`.
    pub domain_authority_proxy: u8,
    /// Heuristic intent label.
    pub search_intent: SearchIntent,
    /// Capitalised-word sequences; a coarse stand-in for named entities.
    pub entities: Vec<String>,
    /// Question-like spans from the main text.
    pub faq_candidates: Vec<String>,
    /// Whether a table-of-contents container was found.
    pub has_toc: bool,
}

/// Cross-page averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Benchmarks {
    /// Mean word count.
    pub avg_word_count: f64,
    /// Mean number of (filtered) H2 headings.
    pub avg_heading_count: f64,
    /// Mean internal link count.
    pub avg_internal_links: f64,
    /// Mean external link count.
    pub avg_external_links: f64,
    /// Mean images plus videos.
    pub avg_media_count: f64,
    /// Mean domain-authority proxy.
    pub avg_domain_authority: f64,
}

/// Cross-corpus content-gap statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GapReport {
    /// Lower-cased H2 headings present on at least the critical share of pages.
    ///
    /// Counts are pages, not occurrences: a heading repeated on one page counts once.
    pub critical_headings: BTreeMap<String, usize>,
    /// Most frequent word tokens, most frequent first.
    pub secondary_keywords: Vec<(String, usize)>,
    /// Lower-cased FAQ candidates by frequency, most frequent first.
    pub common_faqs: Vec<(String, usize)>,
    /// Most frequent adjacent token pairs, most frequent first.
    pub top_bigrams: Vec<(String, usize)>,
    /// Schema type to number of pages declaring it, most common first.
    pub schema_frequencies: Vec<(String, usize)>,
    /// Most common intent label.
    pub dominant_intent: Option<SearchIntent>,
    /// Averages across pages.
    pub benchmarks: Benchmarks,
}

impl GapReport {
    /// Critical headings sorted by descending count, then alphabetically.
    #[must_use]
    pub fn critical_headings_by_count(&self) -> Vec<(&str, usize)> {
        let mut headings: Vec<(&str, usize)> = self
            .critical_headings
            .iter()
            .map(|(heading, count)| (heading.as_str(), *count))
            .collect();
        headings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        headings
    }
}

/// A page as a member of a topic cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterMember {
    /// Page URL.
    pub url: String,
    /// Page title.
    pub title: String,
}

/// One topic cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicCluster {
    /// Pages in this cluster, in page order.
    pub members: Vec<ClusterMember>,
    /// Highest-weighted centroid terms.
    pub top_terms: Vec<String>,
}

/// Cluster id (0-based) to cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterAssignment {
    /// Clusters keyed by id.
    pub clusters: BTreeMap<usize, TopicCluster>,
}

impl ClusterAssignment {
    /// Number of non-empty clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether no cluster was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Cluster id of a URL, if it was clustered.
    #[must_use]
    pub fn cluster_of(&self, url: &str) -> Option<usize> {
        self.clusters
            .iter()
            .find(|(_, cluster)| cluster.members.iter().any(|m| m.url == url))
            .map(|(id, _)| *id)
    }
}

/// A candidate that produced no page record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCandidate {
    /// Candidate URL.
    pub url: String,
    /// Raw rank of the candidate.
    pub rank: usize,
    /// Why it was skipped.
    pub reason: ExtractionFailure,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Query that was analysed.
    pub keyword: String,
    /// Valid pages, in the order they were accepted.
    pub pages: Vec<PageRecord>,
    /// Gap analysis over `pages`.
    pub gap: GapReport,
    /// Topic clusters; `None` when the page set is too small or degenerate.
    pub clusters: Option<ClusterAssignment>,
    /// Candidates that failed extraction.
    pub skipped: Vec<SkippedCandidate>,
}

/// Outcome of one analysis run. No variant is an error: the worst case is an empty report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// The search call failed or returned no usable candidates.
    NoResults {
        /// Why retrieval produced nothing.
        reason: String,
    },
    /// Candidates existed but none could be extracted.
    NoValidPages {
        /// Every candidate that was tried.
        skipped: Vec<SkippedCandidate>,
    },
    /// At least one page was analysed.
    Complete(AnalysisReport),
}

impl AnalysisOutcome {
    /// The report, if the run completed.
    #[must_use]
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::Complete(report) => Some(report),
            _ => None,
        }
    }
}
