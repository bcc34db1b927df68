//! # serp-xray
//!
//! Competitive content profiling for the top-ranking pages of a search query.
//!
//! Given a keyword, the library pulls the organic results, extracts each
//! page with a readability-first fallback chain, computes per-page content
//! signals, and summarises the page set as a content-gap report and a set
//! of topic clusters.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serp_xray::{Analyzer, AnalysisOutcome, Options};
//!
//! let mut options = Options::default();
//! options.serp.api_key = std::env::var("SERPER_API_KEY").unwrap_or_default();
//!
//! let analyzer = Analyzer::from_options(options)?;
//! if let AnalysisOutcome::Complete(report) = analyzer.run("seo local") {
//!     for (heading, count) in report.gap.critical_headings_by_count() {
//!         println!("{count:>2}  {heading}");
//!     }
//! }
//! # Ok::<(), serp_xray::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Candidate filter**: drops excluded hosts and duplicate URLs
//! - **Page extractor**: readability stage, raw fallback stage, typed failures
//! - **Feature computer**: headings, word statistics, links, media, schema, readability, heuristics
//! - **Gap aggregator**: shared headings, frequent terms, benchmark averages
//! - **Topic clusterer**: TF-IDF vectors grouped by seeded k-means
//!
//! Every per-URL failure is contained: the worst outcome of a run is an
//! empty report, never an error.

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// URL utilities for host extraction and de-duplication.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Candidate filtering by excluded hosts.
pub mod filter;

/// HTTP fetch collaborator.
pub mod fetch;

/// Search results retrieval collaborator.
pub mod serp;

/// Page extraction with the readability and raw fallback stages.
pub mod extractor;

/// Per-page feature computation.
pub mod features;

/// Cross-page gap analysis.
pub mod gap;

/// TF-IDF and k-means topic clustering.
pub mod cluster;

/// Analysis driver.
pub mod pipeline;

// Public API - re-exports
pub use error::{Error, ExtractionFailure, Result};
pub use options::{AuthorityWeights, ClusterOptions, Options, SerpOptions};
pub use pipeline::Analyzer;
pub use result::{
    AnalysisOutcome, AnalysisReport, Benchmarks, CandidateResult, ClusterAssignment, ClusterMember, GapReport,
    LinkStats, MediaStats, PageRecord, Readability, ReadabilityLevel, SearchIntent, SkippedCandidate,
    TopicCluster,
};
