//! Analysis driver.
//!
//! One run: request candidates, filter them, extract pages one at a time
//! until the target count is reached or candidates run out, then aggregate
//! and cluster the accumulated set once. Fetches are sequential and no
//! per-URL failure ever aborts the run.

use crate::cluster::TopicClusterer;
use crate::error::Result;
use crate::extractor::PageExtractor;
use crate::features::{FeatureComputer, Heuristics};
use crate::fetch::{Fetch, HttpFetcher};
use crate::filter::CandidateFilter;
use crate::gap::GapAggregator;
use crate::options::Options;
use crate::result::{
    AnalysisOutcome, AnalysisReport, CandidateResult, ClusterAssignment, PageRecord, SkippedCandidate,
};
use crate::serp::{SerpProvider, SerperClient};

/// Runs competitive content analyses for search queries.
pub struct Analyzer {
    options: Options,
    serp: Box<dyn SerpProvider>,
    fetcher: Box<dyn Fetch>,
    features: FeatureComputer,
}

impl Analyzer {
    /// Build an analyzer over explicit collaborators.
    ///
    /// Fails when `options` do not validate.
    pub fn new(options: Options, serp: Box<dyn SerpProvider>, fetcher: Box<dyn Fetch>) -> Result<Self> {
        options.validate()?;
        let features = FeatureComputer::new(&options);
        Ok(Self { options, serp, fetcher, features })
    }

    /// Build an analyzer over the Serper API and a real HTTP fetcher.
    pub fn from_options(options: Options) -> Result<Self> {
        options.validate()?;
        let timeout = std::time::Duration::from_secs(options.fetch_timeout_secs);
        let serp = SerperClient::new(options.serp.clone(), timeout)?;
        let fetcher = HttpFetcher::new(&options)?;
        Self::new(options, Box::new(serp), Box::new(fetcher))
    }

    /// Replace the default heuristic scorers.
    #[must_use]
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.features = FeatureComputer::with_heuristics(&self.options, heuristics);
        self
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Analyse the top-ranking pages for `keyword`.
    pub fn run(&self, keyword: &str) -> AnalysisOutcome {
        let requested = self.options.candidate_request_size();
        tracing::info!(keyword, requested, "requesting candidates");
        let raw = match self.serp.search(keyword, requested) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(keyword, error = %e, "result retrieval failed");
                return AnalysisOutcome::NoResults { reason: e.to_string() };
            }
        };
        self.analyze(keyword, raw)
    }

    /// Analyse an already retrieved candidate list.
    pub fn analyze(&self, keyword: &str, raw: Vec<CandidateResult>) -> AnalysisOutcome {
        if raw.is_empty() {
            tracing::info!(keyword, "no organic results");
            return AnalysisOutcome::NoResults { reason: "no organic results".to_string() };
        }
        let received = raw.len();
        let candidates = CandidateFilter::new(&self.options.excluded_domains).apply(raw);
        tracing::info!(received, kept = candidates.len(), "candidates filtered");
        if candidates.is_empty() {
            return AnalysisOutcome::NoResults { reason: "every result was excluded".to_string() };
        }

        let (pages, skipped) = self.extract_pages(keyword, &candidates);
        if pages.is_empty() {
            tracing::info!(skipped = skipped.len(), "no page could be extracted");
            return AnalysisOutcome::NoValidPages { skipped };
        }

        let gap = GapAggregator::new(&self.options).aggregate(&pages);
        let clusters = TopicClusterer::new(&self.options).cluster(&pages);
        tracing::info!(
            pages = pages.len(),
            skipped = skipped.len(),
            clusters = clusters.as_ref().map_or(0, ClusterAssignment::len),
            "analysis complete"
        );

        AnalysisOutcome::Complete(AnalysisReport {
            keyword: keyword.to_string(),
            pages,
            gap,
            clusters,
            skipped,
        })
    }

    fn extract_pages(&self, keyword: &str, candidates: &[CandidateResult]) -> (Vec<PageRecord>, Vec<SkippedCandidate>) {
        let extractor = PageExtractor::new(self.fetcher.as_ref(), &self.features, &self.options);
        let mut pages: Vec<PageRecord> = Vec::new();
        let mut skipped = Vec::new();

        for candidate in candidates {
            if pages.len() >= self.options.target_pages {
                break;
            }
            match extractor.extract(candidate, keyword, pages.len() + 1) {
                Ok(record) => {
                    tracing::info!(url = %record.url, position = record.position, "page analysed");
                    pages.push(record);
                }
                Err(reason) => {
                    tracing::debug!(url = %candidate.url, rank = candidate.rank, %reason, "skipping candidate");
                    skipped.push(SkippedCandidate {
                        url: candidate.url.clone(),
                        rank: candidate.rank,
                        reason,
                    });
                }
            }
        }
        (pages, skipped)
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer").field("options", &self.options).finish_non_exhaustive()
    }
}
