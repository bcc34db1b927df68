//! Page extraction.
//!
//! Turns one candidate URL into a [`PageRecord`] or a typed
//! [`ExtractionFailure`], using a two-stage fallback chain:
//!
//! 1. Readability stage: plain fetch, boilerplate removal via `dom_smoothie`.
//!    Only 2xx responses are considered.
//! 2. Raw stage, when stage 1 produced no text: browser-like fetch. A
//!    blocking status (403, 429, 503) fails the page; otherwise the visible
//!    text left after stripping non-content tags becomes the main text.
//!
//! The main text must reach `min_content_chars` and the document must carry
//! a title of at least `min_title_chars`. Structural features are then read
//! from the full fetched document.
//!
//! # Module Structure
//!
//! - `article`: readability stage (`dom_smoothie`, behind the `readability` feature)

pub mod article;

use std::panic::{self, AssertUnwindSafe};

use crate::dom::{self, Document};
use crate::error::ExtractionFailure;
use crate::features::{FeatureComputer, PageContext, PageSource};
use crate::fetch::{Fetch, FetchProfile};
use crate::options::Options;
use crate::result::{CandidateResult, PageRecord};

/// Status codes treated as a site refusing automated access.
pub const BLOCKED_STATUSES: [u16; 3] = [403, 429, 503];

/// Which stage produced a page's main text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    /// Boilerplate removal on a plain fetch.
    Readability,
    /// Visible text of a browser-like fetch.
    RawFallback,
}

/// A page that passed the content and title checks.
pub struct ExtractedPage {
    /// Source URL.
    pub url: String,
    /// Full fetched document.
    pub document: Document,
    /// Main text.
    pub main_text: String,
    /// Trimmed `<title>` text.
    pub title: String,
    /// Stage that produced `main_text`.
    pub stage: ExtractionStage,
}

impl ExtractedPage {
    /// Borrowed view for feature computation.
    #[must_use]
    pub fn source(&self) -> PageSource<'_> {
        PageSource {
            url: &self.url,
            document: &self.document,
            main_text: &self.main_text,
            title: &self.title,
        }
    }
}

impl std::fmt::Debug for ExtractedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractedPage")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("stage", &self.stage)
            .field("main_text_chars", &self.main_text.chars().count())
            .finish_non_exhaustive()
    }
}

/// Runs the fallback chain and feature computation for single URLs.
pub struct PageExtractor<'a> {
    fetcher: &'a dyn Fetch,
    features: &'a FeatureComputer,
    min_content_chars: usize,
    min_title_chars: usize,
}

impl<'a> PageExtractor<'a> {
    /// Build an extractor over a fetch collaborator.
    #[must_use]
    pub fn new(fetcher: &'a dyn Fetch, features: &'a FeatureComputer, options: &Options) -> Self {
        Self {
            fetcher,
            features,
            min_content_chars: options.min_content_chars,
            min_title_chars: options.min_title_chars,
        }
    }

    /// Extract `candidate` into a page record at the given valid-page position.
    ///
    /// Never panics: a panic inside parsing or feature computation is
    /// reported as [`ExtractionFailure::Generic`].
    pub fn extract(
        &self,
        candidate: &CandidateResult,
        keyword: &str,
        position: usize,
    ) -> Result<PageRecord, ExtractionFailure> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let page = self.fetch_page(&candidate.url)?;
            let ctx = PageContext {
                keyword,
                snippet: &candidate.snippet,
                position,
                rank: candidate.rank,
            };
            Ok(self.features.compute(&page.source(), &ctx))
        }));
        outcome.unwrap_or_else(|payload| Err(ExtractionFailure::Generic(panic_message(payload.as_ref()))))
    }

    /// Run the fallback chain and the content and title checks for `url`.
    pub fn fetch_page(&self, url: &str) -> Result<ExtractedPage, ExtractionFailure> {
        let (document, main_text, stage) = match self.readability_stage(url) {
            Some((document, text)) => (document, text, ExtractionStage::Readability),
            None => {
                let (document, text) = self.raw_stage(url)?;
                (document, text, ExtractionStage::RawFallback)
            }
        };

        if main_text.chars().count() < self.min_content_chars {
            return Err(ExtractionFailure::InsufficientContent);
        }
        let title = dom::title(&document)
            .filter(|t| t.chars().count() >= self.min_title_chars)
            .ok_or(ExtractionFailure::TitleMissing)?;

        Ok(ExtractedPage {
            url: url.to_string(),
            document,
            main_text,
            title,
            stage,
        })
    }

    fn readability_stage(&self, url: &str) -> Option<(Document, String)> {
        let response = match self.fetcher.fetch(url, FetchProfile::Plain) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "readability stage fetch failed");
                return None;
            }
        };
        if !response.is_success() {
            tracing::debug!(url, status = response.status, "readability stage got non-success status");
            return None;
        }
        let document = Document::from(response.body.as_str());
        let text = article::article_text(&document)?;
        Some((document, text))
    }

    fn raw_stage(&self, url: &str) -> Result<(Document, String), ExtractionFailure> {
        let response = self
            .fetcher
            .fetch(url, FetchProfile::Browser)
            .map_err(|e| ExtractionFailure::Generic(e.to_string()))?;
        if BLOCKED_STATUSES.contains(&response.status) {
            return Err(ExtractionFailure::Blocked(response.status));
        }

        let document = Document::from(response.body.as_str());
        // Strip a copy so the kept document still carries scripts, nav and JSON-LD.
        let stripped = dom::clone_document(&document);
        let text = dom::visible_text(&stripped);
        Ok((document, text))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panic: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panic: {msg}")
    } else {
        "panic during extraction".to_string()
    }
}
