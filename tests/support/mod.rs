//! In-process fakes and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serp_xray::fetch::{Fetch, FetchError, FetchProfile, FetchResponse};
use serp_xray::serp::SerpProvider;
use serp_xray::{
    CandidateResult, LinkStats, MediaStats, PageRecord, Readability, Result, SearchIntent,
};

/// Serves canned responses by URL; unknown URLs fail at the transport level.
#[derive(Clone, Default)]
pub struct FakeFetch {
    responses: Rc<RefCell<HashMap<String, FetchResponse>>>,
    requested: Rc<RefCell<Vec<(String, FetchProfile)>>>,
}

impl FakeFetch {
    pub fn page(self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), FetchResponse { status, body: body.to_string() });
        self
    }

    /// Header profile of every fetch so far, in order.
    pub fn requested_profiles(&self) -> Vec<FetchProfile> {
        self.requested.borrow().iter().map(|(_, profile)| *profile).collect()
    }

    /// Every URL fetched so far, in order, with repeats.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.borrow().iter().map(|(url, _)| url.clone()).collect()
    }
}

impl Fetch for FakeFetch {
    fn fetch(&self, url: &str, profile: FetchProfile) -> std::result::Result<FetchResponse, FetchError> {
        self.requested.borrow_mut().push((url.to_string(), profile));
        self.responses
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("no fixture for {url}")))
    }
}

/// Returns a fixed result list and records the requested counts.
#[derive(Clone, Default)]
pub struct FakeSerp {
    results: Vec<CandidateResult>,
    counts: Rc<RefCell<Vec<usize>>>,
}

impl FakeSerp {
    pub fn new(urls: &[&str]) -> Self {
        let results = urls
            .iter()
            .enumerate()
            .map(|(i, url)| CandidateResult {
                url: (*url).to_string(),
                title: format!("Result {}", i + 1),
                snippet: format!("Snippet for result {}", i + 1),
                rank: i + 1,
            })
            .collect();
        Self { results, counts: Rc::default() }
    }

    pub fn requested_counts(&self) -> Vec<usize> {
        self.counts.borrow().clone()
    }
}

impl SerpProvider for FakeSerp {
    fn search(&self, _query: &str, count: usize) -> Result<Vec<CandidateResult>> {
        self.counts.borrow_mut().push(count);
        Ok(self.results.iter().take(count).cloned().collect())
    }
}

/// A static article page with the given title, H2 headings and body paragraph.
pub fn article_html(title: &str, headings: &[&str], paragraph: &str) -> String {
    let sections: String = headings
        .iter()
        .map(|h| format!("<h2>{h}</h2><p>{paragraph}</p><p>{paragraph}</p>"))
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title>\
         <meta name=\"description\" content=\"{title} overview\"></head>\
         <body><header>Site header</header><nav><a href=\"/\">Home</a></nav>\
         <article><h1>{title}</h1><p>{paragraph}</p>{sections}</article>\
         <footer>Footer text</footer></body></html>"
    )
}

/// A page record with the given URL, H2 headings and tokens; everything else neutral.
pub fn record(url: &str, h2: &[&str], tokens: &[&str]) -> PageRecord {
    let raw_text = tokens.join(" ");
    PageRecord {
        position: 1,
        rank: 1,
        url: url.to_string(),
        title: format!("Title of {url}"),
        meta_description: String::new(),
        published: None,
        h1: Vec::new(),
        h2: h2.iter().map(|h| (*h).to_string()).collect(),
        h3: Vec::new(),
        word_count: tokens.len(),
        keyword_mentions: 0,
        word_tokens: tokens.iter().map(|t| (*t).to_string()).collect(),
        content_sample: raw_text.clone(),
        raw_text,
        links: LinkStats::default(),
        media: MediaStats::default(),
        schema_types: Vec::new(),
        readability: Readability::not_available(),
        domain_authority_proxy: 50,
        search_intent: SearchIntent::Mixed,
        entities: Vec::new(),
        faq_candidates: Vec::new(),
        has_toc: false,
    }
}
