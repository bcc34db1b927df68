#![allow(clippy::expect_used)]

mod support;

use serp_xray::extractor::{PageExtractor, BLOCKED_STATUSES};
use serp_xray::features::FeatureComputer;
use serp_xray::fetch::FetchProfile;
use serp_xray::{AnalysisOutcome, Analyzer, CandidateResult, ExtractionFailure, Options};
use support::{article_html, FakeFetch, FakeSerp};

const PARAGRAPH: &str = "Competitor pages on this topic explain pricing, onboarding and support in plain language, \
                         with concrete examples for small teams that are evaluating several tools at once.";

fn candidate(url: &str) -> CandidateResult {
    CandidateResult {
        url: url.to_string(),
        title: "Result".into(),
        snippet: "Result snippet".into(),
        rank: 1,
    }
}

#[test]
fn http_429_is_reported_as_blocked() {
    let url = "https://limited.example.com/";
    let fetch = FakeFetch::default().page(url, 429, "Too Many Requests");
    let options = Options::default();
    let features = FeatureComputer::new(&options);
    let extractor = PageExtractor::new(&fetch, &features, &options);

    let err = extractor.extract(&candidate(url), "pricing", 1).expect_err("blocked page");
    assert_eq!(err, ExtractionFailure::Blocked(429));
    assert_eq!(err.to_string(), "blocked (HTTP 429)");
}

#[test]
fn every_blocking_status_is_terminal() {
    for status in BLOCKED_STATUSES {
        let url = "https://blocked.example.com/";
        let fetch = FakeFetch::default().page(url, status, "");
        let options = Options::default();
        let features = FeatureComputer::new(&options);
        let extractor = PageExtractor::new(&fetch, &features, &options);
        assert_eq!(extractor.fetch_page(url).expect_err("blocked"), ExtractionFailure::Blocked(status));
        // one attempt per stage, no retries
        assert_eq!(fetch.requested_urls().len(), 2);
    }
}

#[test]
fn blocked_page_does_not_count_toward_target() {
    let blocked = "https://blocked.example.com/";
    let ok_urls = ["https://one.example.com/", "https://two.example.com/"];
    let mut fetch = FakeFetch::default().page(blocked, 429, "");
    for url in ok_urls {
        fetch = fetch.page(url, 200, &article_html("Pricing guide", &["Pricing Plans"], PARAGRAPH));
    }
    let serp = FakeSerp::new(&[blocked, ok_urls[0], ok_urls[1]]);
    let options = Options { target_pages: 2, ..Options::default() };
    let analyzer = Analyzer::new(options, Box::new(serp), Box::new(fetch)).expect("valid options");

    let AnalysisOutcome::Complete(report) = analyzer.run("pricing") else {
        panic!("expected a complete report");
    };
    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, ok_urls);
    assert_eq!(report.pages[0].position, 1);
    assert_eq!(report.pages[1].position, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].url, blocked);
    assert_eq!(report.skipped[0].reason, ExtractionFailure::Blocked(429));
}

#[test]
fn thin_page_is_insufficient_content() {
    let url = "https://thin.example.com/";
    let fetch = FakeFetch::default().page(url, 200, "<html><head><title>Thin page</title></head><body><p>Hi.</p></body></html>");
    let options = Options::default();
    let features = FeatureComputer::new(&options);
    let extractor = PageExtractor::new(&fetch, &features, &options);
    assert_eq!(extractor.fetch_page(url).expect_err("thin"), ExtractionFailure::InsufficientContent);
}

#[test]
fn untitled_page_is_title_missing() {
    let url = "https://untitled.example.com/";
    let body = format!("<html><body><article><p>{PARAGRAPH}</p><p>{PARAGRAPH}</p></article></body></html>");
    let fetch = FakeFetch::default().page(url, 200, &body);
    let options = Options::default();
    let features = FeatureComputer::new(&options);
    let extractor = PageExtractor::new(&fetch, &features, &options);
    assert_eq!(extractor.fetch_page(url).expect_err("untitled"), ExtractionFailure::TitleMissing);
}

#[test]
fn unreachable_page_is_generic_failure() {
    let fetch = FakeFetch::default();
    let options = Options::default();
    let features = FeatureComputer::new(&options);
    let extractor = PageExtractor::new(&fetch, &features, &options);
    let err = extractor.fetch_page("https://down.example.com/").expect_err("no fixture");
    assert!(matches!(err, ExtractionFailure::Generic(ref msg) if msg.contains("no fixture")));
}

#[test]
fn readability_stage_tried_first() {
    let url = "https://article.example.com/";
    let fetch = FakeFetch::default().page(url, 200, &article_html("Pricing guide", &["Pricing Plans", "Support"], PARAGRAPH));
    let options = Options::default();
    let features = FeatureComputer::new(&options);
    let extractor = PageExtractor::new(&fetch, &features, &options);

    let page = extractor.fetch_page(url).expect("page extracted");
    assert!(page.main_text.contains("concrete examples"));
    assert_eq!(page.title, "Pricing guide");
    assert_eq!(fetch.requested_urls()[0], url);
    assert_eq!(fetch.requested_profiles()[0], FetchProfile::Plain);
}

#[test]
fn structure_comes_from_full_document() {
    let url = "https://structure.example.com/";
    let html = article_html("Pricing guide", &["Pricing Plans", "Support"], PARAGRAPH);
    let fetch = FakeFetch::default().page(url, 200, &html);
    let options = Options::default();
    let features = FeatureComputer::new(&options);
    let extractor = PageExtractor::new(&fetch, &features, &options);

    let record = extractor.extract(&candidate(url), "pricing", 3).expect("record");
    assert_eq!(record.position, 3);
    assert_eq!(record.meta_description, "Pricing guide overview");
    assert_eq!(record.h1, vec!["Pricing guide"]);
    assert_eq!(record.h2, vec!["Pricing Plans", "Support"]);
    assert_eq!(record.links.internal_count, 1);
}
