//! Search results retrieval.
//!
//! [`SerpProvider`] is the seam the pipeline consumes: query in, ordered
//! organic results out. [`SerperClient`] implements it against the
//! Serper.dev JSON API with a blocking `reqwest` client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::SerpOptions;
use crate::result::CandidateResult;

/// Source of organic search results.
pub trait SerpProvider {
    /// Up to `count` organic results for `query`, in ranking order.
    fn search(&self, query: &str, count: usize) -> Result<Vec<CandidateResult>>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
    gl: &'a str,
    hl: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicEntry>,
}

#[derive(Debug, Deserialize)]
struct OrganicEntry {
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

/// Map the `organic` array of a Serper response to candidates.
///
/// Rank is the 1-based position in the raw array; entries without a link
/// are dropped but still consume their rank.
pub fn parse_organic(payload: &str) -> Result<Vec<CandidateResult>> {
    let response: SearchResponse = serde_json::from_str(payload)
        .map_err(|e| Error::Retrieval(format!("unexpected response shape: {e}")))?;

    Ok(response
        .organic
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let url = entry.link.filter(|l| !l.trim().is_empty())?;
            Some(CandidateResult {
                url,
                title: entry.title,
                snippet: entry.snippet,
                rank: i + 1,
            })
        })
        .collect())
}

/// [`SerpProvider`] backed by the Serper.dev search API.
#[derive(Debug, Clone)]
pub struct SerperClient {
    client: Client,
    options: SerpOptions,
}

impl SerperClient {
    /// Build a client. Fails when no API key is configured.
    pub fn new(options: SerpOptions, timeout: Duration) -> Result<Self> {
        if options.api_key.trim().is_empty() {
            return Err(Error::Config("missing search API key".into()));
        }
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(options.api_key.trim())
            .map_err(|_| Error::Config("search API key is not a valid header value".into()))?;
        key.set_sensitive(true);
        headers.insert("X-API-KEY", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, options })
    }
}

impl SerpProvider for SerperClient {
    fn search(&self, query: &str, count: usize) -> Result<Vec<CandidateResult>> {
        let request = SearchRequest {
            q: query,
            num: count.min(self.options.max_results),
            gl: &self.options.country,
            hl: &self.options.language,
        };
        tracing::info!(query, num = request.num, "requesting organic results");

        let response = self
            .client
            .post(&self.options.endpoint)
            .json(&request)
            .send()
            .map_err(|e| Error::Retrieval(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Retrieval(format!("search API answered {status}")));
        }
        let body = response.text().map_err(|e| Error::Retrieval(e.to_string()))?;
        parse_organic(&body)
    }
}
