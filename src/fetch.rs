//! HTTP fetch collaborator.
//!
//! The extractor only sees the [`Fetch`] trait: a blocking, timeout-bounded
//! GET that yields a status code and a decoded body. [`HttpFetcher`] is the
//! production implementation on a blocking `reqwest` client. No retries.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};

use crate::encoding::decode_body;
use crate::error::{Error, Result};
use crate::options::Options;

/// Header set used for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchProfile {
    /// Library defaults; used by the readability stage.
    Plain,
    /// Conventional desktop-browser headers; used by the raw fallback stage.
    Browser,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body decoded to UTF-8.
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failures. A non-2xx status is not one of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request exceeded its timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS, redirect or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Blocking page fetch.
pub trait Fetch {
    /// GET `url` with the given header profile.
    fn fetch(&self, url: &str, profile: FetchProfile) -> std::result::Result<FetchResponse, FetchError>;
}

const PLAIN_USER_AGENT: &str = concat!("serp-xray/", env!("CARGO_PKG_VERSION"));
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "es-ES,es;q=0.9,en;q=0.8";

/// [`Fetch`] over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    browser_headers: HeaderMap,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from run options.
    ///
    /// Honours `fetch_timeout_secs`, `user_agent` and `accept_invalid_certs`.
    pub fn new(options: &Options) -> Result<Self> {
        let timeout = Duration::from_secs(options.fetch_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        let mut browser_headers = HeaderMap::new();
        browser_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent)
                .map_err(|e| Error::Config(format!("invalid user_agent: {e}")))?,
        );
        browser_headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        browser_headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));

        Ok(Self { client, browser_headers, timeout })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, profile: FetchProfile) -> std::result::Result<FetchResponse, FetchError> {
        let request = match profile {
            FetchProfile::Plain => self.client.get(url).header(USER_AGENT, PLAIN_USER_AGENT),
            FetchProfile::Browser => self.client.get(url).headers(self.browser_headers.clone()),
        };

        let response = request.send().map_err(|e| self.classify(&e))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().map_err(|e| self.classify(&e))?;

        tracing::trace!(url, status, bytes = bytes.len(), ?profile, "fetched");
        Ok(FetchResponse {
            status,
            body: decode_body(&bytes, content_type.as_deref()),
        })
    }
}

impl HttpFetcher {
    fn classify(&self, err: &reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
