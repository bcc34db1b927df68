//! Configuration options for an analysis run.
//!
//! The `Options` struct holds every filter list, threshold and tuning knob
//! the pipeline reads. It is built once, validated, and then shared
//! read-only by the candidate filter, extractor, feature computer,
//! aggregator and clusterer.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Weights for the heuristic domain-authority proxy.
///
/// These are tuning defaults for a coarse approximation, not measured values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthorityWeights {
    /// Starting score for every host. Default: `50`
    pub base: i32,
    /// Bonus for `.edu` hosts. Default: `20`
    pub edu_bonus: i32,
    /// Bonus for `.gov` hosts. Default: `25`
    pub gov_bonus: i32,
    /// Bonus for `.org` hosts. Default: `10`
    pub org_bonus: i32,
    /// Penalty when the host has more than one dot. Default: `10`
    pub subdomain_penalty: i32,
    /// Bonus for hosts shorter than `short_host_len`. Default: `5`
    pub short_host_bonus: i32,
    /// Length under which a host counts as short. Default: `15`
    pub short_host_len: usize,
}

impl Default for AuthorityWeights {
    fn default() -> Self {
        Self {
            base: 50,
            edu_bonus: 20,
            gov_bonus: 25,
            org_bonus: 10,
            subdomain_penalty: 10,
            short_host_bonus: 5,
            short_host_len: 15,
        }
    }
}

/// Topic clustering parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Minimum number of pages before clustering is attempted. Default: `3`
    pub min_pages: usize,
    /// Upper bound on k; the effective k is `min(max_clusters, pages)`. Default: `3`
    pub max_clusters: usize,
    /// Vocabulary size, chosen by corpus term frequency. Default: `50`
    pub max_features: usize,
    /// Body tokens appended to each page's headings. Default: `100`
    pub body_tokens: usize,
    /// Seed for centroid initialisation. Default: `42`
    pub seed: u64,
    /// Independent k-means++ restarts; the lowest inertia wins. Default: `10`
    pub restarts: usize,
    /// Lloyd iterations per restart. Default: `300`
    pub max_iterations: usize,
    /// Centroid shift below which a restart is considered converged. Default: `1e-4`
    pub tolerance: f64,
    /// Number of centroid terms reported per cluster. Default: `5`
    pub top_terms: usize,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            min_pages: 3,
            max_clusters: 3,
            max_features: 50,
            body_tokens: 100,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            top_terms: 5,
        }
    }
}

/// Search results API parameters.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerpOptions {
    /// Endpoint for the organic results call.
    ///
    /// Default: `https://google.serper.dev/search`
    pub endpoint: String,
    /// API key. The CLI fills this from `SERPER_API_KEY`. Default: empty
    pub api_key: String,
    /// Country code sent as `gl`. Default: `es`
    pub country: String,
    /// Interface language sent as `hl`. Default: `es`
    pub language: String,
    /// Hard cap on results requested in one call. Default: `100`
    pub max_results: usize,
}

impl Default for SerpOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://google.serper.dev/search".to_string(),
            api_key: String::new(),
            country: "es".to_string(),
            language: "es".to_string(),
            max_results: 100,
        }
    }
}

// Keep the key out of debug output and logs.
impl std::fmt::Debug for SerpOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpOptions")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("country", &self.country)
            .field("language", &self.language)
            .field("max_results", &self.max_results)
            .finish()
    }
}

/// Configuration options for an analysis run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the standard settings.
///
/// # Example
///
/// ```rust
/// use serp_xray::Options;
///
/// let options = Options {
///     target_pages: 8,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Number of successfully extracted pages a run aims for.
    ///
    /// Default: `5`
    pub target_pages: usize,

    /// Extra results requested on top of `target_pages` to absorb
    /// filtered and failing candidates.
    ///
    /// Default: `40`
    pub candidate_buffer: usize,

    /// Host substrings whose results are never analysed (social networks,
    /// marketplaces, video sites).
    pub excluded_domains: Vec<String>,

    /// Case-insensitive substrings that disqualify an H2 heading.
    pub heading_blacklist: Vec<String>,

    /// Case-insensitive substrings that disqualify a FAQ candidate.
    pub faq_blacklist: Vec<String>,

    /// Tokens dropped from word statistics and from the TF-IDF vocabulary.
    pub stopwords: Vec<String>,

    /// Capitalised function words that are never reported as entities.
    pub entity_stopwords: Vec<String>,

    /// Lexicon signalling buying intent.
    pub transactional_terms: Vec<String>,

    /// Lexicon signalling research intent.
    pub informational_terms: Vec<String>,

    /// Interrogatives that can open a FAQ candidate in running text.
    pub question_words: Vec<String>,

    /// Per-request timeout in seconds.
    ///
    /// Default: `12`
    pub fetch_timeout_secs: u64,

    /// User-Agent sent on page fetches.
    pub user_agent: String,

    /// Skip TLS certificate verification on page fetches.
    ///
    /// Default: `true`
    pub accept_invalid_certs: bool,

    /// Minimum main-text length (characters) for a page to count.
    ///
    /// Default: `100`
    pub min_content_chars: usize,

    /// Minimum `<title>` length (characters).
    ///
    /// Default: `3`
    pub min_title_chars: usize,

    /// Minimum trimmed H2 length (characters).
    ///
    /// Default: `5`
    pub min_heading_chars: usize,

    /// Number of H3 headings kept per page.
    ///
    /// Default: `10`
    pub max_h3: usize,

    /// Shortest FAQ candidate kept (characters).
    ///
    /// Default: `15`
    pub faq_min_chars: usize,

    /// Longest FAQ candidate kept (characters).
    ///
    /// Default: `150`
    pub faq_max_chars: usize,

    /// FAQ candidates kept per page.
    ///
    /// Default: `5`
    pub max_faqs: usize,

    /// Entities kept per page.
    ///
    /// Default: `10`
    pub max_entities: usize,

    /// Length of the stored content sample (characters).
    ///
    /// Default: `1000`
    pub content_sample_chars: usize,

    /// Number of secondary keywords in the gap report.
    ///
    /// Default: `30`
    pub secondary_keyword_limit: usize,

    /// Share of pages an H2 must appear on to be critical. Inclusive.
    ///
    /// Default: `0.5`
    pub critical_heading_ratio: f64,

    /// Number of shared FAQ candidates in the gap report.
    ///
    /// Default: `10`
    pub common_faq_limit: usize,

    /// Number of bigrams in the gap report.
    ///
    /// Default: `12`
    pub bigram_limit: usize,

    /// Domain-authority heuristic weights.
    pub authority: AuthorityWeights,

    /// Topic clustering parameters.
    pub cluster: ClusterOptions,

    /// Search results API parameters.
    pub serp: SerpOptions,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target_pages: 5,
            candidate_buffer: 40,
            excluded_domains: strings(&[
                "youtube.com", "facebook.com", "instagram.com", "twitter.com",
                "tiktok.com", "pinterest", "linkedin", "amazon", "ebay", "aliexpress",
                "mercadolibre", "wallapop", "milanuncios", "pccomponentes", "mediamarkt",
            ]),
            heading_blacklist: strings(&[
                "suscríbete", "newsletter", "contacto", "ayuda", "política", "privacidad",
                "cookies", "derechos", "copyright", "menú", "buscar", "categorías",
                "enlaces", "siguenos", "redes", "login", "registro", "carrito", "cesta",
                "productos relacionados", "te puede interesar", "deja un comentario",
                "subscribe", "contact us", "privacy", "related posts", "leave a comment",
                "follow us", "sign up",
            ]),
            faq_blacklist: strings(&[
                "cookie", "política", "privacidad", "aceptar", "configurar", "derechos",
                "boletín", "suscripción", "créditos", "copyright", "iniciar sesión",
                "privacy", "accept", "subscribe", "sign in",
            ]),
            stopwords: strings(&[
                "de", "la", "que", "el", "en", "y", "a", "los", "se", "del", "las", "un",
                "por", "con", "no", "una", "su", "para", "es", "al", "lo", "como", "mas",
                "más", "o", "pero", "sus", "le", "ha", "me", "si", "sin", "sobre", "este",
                "ya", "todo", "esta", "entre", "cuando", "muy", "años", "ser", "nos",
                "the", "and", "for", "with", "that", "this", "are", "from", "you", "your",
                "was", "but", "not", "have", "has", "can", "all", "our", "they", "their",
            ]),
            entity_stopwords: strings(&["el", "la", "los", "las", "the", "this", "that"]),
            transactional_terms: strings(&[
                "precio", "comprar", "venta", "carrito", "oferta", "barato", "tienda",
                "envío", "stock", "€", "$", "price", "buy", "cart", "discount", "shipping",
            ]),
            informational_terms: strings(&[
                "guía", "tutorial", "opinión", "review", "qué es", "cómo", "cuándo",
                "consejos", "mejores", "comparativa", "guide", "how to", "what is", "tips",
            ]),
            question_words: strings(&[
                "qué", "cómo", "cuándo", "dónde", "por qué", "cuánto",
                "what", "how much", "how", "when", "where", "why",
            ]),
            fetch_timeout_secs: 12,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            accept_invalid_certs: true,
            min_content_chars: 100,
            min_title_chars: 3,
            min_heading_chars: 5,
            max_h3: 10,
            faq_min_chars: 15,
            faq_max_chars: 150,
            max_faqs: 5,
            max_entities: 10,
            content_sample_chars: 1000,
            secondary_keyword_limit: 30,
            critical_heading_ratio: 0.5,
            common_faq_limit: 10,
            bigram_limit: 12,
            authority: AuthorityWeights::default(),
            cluster: ClusterOptions::default(),
            serp: SerpOptions::default(),
        }
    }
}

impl Options {
    /// Number of raw results to request from the search API.
    #[must_use]
    pub fn candidate_request_size(&self) -> usize {
        (self.target_pages + self.candidate_buffer).min(self.serp.max_results)
    }

    /// Parse options from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self =
            toml::from_str(source).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Validates these options, returning an error for values no run can use.
    pub fn validate(&self) -> Result<()> {
        if self.target_pages == 0 {
            return Err(Error::Config("target_pages must be greater than 0".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(Error::Config("fetch_timeout_secs must be greater than 0".into()));
        }
        if !(self.critical_heading_ratio > 0.0 && self.critical_heading_ratio <= 1.0) {
            return Err(Error::Config("critical_heading_ratio must be in (0, 1]".into()));
        }
        if self.faq_min_chars > self.faq_max_chars {
            return Err(Error::Config("faq_min_chars must be <= faq_max_chars".into()));
        }
        if self.cluster.restarts == 0 {
            return Err(Error::Config("cluster.restarts must be greater than 0".into()));
        }
        if self.cluster.max_clusters == 0 {
            return Err(Error::Config("cluster.max_clusters must be greater than 0".into()));
        }
        if self.serp.max_results == 0 {
            return Err(Error::Config("serp.max_results must be greater than 0".into()));
        }
        Ok(())
    }
}
