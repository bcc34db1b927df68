//! Per-page feature computation.
//!
//! [`FeatureComputer`] turns one extracted page (parsed document, main text,
//! title) into a [`PageRecord`]. Every sub-computation is a pure function of
//! its inputs and the run [`Options`]: computing the same page twice yields
//! identical records.
//!
//! # Module Structure
//!
//! - `headings`: heading cleanup against length and blacklist rules
//! - `text`: tokenisation, keyword mentions, readability
//! - `links`: internal/external link classification, media counts
//! - `schema`: JSON-LD `@type` detection
//! - `questions`: FAQ candidate extraction
//! - `heuristics`: authority, intent and entity approximations
//! - `page_meta`: description, publication date, table of contents

pub mod headings;
pub mod heuristics;
pub mod links;
pub mod page_meta;
pub mod questions;
pub mod schema;
pub mod text;

pub use headings::clean_headings;
pub use heuristics::{
    AuthorityEstimator, CapitalizedEntityExtractor, EntityExtractor, Heuristics, HostAuthorityHeuristic,
    IntentClassifier, LexiconIntentClassifier,
};
pub use questions::FaqExtractor;
pub use text::{keyword_mentions, readability, tokenize};

use crate::dom::Document;
use crate::options::Options;
use crate::result::PageRecord;
use crate::url_utils::host_of;

/// One extracted page, as handed from the extractor to feature computation.
#[derive(Clone, Copy)]
pub struct PageSource<'a> {
    /// Source URL.
    pub url: &'a str,
    /// Document used for structural parsing.
    pub document: &'a Document,
    /// Main text.
    pub main_text: &'a str,
    /// Document title.
    pub title: &'a str,
}

/// Run and candidate context for one page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Target query.
    pub keyword: &'a str,
    /// Search snippet, used when the page has no meta description.
    pub snippet: &'a str,
    /// 1-based position among valid pages.
    pub position: usize,
    /// Raw search rank.
    pub rank: usize,
}

/// Computes every per-page signal.
#[derive(Debug)]
pub struct FeatureComputer {
    heading_blacklist: Vec<String>,
    stopwords: Vec<String>,
    min_heading_chars: usize,
    max_h3: usize,
    content_sample_chars: usize,
    faqs: FaqExtractor,
    heuristics: Heuristics,
}

impl FeatureComputer {
    /// Feature computer with the default heuristics.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self::with_heuristics(options, Heuristics::from_options(options))
    }

    /// Feature computer with caller-supplied heuristics.
    #[must_use]
    pub fn with_heuristics(options: &Options, heuristics: Heuristics) -> Self {
        Self {
            heading_blacklist: options.heading_blacklist.clone(),
            stopwords: options.stopwords.iter().map(|s| s.to_lowercase()).collect(),
            min_heading_chars: options.min_heading_chars,
            max_h3: options.max_h3,
            content_sample_chars: options.content_sample_chars,
            faqs: FaqExtractor::new(options),
            heuristics,
        }
    }

    /// Stopwords in effect, lower-cased.
    #[must_use]
    pub fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    /// Build the page record for one extracted page.
    #[must_use]
    pub fn compute(&self, page: &PageSource<'_>, ctx: &PageContext<'_>) -> PageRecord {
        let doc = page.document;
        let text = page.main_text;
        let host = host_of(page.url);

        let h2 = clean_headings(
            &headings::heading_texts(doc, "h2"),
            &self.heading_blacklist,
            self.min_heading_chars,
        );
        let mut h3 = headings::heading_texts(doc, "h3");
        h3.truncate(self.max_h3);

        PageRecord {
            position: ctx.position,
            rank: ctx.rank,
            url: page.url.to_string(),
            title: page.title.to_string(),
            meta_description: page_meta::meta_description(doc, ctx.snippet),
            published: page_meta::published_date(doc),
            h1: headings::heading_texts(doc, "h1"),
            h2,
            h3,
            word_count: text::word_count(text),
            keyword_mentions: keyword_mentions(text, ctx.keyword),
            word_tokens: tokenize(text, &self.stopwords),
            raw_text: text.to_string(),
            content_sample: text::content_sample(text, self.content_sample_chars),
            links: links::link_stats(doc, &host),
            media: links::media_stats(doc),
            schema_types: schema::schema_types(doc),
            readability: readability(text),
            domain_authority_proxy: self.heuristics.authority.estimate(&host),
            search_intent: self.heuristics.intent.classify(page.title, text),
            entities: self.heuristics.entities.extract(text),
            faq_candidates: self.faqs.extract(text),
            has_toc: page_meta::has_toc(doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::SearchIntent;

    const HTML: &str = r#"<html><head>
        <title>Guía de SEO local</title>
        <meta name="description" content="Todo sobre SEO local">
        <script type="application/ld+json">{"@type": "Article"}</script>
        </head><body>
        <h1>SEO local</h1>
        <h2>Pricing Plans</h2><h2>FAQ</h2><h2>Suscríbete a la newsletter</h2>
        <h3>Paso uno</h3>
        <a href="/contacto">c</a><a href="https://otro.com">o</a>
        <img src="a.png" alt="mapa">
        <div class="toc">índice</div>
        </body></html>"#;

    const TEXT: &str = "El SEO local ayuda a negocios de Madrid. ¿Cómo mejorar el SEO local en Google? \
                        Esta guía explica consejos prácticos para seo local.";

    fn compute_once(computer: &FeatureComputer, doc: &Document) -> PageRecord {
        let page = PageSource {
            url: "https://www.ejemplo.es/seo-local",
            document: doc,
            main_text: TEXT,
            title: "Guía de SEO local",
        };
        let ctx = PageContext { keyword: "seo", snippet: "snippet", position: 1, rank: 4 };
        computer.compute(&page, &ctx)
    }

    #[test]
    fn computes_all_fields() {
        let computer = FeatureComputer::new(&Options::default());
        let doc = Document::from(HTML);
        let record = compute_once(&computer, &doc);

        assert_eq!(record.position, 1);
        assert_eq!(record.rank, 4);
        assert_eq!(record.meta_description, "Todo sobre SEO local");
        assert_eq!(record.h1, vec!["SEO local"]);
        assert_eq!(record.h2, vec!["Pricing Plans"]);
        assert_eq!(record.h3, vec!["Paso uno"]);
        assert_eq!(record.keyword_mentions, 3);
        assert_eq!(record.links.internal_count, 1);
        assert_eq!(record.links.external_count, 1);
        assert_eq!(record.media.image_with_alt_count, 1);
        assert_eq!(record.schema_types, vec!["Article"]);
        assert_eq!(record.search_intent, SearchIntent::Informational);
        assert_eq!(record.faq_candidates, vec!["¿cómo mejorar el seo local en google?"]);
        assert!(record.entities.contains(&"Madrid".to_string()));
        assert!(record.has_toc);
        assert!(record.word_tokens.iter().all(|t| t.chars().count() > 2));
        assert!(!record.word_tokens.contains(&"para".to_string()));
        // www.ejemplo.es: two dots, 14 characters
        assert_eq!(record.domain_authority_proxy, 45);
    }

    #[test]
    fn computing_twice_is_identical() {
        let computer = FeatureComputer::new(&Options::default());
        let doc = Document::from(HTML);
        let first = compute_once(&computer, &doc);
        let second = compute_once(&computer, &doc);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    struct FixedAuthority;

    impl AuthorityEstimator for FixedAuthority {
        fn estimate(&self, _host: &str) -> u8 {
            99
        }
    }

    #[test]
    fn heuristics_are_swappable() {
        let options = Options::default();
        let heuristics = Heuristics { authority: Box::new(FixedAuthority), ..Heuristics::from_options(&options) };
        let computer = FeatureComputer::with_heuristics(&options, heuristics);
        let record = compute_once(&computer, &Document::from(HTML));
        assert_eq!(record.domain_authority_proxy, 99);
    }
}
