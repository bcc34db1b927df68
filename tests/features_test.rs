#![allow(clippy::expect_used)]

use dom_query::Document;
use serp_xray::features::{
    keyword_mentions, AuthorityEstimator, FeatureComputer, HostAuthorityHeuristic, PageContext, PageSource,
};
use serp_xray::{Options, ReadabilityLevel, SearchIntent};

const HTML: &str = r#"<!DOCTYPE html><html><head>
    <title>How to price a SaaS product</title>
    <meta property="article:published_time" content="2024-03-05T10:00:00Z">
    <script type="application/ld+json">[{"@type": "Article"}, {"@type": ["FAQPage", "Article"]}]</script>
    </head><body>
    <nav><a href="/">Home</a><a href="/blog">Blog</a></nav>
    <div class="table-of-contents">Contents</div>
    <h1>How to price a SaaS product</h1>
    <h2>Pricing Plans</h2><h2>Subscribe to our newsletter</h2><h2>FAQ</h2>
    <p>Body</p>
    <a href="https://partner.example.org/">Partner</a>
    <a href="https://ads.example.net/" rel="sponsored NoFollow">Ad</a>
    <img src="a.png" alt="pricing chart"><img src="b.png">
    <iframe src="https://video.example/embed"></iframe>
    </body></html>"#;

const TEXT: &str = "Pricing a product is hard. Stripe and Paddle publish guides on it. \
                    This guide compares three pricing plans with real numbers and tips for founders. \
                    How do you choose a pricing model for a new product?";

fn compute(computer: &FeatureComputer, doc: &Document) -> serp_xray::PageRecord {
    computer.compute(
        &PageSource {
            url: "https://www.saasguide.com/pricing",
            document: doc,
            main_text: TEXT,
            title: "How to price a SaaS product",
        },
        &PageContext { keyword: "pricing", snippet: "Snippet fallback", position: 2, rank: 7 },
    )
}

#[test]
fn keyword_mentions_are_case_insensitive_whole_words() {
    assert_eq!(keyword_mentions("SEO tools help with seo audits", "seo"), 2);
    assert_eq!(keyword_mentions("seoul is not a mention", "seo"), 0);
    assert_eq!(keyword_mentions("anything", "   "), 0);
}

#[test]
fn authority_proxy_examples() {
    let authority = HostAuthorityHeuristic::default();
    assert_eq!(authority.estimate("usa.gov"), 80);
    assert_eq!(authority.estimate("blog.marketing.bigcompany.com"), 40);
}

#[test]
fn page_record_from_full_document() {
    let computer = FeatureComputer::new(&Options::default());
    let doc = Document::from(HTML);
    let record = compute(&computer, &doc);

    assert_eq!(record.position, 2);
    assert_eq!(record.rank, 7);
    assert_eq!(record.meta_description, "Snippet fallback");
    assert_eq!(record.published.map(|d| d.to_string()).as_deref(), Some("2024-03-05"));
    assert_eq!(record.h2, vec!["Pricing Plans"]);
    assert_eq!(record.links.internal_count, 2);
    assert_eq!(record.links.external_count, 2);
    assert_eq!(record.links.external_dofollow_count, 1);
    assert_eq!(record.media.image_count, 2);
    assert_eq!(record.media.image_with_alt_count, 1);
    assert_eq!(record.media.video_count, 1);
    assert_eq!(record.schema_types, vec!["Article", "FAQPage"]);
    assert!(record.has_toc);
    assert_eq!(record.keyword_mentions, 3);
    assert_eq!(record.search_intent, SearchIntent::Informational);
    assert!(record.entities.contains(&"Stripe".to_string()));
    assert_eq!(record.faq_candidates, vec!["How do you choose a pricing model for a new product?"]);
    assert!(record.word_tokens.iter().all(|t| t.chars().count() > 2));
    assert!(!record.word_tokens.contains(&"the".to_string()));
    assert_ne!(record.readability.level, ReadabilityLevel::NotAvailable);
}

#[test]
fn features_are_idempotent() {
    let computer = FeatureComputer::new(&Options::default());
    let doc = Document::from(HTML);
    let first = compute(&computer, &doc);
    let second = compute(&computer, &doc);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}
