//! Heuristic page scores.
//!
//! Domain authority, search intent and entity extraction are coarse
//! approximations. Each sits behind a small trait so a backlink index, a
//! trained classifier or an NER model can replace it without touching
//! aggregation or clustering. The defaults below are driven entirely by
//! [`Options`].

use std::collections::HashSet;

use crate::options::{AuthorityWeights, Options};
use crate::patterns::CAPITALIZED_SEQUENCE;
use crate::result::SearchIntent;

/// Scores a host on a 0-100 authority scale.
pub trait AuthorityEstimator: Send + Sync {
    /// Authority proxy for `host`, always within `[0, 100]`.
    fn estimate(&self, host: &str) -> u8;
}

/// Labels a page with a coarse search intent.
pub trait IntentClassifier: Send + Sync {
    /// Intent of a page given its title and main text.
    fn classify(&self, title: &str, text: &str) -> SearchIntent;
}

/// Pulls entity-like names out of text.
pub trait EntityExtractor: Send + Sync {
    /// Distinct entity names in order of appearance.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Authority from the top-level domain, sub-domain depth and host length.
#[derive(Debug, Clone, Default)]
pub struct HostAuthorityHeuristic {
    weights: AuthorityWeights,
}

impl HostAuthorityHeuristic {
    /// Build with the given weights.
    #[must_use]
    pub fn new(weights: AuthorityWeights) -> Self {
        Self { weights }
    }
}

impl AuthorityEstimator for HostAuthorityHeuristic {
    fn estimate(&self, host: &str) -> u8 {
        let w = &self.weights;
        let mut score = w.base;
        if host.ends_with(".edu") {
            score += w.edu_bonus;
        } else if host.ends_with(".gov") {
            score += w.gov_bonus;
        } else if host.ends_with(".org") {
            score += w.org_bonus;
        }
        if host.matches('.').count() > 1 {
            score -= w.subdomain_penalty;
        }
        if host.chars().count() < w.short_host_len {
            score += w.short_host_bonus;
        }
        u8::try_from(score.clamp(0, 100)).unwrap_or(0)
    }
}

/// Intent from lexicon hits in the title and body.
///
/// Each lexicon term scores once when it occurs anywhere in the lower-cased
/// title or text.
#[derive(Debug, Clone)]
pub struct LexiconIntentClassifier {
    transactional: Vec<String>,
    informational: Vec<String>,
}

impl LexiconIntentClassifier {
    /// Build from the two lexicons.
    #[must_use]
    pub fn new(transactional: &[String], informational: &[String]) -> Self {
        let lower = |terms: &[String]| terms.iter().map(|t| t.to_lowercase()).filter(|t| !t.is_empty()).collect();
        Self {
            transactional: lower(transactional),
            informational: lower(informational),
        }
    }

    fn hits(terms: &[String], title: &str, text: &str) -> usize {
        terms.iter().filter(|t| text.contains(t.as_str()) || title.contains(t.as_str())).count()
    }
}

impl IntentClassifier for LexiconIntentClassifier {
    fn classify(&self, title: &str, text: &str) -> SearchIntent {
        let title = title.to_lowercase();
        let text = text.to_lowercase();
        let transactional = Self::hits(&self.transactional, &title, &text);
        let informational = Self::hits(&self.informational, &title, &text);
        match transactional.cmp(&informational) {
            std::cmp::Ordering::Greater => SearchIntent::Transactional,
            std::cmp::Ordering::Less => SearchIntent::Informational,
            std::cmp::Ordering::Equal => SearchIntent::Mixed,
        }
    }
}

/// Entities as runs of capitalised words, minus capitalised function words.
#[derive(Debug, Clone)]
pub struct CapitalizedEntityExtractor {
    stopwords: HashSet<String>,
    limit: usize,
}

impl CapitalizedEntityExtractor {
    /// Build with a stopword list and a result cap.
    #[must_use]
    pub fn new(stopwords: &[String], limit: usize) -> Self {
        Self {
            stopwords: stopwords.iter().map(|s| s.to_lowercase()).collect(),
            limit,
        }
    }
}

impl EntityExtractor for CapitalizedEntityExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let mut entities: Vec<String> = Vec::new();
        for m in CAPITALIZED_SEQUENCE.find_iter(text) {
            if entities.len() == self.limit {
                break;
            }
            let name = m.as_str();
            if self.stopwords.contains(&name.to_lowercase()) || entities.iter().any(|e| e == name) {
                continue;
            }
            entities.push(name.to_string());
        }
        entities
    }
}

/// The three heuristic scorers used by the feature computer.
pub struct Heuristics {
    /// Domain-authority proxy.
    pub authority: Box<dyn AuthorityEstimator>,
    /// Search intent.
    pub intent: Box<dyn IntentClassifier>,
    /// Entity extraction.
    pub entities: Box<dyn EntityExtractor>,
}

impl Heuristics {
    /// The default heuristics configured from `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            authority: Box::new(HostAuthorityHeuristic::new(options.authority.clone())),
            intent: Box::new(LexiconIntentClassifier::new(
                &options.transactional_terms,
                &options.informational_terms,
            )),
            entities: Box::new(CapitalizedEntityExtractor::new(&options.entity_stopwords, options.max_entities)),
        }
    }
}

impl std::fmt::Debug for Heuristics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heuristics").finish_non_exhaustive()
    }
}
