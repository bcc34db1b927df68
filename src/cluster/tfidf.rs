//! TF-IDF document vectors.
//!
//! Tokens are runs of two or more word characters, lower-cased, with
//! stopwords removed. The vocabulary keeps the `max_features` terms with the
//! highest corpus frequency and is stored in alphabetical order. Weights are
//! raw term counts times the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`; each row is L2-normalised.

use std::collections::{HashMap, HashSet};

use crate::error::ClusterError;
use crate::patterns::VECTOR_TOKEN;

/// Document-term matrix over a fixed vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TfidfMatrix {
    /// Terms, alphabetical; column `j` of every row weights `vocabulary[j]`.
    pub vocabulary: Vec<String>,
    /// One L2-normalised row per document.
    pub rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub(crate) struct TfidfVectorizer<'a> {
    max_features: usize,
    stopwords: &'a [String],
}

impl<'a> TfidfVectorizer<'a> {
    pub(crate) fn new(max_features: usize, stopwords: &'a [String]) -> Self {
        Self { max_features, stopwords }
    }

    fn analyze(&self, doc: &str) -> Vec<String> {
        let lowered = doc.to_lowercase();
        VECTOR_TOKEN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stopwords.iter().any(|s| s == t))
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary and IDF weights from `docs` and vectorise them.
    pub(crate) fn fit_transform(&self, docs: &[String]) -> Result<TfidfMatrix, ClusterError> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| self.analyze(d)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                *corpus_counts.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }
        if corpus_counts.is_empty() || self.max_features == 0 {
            return Err(ClusterError::EmptyVocabulary);
        }

        let mut by_frequency: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let mut vocabulary: Vec<String> = by_frequency
            .into_iter()
            .take(self.max_features)
            .map(|(term, _)| term.to_string())
            .collect();
        vocabulary.sort();

        let n = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let column: HashMap<&str, usize> = vocabulary.iter().enumerate().map(|(i, t)| (t.as_str(), i)).collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0; vocabulary.len()];
                for token in tokens {
                    if let Some(&j) = column.get(token.as_str()) {
                        row[j] += 1.0;
                    }
                }
                for (weight, idf) in row.iter_mut().zip(&idf) {
                    *weight *= idf;
                }
                let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|w| *w /= norm);
                }
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn vocabulary_is_alphabetical_and_stopword_free() {
        let stop = vec!["the".to_string()];
        let matrix = TfidfVectorizer::new(50, &stop)
            .fit_transform(&docs(&["The seo audit", "seo pricing"]))
            .unwrap();
        assert_eq!(matrix.vocabulary, vec!["audit", "pricing", "seo"]);
    }

    #[test]
    fn single_char_tokens_ignored() {
        let matrix = TfidfVectorizer::new(50, &[]).fit_transform(&docs(&["a b seo"])).unwrap();
        assert_eq!(matrix.vocabulary, vec!["seo"]);
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let matrix = TfidfVectorizer::new(2, &[])
            .fit_transform(&docs(&["seo seo seo links links zebra", "seo links"]))
            .unwrap();
        assert_eq!(matrix.vocabulary, vec!["links", "seo"]);
    }

    #[test]
    fn rows_are_unit_length_and_rare_terms_weigh_more() {
        let matrix = TfidfVectorizer::new(50, &[])
            .fit_transform(&docs(&["seo pricing", "seo audit", "seo links"]))
            .unwrap();
        for row in &matrix.rows {
            let norm: f64 = row.iter().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
        let seo = matrix.vocabulary.iter().position(|t| t == "seo").unwrap();
        let pricing = matrix.vocabulary.iter().position(|t| t == "pricing").unwrap();
        assert!(matrix.rows[0][pricing] > matrix.rows[0][seo]);
    }

    #[test]
    fn empty_vocabulary_is_error() {
        let stop = vec!["the".to_string()];
        let result = TfidfVectorizer::new(50, &stop).fit_transform(&docs(&["the", "a", ""]));
        assert_eq!(result, Err(ClusterError::EmptyVocabulary));
    }
}
