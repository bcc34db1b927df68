//! Topic clustering of the analysed pages.
//!
//! Each page becomes one document: its cleaned H2 headings followed by its
//! first body tokens. Documents are vectorised with TF-IDF and grouped with
//! seeded k-means. Clustering is optional output: too few pages or a
//! degenerate vocabulary yield `None`, never an error.

mod kmeans;
mod tfidf;

use std::collections::BTreeMap;

use crate::error::ClusterError;
use crate::options::{ClusterOptions, Options};
use crate::result::{ClusterAssignment, ClusterMember, PageRecord, TopicCluster};

use kmeans::KMeans;
use tfidf::TfidfVectorizer;

/// Groups pages into topic clusters.
#[derive(Debug, Clone)]
pub struct TopicClusterer {
    options: ClusterOptions,
    stopwords: Vec<String>,
}

impl TopicClusterer {
    /// Build from run options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            options: options.cluster.clone(),
            stopwords: options.stopwords.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Cluster `pages`, or `None` when clustering is unavailable.
    #[must_use]
    pub fn cluster(&self, pages: &[PageRecord]) -> Option<ClusterAssignment> {
        match self.try_cluster(pages) {
            Ok(assignment) => Some(assignment),
            Err(e) => {
                tracing::debug!(reason = %e, "topic clustering unavailable");
                None
            }
        }
    }

    /// Clustering document for one page.
    #[must_use]
    pub fn document_for(&self, page: &PageRecord) -> String {
        let body: Vec<&str> = page
            .word_tokens
            .iter()
            .take(self.options.body_tokens)
            .map(String::as_str)
            .collect();
        format!("{} {}", page.h2.join(" "), body.join(" "))
    }

    fn try_cluster(&self, pages: &[PageRecord]) -> Result<ClusterAssignment, ClusterError> {
        let needed = self.options.min_pages.max(1);
        if pages.len() < needed {
            return Err(ClusterError::TooFewPages { needed, got: pages.len() });
        }

        let docs: Vec<String> = pages.iter().map(|p| self.document_for(p)).collect();
        let matrix = TfidfVectorizer::new(self.options.max_features, &self.stopwords).fit_transform(&docs)?;

        let fit = KMeans {
            k: self.options.max_clusters.min(pages.len()),
            seed: self.options.seed,
            restarts: self.options.restarts,
            max_iterations: self.options.max_iterations,
            tolerance: self.options.tolerance,
        }
        .fit(&matrix.rows)?;

        let mut clusters: BTreeMap<usize, TopicCluster> = BTreeMap::new();
        for (page, &label) in pages.iter().zip(&fit.labels) {
            clusters
                .entry(label)
                .or_insert_with(|| TopicCluster {
                    members: Vec::new(),
                    top_terms: top_terms(&fit.centroids[label], &matrix.vocabulary, self.options.top_terms),
                })
                .members
                .push(ClusterMember { url: page.url.clone(), title: page.title.clone() });
        }
        Ok(ClusterAssignment { clusters })
    }
}

/// Highest-weighted terms of a centroid; ties alphabetical, zero weights skipped.
fn top_terms(centroid: &[f64], vocabulary: &[String], limit: usize) -> Vec<String> {
    let mut weighted: Vec<(&String, f64)> = vocabulary
        .iter()
        .zip(centroid.iter().copied())
        .filter(|(_, w)| *w > 0.0)
        .collect();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    weighted.into_iter().take(limit).map(|(term, _)| term.clone()).collect()
}
