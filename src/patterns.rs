//! Compiled regex patterns for page feature computation.
//!
//! All patterns are compiled once on first use via `LazyLock`. Patterns that
//! depend on configuration (keyword matching, question words) are built per
//! call site instead.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Normalisation
// =============================================================================

/// Any character that is neither a word character nor whitespace.
///
/// Removed before tokenisation; `\w` is Unicode-aware so accented letters survive.
pub static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s]").expect("PUNCTUATION regex")
});

/// Runs of whitespace, collapsed to a single space.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Word tokens as counted by the TF-IDF vectoriser: two or more word characters.
pub static VECTOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w\w+\b").expect("VECTOR_TOKEN regex")
});

// =============================================================================
// Question Detection
// =============================================================================

/// Spanish-style questions opened with `¿` and closed with `?`.
pub static INVERTED_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"¿[^?]+\?").expect("INVERTED_QUESTION regex")
});

// =============================================================================
// Entities and Page Structure
// =============================================================================

/// Sequences of capitalised words ("Google Search Console", "Madrid").
pub static CAPITALIZED_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-ZÁÉÍÓÚÑ][a-záéíóúñ]+(?:\s+[A-ZÁÉÍÓÚÑ][a-záéíóúñ]+)*\b")
        .expect("CAPITALIZED_SEQUENCE regex")
});

/// Class names of table-of-contents containers.
pub static TOC_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)table.*content|toc").expect("TOC_CLASS regex")
});

/// Vowel groups, the unit of the syllable estimate used by the readability score.
pub static VOWEL_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[aeiouyáéíóúüàèìòù]+").expect("VOWEL_GROUP regex")
});

/// Sentence terminators.
pub static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]+").expect("SENTENCE_END regex")
});
