//! Word statistics over the main text.

use regex::{Regex, RegexBuilder};

use crate::patterns::{PUNCTUATION, SENTENCE_END, VOWEL_GROUP};
use crate::result::{Readability, ReadabilityLevel};

/// Lower-cased word tokens with punctuation removed, stopwords and tokens of
/// two characters or fewer dropped.
///
/// `stopwords` must already be lower-case.
#[must_use]
pub fn tokenize(text: &str, stopwords: &[String]) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = PUNCTUATION.replace_all(&lowered, "");
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !stopwords.iter().any(|s| s == w))
        .map(str::to_string)
        .collect()
}

/// Whitespace-delimited words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Case-insensitive whole-word matcher for a keyword. `None` for a blank keyword.
#[must_use]
pub fn keyword_matcher(keyword: &str) -> Option<Regex> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Number of case-insensitive whole-word matches of `keyword` in `text`.
///
/// # Examples
///
/// ```
/// use serp_xray::features::keyword_mentions;
///
/// assert_eq!(keyword_mentions("SEO tools help with seo audits", "seo"), 2);
/// assert_eq!(keyword_mentions("seosphere", "seo"), 0);
/// ```
#[must_use]
pub fn keyword_mentions(text: &str, keyword: &str) -> usize {
    keyword_matcher(keyword).map_or(0, |re| re.find_iter(text).count())
}

/// First `max_chars` characters of `text`.
#[must_use]
pub fn content_sample(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn syllables(word: &str) -> usize {
    VOWEL_GROUP.find_iter(word).count().max(1)
}

/// Flesch reading-ease score, or `None` when the text has no words.
#[must_use]
pub fn flesch_reading_ease(text: &str) -> Option<f64> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect();
    if words.is_empty() {
        return None;
    }
    let sentences = SENTENCE_END
        .split(text)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1);
    let syllable_total: usize = words.iter().map(|w| syllables(w)).sum();

    #[allow(clippy::cast_precision_loss)]
    let (words, sentences, syllable_total) = (words.len() as f64, sentences as f64, syllable_total as f64);
    let score = 206.835 - 1.015 * (words / sentences) - 84.6 * (syllable_total / words);
    score.is_finite().then_some(score)
}

/// Reading ease of `text` with its qualitative bucket.
#[must_use]
pub fn readability(text: &str) -> Readability {
    match flesch_reading_ease(text) {
        Some(score) => Readability { score: Some(score), level: ReadabilityLevel::from_score(score) },
        None => Readability::not_available(),
    }
}
