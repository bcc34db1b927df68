//! FAQ candidate extraction from running text.

use std::collections::HashSet;

use regex::Regex;

use crate::options::Options;
use crate::patterns::{INVERTED_QUESTION, WHITESPACE_NORMALIZE};

/// Finds question-like spans in a page's main text.
///
/// First pass: spans opened with `¿` and closed with `?`. Only when that
/// finds nothing, a second pass looks for phrases led by a question word
/// in the lower-cased text.
#[derive(Debug, Clone)]
pub struct FaqExtractor {
    question_phrase: Option<Regex>,
    blacklist: Vec<String>,
    min_chars: usize,
    max_chars: usize,
    limit: usize,
}

impl FaqExtractor {
    /// Build from run options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            question_phrase: question_phrase_regex(&options.question_words),
            blacklist: options.faq_blacklist.iter().map(|s| s.to_lowercase()).collect(),
            min_chars: options.faq_min_chars,
            max_chars: options.faq_max_chars,
            limit: options.max_faqs,
        }
    }

    /// Cleaned, de-duplicated FAQ candidates in order of appearance.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut raw: Vec<String> = INVERTED_QUESTION
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        if raw.is_empty() {
            if let Some(re) = &self.question_phrase {
                let lowered = text.to_lowercase();
                raw = re.find_iter(&lowered).map(|m| m.as_str().to_string()).collect();
            }
        }

        let mut seen = HashSet::new();
        let mut faqs = Vec::new();
        for candidate in raw {
            if faqs.len() == self.limit {
                break;
            }
            let Some(cleaned) = self.clean(&candidate) else {
                continue;
            };
            let key = WHITESPACE_NORMALIZE.replace_all(&cleaned.to_lowercase(), " ").into_owned();
            if seen.insert(key) {
                faqs.push(cleaned);
            }
        }
        faqs
    }

    fn clean(&self, candidate: &str) -> Option<String> {
        let mut cleaned = capitalize(candidate.trim());
        if !cleaned.ends_with('?') {
            cleaned.push('?');
        }
        // bounds apply to the final text, question mark included
        let len = cleaned.chars().count();
        if len < self.min_chars || len > self.max_chars {
            return None;
        }
        let lower = cleaned.to_lowercase();
        if self.blacklist.iter().any(|bad| lower.contains(bad.as_str())) {
            return None;
        }
        Some(cleaned)
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn question_phrase_regex(words: &[String]) -> Option<Regex> {
    let mut words: Vec<String> = words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }
    // Longest first so "how much" wins over "how".
    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    let alternation = words.iter().map(|w| regex::escape(w)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"\b(?:{alternation})\s+\w+\s+\w+[^,.:;]+")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FaqExtractor {
        FaqExtractor::new(&Options::default())
    }

    #[test]
    fn inverted_questions_are_capitalized() {
        let faqs = extractor().extract("Intro. ¿QUÉ ES el SEO local? Más texto. ¿Cuánto cuesta una auditoría?");
        assert_eq!(faqs, vec!["¿qué es el seo local?", "¿cuánto cuesta una auditoría?"]);
    }

    #[test]
    fn question_word_pass_runs_only_without_inverted_questions() {
        let faqs = extractor().extract("Learn how to build links that last, then measure.");
        assert_eq!(faqs, vec!["How to build links that last?"]);

        let faqs = extractor().extract("¿Qué es un backlink de calidad? Learn how to build links that last.");
        assert_eq!(faqs, vec!["¿qué es un backlink de calidad?"]);
    }

    #[test]
    fn longer_question_word_preferred() {
        let faqs = extractor().extract("Find out how much does hosting cost per month.");
        assert_eq!(faqs, vec!["How much does hosting cost per month?"]);
    }

    #[test]
    fn length_bounds_and_blacklist() {
        let faqs = extractor().extract("¿Por qué? ¿Aceptar las cookies del sitio web? ¿Cómo elegir un buen dominio?");
        assert_eq!(faqs, vec!["¿cómo elegir un buen dominio?"]);
    }

    #[test]
    fn duplicates_collapse_case_and_whitespace() {
        let faqs = extractor().extract("¿Qué es el   SEO técnico? ¿qué es el seo técnico?");
        assert_eq!(faqs.len(), 1);
    }

    #[test]
    fn capped_at_limit() {
        let text = (0..8).map(|i| format!("¿Cuál es la pregunta número {i}?")).collect::<Vec<_>>().join(" ");
        assert_eq!(extractor().extract(&text).len(), 5);
    }

    #[test]
    fn appended_question_mark_counts_toward_max_length() {
        let at_limit = format!("what is the {}.", "x".repeat(137));
        let faqs = extractor().extract(&at_limit);
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].chars().count(), 150);
        assert!(faqs[0].ends_with('?'));

        let over_limit = format!("what is the {}.", "x".repeat(138));
        assert!(extractor().extract(&over_limit).is_empty());
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let options = Options { max_faqs: 0, ..Options::default() };
        let faqs = FaqExtractor::new(&options).extract("¿Qué es el SEO local? ¿Cómo elegir un buen dominio?");
        assert!(faqs.is_empty());
    }

    #[test]
    fn no_questions_yields_empty() {
        assert!(extractor().extract("Plain statement without any interrogative.").is_empty());
    }
}
