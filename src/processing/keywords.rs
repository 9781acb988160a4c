//! Frequency-based keyword extraction

use crate::processing::text_normalizer::{TextNormalizer, TokenSequence};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of terms reported per text
pub const MAX_KEYWORDS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub count: usize,
}

/// Most frequent terms, highest count first, ties in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordFrequency {
    entries: Vec<Keyword>,
}

impl KeywordFrequency {
    pub fn entries(&self) -> &[Keyword] {
        &self.entries
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|k| k.term.as_str())
    }

    pub fn count_of(&self, term: &str) -> Option<usize> {
        self.entries.iter().find(|k| k.term == term).map(|k| k.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms present in both lists, in this list's rank order
    pub fn matching(&self, other: &KeywordFrequency) -> Vec<String> {
        let theirs: HashSet<&str> = other.terms().collect();
        self.terms()
            .filter(|term| theirs.contains(term))
            .map(str::to_string)
            .collect()
    }

    /// Terms in this list that the other list lacks
    pub fn missing_from(&self, other: &KeywordFrequency) -> Vec<String> {
        let theirs: HashSet<&str> = other.terms().collect();
        self.terms()
            .filter(|term| !theirs.contains(term))
            .map(str::to_string)
            .collect()
    }

    pub fn into_pairs(self) -> Vec<(String, usize)> {
        self.entries.into_iter().map(|k| (k.term, k.count)).collect()
    }
}

pub struct KeywordExtractor {
    limit: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self { limit: MAX_KEYWORDS }
    }

    /// Report fewer terms than the default; never more than `MAX_KEYWORDS`
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_KEYWORDS),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn extract(&self, tokens: &TokenSequence) -> KeywordFrequency {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counted: Vec<Keyword> = Vec::new();

        for token in tokens {
            match positions.get(token.as_str()) {
                Some(&idx) => counted[idx].count += 1,
                None => {
                    positions.insert(token.as_str(), counted.len());
                    counted.push(Keyword {
                        term: token.clone(),
                        count: 1,
                    });
                }
            }
        }

        // `counted` is in first-seen order and sort_by is stable
        counted.sort_by(|a, b| b.count.cmp(&a.count));
        counted.truncate(self.limit);

        KeywordFrequency { entries: counted }
    }
}

/// Top keywords of a raw text
pub fn extract_keywords(text: &str) -> Vec<(String, usize)> {
    let tokens = TextNormalizer::new().normalize(text);
    KeywordExtractor::new().extract(&tokens).into_pairs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_normalizer::STOP_WORDS;

    fn extract(text: &str) -> KeywordFrequency {
        KeywordExtractor::new().extract(&TextNormalizer::new().normalize(text))
    }

    #[test]
    fn test_keyword_extraction() {
        let keywords = extract("Rust Rust programming language. Rust is memory safe. Programming with Rust is fun.");

        assert_eq!(keywords.entries()[0].term, "rust");
        assert_eq!(keywords.count_of("rust"), Some(4));
        assert_eq!(keywords.count_of("programming"), Some(2));
        assert_eq!(keywords.count_of("is"), None);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let keywords = extract("zeta alpha mango alpha zeta kiwi");
        let terms: Vec<&str> = keywords.terms().collect();

        assert_eq!(terms, vec!["zeta", "alpha", "mango", "kiwi"]);
    }

    #[test]
    fn test_limit_applies_after_ordering() {
        let mut text = String::new();
        for i in 0..60u8 {
            let word: String = ['w', 'o', (b'a' + i / 26) as char, (b'a' + i % 26) as char]
                .iter()
                .collect();
            text.push_str(&word);
            text.push(' ');
        }
        text.push_str("latecomer latecomer");

        let keywords = extract(&text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords.entries()[0].term, "latecomer");
        assert_eq!(keywords.entries()[1].term, "woaa");
        assert_eq!(keywords.entries()[49].term, "wobw");
    }

    #[test]
    fn test_keyword_invariants() {
        let text = "The senior engineer will design, build and operate the data platform. \
                    The engineer should know Python, SQL and Spark; 3+ years with Airflow.";
        let tokens = TextNormalizer::new().normalize(text);
        let keywords = KeywordExtractor::new().extract(&tokens);

        let distinct: HashSet<&str> = keywords.terms().collect();
        assert_eq!(distinct.len(), keywords.len());
        assert!(keywords.len() <= MAX_KEYWORDS);
        assert!(keywords.terms().all(|t| t.len() > 2 && !STOP_WORDS.contains(&t)));
        let total: usize = keywords.entries().iter().map(|k| k.count).sum();
        assert!(total <= tokens.len());
    }

    #[test]
    fn test_empty_text_yields_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("1234 !!! ,,").is_empty());
    }

    #[test]
    fn test_matching_and_missing() {
        let resume = extract("python docker aws python");
        let job = extract("kubernetes docker python terraform");

        assert_eq!(job.matching(&resume), vec!["docker", "python"]);
        assert_eq!(job.missing_from(&resume), vec!["kubernetes", "terraform"]);
    }

    #[test]
    fn test_with_limit_is_capped() {
        assert_eq!(KeywordExtractor::with_limit(10).limit(), 10);
        assert_eq!(KeywordExtractor::with_limit(500).limit(), MAX_KEYWORDS);
    }
}
