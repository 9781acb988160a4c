//! Text normalization into keyword tokens

use std::collections::HashSet;

/// Common English function words dropped before keyword counting
pub const STOP_WORDS: [&str; 34] = [
    "the", "and", "for", "with", "you", "your", "are", "our", "have",
    "has", "will", "this", "that", "from", "but", "they", "their",
    "them", "about", "into", "who", "what", "when", "where", "which",
    "how", "can", "also", "etc", "should", "must", "may", "could", "would",
];

/// Tokens of this many characters or fewer are dropped
pub const MIN_TOKEN_LEN: usize = 2;

/// Lowercase alphabetic tokens in source order, stopwords removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Clean raw text and split it into keyword tokens
    pub fn normalize(&self, text: &str) -> TokenSequence {
        let cleaned = Self::strip_non_letters(text).to_lowercase();

        cleaned
            .split_whitespace()
            .filter(|word| word.len() > MIN_TOKEN_LEN && !self.is_stop_word(word))
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }

    /// Keep ASCII letters and whitespace, drop everything else
    pub fn strip_non_letters(text: &str) -> String {
        text.chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize("Rust and Python developers, with 5+ years of AWS!");

        assert_eq!(
            tokens.as_slice(),
            &["rust", "python", "developers", "years", "aws"]
        );
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("   \n\t ").is_empty());
    }

    #[test]
    fn test_digits_and_punctuation_removed() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize("C++ node.js 2024 e-mail k8s");

        // Punctuation is deleted, not split on, so fragments are joined
        assert_eq!(tokens.as_slice(), &["nodejs", "email"]);
        assert!(tokens
            .iter()
            .all(|t| t.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_non_ascii_letters_removed() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize("Résumé café naïve");

        assert_eq!(tokens.as_slice(), &["rsum", "caf", "nave"]);
    }

    #[test]
    fn test_stop_words_and_short_tokens_dropped() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize("THE team WILL ship it to US with Kubernetes");

        assert_eq!(tokens.as_slice(), &["team", "ship", "kubernetes"]);
        assert!(normalizer.is_stop_word("would"));
        assert!(!normalizer.is_stop_word("rust"));
    }
}
