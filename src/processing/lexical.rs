//! ATS-style word overlap score

use crate::processing::scoring::MatchScore;
use std::collections::HashSet;

/// Percentage of job-description words that also appear in the resume.
///
/// Both texts are lowercased and split on whitespace with no further
/// cleaning. The denominator is the job word set alone, so the score reads
/// as coverage of the posting rather than a symmetric similarity.
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn score(resume_text: &str, job_text: &str) -> MatchScore {
        let resume_words = Self::word_set(resume_text);
        let job_words = Self::word_set(job_text);

        if job_words.is_empty() {
            return MatchScore::ZERO;
        }

        let common = job_words.intersection(&resume_words).count();
        MatchScore::from_ratio(common as f64 / job_words.len() as f64)
    }

    /// Job words found in the resume, sorted
    pub fn common_words(resume_text: &str, job_text: &str) -> Vec<String> {
        let resume_words = Self::word_set(resume_text);
        let mut common: Vec<String> = Self::word_set(job_text)
            .intersection(&resume_words)
            .cloned()
            .collect();
        common.sort();
        common
    }

    fn word_set(text: &str) -> HashSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

pub fn lexical_match_score(resume_text: &str, job_text: &str) -> f64 {
    LexicalScorer::score(resume_text, job_text).value()
}
