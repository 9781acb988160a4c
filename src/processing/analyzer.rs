//! Match engine running the full scoring pipeline for one resume/job pair

use crate::config::Config;
use crate::error::Result;
use crate::processing::embeddings::EmbedderHandle;
use crate::processing::keywords::{KeywordExtractor, KeywordFrequency};
use crate::processing::lexical::LexicalScorer;
use crate::processing::scoring::{MatchScore, ScoreCombiner};
use crate::processing::semantic::{SemanticOutcome, SemanticScorer};
use crate::processing::text_normalizer::TextNormalizer;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub struct MatchEngine {
    normalizer: TextNormalizer,
    extractor: KeywordExtractor,
    semantic: SemanticScorer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Share of job-description words present in the resume
    pub lexical_score: MatchScore,

    /// Absent when the report was produced without an embedding model
    pub semantic: Option<SemanticOutcome>,
    pub combined_score: Option<MatchScore>,

    pub resume_keywords: KeywordFrequency,
    pub job_keywords: KeywordFrequency,
    /// Job keywords also among the resume keywords, in job rank order
    pub matching_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,

    pub embedding_model: Option<String>,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
}

impl MatchReport {
    pub fn semantic_score(&self) -> Option<MatchScore> {
        self.semantic.as_ref().map(SemanticOutcome::score)
    }

    /// Combined score when available, lexical score otherwise
    pub fn headline_score(&self) -> MatchScore {
        self.combined_score.unwrap_or(self.lexical_score)
    }
}

struct KeywordComparison {
    resume: KeywordFrequency,
    job: KeywordFrequency,
    matching: Vec<String>,
    missing: Vec<String>,
}

impl MatchEngine {
    pub fn new(embedder: Arc<EmbedderHandle>) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            extractor: KeywordExtractor::new(),
            semantic: SemanticScorer::new(embedder),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(EmbedderHandle::from_config(config)))
    }

    pub fn embedder(&self) -> &EmbedderHandle {
        self.semantic.embedder()
    }

    pub fn keywords(&self, text: &str) -> KeywordFrequency {
        self.extractor.extract(&self.normalizer.normalize(text))
    }

    /// Score a pair with both the lexical and the semantic scorer.
    ///
    /// Fails only when the embedding model cannot be initialised; callers
    /// may then fall back to `analyze_lexical_only`.
    pub async fn analyze(&self, resume_text: &str, job_text: &str) -> Result<MatchReport> {
        let start_time = Instant::now();

        let (lexical_score, semantic) = tokio::join!(
            async { LexicalScorer::score(resume_text, job_text) },
            self.semantic.score(resume_text, job_text),
        );
        let semantic = semantic?;
        let combined_score = ScoreCombiner::combine(lexical_score, semantic.score());

        info!(
            "Scores: lexical {}, semantic {}, combined {}",
            lexical_score,
            semantic.score(),
            combined_score
        );

        let keywords = self.compare_keywords(resume_text, job_text);

        Ok(MatchReport {
            lexical_score,
            semantic: Some(semantic),
            combined_score: Some(combined_score),
            resume_keywords: keywords.resume,
            job_keywords: keywords.job,
            matching_keywords: keywords.matching,
            missing_keywords: keywords.missing,
            embedding_model: Some(self.embedder().label().to_string()),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        })
    }

    /// Report without semantic or combined scores
    pub fn analyze_lexical_only(&self, resume_text: &str, job_text: &str) -> MatchReport {
        let start_time = Instant::now();
        let lexical_score = LexicalScorer::score(resume_text, job_text);
        let keywords = self.compare_keywords(resume_text, job_text);

        MatchReport {
            lexical_score,
            semantic: None,
            combined_score: None,
            resume_keywords: keywords.resume,
            job_keywords: keywords.job,
            matching_keywords: keywords.matching,
            missing_keywords: keywords.missing,
            embedding_model: None,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        }
    }

    fn compare_keywords(&self, resume_text: &str, job_text: &str) -> KeywordComparison {
        let resume = self.keywords(resume_text);
        let job = self.keywords(job_text);
        let matching = job.matching(&resume);
        let missing = job.missing_from(&resume);

        KeywordComparison {
            resume,
            job,
            matching,
            missing,
        }
    }
}
