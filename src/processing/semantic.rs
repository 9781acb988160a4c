//! Embedding-based similarity score

use crate::error::{MatchError, Result};
use crate::processing::embeddings::{cosine_similarity, EmbedderHandle};
use crate::processing::scoring::MatchScore;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of one semantic scoring call.
///
/// `Fallback` means the texts could not be encoded and the score was set to
/// zero so the rest of the pipeline can continue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SemanticOutcome {
    Scored { score: MatchScore },
    Fallback { score: MatchScore, reason: String },
}

impl SemanticOutcome {
    fn fallback(reason: impl Into<String>) -> Self {
        SemanticOutcome::Fallback {
            score: MatchScore::ZERO,
            reason: reason.into(),
        }
    }

    pub fn score(&self) -> MatchScore {
        match self {
            SemanticOutcome::Scored { score } | SemanticOutcome::Fallback { score, .. } => *score,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SemanticOutcome::Fallback { .. })
    }
}

pub struct SemanticScorer {
    embedder: Arc<EmbedderHandle>,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<EmbedderHandle>) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &EmbedderHandle {
        &self.embedder
    }

    /// Cosine similarity of the two texts as a percentage.
    ///
    /// Only a model initialisation failure is returned as an error. Encoding
    /// failures, including a panic inside the model, yield a zero fallback.
    pub async fn score(&self, resume_text: &str, job_text: &str) -> Result<SemanticOutcome> {
        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            debug!("Empty text supplied, semantic score is zero");
            return Ok(SemanticOutcome::Scored {
                score: MatchScore::ZERO,
            });
        }

        let embedder = self.embedder.get().await?;
        let resume = resume_text.to_string();
        let job = job_text.to_string();

        let encoded = tokio::task::spawn_blocking(move || -> Result<(Vec<f32>, Vec<f32>)> {
            Ok((embedder.encode(&resume)?, embedder.encode(&job)?))
        })
        .await;

        let (resume_vec, job_vec) = match encoded {
            Ok(Ok(vectors)) => vectors,
            Ok(Err(e)) => {
                warn!("Encoding failed, using zero semantic score: {}", e);
                return Ok(SemanticOutcome::fallback(e.to_string()));
            }
            Err(e) => {
                let err = MatchError::Embedding(format!("encoder aborted: {}", e));
                warn!("Encoding failed, using zero semantic score: {}", err);
                return Ok(SemanticOutcome::fallback(err.to_string()));
            }
        };

        match cosine_similarity(&resume_vec, &job_vec) {
            Ok(similarity) => {
                let percent = (similarity.score * 100.0).clamp(0.0, 100.0);
                Ok(SemanticOutcome::Scored {
                    score: MatchScore::new(percent),
                })
            }
            Err(e) => {
                warn!("Similarity failed, using zero semantic score: {}", e);
                Ok(SemanticOutcome::fallback(e.to_string()))
            }
        }
    }
}

pub async fn semantic_match_score(
    scorer: &SemanticScorer,
    resume_text: &str,
    job_text: &str,
) -> Result<f64> {
    Ok(scorer.score(resume_text, job_text).await?.score().value())
}
