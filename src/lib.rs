//! Resume and job posting match scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use config::Config;
pub use error::{MatchError, Result};
pub use processing::analyzer::{MatchEngine, MatchReport};
pub use processing::embeddings::{Embedder, EmbedderHandle};
pub use processing::keywords::extract_keywords;
pub use processing::lexical::lexical_match_score;
pub use processing::scoring::{combined_score, MatchScore};
pub use processing::semantic::{semantic_match_score, SemanticOutcome, SemanticScorer};
