//! Matching and scoring pipeline

pub mod text_normalizer;
pub mod keywords;
pub mod lexical;
pub mod scoring;
pub mod embeddings;
pub mod embedding_manager;
pub mod semantic;
pub mod analyzer;
