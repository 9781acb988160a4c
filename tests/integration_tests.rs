//! Integration tests for the match scorer

use coldmail_match::input::manager::InputManager;
use coldmail_match::llm::prompts::{GenerationKind, GenerationRequest, PromptTemplates, Tone};
use coldmail_match::processing::text_normalizer::STOP_WORDS;
use coldmail_match::{
    combined_score, extract_keywords, lexical_match_score, semantic_match_score, Embedder,
    EmbedderHandle, MatchEngine, MatchError, Result, SemanticScorer,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Hashes letter trigrams into a small vector so related texts overlap
struct TrigramEmbedder;

impl Embedder for TrigramEmbedder {
    fn name(&self) -> &str {
        "trigram"
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; 64];
        let chars: Vec<char> = text.to_lowercase().chars().filter(|c| c.is_alphanumeric()).collect();
        for window in chars.windows(3) {
            let bucket = window.iter().fold(7u32, |h, c| h.wrapping_mul(31).wrapping_add(*c as u32));
            v[(bucket % 64) as usize] += 1.0;
        }
        Ok(v)
    }
}

fn scorer() -> SemanticScorer {
    SemanticScorer::new(Arc::new(EmbedderHandle::preloaded(Arc::new(TrigramEmbedder))))
}

fn engine() -> MatchEngine {
    MatchEngine::new(Arc::new(EmbedderHandle::preloaded(Arc::new(TrigramEmbedder))))
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Kubernetes"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_job_extraction_from_html() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_job.html");

    let text = manager.extract_job(path, 3000).await.unwrap();
    assert!(text.starts_with("Looking for a Python developer"));
    assert!(text.contains("AWS & mentor"));
    assert!(!text.contains("analytics"));
    assert!(!text.contains("Careers"));

    let capped = InputManager::new().extract_job(path, 20).await.unwrap();
    assert_eq!(capped.chars().count(), 20);
}

#[tokio::test]
async fn test_resume_newlines_collapsed() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_resume(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(text.starts_with("John Doe\nSoftware Engineer\nExperienced"));
    assert!(!text.contains("\n\n"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = InputManager::new();

    assert!(manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await.is_err());
    assert!(matches!(
        manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await,
        Err(MatchError::InvalidInput(_))
    ));
}

#[test]
fn test_keyword_properties() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let keywords = extract_keywords(&text);

    assert!(keywords.len() <= 50);
    let distinct: HashSet<&str> = keywords.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(distinct.len(), keywords.len());
    for (term, count) in &keywords {
        assert!(term.len() > 2);
        assert!(!STOP_WORDS.contains(&term.as_str()));
        assert!(*count >= 1);
    }
    assert_eq!(keywords[0], ("services".to_string(), 2));
}

#[test]
fn test_lexical_properties() {
    let resume = "Experienced Python developer with AWS and Docker skills";
    let job = "Looking for a Python developer familiar with Docker and Kubernetes";

    assert_eq!(lexical_match_score(resume, ""), 0.0);
    assert_eq!(lexical_match_score(resume, job), 50.0);
    assert_eq!(
        lexical_match_score(&resume.to_uppercase(), &job.to_uppercase()),
        lexical_match_score(resume, job)
    );
}

#[tokio::test]
async fn test_semantic_properties() {
    let scorer = scorer();
    let a = "Backend engineer building Rust services on AWS";
    let b = "Pastry chef specialising in laminated doughs";

    let self_score = semantic_match_score(&scorer, a, a).await.unwrap();
    assert!(self_score >= 99.0);

    let ab = semantic_match_score(&scorer, a, b).await.unwrap();
    let ba = semantic_match_score(&scorer, b, a).await.unwrap();
    assert_eq!(ab, ba);
    assert!(ab.is_finite() && (0.0..=100.0).contains(&ab));
}

#[test]
fn test_combined_formula() {
    assert_eq!(combined_score(50.0, 80.0), 68.0);
    assert_eq!(combined_score(0.0, 0.0), 0.0);
    assert_eq!(combined_score(100.0, 100.0), 100.0);
    assert_eq!(combined_score(33.33, 66.67), 53.33);
}

#[tokio::test]
async fn test_identical_texts_score_full() {
    let text = "Senior Rust engineer with Tokio and Kubernetes experience";
    let report = engine().analyze(text, text).await.unwrap();

    assert_eq!(report.lexical_score.value(), 100.0);
    assert!(report.semantic_score().unwrap().value() >= 99.0);
    assert!(report.combined_score.unwrap().value() >= 99.0);
}

#[tokio::test]
async fn test_disjoint_texts() {
    let report = engine()
        .analyze("baking sourdough croissants daily", "kubernetes operator terraform modules")
        .await
        .unwrap();

    assert_eq!(report.lexical_score.value(), 0.0);
    let semantic = report.semantic_score().unwrap().value();
    assert!(semantic.is_finite() && (0.0..=100.0).contains(&semantic));
    assert!(report.matching_keywords.is_empty());
}

#[tokio::test]
async fn test_pipeline_from_fixtures_to_prompt() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_resume(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_job(Path::new("tests/fixtures/sample_job.html"), 3000)
        .await
        .unwrap();

    let report = engine().analyze(&resume, &job).await.unwrap();
    assert!(report.lexical_score.value() > 0.0);
    assert!(report.matching_keywords.contains(&"python".to_string()));
    assert!(report.matching_keywords.contains(&"kubernetes".to_string()));

    let request = GenerationRequest::new(GenerationKind::CoverLetter, Tone::Formal, 300);
    let prompt = PromptTemplates::default()
        .render(&request, &resume, &job, &report.matching_keywords)
        .unwrap();
    assert!(prompt.system.contains(&format!("- Match Keywords: {}", report.matching_keywords.join(", "))));
    assert!(prompt.system.contains("Tone: formal"));
}

#[tokio::test]
async fn test_model_failure_lets_caller_degrade() {
    let handle = EmbedderHandle::new("missing", || {
        Err(MatchError::ModelLoading("weights not found".to_string()))
    });
    let engine = MatchEngine::new(Arc::new(handle));

    let err = engine.analyze("rust", "rust developer").await.unwrap_err();
    assert!(err.is_model_unavailable());

    let report = engine.analyze_lexical_only("rust", "rust developer");
    assert_eq!(report.lexical_score.value(), 50.0);
    assert!(report.combined_score.is_none());
}
