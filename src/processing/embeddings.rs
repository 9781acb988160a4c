//! Embeddings generation using Model2Vec

use crate::config::Config;
use crate::error::{MatchError, Result};
use log::{debug, info};
use model2vec_rs::model::StaticModel;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// Turns text into a fixed-length vector. Inference must not mutate shared state.
pub trait Embedder: Send + Sync {
    fn name(&self) -> &str;

    fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

/// Where the Model2Vec weights come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Local(PathBuf),
    Hub(String),
}

impl ModelSource {
    /// Prefer a downloaded copy in the models directory, then the registry repo id
    pub fn resolve(config: &Config) -> Self {
        let model_name = &config.models.embedding_model;

        let local_path = config.models_dir().join(model_name);
        if local_path.is_dir() {
            return ModelSource::Local(local_path);
        }

        let as_path = PathBuf::from(model_name);
        if as_path.is_dir() {
            return ModelSource::Local(as_path);
        }

        match config.get_model_by_name(model_name) {
            Some(model) => ModelSource::Hub(model.repo_id.clone()),
            None => ModelSource::Hub(model_name.clone()),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Local(path) => write!(f, "{}", path.display()),
            ModelSource::Hub(repo_id) => write!(f, "{}", repo_id),
        }
    }
}

pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    pub fn load(source: &ModelSource) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", source);

        let model = match source {
            ModelSource::Local(path) => StaticModel::from_pretrained(path, None, None, None)?,
            ModelSource::Hub(repo_id) => StaticModel::from_pretrained(repo_id, None, None, None)?,
        };

        info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: source.to_string(),
        })
    }
}

impl Embedder for Model2VecEmbedder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(MatchError::Embedding(format!(
                "model returned no vector for a {}-character text",
                text.chars().count()
            )));
        }
        Ok(embedding)
    }
}

pub type EmbedderLoader = Arc<dyn Fn() -> Result<Arc<dyn Embedder>> + Send + Sync>;

/// Shared, lazily-initialised embedding model.
///
/// The loader runs at most once successfully; concurrent first callers wait
/// on the same initialisation. A failed load is reported to the caller and a
/// later `get` tries again.
pub struct EmbedderHandle {
    cell: OnceCell<Arc<dyn Embedder>>,
    loader: EmbedderLoader,
    label: String,
}

impl EmbedderHandle {
    pub fn new<F>(label: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Embedder>> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Arc::new(loader),
            label: label.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let source = ModelSource::resolve(config);
        let label = config.models.embedding_model.clone();

        Self::new(label, move || {
            let embedder = Model2VecEmbedder::load(&source)?;
            Ok(Arc::new(embedder) as Arc<dyn Embedder>)
        })
    }

    /// Wrap an already constructed embedder
    pub fn preloaded(embedder: Arc<dyn Embedder>) -> Self {
        let label = embedder.name().to_string();
        let missing = label.clone();
        Self {
            cell: OnceCell::new_with(Some(embedder)),
            loader: Arc::new(move || {
                Err(MatchError::ModelLoading(format!("{} has no loader", missing)))
            }),
            label,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<dyn Embedder>> {
        let embedder = self
            .cell
            .get_or_try_init(|| async {
                debug!("Initialising embedding model '{}'", self.label);
                let loader = Arc::clone(&self.loader);
                tokio::task::spawn_blocking(move || (*loader)())
                    .await
                    .map_err(|e| MatchError::ModelLoading(format!("Model loader aborted: {}", e)))?
            })
            .await?;

        Ok(Arc::clone(embedder))
    }

    /// Load the model now instead of on the first scoring call
    pub async fn warm_up(&self) -> Result<()> {
        self.get().await.map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScore {
    pub score: f64,
    pub embedding_dim: usize,
}

/// Calculate cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<SimilarityScore> {
    if a.len() != b.len() {
        return Err(MatchError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(SimilarityScore {
            score: 0.0,
            embedding_dim: 0,
        });
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();

    let score = if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    };

    Ok(SimilarityScore {
        score,
        embedding_dim: a.len(),
    })
}
