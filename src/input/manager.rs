//! Input manager for handling different file types

use crate::error::{MatchError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    HtmlExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{info, warn};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(MatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Html => {
                info!("Processing HTML page: {}", path.display());
                HtmlExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatchError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Resume text with newline runs collapsed.
    ///
    /// An unreadable PDF yields empty text rather than an error.
    pub async fn extract_resume(&mut self, path: &Path) -> Result<String> {
        match self.extract_text(path).await {
            Ok(text) => collapse_newlines(&text),
            Err(MatchError::PdfExtraction(reason)) => {
                warn!("Unable to parse resume, continuing with empty text: {}", reason);
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Job description text, trimmed and cut to `max_chars` characters
    pub async fn extract_job(&mut self, path: &Path, max_chars: usize) -> Result<String> {
        let text = self.extract_text(path).await?;
        Ok(truncate_chars(text.trim(), max_chars).to_string())
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                MatchError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn collapse_newlines(text: &str) -> Result<String> {
    let newline_runs = Regex::new(r"\n+")
        .map_err(|e| MatchError::InvalidInput(format!("Invalid newline pattern: {}", e)))?;
    Ok(newline_runs.replace_all(text, "\n").trim().to_string())
}

/// Cut at a character boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 3000), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_collapse_newlines() {
        assert_eq!(collapse_newlines("\n\nJane Doe\n\n\nRust\n").unwrap(), "Jane Doe\nRust");
    }

    #[tokio::test]
    async fn test_broken_pdf_resume_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let mut manager = InputManager::new();
        assert!(matches!(
            manager.extract_text(&path).await,
            Err(MatchError::PdfExtraction(_))
        ));
        assert_eq!(manager.extract_resume(&path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_job_text_is_capped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("job.txt");
        std::fs::write(&path, format!("  {}  ", "a".repeat(5000))).unwrap();

        let mut manager = InputManager::new().with_cache(false);
        let job = manager.extract_job(&path, 3000).await.unwrap();
        assert_eq!(job.len(), 3000);
        assert_eq!(manager.cache_size(), 0);
    }
}
