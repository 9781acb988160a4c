//! Text extraction from various file formats

use crate::error::{MatchError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        extract_pdf_blocking(path, move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
    }
}

/// Run a PDF parse off the async runtime.
///
/// Parser errors and panics both come back as `PdfExtraction`.
async fn extract_pdf_blocking<F>(path: &Path, extract: F) -> Result<String>
where
    F: FnOnce() -> std::result::Result<String, String> + Send + 'static,
{
    let failure = |reason: String| {
        MatchError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), reason))
    };

    match tokio::task::spawn_blocking(extract).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(reason)) => Err(failure(reason)),
        Err(e) => Err(failure(format!("parser aborted: {}", e))),
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        html_to_text(&html_output)
    }
}

/// Saved job posting pages
pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let page = fs::read_to_string(path).await?;
        let body = strip_non_content(&page)?;
        let text = html_to_text(&body)?;
        Ok(text.lines().collect::<Vec<_>>().join(" "))
    }
}

fn invalid_pattern(e: regex::Error) -> MatchError {
    MatchError::InvalidInput(format!("Invalid extraction pattern: {}", e))
}

/// Drop the head, scripts and styles of a page
fn strip_non_content(page: &str) -> Result<String> {
    let non_content = Regex::new(r"(?is)<(head|script|style|noscript)\b[^>]*>.*?</(head|script|style|noscript)>")
        .map_err(invalid_pattern)?;
    Ok(non_content.replace_all(page, " ").to_string())
}

pub fn html_to_text(html: &str) -> Result<String> {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</div>", "\n")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let tag_regex = Regex::new(r"<[^>]*>").map_err(invalid_pattern)?;
    let clean_text = tag_regex.replace_all(&text, "").replace("&amp;", "&");

    let lines: Vec<String> = clean_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}
