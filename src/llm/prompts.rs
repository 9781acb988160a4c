//! Prompt assembly for cold email and cover letter generation

use crate::error::{MatchError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_WORD_LIMIT: u32 = 100;
pub const MAX_WORD_LIMIT: u32 = 400;
pub const WORD_LIMIT_STEP: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationKind {
    ColdEmail,
    CoverLetter,
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationKind::ColdEmail => write!(f, "cold email"),
            GenerationKind::CoverLetter => write!(f, "cover letter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Friendly,
    Persuasive,
    Formal,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Persuasive => "Persuasive",
            Tone::Formal => "Formal",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Tone {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "persuasive" => Ok(Tone::Persuasive),
            "formal" => Ok(Tone::Formal),
            _ => Err(MatchError::InvalidInput(format!(
                "Invalid tone: {}. Supported: professional, friendly, persuasive, formal",
                s
            ))),
        }
    }
}

pub fn validate_word_limit(word_limit: u32) -> Result<()> {
    if !(MIN_WORD_LIMIT..=MAX_WORD_LIMIT).contains(&word_limit) || word_limit % WORD_LIMIT_STEP != 0 {
        return Err(MatchError::InvalidInput(format!(
            "Word limit must be between {} and {} in steps of {}, got {}",
            MIN_WORD_LIMIT, MAX_WORD_LIMIT, WORD_LIMIT_STEP, word_limit
        )));
    }
    Ok(())
}

/// Everything the writer needs besides the two texts and the keyword match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: GenerationKind,
    pub tone: Tone,
    pub word_limit: u32,
    pub recipient_name: String,
    pub recipient_position: String,
    pub company_name: String,
    pub custom_message: Option<String>,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
}

impl GenerationRequest {
    pub fn new(kind: GenerationKind, tone: Tone, word_limit: u32) -> Self {
        Self {
            kind,
            tone,
            word_limit,
            recipient_name: String::new(),
            recipient_position: String::new(),
            company_name: String::new(),
            custom_message: None,
            linkedin: String::new(),
            github: String::new(),
            portfolio: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPrompt {
    pub system: String,
    pub human: String,
}

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render(
        &self,
        request: &GenerationRequest,
        resume_text: &str,
        job_text: &str,
        matching_keywords: &[String],
    ) -> Result<RenderedPrompt> {
        validate_word_limit(request.word_limit)?;

        let custom_message = request
            .custom_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("None");

        let kind = request.kind.to_string();
        let keywords = matching_keywords.join(", ");
        let word_limit = request.word_limit.to_string();
        let tone = request.tone.to_string().to_lowercase();

        let placeholder = Regex::new(r"\{(\w+)\}")
            .map_err(|e| MatchError::InvalidInput(format!("Invalid template pattern: {}", e)))?;

        let system = placeholder
            .replace_all(&self.system, |caps: &Captures| {
                let value = match &caps[1] {
                    "kind" => kind.as_str(),
                    "resume" => resume_text,
                    "job" => job_text,
                    "keywords" => keywords.as_str(),
                    "custom_message" => custom_message,
                    "linkedin" => request.linkedin.as_str(),
                    "github" => request.github.as_str(),
                    "portfolio" => request.portfolio.as_str(),
                    "recipient_name" => request.recipient_name.as_str(),
                    "recipient_position" => request.recipient_position.as_str(),
                    "company" => request.company_name.as_str(),
                    "word_limit" => word_limit.as_str(),
                    "tone" => tone.as_str(),
                    _ => &caps[0],
                };
                value.to_string()
            })
            .into_owned();

        Ok(RenderedPrompt {
            system,
            human: format!("Generate the {} now.", request.kind),
        })
    }
}

const SYSTEM_TEMPLATE: &str = r#"You are a professional job application writer. Write a {kind} using:
- Resume:
{resume}
- Job Description:
{job}
- Match Keywords: {keywords}
- Custom Message: {custom_message}
- LinkedIn: {linkedin}, GitHub: {github}, Portfolio: {portfolio}
- Recipient: {recipient_name} ({recipient_position}) at {company}
Limit to {word_limit} words. Tone: {tone} and compelling."#;
