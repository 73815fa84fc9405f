use crate::error::{AppError, Result};
use crate::types::RepositoryRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Free-form text generation from a repository summary and an instruction.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(&self, summary: &str, instruction: &str) -> Result<String>;
}

const INSTRUCTION: &str = "related to the following query please suggest schools or universities \
that have majors related to this repository and please generate in a step by step list \
ascendingly with your preference";

pub fn repository_summary(repository: Option<&RepositoryRecord>) -> String {
    let Some(repo) = repository else {
        return "No repository currently selected.".to_string();
    };
    format!(
        "Repository name: {}\nDescription: {}\nLanguage: {}\nLicense: {}\n",
        repo.name,
        repo.description.as_deref().unwrap_or("N/A"),
        repo.language.as_deref().unwrap_or("N/A"),
        repo.license
            .as_ref()
            .map(|l| l.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("N/A"),
    )
}

pub fn instruction() -> &'static str {
    INSTRUCTION
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Default)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini `generateContent` over REST.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("technerd/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Generation(e.to_string()))?;
        Ok(GeminiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl SuggestionGenerator for GeminiClient {
    async fn generate(&self, summary: &str, instruction: &str) -> Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let prompt = format!("{} {}", summary, instruction);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(AppError::Generation(format!(
                "Gemini returned status {}",
                resp.status()
            )));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;
        response_text(parsed)
    }
}

/// Trimmed text of the first candidate. An empty answer is not an error.
fn response_text(response: GenerateResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Generation("no candidates in response".to_string()))?;
    let text: String = candidate.content.parts.into_iter().map(|p| p.text).collect();
    Ok(text.trim().to_string())
}
