use crate::error::{AppError, Result};
use crate::types::{JobSearchResponse, RawJobPosting};
use async_trait::async_trait;

/// Keyword search over job postings.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search_jobs(&self, keyword: &str) -> Result<Vec<RawJobPosting>>;
}

/// SerpAPI `google_jobs` engine.
pub struct SerpApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    country: String,
    language: String,
}

impl SerpApiClient {
    pub fn new(base_url: &str, api_key: &str, country: &str, language: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("technerd/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(SerpApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            country: country.to_string(),
            language: language.to_string(),
        })
    }
}

#[async_trait]
impl JobSearch for SerpApiClient {
    async fn search_jobs(&self, keyword: &str) -> Result<Vec<RawJobPosting>> {
        let url = format!("{}/search.json", self.base_url);
        let params = [
            ("engine", "google_jobs"),
            ("q", keyword),
            ("gl", self.country.as_str()),
            ("hl", self.language.as_str()),
            ("api_key", self.api_key.as_str()),
        ];

        let resp = self.client.get(&url).query(&params).send().await?;
        if !resp.status().is_success() {
            return Err(AppError::Transport(format!(
                "SerpAPI request failed with status {}",
                resp.status()
            )));
        }
        let body: JobSearchResponse = resp.json().await?;
        Ok(body.jobs_results)
    }
}
