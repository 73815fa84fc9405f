use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com";
pub const DEFAULT_GEMINI_API: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TechNerdConfig {
    pub github_token: Option<String>,
    pub serpapi_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub github_api_url: String,
    pub serpapi_url: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub jobs_country: String,
    pub jobs_language: String,
}

impl Default for TechNerdConfig {
    fn default() -> Self {
        TechNerdConfig {
            github_token: None,
            serpapi_key: None,
            gemini_api_key: None,
            github_api_url: DEFAULT_GITHUB_API.to_string(),
            serpapi_url: DEFAULT_SERPAPI_URL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            jobs_country: "us".to_string(),
            jobs_language: "en".to_string(),
        }
    }
}

impl TechNerdConfig {
    /// Reads the config file (if any) at `path` or the default location,
    /// then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path(),
        };
        let mut config = Self::from_file(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(TechNerdConfig::default());
        }
        let contents = fs::read_to_string(config_path)?;
        serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", config_path.display(), e)))
    }

    pub fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config").join("technerd").join("config.json")
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).and_then(non_blank);

        if let Some(token) = lookup("GITHUB_TOKEN").or_else(|| lookup("API_KEY")) {
            self.github_token = Some(token);
        }
        if let Some(key) = lookup("SERPAPI_KEY") {
            self.serpapi_key = Some(key);
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Some(url) = lookup("TECHNERD_GITHUB_API") {
            self.github_api_url = url;
        }
        if let Some(url) = lookup("TECHNERD_SERPAPI_URL") {
            self.serpapi_url = url;
        }
        if let Some(url) = lookup("TECHNERD_GEMINI_API") {
            self.gemini_api_url = url;
        }
        if let Some(model) = lookup("TECHNERD_GEMINI_MODEL") {
            self.gemini_model = model;
        }
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn require_serpapi_key(&self) -> Result<&str> {
        self.serpapi_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(AppError::missing_serpapi_key)
    }

    pub fn require_gemini_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(AppError::missing_gemini_key)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
