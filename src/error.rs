use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing {credential}. Set {variable} in the environment or the config file.")]
    ConfigurationMissing {
        credential: &'static str,
        variable: &'static str,
    },

    #[error("{0}")]
    Validation(String),

    #[error("All possible searches have been done and none is working.")]
    NotFound,

    #[error("{0}")]
    Featured(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Suggestion generation failed: {0}")]
    Generation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn missing_serpapi_key() -> Self {
        AppError::ConfigurationMissing {
            credential: "SerpAPI key",
            variable: "SERPAPI_KEY",
        }
    }

    pub fn missing_gemini_key() -> Self {
        AppError::ConfigurationMissing {
            credential: "Gemini key",
            variable: "GEMINI_API_KEY",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}
