use crate::config::TechNerdConfig;
use crate::error::{AppError, Result};
use crate::featured::{pick_featured, IndexSource, OsRandom};
use crate::github::{GitHubClient, RepositorySearch};
use crate::jobs::{JobSearch, SerpApiClient};
use crate::normalize::{normalize_job_posting, to_suggestion_rows};
use crate::resolver::{Resolver, Strategy, EMPTY_QUERY_MESSAGE};
use crate::store::SelectionStore;
use crate::suggest::{self, GeminiClient, SuggestionGenerator};
use crate::types::{JobPosting, RepositoryRecord, SuggestionRow};
use serde::Serialize;

pub const NO_JOBS_MESSAGE: &str = "No job postings were found for this keyword.";
pub const JOBS_FAILED_MESSAGE: &str = "Unable to fetch job postings right now. Try another keyword.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "Suggestion generation failed. Run with --verbose for details.";

enum JobsOutcome {
    Found(JobPosting),
    Cleared(String),
}

/// Owns the collaborators and all session state. Presentation code reads
/// from it and never keeps its own copy.
pub struct TechNerd {
    github: Box<dyn RepositorySearch>,
    jobs: Option<Box<dyn JobSearch>>,
    generator: Option<Box<dyn SuggestionGenerator>>,
    store: SelectionStore,
    suggestions: Vec<SuggestionRow>,
    matched_by: Option<Strategy>,
    message: Option<String>,
    jobs_message: Option<String>,
}

#[derive(Serialize)]
pub struct Snapshot<'a> {
    #[serde(flatten)]
    pub selection: &'a SelectionStore,
    pub suggestions: &'a [SuggestionRow],
    pub matched_by: Option<Strategy>,
    pub message: Option<&'a str>,
    pub jobs_message: Option<&'a str>,
}

impl TechNerd {
    /// `None` for a collaborator means its credential is not configured.
    pub fn new(
        github: Box<dyn RepositorySearch>,
        jobs: Option<Box<dyn JobSearch>>,
        generator: Option<Box<dyn SuggestionGenerator>>,
    ) -> Self {
        TechNerd {
            github,
            jobs,
            generator,
            store: SelectionStore::new(),
            suggestions: Vec::new(),
            matched_by: None,
            message: None,
            jobs_message: None,
        }
    }

    pub fn from_config(config: &TechNerdConfig) -> Result<Self> {
        let github = GitHubClient::new(&config.github_api_url, config.github_token())?;

        let jobs: Option<Box<dyn JobSearch>> = match config.require_serpapi_key() {
            Ok(key) => Some(Box::new(SerpApiClient::new(
                &config.serpapi_url,
                key,
                &config.jobs_country,
                &config.jobs_language,
            )?)),
            Err(_) => None,
        };
        let generator: Option<Box<dyn SuggestionGenerator>> = match config.require_gemini_key() {
            Ok(key) => Some(Box::new(GeminiClient::new(
                &config.gemini_api_url,
                &config.gemini_model,
                key,
            )?)),
            Err(_) => None,
        };

        Ok(TechNerd::new(Box::new(github), jobs, generator))
    }

    /// Resolves a repository and searches jobs for the same query at once.
    /// Returns the validation or not-found error after recording its
    /// message; job and suggestion failures only set messages.
    pub async fn search(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            self.message = Some(EMPTY_QUERY_MESSAGE.to_string());
            self.jobs_message = None;
            return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }
        self.message = None;
        self.jobs_message = None;

        let resolver = Resolver::new(self.github.as_ref());
        let generator = self.generator.as_deref();
        let repository_flow = async {
            let resolution = resolver.resolve(query).await;
            let suggestions = match &resolution {
                Ok(found) => Some(generate_rows(generator, Some(&found.repository)).await),
                Err(_) => None,
            };
            (resolution, suggestions)
        };
        let ((resolution, suggestions), jobs) =
            tokio::join!(repository_flow, fetch_first_job(self.jobs.as_deref(), query));

        self.apply_jobs(jobs);

        let resolution = match resolution {
            Ok(resolution) => resolution,
            Err(e) => {
                self.matched_by = None;
                self.message = Some(e.to_string());
                return Err(e);
            }
        };
        log::debug!("Search trail for '{}': {}", query, resolution.trail());
        self.matched_by = Some(resolution.strategy);
        self.store.select_repository(Some(resolution.repository));
        if let Some(outcome) = suggestions {
            self.apply_suggestions(outcome);
        }
        Ok(())
    }

    pub async fn featured(&mut self) -> Result<()> {
        self.featured_with(&mut OsRandom).await
    }

    pub async fn featured_with(&mut self, rng: &mut dyn IndexSource) -> Result<()> {
        self.message = None;
        if self.generator.is_none() {
            let err = AppError::missing_gemini_key();
            self.message = Some(err.to_string());
            return Err(err);
        }

        match pick_featured(self.github.as_ref(), rng).await {
            Ok(repository) => {
                log::info!("Featured repository: {}", repository.full_name);
                self.matched_by = None;
                self.store.select_repository(Some(repository));
                self.refresh_suggestions().await;
                Ok(())
            }
            Err(e) => {
                log::warn!("Featured pick failed: {}", e);
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Regenerates suggestions for the current repository.
    pub async fn refresh_suggestions(&mut self) {
        let outcome = generate_rows(self.generator.as_deref(), self.store.current_repository()).await;
        self.apply_suggestions(outcome);
    }

    fn apply_jobs(&mut self, outcome: JobsOutcome) {
        match outcome {
            JobsOutcome::Found(posting) => self.store.select_job(Some(posting)),
            JobsOutcome::Cleared(message) => {
                self.store.clear_job();
                self.jobs_message = Some(message);
            }
        }
    }

    fn apply_suggestions(&mut self, outcome: Result<Vec<SuggestionRow>>) {
        match outcome {
            Ok(rows) => self.suggestions = rows,
            Err(e) => {
                self.suggestions.clear();
                self.message = Some(match e {
                    AppError::ConfigurationMissing { .. } => e.to_string(),
                    _ => {
                        log::warn!("{}", e);
                        GENERATION_FAILED_MESSAGE.to_string()
                    }
                });
            }
        }
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SelectionStore {
        &mut self.store
    }

    pub fn suggestions(&self) -> &[SuggestionRow] {
        &self.suggestions
    }

    pub fn matched_by(&self) -> Option<Strategy> {
        self.matched_by
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn jobs_message(&self) -> Option<&str> {
        self.jobs_message.as_deref()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            selection: &self.store,
            suggestions: &self.suggestions,
            matched_by: self.matched_by,
            message: self.message(),
            jobs_message: self.jobs_message(),
        }
    }
}

async fn fetch_first_job(jobs: Option<&dyn JobSearch>, query: &str) -> JobsOutcome {
    let Some(jobs) = jobs else {
        return JobsOutcome::Cleared(AppError::missing_serpapi_key().to_string());
    };
    match jobs.search_jobs(query).await {
        Ok(raw) => match raw.first() {
            Some(first) => JobsOutcome::Found(normalize_job_posting(first, 0)),
            None => JobsOutcome::Cleared(NO_JOBS_MESSAGE.to_string()),
        },
        Err(e) => {
            log::warn!("Job search failed: {}", e);
            JobsOutcome::Cleared(JOBS_FAILED_MESSAGE.to_string())
        }
    }
}

async fn generate_rows(
    generator: Option<&dyn SuggestionGenerator>,
    repository: Option<&RepositoryRecord>,
) -> Result<Vec<SuggestionRow>> {
    let generator = generator.ok_or_else(AppError::missing_gemini_key)?;
    let summary = suggest::repository_summary(repository);
    let text = generator.generate(&summary, suggest::instruction()).await?;
    Ok(to_suggestion_rows(Some(&text)))
}
