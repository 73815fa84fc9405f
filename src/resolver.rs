//! Maps a free-text query to one repository by walking an ordered chain of
//! GitHub searches. The chain is sequential and stops at the first stage
//! that yields a repository; a stage that fails or comes back empty is
//! skipped, never retried.

use crate::error::{AppError, Result};
use crate::github::{RepoSort, RepositorySearch, SortOrder, USER_PAGE};
use crate::types::{GitHubSearchHit, RepositoryRecord};
use serde::Serialize;
use std::fmt;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    OrganizationName,
    RepositoryName,
    UserLogin,
    UserBio,
    ReadmeContent,
    RepositoryReadme,
    Description,
    CommitMessage,
}

impl Strategy {
    pub const CHAIN: [Strategy; 8] = [
        Strategy::OrganizationName,
        Strategy::RepositoryName,
        Strategy::UserLogin,
        Strategy::UserBio,
        Strategy::ReadmeContent,
        Strategy::RepositoryReadme,
        Strategy::Description,
        Strategy::CommitMessage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::OrganizationName => "organization name",
            Strategy::RepositoryName => "repository name",
            Strategy::UserLogin => "user login",
            Strategy::UserBio => "user bio",
            Strategy::ReadmeContent => "README.md content",
            Strategy::RepositoryReadme => "repository readme",
            Strategy::Description => "repository description",
            Strategy::CommitMessage => "commit message",
        }
    }

    /// Runs this stage once. Errors are folded into the outcome.
    pub async fn run(self, search: &dyn RepositorySearch, query: &str) -> StageOutcome {
        match self.attempt(search, query).await {
            Ok(Some(repository)) => StageOutcome::Matched(repository),
            Ok(None) => StageOutcome::Empty,
            Err(e) => StageOutcome::Failed(e.to_string()),
        }
    }

    async fn attempt(
        self,
        search: &dyn RepositorySearch,
        query: &str,
    ) -> Result<Option<RepositoryRecord>> {
        match self {
            Strategy::OrganizationName => {
                let orgs = search
                    .search_users(&format!("{} type:org in:login", query), USER_PAGE)
                    .await?;
                let Some(org) = orgs.first() else {
                    return Ok(None);
                };
                let repos = search
                    .search_repositories(
                        &format!("org:{} {} in:name", org.login, query),
                        RepoSort::Stars,
                        SortOrder::Desc,
                    )
                    .await?;
                Ok(repos.into_iter().next())
            }
            Strategy::RepositoryName => {
                top_repository(search, &format!("{} in:name", query)).await
            }
            Strategy::UserLogin => {
                let users = search
                    .search_users(&format!("{} type:user in:login", query), USER_PAGE)
                    .await?;
                let Some(user) = users.first() else {
                    return Ok(None);
                };
                let repos = search
                    .search_repositories(
                        &format!("user:{} {} in:name", user.login, query),
                        RepoSort::Updated,
                        SortOrder::Desc,
                    )
                    .await?;
                Ok(repos.into_iter().next())
            }
            Strategy::UserBio => {
                let users = search
                    .search_users(&format!("{} in:bio type:user", query), USER_PAGE)
                    .await?;
                let Some(user) = users.first() else {
                    return Ok(None);
                };
                let repos = search
                    .list_user_repositories(&user.login, RepoSort::Updated)
                    .await?;
                Ok(prefer_description_match(repos, query))
            }
            Strategy::ReadmeContent => {
                let hits = search
                    .search_code(&format!("{} in:file filename:README.md", query))
                    .await?;
                full_record_for_first_hit(search, &hits).await
            }
            Strategy::RepositoryReadme => {
                top_repository(search, &format!("{} in:readme", query)).await
            }
            Strategy::Description => {
                top_repository(search, &format!("{} in:description", query)).await
            }
            Strategy::CommitMessage => {
                let hits = search.search_commits(query).await?;
                full_record_for_first_hit(search, &hits).await
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Matched(RepositoryRecord),
    Empty,
    Failed(String),
}

impl StageOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            StageOutcome::Matched(_) => "matched",
            StageOutcome::Empty => "empty",
            StageOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub strategy: Strategy,
    pub outcome: StageOutcome,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub repository: RepositoryRecord,
    pub strategy: Strategy,
    /// Every stage that ran, in order, the matching one last.
    pub attempts: Vec<StageReport>,
}

impl Resolution {
    /// `stage=outcome` for every attempt, e.g. `organization name=empty`.
    pub fn trail(&self) -> String {
        self.attempts
            .iter()
            .map(|attempt| format!("{}={}", attempt.strategy, attempt.outcome.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub struct Resolver<'a> {
    search: &'a dyn RepositorySearch,
}

impl<'a> Resolver<'a> {
    pub fn new(search: &'a dyn RepositorySearch) -> Self {
        Resolver { search }
    }

    pub async fn resolve(&self, query: &str) -> Result<Resolution> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }

        let mut attempts = Vec::with_capacity(Strategy::CHAIN.len());
        for strategy in Strategy::CHAIN {
            log::debug!("Trying {} search for '{}'", strategy, query);
            let outcome = strategy.run(self.search, query).await;
            match &outcome {
                StageOutcome::Matched(repo) => {
                    log::info!("Matched {} via {} search", repo.full_name, strategy);
                    let repository = repo.clone();
                    attempts.push(StageReport { strategy, outcome });
                    return Ok(Resolution {
                        repository,
                        strategy,
                        attempts,
                    });
                }
                StageOutcome::Empty => log::debug!("{} search found nothing", strategy),
                StageOutcome::Failed(reason) => {
                    log::debug!("{} search failed: {}", strategy, reason)
                }
            }
            attempts.push(StageReport { strategy, outcome });
        }

        log::info!("No repository found for '{}' after {} searches", query, attempts.len());
        Err(AppError::NotFound)
    }
}

async fn top_repository(
    search: &dyn RepositorySearch,
    query: &str,
) -> Result<Option<RepositoryRecord>> {
    let repos = search
        .search_repositories(query, RepoSort::Stars, SortOrder::Desc)
        .await?;
    Ok(repos.into_iter().next())
}

async fn full_record_for_first_hit(
    search: &dyn RepositorySearch,
    hits: &[GitHubSearchHit],
) -> Result<Option<RepositoryRecord>> {
    let Some((owner, name)) = hits.first().and_then(|hit| hit.repository.coordinates()) else {
        return Ok(None);
    };
    search.get_repository(owner, name).await.map(Some)
}

/// First repository whose description mentions the query, else the most
/// recent one.
fn prefer_description_match(
    repos: Vec<RepositoryRecord>,
    query: &str,
) -> Option<RepositoryRecord> {
    let needle = query.to_lowercase();
    let position = repos.iter().position(|repo| {
        repo.description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&needle)
    });
    repos.into_iter().nth(position.unwrap_or(0))
}
