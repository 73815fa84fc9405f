use crate::error::{AppError, Result};
use crate::types::{
    GitHubLicense, GitHubSearchHit, GitHubSearchResponse, GitHubUser, RepositoryRecord,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("technerd/", env!("CARGO_PKG_VERSION"));
const DEFAULT_ACCEPT: &str = "application/vnd.github+json";
// topics on search results
const MERCY_PREVIEW: &str = "application/vnd.github.mercy-preview+json";
// commit search
const CLOAK_PREVIEW: &str = "application/vnd.github.cloak-preview+json";

pub const USER_PAGE: u32 = 20;
pub const REPO_PAGE: u32 = 30;
pub const CODE_PAGE: u32 = 10;
pub const COMMIT_PAGE: u32 = 10;
pub const ORG_BROWSE_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSort {
    Stars,
    Updated,
}

impl RepoSort {
    pub fn as_str(self) -> &'static str {
        match self {
            RepoSort::Stars => "stars",
            RepoSort::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
        }
    }
}

/// The slice of the GitHub API the resolver and the featured picker use.
/// Every call returns a possibly empty list or a transport failure.
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    async fn search_users(&self, query: &str, per_page: u32) -> Result<Vec<GitHubUser>>;

    async fn search_repositories(
        &self,
        query: &str,
        sort: RepoSort,
        order: SortOrder,
    ) -> Result<Vec<RepositoryRecord>>;

    async fn list_user_repositories(
        &self,
        username: &str,
        sort: RepoSort,
    ) -> Result<Vec<RepositoryRecord>>;

    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepositoryRecord>;

    async fn search_commits(&self, query: &str) -> Result<Vec<GitHubSearchHit>>;

    async fn search_code(&self, query: &str) -> Result<Vec<GitHubSearchHit>>;

    async fn list_licenses(&self) -> Result<Vec<GitHubLicense>>;
}

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        match token {
            Some(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| AppError::Config(format!("invalid GitHub token: {}", e)))?;
                headers.insert(AUTHORIZATION, value);
            }
            None => log::warn!("No GitHub token configured, using unauthenticated requests"),
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        accept: Option<&'static str>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(params);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            log::warn!("GitHub API returned status {} for {}", status, path);
            return Err(AppError::Transport(format!("GitHub API returned status {}", status)));
        }
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl RepositorySearch for GitHubClient {
    async fn search_users(&self, query: &str, per_page: u32) -> Result<Vec<GitHubUser>> {
        let params = [("q", query.to_string()), ("per_page", per_page.to_string())];
        let resp: GitHubSearchResponse<GitHubUser> =
            self.get_json("/search/users", &params, None).await?;
        Ok(resp.items)
    }

    async fn search_repositories(
        &self,
        query: &str,
        sort: RepoSort,
        order: SortOrder,
    ) -> Result<Vec<RepositoryRecord>> {
        let params = [
            ("q", query.to_string()),
            ("sort", sort.as_str().to_string()),
            ("order", order.as_str().to_string()),
            ("per_page", REPO_PAGE.to_string()),
        ];
        let resp: GitHubSearchResponse<RepositoryRecord> = self
            .get_json("/search/repositories", &params, Some(MERCY_PREVIEW))
            .await?;
        Ok(resp.items)
    }

    async fn list_user_repositories(
        &self,
        username: &str,
        sort: RepoSort,
    ) -> Result<Vec<RepositoryRecord>> {
        let path = format!("/users/{}/repos", urlencoding::encode(username));
        let params = [
            ("sort", sort.as_str().to_string()),
            ("per_page", REPO_PAGE.to_string()),
        ];
        self.get_json(&path, &params, None).await
    }

    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepositoryRecord> {
        let path = format!(
            "/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        self.get_json(&path, &[], None).await
    }

    async fn search_commits(&self, query: &str) -> Result<Vec<GitHubSearchHit>> {
        let params = [
            ("q", query.to_string()),
            ("sort", "author-date".to_string()),
            ("order", SortOrder::Desc.as_str().to_string()),
            ("per_page", COMMIT_PAGE.to_string()),
        ];
        let resp: GitHubSearchResponse<GitHubSearchHit> = self
            .get_json("/search/commits", &params, Some(CLOAK_PREVIEW))
            .await?;
        Ok(resp.items)
    }

    async fn search_code(&self, query: &str) -> Result<Vec<GitHubSearchHit>> {
        let params = [("q", query.to_string()), ("per_page", CODE_PAGE.to_string())];
        let resp: GitHubSearchResponse<GitHubSearchHit> =
            self.get_json("/search/code", &params, None).await?;
        Ok(resp.items)
    }

    async fn list_licenses(&self) -> Result<Vec<GitHubLicense>> {
        self.get_json("/licenses", &[], None).await
    }
}
