//! In-memory collaborators for unit tests.

use crate::error::{AppError, Result};
use crate::github::{RepoSort, RepositorySearch, SortOrder};
use crate::jobs::JobSearch;
use crate::suggest::SuggestionGenerator;
use crate::types::{
    GitHubLicense, GitHubSearchHit, GitHubUser, RawJobPosting, RepositoryOwner, RepositoryRecord,
    RepositoryRef, RepositoryRefOwner,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn repo(id: u64, owner: &str, name: &str) -> RepositoryRecord {
    RepositoryRecord {
        id,
        name: name.to_string(),
        full_name: format!("{}/{}", owner, name),
        owner: RepositoryOwner {
            login: owner.to_string(),
            avatar_url: format!("https://avatars.example/{}", owner),
        },
        description: None,
        language: Some("Rust".to_string()),
        license: None,
        topics: vec![],
        stargazers_count: 100,
        forks_count: 10,
        html_url: format!("https://github.com/{}/{}", owner, name),
    }
}

pub fn user(login: &str) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
    }
}

pub fn hit(owner: &str, name: &str) -> GitHubSearchHit {
    GitHubSearchHit {
        repository: RepositoryRef {
            name: Some(name.to_string()),
            owner: Some(RepositoryRefOwner {
                login: Some(owner.to_string()),
            }),
        },
    }
}

/// Answers from canned tables keyed by the exact query string; anything
/// not in a table is an empty result. Every call is recorded as
/// `operation:arguments`.
#[derive(Default)]
pub struct FakeSearch {
    users: HashMap<String, Vec<GitHubUser>>,
    repositories: HashMap<String, Vec<RepositoryRecord>>,
    user_repositories: HashMap<String, Vec<RepositoryRecord>>,
    records: HashMap<(String, String), RepositoryRecord>,
    commits: HashMap<String, Vec<GitHubSearchHit>>,
    code: HashMap<String, Vec<GitHubSearchHit>>,
    licenses: Vec<GitHubLicense>,
    failing: HashSet<String>,
    fail_all: bool,
    calls: Mutex<Vec<String>>,
    meeting: Mutex<Option<Meeting>>,
}

/// Two parties that each announce their arrival and then wait for the
/// other. Neither side finishes unless both are in flight together.
pub struct Meeting {
    arrived: Arc<Notify>,
    partner: Arc<Notify>,
}

impl Meeting {
    pub fn pair() -> (Meeting, Meeting) {
        let left = Arc::new(Notify::new());
        let right = Arc::new(Notify::new());
        (
            Meeting {
                arrived: left.clone(),
                partner: right.clone(),
            },
            Meeting {
                arrived: right,
                partner: left,
            },
        )
    }

    pub async fn attend(&self) {
        self.arrived.notify_one();
        self.partner.notified().await;
    }
}

impl FakeSearch {
    pub fn with_users(mut self, query: &str, users: Vec<GitHubUser>) -> Self {
        self.users.insert(query.to_string(), users);
        self
    }

    pub fn with_repositories(mut self, query: &str, repos: Vec<RepositoryRecord>) -> Self {
        self.repositories.insert(query.to_string(), repos);
        self
    }

    pub fn with_user_repositories(mut self, login: &str, repos: Vec<RepositoryRecord>) -> Self {
        self.user_repositories.insert(login.to_string(), repos);
        self
    }

    pub fn with_repository(mut self, record: RepositoryRecord) -> Self {
        self.records
            .insert((record.owner.login.clone(), record.name.clone()), record);
        self
    }

    pub fn with_commits(mut self, query: &str, hits: Vec<GitHubSearchHit>) -> Self {
        self.commits.insert(query.to_string(), hits);
        self
    }

    pub fn with_code(mut self, query: &str, hits: Vec<GitHubSearchHit>) -> Self {
        self.code.insert(query.to_string(), hits);
        self
    }

    pub fn with_licenses(mut self, keys: &[&str]) -> Self {
        self.licenses = keys
            .iter()
            .map(|key| GitHubLicense {
                key: key.to_string(),
            })
            .collect();
        self
    }

    /// Fails the call recorded exactly as `call`.
    pub fn failing_on(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    /// The first `search_users` call blocks until the other side of
    /// `meeting` shows up.
    pub fn meeting_on_first_user_search(self, meeting: Meeting) -> Self {
        *self.meeting.lock().unwrap() = Some(meeting);
        self
    }

    pub fn failing_everywhere(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    fn record(&self, call: String) -> Result<()> {
        let fails = self.fail_all || self.failing.contains(&call);
        self.calls.lock().unwrap().push(call.clone());
        if fails {
            Err(AppError::Transport(format!("fake failure for {}", call)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RepositorySearch for FakeSearch {
    async fn search_users(&self, query: &str, _per_page: u32) -> Result<Vec<GitHubUser>> {
        self.record(format!("search_users:{}", query))?;
        let meeting = self.meeting.lock().unwrap().take();
        if let Some(meeting) = meeting {
            meeting.attend().await;
        }
        Ok(self.users.get(query).cloned().unwrap_or_default())
    }

    async fn search_repositories(
        &self,
        query: &str,
        sort: RepoSort,
        order: SortOrder,
    ) -> Result<Vec<RepositoryRecord>> {
        self.record(format!(
            "search_repositories:{}:{}:{}",
            query,
            sort.as_str(),
            order.as_str()
        ))?;
        Ok(self.repositories.get(query).cloned().unwrap_or_default())
    }

    async fn list_user_repositories(
        &self,
        username: &str,
        sort: RepoSort,
    ) -> Result<Vec<RepositoryRecord>> {
        self.record(format!("list_user_repositories:{}:{}", username, sort.as_str()))?;
        Ok(self.user_repositories.get(username).cloned().unwrap_or_default())
    }

    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepositoryRecord> {
        self.record(format!("get_repository:{}/{}", owner, name))?;
        self.records
            .get(&(owner.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| AppError::Transport("GitHub API returned status 404".to_string()))
    }

    async fn search_commits(&self, query: &str) -> Result<Vec<GitHubSearchHit>> {
        self.record(format!("search_commits:{}", query))?;
        Ok(self.commits.get(query).cloned().unwrap_or_default())
    }

    async fn search_code(&self, query: &str) -> Result<Vec<GitHubSearchHit>> {
        self.record(format!("search_code:{}", query))?;
        Ok(self.code.get(query).cloned().unwrap_or_default())
    }

    async fn list_licenses(&self) -> Result<Vec<GitHubLicense>> {
        self.record("list_licenses:".to_string())?;
        Ok(self.licenses.clone())
    }
}

pub enum FakeJobs {
    Postings(Vec<RawJobPosting>),
    /// Answers only once the other side of the meeting is running too.
    AfterMeeting(Meeting, Vec<RawJobPosting>),
    Failing,
}

#[async_trait]
impl JobSearch for FakeJobs {
    async fn search_jobs(&self, _keyword: &str) -> Result<Vec<RawJobPosting>> {
        match self {
            FakeJobs::Postings(postings) => Ok(postings.clone()),
            FakeJobs::AfterMeeting(meeting, postings) => {
                meeting.attend().await;
                Ok(postings.clone())
            }
            FakeJobs::Failing => Err(AppError::Transport("status 500".to_string())),
        }
    }
}

pub enum FakeGenerator {
    Text(&'static str),
    Failing,
}

#[async_trait]
impl SuggestionGenerator for FakeGenerator {
    async fn generate(&self, _summary: &str, _instruction: &str) -> Result<String> {
        match self {
            FakeGenerator::Text(text) => Ok(text.to_string()),
            FakeGenerator::Failing => Err(AppError::Generation("quota exceeded".to_string())),
        }
    }
}
