use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLicense {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// A repository as returned by the GitHub REST API. Never mutated after
/// fetching; a new selection replaces it wholesale.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub owner: RepositoryOwner,
    pub description: Option<String>,
    pub language: Option<String>,
    pub license: Option<RepositoryLicense>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub html_url: String,
}

/// A job posting in display shape, see [`crate::normalize::normalize_job_posting`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub description: String,
    pub image: Option<String>,
    pub link: String,
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub id: usize,
    pub item: String,
}

// SerpAPI google_jobs structures. Every field is optional upstream.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawJobPosting {
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub via: Option<String>,
    pub share_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub extensions: Vec<Value>,
    pub detected_extensions: Option<DetectedExtensions>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub apply_options: Vec<JobLink>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub related_links: Vec<JobLink>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DetectedExtensions {
    pub schedule_type: Option<Value>,
    pub posted_at: Option<Value>,
    pub salary: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct JobLink {
    pub link: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct JobSearchResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub jobs_results: Vec<RawJobPosting>,
}

// GitHub API response structures
#[derive(Deserialize, Debug)]
pub struct GitHubSearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GitHubUser {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RepositoryRefOwner {
    pub login: Option<String>,
}

/// Partial repository carried by code and commit search hits.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RepositoryRef {
    pub name: Option<String>,
    pub owner: Option<RepositoryRefOwner>,
}

impl RepositoryRef {
    /// Owner login and name, or `None` when either is missing or blank.
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        let owner = self.owner.as_ref()?.login.as_deref()?.trim();
        let name = self.name.as_deref()?.trim();
        if owner.is_empty() || name.is_empty() {
            None
        } else {
            Some((owner, name))
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GitHubSearchHit {
    #[serde(default)]
    pub repository: RepositoryRef,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GitHubLicense {
    pub key: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts anything: a non-array becomes an empty list, and array elements
/// that don't fit `T` are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}
