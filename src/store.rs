use crate::types::{JobPosting, RepositoryRecord};
use serde::Serialize;

/// Session-scoped selection state: the current repository and job, their
/// most-recent-first histories, and the banned label list.
///
/// The current item is never also in its own history.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SelectionStore {
    current_repository: Option<RepositoryRecord>,
    current_job: Option<JobPosting>,
    previous_repositories: Vec<RepositoryRecord>,
    previous_jobs: Vec<JobPosting>,
    banned_labels: Vec<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the current repository (if any) to the front of history, then
    /// makes `record` current. `None` clears the current repository.
    pub fn select_repository(&mut self, record: Option<RepositoryRecord>) {
        if let Some(outgoing) = self.current_repository.take() {
            push_front_unique(&mut self.previous_repositories, outgoing, |r| r.id);
        }
        if let Some(incoming) = &record {
            self.previous_repositories.retain(|r| r.id != incoming.id);
        }
        self.current_repository = record;
    }

    pub fn select_job(&mut self, posting: Option<JobPosting>) {
        if let Some(outgoing) = self.current_job.take() {
            push_front_unique(&mut self.previous_jobs, outgoing, |j| j.id.clone());
        }
        if let Some(incoming) = &posting {
            self.previous_jobs.retain(|j| j.id != incoming.id);
        }
        self.current_job = posting;
    }

    /// Drops the current job without recording it in history.
    pub fn clear_job(&mut self) {
        self.current_job = None;
    }

    pub fn current_repository(&self) -> Option<&RepositoryRecord> {
        self.current_repository.as_ref()
    }

    pub fn current_job(&self) -> Option<&JobPosting> {
        self.current_job.as_ref()
    }

    pub fn previous_repositories(&self) -> &[RepositoryRecord] {
        &self.previous_repositories
    }

    pub fn previous_jobs(&self) -> &[JobPosting] {
        &self.previous_jobs
    }

    /// Returns false when the label is blank or already banned.
    pub fn ban_label(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.is_banned(label) {
            return false;
        }
        self.banned_labels.push(label.to_string());
        true
    }

    pub fn unban_label(&mut self, label: &str) -> bool {
        let label = label.trim();
        let before = self.banned_labels.len();
        self.banned_labels.retain(|l| l != label);
        self.banned_labels.len() != before
    }

    pub fn is_banned(&self, label: &str) -> bool {
        self.banned_labels.iter().any(|l| l == label)
    }

    pub fn banned_labels(&self) -> &[String] {
        &self.banned_labels
    }
}

fn push_front_unique<T, K, F>(history: &mut Vec<T>, item: T, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let id = key(&item);
    history.retain(|entry| key(entry) != id);
    history.insert(0, item);
}
