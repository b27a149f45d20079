use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

/// Daily contribution calendar for a bounded window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    /// Chronological, one entry per day.
    pub days: Vec<ContributionDay>,
}

/// Contributions made to one repository inside a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryContribution {
    /// `owner/name`
    pub name_with_owner: String,
    pub count: u64,
}

impl RepositoryContribution {
    pub fn owner(&self) -> &str {
        self.name_with_owner
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.name_with_owner)
    }

    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner().eq_ignore_ascii_case(login)
    }
}

/// Totals for one contribution window (one calendar year in practice).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionWindow {
    pub total_commits: u64,
    pub total_pull_requests: u64,
    pub total_issues: u64,
    pub commits_by_repository: Vec<RepositoryContribution>,
    pub pull_requests_by_repository: Vec<RepositoryContribution>,
    pub issues_by_repository: Vec<RepositoryContribution>,
}

/// Result of a REST issue search, used when GraphQL is unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueSearch {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<IssueSearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSearchItem {
    pub repository_url: String,
}

impl IssueSearchItem {
    /// `owner/name` extracted from the repository API URL.
    pub fn name_with_owner(&self) -> Option<String> {
        let mut parts = self.repository_url.trim_end_matches('/').rsplit('/');
        let name = parts.next().filter(|s| !s.is_empty())?;
        let owner = parts.next().filter(|s| !s.is_empty())?;
        Some(format!("{}/{}", owner, name))
    }
}
