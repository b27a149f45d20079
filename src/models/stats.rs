use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{GitHubUser, Repository};

/// Language name to cumulative bytes (or size units when degraded).
pub type LanguageTotals = BTreeMap<String, u64>;

/// Whether the snapshot was built with a token. Anonymous snapshots carry
/// zeroed streaks and size-based language totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Authenticated,
    Anonymous,
}

/// One immutable aggregation of an account's statistics.
///
/// `contributed_to_own_repositories + contributed_to_other_repositories`
/// partitions the deduplicated set behind `contributed_to`, but
/// `contributed_to` itself is only as complete as the per-window
/// repository breakdown the API returns, so it can undercount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_commits: u64,
    pub total_pull_requests: u64,
    pub total_issues: u64,
    pub created_repositories: u64,
    pub contributed_to: u64,
    pub commits_to_own_repositories: u64,
    pub commits_to_other_repositories: u64,
    pub pull_requests_to_other_repositories: u64,
    pub contributed_to_own_repositories: u64,
    pub contributed_to_other_repositories: u64,
    pub direct_stars: u64,
    pub indirect_stars: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_contributions: u64,
    pub languages: LanguageTotals,
    pub top_repositories: Vec<Repository>,
    pub access: AccessLevel,
    pub last_fetch: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Snapshot with every derived field zeroed.
    pub fn empty(user: GitHubUser, last_fetch: DateTime<Utc>) -> Self {
        Self {
            user,
            repositories: Vec::new(),
            total_stars: 0,
            total_forks: 0,
            total_commits: 0,
            total_pull_requests: 0,
            total_issues: 0,
            created_repositories: 0,
            contributed_to: 0,
            commits_to_own_repositories: 0,
            commits_to_other_repositories: 0,
            pull_requests_to_other_repositories: 0,
            contributed_to_own_repositories: 0,
            contributed_to_other_repositories: 0,
            direct_stars: 0,
            indirect_stars: 0,
            current_streak: 0,
            longest_streak: 0,
            total_contributions: 0,
            languages: LanguageTotals::new(),
            top_repositories: Vec::new(),
            access: AccessLevel::Anonymous,
            last_fetch,
        }
    }

    /// Top languages by share, highest first. Ties keep alphabetical order.
    pub fn language_shares(&self, limit: usize) -> Vec<(String, f64)> {
        let total: u64 = self.languages.values().sum();
        if total == 0 {
            return Vec::new();
        }

        let mut shares: Vec<(String, f64)> = self
            .languages
            .iter()
            .map(|(name, bytes)| (name.clone(), *bytes as f64 / total as f64 * 100.0))
            .collect();
        shares.sort_by(|a, b| b.1.total_cmp(&a.1));
        shares.truncate(limit);
        shares
    }
}
