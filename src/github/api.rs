use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::github::rate_limiter::RateLimitStatus;
use crate::models::{
    ContributionCalendar, ContributionWindow, GitHubUser, IssueSearch, Repository,
};

/// Remote operations the aggregator depends on. Implementations are expected
/// to apply their own retry policy; every method may fail with a
/// status-coded error.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Whether calls run with a token. GraphQL and language breakdowns
    /// require one.
    fn is_authenticated(&self) -> bool;

    async fn user(&self, username: &str) -> Result<GitHubUser>;

    /// Every repository owned by `username`, in fetch order.
    async fn repositories(&self, username: &str) -> Result<Vec<Repository>>;

    async fn contributions_in_window(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionWindow>;

    async fn contribution_calendar(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar>;

    async fn search_issues(&self, query: &str) -> Result<IssueSearch>;

    async fn repository_stars(&self, owner: &str, name: &str) -> Result<u64>;

    async fn repository_languages(&self, owner: &str, name: &str) -> Result<HashMap<String, u64>>;

    async fn rate_limit(&self) -> Result<RateLimitStatus>;
}
