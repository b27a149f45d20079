use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::analysis::streak::{calculate_streak, StreakStats};
use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::github::{probe_rate_limit, GitHubApi};
use crate::models::{
    AccessLevel, ContributionWindow, GitHubUser, LanguageTotals, Repository, StatsSnapshot,
};

const TOP_REPOSITORIES: usize = 5;
const CALENDAR_DAYS: i64 = 365;

pub struct StatsAggregator {
    api: Arc<dyn GitHubApi>,
    config: AggregatorConfig,
}

/// Running totals across contribution windows.
#[derive(Debug, Default)]
struct ContributionTotals {
    commits: u64,
    pull_requests: u64,
    issues: u64,
    commits_to_own: u64,
    commits_to_other: u64,
    pull_requests_to_other: u64,
    /// Deduplicated `owner/name` of every repository touched.
    repositories: BTreeSet<String>,
}

impl ContributionTotals {
    fn add_window(&mut self, window: ContributionWindow, login: &str) {
        self.commits += window.total_commits;
        self.pull_requests += window.total_pull_requests;
        self.issues += window.total_issues;

        for contribution in &window.commits_by_repository {
            if contribution.is_owned_by(login) {
                self.commits_to_own += contribution.count;
            } else {
                self.commits_to_other += contribution.count;
            }
        }
        self.pull_requests_to_other += window
            .pull_requests_by_repository
            .iter()
            .filter(|c| !c.is_owned_by(login))
            .map(|c| c.count)
            .sum::<u64>();

        let touched = window
            .commits_by_repository
            .into_iter()
            .chain(window.pull_requests_by_repository)
            .chain(window.issues_by_repository)
            .map(|c| c.name_with_owner);
        self.repositories.extend(touched);
    }

    fn owned_count(&self, login: &str) -> u64 {
        self.repositories
            .iter()
            .filter(|r| is_owned(r, login))
            .count() as u64
    }

    fn other_repositories<'a>(&'a self, login: &'a str) -> impl Iterator<Item = &'a String> {
        self.repositories.iter().filter(move |r| !is_owned(r, login))
    }
}

fn is_owned(name_with_owner: &str, login: &str) -> bool {
    name_with_owner
        .split_once('/')
        .map(|(owner, _)| owner)
        .unwrap_or(name_with_owner)
        .eq_ignore_ascii_case(login)
}

impl StatsAggregator {
    pub fn new(api: Arc<dyn GitHubApi>, config: AggregatorConfig) -> Self {
        Self { api, config }
    }

    /// Builds a fresh snapshot for `username`. Failures are wrapped in
    /// `Error::FetchFailed` with the underlying status preserved.
    pub async fn aggregate(&self, username: &str) -> Result<StatsSnapshot> {
        self.collect(username, Utc::now())
            .await
            .map_err(|e| Error::fetch_failed(username, e))
    }

    async fn collect(&self, username: &str, now: DateTime<Utc>) -> Result<StatsSnapshot> {
        probe_rate_limit(self.api.as_ref()).await?;

        tracing::info!("Aggregating stats for: {}", username);
        let user = self.api.user(username).await?;
        let login = user.login.clone();

        let repositories = self.api.repositories(username).await?;
        tracing::info!("Found {} repositories", repositories.len());

        let authenticated = self.api.is_authenticated();
        if !authenticated {
            tracing::warn!(
                "No token available for {}, streaks are zeroed and languages use repository size",
                username
            );
        }

        let contributions = if authenticated {
            self.yearly_contributions(&user, now).await?
        } else {
            self.searched_contributions(&login).await
        };

        let other: Vec<&String> = contributions.other_repositories(&login).collect();
        let indirect_stars = self.indirect_stars(&other).await;

        let streak = if authenticated {
            self.streak(&login, now).await
        } else {
            StreakStats::default()
        };

        let languages = if authenticated {
            self.language_bytes(&login, &repositories).await
        } else {
            language_sizes(&repositories)
        };

        let total_stars: u64 = repositories.iter().map(|r| r.stargazers_count).sum();
        let total_forks: u64 = repositories.iter().map(|r| r.forks_count).sum();
        let contributed_to_own = contributions.owned_count(&login);
        let contributed_to_other = other.len() as u64;

        let mut snapshot = StatsSnapshot::empty(user, now);
        snapshot.top_repositories = top_repositories(&repositories);
        snapshot.created_repositories = repositories.len() as u64;
        snapshot.repositories = repositories;
        snapshot.total_stars = total_stars;
        snapshot.total_forks = total_forks;
        snapshot.direct_stars = total_stars;
        snapshot.indirect_stars = indirect_stars;
        snapshot.total_commits = contributions.commits;
        snapshot.total_pull_requests = contributions.pull_requests;
        snapshot.total_issues = contributions.issues;
        snapshot.commits_to_own_repositories = contributions.commits_to_own;
        snapshot.commits_to_other_repositories = contributions.commits_to_other;
        snapshot.pull_requests_to_other_repositories = contributions.pull_requests_to_other;
        snapshot.contributed_to = contributions.repositories.len() as u64;
        snapshot.contributed_to_own_repositories = contributed_to_own;
        snapshot.contributed_to_other_repositories = contributed_to_other;
        snapshot.current_streak = streak.current_streak;
        snapshot.longest_streak = streak.longest_streak;
        snapshot.total_contributions = streak.total_contributions;
        snapshot.languages = languages;
        snapshot.access = if authenticated {
            AccessLevel::Authenticated
        } else {
            AccessLevel::Anonymous
        };

        tracing::info!(
            "Aggregated {}: {} commits, {} stars, {} repositories contributed to",
            username,
            snapshot.total_commits,
            snapshot.total_stars,
            snapshot.contributed_to
        );
        Ok(snapshot)
    }

    /// One contributions query per calendar year since the account was created.
    async fn yearly_contributions(
        &self,
        user: &GitHubUser,
        now: DateTime<Utc>,
    ) -> Result<ContributionTotals> {
        let mut totals = ContributionTotals::default();

        for year in user.created_at.year()..=now.year() {
            let (from, to) = year_window(year, now);
            let window = self
                .api
                .contributions_in_window(&user.login, from, to)
                .await?;
            tracing::debug!(
                "{} contributions in {}: {} commits, {} PRs, {} issues",
                user.login,
                year,
                window.total_commits,
                window.total_pull_requests,
                window.total_issues
            );
            totals.add_window(window, &user.login);
        }

        Ok(totals)
    }

    /// REST search fallback. Commit counts are not available here.
    async fn searched_contributions(&self, login: &str) -> ContributionTotals {
        let pr_query = format!("author:{} type:pr", login);
        let issue_query = format!("author:{} type:issue", login);
        let (prs, issues) = futures::join!(
            self.api.search_issues(&pr_query),
            self.api.search_issues(&issue_query)
        );

        let mut totals = ContributionTotals::default();
        for (kind, result) in [("pull request", prs), ("issue", issues)] {
            match result {
                Ok(search) => {
                    if kind == "issue" {
                        totals.issues = search.total_count;
                    } else {
                        totals.pull_requests = search.total_count;
                    }
                    totals
                        .repositories
                        .extend(search.items.iter().filter_map(|i| i.name_with_owner()));
                }
                Err(e) => tracing::warn!("{} search failed for {}: {}", kind, login, e),
            }
        }
        totals
    }

    async fn indirect_stars(&self, repositories: &[&String]) -> u64 {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let api = &self.api;

        let lookups = repositories
            .iter()
            .filter_map(|full_name| full_name.split_once('/'))
            .map(|(owner, name)| {
                let sem = semaphore.clone();
                async move {
                    let _permit = sem.acquire().await.ok()?;
                    match api.repository_stars(owner, name).await {
                        Ok(stars) => Some(stars),
                        Err(e) => {
                            tracing::warn!("Skipping stars for {}/{}: {}", owner, name, e);
                            None
                        }
                    }
                }
            });

        join_all(lookups).await.into_iter().flatten().sum()
    }

    async fn streak(&self, login: &str, now: DateTime<Utc>) -> StreakStats {
        let from = now - Duration::days(CALENDAR_DAYS);
        match self.api.contribution_calendar(login, from, now).await {
            Ok(calendar) => {
                calculate_streak(&calendar.days, calendar.total_contributions, now.date_naive())
            }
            Err(e) => {
                tracing::warn!("Contribution calendar unavailable for {}: {}", login, e);
                StreakStats::default()
            }
        }
    }

    async fn language_bytes(&self, login: &str, repositories: &[Repository]) -> LanguageTotals {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let api = &self.api;

        let lookups = repositories
            .iter()
            .filter(|r| r.language.is_some())
            .map(|repo| {
                let sem = semaphore.clone();
                let (owner, name) = repo
                    .full_name
                    .split_once('/')
                    .unwrap_or((login, repo.name.as_str()));
                async move {
                    let _permit = sem.acquire().await.ok()?;
                    match api.repository_languages(owner, name).await {
                        Ok(languages) => Some(languages),
                        Err(e) => {
                            tracing::warn!("Skipping languages for {}/{}: {}", owner, name, e);
                            None
                        }
                    }
                }
            });

        let mut totals = LanguageTotals::new();
        for languages in join_all(lookups).await.into_iter().flatten() {
            for (language, bytes) in languages {
                *totals.entry(language).or_insert(0) += bytes;
            }
        }
        totals
    }
}

/// `[Jan 1, Dec 31 23:59:59]` of `year`, clipped to `now` for the current year.
fn year_window(year: i32, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let end = Utc
        .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .unwrap_or(now);
    (from, end.min(now))
}

/// Size proxy used when per-repository language bytes are unavailable.
fn language_sizes(repositories: &[Repository]) -> LanguageTotals {
    let mut totals = LanguageTotals::new();
    for repo in repositories {
        if let Some(language) = &repo.language {
            *totals.entry(language.clone()).or_insert(0) += repo.size.max(1);
        }
    }
    totals
}

fn top_repositories(repositories: &[Repository]) -> Vec<Repository> {
    let mut ranked = repositories.to_vec();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.truncate(TOP_REPOSITORIES);
    ranked
}
