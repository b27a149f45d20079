//! In-memory `GitHubApi` used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::github::{GitHubApi, RateLimitStatus};
use crate::models::{
    ContributionCalendar, ContributionWindow, GitHubUser, IssueSearch, Repository, StatsSnapshot,
};

pub struct FakeGitHub {
    pub authenticated: bool,
    /// `None` makes every user lookup fail with 404.
    pub user: Option<GitHubUser>,
    pub repositories: Vec<Repository>,
    /// Keyed by calendar year.
    pub windows: HashMap<i32, ContributionWindow>,
    pub calendar: ContributionCalendar,
    pub searches: HashMap<String, IssueSearch>,
    /// Keyed by `owner/name`; missing entries fail with 404.
    pub stars: HashMap<String, u64>,
    /// Keyed by repository name; missing entries fail with 404.
    pub languages: HashMap<String, HashMap<String, u64>>,
    /// `None` makes the probe call fail.
    pub rate_limit: Option<RateLimitStatus>,
    pub user_calls: AtomicU32,
    pub star_lookups: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new(login: &str) -> Self {
        Self {
            authenticated: true,
            user: Some(user(login, 2020)),
            repositories: Vec::new(),
            windows: HashMap::new(),
            calendar: ContributionCalendar::default(),
            searches: HashMap::new(),
            stars: HashMap::new(),
            languages: HashMap::new(),
            rate_limit: Some(RateLimitStatus {
                limit: 5000,
                remaining: 4999,
                reset: 1_700_000_000,
            }),
            user_calls: AtomicU32::new(0),
            star_lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn user_calls(&self) -> u32 {
        self.user_calls.load(Ordering::SeqCst)
    }
}

pub fn user(login: &str, created_year: i32) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
        name: Some(format!("{} <dev>", login)),
        bio: Some("Builds things & breaks them".to_string()),
        avatar_url: format!("https://avatars.example/{}", login),
        followers: 12,
        following: 3,
        public_repos: 0,
        public_gists: 1,
        created_at: Utc
            .with_ymd_and_hms(created_year, 6, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
    }
}

pub fn repo(name: &str, stars: u64, language: Option<&str>, size: u64) -> Repository {
    Repository {
        name: name.to_string(),
        full_name: String::new(),
        stargazers_count: stars,
        forks_count: stars / 2,
        language: language.map(str::to_string),
        size,
        fork: false,
    }
}

/// A busy account fetched at a fixed instant, for rendering tests.
pub fn sample_snapshot() -> StatsSnapshot {
    let fetched = Utc
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let mut stats = StatsSnapshot::empty(user("octocat", 2015), fetched);
    stats.total_stars = 1_234;
    stats.total_commits = 987;
    stats.total_pull_requests = 42;
    stats.total_issues = 7;
    stats.contributed_to = 12;
    stats.current_streak = 31;
    stats.longest_streak = 45;
    stats.total_contributions = 1_500;
    stats.languages.insert("Rust".into(), 700);
    stats.languages.insert("Go".into(), 300);
    stats
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn user(&self, username: &str) -> Result<GitHubUser> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.user
            .clone()
            .ok_or_else(|| Error::NotFound(format!("User \"{}\" not found", username)))
    }

    async fn repositories(&self, _username: &str) -> Result<Vec<Repository>> {
        Ok(self.repositories.clone())
    }

    async fn contributions_in_window(
        &self,
        _username: &str,
        from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<ContributionWindow> {
        if !self.authenticated {
            return Err(Error::Forbidden("graphql requires a token".to_string()));
        }
        Ok(self.windows.get(&from.year()).cloned().unwrap_or_default())
    }

    async fn contribution_calendar(
        &self,
        _username: &str,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<ContributionCalendar> {
        if !self.authenticated {
            return Err(Error::Forbidden("graphql requires a token".to_string()));
        }
        Ok(self.calendar.clone())
    }

    async fn search_issues(&self, query: &str) -> Result<IssueSearch> {
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn repository_stars(&self, owner: &str, name: &str) -> Result<u64> {
        let full_name = format!("{}/{}", owner, name);
        if let Ok(mut lookups) = self.star_lookups.lock() {
            lookups.push(full_name.clone());
        }
        self.stars
            .get(&full_name)
            .copied()
            .ok_or(Error::NotFound(full_name))
    }

    async fn repository_languages(&self, _owner: &str, name: &str) -> Result<HashMap<String, u64>> {
        self.languages
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    async fn rate_limit(&self) -> Result<RateLimitStatus> {
        self.rate_limit.ok_or_else(|| Error::GitHubApi {
            status: Some(503),
            message: "rate limit endpoint unavailable".to_string(),
        })
    }
}
