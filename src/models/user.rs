use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    pub created_at: DateTime<Utc>,
}

impl GitHubUser {
    /// Name to show on cards, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.login.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    /// Repository size in kilobytes as reported by the REST API.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_tolerates_missing_counts() {
        let repo: Repository = serde_json::from_str(
            r#"{"name": "dotfiles", "language": null, "stargazers_count": 3}"#,
        )
        .unwrap();
        assert_eq!(repo.stargazers_count, 3);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.size, 0);
        assert!(repo.language.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let user: GitHubUser = serde_json::from_str(
            r#"{"login": "octocat", "name": "  ", "bio": null, "created_at": "2011-01-25T18:44:36Z"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "octocat");
    }
}
