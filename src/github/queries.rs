use serde::Deserialize;

use crate::models::{
    ContributionCalendar, ContributionDay, ContributionWindow, RepositoryContribution,
};

pub const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      totalPullRequestContributions
      totalIssueContributions
      commitContributionsByRepository(maxRepositories: 100) {
        contributions { totalCount }
        repository { nameWithOwner }
      }
      pullRequestContributionsByRepository(maxRepositories: 100) {
        contributions { totalCount }
        repository { nameWithOwner }
      }
      issueContributionsByRepository(maxRepositories: 100) {
        contributions { totalCount }
        repository { nameWithOwner }
      }
    }
  }
}
"#;

pub const CALENDAR_QUERY: &str = r#"
query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope<T> {
    pub user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CollectionEnvelope<T> {
    pub contributions_collection: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContributions {
    #[serde(default)]
    total_commit_contributions: u64,
    #[serde(default)]
    total_pull_request_contributions: u64,
    #[serde(default)]
    total_issue_contributions: u64,
    #[serde(default)]
    commit_contributions_by_repository: Vec<RawRepositoryContribution>,
    #[serde(default)]
    pull_request_contributions_by_repository: Vec<RawRepositoryContribution>,
    #[serde(default)]
    issue_contributions_by_repository: Vec<RawRepositoryContribution>,
}

#[derive(Debug, Deserialize)]
struct RawRepositoryContribution {
    contributions: Option<RawCount>,
    repository: Option<RawRepositoryRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCount {
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRepositoryRef {
    name_with_owner: Option<String>,
}

fn convert(raw: Vec<RawRepositoryContribution>) -> Vec<RepositoryContribution> {
    raw.into_iter()
        .filter_map(|r| {
            let name_with_owner = r.repository?.name_with_owner?;
            Some(RepositoryContribution {
                name_with_owner,
                count: r.contributions.map(|c| c.total_count).unwrap_or(0),
            })
        })
        .collect()
}

impl From<RawContributions> for ContributionWindow {
    fn from(raw: RawContributions) -> Self {
        Self {
            total_commits: raw.total_commit_contributions,
            total_pull_requests: raw.total_pull_request_contributions,
            total_issues: raw.total_issue_contributions,
            commits_by_repository: convert(raw.commit_contributions_by_repository),
            pull_requests_by_repository: convert(raw.pull_request_contributions_by_repository),
            issues_by_repository: convert(raw.issue_contributions_by_repository),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCalendarCollection {
    contribution_calendar: RawCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCalendar {
    #[serde(default)]
    total_contributions: u64,
    #[serde(default)]
    weeks: Vec<RawWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeek {
    #[serde(default)]
    contribution_days: Vec<ContributionDay>,
}

impl From<RawCalendarCollection> for ContributionCalendar {
    fn from(raw: RawCalendarCollection) -> Self {
        let calendar = raw.contribution_calendar;
        Self {
            total_contributions: calendar.total_contributions,
            days: calendar
                .weeks
                .into_iter()
                .flat_map(|w| w.contribution_days)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributions_response_conversion() {
        let json = r#"{
            "user": {
                "contributionsCollection": {
                    "totalCommitContributions": 120,
                    "totalPullRequestContributions": 8,
                    "totalIssueContributions": 3,
                    "commitContributionsByRepository": [
                        {"contributions": {"totalCount": 100}, "repository": {"nameWithOwner": "octocat/site"}},
                        {"contributions": {"totalCount": 20}, "repository": {"nameWithOwner": "rust-lang/rust"}}
                    ],
                    "pullRequestContributionsByRepository": [
                        {"contributions": {"totalCount": 8}, "repository": null}
                    ]
                }
            }
        }"#;

        let envelope: UserEnvelope<CollectionEnvelope<RawContributions>> =
            serde_json::from_str(json).unwrap();
        let window: ContributionWindow = envelope.user.unwrap().contributions_collection.into();

        assert_eq!(window.total_commits, 120);
        assert_eq!(window.total_pull_requests, 8);
        assert_eq!(window.commits_by_repository.len(), 2);
        assert_eq!(window.commits_by_repository[1].name_with_owner, "rust-lang/rust");
        assert!(window.pull_requests_by_repository.is_empty());
        assert!(window.issues_by_repository.is_empty());
    }

    #[test]
    fn test_calendar_flattens_weeks() {
        let json = r#"{
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": 5,
                        "weeks": [
                            {"contributionDays": [{"date": "2024-01-01", "contributionCount": 2}]},
                            {"contributionDays": [
                                {"date": "2024-01-08", "contributionCount": 0},
                                {"date": "2024-01-09", "contributionCount": 3}
                            ]}
                        ]
                    }
                }
            }
        }"#;

        let envelope: UserEnvelope<CollectionEnvelope<RawCalendarCollection>> =
            serde_json::from_str(json).unwrap();
        let calendar: ContributionCalendar =
            envelope.user.unwrap().contributions_collection.into();

        assert_eq!(calendar.total_contributions, 5);
        assert_eq!(calendar.days.len(), 3);
        assert_eq!(calendar.days[2].contribution_count, 3);
    }
}
