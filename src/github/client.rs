use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::github::paginator::Paginator;
use crate::github::queries::{
    CollectionEnvelope, RawCalendarCollection, RawContributions, UserEnvelope, CALENDAR_QUERY,
    CONTRIBUTIONS_QUERY,
};
use crate::github::rate_limiter::{remaining_from_headers, reset_from_headers, RateLimitStatus};
use crate::github::retry::RetryPolicy;
use crate::models::{
    ContributionCalendar, ContributionWindow, GitHubUser, IssueSearch, Repository,
};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    authenticated: bool,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    rate: RateLimitStatus,
}

#[derive(Deserialize)]
struct RepositoryStars {
    #[serde(default)]
    stargazers_count: u64,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, retry: RetryPolicy) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("statcard/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        if token.is_none() {
            tracing::warn!("No GitHub token configured, contribution data will be limited");
        }

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
            retry,
            authenticated: token.is_some(),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();
        let client = &self.client;

        self.retry
            .execute(path, move || async move {
                let response = client.get(url).query(query).send().await?;
                let response = check_response(response, path).await?;
                Ok(response.json::<T>().await?)
            })
            .await
    }

    pub async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}/graphql", self.base_url);
        let url = url.as_str();
        let body = json!({ "query": query, "variables": variables });
        let body = &body;
        let client = &self.client;

        self.retry
            .execute("graphql", move || async move {
                let response = client.post(url).json(body).send().await?;
                let response = check_response(response, "graphql").await?;
                let payload: GraphQlResponse<T> = response.json().await?;
                unwrap_graphql(payload)
            })
            .await
    }
}

async fn check_response(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let remaining = remaining_from_headers(response.headers());
    let reset_at = reset_from_headers(response.headers());

    match status {
        StatusCode::NOT_FOUND => Err(Error::NotFound(resource.to_string())),
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited {
            reset_at: reset_at.unwrap_or_else(Utc::now),
        }),
        StatusCode::FORBIDDEN if remaining == Some(0) => Err(Error::RateLimited {
            reset_at: reset_at.unwrap_or_else(Utc::now),
        }),
        StatusCode::FORBIDDEN => Err(Error::Forbidden(resource.to_string())),
        StatusCode::UNAUTHORIZED => Err(Error::Forbidden(format!(
            "{}: invalid or expired token",
            resource
        ))),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(Error::GitHubApi {
                status: Some(status.as_u16()),
                message: format!("{} returned {} - {}", resource, status, body),
            })
        }
    }
}

fn unwrap_graphql<T>(payload: GraphQlResponse<T>) -> Result<T> {
    if !payload.errors.is_empty() {
        let message = payload
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        let has_type = |t: &str| payload.errors.iter().any(|e| e.error_type.as_deref() == Some(t));
        if has_type("NOT_FOUND") {
            return Err(Error::NotFound(message));
        }
        if has_type("FORBIDDEN") {
            return Err(Error::Forbidden(message));
        }
        if has_type("RATE_LIMITED") {
            return Err(Error::RateLimited { reset_at: Utc::now() });
        }
        return Err(Error::GraphQl(message));
    }

    payload
        .data
        .ok_or_else(|| Error::GraphQl("response contained no data".to_string()))
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl GitHubApi for GitHubClient {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn user(&self, username: &str) -> Result<GitHubUser> {
        tracing::info!("Fetching user: {}", username);
        self.get_json(&format!("/users/{}", username), &[])
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::NotFound(format!("User \"{}\" not found", username)),
                other => other,
            })
    }

    async fn repositories(&self, username: &str) -> Result<Vec<Repository>> {
        tracing::info!("Fetching repositories for: {}", username);
        let params = [("sort", "updated".to_string())];
        Paginator::new(self)
            .fetch_all(&format!("/users/{}/repos", username), &params, 100)
            .await
    }

    async fn contributions_in_window(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionWindow> {
        tracing::debug!("Fetching contributions for {} from {} to {}", username, from, to);
        let variables = json!({ "username": username, "from": iso(from), "to": iso(to) });
        let envelope: UserEnvelope<CollectionEnvelope<RawContributions>> =
            self.graphql(CONTRIBUTIONS_QUERY, variables).await?;

        envelope
            .user
            .map(|u| u.contributions_collection.into())
            .ok_or_else(|| Error::NotFound(format!("User \"{}\" not found", username)))
    }

    async fn contribution_calendar(
        &self,
        username: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar> {
        tracing::debug!("Fetching contribution calendar for {}", username);
        let variables = json!({ "username": username, "from": iso(from), "to": iso(to) });
        let envelope: UserEnvelope<CollectionEnvelope<RawCalendarCollection>> =
            self.graphql(CALENDAR_QUERY, variables).await?;

        envelope
            .user
            .map(|u| u.contributions_collection.into())
            .ok_or_else(|| Error::NotFound(format!("User \"{}\" not found", username)))
    }

    async fn search_issues(&self, query: &str) -> Result<IssueSearch> {
        tracing::debug!("Searching issues: {}", query);
        let params = [("q", query.to_string()), ("per_page", "50".to_string())];
        self.get_json("/search/issues", &params).await
    }

    async fn repository_stars(&self, owner: &str, name: &str) -> Result<u64> {
        let repo: RepositoryStars = self
            .get_json(&format!("/repos/{}/{}", owner, name), &[])
            .await?;
        Ok(repo.stargazers_count)
    }

    async fn repository_languages(&self, owner: &str, name: &str) -> Result<HashMap<String, u64>> {
        self.get_json(&format!("/repos/{}/{}/languages", owner, name), &[])
            .await
    }

    async fn rate_limit(&self) -> Result<RateLimitStatus> {
        // A single attempt: the probe is advisory and must not stall a request.
        let url = format!("{}/rate_limit", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_response(response, "/rate_limit").await?;
        let body: RateLimitResponse = response.json().await?;
        Ok(body.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> GraphQlResponse<serde_json::Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_graphql_not_found_maps_to_not_found() {
        let result = unwrap_graphql(payload(
            r#"{"data": {"user": null}, "errors": [{"type": "NOT_FOUND", "message": "Could not resolve to a User"}]}"#,
        ));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_graphql_other_errors_are_transient() {
        let err = unwrap_graphql(payload(
            r#"{"errors": [{"message": "Something went wrong"}]}"#,
        ))
        .unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Something went wrong"));
    }

    #[test]
    fn test_graphql_data_is_returned() {
        let value = unwrap_graphql(payload(r#"{"data": {"ok": true}}"#)).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_iso_timestamps() {
        let ts = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(iso(ts), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_client_tracks_authentication() {
        let anonymous = GitHubClient::new(None, RetryPolicy::default()).unwrap();
        assert!(!anonymous.is_authenticated());
        let authed = GitHubClient::new(Some("ghp_test"), RetryPolicy::default()).unwrap();
        assert!(authed.is_authenticated());
    }
}
