use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::github::api::GitHubApi;

/// Core quota as reported by `/rate_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    /// Reset time in epoch seconds.
    pub reset: i64,
}

impl RateLimitStatus {
    pub fn reset_at(&self) -> DateTime<Utc> {
        epoch_to_datetime(self.reset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitProbe {
    Available(RateLimitStatus),
    /// The probe call itself failed; quota state is not known.
    Unknown,
}

/// Advisory quota check. An exhausted quota is an error; a failing probe is
/// reported as `Unknown` rather than propagated.
pub async fn probe_rate_limit(api: &dyn GitHubApi) -> Result<RateLimitProbe> {
    match api.rate_limit().await {
        Ok(status) if status.remaining == 0 => {
            tracing::warn!("Rate limit exhausted, resets at {}", status.reset_at());
            Err(Error::RateLimited {
                reset_at: status.reset_at(),
            })
        }
        Ok(status) => {
            tracing::debug!("Rate limit: {}/{} remaining", status.remaining, status.limit);
            Ok(RateLimitProbe::Available(status))
        }
        Err(e) => {
            tracing::warn!("Rate limit probe failed: {}", e);
            Ok(RateLimitProbe::Unknown)
        }
    }
}

pub(crate) fn remaining_from_headers(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

pub(crate) fn reset_from_headers(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .map(epoch_to_datetime)
}

fn epoch_to_datetime(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;
    use crate::testing::FakeGitHub;

    #[tokio::test]
    async fn test_probe_reports_available_quota() {
        let fake = FakeGitHub::new("octocat");
        let probe = probe_rate_limit(&fake).await.unwrap();
        assert!(matches!(probe, RateLimitProbe::Available(s) if s.remaining > 0));
    }

    #[tokio::test]
    async fn test_probe_fails_with_429_when_exhausted() {
        let mut fake = FakeGitHub::new("octocat");
        fake.rate_limit = Some(RateLimitStatus {
            limit: 60,
            remaining: 0,
            reset: 1_700_000_000,
        });

        let err = probe_rate_limit(&fake).await.unwrap_err();
        assert_eq!(err.status_code(), 429);
        match err {
            Error::RateLimited { reset_at } => assert_eq!(reset_at.timestamp(), 1_700_000_000),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_probe_failure_is_unknown() {
        let mut fake = FakeGitHub::new("octocat");
        fake.rate_limit = None;
        assert_eq!(probe_rate_limit(&fake).await.unwrap(), RateLimitProbe::Unknown);
    }

    #[test]
    fn test_header_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        assert_eq!(remaining_from_headers(&headers), Some(0));
        assert_eq!(
            reset_from_headers(&headers).map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert_eq!(remaining_from_headers(&HeaderMap::new()), None);
    }
}
