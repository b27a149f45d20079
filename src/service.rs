use std::sync::Arc;
use std::time::Duration;

use crate::analysis::StatsAggregator;
use crate::cache::{CacheStatus, TwoTierCache};
use crate::config::{AggregatorConfig, Config};
use crate::error::{Error, Result};
use crate::github::{GitHubApi, GitHubClient, RetryPolicy};
use crate::models::{RenderRequest, StatsSnapshot};
use crate::svg::{render_document, render_error};

const MAX_USERNAME_LEN: usize = 39;

/// Outcome of a render request. Failures still carry a well-formed SVG.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub svg: Arc<str>,
    /// 200 on success, otherwise the status of the underlying error.
    pub status: u16,
    /// Document-tier outcome; `None` for error documents.
    pub cache: Option<CacheStatus>,
}

impl RenderedDocument {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub struct StatsService {
    aggregator: StatsAggregator,
    cache: TwoTierCache,
}

impl StatsService {
    pub fn new(api: Arc<dyn GitHubApi>, config: &Config) -> Self {
        Self {
            aggregator: StatsAggregator::new(api, AggregatorConfig::from(config)),
            cache: TwoTierCache::new(config),
        }
    }

    /// Service backed by the live GitHub API.
    pub fn from_config(config: &Config) -> Result<Self> {
        let retry = RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.retry_base_delay_ms),
        );
        let client = GitHubClient::new(config.github_token.as_deref(), retry)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Renders the requested document, serving from cache where possible.
    /// Never fails: errors become an error document with a matching status.
    pub async fn render(&self, request: &RenderRequest) -> RenderedDocument {
        let username = &request.config.username;
        match self.try_render(request).await {
            Ok((svg, cache)) => {
                tracing::info!("Rendered stats for {} ({:?})", username, cache);
                RenderedDocument {
                    svg,
                    status: 200,
                    cache: Some(cache),
                }
            }
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    tracing::error!("Failed to render stats for {}: {}", username, e);
                } else {
                    tracing::warn!("Failed to render stats for {}: {}", username, e);
                }
                RenderedDocument {
                    svg: Arc::from(render_error(status, &e.root_cause().to_string())),
                    status,
                    cache: None,
                }
            }
        }
    }

    async fn try_render(&self, request: &RenderRequest) -> Result<(Arc<str>, CacheStatus)> {
        let config = &request.config;
        validate_username(&config.username)?;

        let bypass = request.bypass_cache;
        self.cache
            .documents
            .get_or_compute(&config.cache_key(), bypass, || async move {
                let (stats, _) = self.stats(&config.username, bypass).await?;
                Ok(Arc::from(render_document(&stats, config)))
            })
            .await
    }

    /// Snapshot for `username` from the stats tier, aggregating on a miss.
    pub async fn stats(
        &self,
        username: &str,
        bypass_cache: bool,
    ) -> Result<(Arc<StatsSnapshot>, CacheStatus)> {
        validate_username(username)?;
        self.cache
            .stats
            .get_or_compute(username, bypass_cache, || async move {
                self.aggregator.aggregate(username).await.map(Arc::new)
            })
            .await
    }
}

/// GitHub login rules: 1 to 39 ASCII alphanumerics or single hyphens, not
/// starting or ending with a hyphen.
fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::Config("Username is required".to_string()));
    }

    let valid = username.len() <= MAX_USERNAME_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--");

    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!("'{}' is not a valid GitHub username", username)))
    }
}
