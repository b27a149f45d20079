use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Optional; without it the aggregator runs in degraded (anonymous) mode.
    pub github_token: Option<String>,
    pub concurrency_limit: usize,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub stats_cache_ttl_secs: u64,
    pub document_cache_ttl_secs: u64,
    pub cache_max_entries: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            concurrency_limit: 5,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            stats_cache_ttl_secs: 60 * 60,
            document_cache_ttl_secs: 30 * 60,
            cache_max_entries: Some(1000),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let concurrency_limit = parse_var("CONCURRENCY_LIMIT")?.unwrap_or(defaults.concurrency_limit);
        if concurrency_limit == 0 {
            return Err(Error::Config("CONCURRENCY_LIMIT must be at least 1".to_string()));
        }

        let max_retries = parse_var("MAX_RETRIES")?.unwrap_or(defaults.max_retries);
        if max_retries == 0 {
            return Err(Error::Config("MAX_RETRIES must be at least 1".to_string()));
        }

        let retry_base_delay_ms =
            parse_var("RETRY_BASE_DELAY_MS")?.unwrap_or(defaults.retry_base_delay_ms);
        let stats_cache_ttl_secs =
            parse_var("STATS_CACHE_TTL_SECS")?.unwrap_or(defaults.stats_cache_ttl_secs);
        let document_cache_ttl_secs =
            parse_var("DOCUMENT_CACHE_TTL_SECS")?.unwrap_or(defaults.document_cache_ttl_secs);

        // 0 disables the entry bound.
        let cache_max_entries = match parse_var::<usize>("CACHE_MAX_ENTRIES")? {
            Some(0) => None,
            Some(n) => Some(n),
            None => defaults.cache_max_entries,
        };

        Ok(Self {
            github_token,
            concurrency_limit,
            max_retries,
            retry_base_delay_ms,
            stats_cache_ttl_secs,
            document_cache_ttl_secs,
            cache_max_entries,
        })
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_cache_ttl_secs)
    }

    pub fn document_ttl(&self) -> Duration {
        Duration::from_secs(self.document_cache_ttl_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub concurrency_limit: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { concurrency_limit: 5 }
    }
}

impl From<&Config> for AggregatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
        }
    }
}
