pub mod store;

use std::sync::Arc;

use crate::config::Config;
use crate::models::StatsSnapshot;

pub use store::{CacheEntry, CacheStatus, TtlCache};

/// Raw statistics and rendered documents, each with its own TTL.
///
/// Stats are keyed by username so every card combination for one account
/// shares a single aggregation. Documents are keyed by
/// `RenderConfig::cache_key()`.
pub struct TwoTierCache {
    pub stats: TtlCache<Arc<StatsSnapshot>>,
    pub documents: TtlCache<Arc<str>>,
}

impl TwoTierCache {
    pub fn new(config: &Config) -> Self {
        Self {
            stats: TtlCache::new("stats", config.stats_ttl(), config.cache_max_entries),
            documents: TtlCache::new(
                "document",
                config.document_ttl(),
                config.cache_max_entries,
            ),
        }
    }
}
