pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod analysis;
pub mod cache;
pub mod svg;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AggregatorConfig, Config};
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient, RetryPolicy};
pub use analysis::{Rank, StatsAggregator};
pub use cache::{CacheStatus, TwoTierCache};
pub use service::{RenderedDocument, StatsService};
pub use svg::{render_document, render_error};
