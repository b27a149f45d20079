pub mod api;
pub mod client;
pub mod paginator;
pub mod queries;
pub mod rate_limiter;
pub mod retry;

pub use api::GitHubApi;
pub use client::GitHubClient;
pub use paginator::Paginator;
pub use rate_limiter::{probe_rate_limit, RateLimitProbe, RateLimitStatus};
pub use retry::RetryPolicy;
