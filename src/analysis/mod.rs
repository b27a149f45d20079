pub mod aggregator;
pub mod rank;
pub mod streak;

pub use aggregator::StatsAggregator;
pub use rank::Rank;
pub use streak::{calculate_streak, StreakStats};
