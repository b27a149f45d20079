use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::StatsSnapshot;

/// Letter grade shown on the unified card. An approximation, not a
/// calibrated percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    D,
    C,
    B,
    BPlus,
    A,
    APlus,
    S,
}

const COMMIT_WEIGHT: u64 = 2;
const STAR_WEIGHT: u64 = 10;
const PULL_REQUEST_WEIGHT: u64 = 15;
const ISSUE_WEIGHT: u64 = 5;
const FOLLOWER_WEIGHT: u64 = 1;
const CONTRIBUTED_TO_WEIGHT: u64 = 5;

impl Rank {
    pub fn score(stats: &StatsSnapshot) -> u64 {
        stats.total_commits * COMMIT_WEIGHT
            + stats.total_stars * STAR_WEIGHT
            + stats.total_pull_requests * PULL_REQUEST_WEIGHT
            + stats.total_issues * ISSUE_WEIGHT
            + stats.user.followers * FOLLOWER_WEIGHT
            + stats.contributed_to * CONTRIBUTED_TO_WEIGHT
    }

    pub fn from_score(score: u64) -> Self {
        match score {
            s if s >= 2500 => Rank::S,
            s if s >= 1500 => Rank::APlus,
            s if s >= 1000 => Rank::A,
            s if s >= 600 => Rank::BPlus,
            s if s >= 300 => Rank::B,
            s if s >= 100 => Rank::C,
            _ => Rank::D,
        }
    }

    pub fn for_stats(stats: &StatsSnapshot) -> Self {
        Self::from_score(Self::score(stats))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::S => "S",
            Rank::APlus => "A+",
            Rank::A => "A",
            Rank::BPlus => "B+",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::testing;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Rank::from_score(1500), Rank::APlus);
        assert_eq!(Rank::from_score(1499), Rank::A);
        assert_eq!(Rank::from_score(2500), Rank::S);
        assert_eq!(Rank::from_score(99), Rank::D);
        assert_eq!(Rank::from_score(100), Rank::C);
        assert_eq!(Rank::from_score(600), Rank::BPlus);
    }

    #[test]
    fn test_score_weights() {
        let mut stats = StatsSnapshot::empty(testing::user("octocat", 2015), Utc::now());
        stats.total_commits = 100;
        stats.total_stars = 10;
        stats.total_pull_requests = 4;
        stats.total_issues = 2;
        stats.contributed_to = 3;
        // 200 + 100 + 60 + 10 + 12 followers + 15
        assert_eq!(Rank::score(&stats), 397);
        assert_eq!(Rank::for_stats(&stats), Rank::B);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rank::APlus.to_string(), "A+");
        assert!(Rank::S > Rank::APlus);
    }
}
