use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ContributionDay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_contributions: u64,
}

/// Derives streaks from a chronological contribution calendar.
///
/// The walk runs newest-first. `current` only follows the running streak
/// while today has not been seen yet, or within the first two entries, so a
/// day that has not posted contributions yet does not break it. Once today
/// has been seen, the first empty day resets `current`.
pub fn calculate_streak(
    days: &[ContributionDay],
    total_contributions: u64,
    today: NaiveDate,
) -> StreakStats {
    let mut current_streak = 0;
    let mut longest_streak = 0;
    let mut temp_streak = 0;
    let mut found_today = false;

    for (i, day) in days.iter().rev().enumerate() {
        if day.date == today {
            found_today = true;
        }

        if day.contribution_count > 0 {
            temp_streak += 1;
            longest_streak = longest_streak.max(temp_streak);

            if !found_today || i <= 1 {
                current_streak = temp_streak;
            }
        } else {
            if found_today && current_streak > 0 {
                current_streak = 0;
            }
            temp_streak = 0;
        }
    }

    StreakStats {
        current_streak,
        longest_streak,
        total_contributions,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Consecutive days ending at `last`, one per count.
    fn days_ending(last: NaiveDate, counts: &[u32]) -> Vec<ContributionDay> {
        let len = counts.len() as i64;
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ContributionDay {
                date: last - Duration::days(len - 1 - i as i64),
                contribution_count: count,
            })
            .collect()
    }

    #[test]
    fn test_all_zero_days() {
        let today = date(2024, 5, 10);
        let days = days_ending(today, &[0; 30]);
        let stats = calculate_streak(&days, 0, today);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 0);
    }

    #[test]
    fn test_every_day_active() {
        let today = date(2024, 5, 10);
        let days = days_ending(date(2024, 4, 30), &[3; 21]);
        let stats = calculate_streak(&days, 63, today);
        assert_eq!(stats.current_streak, 21);
        assert_eq!(stats.longest_streak, 21);
        assert_eq!(stats.total_contributions, 63);
    }

    #[test]
    fn test_empty_calendar() {
        let stats = calculate_streak(&[], 0, date(2024, 1, 1));
        assert_eq!(stats, StreakStats::default());
    }

    #[test]
    fn test_today_without_contributions_keeps_yesterday() {
        let today = date(2024, 5, 10);
        let days = days_ending(today, &[1, 1, 1, 1, 0]);
        let stats = calculate_streak(&days, 4, today);
        assert_eq!(stats.longest_streak, 4);
        // Today (i = 0) is empty while current is still 0; yesterday (i = 1)
        // is inside the lookback window.
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn test_gap_after_today_breaks_current() {
        let today = date(2024, 5, 10);
        let days = days_ending(today, &[1, 1, 1, 0, 1, 1]);
        let stats = calculate_streak(&days, 5, today);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_longest_tracks_oldest_run() {
        let today = date(2024, 5, 10);
        let days = days_ending(today, &[2, 2, 2, 2, 2, 0, 0, 1, 1]);
        let stats = calculate_streak(&days, 12, today);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.current_streak, 0, "a gap after today breaks the current streak");
    }
}
