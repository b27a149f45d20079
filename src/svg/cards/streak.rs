use crate::models::StatsSnapshot;
use crate::svg::builder::format_number;
use crate::svg::cards::{figure, frame, label, PADDING};
use crate::svg::theme::Theme;

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> String {
    let mut card = frame(theme, width, height, "🔥 Contribution Streak");
    let middle = width / 2.0;

    label(&mut card, theme, PADDING, 80.0, "Current Streak", "start");
    let current = format!("{} days", stats.current_streak);
    figure(&mut card, theme, PADDING, 105.0, &current, 28, &theme.colors.primary, "start");

    label(&mut card, theme, middle, 80.0, "Longest Streak", "middle");
    let longest = format!("{} days", stats.longest_streak);
    figure(&mut card, theme, middle, 105.0, &longest, 28, &theme.colors.secondary, "middle");

    label(&mut card, theme, PADDING, 150.0, "Total Contributions", "start");
    figure(
        &mut card,
        theme,
        PADDING,
        175.0,
        &format_number(stats.total_contributions),
        24,
        &theme.colors.accent,
        "start",
    );

    card.fragment()
}
