use crate::models::{AccessLevel, StatsSnapshot};
use crate::svg::builder::format_number;
use crate::svg::cards::{figure, frame, label, PADDING};
use crate::svg::theme::Theme;

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> String {
    let mut card = frame(theme, width, height, "Commit Activity");
    let (center_x, center_y) = (width / 2.0, height / 2.0 + 10.0);

    let subtitle = match stats.access {
        AccessLevel::Authenticated => "All time",
        AccessLevel::Anonymous => "Needs a GitHub token",
    };
    label(&mut card, theme, PADDING, PADDING + 40.0, subtitle, "start");

    card.circle(
        center_x,
        center_y,
        80.0,
        &[
            ("fill", &"none"),
            ("stroke", &theme.colors.border),
            ("stroke-width", &1),
            ("opacity", &0.3),
        ],
    );
    figure(
        &mut card,
        theme,
        center_x,
        center_y,
        &format_number(stats.total_commits),
        48,
        &theme.colors.primary,
        "middle",
    );
    label(&mut card, theme, center_x, center_y + 25.0, "Total Commits", "middle");

    card.fragment()
}
