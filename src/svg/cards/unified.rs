use crate::analysis::Rank;
use crate::models::StatsSnapshot;
use crate::svg::builder::{format_number, truncate_text};
use crate::svg::cards::{figure, frame, label, PADDING};
use crate::svg::theme::Theme;

const RING_RADIUS: f64 = 48.0;

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> String {
    let title = format!("{}'s GitHub Stats", truncate_text(stats.user.display_name(), 24));
    let mut card = frame(theme, width, height, &title);

    let rows = [
        ("Total Stars Earned", stats.total_stars),
        ("Total Commits", stats.total_commits),
        ("Total PRs", stats.total_pull_requests),
        ("Total Issues", stats.total_issues),
        ("Contributed to", stats.contributed_to),
    ];
    let value_x = width * 0.62;
    for (index, (name, value)) in rows.iter().enumerate() {
        let y = 72.0 + index as f64 * 24.0;
        label(&mut card, theme, PADDING, y, name, "start");
        card.text(
            value_x,
            y,
            &format_number(*value),
            &[
                ("font-family", &theme.font),
                ("font-size", &14),
                ("font-weight", &700),
                ("fill", &theme.colors.text),
                ("text-anchor", &"end"),
            ],
        );
    }

    let rank = Rank::for_stats(stats);
    let (cx, cy) = (width - PADDING - RING_RADIUS - 10.0, height / 2.0 + 8.0);
    card.circle(
        cx,
        cy,
        RING_RADIUS,
        &[
            ("fill", &"none"),
            ("stroke", &theme.colors.border),
            ("stroke-width", &6),
        ],
    )
    .circle(
        cx,
        cy,
        RING_RADIUS,
        &[
            ("fill", &"none"),
            ("stroke", &theme.colors.primary),
            ("stroke-width", &6),
            ("stroke-linecap", &"round"),
            ("opacity", &0.85),
        ],
    );
    figure(&mut card, theme, cx, cy + 12.0, rank.as_str(), 34, &theme.colors.primary, "middle");
    label(&mut card, theme, cx, cy + RING_RADIUS + 22.0, "Rank", "middle");

    card.fragment()
}
