use crate::models::StatsSnapshot;
use crate::svg::builder::{format_number, truncate_text};
use crate::svg::cards::{figure, frame, label, PADDING};
use crate::svg::theme::Theme;

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> String {
    let mut card = frame(theme, width, height, "Repository Stats");

    let rows = [
        ("Total Repositories", stats.created_repositories),
        ("Total Stars", stats.total_stars),
        ("Total Forks", stats.total_forks),
    ];
    for (index, (name, value)) in rows.iter().enumerate() {
        let y = 70.0 + index as f64 * 36.0;
        label(&mut card, theme, PADDING, y, name, "start");
        figure(
            &mut card,
            theme,
            width - PADDING,
            y,
            &format_number(*value),
            20,
            &theme.colors.primary,
            "end",
        );
    }

    if let Some(top) = stats.top_repositories.first() {
        let caption = format!("Top: {}", truncate_text(&top.name, 40));
        label(&mut card, theme, PADDING, height - 18.0, &caption, "start");
        let stars = format!("★ {}", format_number(top.stargazers_count));
        label(&mut card, theme, width - PADDING, height - 18.0, &stars, "end");
    }

    card.fragment()
}
