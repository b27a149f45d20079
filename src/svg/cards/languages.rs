use crate::models::StatsSnapshot;
use crate::svg::cards::{frame, PADDING};
use crate::svg::theme::Theme;
use crate::taxonomy::language_color;

const MAX_LANGUAGES: usize = 5;
const BAR_HEIGHT: f64 = 8.0;

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> Option<String> {
    let shares = stats.language_shares(MAX_LANGUAGES);
    if shares.is_empty() {
        return None;
    }

    let mut card = frame(theme, width, height, "Top Languages");
    let track_width = width - PADDING * 2.0;
    let row_spacing = (height - 70.0) / MAX_LANGUAGES as f64;

    for (index, (name, percentage)) in shares.iter().enumerate() {
        let y = 62.0 + index as f64 * row_spacing;
        let fill = language_color(name).unwrap_or(theme.colors.accent.as_str());
        let percent = format!("{:.1}%", percentage);

        card.text(
            PADDING,
            y,
            name,
            &[
                ("font-family", &theme.font),
                ("font-size", &12),
                ("fill", &theme.colors.text),
            ],
        )
        .text(
            width - PADDING,
            y,
            &percent,
            &[
                ("font-family", &theme.mono_font),
                ("font-size", &11),
                ("fill", &theme.colors.text_secondary),
                ("text-anchor", &"end"),
            ],
        )
        .rect(
            PADDING,
            y + 5.0,
            track_width,
            BAR_HEIGHT,
            &[("fill", &theme.colors.border), ("rx", &4)],
        )
        .rect(
            PADDING,
            y + 5.0,
            round2(track_width * percentage / 100.0),
            BAR_HEIGHT,
            &[("fill", &fill), ("rx", &4)],
        );
    }

    Some(card.fragment())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
