use crate::models::StatsSnapshot;
use crate::svg::builder::{escape_xml, SvgBuilder};
use crate::svg::cards::{frame, PADDING};
use crate::svg::theme::Theme;
use crate::taxonomy::skill_icon;

const MAX_SKILLS: usize = 10;
const ICON_SIZE: f64 = 50.0;
const ICON_SPACING: f64 = 70.0;
const ICONS_PER_ROW: usize = 5;

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> Option<String> {
    let shares = stats.language_shares(MAX_SKILLS);
    if shares.is_empty() {
        return None;
    }

    let mut card = frame(theme, width, height, "Skills & Technologies");

    for (index, (name, _)) in shares.iter().enumerate() {
        let x = PADDING + (index % ICONS_PER_ROW) as f64 * ICON_SPACING;
        let y = 58.0 + (index / ICONS_PER_ROW) as f64 * ICON_SPACING;

        let mut tile = SvgBuilder::new();
        tile.raw(format!("<title>{}</title>", escape_xml(name)))
            .rect(
                x,
                y,
                ICON_SIZE,
                ICON_SIZE,
                &[("fill", &theme.colors.border), ("rx", &8), ("opacity", &0.3)],
            )
            .text(
                x + ICON_SIZE / 2.0,
                y + ICON_SIZE / 2.0 + 6.0,
                &skill_icon(name),
                &[
                    ("font-family", &theme.font),
                    ("font-size", &18),
                    ("font-weight", &600),
                    ("fill", &theme.colors.primary),
                    ("text-anchor", &"middle"),
                ],
            );
        card.group(&tile.fragment(), &[]);
    }

    Some(card.fragment())
}
