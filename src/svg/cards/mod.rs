//! One renderer per card kind. Every renderer is a pure function of the
//! snapshot and theme, so the same inputs always produce the same bytes.

mod commits;
mod languages;
mod profile;
mod repositories;
mod skills;
mod streak;
mod trophies;
mod unified;

use crate::models::{CardKind, StatsSnapshot};
use crate::svg::builder::SvgBuilder;
use crate::svg::theme::Theme;

pub(crate) const PADDING: f64 = 20.0;

impl CardKind {
    /// Fragment for this card, or `None` when the snapshot has nothing to
    /// show for it. Skipped cards do not take a layout slot.
    pub fn render(
        &self,
        stats: &StatsSnapshot,
        theme: &Theme,
        width: u32,
        height: u32,
    ) -> Option<String> {
        let (width, height) = (f64::from(width), f64::from(height));
        match self {
            CardKind::Profile => Some(profile::render(&stats.user, theme, width, height)),
            CardKind::Repositories => Some(repositories::render(stats, theme, width, height)),
            CardKind::Commits => Some(commits::render(stats, theme, width, height)),
            CardKind::Streak => Some(streak::render(stats, theme, width, height)),
            CardKind::Languages => languages::render(stats, theme, width, height),
            CardKind::Skills => skills::render(stats, theme, width, height),
            CardKind::Trophies => Some(trophies::render(stats, theme, width, height)),
            CardKind::Unified => Some(unified::render(stats, theme, width, height)),
        }
    }
}

/// Background plate and title shared by every card.
pub(crate) fn frame(theme: &Theme, width: f64, height: f64, title: &str) -> SvgBuilder {
    let shadow = format!("filter: drop-shadow({})", theme.shadow);
    let mut builder = SvgBuilder::new();
    builder
        .rect(
            0.0,
            0.0,
            width,
            height,
            &[
                ("fill", &theme.colors.background),
                ("rx", &theme.border_radius),
                ("stroke", &theme.colors.border),
                ("stroke-width", &1),
                ("style", &shadow),
            ],
        )
        .text(
            PADDING,
            PADDING + 20.0,
            title,
            &[
                ("font-family", &theme.font),
                ("font-size", &18),
                ("font-weight", &600),
                ("fill", &theme.colors.text),
            ],
        );
    builder
}

/// Small secondary-colored caption.
pub(crate) fn label(builder: &mut SvgBuilder, theme: &Theme, x: f64, y: f64, text: &str, anchor: &str) {
    builder.text(
        x,
        y,
        text,
        &[
            ("font-family", &theme.font),
            ("font-size", &12),
            ("fill", &theme.colors.text_secondary),
            ("text-anchor", &anchor),
        ],
    );
}

/// Bold figure.
#[allow(clippy::too_many_arguments)]
pub(crate) fn figure(
    builder: &mut SvgBuilder,
    theme: &Theme,
    x: f64,
    y: f64,
    text: &str,
    size: u32,
    fill: &str,
    anchor: &str,
) {
    builder.text(
        x,
        y,
        text,
        &[
            ("font-family", &theme.font),
            ("font-size", &size),
            ("font-weight", &700),
            ("fill", &fill),
            ("text-anchor", &anchor),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_snapshot as snapshot;

    #[test]
    fn test_every_card_renders_with_languages() {
        let stats = snapshot();
        let theme = Theme::named("dark");
        for kind in CardKind::ALL {
            let fragment = kind.render(&stats, &theme, 450, 200);
            assert!(fragment.is_some(), "{} rendered nothing", kind);
            assert!(fragment.unwrap().starts_with("<rect"));
        }
    }

    #[test]
    fn test_language_cards_skip_without_totals() {
        let mut stats = snapshot();
        stats.languages.clear();
        let theme = Theme::named("dark");

        assert!(CardKind::Languages.render(&stats, &theme, 450, 200).is_none());
        assert!(CardKind::Skills.render(&stats, &theme, 450, 200).is_none());
        assert!(CardKind::Streak.render(&stats, &theme, 450, 200).is_some());
    }

    #[test]
    fn test_untrusted_text_is_escaped() {
        let mut stats = snapshot();
        stats.user.name = Some("<script>alert(1)</script>".into());
        stats.languages.insert("C<&>".into(), 5_000);
        let theme = Theme::named("dark");

        for kind in CardKind::ALL {
            let fragment = kind.render(&stats, &theme, 450, 200).unwrap_or_default();
            assert!(!fragment.contains("<script>"), "{} leaked markup", kind);
            assert!(!fragment.contains("C<&>"), "{} leaked markup", kind);
        }
    }
}
