pub mod builder;
pub mod cards;
pub mod error;
pub mod layout;
pub mod theme;

use crate::models::{RenderConfig, StatsSnapshot};

pub use builder::{escape_xml, format_number, truncate_text, SvgBuilder};
pub use error::render_error;
pub use layout::{compose, LayoutConfig};
pub use theme::Theme;

/// Renders the configured cards for `stats` into one document. Cards with
/// nothing to show are dropped before layout.
pub fn render_document(stats: &StatsSnapshot, config: &RenderConfig) -> String {
    let theme = Theme::for_config(config);
    let layout = LayoutConfig::new(config.layout);

    let fragments: Vec<String> = config
        .cards
        .iter()
        .filter_map(|card| card.render(stats, &theme, layout.card_width, layout.card_height))
        .collect();

    tracing::debug!(
        "Rendering {} of {} cards for {}",
        fragments.len(),
        config.cards.len(),
        config.username
    );
    compose(&fragments, &layout, &theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardKind, LayoutMode};
    use crate::testing::sample_snapshot as snapshot;

    #[test]
    fn test_rendering_is_deterministic() {
        let stats = snapshot();
        let mut config = RenderConfig::new("octocat");
        config.cards = CardKind::ALL.to_vec();
        config.theme = "cyberpunk".into();

        assert_eq!(render_document(&stats, &config), render_document(&stats, &config));
    }

    #[test]
    fn test_skipped_cards_do_not_take_a_slot() {
        let mut stats = snapshot();
        stats.languages.clear();
        let mut config = RenderConfig::new("octocat");
        config.cards = vec![CardKind::Languages, CardKind::Streak, CardKind::Skills];
        config.layout = LayoutMode::Row;

        let svg = render_document(&stats, &config);
        assert!(svg.starts_with("<svg width=\"450\" height=\"200\""));
        assert_eq!(svg.matches("<g transform=").count(), 1);
    }

    #[test]
    fn test_overrides_reach_the_document() {
        let mut config = RenderConfig::new("octocat");
        config.background_color = Some("#123456".into());
        let svg = render_document(&snapshot(), &config);
        assert!(svg.contains("fill=\"#123456\""));
    }
}
