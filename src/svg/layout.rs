use crate::models::LayoutMode;
use crate::svg::builder::SvgBuilder;
use crate::svg::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    pub card_width: u32,
    pub card_height: u32,
    pub spacing: u32,
    /// Grid only.
    pub max_columns: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Grid,
            card_width: 450,
            card_height: 200,
            spacing: 20,
            max_columns: 2,
        }
    }
}

impl LayoutConfig {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    fn columns(&self) -> u32 {
        self.max_columns.max(1)
    }

    /// `(columns, rows)` occupied by `count` cards.
    fn grid_shape(&self, count: u32) -> (u32, u32) {
        match self.mode {
            LayoutMode::Grid => {
                let columns = count.min(self.columns());
                (columns, count.div_ceil(columns))
            }
            LayoutMode::Row => (count, 1),
            LayoutMode::Column => (1, count),
        }
    }

    /// Outer `(width, height)` for `count` cards. Zero cards take no space.
    pub fn dimensions(&self, count: usize) -> (u32, u32) {
        let count = count as u32;
        if count == 0 {
            return (0, 0);
        }
        let (columns, rows) = self.grid_shape(count);
        (
            columns * self.card_width + (columns - 1) * self.spacing,
            rows * self.card_height + (rows - 1) * self.spacing,
        )
    }

    /// Top-left corner of the card at `index`.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let step_x = self.card_width + self.spacing;
        let step_y = self.card_height + self.spacing;
        match self.mode {
            LayoutMode::Grid => {
                let columns = self.columns();
                ((index % columns) * step_x, (index / columns) * step_y)
            }
            LayoutMode::Row => (index * step_x, 0),
            LayoutMode::Column => (0, index * step_y),
        }
    }
}

/// Packs card fragments into one document.
pub fn compose(fragments: &[String], config: &LayoutConfig, theme: &Theme) -> String {
    let (width, height) = config.dimensions(fragments.len());
    let mut builder = SvgBuilder::new();

    for (index, fragment) in fragments.iter().enumerate() {
        let (x, y) = config.position(index);
        let transform = format!("translate({}, {})", x, y);
        builder.group(fragment, &[("transform", &transform)]);
    }

    builder.build(width, height, theme.background_pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let config = LayoutConfig::default();
        assert_eq!(config.dimensions(0), (0, 0));
        assert_eq!(config.dimensions(1), (450, 200));
        assert_eq!(config.dimensions(2), (920, 200));
        assert_eq!(config.dimensions(3), (920, 420));
        assert_eq!(config.dimensions(4), (920, 420));
    }

    #[test]
    fn test_row_and_column_dimensions() {
        assert_eq!(LayoutConfig::new(LayoutMode::Row).dimensions(3), (1390, 200));
        assert_eq!(LayoutConfig::new(LayoutMode::Column).dimensions(3), (450, 640));
    }

    #[test]
    fn test_positions() {
        let grid = LayoutConfig::default();
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(1), (470, 0));
        assert_eq!(grid.position(2), (0, 220));

        assert_eq!(LayoutConfig::new(LayoutMode::Row).position(2), (940, 0));
        assert_eq!(LayoutConfig::new(LayoutMode::Column).position(2), (0, 440));
    }

    #[test]
    fn test_compose_wraps_each_fragment() {
        let fragments = vec!["<rect />".to_string(), "<circle />".to_string()];
        let svg = compose(&fragments, &LayoutConfig::default(), &Theme::named("dark"));

        assert!(svg.starts_with("<svg width=\"920\" height=\"200\""));
        assert!(svg.contains("<title>GitHub Stats</title>"));
        assert!(svg.contains("<g transform=\"translate(0, 0)\"><rect /></g>"));
        assert!(svg.contains("<g transform=\"translate(470, 0)\"><circle /></g>"));
    }

    #[test]
    fn test_compose_empty() {
        let svg = compose(&[], &LayoutConfig::default(), &Theme::named("dark"));
        assert!(svg.starts_with("<svg width=\"0\" height=\"0\""));
    }

    #[test]
    fn test_glass_theme_adds_filter_defs() {
        let svg = compose(&["<g />".to_string()], &LayoutConfig::default(), &Theme::named("glass"));
        assert!(svg.contains("<filter id=\"blur\">"));
    }
}
