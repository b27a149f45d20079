use crate::models::RenderConfig;

const SANS: &str = "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
const MONO: &str = "'JetBrains Mono', 'Fira Code', monospace";

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub colors: ThemeColors,
    pub font: String,
    pub mono_font: String,
    pub border_radius: u32,
    /// CSS `drop-shadow` argument.
    pub shadow: String,
    /// Extra markup placed before the cards, e.g. filter definitions.
    pub background_pattern: Option<&'static str>,
}

pub const THEME_NAMES: [&str; 6] = ["dark", "light", "glass", "neon", "github", "cyberpunk"];

struct Palette {
    name: &'static str,
    colors: [&'static str; 7],
    font: &'static str,
    mono_font: &'static str,
    border_radius: u32,
    shadow: &'static str,
    background_pattern: Option<&'static str>,
}

// colors: primary, secondary, background, text, text_secondary, border, accent
fn dark() -> Palette {
    Palette {
        name: "Dark",
        colors: ["#3b82f6", "#8b5cf6", "#0f172a", "#f1f5f9", "#94a3b8", "#334155", "#06b6d4"],
        font: SANS,
        mono_font: MONO,
        border_radius: 12,
        shadow: "0 4px 6px rgba(0, 0, 0, 0.3)",
        background_pattern: None,
    }
}

fn palette(name: &str) -> Option<Palette> {
    let palette = match name {
        "dark" => dark(),
        "light" => Palette {
            name: "Light",
            colors: ["#2563eb", "#7c3aed", "#ffffff", "#0f172a", "#64748b", "#e2e8f0", "#0891b2"],
            font: SANS,
            mono_font: MONO,
            border_radius: 12,
            shadow: "0 4px 6px rgba(0, 0, 0, 0.1)",
            background_pattern: None,
        },
        "glass" => Palette {
            name: "Glass",
            colors: [
                "#60a5fa",
                "#a78bfa",
                "rgba(15, 23, 42, 0.7)",
                "#f1f5f9",
                "#cbd5e1",
                "rgba(255, 255, 255, 0.1)",
                "#22d3ee",
            ],
            font: SANS,
            mono_font: MONO,
            border_radius: 16,
            shadow: "0 8px 32px rgba(31, 38, 135, 0.37)",
            background_pattern: Some(
                "<defs><filter id=\"blur\"><feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"10\" /></filter></defs>",
            ),
        },
        "neon" => Palette {
            name: "Neon",
            colors: ["#ff00ff", "#00ffff", "#0a0a0a", "#ffffff", "#b4b4b4", "#ff00ff", "#00ff00"],
            font: "'Orbitron', 'Rajdhani', sans-serif",
            mono_font: "'Share Tech Mono', monospace",
            border_radius: 8,
            shadow: "0 0 20px rgba(255, 0, 255, 0.5)",
            background_pattern: None,
        },
        "github" => Palette {
            name: "GitHub",
            colors: ["#238636", "#1f6feb", "#0d1117", "#c9d1d9", "#8b949e", "#30363d", "#58a6ff"],
            font: "-apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', sans-serif",
            mono_font: "'SF Mono', 'Consolas', monospace",
            border_radius: 6,
            shadow: "0 0 1px rgba(240, 246, 252, 0.1)",
            background_pattern: None,
        },
        "cyberpunk" => Palette {
            name: "Cyberpunk",
            colors: ["#fcee09", "#ff2a6d", "#05080d", "#d9e7f1", "#7ea8be", "#1a3a52", "#01cdfe"],
            font: "'Rajdhani', 'Exo 2', sans-serif",
            mono_font: "'Share Tech Mono', monospace",
            border_radius: 4,
            shadow: "0 0 10px rgba(252, 238, 9, 0.3)",
            background_pattern: None,
        },
        _ => return None,
    };
    Some(palette)
}

impl From<Palette> for Theme {
    fn from(palette: Palette) -> Self {
        let [primary, secondary, background, text, text_secondary, border, accent] =
            palette.colors.map(str::to_string);
        Self {
            name: palette.name,
            colors: ThemeColors {
                primary,
                secondary,
                background,
                text,
                text_secondary,
                border,
                accent,
            },
            font: palette.font.to_string(),
            mono_font: palette.mono_font.to_string(),
            border_radius: palette.border_radius,
            shadow: palette.shadow.to_string(),
            background_pattern: palette.background_pattern,
        }
    }
}

impl Theme {
    /// Built-in theme by name (case-insensitive). Unknown names get the dark theme.
    pub fn named(name: &str) -> Self {
        palette(&name.trim().to_lowercase())
            .unwrap_or_else(|| {
                tracing::debug!("Unknown theme '{}', using dark", name);
                dark()
            })
            .into()
    }

    /// Named theme with the config's color, font, radius and shadow overrides applied.
    pub fn for_config(config: &RenderConfig) -> Self {
        let mut theme = Self::named(&config.theme);

        let overrides = [
            (&config.primary_color, &mut theme.colors.primary),
            (&config.secondary_color, &mut theme.colors.secondary),
            (&config.background_color, &mut theme.colors.background),
            (&config.font_family, &mut theme.font),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                *slot = value.to_string();
            }
        }

        if let Some(radius) = config.border_radius {
            theme.border_radius = radius;
        }
        if let Some(shadow) = config.shadow {
            theme.shadow = shadow_for_depth(shadow);
        }
        theme
    }
}

/// Maps a numeric depth to a `drop-shadow` argument. Zero disables it.
fn shadow_for_depth(depth: u32) -> String {
    if depth == 0 {
        return "0 0 0 transparent".to_string();
    }
    format!("0 {}px {}px rgba(0, 0, 0, 0.3)", depth.div_ceil(2), depth)
}
