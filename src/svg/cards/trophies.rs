use crate::models::StatsSnapshot;
use crate::svg::cards::{frame, label, PADDING};
use crate::svg::theme::Theme;

const TROPHY_SIZE: f64 = 60.0;
const TROPHY_SPACING_X: f64 = 80.0;
const TROPHY_SPACING_Y: f64 = 68.0;
const TROPHIES_PER_ROW: usize = 4;
const EARLY_ADOPTER_DAYS: i64 = 5 * 365;

struct Trophy {
    name: &'static str,
    icon: &'static str,
    description: &'static str,
    earned: fn(&StatsSnapshot) -> bool,
}

static TROPHIES: [Trophy; 8] = [
    Trophy {
        name: "Star Collector",
        icon: "⭐",
        description: "100+ Stars",
        earned: |s| s.total_stars >= 100,
    },
    Trophy {
        name: "Mega Star",
        icon: "🌟",
        description: "1000+ Stars",
        earned: |s| s.total_stars >= 1000,
    },
    Trophy {
        name: "Commit Master",
        icon: "💪",
        description: "1000+ Commits",
        earned: |s| s.total_commits >= 1000,
    },
    Trophy {
        name: "Polyglot",
        icon: "🗣️",
        description: "5+ Languages",
        earned: |s| s.languages.len() >= 5,
    },
    Trophy {
        name: "Early Adopter",
        icon: "🚀",
        description: "5+ Years",
        // Measured against the fetch time so rendering stays reproducible.
        earned: |s| (s.last_fetch - s.user.created_at).num_days() >= EARLY_ADOPTER_DAYS,
    },
    Trophy {
        name: "Popular",
        icon: "👥",
        description: "100+ Followers",
        earned: |s| s.user.followers >= 100,
    },
    Trophy {
        name: "Prolific",
        icon: "📦",
        description: "50+ Repos",
        earned: |s| s.user.public_repos >= 50,
    },
    Trophy {
        name: "Streak Master",
        icon: "🔥",
        description: "30+ Day Streak",
        earned: |s| s.current_streak >= 30,
    },
];

fn earned(stats: &StatsSnapshot) -> Vec<&'static Trophy> {
    TROPHIES.iter().filter(|t| (t.earned)(stats)).collect()
}

pub(super) fn render(stats: &StatsSnapshot, theme: &Theme, width: f64, height: f64) -> String {
    let trophies = earned(stats);
    let title = format!("🏆 Achievements ({}/{})", trophies.len(), TROPHIES.len());
    let mut card = frame(theme, width, height, &title);

    if trophies.is_empty() {
        label(&mut card, theme, width / 2.0, height / 2.0 + 10.0, "No achievements yet", "middle");
        return card.fragment();
    }

    for (index, trophy) in trophies.iter().enumerate() {
        let x = PADDING + (index % TROPHIES_PER_ROW) as f64 * TROPHY_SPACING_X + TROPHY_SIZE / 2.0;
        let y = 55.0 + (index / TROPHIES_PER_ROW) as f64 * TROPHY_SPACING_Y;

        card.raw(format!("<g><title>{}</title>", trophy.name))
            .text(x, y + 30.0, trophy.icon, &[("font-size", &28), ("text-anchor", &"middle")])
            .text(
                x,
                y + 50.0,
                trophy.description,
                &[
                    ("font-family", &theme.font),
                    ("font-size", &9),
                    ("fill", &theme.colors.text_secondary),
                    ("text-anchor", &"middle"),
                ],
            )
            .raw("</g>");
    }

    card.fragment()
}
