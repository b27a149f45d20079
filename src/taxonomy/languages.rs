use std::borrow::Cow;

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Ruby", "#701516"),
    ("PHP", "#4F5D95"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Shell", "#89e051"),
    ("Vue", "#41b883"),
    ("React", "#61dafb"),
];

const TECH_ICONS: &[(&str, &str)] = &[
    ("JavaScript", "JS"),
    ("TypeScript", "TS"),
    ("Python", "🐍"),
    ("Java", "☕"),
    ("Go", "🐹"),
    ("Rust", "🦀"),
    ("Ruby", "💎"),
    ("PHP", "🐘"),
    ("Swift", "🍎"),
    ("Kotlin", "K"),
    ("React", "⚛️"),
    ("Vue", "V"),
    ("Angular", "A"),
    ("Node", "📗"),
    ("Docker", "🐳"),
    ("Git", "📚"),
];

/// Linguist color for a language, if it has a well-known one.
pub fn language_color(language: &str) -> Option<&'static str> {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
}

/// Short glyph for the skills card. Unknown languages use their first two
/// characters, uppercased.
pub fn skill_icon(language: &str) -> Cow<'static, str> {
    match TECH_ICONS.iter().find(|(name, _)| *name == language) {
        Some((_, icon)) => Cow::Borrowed(*icon),
        None => Cow::Owned(language.chars().take(2).collect::<String>().to_uppercase()),
    }
}
