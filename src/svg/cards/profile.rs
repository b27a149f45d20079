use crate::models::GitHubUser;
use crate::svg::builder::{format_number, truncate_text};
use crate::svg::cards::{figure, frame, label, PADDING};
use crate::svg::theme::Theme;

const BIO_CHARS: usize = 64;

pub(super) fn render(user: &GitHubUser, theme: &Theme, width: f64, height: f64) -> String {
    let title = truncate_text(user.display_name(), 32);
    let mut card = frame(theme, width, height, &title);

    let stats = [
        ("Followers", user.followers),
        ("Following", user.following),
        ("Repos", user.public_repos),
        ("Gists", user.public_gists),
    ];
    let column_width = (width - PADDING * 2.0) / 2.0;

    for (index, (name, value)) in stats.iter().enumerate() {
        let x = PADDING + (index % 2) as f64 * column_width;
        let y = 70.0 + (index / 2) as f64 * 55.0;
        label(&mut card, theme, x, y, name, "start");
        figure(
            &mut card,
            theme,
            x,
            y + 25.0,
            &format_number(*value),
            24,
            &theme.colors.primary,
            "start",
        );
    }

    if let Some(bio) = user.bio.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        card.text(
            PADDING,
            height - 14.0,
            &truncate_text(bio, BIO_CHARS),
            &[
                ("font-family", &theme.font),
                ("font-size", &11),
                ("font-style", &"italic"),
                ("fill", &theme.colors.text_secondary),
            ],
        );
    }

    card.fragment()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_shows_counts_and_escaped_bio() {
        let user = testing::user("octocat", 2011);
        let fragment = render(&user, &Theme::named("light"), 450.0, 200.0);

        assert!(fragment.contains(">octocat &lt;dev&gt;</text>"));
        assert!(fragment.contains(">Followers</text>"));
        assert!(fragment.contains(">12</text>"));
        assert!(fragment.contains("Builds things &amp; breaks them"));
    }

    #[test]
    fn test_blank_bio_is_omitted() {
        let mut user = testing::user("octocat", 2011);
        user.bio = Some("   ".into());
        let fragment = render(&user, &Theme::named("dark"), 450.0, 200.0);
        assert!(!fragment.contains("font-style"));
    }
}
