use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Profile,
    Repositories,
    Commits,
    Streak,
    Languages,
    Skills,
    Trophies,
    Unified,
}

impl CardKind {
    pub const ALL: [CardKind; 8] = [
        CardKind::Profile,
        CardKind::Repositories,
        CardKind::Commits,
        CardKind::Streak,
        CardKind::Languages,
        CardKind::Skills,
        CardKind::Trophies,
        CardKind::Unified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Profile => "profile",
            CardKind::Repositories => "repositories",
            CardKind::Commits => "commits",
            CardKind::Streak => "streak",
            CardKind::Languages => "languages",
            CardKind::Skills => "skills",
            CardKind::Trophies => "trophies",
            CardKind::Unified => "unified",
        }
    }

    /// Parses a comma-separated card list such as `"profile,streak"`.
    /// Blank items are ignored; an empty list yields the unified card.
    pub fn parse_list(input: &str) -> Result<Vec<CardKind>> {
        let cards = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(CardKind::from_str)
            .collect::<Result<Vec<_>>>()?;

        if cards.is_empty() {
            return Ok(vec![CardKind::Unified]);
        }
        Ok(cards)
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| Error::Config(format!("unknown card type '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
    Row,
    Column,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Grid => write!(f, "grid"),
            LayoutMode::Row => write!(f, "row"),
            LayoutMode::Column => write!(f, "column"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(LayoutMode::Grid),
            "row" => Ok(LayoutMode::Row),
            "column" => Ok(LayoutMode::Column),
            other => Err(Error::Config(format!("unknown layout '{}'", other))),
        }
    }
}

/// Everything that determines the rendered output for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub username: String,
    pub theme: String,
    pub cards: Vec<CardKind>,
    pub layout: LayoutMode,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub border_radius: Option<u32>,
    pub shadow: Option<u32>,
}

impl RenderConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            theme: "dark".to_string(),
            cards: vec![CardKind::Unified],
            layout: LayoutMode::Grid,
            primary_color: None,
            secondary_color: None,
            background_color: None,
            font_family: None,
            border_radius: None,
            shadow: None,
        }
    }

    /// Document-tier cache key. Every field participates, each written as
    /// `len:value` so separators inside overrides cannot collide.
    pub fn cache_key(&self) -> String {
        let cards: Vec<&str> = self.cards.iter().map(CardKind::as_str).collect();
        let cards = cards.join(",");
        let layout = self.layout.to_string();
        let border_radius = self.border_radius.map(|n| n.to_string());
        let shadow = self.shadow.map(|n| n.to_string());

        let fields = [
            Some(self.username.as_str()),
            Some(self.theme.as_str()),
            Some(cards.as_str()),
            Some(layout.as_str()),
            self.primary_color.as_deref(),
            self.secondary_color.as_deref(),
            self.background_color.as_deref(),
            self.font_family.as_deref(),
            border_radius.as_deref(),
            shadow.as_deref(),
        ];

        let mut key = String::new();
        for field in fields {
            match field {
                Some(value) => {
                    let _ = write!(key, "{}:{}|", value.len(), value);
                }
                None => key.push_str("-|"),
            }
        }
        key
    }
}

/// Inbound query: a render configuration plus the cache bypass flag.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub config: RenderConfig,
    pub bypass_cache: bool,
}

impl RenderRequest {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            bypass_cache: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_list() {
        let cards = CardKind::parse_list("profile, Streak,,unified").unwrap();
        assert_eq!(
            cards,
            vec![CardKind::Profile, CardKind::Streak, CardKind::Unified]
        );
        assert_eq!(CardKind::parse_list("").unwrap(), vec![CardKind::Unified]);
    }

    #[test]
    fn test_unknown_card_is_rejected() {
        let err = CardKind::parse_list("profile,badges").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("badges")));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("ROW".parse::<LayoutMode>().unwrap(), LayoutMode::Row);
        assert!("diagonal".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_cache_key_distinguishes_every_field() {
        let base = RenderConfig::new("octocat");
        let mut variants = vec![base.clone()];

        let mut c = base.clone();
        c.theme = "light".into();
        variants.push(c);
        let mut c = base.clone();
        c.cards = vec![CardKind::Streak];
        variants.push(c);
        let mut c = base.clone();
        c.layout = LayoutMode::Column;
        variants.push(c);
        let mut c = base.clone();
        c.primary_color = Some("#fff".into());
        variants.push(c);
        let mut c = base.clone();
        c.secondary_color = Some("#fff".into());
        variants.push(c);
        let mut c = base.clone();
        c.background_color = Some("#fff".into());
        variants.push(c);
        let mut c = base.clone();
        c.font_family = Some("Mono".into());
        variants.push(c);
        let mut c = base.clone();
        c.border_radius = Some(4);
        variants.push(c);
        let mut c = base.clone();
        c.shadow = Some(4);
        variants.push(c);

        // Separators inside overrides must not shift fields.
        let mut c = base.clone();
        c.primary_color = Some("red|blue".into());
        variants.push(c);
        let mut c = base.clone();
        c.primary_color = Some("red".into());
        c.secondary_color = Some("blue|".into());
        variants.push(c);
        let mut c = base.clone();
        c.font_family = Some(String::new());
        variants.push(c);

        let keys: std::collections::HashSet<String> =
            variants.iter().map(RenderConfig::cache_key).collect();
        assert_eq!(keys.len(), variants.len());
        assert_eq!(base.cache_key(), RenderConfig::new("octocat").cache_key());
    }
}
