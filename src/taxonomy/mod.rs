pub mod languages;

pub use languages::{language_color, skill_icon};
