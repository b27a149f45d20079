//! SVG string assembly helpers.
//!
//! Every attribute value and text node passes through [`escape_xml`], so
//! callers can hand untrusted text (names, bios, font overrides) straight to
//! the builder.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

/// Attribute list, written in order.
pub type Attrs<'a> = &'a [(&'a str, &'a dyn fmt::Display)];

/// Collects SVG elements and emits either a bare fragment or a full document.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    elements: Vec<String>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends pre-rendered markup as-is.
    pub fn raw(&mut self, element: impl Into<String>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, attrs: Attrs) -> &mut Self {
        let mut element = String::from("<rect");
        write_attrs(
            &mut element,
            &[("x", &x), ("y", &y), ("width", &width), ("height", &height)],
        );
        write_attrs(&mut element, attrs);
        element.push_str(" />");
        self.raw(element)
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, attrs: Attrs) -> &mut Self {
        let mut element = String::from("<text");
        write_attrs(&mut element, &[("x", &x), ("y", &y)]);
        write_attrs(&mut element, attrs);
        let _ = write!(element, ">{}</text>", escape_xml(content));
        self.raw(element)
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, attrs: Attrs) -> &mut Self {
        let mut element = String::from("<circle");
        write_attrs(&mut element, &[("cx", &cx), ("cy", &cy), ("r", &r)]);
        write_attrs(&mut element, attrs);
        element.push_str(" />");
        self.raw(element)
    }

    /// Wraps already-built markup in a `<g>`.
    pub fn group(&mut self, content: &str, attrs: Attrs) -> &mut Self {
        let mut element = String::from("<g");
        write_attrs(&mut element, attrs);
        let _ = write!(element, ">{}</g>", content);
        self.raw(element)
    }

    /// Elements only, for embedding in a larger document.
    pub fn fragment(&self) -> String {
        self.elements.join("\n")
    }

    /// Standalone document of the given size.
    pub fn build(&self, width: u32, height: u32, background_pattern: Option<&str>) -> String {
        let capacity = 256 + self.elements.iter().map(String::len).sum::<usize>();
        let mut buffer = String::with_capacity(capacity);
        let _ = writeln!(
            buffer,
            "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\">",
        );
        buffer.push_str("<title>GitHub Stats</title>\n");
        if let Some(pattern) = background_pattern {
            buffer.push_str(pattern);
            buffer.push('\n');
        }
        for element in &self.elements {
            buffer.push_str(element);
            buffer.push('\n');
        }
        buffer.push_str("</svg>");
        buffer
    }
}

fn write_attrs(buffer: &mut String, attrs: Attrs) {
    for (name, value) in attrs {
        let value = value.to_string();
        let _ = write!(buffer, " {}=\"{}\"", name, escape_xml(&value));
    }
}

pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len() + 8);
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other),
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

/// Compact count: `1234` becomes `1.2K`, `2500000` becomes `2.5M`.
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Cuts `text` to `max_chars` characters, ending in `...` when shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &apos;Jerry&apos;&lt;/b&gt;"
        );
        assert!(matches!(escape_xml("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1.0K");
        assert_eq!(format_number(1_260), "1.3K");
        assert_eq!(format_number(2_500_000), "2.5M");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a rather long name", 10), "a rathe...");
        assert_eq!(truncate_text("ünïcödé names", 6), "ünï...");
    }

    #[test]
    fn test_text_content_and_attributes_are_escaped() {
        let mut builder = SvgBuilder::new();
        builder.text(1.0, 2.5, "<script>", &[("font-family", &"'Evil\" onload=\"x'")]);
        let fragment = builder.fragment();
        assert_eq!(
            fragment,
            "<text x=\"1\" y=\"2.5\" font-family=\"&apos;Evil&quot; onload=&quot;x&apos;\">&lt;script&gt;</text>"
        );
    }

    #[test]
    fn test_document_has_title_and_size() {
        let mut builder = SvgBuilder::new();
        builder.rect(0.0, 0.0, 10.0, 10.0, &[("fill", &"#fff")]);
        let svg = builder.build(10, 20, None);
        assert!(svg.starts_with("<svg width=\"10\" height=\"20\" viewBox=\"0 0 10 20\""));
        assert!(svg.contains("<title>GitHub Stats</title>"));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"10\" height=\"10\" fill=\"#fff\" />"));
        assert!(svg.ends_with("</svg>"));
    }
}
