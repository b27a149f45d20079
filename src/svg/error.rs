use crate::svg::builder::{truncate_text, SvgBuilder};

pub const ERROR_WIDTH: u32 = 400;
pub const ERROR_HEIGHT: u32 = 100;
const MESSAGE_CHARS: usize = 52;

/// Fail-soft document shown in place of the stats when a request fails.
pub fn render_error(status: u16, message: &str) -> String {
    let (width, height) = (f64::from(ERROR_WIDTH), f64::from(ERROR_HEIGHT));
    let text = format!("Error: {}", truncate_text(message, MESSAGE_CHARS));
    let code = format!("HTTP {}", status);

    let mut builder = SvgBuilder::new();
    builder
        .rect(0.0, 0.0, width, height, &[("fill", &"#0f172a"), ("rx", &8)])
        .text(
            width / 2.0,
            50.0,
            &text,
            &[
                ("font-family", &"Arial"),
                ("font-size", &14),
                ("fill", &"#ef4444"),
                ("text-anchor", &"middle"),
            ],
        )
        .text(
            width / 2.0,
            75.0,
            &code,
            &[
                ("font-family", &"Arial"),
                ("font-size", &11),
                ("fill", &"#94a3b8"),
                ("text-anchor", &"middle"),
            ],
        );
    builder.build(ERROR_WIDTH, ERROR_HEIGHT, None)
}
