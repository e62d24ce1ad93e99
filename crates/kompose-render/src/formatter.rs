//! Compose source text of design values.

use kompose_core::{Color, FontStyle, RenderError, SpacingUnit, TextDecoration, Value};
use kompose_mapping::ValueFormatter;

/// Formats values as Kotlin Compose expressions: `16.dp`, `"label"`,
/// `Color(0xFF3B82F6)` and inline `TextStyle(...)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeFormatter;

impl ValueFormatter for ComposeFormatter {
    fn format_value(&self, value: &Value) -> Result<String, RenderError> {
        match value {
            Value::Number(n) => Ok(format!("{}.dp", number(*n)?)),
            Value::String(s) => Ok(format!("\"{}\"", escape_string(s))),
            Value::Color(c) => color(c),
            Value::Font(f) => text_style(f),
        }
    }
}

/// A finite number in its shortest form (`16`, `1.5`).
pub fn number(n: f64) -> Result<String, RenderError> {
    if !n.is_finite() {
        return Err(RenderError::UnsupportedValue {
            kind: "number".to_string(),
            value: n.to_string(),
        });
    }
    Ok(format!("{}", n))
}

fn color(c: &Color) -> Result<String, RenderError> {
    if [c.r, c.g, c.b, c.a].iter().any(|channel| !channel.is_finite()) {
        return Err(RenderError::UnsupportedValue {
            kind: "color".to_string(),
            value: format!("{:?}", c),
        });
    }
    Ok(format!("Color(0x{})", c.to_argb_hex()))
}

fn text_style(font: &FontStyle) -> Result<String, RenderError> {
    let mut args = vec![
        format!("fontWeight = FontWeight({})", number(font.font_weight.round())?),
        format!("fontSize = {}.sp", number(font.font_size)?),
    ];
    if font.font_name.is_italic() {
        args.push("fontStyle = FontStyle.Italic".to_string());
    }
    let spacing = font.letter_spacing;
    if spacing.unit == SpacingUnit::Pixels && spacing.value != 0.0 {
        args.push(format!("letterSpacing = {}.sp", number(spacing.value)?));
    }
    if let Some(height) = font.line_height.pixels() {
        args.push(format!("lineHeight = {}.sp", number(height)?));
    }
    match font.text_decoration {
        TextDecoration::None => {}
        TextDecoration::Underline => args.push("textDecoration = TextDecoration.Underline".to_string()),
        TextDecoration::Strikethrough => {
            args.push("textDecoration = TextDecoration.LineThrough".to_string())
        }
    }
    Ok(format!("TextStyle({})", args.join(", ")))
}

/// Escape text for a Kotlin string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
