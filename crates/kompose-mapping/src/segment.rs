//! Rendered code as a sequence of literal text and token segments.
//!
//! The renderer decides *which* value a token stands for; the presentation
//! layer decides *how* to show it (the mapped value or the token name) by
//! folding the segments into text. Hosts that exchange plain strings can use
//! the marker encoding instead, where each token is wrapped in
//! [`MAPPING_MARKER`] characters around its JSON record.

use kompose_core::RenderError;

use crate::table::{MappingTable, MappingTableValue};

/// Reserved character delimiting a token record in marked text.
pub const MAPPING_MARKER: char = '\u{000F}';

/// A piece of rendered code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Token(MappingTableValue),
}

/// Rendered code: literal text interleaved with token segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedCode {
    segments: Vec<Segment>,
}

impl RenderedCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text, joining it with a preceding text segment.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }

    pub fn push_token(&mut self, token: MappingTableValue) {
        self.segments.push(Segment::Token(token));
    }

    /// Append all segments of another rendering.
    pub fn append(&mut self, other: RenderedCode) {
        for segment in other.segments {
            match segment {
                Segment::Text(text) => self.push_text(&text),
                Segment::Token(token) => self.push_token(token),
            }
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Tokens in the order they appear.
    pub fn tokens(&self) -> impl Iterator<Item = &MappingTableValue> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Text(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Fold into text, replacing every token with `display(token)`.
    pub fn fold<F>(&self, mut display: F) -> String
    where
        F: FnMut(&MappingTableValue) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Token(token) => out.push_str(&display(token)),
            }
        }
        out
    }

    /// Final source text. With `show_mapped_values` each token shows its
    /// current value in `table` (falling back to the value it was rendered
    /// with), otherwise its name.
    pub fn to_source(&self, table: &MappingTable, show_mapped_values: bool) -> String {
        self.fold(|token| {
            if show_mapped_values {
                table
                    .get(token.table, token.id)
                    .map_or_else(|| token.value.clone(), |entry| entry.value.clone())
            } else {
                token.name.clone()
            }
        })
    }

    /// Text with every token showing the value it was rendered with.
    pub fn to_plain(&self) -> String {
        self.fold(|token| token.value.clone())
    }

    /// Encode as marked text. Fails if any literal text already contains the
    /// marker character, since it could not be told apart from a token.
    pub fn to_marked(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => {
                    if text.contains(MAPPING_MARKER) {
                        return Err(RenderError::MarkerCollision { text: text.clone() });
                    }
                    out.push_str(text);
                }
                Segment::Token(token) => out.push_str(&wrap_reference_mapping(token)?),
            }
        }
        Ok(out)
    }
}

impl From<&str> for RenderedCode {
    fn from(text: &str) -> Self {
        let mut code = Self::new();
        code.push_text(text);
        code
    }
}

impl From<String> for RenderedCode {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<MappingTableValue> for RenderedCode {
    fn from(token: MappingTableValue) -> Self {
        let mut code = Self::new();
        code.push_token(token);
        code
    }
}

/// Wrap a token record in markers.
pub fn wrap_reference_mapping(value: &MappingTableValue) -> Result<String, RenderError> {
    let record = serde_json::to_string(value).map_err(|e| RenderError::MalformedMarker {
        record: e.to_string(),
    })?;
    Ok(format!("{MAPPING_MARKER}{record}{MAPPING_MARKER}"))
}

/// Decode marked text back into segments.
pub fn parse_marked(text: &str) -> Result<RenderedCode, RenderError> {
    let parts: Vec<&str> = text.split(MAPPING_MARKER).collect();
    // An even number of parts means an unterminated record.
    if parts.len() % 2 == 0 {
        let record = parts.last().copied().unwrap_or_default();
        return Err(RenderError::MalformedMarker { record: record.to_string() });
    }

    let mut code = RenderedCode::new();
    for (index, part) in parts.into_iter().enumerate() {
        if index % 2 == 0 {
            code.push_text(part);
        } else {
            let token: MappingTableValue =
                serde_json::from_str(part).map_err(|_| RenderError::MalformedMarker {
                    record: part.to_string(),
                })?;
            code.push_token(token);
        }
    }
    Ok(code)
}

/// Replace every marked record in `text` with `display(record)`.
pub fn replace_markers<F>(text: &str, display: F) -> Result<String, RenderError>
where
    F: FnMut(&MappingTableValue) -> String,
{
    Ok(parse_marked(text)?.fold(display))
}
