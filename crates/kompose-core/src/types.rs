//! Core value types: primitive design values and references to named tokens.

/// A color with each channel as a unit fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Host paints carry alpha separately as opacity, so it defaults to opaque.
    #[cfg_attr(feature = "serde", serde(default = "Color::opaque"))]
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Convert to 8-bit channels in ARGB order, rounding to the nearest step.
    pub fn to_argb8(&self) -> [u8; 4] {
        let channel = |v: f64| (v * 255.0).round() as u8;
        [channel(self.a), channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Hex notation `AARRGGBB`, uppercase.
    pub fn to_argb_hex(&self) -> String {
        self.to_argb8().iter().map(|c| format!("{:02X}", c)).collect()
    }

    #[cfg(feature = "serde")]
    fn opaque() -> f64 {
        1.0
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Font family and style name (e.g. "Inter" / "Semi Bold Italic").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }

    pub fn is_italic(&self) -> bool {
        self.style.contains("Italic")
    }
}

/// Units a host dimension can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SpacingUnit {
    #[default]
    Pixels,
    Percent,
}

/// Tracking between characters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterSpacing {
    pub unit: SpacingUnit,
    pub value: f64,
}

/// Line height of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl LineHeight {
    /// The height in pixels, if expressed in pixels.
    pub fn pixels(&self) -> Option<f64> {
        match self {
            LineHeight::Pixels { value } => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

/// Resolved typography of a text node.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FontStyle {
    pub font_size: f64,
    pub font_weight: f64,
    pub text_decoration: TextDecoration,
    pub font_name: FontName,
    pub letter_spacing: LetterSpacing,
    pub line_height: LineHeight,
    pub text_case: TextCase,
}

/// A primitive design value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Color(Color),
    Font(FontStyle),
}

impl Value {
    /// Whether this value counts as "nothing to emit": a zero number or an
    /// empty string. Colors and fonts are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Number(n) => *n == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Color(_) | Value::Font(_) => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<FontStyle> for Value {
    fn from(f: FontStyle) -> Self {
        Value::Font(f)
    }
}

/// A value bound to an external named variable or style.
///
/// `name` is the token's identity: two references with the same name are the
/// same token, whatever their `id` or `value` snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference<T> {
    pub id: String,
    pub name: String,
    pub value: T,
}

impl<T> Reference<T> {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: T) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
        }
    }
}

/// Either a literal value or a [`Reference`] to a named token.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Bindable<T> {
    Bound(Reference<T>),
    Literal(T),
}

/// A length in density-independent units, possibly bound to a variable.
pub type Dimension = Bindable<f64>;

impl<T> Bindable<T> {
    /// The concrete value, whether literal or last resolved through a reference.
    pub fn value(&self) -> &T {
        match self {
            Bindable::Bound(r) => &r.value,
            Bindable::Literal(v) => v,
        }
    }

    pub fn reference(&self) -> Option<&Reference<T>> {
        match self {
            Bindable::Bound(r) => Some(r),
            Bindable::Literal(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Bindable<U> {
        match self {
            Bindable::Bound(r) => Bindable::Bound(Reference {
                id: r.id,
                name: r.name,
                value: f(r.value),
            }),
            Bindable::Literal(v) => Bindable::Literal(f(v)),
        }
    }
}

impl<T: Clone + Into<Value>> Bindable<T> {
    /// The concrete value lifted into [`Value`].
    pub fn to_value(&self) -> Value {
        self.value().clone().into()
    }

    /// Literals that are blank are treated as absent; references never are.
    pub fn is_blank(&self) -> bool {
        match self {
            Bindable::Bound(_) => false,
            Bindable::Literal(_) => self.to_value().is_blank(),
        }
    }
}

impl<T> From<T> for Bindable<T> {
    fn from(v: T) -> Self {
        Bindable::Literal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_argb_hex_rounds_channels() {
        let c = Color::rgba(1.0, 0.5, 0.0, 1.0);
        assert_eq!(c.to_argb_hex(), "FFFF8000");
        let channel = |v: u8| v as f64 / 255.0;
        assert_eq!(Color::rgb(channel(0xAA), channel(0xBB), channel(0xCC)).to_argb_hex(), "FFAABBCC");
        assert_eq!(Color::TRANSPARENT.to_argb_hex(), "00000000");
    }

    #[test]
    fn test_blank_values() {
        assert!(Value::Number(0.0).is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::Number(4.0).is_blank());
        assert!(!Value::Color(Color::TRANSPARENT).is_blank());
    }

    #[test]
    fn test_reference_is_never_blank() {
        let bound: Dimension = Bindable::Bound(Reference::new("VariableID:1", "spacing/none", 0.0));
        assert!(!bound.is_blank());
        assert_eq!(*bound.value(), 0.0);

        let literal: Dimension = 0.0.into();
        assert!(literal.is_blank());
    }

    #[test]
    fn test_bindable_map_keeps_reference_identity() {
        let bound = Bindable::Bound(Reference::new("1", "radius/md", 8.0));
        let doubled = bound.map(|v| v * 2.0);
        let r = doubled.reference().unwrap();
        assert_eq!(r.name, "radius/md");
        assert_eq!(r.value, 16.0);
    }

    #[test]
    fn test_font_name_italic() {
        assert!(FontName::new("Inter", "Bold Italic").is_italic());
        assert!(!FontName::new("Inter", "Regular").is_italic());
    }
}
