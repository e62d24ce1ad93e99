//! Scene-node model of a design document.
//!
//! Field names follow the host design tool's node API (camelCase JSON), so a
//! plugin can dump its selection as-is. Only the properties the converter
//! reads are modelled; everything else in the JSON is ignored.

use kompose_core::{Color, FontName, LetterSpacing, LineHeight, TextCase, TextDecoration};
use serde::Deserialize;

/// The host's "mixed" sentinel: a property that differs across the node's
/// parts (e.g. several font sizes in one text run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MixedTag {
    #[serde(rename = "MIXED")]
    Mixed,
}

/// A property that is either uniform over the node or mixed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Mixable<T> {
    Mixed(MixedTag),
    Value(T),
}

impl<T> Mixable<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Mixable::Mixed(_) => None,
            Mixable::Value(v) => Some(v),
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Mixable::Mixed(_))
    }
}

impl<T: Default> Default for Mixable<T> {
    fn default() -> Self {
        Mixable::Value(T::default())
    }
}

impl<T> From<T> for Mixable<T> {
    fn from(v: T) -> Self {
        Mixable::Value(v)
    }
}

/// A node of the design tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneNode {
    Frame(FrameNode),
    Component(FrameNode),
    Instance(FrameNode),
    Text(TextNode),
    /// Any node kind the converter does not handle (vectors, groups, ...).
    #[serde(other)]
    Other,
}

/// Closed classification of a scene node for conversion.
#[derive(Debug, Clone, Copy)]
pub enum NodeClass<'a> {
    Container(&'a FrameNode),
    Text(&'a TextNode),
    Unsupported,
}

impl SceneNode {
    pub fn class(&self) -> NodeClass<'_> {
        match self {
            SceneNode::Frame(frame) | SceneNode::Component(frame) | SceneNode::Instance(frame) => {
                NodeClass::Container(frame)
            }
            SceneNode::Text(text) => NodeClass::Text(text),
            SceneNode::Other => NodeClass::Unsupported,
        }
    }

    pub fn name(&self) -> &str {
        match self.class() {
            NodeClass::Container(frame) => &frame.name,
            NodeClass::Text(text) => &text.name,
            NodeClass::Unsupported => "",
        }
    }

    pub fn is_visible(&self) -> bool {
        match self.class() {
            NodeClass::Container(frame) => frame.visible,
            NodeClass::Text(text) => text.visible,
            NodeClass::Unsupported => true,
        }
    }
}

/// Auto-layout direction of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    #[default]
    NoWrap,
    Wrap,
    #[serde(other)]
    Unsupported,
}

/// Alignment of children along one auto-layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

/// How a node is sized along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sizing {
    #[default]
    Fixed,
    Hug,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    #[default]
    Solid,
    #[serde(other)]
    Other,
}

/// Binding of a property to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableAlias {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaintBindings {
    pub color: Option<VariableAlias>,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub paint_type: PaintType,
    pub color: Option<Color>,
    pub opacity: Option<f64>,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(default)]
    pub bound_variables: PaintBindings,
}

impl Paint {
    /// The color of a solid paint, with its opacity as alpha.
    pub fn solid_color(&self) -> Option<Color> {
        match (self.paint_type, self.color) {
            (PaintType::Solid, Some(color)) => Some(color.with_alpha(self.opacity.unwrap_or(1.0))),
            _ => None,
        }
    }
}

/// Variable bindings of a frame's numeric properties.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameBindings {
    pub item_spacing: Option<VariableAlias>,
    pub counter_axis_spacing: Option<VariableAlias>,
    pub padding_left: Option<VariableAlias>,
    pub padding_top: Option<VariableAlias>,
    pub padding_right: Option<VariableAlias>,
    pub padding_bottom: Option<VariableAlias>,
    pub top_left_radius: Option<VariableAlias>,
    pub top_right_radius: Option<VariableAlias>,
    pub bottom_right_radius: Option<VariableAlias>,
    pub bottom_left_radius: Option<VariableAlias>,
    pub stroke_weight: Option<VariableAlias>,
}

/// A frame, component or component instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameNode {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub children: Vec<SceneNode>,

    pub width: f64,
    pub height: f64,
    pub layout_sizing_horizontal: Sizing,
    pub layout_sizing_vertical: Sizing,

    pub layout_mode: LayoutMode,
    pub layout_wrap: LayoutWrap,
    pub primary_axis_align_items: AxisAlign,
    pub counter_axis_align_items: AxisAlign,
    pub item_spacing: f64,
    pub counter_axis_spacing: Option<f64>,
    pub padding_left: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,

    pub fills: Mixable<Vec<Paint>>,
    pub fill_style_id: Mixable<String>,
    pub strokes: Vec<Paint>,
    pub stroke_style_id: String,
    pub stroke_weight: Option<Mixable<f64>>,

    pub top_left_radius: f64,
    pub top_right_radius: f64,
    pub bottom_right_radius: f64,
    pub bottom_left_radius: f64,

    pub bound_variables: FrameBindings,
}

impl Default for FrameNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            visible: true,
            children: Vec::new(),
            width: 0.0,
            height: 0.0,
            layout_sizing_horizontal: Sizing::default(),
            layout_sizing_vertical: Sizing::default(),
            layout_mode: LayoutMode::default(),
            layout_wrap: LayoutWrap::default(),
            primary_axis_align_items: AxisAlign::default(),
            counter_axis_align_items: AxisAlign::default(),
            item_spacing: 0.0,
            counter_axis_spacing: None,
            padding_left: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            fills: Mixable::default(),
            fill_style_id: Mixable::default(),
            strokes: Vec::new(),
            stroke_style_id: String::new(),
            stroke_weight: None,
            top_left_radius: 0.0,
            top_right_radius: 0.0,
            bottom_right_radius: 0.0,
            bottom_left_radius: 0.0,
            bound_variables: FrameBindings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextTruncation {
    #[default]
    Disabled,
    Ending,
}

/// A text node. Typography properties are [`Mixable`] because a single text
/// node can carry several styled runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextNode {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub characters: String,

    pub width: f64,
    pub height: f64,
    pub layout_sizing_horizontal: Sizing,
    pub layout_sizing_vertical: Sizing,

    pub text_style_id: Mixable<String>,
    pub font_size: Mixable<f64>,
    pub font_weight: Mixable<f64>,
    pub font_name: Mixable<FontName>,
    pub text_decoration: Mixable<TextDecoration>,
    pub letter_spacing: Mixable<LetterSpacing>,
    pub line_height: Mixable<LineHeight>,
    pub text_case: Mixable<TextCase>,

    pub fills: Mixable<Vec<Paint>>,
    pub fill_style_id: Mixable<String>,

    pub text_align_horizontal: TextAlignHorizontal,
    pub text_truncation: TextTruncation,
    pub max_lines: Option<u32>,
}

impl Default for TextNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            visible: true,
            characters: String::new(),
            width: 0.0,
            height: 0.0,
            layout_sizing_horizontal: Sizing::Hug,
            layout_sizing_vertical: Sizing::Hug,
            text_style_id: Mixable::default(),
            font_size: Mixable::Value(12.0),
            font_weight: Mixable::Value(400.0),
            font_name: Mixable::Value(FontName::new("Inter", "Regular")),
            text_decoration: Mixable::default(),
            letter_spacing: Mixable::default(),
            line_height: Mixable::default(),
            text_case: Mixable::default(),
            fills: Mixable::default(),
            fill_style_id: Mixable::default(),
            text_align_horizontal: TextAlignHorizontal::default(),
            text_truncation: TextTruncation::default(),
            max_lines: None,
        }
    }
}

fn visible_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_node_kinds_are_unsupported() {
        let node: SceneNode =
            serde_json::from_value(json!({"type": "VECTOR", "name": "Icon", "visible": true}))
                .unwrap();
        assert!(matches!(node.class(), NodeClass::Unsupported));
    }

    #[test]
    fn test_frame_defaults() {
        let node: SceneNode =
            serde_json::from_value(json!({"type": "COMPONENT", "name": "Card"})).unwrap();
        let NodeClass::Container(frame) = node.class() else {
            panic!("expected container");
        };
        assert!(frame.visible);
        assert_eq!(frame.layout_mode, LayoutMode::None);
        assert_eq!(frame.fills, Mixable::Value(vec![]));
        assert_eq!(node.name(), "Card");
    }

    #[test]
    fn test_mixed_sentinel() {
        let node: TextNode = serde_json::from_value(json!({
            "fontSize": "MIXED",
            "fontName": {"family": "Inter", "style": "Bold"},
            "textStyleId": "S:1",
        }))
        .unwrap();
        assert!(node.font_size.is_mixed());
        assert_eq!(node.font_name.value().unwrap().style, "Bold");
        assert_eq!(node.text_style_id, Mixable::Value("S:1".to_string()));
    }

    #[test]
    fn test_unknown_layout_mode_is_unsupported() {
        let frame: FrameNode =
            serde_json::from_value(json!({"layoutMode": "GRID", "layoutWrap": "WRAP"})).unwrap();
        assert_eq!(frame.layout_mode, LayoutMode::Unsupported);
        assert_eq!(frame.layout_wrap, LayoutWrap::Wrap);
    }

    #[test]
    fn test_paint_solid_color_uses_opacity() {
        let paint: Paint = serde_json::from_value(json!({
            "type": "SOLID",
            "color": {"r": 1.0, "g": 0.0, "b": 0.0},
            "opacity": 0.5,
        }))
        .unwrap();
        assert_eq!(paint.solid_color(), Some(Color::rgba(1.0, 0.0, 0.0, 0.5)));

        let gradient: Paint =
            serde_json::from_value(json!({"type": "GRADIENT_LINEAR", "visible": false})).unwrap();
        assert_eq!(gradient.solid_color(), None);
        assert!(!gradient.visible);
    }
}
