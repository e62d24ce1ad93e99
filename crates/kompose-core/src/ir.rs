//! Layout IR: the tree of layout primitives the converter produces and the
//! renderer turns into source code.
//!
//! The IR only records layout *intent* (arrangement, alignment, growth); it
//! never carries computed positions.

use crate::types::{Bindable, Color, Dimension, FontStyle};

/// A node of the layout IR.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Node {
    /// Name of the design node this was converted from.
    pub node_name: String,
    pub modifiers: Vec<Modifier>,
    /// Always empty for text nodes.
    pub children: Vec<Node>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NodeKind,
}

impl Node {
    /// A container or text node without children.
    pub fn new(node_name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            node_name: node_name.into(),
            modifiers: Vec::new(),
            children: Vec::new(),
            kind,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Attach children. Text nodes stay childless.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        if !self.is_text() {
            self.children = children;
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Name of the layout primitive (`row`, `flowRow`, ...).
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Count of nodes in this subtree, including this one.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Node::len).sum::<usize>()
    }
}

/// The layout primitive of a [`Node`] and its kind-specific parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "name", rename_all = "camelCase"))]
pub enum NodeKind {
    Row(RowLayout),
    FlowRow(FlowRowLayout),
    Column(ColumnLayout),
    Box(BoxLayout),
    Text(TextContent),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Row(_) => "row",
            NodeKind::FlowRow(_) => "flowRow",
            NodeKind::Column(_) => "column",
            NodeKind::Box(_) => "box",
            NodeKind::Text(_) => "text",
        }
    }
}

/// An arrangement along the main axis: either a symbolic placement or a
/// fixed spacing between children. The two forms never coexist.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Arrangement<A> {
    SpacedBy(Dimension),
    Aligned(A),
}

/// Symbolic horizontal arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalArrangement {
    SpaceBetween,
    Center,
    Start,
    End,
}

/// Symbolic vertical arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerticalArrangement {
    SpaceBetween,
    Center,
    Top,
    Bottom,
}

/// Cross-axis alignment of a row's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerticalAlignment {
    Top,
    Bottom,
    Center,
    Baseline,
}

/// Cross-axis alignment of a column's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalAlignment {
    Start,
    End,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoxAlignment {
    Center,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RowLayout {
    pub horizontal_arrangement: Option<Arrangement<HorizontalArrangement>>,
    pub vertical_alignment: Option<VerticalAlignment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlowRowLayout {
    pub horizontal_arrangement: Option<Arrangement<HorizontalArrangement>>,
    pub vertical_arrangement: Option<Arrangement<VerticalArrangement>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ColumnLayout {
    pub vertical_arrangement: Option<Arrangement<VerticalArrangement>>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxLayout {
    pub alignment: Option<BoxAlignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextAlign {
    Start,
    End,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextOverflow {
    Ellipsis,
}

/// Content and typography of a text node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextContent {
    pub text: String,
    pub text_style: Bindable<FontStyle>,
    pub text_color: Option<Bindable<Color>>,
    pub text_align: Option<TextAlign>,
    pub max_lines: Option<u32>,
    pub overflow: Option<TextOverflow>,
}

impl TextContent {
    pub fn new(text: impl Into<String>, text_style: Bindable<FontStyle>) -> Self {
        Self {
            text: text.into(),
            text_style,
            text_color: None,
            text_align: None,
            max_lines: None,
            overflow: None,
        }
    }
}

/// Rounded-corner shape. Only built when at least one corner is non-zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Shape {
    pub radius_top_left: Dimension,
    pub radius_top_right: Dimension,
    pub radius_bottom_right: Dimension,
    pub radius_bottom_left: Dimension,
}

impl Shape {
    pub fn uniform(radius: Dimension) -> Self {
        Self {
            radius_top_left: radius.clone(),
            radius_top_right: radius.clone(),
            radius_bottom_right: radius.clone(),
            radius_bottom_left: radius,
        }
    }

    /// Corners in clockwise order starting at the top left.
    pub fn corners(&self) -> [&Dimension; 4] {
        [
            &self.radius_top_left,
            &self.radius_top_right,
            &self.radius_bottom_right,
            &self.radius_bottom_left,
        ]
    }
}

/// Padding with only the non-zero sides present.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: Option<Dimension>,
    pub top: Option<Dimension>,
    pub right: Option<Dimension>,
    pub bottom: Option<Dimension>,
}

impl Padding {
    pub fn uniform(value: Dimension) -> Self {
        Self {
            left: Some(value.clone()),
            top: Some(value.clone()),
            right: Some(value.clone()),
            bottom: Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillAxis {
    Width,
    Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SizeAxis {
    /// Width and height together.
    Size,
    Width,
    Height,
}

/// A modifier attached to a node. The order of a node's modifiers is the
/// order they are applied in the generated code.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "name", rename_all = "snake_case"))]
pub enum Modifier {
    Background {
        color: Bindable<Color>,
        shape: Option<Shape>,
    },
    Border {
        color: Bindable<Color>,
        shape: Option<Shape>,
        width: Option<Dimension>,
    },
    Padding(Padding),
    Weight {
        weight: f64,
    },
    FillMax {
        axis: FillAxis,
    },
    Baseline,
    Size {
        axis: SizeAxis,
        value: Dimension,
    },
}

impl Modifier {
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Background { .. } => "background",
            Modifier::Border { .. } => "border",
            Modifier::Padding(_) => "padding",
            Modifier::Weight { .. } => "weight",
            Modifier::FillMax { axis: FillAxis::Width } => "fill_max_width",
            Modifier::FillMax { axis: FillAxis::Height } => "fill_max_height",
            Modifier::Baseline => "baseline",
            Modifier::Size { axis: SizeAxis::Size, .. } => "size",
            Modifier::Size { axis: SizeAxis::Width, .. } => "width",
            Modifier::Size { axis: SizeAxis::Height, .. } => "height",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reference;

    #[test]
    fn test_text_nodes_stay_childless() {
        let text = Node::new(
            "Label",
            NodeKind::Text(TextContent::new("Hi", FontStyle::default().into())),
        )
        .with_children(vec![Node::new("Inner", NodeKind::Box(BoxLayout::default()))]);

        assert!(text.children.is_empty());
        assert_eq!(text.len(), 1);
    }

    #[test]
    fn test_node_len_counts_subtree() {
        let leaf = || Node::new("Leaf", NodeKind::Box(BoxLayout::default()));
        let root = Node::new("Root", NodeKind::Column(ColumnLayout::default()))
            .with_children(vec![leaf(), leaf().with_children(vec![leaf()])]);

        assert_eq!(root.len(), 4);
        assert_eq!(root.kind_name(), "column");
    }

    #[test]
    fn test_modifier_names() {
        assert_eq!(Modifier::FillMax { axis: FillAxis::Height }.name(), "fill_max_height");
        assert_eq!(
            Modifier::Size { axis: SizeAxis::Width, value: 10.0.into() }.name(),
            "width"
        );
        assert_eq!(Modifier::Baseline.name(), "baseline");
    }

    #[test]
    fn test_shape_corners_order() {
        let shape = Shape {
            radius_top_left: 1.0.into(),
            radius_top_right: 2.0.into(),
            radius_bottom_right: Bindable::Bound(Reference::new("v", "radius/lg", 3.0)),
            radius_bottom_left: 4.0.into(),
        };
        let values: Vec<f64> = shape.corners().iter().map(|d| *d.value()).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
