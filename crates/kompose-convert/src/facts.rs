//! Per-node facts the converter needs, and the default provider that reads
//! them from a [`DesignDocument`].
//!
//! Every fact can come back bound to a named style or variable, in which case
//! it is a [`Bindable::Bound`] reference; otherwise it is the node's literal.
//! A binding that cannot be resolved falls back to the literal.

use kompose_core::{Bindable, Color, Dimension, FontStyle, Reference, Shape};

use crate::document::{DesignDocument, Style, VariableType, VariableValue};
use crate::scene::{
    FrameNode, LayoutMode, LayoutWrap, Mixable, Paint, TextAlignHorizontal, TextNode,
    TextTruncation, VariableAlias,
};

/// Solid background of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBackground {
    pub color: Bindable<Color>,
}

/// Solid stroke of a node. A missing width renders as a hairline.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBorder {
    pub color: Bindable<Color>,
    pub width: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CornerRadii {
    pub top_left: Dimension,
    pub top_right: Dimension,
    pub bottom_right: Dimension,
    pub bottom_left: Dimension,
}

impl CornerRadii {
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius.into(),
            top_right: radius.into(),
            bottom_right: radius.into(),
            bottom_left: radius.into(),
        }
    }

    /// The rounded shape, or `None` when every corner is a square literal.
    pub fn shape(&self) -> Option<Shape> {
        let corners = [&self.top_left, &self.top_right, &self.bottom_right, &self.bottom_left];
        if corners.iter().all(|corner| corner.is_blank()) {
            return None;
        }
        Some(Shape {
            radius_top_left: self.top_left.clone(),
            radius_top_right: self.top_right.clone(),
            radius_bottom_right: self.bottom_right.clone(),
            radius_bottom_left: self.bottom_left.clone(),
        })
    }
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
    None,
}

/// Auto-layout settings of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub direction: LayoutDirection,
    pub wrap: bool,
    pub primary_axis_spacing: Dimension,
    pub counter_axis_spacing: Option<Dimension>,
    pub padding_left: Dimension,
    pub padding_top: Dimension,
    pub padding_right: Dimension,
    pub padding_bottom: Dimension,
}

impl NodeLayout {
    pub fn new(direction: LayoutDirection) -> Self {
        Self {
            direction,
            wrap: false,
            primary_axis_spacing: Bindable::Literal(0.0),
            counter_axis_spacing: None,
            padding_left: Bindable::Literal(0.0),
            padding_top: Bindable::Literal(0.0),
            padding_right: Bindable::Literal(0.0),
            padding_bottom: Bindable::Literal(0.0),
        }
    }
}

/// Content and uniform typography of a text node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeText {
    pub text: String,
    pub style: Bindable<FontStyle>,
    pub color: Option<Bindable<Color>>,
    pub align: TextAlignHorizontal,
    pub truncation: TextTruncation,
    pub max_lines: Option<u32>,
}

/// Source of per-node facts. The converter awaits each fact, so an
/// implementation may fetch them lazily from a host.
#[allow(async_fn_in_trait)]
pub trait NodeFacts {
    async fn background(&self, node: &FrameNode) -> Option<NodeBackground>;

    async fn border(&self, node: &FrameNode) -> Option<NodeBorder>;

    async fn corner_radii(&self, node: &FrameNode) -> CornerRadii;

    /// `None` when the layout mode or wrap setting is not supported.
    async fn layout(&self, node: &FrameNode) -> Option<NodeLayout>;

    /// `None` when the typography or color is not uniform over the node.
    async fn text(&self, node: &TextNode) -> Option<NodeText>;
}

/// Facts read from a [`DesignDocument`], resolving bindings against its
/// registries.
#[derive(Debug, Clone, Copy)]
pub struct DocumentFacts<'a> {
    document: &'a DesignDocument,
}

impl<'a> DocumentFacts<'a> {
    pub fn new(document: &'a DesignDocument) -> Self {
        Self { document }
    }

    /// A number, bound to a FLOAT variable when the alias resolves. The
    /// reference carries the variable's resolved value, or the literal when
    /// the document has none.
    fn float(&self, literal: f64, alias: Option<&VariableAlias>) -> Dimension {
        let Some(alias) = alias else {
            return Bindable::Literal(literal);
        };
        match self.document.variable(&alias.id, VariableType::Float) {
            Some(variable) => {
                let value = match variable.value {
                    Some(VariableValue::Float(value)) => value,
                    _ => literal,
                };
                Bindable::Bound(Reference::new(alias.id.clone(), variable.name.clone(), value))
            }
            None => {
                log::debug!("Unresolved float variable {}, using literal {}", alias.id, literal);
                Bindable::Literal(literal)
            }
        }
    }

    /// Color of a single solid paint, from the paint style if one applies.
    fn paint_color(&self, paints: Option<&[Paint]>, style_id: Option<&str>) -> Option<Bindable<Color>> {
        if let Some(style_id) = style_id.filter(|id| !id.is_empty()) {
            match self.document.style(style_id) {
                Some(Style::Paint(style)) => {
                    let color = style.paints.first()?.solid_color()?;
                    return Some(Bindable::Bound(Reference::new(
                        style_id,
                        style.name.clone(),
                        color,
                    )));
                }
                _ => log::debug!("Unresolved paint style {}, using node paints", style_id),
            }
        }

        let mut visible = paints?.iter().filter(|paint| paint.visible);
        let paint = visible.next()?;
        if visible.next().is_some() {
            return None;
        }
        let color = paint.solid_color()?;

        let Some(alias) = &paint.bound_variables.color else {
            return Some(Bindable::Literal(color));
        };
        match self.document.variable(&alias.id, VariableType::Color) {
            Some(variable) => {
                let color = match variable.value {
                    Some(VariableValue::Color(resolved)) => {
                        resolved.with_alpha(resolved.a * paint.opacity.unwrap_or(1.0))
                    }
                    _ => color,
                };
                Some(Bindable::Bound(Reference::new(alias.id.clone(), variable.name.clone(), color)))
            }
            None => {
                log::debug!("Unresolved color variable {}, using literal", alias.id);
                Some(Bindable::Literal(color))
            }
        }
    }

    fn text_style(&self, node: &TextNode) -> Option<Bindable<FontStyle>> {
        if let (Mixable::Value(style_id), Mixable::Value(weight)) = (&node.text_style_id, &node.font_weight) {
            if !style_id.is_empty() {
                match self.document.style(style_id) {
                    Some(Style::Text(style)) => {
                        let font = FontStyle {
                            font_size: style.font_size,
                            font_weight: *weight,
                            text_decoration: style.text_decoration,
                            font_name: style.font_name.clone(),
                            letter_spacing: style.letter_spacing,
                            line_height: style.line_height,
                            text_case: style.text_case,
                        };
                        return Some(Bindable::Bound(Reference::new(
                            style_id.clone(),
                            style.name.clone(),
                            font,
                        )));
                    }
                    _ => log::debug!("Unresolved text style {}, using node fonts", style_id),
                }
            }
        }

        let font = FontStyle {
            font_size: *node.font_size.value()?,
            font_weight: *node.font_weight.value()?,
            text_decoration: *node.text_decoration.value()?,
            font_name: node.font_name.value()?.clone(),
            letter_spacing: *node.letter_spacing.value()?,
            line_height: *node.line_height.value()?,
            text_case: *node.text_case.value()?,
        };
        Some(Bindable::Literal(font))
    }
}

impl NodeFacts for DocumentFacts<'_> {
    async fn background(&self, node: &FrameNode) -> Option<NodeBackground> {
        let paints = node.fills.value().map(Vec::as_slice);
        let color = self.paint_color(paints, node.fill_style_id.value().map(String::as_str))?;
        Some(NodeBackground { color })
    }

    async fn border(&self, node: &FrameNode) -> Option<NodeBorder> {
        let color = self.paint_color(Some(node.strokes.as_slice()), Some(node.stroke_style_id.as_str()))?;
        let width = match &node.stroke_weight {
            None => None,
            Some(Mixable::Mixed(_)) => return None,
            Some(Mixable::Value(weight)) if *weight == 0.0 => return None,
            Some(Mixable::Value(weight)) => {
                Some(self.float(*weight, node.bound_variables.stroke_weight.as_ref()))
            }
        };
        Some(NodeBorder { color, width })
    }

    async fn corner_radii(&self, node: &FrameNode) -> CornerRadii {
        let bindings = &node.bound_variables;
        CornerRadii {
            top_left: self.float(node.top_left_radius, bindings.top_left_radius.as_ref()),
            top_right: self.float(node.top_right_radius, bindings.top_right_radius.as_ref()),
            bottom_right: self.float(node.bottom_right_radius, bindings.bottom_right_radius.as_ref()),
            bottom_left: self.float(node.bottom_left_radius, bindings.bottom_left_radius.as_ref()),
        }
    }

    async fn layout(&self, node: &FrameNode) -> Option<NodeLayout> {
        let direction = match node.layout_mode {
            LayoutMode::Horizontal => LayoutDirection::Horizontal,
            LayoutMode::Vertical => LayoutDirection::Vertical,
            LayoutMode::None => LayoutDirection::None,
            LayoutMode::Unsupported => return None,
        };
        let wrap = match node.layout_wrap {
            LayoutWrap::NoWrap => false,
            LayoutWrap::Wrap => true,
            LayoutWrap::Unsupported => return None,
        };

        let bindings = &node.bound_variables;
        Some(NodeLayout {
            direction,
            wrap,
            primary_axis_spacing: self.float(node.item_spacing, bindings.item_spacing.as_ref()),
            counter_axis_spacing: node
                .counter_axis_spacing
                .map(|spacing| self.float(spacing, bindings.counter_axis_spacing.as_ref())),
            padding_left: self.float(node.padding_left, bindings.padding_left.as_ref()),
            padding_top: self.float(node.padding_top, bindings.padding_top.as_ref()),
            padding_right: self.float(node.padding_right, bindings.padding_right.as_ref()),
            padding_bottom: self.float(node.padding_bottom, bindings.padding_bottom.as_ref()),
        })
    }

    async fn text(&self, node: &TextNode) -> Option<NodeText> {
        let style = self.text_style(node)?;
        let Mixable::Value(fills) = &node.fills else {
            return None;
        };
        let color = self.paint_color(Some(fills.as_slice()), node.fill_style_id.value().map(String::as_str));

        Some(NodeText {
            text: node.characters.clone(),
            style,
            color,
            align: node.text_align_horizontal,
            truncation: node.text_truncation,
            max_lines: node.max_lines,
        })
    }
}
