//! Scene tree to layout IR conversion.
//!
//! Each container becomes a row, flow row, column or box depending on its
//! auto-layout direction and child count; text nodes become text. Nodes the
//! converter cannot express are dropped together with their subtree.

use futures_util::future::{join_all, LocalBoxFuture};
use futures_util::FutureExt;
use kompose_core::{
    Arrangement, BoxAlignment, BoxLayout, ColumnLayout, Dimension, FillAxis, FlowRowLayout,
    HorizontalAlignment, HorizontalArrangement, Modifier, Node, NodeKind, Padding, RowLayout,
    SizeAxis, TextAlign, TextContent, TextOverflow, VerticalAlignment, VerticalArrangement,
};

use crate::facts::{LayoutDirection, NodeFacts, NodeLayout};
use crate::scene::{
    AxisAlign, FrameNode, NodeClass, SceneNode, Sizing, TextAlignHorizontal, TextNode,
    TextTruncation,
};

/// Convert `node` and its subtree. `None` when the node is dropped.
pub async fn convert<F: NodeFacts>(facts: &F, node: &SceneNode) -> Option<Node> {
    Converter::new(facts).convert(node).await
}

/// What a child needs to know about the node it is converted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParentContext {
    kind: ParentKind,
    /// The parent is a row aligning its children by baseline.
    baseline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentKind {
    Row,
    FlowRow,
    Column,
    Box,
}

impl ParentContext {
    fn of(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Row(row) => Self {
                kind: ParentKind::Row,
                baseline: row.vertical_alignment == Some(VerticalAlignment::Baseline),
            },
            NodeKind::FlowRow(_) => Self::plain(ParentKind::FlowRow),
            NodeKind::Column(_) => Self::plain(ParentKind::Column),
            NodeKind::Box(_) | NodeKind::Text(_) => Self::plain(ParentKind::Box),
        }
    }

    fn plain(kind: ParentKind) -> Self {
        Self {
            kind,
            baseline: false,
        }
    }
}

/// Converts scene nodes using facts from `F`.
pub struct Converter<'f, F> {
    facts: &'f F,
}

impl<'f, F: NodeFacts> Converter<'f, F> {
    pub fn new(facts: &'f F) -> Self {
        Self { facts }
    }

    pub async fn convert(&self, node: &SceneNode) -> Option<Node> {
        self.process(None, node).await
    }

    fn process<'a>(
        &'a self,
        parent: Option<ParentContext>,
        node: &'a SceneNode,
    ) -> LocalBoxFuture<'a, Option<Node>> {
        async move {
            if !node.is_visible() {
                return None;
            }
            match node.class() {
                NodeClass::Container(frame) => self.layout_node(parent, frame).await,
                NodeClass::Text(text) => self.text_node(parent, text).await,
                NodeClass::Unsupported => {
                    log::debug!("Dropping unsupported node {:?}", node.name());
                    None
                }
            }
        }
        .boxed_local()
    }

    async fn layout_node(&self, parent: Option<ParentContext>, frame: &FrameNode) -> Option<Node> {
        let background = self.facts.background(frame).await;
        let border = self.facts.border(frame).await;
        let radii = self.facts.corner_radii(frame).await;
        let Some(layout) = self.facts.layout(frame).await else {
            log::debug!("Dropping {:?}: unsupported layout", frame.name);
            return None;
        };

        let mut modifiers = Vec::new();
        modifiers.extend(growth(
            parent,
            frame.layout_sizing_horizontal,
            frame.layout_sizing_vertical,
        ));
        let shape = radii.shape();
        let background_shape = background.as_ref().and(shape.clone());
        if let Some(background) = background {
            modifiers.push(Modifier::Background {
                color: background.color,
                shape,
            });
        }
        if let Some(border) = border {
            modifiers.push(Modifier::Border {
                color: border.color,
                shape: background_shape,
                width: border.width,
            });
        }
        modifiers.extend(padding(&layout).map(Modifier::Padding));
        modifiers.extend(size(
            frame.layout_sizing_horizontal,
            frame.layout_sizing_vertical,
            frame.width,
            frame.height,
        ));

        let kind = classify(&layout, frame);
        let context = ParentContext::of(&kind);
        let children = join_all(
            frame
                .children
                .iter()
                .map(|child| self.process(Some(context), child)),
        )
        .await;

        Some(
            Node::new(frame.name.clone(), kind)
                .with_modifiers(modifiers)
                .with_children(children.into_iter().flatten().collect()),
        )
    }

    async fn text_node(&self, parent: Option<ParentContext>, node: &TextNode) -> Option<Node> {
        let Some(facts) = self.facts.text(node).await else {
            log::debug!("Dropping {:?}: mixed text styling", node.name);
            return None;
        };

        let mut modifiers = Vec::new();
        modifiers.extend(growth(
            parent,
            node.layout_sizing_horizontal,
            node.layout_sizing_vertical,
        ));
        if parent.is_some_and(|parent| parent.baseline) {
            modifiers.push(Modifier::Baseline);
        }
        modifiers.extend(size(
            node.layout_sizing_horizontal,
            node.layout_sizing_vertical,
            node.width,
            node.height,
        ));

        let content = TextContent {
            text: facts.text,
            text_style: facts.style,
            text_color: facts.color,
            text_align: text_align(facts.align),
            max_lines: facts.max_lines,
            overflow: (facts.truncation == TextTruncation::Ending).then_some(TextOverflow::Ellipsis),
        };
        Some(Node::new(node.name.clone(), NodeKind::Text(content)).with_modifiers(modifiers))
    }
}

/// Pick the layout primitive from direction, wrap and child count.
fn classify(layout: &NodeLayout, frame: &FrameNode) -> NodeKind {
    let multiple = frame.children.len() > 1;
    let primary = frame.primary_axis_align_items;
    let counter = frame.counter_axis_align_items;
    let spacing = &layout.primary_axis_spacing;

    match layout.direction {
        LayoutDirection::Horizontal if multiple && layout.wrap => {
            // flow rows wrap onto lines stacked along the counter axis
            let vertical_spacing = layout.counter_axis_spacing.as_ref();
            NodeKind::FlowRow(FlowRowLayout {
                horizontal_arrangement: arrangement(
                    horizontal_arrangement(primary),
                    Some(spacing),
                    HorizontalArrangement::SpaceBetween,
                ),
                vertical_arrangement: arrangement(
                    vertical_arrangement(primary),
                    vertical_spacing,
                    VerticalArrangement::SpaceBetween,
                ),
            })
        }
        LayoutDirection::Horizontal if multiple => NodeKind::Row(RowLayout {
            horizontal_arrangement: arrangement(
                horizontal_arrangement(primary),
                Some(spacing),
                HorizontalArrangement::SpaceBetween,
            ),
            vertical_alignment: vertical_alignment(counter),
        }),
        LayoutDirection::Vertical if multiple => NodeKind::Column(ColumnLayout {
            vertical_arrangement: arrangement(
                vertical_arrangement(primary),
                Some(spacing),
                VerticalArrangement::SpaceBetween,
            ),
            horizontal_alignment: horizontal_alignment(counter),
        }),
        _ => {
            let centered = primary == AxisAlign::Center && counter == AxisAlign::Center;
            NodeKind::Box(BoxLayout {
                alignment: (centered && !frame.children.is_empty()).then_some(BoxAlignment::Center),
            })
        }
    }
}

/// Space-between beats explicit spacing, which beats any other symbolic
/// arrangement.
fn arrangement<A: Copy + PartialEq>(
    symbolic: Option<A>,
    spacing: Option<&Dimension>,
    space_between: A,
) -> Option<Arrangement<A>> {
    if symbolic == Some(space_between) {
        return Some(Arrangement::Aligned(space_between));
    }
    if let Some(spacing) = spacing.filter(|spacing| *spacing.value() > 0.0) {
        return Some(Arrangement::SpacedBy(spacing.clone()));
    }
    symbolic.map(Arrangement::Aligned)
}

fn horizontal_arrangement(align: AxisAlign) -> Option<HorizontalArrangement> {
    match align {
        AxisAlign::Center => Some(HorizontalArrangement::Center),
        AxisAlign::SpaceBetween => Some(HorizontalArrangement::SpaceBetween),
        AxisAlign::Min => Some(HorizontalArrangement::Start),
        AxisAlign::Max => Some(HorizontalArrangement::End),
        AxisAlign::Baseline => None,
    }
}

fn vertical_arrangement(align: AxisAlign) -> Option<VerticalArrangement> {
    match align {
        AxisAlign::Center => Some(VerticalArrangement::Center),
        AxisAlign::SpaceBetween => Some(VerticalArrangement::SpaceBetween),
        AxisAlign::Min => Some(VerticalArrangement::Top),
        AxisAlign::Max => Some(VerticalArrangement::Bottom),
        AxisAlign::Baseline => None,
    }
}

fn vertical_alignment(align: AxisAlign) -> Option<VerticalAlignment> {
    match align {
        AxisAlign::Center => Some(VerticalAlignment::Center),
        AxisAlign::Min => Some(VerticalAlignment::Top),
        AxisAlign::Max => Some(VerticalAlignment::Bottom),
        AxisAlign::Baseline => Some(VerticalAlignment::Baseline),
        AxisAlign::SpaceBetween => None,
    }
}

fn horizontal_alignment(align: AxisAlign) -> Option<HorizontalAlignment> {
    match align {
        AxisAlign::Center => Some(HorizontalAlignment::Center),
        AxisAlign::Min => Some(HorizontalAlignment::Start),
        AxisAlign::Max => Some(HorizontalAlignment::End),
        AxisAlign::Baseline | AxisAlign::SpaceBetween => None,
    }
}

/// How a node grows inside its parent. Weight along the parent's main axis
/// wins over filling the cross axis.
fn growth(parent: Option<ParentContext>, horizontal: Sizing, vertical: Sizing) -> Option<Modifier> {
    let (main, cross, cross_axis) = match parent?.kind {
        ParentKind::Row => (horizontal, vertical, FillAxis::Height),
        ParentKind::Column => (vertical, horizontal, FillAxis::Width),
        ParentKind::Box | ParentKind::FlowRow => return None,
    };
    if main == Sizing::Fill {
        Some(Modifier::Weight { weight: 1.0 })
    } else if cross == Sizing::Fill {
        Some(Modifier::FillMax { axis: cross_axis })
    } else {
        None
    }
}

/// Padding with the zero sides left out, or `None` when all are zero.
fn padding(layout: &NodeLayout) -> Option<Padding> {
    let side = |value: &Dimension| (!value.is_blank()).then(|| value.clone());
    let padding = Padding {
        left: side(&layout.padding_left),
        top: side(&layout.padding_top),
        right: side(&layout.padding_right),
        bottom: side(&layout.padding_bottom),
    };
    if padding == Padding::default() {
        None
    } else {
        Some(padding)
    }
}

fn size(horizontal: Sizing, vertical: Sizing, width: f64, height: f64) -> Vec<Modifier> {
    let width = (horizontal == Sizing::Fixed && width != 0.0).then_some(width);
    let height = (vertical == Sizing::Fixed && height != 0.0).then_some(height);

    match (width, height) {
        (Some(w), Some(h)) if w == h => vec![Modifier::Size {
            axis: SizeAxis::Size,
            value: w.into(),
        }],
        _ => width
            .map(|w| Modifier::Size {
                axis: SizeAxis::Width,
                value: w.into(),
            })
            .into_iter()
            .chain(height.map(|h| Modifier::Size {
                axis: SizeAxis::Height,
                value: h.into(),
            }))
            .collect(),
    }
}

fn text_align(align: TextAlignHorizontal) -> Option<TextAlign> {
    match align {
        TextAlignHorizontal::Left => None,
        TextAlignHorizontal::Center => Some(TextAlign::Center),
        TextAlignHorizontal::Right => Some(TextAlign::End),
        TextAlignHorizontal::Justified => Some(TextAlign::Justify),
    }
}
