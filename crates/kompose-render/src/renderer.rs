//! Layout IR to Compose source.
//!
//! One statement per IR node, children nested in a trailing body block:
//!
//! ```text
//! // Toolbar
//! Row(
//!     modifier = Modifier
//!         .background(Color(0xFFFF0000))
//!         .padding(16.dp),
//!     horizontalArrangement = Arrangement.spacedBy(12.dp),
//! ) {
//!     // Title
//!     Text(
//!         style = Title,
//!         text = "Hello",
//!     )
//! }
//! ```
//!
//! Every design value is registered in the mapping table and emitted as a
//! token segment.

use kompose_core::{
    Arrangement, Bindable, BoxLayout, ColumnLayout, Dimension, FillAxis, FlowRowLayout,
    HorizontalAlignment, HorizontalArrangement, Modifier, Node, NodeKind, Padding, RenderError,
    RowLayout, Shape, SizeAxis, TextAlign, TextContent, TextOverflow, Value, VerticalAlignment,
    VerticalArrangement,
};
use kompose_mapping::{Category, MappingTableValue, MutableMappingTable, RenderedCode};

use crate::formatter::{escape_string, number, ComposeFormatter};

/// Rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Node names in comments are cut to this many characters.
    pub max_comment_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            max_comment_len: 40,
        }
    }
}

/// Render `root` with default options, registering its values in `table`.
pub fn render(table: &mut MutableMappingTable, root: &Node) -> Result<RenderedCode, RenderError> {
    Renderer::new(table).render(root)
}

/// A named or positional call argument.
type Arg = (Option<&'static str>, RenderedCode);

/// Renders one IR tree into a mapping table.
pub struct Renderer<'t> {
    table: &'t mut MutableMappingTable,
    formatter: ComposeFormatter,
    options: RenderOptions,
    code: RenderedCode,
}

impl<'t> Renderer<'t> {
    pub fn new(table: &'t mut MutableMappingTable) -> Self {
        Self::with_options(table, RenderOptions::default())
    }

    pub fn with_options(table: &'t mut MutableMappingTable, options: RenderOptions) -> Self {
        Self {
            table,
            formatter: ComposeFormatter,
            options,
            code: RenderedCode::new(),
        }
    }

    pub fn render(mut self, root: &Node) -> Result<RenderedCode, RenderError> {
        self.node(root, 0)?;
        Ok(self.code)
    }

    /// Register a value and return its token, or `None` for absent or blank
    /// values.
    pub fn transform_value<T>(
        &mut self,
        category: Category,
        value: Option<&Bindable<T>>,
    ) -> Result<Option<MappingTableValue>, RenderError>
    where
        T: Clone + Into<Value>,
    {
        self.table.add_reference(category, value, &self.formatter)
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.options.indent_width)
    }

    fn node(&mut self, node: &Node, depth: usize) -> Result<(), RenderError> {
        let mut params: Vec<(&'static str, RenderedCode)> = Vec::new();
        if let Some(chain) = self.modifier_chain(&node.modifiers, depth + 1)? {
            params.push(("modifier", chain));
        }
        match &node.kind {
            NodeKind::Row(row) => self.row_params(row, &mut params)?,
            NodeKind::FlowRow(flow) => self.flow_row_params(flow, &mut params)?,
            NodeKind::Column(column) => self.column_params(column, &mut params)?,
            NodeKind::Box(layout) => box_params(layout, &mut params),
            NodeKind::Text(text) => self.text_params(text, &mut params)?,
        }

        let indent = self.indent(depth);
        let inner = self.indent(depth + 1);
        let comment = comment(&node.node_name, self.options.max_comment_len);
        self.code.push_text(&format!("{indent}// {comment}\n"));

        let name = composable_name(&node.kind);
        if params.is_empty() && !node.is_text() {
            self.code.push_text(&format!("{indent}{name} {{\n"));
        } else {
            self.code.push_text(&format!("{indent}{name}(\n"));
            for (key, value) in params {
                self.code.push_text(&format!("{inner}{key} = "));
                self.code.append(value);
                self.code.push_text(",\n");
            }
            if node.is_text() {
                self.code.push_text(&format!("{indent})\n"));
                return Ok(());
            }
            self.code.push_text(&format!("{indent}) {{\n"));
        }

        if node.children.is_empty() {
            self.code.push_text(&format!("{inner}// empty\n"));
        }
        for child in &node.children {
            self.node(child, depth + 1)?;
        }
        self.code.push_text(&format!("{indent}}}\n"));
        Ok(())
    }

    /// `Modifier` followed by one call per line, or `None` when no modifier
    /// renders anything.
    fn modifier_chain(
        &mut self,
        modifiers: &[Modifier],
        depth: usize,
    ) -> Result<Option<RenderedCode>, RenderError> {
        let mut calls = Vec::new();
        for modifier in modifiers {
            if let Some(call) = self.modifier(modifier)? {
                calls.push(call);
            }
        }
        if calls.is_empty() {
            return Ok(None);
        }

        let indent = self.indent(depth + 1);
        let mut chain = RenderedCode::from("Modifier");
        for call in calls {
            chain.push_text(&format!("\n{indent}."));
            chain.append(call);
        }
        Ok(Some(chain))
    }

    fn modifier(&mut self, modifier: &Modifier) -> Result<Option<RenderedCode>, RenderError> {
        let call = match modifier {
            Modifier::Weight { weight } => RenderedCode::from(format!("weight({}f)", number(*weight)?)),
            Modifier::FillMax { axis: FillAxis::Width } => RenderedCode::from("fillMaxWidth()"),
            Modifier::FillMax { axis: FillAxis::Height } => RenderedCode::from("fillMaxHeight()"),
            Modifier::Baseline => RenderedCode::from("alignByBaseline()"),
            Modifier::Background { color, shape } => {
                let Some(color) = self.transform_value(Category::Color, Some(color))? else {
                    return Ok(None);
                };
                let mut args: Vec<Arg> = vec![(None, color.into())];
                if let Some(shape) = shape {
                    args.extend(self.shape(shape)?.map(|shape| (None, shape)));
                }
                call("background", args)
            }
            Modifier::Border { color, shape, width } => {
                let Some(color) = self.transform_value(Category::Color, Some(color))? else {
                    return Ok(None);
                };
                let width = match self.transform_value(Category::Padding, width.as_ref())? {
                    Some(width) => RenderedCode::from(width),
                    None => RenderedCode::from("Dp.Hairline"),
                };
                let mut args: Vec<Arg> = vec![(Some("width"), width), (Some("color"), color.into())];
                if let Some(shape) = shape {
                    args.extend(self.shape(shape)?.map(|shape| (Some("shape"), shape)));
                }
                call("border", args)
            }
            Modifier::Padding(padding) => match self.padding(padding)? {
                Some(call) => call,
                None => return Ok(None),
            },
            Modifier::Size { axis, value } => {
                let Some(value) = self.transform_value(Category::Padding, Some(value))? else {
                    return Ok(None);
                };
                let name = match axis {
                    SizeAxis::Size => "size",
                    SizeAxis::Width => "width",
                    SizeAxis::Height => "height",
                };
                call(name, vec![(None, value.into())])
            }
        };
        Ok(Some(call))
    }

    fn padding(&mut self, padding: &Padding) -> Result<Option<RenderedCode>, RenderError> {
        let left = self.transform_value(Category::Padding, padding.left.as_ref())?;
        let top = self.transform_value(Category::Padding, padding.top.as_ref())?;
        let right = self.transform_value(Category::Padding, padding.right.as_ref())?;
        let bottom = self.transform_value(Category::Padding, padding.bottom.as_ref())?;
        if left.is_none() && top.is_none() && right.is_none() && bottom.is_none() {
            return Ok(None);
        }

        let args = if left.is_some() && left == top && left == right && left == bottom {
            named(&[(None, left)])
        } else if left == right && top == bottom {
            named(&[(Some("horizontal"), left), (Some("vertical"), top)])
        } else {
            named(&[
                (Some("start"), left),
                (Some("top"), top),
                (Some("end"), right),
                (Some("bottom"), bottom),
            ])
        };
        Ok(Some(call("padding", args)))
    }

    fn shape(&mut self, shape: &Shape) -> Result<Option<RenderedCode>, RenderError> {
        let [top_left, top_right, bottom_right, bottom_left] = shape.corners();
        let top_start = self.transform_value(Category::Shape, Some(top_left))?;
        let top_end = self.transform_value(Category::Shape, Some(top_right))?;
        let bottom_end = self.transform_value(Category::Shape, Some(bottom_right))?;
        let bottom_start = self.transform_value(Category::Shape, Some(bottom_left))?;
        if top_start.is_none() && top_end.is_none() && bottom_end.is_none() && bottom_start.is_none() {
            return Ok(None);
        }

        let args = if top_start.is_some()
            && top_start == top_end
            && top_start == bottom_end
            && top_start == bottom_start
        {
            named(&[(None, top_start)])
        } else {
            named(&[
                (Some("topStart"), top_start),
                (Some("topEnd"), top_end),
                (Some("bottomEnd"), bottom_end),
                (Some("bottomStart"), bottom_start),
            ])
        };
        Ok(Some(call("RoundedCornerShape", args)))
    }

    fn spaced_by(&mut self, spacing: &Dimension) -> Result<Option<RenderedCode>, RenderError> {
        let token = self.transform_value(Category::Padding, Some(spacing))?;
        Ok(token.map(|token| call("Arrangement.spacedBy", vec![(None, token.into())])))
    }

    fn horizontal_arrangement(
        &mut self,
        arrangement: &Arrangement<HorizontalArrangement>,
    ) -> Result<Option<RenderedCode>, RenderError> {
        let constant = match arrangement {
            Arrangement::SpacedBy(spacing) => return self.spaced_by(spacing),
            Arrangement::Aligned(HorizontalArrangement::SpaceBetween) => "Arrangement.SpaceBetween",
            Arrangement::Aligned(HorizontalArrangement::Center) => "Arrangement.Center",
            Arrangement::Aligned(HorizontalArrangement::Start) => "Arrangement.Start",
            Arrangement::Aligned(HorizontalArrangement::End) => "Arrangement.End",
        };
        Ok(Some(RenderedCode::from(constant)))
    }

    fn vertical_arrangement(
        &mut self,
        arrangement: &Arrangement<VerticalArrangement>,
    ) -> Result<Option<RenderedCode>, RenderError> {
        let constant = match arrangement {
            Arrangement::SpacedBy(spacing) => return self.spaced_by(spacing),
            Arrangement::Aligned(VerticalArrangement::SpaceBetween) => "Arrangement.SpaceBetween",
            Arrangement::Aligned(VerticalArrangement::Center) => "Arrangement.Center",
            Arrangement::Aligned(VerticalArrangement::Top) => "Arrangement.Top",
            Arrangement::Aligned(VerticalArrangement::Bottom) => "Arrangement.Bottom",
        };
        Ok(Some(RenderedCode::from(constant)))
    }

    fn row_params(
        &mut self,
        row: &RowLayout,
        params: &mut Vec<(&'static str, RenderedCode)>,
    ) -> Result<(), RenderError> {
        if let Some(arrangement) = &row.horizontal_arrangement {
            if let Some(value) = self.horizontal_arrangement(arrangement)? {
                params.push(("horizontalArrangement", value));
            }
        }
        // Top is the Row default; baseline alignment is expressed on the children
        let alignment = match row.vertical_alignment {
            Some(VerticalAlignment::Bottom) => Some("Alignment.Bottom"),
            Some(VerticalAlignment::Center) => Some("Alignment.CenterVertically"),
            Some(VerticalAlignment::Top | VerticalAlignment::Baseline) | None => None,
        };
        if let Some(alignment) = alignment {
            params.push(("verticalAlignment", alignment.into()));
        }
        Ok(())
    }

    fn flow_row_params(
        &mut self,
        flow: &FlowRowLayout,
        params: &mut Vec<(&'static str, RenderedCode)>,
    ) -> Result<(), RenderError> {
        if let Some(arrangement) = &flow.horizontal_arrangement {
            if let Some(value) = self.horizontal_arrangement(arrangement)? {
                params.push(("horizontalArrangement", value));
            }
        }
        if let Some(arrangement) = &flow.vertical_arrangement {
            if let Some(value) = self.vertical_arrangement(arrangement)? {
                params.push(("verticalArrangement", value));
            }
        }
        Ok(())
    }

    fn column_params(
        &mut self,
        column: &ColumnLayout,
        params: &mut Vec<(&'static str, RenderedCode)>,
    ) -> Result<(), RenderError> {
        if let Some(arrangement) = &column.vertical_arrangement {
            if let Some(value) = self.vertical_arrangement(arrangement)? {
                params.push(("verticalArrangement", value));
            }
        }
        // Start is the Column default
        let alignment = match column.horizontal_alignment {
            Some(HorizontalAlignment::End) => Some("Alignment.End"),
            Some(HorizontalAlignment::Center) => Some("Alignment.CenterHorizontally"),
            Some(HorizontalAlignment::Start) | None => None,
        };
        if let Some(alignment) = alignment {
            params.push(("horizontalAlignment", alignment.into()));
        }
        Ok(())
    }

    fn text_params(
        &mut self,
        text: &TextContent,
        params: &mut Vec<(&'static str, RenderedCode)>,
    ) -> Result<(), RenderError> {
        if let Some(style) = self.transform_value(Category::Text, Some(&text.text_style))? {
            params.push(("style", style.into()));
        }
        params.push(("text", format!("\"{}\"", escape_string(&text.text)).into()));
        if let Some(color) = self.transform_value(Category::Color, text.text_color.as_ref())? {
            params.push(("color", color.into()));
        }
        let align = match text.text_align {
            Some(TextAlign::Start) => Some("TextAlign.Start"),
            Some(TextAlign::End) => Some("TextAlign.End"),
            Some(TextAlign::Center) => Some("TextAlign.Center"),
            Some(TextAlign::Justify) => Some("TextAlign.Justify"),
            None => None,
        };
        if let Some(align) = align {
            params.push(("textAlign", align.into()));
        }
        if let Some(TextOverflow::Ellipsis) = text.overflow {
            params.push(("overflow", "TextOverflow.Ellipsis".into()));
        }
        if let Some(max_lines) = text.max_lines {
            params.push(("maxLines", max_lines.to_string().into()));
        }
        Ok(())
    }
}

fn box_params(layout: &BoxLayout, params: &mut Vec<(&'static str, RenderedCode)>) {
    if layout.alignment.is_some() {
        params.push(("contentAlignment", "Alignment.Center".into()));
    }
}

fn composable_name(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Row(_) => "Row",
        NodeKind::FlowRow(_) => "FlowRow",
        NodeKind::Column(_) => "Column",
        NodeKind::Box(_) => "Box",
        NodeKind::Text(_) => "Text",
    }
}

/// Single-line comment text for a node name.
fn comment(name: &str, max_len: usize) -> String {
    let flat: String = name
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() > max_len {
        let cut: String = flat.chars().take(max_len).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

/// Arguments with absent values left out.
fn named(args: &[(Option<&'static str>, Option<MappingTableValue>)]) -> Vec<Arg> {
    args.iter()
        .filter_map(|(key, value)| value.clone().map(|value| (*key, value.into())))
        .collect()
}

/// `name(arg, key = arg, ...)`.
fn call(name: &str, args: Vec<Arg>) -> RenderedCode {
    let mut code = RenderedCode::from(format!("{name}("));
    for (i, (key, value)) in args.into_iter().enumerate() {
        if i > 0 {
            code.push_text(", ");
        }
        if let Some(key) = key {
            code.push_text(&format!("{key} = "));
        }
        code.append(value);
    }
    code.push_text(")");
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use kompose_core::{Color, Reference};
    use pretty_assertions::assert_eq;

    fn render_modifier(modifier: Modifier) -> String {
        let mut table = MutableMappingTable::new();
        let mut renderer = Renderer::new(&mut table);
        renderer
            .modifier(&modifier)
            .unwrap()
            .map(|code| code.to_plain())
            .unwrap_or_default()
    }

    fn dp(value: f64) -> Option<Dimension> {
        Some(Bindable::Literal(value))
    }

    #[test]
    fn test_padding_collapses() {
        let uniform = Padding::uniform(Bindable::Literal(16.0));
        assert_eq!(render_modifier(Modifier::Padding(uniform)), "padding(16.dp)");

        let symmetric = Padding { left: dp(8.0), top: dp(4.0), right: dp(8.0), bottom: dp(4.0) };
        assert_eq!(
            render_modifier(Modifier::Padding(symmetric)),
            "padding(horizontal = 8.dp, vertical = 4.dp)"
        );

        let sides = Padding { left: dp(8.0), right: dp(8.0), ..Padding::default() };
        assert_eq!(render_modifier(Modifier::Padding(sides)), "padding(horizontal = 8.dp)");

        let mixed = Padding { left: dp(1.0), top: dp(2.0), right: dp(3.0), bottom: None };
        assert_eq!(
            render_modifier(Modifier::Padding(mixed)),
            "padding(start = 1.dp, top = 2.dp, end = 3.dp)"
        );
    }

    #[test]
    fn test_shape_collapses() {
        let background = |shape: Shape| Modifier::Background {
            color: Bindable::Literal(Color::WHITE),
            shape: Some(shape),
        };
        assert_eq!(
            render_modifier(background(Shape::uniform(Bindable::Literal(8.0)))),
            "background(Color(0xFFFFFFFF), RoundedCornerShape(8.dp))"
        );

        let top = Shape {
            radius_top_left: Bindable::Literal(8.0),
            radius_top_right: Bindable::Literal(8.0),
            radius_bottom_right: Bindable::Literal(0.0),
            radius_bottom_left: Bindable::Literal(0.0),
        };
        assert_eq!(
            render_modifier(background(top)),
            "background(Color(0xFFFFFFFF), RoundedCornerShape(topStart = 8.dp, topEnd = 8.dp))"
        );
    }

    #[test]
    fn test_border_without_width_is_hairline() {
        let border = Modifier::Border {
            color: Bindable::Literal(Color::BLACK),
            shape: Some(Shape::uniform(Bindable::Literal(4.0))),
            width: None,
        };
        assert_eq!(
            render_modifier(border),
            "border(width = Dp.Hairline, color = Color(0xFF000000), shape = RoundedCornerShape(4.dp))"
        );
    }

    #[test]
    fn test_simple_modifiers() {
        assert_eq!(render_modifier(Modifier::Weight { weight: 1.0 }), "weight(1f)");
        assert_eq!(render_modifier(Modifier::FillMax { axis: FillAxis::Width }), "fillMaxWidth()");
        assert_eq!(render_modifier(Modifier::Baseline), "alignByBaseline()");
        assert_eq!(
            render_modifier(Modifier::Size { axis: SizeAxis::Height, value: Bindable::Literal(48.0) }),
            "height(48.dp)"
        );
        assert_eq!(
            render_modifier(Modifier::Size { axis: SizeAxis::Size, value: Bindable::Literal(0.0) }),
            ""
        );
    }

    #[test]
    fn test_reference_values_register_by_name() {
        let mut table = MutableMappingTable::new();
        let spacing = Bindable::Bound(Reference::new("V:1", "spacing/md", 16.0));
        let code = Renderer::new(&mut table)
            .modifier(&Modifier::Padding(Padding::uniform(spacing)))
            .unwrap()
            .unwrap();

        assert_eq!(code.tokens().count(), 1);
        assert_eq!(code.fold(|t| t.name.clone()), "padding(spacing/md)");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_comment_truncation() {
        assert_eq!(comment("Header", 40), "Header");
        assert_eq!(comment("a\nb", 40), "a b");
        assert_eq!(comment("abcdef", 3), "abc...");
    }
}
