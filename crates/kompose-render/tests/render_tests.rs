//! Rendering of converted design documents.

use kompose_convert::{convert, DesignDocument, DocumentFacts};
use kompose_core::{
    Arrangement, Bindable, BoxLayout, Color, ColumnLayout, FlowRowLayout, FontStyle,
    HorizontalAlignment, HorizontalArrangement, Node, NodeKind, RowLayout, TextAlign, TextContent,
    TextOverflow, VerticalAlignment, VerticalArrangement,
};
use kompose_mapping::{create_id, Category, MappingTable, MutableMappingTable, RenderedCode};
use kompose_render::{render, RenderOptions, Renderer};
use pretty_assertions::assert_eq;
use serde_json::json;

async fn render_document(document: serde_json::Value) -> (RenderedCode, MutableMappingTable) {
    let document = DesignDocument::from_value(document).unwrap();
    let facts = DocumentFacts::new(&document);
    let root = convert(&facts, &document.root).await.unwrap();

    let mut table = MutableMappingTable::new();
    let code = render(&mut table, &root).unwrap();
    (code, table)
}

fn toolbar() -> serde_json::Value {
    let child = |name: &str| {
        json!({
            "type": "FRAME", "name": name,
            "layoutSizingHorizontal": "FILL", "layoutSizingVertical": "HUG"
        })
    };
    json!({
        "root": {
            "type": "FRAME",
            "name": "Toolbar",
            "layoutMode": "HORIZONTAL",
            "layoutSizingHorizontal": "HUG",
            "layoutSizingVertical": "HUG",
            "itemSpacing": 12,
            "paddingLeft": 16, "paddingTop": 16, "paddingRight": 16, "paddingBottom": 16,
            "fills": [{"type": "SOLID", "color": {"r": 1.0, "g": 0.0, "b": 0.0}}],
            "children": [child("Left"), child("Right")]
        }
    })
}

#[tokio::test]
async fn test_end_to_end_source() {
    let (code, table) = render_document(toolbar()).await;
    let text = code.to_plain();

    assert_eq!(
        text,
        r#"// Toolbar
Row(
    modifier = Modifier
        .background(Color(0xFFFF0000))
        .padding(16.dp),
    horizontalArrangement = Arrangement.spacedBy(12.dp),
) {
    // Left
    Box(
        modifier = Modifier
            .weight(1f),
    ) {
        // empty
    }
    // Right
    Box(
        modifier = Modifier
            .weight(1f),
    ) {
        // empty
    }
}
"#
    );
    assert_eq!(text.matches(".weight(1f)").count(), 2);
    assert_eq!(text.matches(".padding(").count(), 1);

    let frozen = table.freeze();
    assert_eq!(frozen.category(Category::Color).count(), 1);
    assert_eq!(frozen.category(Category::Padding).count(), 2);
}

#[tokio::test]
async fn test_bound_values_show_names_or_saved_values() {
    let document = json!({
        "root": {
            "type": "FRAME",
            "name": "Card",
            "layoutMode": "VERTICAL",
            "layoutSizingHorizontal": "HUG",
            "layoutSizingVertical": "HUG",
            "itemSpacing": 8,
            "fillStyleId": "S:surface",
            "boundVariables": {"itemSpacing": {"id": "V:gap"}},
            "children": [
                {"type": "TEXT", "name": "Title", "characters": "Hello \"you\"",
                 "textStyleId": "S:title", "fontWeight": 700},
                {"type": "TEXT", "name": "Body", "characters": "Line 1\nLine 2", "fontSize": 14}
            ]
        },
        "styles": {
            "S:surface": {"type": "PAINT", "name": "Surface", "paints": [
                {"type": "SOLID", "color": {"r": 1.0, "g": 1.0, "b": 1.0}}
            ]},
            "S:title": {"type": "TEXT", "name": "Title", "fontSize": 24,
                        "fontName": {"family": "Inter", "style": "Bold"}}
        },
        "variables": {
            "V:gap": {"name": "spacing/sm", "resolvedType": "FLOAT", "value": 8}
        }
    });
    let (code, table) = render_document(document).await;

    let names = code.to_source(&table.freeze(), false);
    assert!(names.contains(".background(Surface)"));
    assert!(names.contains("verticalArrangement = Arrangement.spacedBy(spacing/sm)"));
    assert!(names.contains("style = Title,"));
    assert!(names.contains("text = \"Hello \\\"you\\\"\","));
    assert!(names.contains("text = \"Line 1\\nLine 2\","));

    // a saved config overrides the freshly rendered values
    let saved = MappingTable::from_config("[color]\nSurface = \"Color(0xFF111111)\"\n").unwrap();
    let mut table = table;
    table.merge(&saved, true);
    let values = code.to_source(&table.freeze(), true);
    assert!(values.contains(".background(Color(0xFF111111))"));
    assert!(values.contains("Arrangement.spacedBy(8.dp)"));
    assert!(values.contains("style = TextStyle(fontWeight = FontWeight(700), fontSize = 24.sp),"));
}

#[test]
fn test_first_registered_value_wins_within_a_render() {
    let style = |size: f64| {
        Bindable::Bound(kompose_core::Reference::new(
            "S:1",
            "Body",
            FontStyle {
                font_size: size,
                font_weight: 400.0,
                ..FontStyle::default()
            },
        ))
    };
    let root = Node::new("Texts", NodeKind::Row(RowLayout::default())).with_children(vec![
        Node::new("a", NodeKind::Text(TextContent::new("a", style(14.0)))),
        Node::new("b", NodeKind::Text(TextContent::new("b", style(16.0)))),
    ]);

    let mut table = MutableMappingTable::new();
    render(&mut table, &root).unwrap();
    let entry = table.get(Category::Text, create_id("Body")).unwrap();
    assert!(entry.value.contains("fontSize = 14.sp"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_container_without_params_and_options() {
    let root = Node::new(
        "A container whose name is far too long to fit in a comment",
        NodeKind::Row(RowLayout::default()),
    );
    let mut table = MutableMappingTable::new();
    let options = RenderOptions {
        indent_width: 2,
        max_comment_len: 11,
    };
    let code = Renderer::with_options(&mut table, options).render(&root).unwrap();

    assert_eq!(code.to_plain(), "// A container...\nRow {\n  // empty\n}\n");
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_marked_output_round_trips() {
    let (code, _) = render_document(toolbar()).await;
    let marked = code.to_marked().unwrap();
    let restored = kompose_mapping::parse_marked(&marked).unwrap();
    assert_eq!(restored, code);
}

fn plain_source(root: &Node) -> String {
    let mut table = MutableMappingTable::new();
    render(&mut table, root).unwrap().to_plain()
}

fn body_font() -> Bindable<FontStyle> {
    Bindable::Literal(FontStyle {
        font_size: 14.0,
        font_weight: 400.0,
        ..FontStyle::default()
    })
}

#[test]
fn test_flow_row_source() {
    let root = Node::new(
        "Tags",
        NodeKind::FlowRow(FlowRowLayout {
            horizontal_arrangement: Some(Arrangement::SpacedBy(Bindable::Literal(12.0))),
            vertical_arrangement: Some(Arrangement::SpacedBy(Bindable::Literal(8.0))),
        }),
    )
    .with_children(vec![Node::new("Tag", NodeKind::Box(BoxLayout::default()))]);

    assert_eq!(
        plain_source(&root),
        r#"// Tags
FlowRow(
    horizontalArrangement = Arrangement.spacedBy(12.dp),
    verticalArrangement = Arrangement.spacedBy(8.dp),
) {
    // Tag
    Box {
        // empty
    }
}
"#
    );

    let aligned = Node::new(
        "Tags",
        NodeKind::FlowRow(FlowRowLayout {
            horizontal_arrangement: Some(Arrangement::Aligned(HorizontalArrangement::End)),
            vertical_arrangement: Some(Arrangement::Aligned(VerticalArrangement::Bottom)),
        }),
    );
    let text = plain_source(&aligned);
    assert!(text.contains("horizontalArrangement = Arrangement.End,"));
    assert!(text.contains("verticalArrangement = Arrangement.Bottom,"));
}

#[test]
fn test_row_constants() {
    let row = |arrangement: HorizontalArrangement, alignment: VerticalAlignment| {
        plain_source(&Node::new(
            "Row",
            NodeKind::Row(RowLayout {
                horizontal_arrangement: Some(Arrangement::Aligned(arrangement)),
                vertical_alignment: Some(alignment),
            }),
        ))
    };

    let text = row(HorizontalArrangement::Center, VerticalAlignment::Center);
    assert!(text.contains("horizontalArrangement = Arrangement.Center,"));
    assert!(text.contains("verticalAlignment = Alignment.CenterVertically,"));

    let text = row(HorizontalArrangement::End, VerticalAlignment::Bottom);
    assert!(text.contains("horizontalArrangement = Arrangement.End,"));
    assert!(text.contains("verticalAlignment = Alignment.Bottom,"));

    let text = row(HorizontalArrangement::SpaceBetween, VerticalAlignment::Top);
    assert!(text.contains("horizontalArrangement = Arrangement.SpaceBetween,"));
    assert!(!text.contains("verticalAlignment"));

    let text = row(HorizontalArrangement::Start, VerticalAlignment::Baseline);
    assert!(text.contains("horizontalArrangement = Arrangement.Start,"));
    assert!(!text.contains("verticalAlignment"));
}

#[test]
fn test_column_constants() {
    let column = |arrangement: VerticalArrangement, alignment: HorizontalAlignment| {
        plain_source(&Node::new(
            "Column",
            NodeKind::Column(ColumnLayout {
                vertical_arrangement: Some(Arrangement::Aligned(arrangement)),
                horizontal_alignment: Some(alignment),
            }),
        ))
    };

    let text = column(VerticalArrangement::Center, HorizontalAlignment::Center);
    assert!(text.contains("verticalArrangement = Arrangement.Center,"));
    assert!(text.contains("horizontalAlignment = Alignment.CenterHorizontally,"));

    let text = column(VerticalArrangement::Bottom, HorizontalAlignment::End);
    assert!(text.contains("verticalArrangement = Arrangement.Bottom,"));
    assert!(text.contains("horizontalAlignment = Alignment.End,"));

    let text = column(VerticalArrangement::Top, HorizontalAlignment::Start);
    assert!(text.contains("verticalArrangement = Arrangement.Top,"));
    assert!(!text.contains("horizontalAlignment"));

    let text = column(VerticalArrangement::SpaceBetween, HorizontalAlignment::Start);
    assert!(text.contains("verticalArrangement = Arrangement.SpaceBetween,"));
}

#[test]
fn test_text_params() {
    let content = TextContent {
        text_color: Some(Bindable::Literal(Color::rgb(1.0, 0.0, 0.0))),
        text_align: Some(TextAlign::Center),
        overflow: Some(TextOverflow::Ellipsis),
        max_lines: Some(2),
        ..TextContent::new("Hi", body_font())
    };
    let root = Node::new("Label", NodeKind::Text(content));

    assert_eq!(
        plain_source(&root),
        r#"// Label
Text(
    style = TextStyle(fontWeight = FontWeight(400), fontSize = 14.sp),
    text = "Hi",
    color = Color(0xFFFF0000),
    textAlign = TextAlign.Center,
    overflow = TextOverflow.Ellipsis,
    maxLines = 2,
)
"#
    );
}

#[test]
fn test_text_omits_absent_params() {
    for (align, constant) in [
        (TextAlign::Start, "TextAlign.Start"),
        (TextAlign::End, "TextAlign.End"),
        (TextAlign::Justify, "TextAlign.Justify"),
    ] {
        let content = TextContent {
            text_align: Some(align),
            ..TextContent::new("Hi", body_font())
        };
        let text = plain_source(&Node::new("Label", NodeKind::Text(content)));
        assert!(text.contains(&format!("textAlign = {constant},")));
    }

    let label = Node::new("Label", NodeKind::Text(TextContent::new("Hi", body_font())));
    assert_eq!(
        plain_source(&label),
        "// Label\nText(\n    style = TextStyle(fontWeight = FontWeight(400), fontSize = 14.sp),\n    text = \"Hi\",\n)\n"
    );
}
