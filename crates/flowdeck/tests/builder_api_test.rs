//! Integration tests for the DeckBuilder API
//!
//! Rendered decks are opened with `zip` and the target slide is inspected
//! with `roxmltree`.

use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use zip::ZipArchive;

use flowdeck::{
    DeckBuilder, FlowdeckError, PPTX_MIME_TYPE, RenderError, RenderWarning,
    config::{AppConfig, GeometryConfig, LayoutConfig, StyleConfig, TemplateConfig},
    geometry::Emu,
};

const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

const ROUND_TRIP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL"
                  xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI"
                  xmlns:dc="http://www.omg.org/spec/DD/20100524/DC"
                  id="Definitions_1">
  <bpmn:process id="Process_1">
    <bpmn:startEvent id="S" name="Order received"/>
    <bpmn:exclusiveGateway id="G" name="In stock?"/>
    <bpmn:task id="A" name="Ship order"/>
    <bpmn:endEvent id="B" name="Done"/>
    <bpmn:sequenceFlow id="F1" sourceRef="S" targetRef="G"/>
    <bpmn:sequenceFlow id="F2" sourceRef="G" targetRef="A"/>
    <bpmn:sequenceFlow id="F3" sourceRef="G" targetRef="B"/>
    <bpmn:sequenceFlow id="F4" sourceRef="A" targetRef="B"/>
    <bpmn:sequenceFlow id="F5" sourceRef="A" targetRef="G"/>
  </bpmn:process>
  <bpmndi:BPMNDiagram id="Diagram_1">
    <bpmndi:BPMNPlane id="Plane_1" bpmnElement="Process_1">
      <bpmndi:BPMNShape id="S_di" bpmnElement="S">
        <dc:Bounds x="100" y="200" width="36" height="36"/>
      </bpmndi:BPMNShape>
      <bpmndi:BPMNShape id="G_di" bpmnElement="G">
        <dc:Bounds x="200" y="193" width="50" height="50"/>
      </bpmndi:BPMNShape>
      <bpmndi:BPMNShape id="A_di" bpmnElement="A">
        <dc:Bounds x="300" y="80" width="100" height="80"/>
      </bpmndi:BPMNShape>
      <bpmndi:BPMNShape id="B_di" bpmnElement="B">
        <dc:Bounds x="320" y="350" width="36" height="36"/>
      </bpmndi:BPMNShape>
    </bpmndi:BPMNPlane>
  </bpmndi:BPMNDiagram>
</bpmn:definitions>
"#;

const SIX_NODES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL"
             xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI"
             xmlns:dc="http://www.omg.org/spec/DD/20100524/DC">
  <process id="P">
    <startEvent id="S"/>
    <task id="T" name="Review"/>
    <exclusiveGateway id="G"/>
    <task id="A" name="Approve"/>
    <endEvent id="EndA"/>
    <endEvent id="B"/>
    <sequenceFlow id="f1" sourceRef="S" targetRef="T"/>
    <sequenceFlow id="f2" sourceRef="T" targetRef="G"/>
    <sequenceFlow id="f3" sourceRef="G" targetRef="A"/>
    <sequenceFlow id="f4" sourceRef="A" targetRef="EndA"/>
    <sequenceFlow id="f5" sourceRef="G" targetRef="B"/>
  </process>
  <bpmndi:BPMNDiagram>
    <bpmndi:BPMNPlane bpmnElement="P">
      <bpmndi:BPMNShape bpmnElement="S"><dc:Bounds x="100" y="200" width="36" height="36"/></bpmndi:BPMNShape>
      <bpmndi:BPMNShape bpmnElement="T"><dc:Bounds x="200" y="200" width="100" height="80"/></bpmndi:BPMNShape>
      <bpmndi:BPMNShape bpmnElement="G"><dc:Bounds x="350" y="215" width="50" height="50"/></bpmndi:BPMNShape>
      <bpmndi:BPMNShape bpmnElement="A"><dc:Bounds x="450" y="50" width="100" height="80"/></bpmndi:BPMNShape>
      <bpmndi:BPMNShape bpmnElement="EndA"><dc:Bounds x="600" y="70" width="36" height="36"/></bpmndi:BPMNShape>
      <bpmndi:BPMNShape bpmnElement="B"><dc:Bounds x="450" y="350" width="36" height="36"/></bpmndi:BPMNShape>
    </bpmndi:BPMNPlane>
  </bpmndi:BPMNDiagram>
</definitions>
"#;

fn slide_xml(bytes: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Output should be a zip package");
    let mut file = archive
        .by_name("ppt/slides/slide1.xml")
        .expect("Output should contain the slide");
    let mut xml = String::new();
    file.read_to_string(&mut xml).expect("Slide should be UTF-8");
    xml
}

fn elements<'a, 'input>(doc: &'a Document<'input>, local: &'a str) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|node| node.has_tag_name((P_NS, local)))
        .collect()
}

/// The `p:sp` whose `cNvPr/@name` is `name`.
fn shape_named<'a, 'input>(doc: &'a Document<'input>, name: &str) -> Node<'a, 'input> {
    elements(doc, "sp")
        .into_iter()
        .find(|sp| {
            sp.descendants()
                .any(|n| n.has_tag_name((P_NS, "cNvPr")) && n.attribute("name") == Some(name))
        })
        .unwrap_or_else(|| panic!("No shape named {name}"))
}

fn offset_y(node: Node<'_, '_>) -> i64 {
    node.descendants()
        .find(|n| n.has_tag_name((A_NS, "off")))
        .and_then(|off| off.attribute("y"))
        .and_then(|y| y.parse().ok())
        .expect("Shape should have an offset")
}

fn preset<'a>(node: Node<'a, '_>) -> &'a str {
    node.descendants()
        .find(|n| n.has_tag_name((A_NS, "prstGeom")))
        .and_then(|geom| geom.attribute("prst"))
        .expect("Shape should have a preset geometry")
}

#[test]
fn test_builder_api_exists() {
    let _builder = DeckBuilder::default();
    assert_eq!(
        PPTX_MIME_TYPE,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
}

#[test]
fn test_round_trip_shapes_and_connectors() {
    let builder = DeckBuilder::default();
    let deck = builder.convert(ROUND_TRIP).expect("Failed to convert");

    assert_eq!(deck.shapes_count(), 4);
    assert_eq!(deck.connectors_count(), 5);
    assert!(deck.warnings().is_empty(), "{:?}", deck.warnings());

    let xml = slide_xml(deck.bytes());
    let doc = Document::parse(&xml).expect("Slide should be well-formed");
    assert_eq!(elements(&doc, "sp").len(), 4);
    assert_eq!(elements(&doc, "cxnSp").len(), 5);

    // First branch: gateway y + height / 2 + 0.5, then the 1.5 page offset.
    let expected_a = Emu::from_inches(193.0 / 100.0 + (50.0 / 100.0) / 2.0 + 0.5 + 1.5);
    assert_eq!(offset_y(shape_named(&doc, "Rectangle A")), expected_a.get());

    // Second branch keeps its DI position.
    let expected_b = Emu::from_inches(350.0 / 100.0 + 1.5);
    assert_eq!(offset_y(shape_named(&doc, "Oval B")), expected_b.get());

    assert_eq!(preset(shape_named(&doc, "Diamond G")), "diamond");
    assert_eq!(preset(shape_named(&doc, "Oval S")), "ellipse");
}

#[test]
fn test_round_trip_graph_is_not_mutated_by_render() {
    let builder = DeckBuilder::default();
    let graph = builder.parse(ROUND_TRIP).expect("Failed to parse");

    builder.render_pptx(&graph).expect("Failed to render");

    let a = graph.node("A").and_then(|node| node.bounds()).unwrap();
    assert_eq!(a.y(), 80.0 / 100.0);
}

#[test]
fn test_connectors_glue_to_shape_ids() {
    let deck = DeckBuilder::default()
        .convert(ROUND_TRIP)
        .expect("Failed to convert");
    let xml = slide_xml(deck.bytes());
    let doc = Document::parse(&xml).unwrap();

    let shape_ids: Vec<&str> = elements(&doc, "sp")
        .into_iter()
        .filter_map(|sp| {
            sp.descendants()
                .find(|n| n.has_tag_name((P_NS, "cNvPr")))
                .and_then(|n| n.attribute("id"))
        })
        .collect();

    for connector in elements(&doc, "cxnSp") {
        for end in ["stCxn", "endCxn"] {
            let glue = connector
                .descendants()
                .find(|n| n.has_tag_name((A_NS, end)))
                .expect("Connector should be glued");
            assert!(shape_ids.contains(&glue.attribute("id").unwrap()));
        }
        assert!(connector
            .descendants()
            .any(|n| n.has_tag_name((A_NS, "tailEnd"))));
    }
}

#[test]
fn test_six_node_variant() {
    let deck = DeckBuilder::default()
        .convert(SIX_NODES)
        .expect("Failed to convert");

    assert_eq!(deck.shapes_count(), 6);
    assert_eq!(deck.connectors_count(), 5);
    assert!(deck.warnings().is_empty());

    let xml = slide_xml(deck.bytes());
    let doc = Document::parse(&xml).unwrap();

    let expected_a = Emu::from_inches(215.0 / 100.0 + (50.0 / 100.0) / 2.0 + 0.5 + 1.5);
    assert_eq!(offset_y(shape_named(&doc, "Rectangle A")), expected_a.get());
    assert_eq!(
        offset_y(shape_named(&doc, "Oval EndA")),
        Emu::from_inches(70.0 / 100.0 + 1.5).get()
    );

    // S and T share a top, so the first connector is straight.
    let presets: Vec<&str> = elements(&doc, "cxnSp").into_iter().map(preset).collect();
    assert_eq!(presets[0], "straightConnector1");
    assert_eq!(presets[1], "bentConnector3");
}

#[test]
fn test_dangling_connector_is_skipped() {
    let source = ROUND_TRIP.replace(
        r#"<bpmn:sequenceFlow id="F4" sourceRef="A" targetRef="B"/>"#,
        r#"<bpmn:userTask id="U"/><bpmn:sequenceFlow id="F4" sourceRef="A" targetRef="U"/>"#,
    );

    let deck = DeckBuilder::default()
        .convert(&source)
        .expect("Dangling flows should not abort rendering");

    assert_eq!(deck.connectors_count(), 4);
    assert_eq!(
        deck.warnings(),
        [RenderWarning::DanglingConnector {
            source: "A".to_string(),
            target: "U".to_string(),
        }]
    );
}

#[test]
fn test_node_without_shape_is_reported() {
    let source = ROUND_TRIP.replace(
        r#"<bpmndi:BPMNShape id="B_di" bpmnElement="B">
        <dc:Bounds x="320" y="350" width="36" height="36"/>
      </bpmndi:BPMNShape>"#,
        "",
    );

    let deck = DeckBuilder::default().convert(&source).unwrap();

    assert_eq!(deck.shapes_count(), 3);
    // G -> B and A -> B lose their target.
    assert_eq!(deck.connectors_count(), 3);
    assert_eq!(
        deck.warnings()[0],
        RenderWarning::UnresolvedNode {
            id: "B".to_string()
        }
    );
    assert_eq!(deck.warnings().len(), 3);
}

#[test]
fn test_missing_process_returns_parse_error() {
    let source = r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL"/>"#;

    let result = DeckBuilder::default().convert(source);

    match result {
        Err(FlowdeckError::Parse { err, .. }) => {
            assert_eq!(err.code().to_string(), "E200");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_doubled_quote_ids_are_repaired() {
    let source = ROUND_TRIP.replace(r#"id="S" name"#, r#"id=""S"" name"#);

    let graph = DeckBuilder::default().parse(&source).expect("Failed to parse");

    assert!(graph.node("S").is_some());
}

#[test]
fn test_parse_error_carries_repaired_source() {
    let source = r#"<definitions id=""D"" xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL">"#;

    match DeckBuilder::default().parse(source) {
        Err(FlowdeckError::Parse { src, .. }) => assert!(src.contains(r#"id="D""#)),
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_custom_template_keeps_existing_shapes() {
    let first = DeckBuilder::default().convert(ROUND_TRIP).unwrap();
    let template = tempfile::Builder::new()
        .suffix(".pptx")
        .tempfile()
        .expect("Failed to create temp file");
    std::fs::write(template.path(), first.bytes()).unwrap();

    let config = AppConfig::default()
        .with_template(TemplateConfig::default().with_path(template.path()));
    let deck = DeckBuilder::new(config).convert(SIX_NODES).unwrap();

    let xml = slide_xml(deck.bytes());
    let doc = Document::parse(&xml).unwrap();
    assert_eq!(elements(&doc, "sp").len(), 4 + 6);
    assert_eq!(elements(&doc, "cxnSp").len(), 5 + 5);

    let mut ids: Vec<u32> = doc
        .descendants()
        .filter(|n| n.has_tag_name((P_NS, "cNvPr")))
        .map(|n| n.attribute("id").unwrap().parse().unwrap())
        .collect();
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count, "Shape ids should be unique on the slide");
}

#[test]
fn test_slide_out_of_range() {
    let config =
        AppConfig::default().with_template(TemplateConfig::default().with_slide_index(3));

    match DeckBuilder::new(config).convert(ROUND_TRIP) {
        Err(FlowdeckError::Render(RenderError::SlideOutOfRange { index, count })) => {
            assert_eq!(index, 3);
            assert_eq!(count, 1);
        }
        other => panic!("Expected slide out of range, got {other:?}"),
    }
}

#[test]
fn test_missing_template_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pptx");
    let config = AppConfig::default().with_template(TemplateConfig::default().with_path(&path));

    match DeckBuilder::new(config).convert(ROUND_TRIP) {
        Err(FlowdeckError::Render(RenderError::Template { path: reported, .. })) => {
            assert_eq!(reported, path);
        }
        other => panic!("Expected template error, got {other:?}"),
    }
}

#[test]
fn test_custom_sections_flow_into_output() {
    let config = AppConfig::new(
        GeometryConfig::new(100.0),
        LayoutConfig::new(1.0),
        TemplateConfig::default().with_page_offset(0.0),
        StyleConfig::default(),
    );
    let deck = DeckBuilder::new(config).convert(ROUND_TRIP).unwrap();

    let xml = slide_xml(deck.bytes());
    let doc = Document::parse(&xml).unwrap();
    let expected_a = Emu::from_inches(193.0 / 100.0 + (50.0 / 100.0) / 2.0 + 1.0 + 0.0);
    assert_eq!(offset_y(shape_named(&doc, "Rectangle A")), expected_a.get());
}

#[test]
fn test_builder_reusability() {
    let builder = DeckBuilder::default();

    let first = builder.convert(ROUND_TRIP).expect("Failed first conversion");
    let second = builder.convert(SIX_NODES).expect("Failed second conversion");

    assert_eq!(first.shapes_count(), 4);
    assert_eq!(second.shapes_count(), 6);
}
