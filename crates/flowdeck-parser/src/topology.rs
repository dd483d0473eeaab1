//! Process topology: typed nodes and sequence flows.
//!
//! Only direct children of the process are read. Element names are compared
//! as (namespace, local name) pairs against the BPMN model namespace, so an
//! extension element such as `<ext:task>` is never mistaken for a task.

use std::collections::HashMap;

use log::{debug, trace};
use roxmltree::Node;

use flowdeck_core::process::{NodeKind, ProcessGraph, ProcessNode, SequenceFlow};

use crate::{
    Span,
    error::StructureError,
    xml::{self, BPMN_MODEL},
};

/// Builds the graph topology from a `bpmn:process` element.
///
/// The returned graph has no geometry. Exclusive gateways have their
/// `outgoing` targets filled in document order.
///
/// # Errors
///
/// Returns [`StructureError::DuplicateId`] if two recognized nodes share an
/// id, and [`StructureError::MissingAttribute`] if a recognized node lacks
/// `id` or a sequence flow lacks `sourceRef`/`targetRef`.
pub fn build(process: Node<'_, '_>) -> Result<ProcessGraph, StructureError> {
    let mut graph = ProcessGraph::new();
    let mut first_seen: HashMap<String, Span> = HashMap::new();

    for child in process.children().filter(Node::is_element) {
        let Some(kind) = node_kind(&child) else {
            if !xml::is_element(&child, BPMN_MODEL, "sequenceFlow") {
                debug!(element = child.tag_name().name(); "Ignoring unsupported process element");
            }
            continue;
        };

        let id = xml::required_attribute(child, "id")?;
        let span = xml::span_of(&child);
        if let Some(first) = first_seen.get(id) {
            return Err(StructureError::DuplicateId {
                id: id.to_string(),
                span,
                first: *first,
            });
        }
        first_seen.insert(id.to_string(), span);

        let name = child.attribute("name").unwrap_or_default();
        graph.insert_node(ProcessNode::new(id, name, kind));
    }

    for flow in xml::children_named(process, BPMN_MODEL, "sequenceFlow") {
        let source = xml::required_attribute(flow, "sourceRef")?;
        let target = xml::required_attribute(flow, "targetRef")?;
        graph.push_flow(SequenceFlow::new(source, target));
    }

    let gateway_ids: Vec<String> = graph
        .nodes()
        .filter(|node| node.kind() == NodeKind::ExclusiveGateway)
        .map(|node| node.id().to_string())
        .collect();
    for gateway_id in gateway_ids {
        let outgoing: Vec<String> = graph.targets_of(&gateway_id).map(str::to_string).collect();
        if let Some(gateway) = graph.node_mut(&gateway_id) {
            gateway.set_outgoing(outgoing);
        }
    }

    debug!(
        nodes_count = graph.nodes_count(),
        flows_count = graph.flows().len();
        "Process topology built"
    );
    trace!(graph:?; "Topology");

    Ok(graph)
}

fn node_kind(node: &Node<'_, '_>) -> Option<NodeKind> {
    let tag = node.tag_name();
    if tag.namespace() != Some(BPMN_MODEL) {
        return None;
    }
    NodeKind::from_local_name(tag.name())
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn build_from(body: &str) -> Result<ProcessGraph, StructureError> {
        let source = format!(
            r#"<process xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:ext="urn:example:ext">{body}</process>"#
        );
        let document = Document::parse(&source).expect("test input is well-formed");
        build(document.root_element())
    }

    #[test]
    fn test_builds_recognized_nodes() {
        let graph = build_from(
            r#"<startEvent id="S" name="Start"/>
               <task id="T" name="Unload"/>
               <exclusiveGateway id="G"/>
               <endEvent id="E" name="Done"/>"#,
        )
        .unwrap();

        let kinds: Vec<_> = graph.nodes().map(|node| (node.id(), node.kind())).collect();
        assert_eq!(
            kinds,
            [
                ("S", NodeKind::StartEvent),
                ("T", NodeKind::Task),
                ("G", NodeKind::ExclusiveGateway),
                ("E", NodeKind::EndEvent),
            ]
        );
        assert_eq!(graph.node("G").unwrap().name(), "");
        assert_eq!(graph.node("T").unwrap().name(), "Unload");
    }

    #[test]
    fn test_ignores_unsupported_and_foreign_elements() {
        let graph = build_from(
            r#"<userTask id="U"/>
               <ext:task id="X"/>
               <documentation>notes</documentation>
               <task id="T"/>"#,
        )
        .unwrap();

        assert_eq!(graph.nodes_count(), 1);
        assert!(graph.contains_node("T"));
        assert!(!graph.contains_node("X"));
    }

    #[test]
    fn test_keeps_dangling_flows() {
        let graph = build_from(
            r#"<task id="T"/>
               <userTask id="U"/>
               <sequenceFlow id="F1" sourceRef="T" targetRef="U"/>"#,
        )
        .unwrap();

        assert_eq!(graph.flows().len(), 1);
        assert_eq!(graph.flows()[0].target(), "U");
        assert!(!graph.contains_node("U"));
    }

    #[test]
    fn test_gateway_outgoing_in_document_order() {
        let graph = build_from(
            r#"<exclusiveGateway id="G"/>
               <task id="B"/>
               <task id="A"/>
               <task id="C"/>
               <sequenceFlow sourceRef="G" targetRef="B"/>
               <sequenceFlow sourceRef="A" targetRef="C"/>
               <sequenceFlow sourceRef="G" targetRef="A"/>"#,
        )
        .unwrap();

        assert_eq!(graph.node("G").unwrap().outgoing(), ["B", "A"]);
        assert!(graph.node("A").unwrap().outgoing().is_empty());
    }

    #[test]
    fn test_duplicate_id() {
        let err = build_from(r#"<task id="T"/><endEvent id="T"/>"#).unwrap_err();

        match err {
            StructureError::DuplicateId { id, span, first } => {
                assert_eq!(id, "T");
                assert!(first.start() < span.start());
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_id() {
        let err = build_from(r#"<task name="anonymous"/>"#).unwrap_err();

        assert!(matches!(
            err,
            StructureError::MissingAttribute { attribute: "id", .. }
        ));
    }

    #[test]
    fn test_flow_missing_target() {
        let err = build_from(r#"<task id="T"/><sequenceFlow sourceRef="T"/>"#).unwrap_err();

        match err {
            StructureError::MissingAttribute {
                element, attribute, ..
            } => {
                assert_eq!(element, "sequenceFlow");
                assert_eq!(attribute, "targetRef");
            }
            other => panic!("expected MissingAttribute, got {other:?}"),
        }
    }
}
