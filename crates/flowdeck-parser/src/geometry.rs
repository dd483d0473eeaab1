//! Diagram Interchange geometry.
//!
//! Reads `bpmndi:BPMNShape` / `dc:Bounds` pairs from the diagram plane and
//! attaches them, divided by the configured scale, to the matching nodes.

use log::{debug, warn};
use roxmltree::Node;

use flowdeck_core::{geometry::Bounds, process::ProcessGraph};

use crate::{
    error::StructureError,
    xml::{self, BPMN_DI, DC},
};

/// Returns `graph` with bounds attached from the shapes of `plane`.
///
/// Every bounds value is divided by `scale`. Shapes without `bpmnElement` or
/// without `dc:Bounds`, and shapes referring to ids that are not nodes of
/// `graph`, are skipped. Only the first shape for a node is used. Nodes
/// without a shape keep no bounds.
///
/// # Errors
///
/// Returns [`StructureError::MissingAttribute`] or
/// [`StructureError::InvalidNumber`] when the bounds of a shape for a known
/// node lack a coordinate, hold a non-numeric one, or have a negative width
/// or height.
pub fn resolve(
    mut graph: ProcessGraph,
    plane: Node<'_, '_>,
    scale: f64,
) -> Result<ProcessGraph, StructureError> {
    let mut resolved = 0;

    for shape in xml::children_named(plane, BPMN_DI, "BPMNShape") {
        let Some(element_id) = shape.attribute("bpmnElement") else {
            debug!("Skipping diagram shape without bpmnElement");
            continue;
        };

        let Some(node) = graph.node_mut(element_id) else {
            debug!(element_id; "Discarding diagram shape for unknown node");
            continue;
        };

        if node.bounds().is_some() {
            warn!(element_id; "Ignoring repeated diagram shape for node");
            continue;
        }

        let Some(bounds_node) = xml::children_named(shape, DC, "Bounds").next() else {
            debug!(element_id; "Skipping diagram shape without bounds");
            continue;
        };

        node.set_bounds(read_bounds(bounds_node)?.scale_down(scale));
        resolved += 1;
    }

    debug!(resolved, nodes_count = graph.nodes_count(); "Diagram geometry resolved");

    Ok(graph)
}

fn read_bounds(node: Node<'_, '_>) -> Result<Bounds, StructureError> {
    Ok(Bounds::from_xywh(
        number(node, "x")?,
        number(node, "y")?,
        extent(node, "width")?,
        extent(node, "height")?,
    ))
}

fn extent(node: Node<'_, '_>, attribute: &'static str) -> Result<f64, StructureError> {
    let value = number(node, attribute)?;
    if value < 0.0 {
        return Err(StructureError::InvalidNumber {
            attribute,
            value: xml::required_attribute(node, attribute)?.to_string(),
            span: xml::span_of(&node),
        });
    }
    Ok(value)
}

fn number(node: Node<'_, '_>, attribute: &'static str) -> Result<f64, StructureError> {
    let raw = xml::required_attribute(node, attribute)?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| StructureError::InvalidNumber {
            attribute,
            value: raw.to_string(),
            span: xml::span_of(&node),
        })
}
