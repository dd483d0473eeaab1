//! Structural validation of a parsed BPMN document.
//!
//! [`Sections::locate`] finds the single process and the single diagram
//! plane. It runs before any node is built, so a document missing either is
//! rejected without a partial graph.

use log::debug;
use roxmltree::{Document, Node};

use crate::{
    error::{Section, StructureError},
    xml::{self, BPMN_DI, BPMN_MODEL},
};

/// The two containers the rest of the pipeline reads from.
#[derive(Debug, Clone, Copy)]
pub struct Sections<'a, 'input> {
    process: Node<'a, 'input>,
    plane: Node<'a, 'input>,
}

impl<'a, 'input> Sections<'a, 'input> {
    /// Locates the process and diagram plane of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Missing`] when the root has no `bpmn:process`
    /// or no `bpmndi:BPMNDiagram` child, or the diagram has no
    /// `bpmndi:BPMNPlane` child, and [`StructureError::Multiple`] when any of
    /// them appears more than once.
    pub fn locate(document: &'a Document<'input>) -> Result<Self, StructureError> {
        let root = document.root_element();

        let process = single_child(root, BPMN_MODEL, "process", Section::Process)?;
        let diagram = single_child(root, BPMN_DI, "BPMNDiagram", Section::Diagram)?;
        let plane = single_child(diagram, BPMN_DI, "BPMNPlane", Section::Plane)?;

        debug!(
            process_id = process.attribute("id").unwrap_or_default(),
            plane_id = plane.attribute("id").unwrap_or_default();
            "Located process and diagram plane"
        );

        Ok(Self { process, plane })
    }

    /// The `bpmn:process` element
    pub fn process(&self) -> Node<'a, 'input> {
        self.process
    }

    /// The `bpmndi:BPMNPlane` element
    pub fn plane(&self) -> Node<'a, 'input> {
        self.plane
    }
}

fn single_child<'a, 'input>(
    parent: Node<'a, 'input>,
    namespace: &'static str,
    local_name: &'static str,
    section: Section,
) -> Result<Node<'a, 'input>, StructureError> {
    let mut matches = xml::children_named(parent, namespace, local_name);
    let first = matches.next().ok_or(StructureError::Missing(section))?;

    let extra: Vec<_> = matches.collect();
    if let Some(second) = extra.first() {
        return Err(StructureError::Multiple {
            section,
            count: extra.len() + 1,
            span: xml::span_of(second),
        });
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(source: &str) -> Result<(String, String), StructureError> {
        let document = Document::parse(source).expect("test input is well-formed");
        let sections = Sections::locate(&document)?;
        Ok((
            sections.process().attribute("id").unwrap_or_default().to_string(),
            sections.plane().attribute("id").unwrap_or_default().to_string(),
        ))
    }

    const HEADER: &str = r#"<definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI">"#;

    #[test]
    fn test_locate_sections() {
        let source = format!(
            r#"{HEADER}<process id="P"/><bpmndi:BPMNDiagram><bpmndi:BPMNPlane id="PL"/></bpmndi:BPMNDiagram></definitions>"#
        );

        assert_eq!(locate(&source), Ok(("P".to_string(), "PL".to_string())));
    }

    #[test]
    fn test_missing_process() {
        let source = format!(
            r#"{HEADER}<bpmndi:BPMNDiagram><bpmndi:BPMNPlane/></bpmndi:BPMNDiagram></definitions>"#
        );

        assert_eq!(locate(&source), Err(StructureError::Missing(Section::Process)));
    }

    #[test]
    fn test_process_in_wrong_namespace_is_missing() {
        let source = r#"<definitions xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI"><process id="P"/><bpmndi:BPMNDiagram><bpmndi:BPMNPlane/></bpmndi:BPMNDiagram></definitions>"#;

        assert_eq!(locate(source), Err(StructureError::Missing(Section::Process)));
    }

    #[test]
    fn test_missing_diagram() {
        let source = format!(r#"{HEADER}<process id="P"/></definitions>"#);

        assert_eq!(locate(&source), Err(StructureError::Missing(Section::Diagram)));
    }

    #[test]
    fn test_missing_plane() {
        let source =
            format!(r#"{HEADER}<process id="P"/><bpmndi:BPMNDiagram/></definitions>"#);

        assert_eq!(locate(&source), Err(StructureError::Missing(Section::Plane)));
    }

    #[test]
    fn test_multiple_processes() {
        let source = format!(
            r#"{HEADER}<process id="P1"/><process id="P2"/><bpmndi:BPMNDiagram><bpmndi:BPMNPlane/></bpmndi:BPMNDiagram></definitions>"#
        );

        match locate(&source) {
            Err(StructureError::Multiple { section, count, .. }) => {
                assert_eq!(section, Section::Process);
                assert_eq!(count, 2);
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }
}
