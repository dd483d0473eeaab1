//! Namespace constants and small helpers over roxmltree nodes.

use roxmltree::Node;

use crate::{Span, error::StructureError};

/// BPMN 2.0 process model namespace.
pub const BPMN_MODEL: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";

/// BPMN 2.0 Diagram Interchange namespace.
pub const BPMN_DI: &str = "http://www.omg.org/spec/BPMN/20100524/DI";

/// OMG Diagram Commons namespace, home of `dc:Bounds`.
pub const DC: &str = "http://www.omg.org/spec/DD/20100524/DC";

/// Returns `true` if `node` is an element with the given namespace and local name.
pub(crate) fn is_element(node: &Node<'_, '_>, namespace: &str, local_name: &str) -> bool {
    node.is_element() && node.has_tag_name((namespace, local_name))
}

/// Element children of `parent` with the given qualified name.
pub(crate) fn children_named<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    namespace: &'static str,
    local_name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |child| is_element(child, namespace, local_name))
}

pub(crate) fn span_of(node: &Node<'_, '_>) -> Span {
    Span::new(node.range())
}

/// Reads an attribute that must be present.
pub(crate) fn required_attribute<'a>(
    node: Node<'a, '_>,
    attribute: &'static str,
) -> Result<&'a str, StructureError> {
    node.attribute(attribute)
        .ok_or_else(|| StructureError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
            span: span_of(&node),
        })
}
