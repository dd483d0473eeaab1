//! Process model types.
//!
//! A [`ProcessGraph`] is the typed view of one BPMN process: the nodes Flowdeck
//! knows how to draw plus every sequence flow between elements, in document
//! order.
//!
//! The graph moves through the pipeline by value. The topology builder
//! creates it with no geometry, the geometry resolver returns a copy whose
//! nodes carry [`Bounds`], and the gateway adjuster returns a copy with some
//! of those bounds moved. No stage shares a graph with another.
//!
//! # Example
//!
//! ```
//! use flowdeck_core::process::{NodeKind, ProcessGraph, ProcessNode, SequenceFlow};
//!
//! let mut graph = ProcessGraph::new();
//! graph.insert_node(ProcessNode::new("S", "Start", NodeKind::StartEvent));
//! graph.insert_node(ProcessNode::new("T", "Work", NodeKind::Task));
//! graph.push_flow(SequenceFlow::new("S", "T"));
//!
//! assert_eq!(graph.nodes_count(), 2);
//! assert!(graph.node("T").unwrap().bounds().is_none());
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::geometry::Bounds;

/// The recognized BPMN flow-node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    StartEvent,
    Task,
    ExclusiveGateway,
    EndEvent,
}

impl NodeKind {
    /// All kinds, in the order they are usually listed in BPMN documents.
    pub const ALL: [NodeKind; 4] = [
        NodeKind::StartEvent,
        NodeKind::Task,
        NodeKind::ExclusiveGateway,
        NodeKind::EndEvent,
    ];

    /// Maps a BPMN local element name to a kind.
    ///
    /// The comparison is exact; namespace checks are the caller's job.
    pub fn from_local_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.local_name() == name)
    }

    /// The BPMN local element name for this kind.
    pub fn local_name(self) -> &'static str {
        match self {
            NodeKind::StartEvent => "startEvent",
            NodeKind::Task => "task",
            NodeKind::ExclusiveGateway => "exclusiveGateway",
            NodeKind::EndEvent => "endEvent",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// A recognized process node.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessNode {
    id: String,
    name: String,
    kind: NodeKind,
    bounds: Option<Bounds>,
    outgoing: Vec<String>,
}

impl ProcessNode {
    /// Creates a node without geometry or outgoing targets.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            bounds: None,
            outgoing: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label; empty when the element had no `name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Position and size in inches, `None` until geometry is resolved.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Targets of this node's sequence flows, in document order.
    ///
    /// Only filled for [`NodeKind::ExclusiveGateway`] nodes.
    pub fn outgoing(&self) -> &[String] {
        &self.outgoing
    }

    /// Sets the bounds of this node (builder style).
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    pub fn set_outgoing(&mut self, outgoing: Vec<String>) {
        self.outgoing = outgoing;
    }
}

/// A directed edge between two process elements.
///
/// Either end may name an element that is not a [`ProcessNode`], for example
/// an unsupported BPMN element kind. Such flows stay in the graph and are
/// dropped when connectors are drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFlow {
    source: String,
    target: String,
}

impl SequenceFlow {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Nodes keyed by id plus the ordered list of sequence flows.
///
/// Node iteration follows insertion order, which is document order when the
/// graph comes from the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessGraph {
    nodes: IndexMap<String, ProcessNode>,
    flows: Vec<SequenceFlow>,
}

impl ProcessGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, replacing and returning any node with the same id.
    pub fn insert_node(&mut self, node: ProcessNode) -> Option<ProcessNode> {
        self.nodes.insert(node.id.clone(), node)
    }

    pub fn push_flow(&mut self, flow: SequenceFlow) {
        self.flows.push(flow);
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&ProcessNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut ProcessNode> {
        self.nodes.get_mut(id)
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ProcessNode> {
        self.nodes.values()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// All sequence flows in document order.
    pub fn flows(&self) -> &[SequenceFlow] {
        &self.flows
    }

    /// Targets of every flow leaving `source`, in document order.
    pub fn targets_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.flows
            .iter()
            .filter(move |flow| flow.source == source)
            .map(|flow| flow.target.as_str())
    }

    /// Ids of nodes that still have no geometry.
    pub fn unresolved_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .values()
            .filter(|node| node.bounds.is_none())
            .map(|node| node.id.as_str())
    }
}
