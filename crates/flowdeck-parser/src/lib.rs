//! BPMN 2.0 ingest for Flowdeck.
//!
//! This crate turns BPMN XML text into a [`ProcessGraph`] with resolved
//! geometry. It runs three stages, each usable on its own:
//!
//! 1. **Ingest & validation** - [`repair_attribute_quotes`] fixes the
//!    doubled-quote malformation, the text is parsed as XML and
//!    [`document::Sections::locate`] asserts the process and diagram plane
//!    exist exactly once.
//! 2. **Topology** - [`topology::build`] extracts typed nodes and sequence
//!    flows from the process.
//! 3. **Geometry** - [`geometry::resolve`] attaches Diagram Interchange
//!    bounds, divided by [`ParseConfig::scale`], to known nodes.
//!
//! # Example
//!
//! ```
//! use flowdeck_parser::{ParseConfig, parse};
//!
//! let source = r#"
//! <definitions xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL"
//!              xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI"
//!              xmlns:dc="http://www.omg.org/spec/DD/20100524/DC">
//!   <process id="P">
//!     <task id=""T1"" name="Check"/>
//!   </process>
//!   <bpmndi:BPMNDiagram>
//!     <bpmndi:BPMNPlane bpmnElement="P">
//!       <bpmndi:BPMNShape bpmnElement="T1">
//!         <dc:Bounds x="200" y="100" width="100" height="80"/>
//!       </bpmndi:BPMNShape>
//!     </bpmndi:BPMNPlane>
//!   </bpmndi:BPMNDiagram>
//! </definitions>"#;
//!
//! let graph = parse(source, ParseConfig::default()).unwrap();
//! let bounds = graph.node("T1").unwrap().bounds().unwrap();
//! assert_eq!(bounds.x(), 2.0);
//! ```

pub mod document;
pub mod error;
pub mod geometry;
pub mod topology;
pub mod xml;

mod repair;
mod span;

pub use repair::repair_attribute_quotes;
pub use span::Span;

use log::{debug, info};
use roxmltree::Document;

use flowdeck_core::process::ProcessGraph;

use document::Sections;
use error::ParseError;

/// Default number of Diagram Interchange units per inch.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Settings for the parsing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseConfig {
    scale: f64,
}

impl ParseConfig {
    /// Creates a config dividing Diagram Interchange values by `scale`.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Diagram Interchange units per inch
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

/// Parses BPMN XML into a process graph with resolved geometry.
///
/// Spans in the returned error index the text returned by
/// [`repair_attribute_quotes`] for the same `source`.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the text is not well-formed after quote
/// repair and [`ParseError::Structure`] for structural problems. Nothing is
/// returned on failure; there is no partial graph.
pub fn parse(source: &str, config: ParseConfig) -> Result<ProcessGraph, ParseError> {
    let source = repair_attribute_quotes(source);
    if matches!(source, std::borrow::Cow::Owned(_)) {
        debug!("Repaired doubled attribute quotes");
    }

    let document = Document::parse(&source).map_err(|err| ParseError::from_xml(err, &source))?;
    let sections = Sections::locate(&document)?;

    let topology = topology::build(sections.process())?;
    let graph = geometry::resolve(topology, sections.plane(), config.scale())?;

    info!(
        nodes_count = graph.nodes_count(),
        flows_count = graph.flows().len();
        "BPMN document parsed"
    );

    Ok(graph)
}
