//! Error types for BPMN ingest.
//!
//! Every failure in the parsing lifecycle is terminal and is reported before
//! any part of the graph is handed back:
//!
//! - [`ParseError::Xml`] - the text is not well-formed XML after quote repair
//! - [`ParseError::Structure`] - the XML is well-formed but a required
//!   section is missing or repeated, a node id is duplicated, or a required
//!   attribute is absent or malformed (see [`StructureError`])
//!
//! Errors carry an [`ErrorCode`], optional help text and [`Label`]s pointing
//! into the repaired source so front ends can render rich diagnostics.
//!
//! # Example
//!
//! ```
//! # use flowdeck_parser::error::{ErrorCode, ParseError, Section, StructureError};
//! let err = ParseError::from(StructureError::Missing(Section::Process));
//!
//! assert_eq!(err.code(), ErrorCode::E200);
//! assert_eq!(err.to_string(), "missing required `process` element");
//! ```

mod error_code;
mod label;

use std::fmt;

use thiserror::Error;

use crate::Span;

pub use error_code::ErrorCode;
pub use label::Label;

/// A top-level section every convertible document must contain exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `bpmn:process` under the document root
    Process,
    /// `bpmndi:BPMNDiagram` under the document root
    Diagram,
    /// `bpmndi:BPMNPlane` under the diagram
    Plane,
}

impl Section {
    /// Short name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Process => "process",
            Section::Diagram => "diagram",
            Section::Plane => "plane",
        }
    }

    /// The qualified element name, as conventionally prefixed.
    pub fn element_name(self) -> &'static str {
        match self {
            Section::Process => "bpmn:process",
            Section::Diagram => "bpmndi:BPMNDiagram",
            Section::Plane => "bpmndi:BPMNPlane",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document is well-formed XML but not a convertible BPMN document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructureError {
    #[error("missing required `{0}` element")]
    Missing(Section),

    #[error("expected exactly one `{section}` element, found {count}")]
    Multiple {
        section: Section,
        count: usize,
        span: Span,
    },

    #[error("node id `{id}` is defined more than once")]
    DuplicateId { id: String, span: Span, first: Span },

    #[error("`{element}` is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        span: Span,
    },

    #[error("attribute `{attribute}` has invalid numeric value `{value}`")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
        span: Span,
    },
}

impl StructureError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StructureError::Missing(Section::Process) => ErrorCode::E200,
            StructureError::Missing(Section::Diagram) => ErrorCode::E201,
            StructureError::Missing(Section::Plane) => ErrorCode::E202,
            StructureError::Multiple { .. } => ErrorCode::E203,
            StructureError::DuplicateId { .. } => ErrorCode::E204,
            StructureError::MissingAttribute { .. } => ErrorCode::E205,
            StructureError::InvalidNumber { .. } => ErrorCode::E206,
        }
    }

    /// The section that is missing, if this is a [`StructureError::Missing`].
    pub fn missing_section(&self) -> Option<Section> {
        match self {
            StructureError::Missing(section) => Some(*section),
            _ => None,
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            StructureError::Missing(section) => Some(format!(
                "add a `{}` element; BPMN model and DI namespaces must be declared",
                section.element_name()
            )),
            StructureError::Multiple { .. } => {
                Some("collaborations with several processes are not supported".to_string())
            }
            StructureError::DuplicateId { .. } => {
                Some("give every flow node a unique `id`".to_string())
            }
            StructureError::MissingAttribute { .. } => None,
            StructureError::InvalidNumber { .. } => Some(
                "bounds must be plain decimal numbers, with a width and height of at least 0"
                    .to_string(),
            ),
        }
    }

    fn labels(&self) -> Vec<Label> {
        match self {
            StructureError::Missing(_) => Vec::new(),
            StructureError::Multiple { span, .. } => {
                vec![Label::primary(*span, "additional element")]
            }
            StructureError::DuplicateId { span, first, .. } => vec![
                Label::primary(*span, "duplicate definition"),
                Label::secondary(*first, "first defined here"),
            ],
            StructureError::MissingAttribute { span, .. } => {
                vec![Label::primary(*span, "in this element")]
            }
            StructureError::InvalidNumber { span, .. } => {
                vec![Label::primary(*span, "in these bounds")]
            }
        }
    }
}

/// Error type for the parsing lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("malformed XML: {message}")]
    Xml { message: String, span: Option<Span> },

    #[error(transparent)]
    Structure(#[from] StructureError),
}

impl ParseError {
    /// Builds a [`ParseError::Xml`] from an XML parser error over `source`.
    pub(crate) fn from_xml(err: roxmltree::Error, source: &str) -> Self {
        let pos = err.pos();
        Self::Xml {
            message: err.to_string(),
            span: Some(Span::from_row_col(source, pos.row, pos.col)),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Xml { .. } => ErrorCode::E100,
            ParseError::Structure(err) => err.code(),
        }
    }

    /// Suggestion for fixing the input, if there is one.
    pub fn help(&self) -> Option<String> {
        match self {
            ParseError::Xml { .. } => None,
            ParseError::Structure(err) => err.help(),
        }
    }

    /// Source locations related to this error, primary label first.
    pub fn labels(&self) -> Vec<Label> {
        match self {
            ParseError::Xml { span, .. } => span
                .map(|span| vec![Label::primary(span, "here")])
                .unwrap_or_default(),
            ParseError::Structure(err) => err.labels(),
        }
    }

    /// Returns the structural error, if this is one.
    pub fn as_structure(&self) -> Option<&StructureError> {
        match self {
            ParseError::Structure(err) => Some(err),
            ParseError::Xml { .. } => None,
        }
    }
}
