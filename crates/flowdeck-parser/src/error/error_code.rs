//! Error codes for the Flowdeck parser.
//!
//! Error codes are organized by phase:
//! - `E1xx` - XML syntax errors
//! - `E2xx` - Structural validation errors

use std::fmt;

/// Error codes for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The input is not well-formed XML, even after doubled attribute quotes
    /// were repaired.
    E100,

    // =========================================================================
    // Structure Errors (E2xx)
    // =========================================================================
    /// Missing process.
    ///
    /// The document root has no `bpmn:process` child.
    E200,

    /// Missing diagram.
    ///
    /// The document root has no `bpmndi:BPMNDiagram` child.
    E201,

    /// Missing plane.
    ///
    /// The diagram has no `bpmndi:BPMNPlane` child.
    E202,

    /// Repeated section.
    ///
    /// A process, diagram or plane element appears more than once.
    E203,

    /// Duplicate node id.
    ///
    /// Two recognized flow nodes share the same `id`.
    E204,

    /// Missing attribute.
    ///
    /// A required attribute such as `id`, `sourceRef` or `x` is absent.
    E205,

    /// Invalid number.
    ///
    /// A `dc:Bounds` coordinate is not a finite number.
    E206,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E206.to_string(), "E206");
    }
}
