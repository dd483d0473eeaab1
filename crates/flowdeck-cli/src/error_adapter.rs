//! Error adapter for converting FlowdeckError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors are
//! rendered against the repaired BPMN source with their code, help text and
//! labelled spans; every other error is rendered as a plain report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use flowdeck::{FlowdeckError, RenderError};
use flowdeck_parser::{Span, error::ParseError};

/// Adapter for a parse error and the source it points into.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped error
    err: &'a ParseError,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.err.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.into_iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`FlowdeckError`] variants.
///
/// This adapter handles errors that don't have source locations, such as
/// I/O, configuration and rendering errors.
pub struct ErrorAdapter<'a>(pub &'a FlowdeckError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowdeckError::Io(_) => "flowdeck::io",
            FlowdeckError::Parse { .. } => return None,
            FlowdeckError::Config(_) => "flowdeck::config",
            FlowdeckError::Render(_) => "flowdeck::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            FlowdeckError::Render(RenderError::SlideOutOfRange { count, .. }) => Some(Box::new(
                format!("pass `--slide` with an index below {count}"),
            )),
            FlowdeckError::Render(RenderError::Zip(_)) => {
                Some(Box::new("the template must be a `.pptx` file"))
            }
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a Flowdeck [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Wrap a [`FlowdeckError`] in the diagnostic miette should render for it.
///
/// Parse errors carry their source and spans; everything else is reported
/// without a snippet.
pub fn to_report(err: &FlowdeckError) -> Box<dyn MietteDiagnostic + '_> {
    match err {
        FlowdeckError::Parse {
            err: parse_err,
            src,
        } => Box::new(DiagnosticAdapter::new(parse_err, src)),
        _ => Box::new(ErrorAdapter(err)),
    }
}
