pub mod pptx;

use std::{io, path::PathBuf};

use thiserror::Error;

use flowdeck_core::process::ProcessGraph;

use crate::warning::RenderWarning;

/// Anything that can turn a laid out process graph into a document.
pub trait Exporter {
    fn export_process(&self, graph: &ProcessGraph) -> Result<Export, RenderError>;
}

/// A rendered document plus what was left out of it.
#[derive(Debug, Clone)]
pub struct Export {
    bytes: Vec<u8>,
    warnings: Vec<RenderWarning>,
    shapes_count: usize,
    connectors_count: usize,
}

impl Export {
    pub fn new(
        bytes: Vec<u8>,
        warnings: Vec<RenderWarning>,
        shapes_count: usize,
        connectors_count: usize,
    ) -> Self {
        Self {
            bytes,
            warnings,
            shapes_count,
            connectors_count,
        }
    }

    pub fn shapes_count(&self) -> usize {
        self.shapes_count
    }

    pub fn connectors_count(&self) -> usize {
        self.connectors_count
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<RenderWarning>) {
        (self.bytes, self.warnings)
    }
}

/// Failures while reading the template or writing the presentation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template `{}`: {source}", path.display())]
    Template { path: PathBuf, source: io::Error },

    #[error("invalid presentation package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("part `{part}` is not usable XML: {message}")]
    Xml { part: String, message: String },

    #[error("presentation package has no part `{0}`")]
    MissingPart(String),

    #[error("slide index {index} is out of range; the template has {count} slide(s)")]
    SlideOutOfRange { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RenderError {
    pub(crate) fn xml(part: impl Into<String>, message: impl ToString) -> Self {
        Self::Xml {
            part: part.into(),
            message: message.to_string(),
        }
    }
}
