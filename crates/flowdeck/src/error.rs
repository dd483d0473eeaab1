//! Error types for Flowdeck operations.
//!
//! This module provides the main error type [`FlowdeckError`] which wraps
//! the error conditions that can occur while converting a process diagram.

use std::io;

use thiserror::Error;

use flowdeck_parser::error::ParseError;

use crate::export::RenderError;

/// The main error type for Flowdeck operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the text the parser actually read, after
/// attribute quote repair, so the error's spans can be rendered against it.
#[derive(Debug, Error)]
pub enum FlowdeckError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl FlowdeckError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
