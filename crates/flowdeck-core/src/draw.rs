//! Drawing vocabulary shared by the renderer.
//!
//! # Overview
//!
//! - [`Primitive`] - The preset geometry drawn for a node kind
//! - [`Anchor`] - A connection site on a primitive's boundary
//! - [`ConnectorKind`] - Straight or elbow connector presets
//! - [`StrokeDefinition`] - Outline color and width
//! - [`LabelStyle`] - Font settings for shape labels

mod connector;
mod primitive;
mod stroke;
mod text;

pub use connector::ConnectorKind;
pub use primitive::{Anchor, Primitive};
pub use stroke::StrokeDefinition;
pub use text::LabelStyle;
