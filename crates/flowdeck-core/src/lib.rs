//! Flowdeck Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Flowdeck parser
//! and renderer. It includes:
//!
//! - **Process model**: Typed BPMN nodes and sequence flows ([`process`] module)
//! - **Geometry**: Points, sizes, bounds and EMU conversion ([`geometry`] module)
//! - **Colors**: CSS color parsing with DrawingML output ([`color::Color`])
//! - **Draw**: Shape primitives, anchors, connectors and styling ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod process;
