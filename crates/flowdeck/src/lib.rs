//! Flowdeck - BPMN process diagrams as PowerPoint slides.
//!
//! Parsing, layout adjustment and rendering of BPMN 2.0 documents with
//! Diagram Interchange geometry. Start events, tasks, exclusive gateways and
//! end events become preset shapes on one slide of a `.pptx` template and
//! sequence flows become connectors glued to them.

pub mod config;

mod error;
mod export;
mod layout;
mod warning;

pub use flowdeck_core::{color, draw, geometry, process};

pub use error::FlowdeckError;
pub use export::{RenderError, pptx::ShapeStyle};
pub use layout::GatewayAdjuster;
pub use warning::RenderWarning;

use std::{fs, sync::OnceLock};

use log::{debug, info, trace};

use flowdeck_parser::{ParseConfig, repair_attribute_quotes};

use config::AppConfig;
use export::{Exporter, pptx::PptxBuilder};
use process::ProcessGraph;

/// MIME type of the documents produced by [`DeckBuilder`].
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// A finished presentation plus the warnings raised while drawing it.
#[derive(Debug, Clone)]
pub struct RenderedDeck {
    bytes: Vec<u8>,
    warnings: Vec<RenderWarning>,
    shapes_count: usize,
    connectors_count: usize,
}

impl RenderedDeck {
    /// The complete `.pptx` file.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    /// Number of node shapes drawn.
    pub fn shapes_count(&self) -> usize {
        self.shapes_count
    }

    /// Number of connectors drawn.
    pub fn connectors_count(&self) -> usize {
        self.connectors_count
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builder for parsing BPMN documents and rendering them as slides.
///
/// This provides an API for processing BPMN diagrams through parsing,
/// layout, and rendering stages. The template is read once, on first
/// render, and shared by every later render.
///
/// # Examples
///
/// ```rust,no_run
/// use flowdeck::{DeckBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("process.bpmn").expect("Failed to read");
///
/// let builder = DeckBuilder::new(AppConfig::default());
///
/// // Parse source to a process graph
/// let graph = builder.parse(&source).expect("Failed to parse");
///
/// // Render the graph to a presentation
/// let deck = builder.render_pptx(&graph).expect("Failed to render");
/// std::fs::write("process.pptx", deck.bytes()).expect("Failed to write");
/// ```
#[derive(Debug, Default)]
pub struct DeckBuilder {
    config: AppConfig,
    template: OnceLock<Vec<u8>>,
}

impl DeckBuilder {
    /// Create a new deck builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including geometry, layout,
    ///   template and style settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            template: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse BPMN XML into a process graph with resolved geometry.
    ///
    /// Doubled attribute quotes (`id=""Task_1""`) are repaired before
    /// parsing.
    ///
    /// # Errors
    ///
    /// Returns `FlowdeckError::Parse` for malformed XML or a document missing
    /// its process or diagram plane, and `FlowdeckError::Config` for a
    /// non-positive scale.
    pub fn parse(&self, source: &str) -> Result<ProcessGraph, FlowdeckError> {
        info!("Parsing BPMN document");

        let scale = self.config.geometry().scale();
        if !(scale.is_finite() && scale > 0.0) {
            return Err(FlowdeckError::Config(format!(
                "geometry scale must be a positive number, got {scale}"
            )));
        }

        let graph = flowdeck_parser::parse(source, ParseConfig::new(scale)).map_err(|err| {
            FlowdeckError::new_parse_error(err, repair_attribute_quotes(source))
        })?;

        debug!("Document parsed successfully");
        trace!(graph:?; "Parsed process graph");

        Ok(graph)
    }

    /// Render a process graph onto the configured template slide.
    ///
    /// The first branch of every exclusive gateway is aligned below it
    /// before drawing. `graph` itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns `FlowdeckError::Config` for an invalid style color and
    /// `FlowdeckError::Render` when the template cannot be read or written.
    /// Nodes or flows that cannot be drawn are not errors; they are listed in
    /// [`RenderedDeck::warnings`].
    pub fn render_pptx(&self, graph: &ProcessGraph) -> Result<RenderedDeck, FlowdeckError> {
        info!(nodes_count = graph.nodes_count(); "Adjusting gateway branches");
        let graph = GatewayAdjuster::new(self.config.layout().gateway_offset()).adjust(graph);
        trace!(graph:?; "Adjusted process graph");

        let style = self.config.style();
        let shape_style = ShapeStyle::new(
            style.fill_color().map_err(FlowdeckError::Config)?,
            style.outline().map_err(FlowdeckError::Config)?,
            style.label_style().map_err(FlowdeckError::Config)?,
        );
        let connector_stroke = style.connector_stroke().map_err(FlowdeckError::Config)?;

        let template = self.config.template();
        info!(slide_index = template.slide_index(); "Rendering presentation");
        let exporter = PptxBuilder::new(self.template_bytes()?)
            .with_slide(template.slide_index(), template.page_offset())
            .with_shape_style(shape_style)
            .with_connector_stroke(connector_stroke)
            .build()?;

        let export = exporter.export_process(&graph)?;
        let shapes_count = export.shapes_count();
        let connectors_count = export.connectors_count();
        let (bytes, warnings) = export.into_parts();

        if !warnings.is_empty() {
            debug!(warnings_count = warnings.len(); "Presentation rendered with warnings");
        }

        Ok(RenderedDeck {
            bytes,
            warnings,
            shapes_count,
            connectors_count,
        })
    }

    /// Parse and render in one step.
    ///
    /// # Errors
    ///
    /// Any error from [`DeckBuilder::parse`] or [`DeckBuilder::render_pptx`].
    pub fn convert(&self, source: &str) -> Result<RenderedDeck, FlowdeckError> {
        let graph = self.parse(source)?;
        self.render_pptx(&graph)
    }

    fn template_bytes(&self) -> Result<&[u8], RenderError> {
        if let Some(bytes) = self.template.get() {
            return Ok(bytes);
        }

        let bytes = match self.config.template().path() {
            Some(path) => {
                info!(path:?; "Loading presentation template");
                fs::read(path).map_err(|source| RenderError::Template {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => {
                debug!("Using built-in blank presentation");
                export::pptx::template::blank_presentation()?
            }
        };

        Ok(self.template.get_or_init(|| bytes))
    }
}
