//! PowerPoint (`.pptx`) export.
//!
//! A [`Pptx`] exporter opens a template package, finds the target slide,
//! draws every placed node as a preset shape and every sequence flow as a
//! glued connector, and writes the package back out in memory:
//!
//! ```text
//! template bytes ─► Package ─► slide::locate ─► ShapeTree::inspect
//!                                                   │
//!            ShapeRenderer ─► ConnectorRouter ─► DrawingWriter
//!                                                   │
//!                           ShapeTree::splice ─► Package::write ─► bytes
//! ```

mod connectors;
mod package;
mod shapes;
mod slide;
mod writer;

pub(crate) mod template;

pub use shapes::ShapeStyle;

use log::{debug, info};

use flowdeck_core::{draw::StrokeDefinition, process::ProcessGraph};

use crate::export::{self, Export, RenderError};
use connectors::ConnectorRouter;
use package::Package;
use shapes::{ShapeIds, ShapeRenderer};
use slide::ShapeTree;
use writer::DrawingWriter;

pub(crate) const PRESENTATION_NS: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const DRAWING_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builder for [`Pptx`] exporters.
pub struct PptxBuilder<'a> {
    template: &'a [u8],
    slide_index: usize,
    page_offset: f64,
    shape_style: ShapeStyle,
    connector_stroke: StrokeDefinition,
}

impl<'a> PptxBuilder<'a> {
    /// Starts a builder over the bytes of a `.pptx` template.
    pub fn new(template: &'a [u8]) -> Self {
        Self {
            template,
            slide_index: 0,
            page_offset: 0.0,
            shape_style: ShapeStyle::default(),
            connector_stroke: StrokeDefinition::default(),
        }
    }

    /// Selects the zero-based target slide and the inches added to every y.
    pub fn with_slide(mut self, slide_index: usize, page_offset: f64) -> Self {
        self.slide_index = slide_index;
        self.page_offset = page_offset;
        self
    }

    pub fn with_shape_style(mut self, shape_style: ShapeStyle) -> Self {
        self.shape_style = shape_style;
        self
    }

    pub fn with_connector_stroke(mut self, connector_stroke: StrokeDefinition) -> Self {
        self.connector_stroke = connector_stroke;
        self
    }

    /// Opens the template and resolves the target slide.
    ///
    /// # Errors
    ///
    /// Fails if the template is not a zip package, lacks the main
    /// presentation part, or has no slide at the requested index.
    pub fn build(self) -> Result<Pptx, RenderError> {
        let package = Package::read(self.template)?;
        let slide_part = slide::locate(&package, self.slide_index)?;

        Ok(Pptx {
            package,
            slide_part,
            page_offset: self.page_offset,
            shape_style: self.shape_style,
            connector_stroke: self.connector_stroke,
        })
    }
}

/// An opened template ready to receive a process graph.
pub struct Pptx {
    package: Package,
    slide_part: String,
    page_offset: f64,
    shape_style: ShapeStyle,
    connector_stroke: StrokeDefinition,
}

impl export::Exporter for Pptx {
    fn export_process(&self, graph: &ProcessGraph) -> Result<Export, RenderError> {
        let slide_xml = self.package.part_str(&self.slide_part)?;
        let tree = ShapeTree::inspect(&self.slide_part, slide_xml)?;
        debug!(
            part = self.slide_part.as_str(),
            first_shape_id = tree.next_shape_id();
            "Inspected slide shape tree"
        );

        let mut writer = DrawingWriter::new(tree.prefixes());
        let mut ids = ShapeIds::starting_at(&self.slide_part, tree.next_shape_id());
        let mut warnings = Vec::new();

        let registry = ShapeRenderer::new(&self.shape_style, self.page_offset).render(
            graph,
            &mut ids,
            &mut writer,
            &mut warnings,
        )?;
        let connectors_count = ConnectorRouter::new(&self.connector_stroke).render(
            graph.flows(),
            &registry,
            &mut ids,
            &mut writer,
            &mut warnings,
        )?;

        let fragment = writer.into_string()?;
        let slide_xml = tree.splice(slide_xml, &fragment);

        let mut package = self.package.clone();
        package.replace(&self.slide_part, slide_xml.into_bytes())?;
        let bytes = package.write()?;

        info!(
            shapes_count = registry.len(),
            connectors_count,
            warnings_count = warnings.len(),
            size = bytes.len();
            "Presentation rendered"
        );

        Ok(Export::new(
            bytes,
            warnings,
            registry.len(),
            connectors_count,
        ))
    }
}
