//! Drawing process nodes as preset shapes.

use std::collections::HashMap;

use log::{debug, warn};

use flowdeck_core::{
    color::Color,
    draw::{LabelStyle, Primitive, StrokeDefinition},
    geometry::{EmuRect, Point},
    process::ProcessGraph,
};

use super::writer::{DrawingWriter, ShapeXml};
use crate::{export::RenderError, warning::RenderWarning};

/// Fill, outline and label settings shared by every node shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    fill: Color,
    outline: StrokeDefinition,
    label: LabelStyle,
}

impl ShapeStyle {
    pub fn new(fill: Color, outline: StrokeDefinition, label: LabelStyle) -> Self {
        Self {
            fill,
            outline,
            label,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(
            Color::new("white").unwrap_or_default(),
            StrokeDefinition::default(),
            LabelStyle::default(),
        )
    }
}

/// A node that made it onto the slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RenderedShape {
    shape_id: u32,
    primitive: Primitive,
    rect: EmuRect,
}

impl RenderedShape {
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    /// Slide position in EMU, page offset included.
    pub fn rect(&self) -> &EmuRect {
        &self.rect
    }
}

/// Node id to drawn shape.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShapeRegistry {
    shapes: HashMap<String, RenderedShape>,
}

impl ShapeRegistry {
    pub fn get(&self, node_id: &str) -> Option<&RenderedShape> {
        self.shapes.get(node_id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Hands out slide-unique shape ids.
#[derive(Debug)]
pub(crate) struct ShapeIds<'a> {
    part: &'a str,
    /// `None` once `u32::MAX` has been handed out.
    next: Option<u32>,
}

impl<'a> ShapeIds<'a> {
    pub fn starting_at(part: &'a str, first: u32) -> Self {
        Self {
            part,
            next: Some(first),
        }
    }

    /// # Errors
    ///
    /// Fails once the `unsignedInt` id space of the slide is used up.
    pub fn allocate(&mut self) -> Result<u32, RenderError> {
        let id = self
            .next
            .ok_or_else(|| RenderError::xml(self.part, "no shape ids left on the slide"))?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// Writes one shape per placed node, in document order.
pub(crate) struct ShapeRenderer<'a> {
    style: &'a ShapeStyle,
    page_offset: f64,
}

impl<'a> ShapeRenderer<'a> {
    pub fn new(style: &'a ShapeStyle, page_offset: f64) -> Self {
        Self { style, page_offset }
    }

    /// Draws every node that has bounds.
    ///
    /// Nodes without bounds are reported as [`RenderWarning::UnresolvedNode`]
    /// and get no shape.
    pub fn render(
        &self,
        graph: &ProcessGraph,
        ids: &mut ShapeIds<'_>,
        writer: &mut DrawingWriter,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<ShapeRegistry, RenderError> {
        let mut registry = ShapeRegistry::default();
        let offset = Point::new(0.0, self.page_offset);

        for node in graph.nodes() {
            let Some(bounds) = node.bounds() else {
                warn!(node = node.id(); "Node has no diagram shape, not drawn");
                warnings.push(RenderWarning::UnresolvedNode {
                    id: node.id().to_string(),
                });
                continue;
            };

            let primitive = Primitive::for_kind(node.kind());
            let rect = bounds.translate(offset).to_emu();
            let shape_id = ids.allocate()?;
            let name = format!("{} {}", primitive.display_name(), node.id());

            writer.shape(ShapeXml {
                id: shape_id,
                name: &name,
                preset: primitive.preset_name(),
                rect,
                fill: self.style.fill,
                outline: &self.style.outline,
                label: node.name(),
                label_style: &self.style.label,
            })?;

            registry.shapes.insert(
                node.id().to_string(),
                RenderedShape {
                    shape_id,
                    primitive,
                    rect,
                },
            );
        }

        debug!(shapes_count = registry.len(); "Shapes rendered");
        Ok(registry)
    }
}
