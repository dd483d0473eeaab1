//! Routing sequence flows as connectors between drawn shapes.

use log::{debug, warn};

use flowdeck_core::{
    draw::{Anchor, ConnectorKind, StrokeDefinition},
    geometry::EmuRect,
    process::SequenceFlow,
};

use super::{
    shapes::{RenderedShape, ShapeIds, ShapeRegistry},
    writer::{ConnectionEnd, ConnectorXml, DrawingWriter},
};
use crate::{export::RenderError, warning::RenderWarning};

/// Preset and glue points of one connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Route {
    pub kind: ConnectorKind,
    pub begin: Anchor,
    pub end: Anchor,
}

impl Route {
    /// Picks the route between two shape frames.
    ///
    /// Frames with the same top get a straight connector from the source's
    /// bottom to the target's top. Any other pair gets an elbow leaving the
    /// source on the side facing the target.
    pub fn between(source: &EmuRect, target: &EmuRect) -> Self {
        if source.top() == target.top() {
            return Self {
                kind: ConnectorKind::Straight,
                begin: Anchor::Bottom,
                end: Anchor::Top,
            };
        }

        let (begin, end) = if source.left() < target.left() {
            (Anchor::Right, Anchor::Left)
        } else {
            (Anchor::Left, Anchor::Right)
        };
        Self {
            kind: ConnectorKind::Elbow,
            begin,
            end,
        }
    }
}

/// Writes one connector per flow whose endpoints were both drawn.
pub(crate) struct ConnectorRouter<'a> {
    stroke: &'a StrokeDefinition,
}

impl<'a> ConnectorRouter<'a> {
    pub fn new(stroke: &'a StrokeDefinition) -> Self {
        Self { stroke }
    }

    /// Returns how many connectors were written.
    pub fn render(
        &self,
        flows: &[SequenceFlow],
        registry: &ShapeRegistry,
        ids: &mut ShapeIds<'_>,
        writer: &mut DrawingWriter,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<usize, RenderError> {
        let mut connectors_count = 0;

        for flow in flows {
            let (Some(source), Some(target)) =
                (registry.get(flow.source()), registry.get(flow.target()))
            else {
                warn!(
                    source = flow.source(),
                    target = flow.target();
                    "Sequence flow endpoint was not drawn, connector skipped"
                );
                warnings.push(RenderWarning::DanglingConnector {
                    source: flow.source().to_string(),
                    target: flow.target().to_string(),
                });
                continue;
            };

            let route = Route::between(source.rect(), target.rect());
            let id = ids.allocate()?;
            let name = format!("{} {id}", route.kind.display_name());

            writer.connector(ConnectorXml {
                id,
                name: &name,
                preset: route.kind.preset_name(),
                begin: glue(source, route.begin),
                end: glue(target, route.end),
                stroke: self.stroke,
            })?;
            connectors_count += 1;
        }

        debug!(connectors_count; "Connectors rendered");
        Ok(connectors_count)
    }
}

fn glue(shape: &RenderedShape, anchor: Anchor) -> ConnectionEnd {
    ConnectionEnd {
        shape_id: shape.shape_id(),
        site: shape.primitive().connection_site(anchor),
        point: anchor.point_on(shape.rect()),
    }
}
