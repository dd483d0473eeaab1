//! Preset shape primitives and their connection sites.

use crate::{
    geometry::{EmuPoint, EmuRect},
    process::NodeKind,
};

/// A DrawingML preset geometry used to draw a process node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Ellipse,
    Rectangle,
    Diamond,
}

impl Primitive {
    /// Picks the primitive for a node kind.
    ///
    /// Events are ellipses, tasks rectangles and gateways diamonds.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::StartEvent | NodeKind::EndEvent => Primitive::Ellipse,
            NodeKind::Task => Primitive::Rectangle,
            NodeKind::ExclusiveGateway => Primitive::Diamond,
        }
    }

    /// The `prst` attribute value of `<a:prstGeom>`.
    pub fn preset_name(self) -> &'static str {
        match self {
            Primitive::Ellipse => "ellipse",
            Primitive::Rectangle => "rect",
            Primitive::Diamond => "diamond",
        }
    }

    /// Human readable name used for the shape's `cNvPr/@name`.
    pub fn display_name(self) -> &'static str {
        match self {
            Primitive::Ellipse => "Oval",
            Primitive::Rectangle => "Rectangle",
            Primitive::Diamond => "Diamond",
        }
    }

    /// Index of the preset's connection site for `anchor`.
    ///
    /// `rect` and `diamond` define four sites (top, left, bottom, right).
    /// `ellipse` defines eight, with the diagonal sites between them.
    pub fn connection_site(self, anchor: Anchor) -> u32 {
        let side = anchor.side_index();
        match self {
            Primitive::Rectangle | Primitive::Diamond => side,
            Primitive::Ellipse => side * 2,
        }
    }
}

/// A mid-edge connection site of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Top,
    Left,
    Bottom,
    Right,
}

impl Anchor {
    /// Counter-clockwise order starting at the top, as presets list them.
    fn side_index(self) -> u32 {
        match self {
            Anchor::Top => 0,
            Anchor::Left => 1,
            Anchor::Bottom => 2,
            Anchor::Right => 3,
        }
    }

    /// The anchor's location on `rect`'s boundary.
    ///
    /// All three primitives touch the middle of each side of their frame, so
    /// the location does not depend on the primitive.
    pub fn point_on(self, rect: &EmuRect) -> EmuPoint {
        match self {
            Anchor::Top => EmuPoint::new(rect.center_x(), rect.top()),
            Anchor::Left => EmuPoint::new(rect.left(), rect.center_y()),
            Anchor::Bottom => EmuPoint::new(rect.center_x(), rect.bottom()),
            Anchor::Right => EmuPoint::new(rect.right(), rect.center_y()),
        }
    }
}
