//! Stroke definitions for shape outlines and connectors.

use crate::{color::Color, geometry::Emu};

/// Outline color and width.
///
/// The width is in inches, like every other length before it reaches the
/// document writer.
///
/// # Examples
///
/// ```
/// use flowdeck_core::{color::Color, draw::StrokeDefinition};
///
/// let stroke = StrokeDefinition::new(Color::default(), 0.02);
/// assert_eq!(stroke.width_emu().get(), 18_288);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f64,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Width in inches
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Width as written to `<a:ln w="...">`
    pub fn width_emu(&self) -> Emu {
        Emu::from_inches(self.width)
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 0.01)
    }
}
