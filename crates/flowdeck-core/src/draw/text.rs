//! Label styling for shape text.

use crate::color::Color;

/// Font settings applied to every shape label.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `7.2` pt |
/// | Color | black |
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    font_family: String,
    font_size: f64,
    color: Color,
}

impl LabelStyle {
    pub fn new(font_family: impl Into<String>, font_size: f64, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size in points
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Font size as DrawingML's `sz` attribute, in hundredths of a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowdeck_core::draw::LabelStyle;
    ///
    /// assert_eq!(LabelStyle::default().font_size_centipoints(), 720);
    /// ```
    pub fn font_size_centipoints(&self) -> u32 {
        (self.font_size * 100.0).round().max(100.0) as u32
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::new("Arial", 7.2, Color::default())
    }
}
