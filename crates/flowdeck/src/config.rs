//! Configuration types for Flowdeck rendering.
//!
//! This module provides configuration structures that control how BPMN
//! geometry is scaled, laid out and styled on the slide. All types implement
//! [`serde::Deserialize`] and every field has a default, so a configuration
//! file only needs the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`GeometryConfig`] - Diagram Interchange to inch conversion.
//! - [`LayoutConfig`] - Gateway branch adjustment.
//! - [`TemplateConfig`] - Template file, target slide and vertical page offset.
//! - [`StyleConfig`] - Fonts, fills and strokes for shapes and connectors.
//!
//! # Example
//!
//! ```
//! # use flowdeck::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.geometry().scale(), 100.0);
//! assert_eq!(config.layout().gateway_offset(), 0.5);
//! assert!(config.style().label_style().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use flowdeck_core::{
    color::Color,
    draw::{LabelStyle, StrokeDefinition},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Geometry configuration section.
    #[serde(default)]
    geometry: GeometryConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Template configuration section.
    #[serde(default)]
    template: TemplateConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        geometry: GeometryConfig,
        layout: LayoutConfig,
        template: TemplateConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            geometry,
            layout,
            template,
            style,
        }
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn template(&self) -> &TemplateConfig {
        &self.template
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the config with its template section replaced.
    pub fn with_template(mut self, template: TemplateConfig) -> Self {
        self.template = template;
        self
    }
}

/// Conversion from Diagram Interchange units into inches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Diagram Interchange units per inch; every bounds value is divided by it.
    scale: f64,
}

impl GeometryConfig {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::new(flowdeck_parser::DEFAULT_SCALE)
    }
}

/// Gateway layout adjustment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inches between a gateway's vertical center and its first branch's top.
    gateway_offset: f64,
}

impl LayoutConfig {
    pub fn new(gateway_offset: f64) -> Self {
        Self { gateway_offset }
    }

    pub fn gateway_offset(&self) -> f64 {
        self.gateway_offset
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Where the diagram goes.
///
/// Without a `path`, a built-in single-slide blank presentation is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template `.pptx` file.
    path: Option<PathBuf>,

    /// Zero-based index of the slide receiving the diagram.
    slide_index: usize,

    /// Inches added to every shape's y, to clear the slide's title area.
    page_offset: f64,
}

impl TemplateConfig {
    pub fn new(path: Option<PathBuf>, slide_index: usize, page_offset: f64) -> Self {
        Self {
            path,
            slide_index,
            page_offset,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn page_offset(&self) -> f64 {
        self.page_offset
    }

    /// Sets the template file (builder style).
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the target slide (builder style).
    pub fn with_slide_index(mut self, slide_index: usize) -> Self {
        self.slide_index = slide_index;
        self
    }

    /// Sets the vertical page offset (builder style).
    pub fn with_page_offset(mut self, page_offset: f64) -> Self {
        self.page_offset = page_offset;
        self
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self::new(None, 0, 1.5)
    }
}

/// Visual styling of shapes and connectors.
///
/// Colors are CSS color strings. Lengths are in inches except `font_size`,
/// which is in points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    font_size: f64,
    text_color: String,
    fill_color: String,
    line_color: String,
    line_width: f64,
    connector_color: String,
    connector_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 7.2,
            text_color: "black".to_string(),
            fill_color: "white".to_string(),
            line_color: "black".to_string(),
            line_width: 0.01,
            connector_color: "black".to_string(),
            connector_width: 0.02,
        }
    }
}

impl StyleConfig {
    /// Label font size in points.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Shape outline width in inches.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Connector line width in inches.
    pub fn connector_width(&self) -> f64 {
        self.connector_width
    }

    /// Returns the label style for shape text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text color cannot be parsed.
    pub fn label_style(&self) -> Result<LabelStyle, String> {
        let color = parse_color("text_color", &self.text_color)?;
        Ok(LabelStyle::new(&self.font_family, self.font_size, color))
    }

    /// Returns the shape fill color.
    ///
    /// # Errors
    ///
    /// Returns an error if the fill color cannot be parsed.
    pub fn fill_color(&self) -> Result<Color, String> {
        parse_color("fill_color", &self.fill_color)
    }

    /// Returns the outline drawn around every shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the line color cannot be parsed.
    pub fn outline(&self) -> Result<StrokeDefinition, String> {
        let color = parse_color("line_color", &self.line_color)?;
        Ok(StrokeDefinition::new(color, self.line_width))
    }

    /// Returns the stroke used for connectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the connector color cannot be parsed.
    pub fn connector_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = parse_color("connector_color", &self.connector_color)?;
        Ok(StrokeDefinition::new(color, self.connector_width))
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}
