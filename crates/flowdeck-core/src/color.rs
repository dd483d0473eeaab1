//! Color handling for Flowdeck slides
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are written with CSS syntax in configuration
//! files and emitted as DrawingML `srgbClr` hex values.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// A parsed CSS color used for fills, outlines and label text.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowdeck_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let white = Color::new("white").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as the six hex digits DrawingML expects in
    /// `<a:srgbClr val="..."/>`. Alpha is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowdeck_core::color::Color;
    ///
    /// assert_eq!(Color::new("white").unwrap().to_srgb_hex(), "FFFFFF");
    /// assert_eq!(Color::new("#1a2b3c").unwrap().to_srgb_hex(), "1A2B3C");
    /// ```
    pub fn to_srgb_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("{:02X}{:02X}{:02X}", rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}
