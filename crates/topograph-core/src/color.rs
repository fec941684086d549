//! Color handling for Topograph diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Relation strokes and label fills are configured as CSS
//! color strings and validated through it before any markup is produced.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Rgba8, Srgb};

/// A parsed CSS color.
///
/// Accepts anything the color crate understands: `"#38B44A"`,
/// `"rgb(80, 80, 80)"`, `"green"`, and so on.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph_core::color::Color;
    ///
    /// let status = Color::new("#38B44A").unwrap();
    /// let label = Color::new("dimgray").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected string when it is not a CSS color.
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the alpha component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

/// Writes named colors by name, opaque colors as `#rrggbb` and translucent
/// ones as `rgba(r, g, b, a)`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.color.flags.color_name() {
            return write!(f, "{name}");
        }

        let Rgba8 { r, g, b, a } = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", self.alpha())
        }
    }
}
