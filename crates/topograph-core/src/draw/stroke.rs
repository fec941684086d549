//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`StrokeDefinition`]: color, width and pattern of a stroke
//! - [`StrokeStyle`]: line patterns
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke` | `"#38B44A"` |
//! | `width` | `stroke-width` | `2` |
//! | `style` | `stroke-dasharray` | `"129.85, 20"` |
//!
//! # Example
//!
//! ```
//! use topograph_core::draw::{StrokeDefinition, StrokeStyle};
//! use topograph_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::solid(Color::new("#38B44A").unwrap(), 2.0)
//!     .with_style(StrokeStyle::DashGap { dash: 129.847, gap: 20.0 });
//! let line = svg_element::Line::new().set("x1", 0).set("y1", 0);
//!
//! let line = topograph_core::apply_stroke!(line, &stroke);
//! assert!(line.to_string().contains("129.85, 20"));
//! ```

use crate::color::Color;

/// Defines the visual pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Continuous line, no dasharray attribute.
    #[default]
    Solid,
    /// Two-value pattern `"<dash>, <gap>"`, the dash rounded to two decimals.
    ///
    /// The pattern repeats, so a line of length `2·dash + gap` draws one dash,
    /// the gap, then a second dash.
    DashGap { dash: f32, gap: f32 },
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::DashGap { dash, gap } => Some(format!("{dash:.2}, {gap}")),
        }
    }
}

/// A stroke definition for rendering lines.
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// A solid stroke of the given color and width.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Replaces the pattern (builder style).
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets `stroke`, `stroke-width` and, unless the style is solid,
/// `stroke-dasharray`.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_with_style() {
        let color = Color::new("red").unwrap();
        let stroke = StrokeDefinition::solid(color, 2.0);
        assert_eq!(*stroke.style(), StrokeStyle::Solid);

        let stroke = stroke.with_style(StrokeStyle::DashGap { dash: 1.0, gap: 2.0 });
        assert_eq!(stroke.width(), 2.0);
        assert_eq!(stroke.color(), color);
        assert_eq!(*stroke.style(), StrokeStyle::DashGap { dash: 1.0, gap: 2.0 });
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(
            StrokeStyle::DashGap { dash: 129.8466, gap: 20.0 }.to_svg_value(),
            Some("129.85, 20".to_string())
        );
        assert_eq!(
            StrokeStyle::DashGap { dash: 0.0, gap: 20.0 }.to_svg_value(),
            Some("0.00, 20".to_string())
        );
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let color = Color::new("#38B44A").unwrap();
        let stroke = StrokeDefinition::solid(color, 2.0);
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke).to_string();

        assert!(line.contains(&format!(r#"stroke="{color}""#)));
        assert!(line.contains(r#"stroke-width="2""#));
        assert!(!line.contains("stroke-dasharray"));

        let dashed = stroke.with_style(StrokeStyle::DashGap { dash: 66.97, gap: 20.0 });
        let line = crate::apply_stroke!(svg_element::Line::new(), &dashed).to_string();
        assert!(line.contains(r#"stroke-dasharray="66.97, 20""#));
    }
}
