//! Label styling for component names.
//!
//! A [`LabelStyle`] renders a label as a styled `<g>` wrapping a single
//! `<text>` element. Styling lives on the group as an inline CSS `style`
//! attribute so that every label of a diagram shares identical markup.
//!
//! ```
//! # use topograph_core::draw::LabelStyle;
//! # use topograph_core::color::Color;
//! # use topograph_core::geometry::Point;
//! let style = LabelStyle::new(18, Color::new("#505050").unwrap());
//! let label = style.render(Point::new(417.0, 31.0), "charmworld").to_string();
//! assert!(label.contains("charmworld"));
//! assert!(label.contains("text-anchor:middle"));
//! ```

use svg::node::element as svg_element;

use crate::{color::Color, geometry::Point};

/// Visual style of a component label.
#[derive(Debug, Clone)]
pub struct LabelStyle {
    font_size: u16,
    color: Color,
}

impl LabelStyle {
    /// Creates a centered label style.
    pub fn new(font_size: u16, color: Color) -> Self {
        Self { font_size, color }
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The inline CSS carried by the label group.
    ///
    /// Labels are always centered on their anchor point.
    pub fn to_css(&self) -> String {
        format!(
            "font-size:{}px;fill:{};text-anchor:middle",
            self.font_size, self.color
        )
    }

    /// Renders `content` anchored at `position`.
    ///
    /// The content is escaped by the svg crate's text node.
    pub fn render(&self, position: Point, content: &str) -> svg_element::Group {
        let text = svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y());

        svg_element::Group::new()
            .set("style", self.to_css())
            .add(text)
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::new(18, Color::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_style_css() {
        let style = LabelStyle::new(18, Color::default());
        assert_eq!(style.to_css(), "font-size:18px;fill:black;text-anchor:middle");
        assert_eq!(style.font_size(), 18);
    }

    #[test]
    fn test_label_render_places_text() {
        let style = LabelStyle::default();
        let rendered = style.render(Point::new(94.5, 31.0), "mongodb").to_string();

        assert!(rendered.starts_with("<g"));
        assert!(rendered.contains(r#"x="94.5""#));
        assert!(rendered.contains(r#"y="31""#));
        // The text content is written on its own line.
        let text = &rendered[rendered.find("<text").unwrap()..];
        let content = &text[text.find('>').unwrap() + 1..text.find("</text>").unwrap()];
        assert_eq!(content.trim(), "mongodb");
    }

    #[test]
    fn test_label_render_escapes_content() {
        let rendered = LabelStyle::default()
            .render(Point::default(), "a<b&c")
            .to_string();

        assert!(!rendered.contains("a<b&c"));
        assert!(rendered.contains("a&lt;b&amp;c"));
    }
}
