//! Shared templates placed in the definitions section of every document.
//!
//! The service block is a static asset compiled into the crate. The status
//! indicator is drawn from the style configuration so that it follows the
//! relation color and indicator size.

use svg::node::{Blob, element as svg_element};

use topograph_core::color::Color;

/// Identifier of the service block template.
pub const SERVICE_BLOCK_ID: &str = "serviceBlock";

/// Identifier of the status indicator template.
pub const HEALTH_CIRCLE_ID: &str = "healthCircle";

/// Markup of the service block, drawn at [`SERVICE_BLOCK_SIZE`].
const SERVICE_BLOCK_SVG: &str = include_str!("../../../assets/service_block.svg");

/// Native side length of [`SERVICE_BLOCK_SVG`].
const SERVICE_BLOCK_SIZE: f32 = 236.25;

/// The service block template, scaled to `block_size`.
pub fn service_block(block_size: f32) -> svg_element::Group {
    svg_element::Group::new()
        .set("id", SERVICE_BLOCK_ID)
        .set("transform", format!("scale({})", block_size / SERVICE_BLOCK_SIZE))
        .add(Blob::new(SERVICE_BLOCK_SVG.trim()))
}

/// The status indicator template: a ring around a filled dot, `diameter` wide.
pub fn health_circle(diameter: f32, color: &Color, stroke_width: f32) -> svg_element::Group {
    let radius = diameter / 2.0;

    let ring = svg_element::Circle::new()
        .set("cx", radius)
        .set("cy", radius)
        .set("r", radius)
        .set(
            "style",
            format!("stroke:{color};fill:none;stroke-width:{stroke_width}px"),
        );
    let dot = svg_element::Circle::new()
        .set("cx", radius)
        .set("cy", radius)
        .set("r", radius / 2.0)
        .set("style", format!("fill:{color}"));

    svg_element::Group::new()
        .set("id", HEALTH_CIRCLE_ID)
        .add(ring)
        .add(dot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_block_scale() {
        let block = service_block(189.0).to_string();

        assert!(block.contains(r#"id="serviceBlock""#));
        assert!(block.contains(r#"transform="scale(0.8)""#));
        assert!(block.contains("<rect"));
    }

    #[test]
    fn test_service_block_asset_is_well_formed() {
        let document = roxmltree::Document::parse(SERVICE_BLOCK_SVG).unwrap();
        let root = document.root_element();

        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.attribute("width"), Some("236.25"));
    }

    #[test]
    fn test_health_circle() {
        let color = Color::new("green").unwrap();
        let circle = health_circle(20.0, &color, 2.0).to_string();

        assert!(circle.contains(r#"id="healthCircle""#));
        assert!(circle.contains(r#"r="10""#));
        assert!(circle.contains(r#"r="5""#));
        assert!(circle.contains(&format!("stroke:{color};fill:none;stroke-width:2px")));
        assert!(circle.contains(&format!("fill:{color}\"")));
    }
}
