//! SVG document assembly.
//!
//! The document has a fixed shape:
//!
//! ```text
//! <svg width height viewBox style xmlns xmlns:xlink>
//!   <defs>serviceBlock, healthCircle, icon-1, icon-2, …</defs>
//!   <g id="relations">line, indicator, line, indicator, …</g>
//!   <g id="services">block, icon, label, block, icon, label, …</g>
//! </svg>
//! ```
//!
//! Relations keep input order; components are emitted in lexical order by name.

mod template;

use log::{debug, trace};
use svg::{
    Document,
    node::{Blob, element as svg_element},
};

use topograph_core::{
    apply_stroke,
    draw::{LabelStyle, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
    topology::Topology,
};

use crate::{
    config::{LayoutConfig, RenderConfig},
    error::TopographError,
    icon::{DefinitionContent, ICON_ID_PREFIX, IconDefinition, IconSource, ResolvedIcons},
    layout::{Canvas, RelationSegment, ResolvedPositions},
};

pub use template::{HEALTH_CIRCLE_ID, SERVICE_BLOCK_ID};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Rejects component names that would duplicate an identifier the document
/// already defines.
///
/// Block `id`s are component names, so `serviceBlock`, `healthCircle`, the
/// layer ids and `icon-<n>` are unavailable as names.
///
/// # Errors
///
/// Returns [`TopographError::InvalidTopology`] naming the first offending
/// component.
pub fn check_component_ids(topology: &Topology) -> Result<(), TopographError> {
    let reserved = |name: &str| {
        [SERVICE_BLOCK_ID, HEALTH_CIRCLE_ID].contains(&name)
            || RenderLayer::ALL.iter().any(|layer| layer.id() == name)
            || name.strip_prefix(ICON_ID_PREFIX).is_some_and(|suffix| {
                !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit())
            })
    };

    match topology.components().find(|component| reserved(component.name())) {
        Some(component) => Err(TopographError::InvalidTopology(format!(
            "component `{}` uses a reserved document id",
            component.name()
        ))),
        None => Ok(()),
    }
}

/// Everything computed for one render, in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Canvas size.
    pub canvas: Canvas,
    /// Translated top-left corner of every block.
    pub positions: &'a ResolvedPositions,
    /// One segment per relation, in input order.
    pub relations: &'a [RelationSegment],
    pub icons: &'a ResolvedIcons,
}

/// Builds SVG documents from [`Scene`]s.
///
/// Holds the parsed style so that a bad color fails before any markup is built.
#[derive(Debug)]
pub struct SvgAssembler<'a> {
    layout: &'a LayoutConfig,
    font_family: &'a str,
    stroke: StrokeDefinition,
    label: LabelStyle,
    indicator_diameter: f32,
}

impl<'a> SvgAssembler<'a> {
    /// Creates an assembler for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Config`] if a configured color is invalid.
    pub fn new(config: &'a RenderConfig) -> Result<Self, TopographError> {
        let style = config.style();
        let stroke = StrokeDefinition::solid(
            style.relation_color().map_err(TopographError::Config)?,
            style.relation_width(),
        );
        let label = LabelStyle::new(
            style.label_font_size(),
            style.label_color().map_err(TopographError::Config)?,
        );

        Ok(Self {
            layout: config.layout(),
            font_family: style.font_family(),
            stroke,
            label,
            indicator_diameter: style.indicator_diameter(),
        })
    }

    /// Assembles the complete document.
    pub fn assemble(&self, scene: &Scene<'_>) -> Document {
        let width = scene.canvas.width();
        let height = scene.canvas.height();

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("style", format!("font-family:{};", self.font_family))
            .set("xmlns", SVG_NAMESPACE)
            .set("xmlns:xlink", XLINK_NAMESPACE)
            .add(self.definitions(scene.icons));

        let mut output = LayeredOutput::new();
        for segment in scene.relations {
            output.merge(self.render_relation(segment));
        }
        for (name, position) in scene.positions.iter() {
            output.merge(self.render_service(name, position, scene.icons));
        }

        for group in output.render() {
            document = document.add(group);
        }

        debug!(
            width,
            height,
            relations = scene.relations.len(),
            services = scene.positions.len();
            "SVG document assembled"
        );
        document
    }

    fn definitions(&self, icons: &ResolvedIcons) -> svg_element::Definitions {
        let mut defs = svg_element::Definitions::new()
            .add(template::service_block(self.layout.block_size()))
            .add(template::health_circle(
                self.indicator_diameter,
                &self.stroke.color(),
                self.stroke.width(),
            ));

        for definition in icons.definitions() {
            defs = defs.add(self.icon_definition(definition));
        }
        defs
    }

    fn icon_definition(&self, definition: &IconDefinition) -> svg_element::SVG {
        let size = self.layout.icon_size();
        let wrapper = svg_element::SVG::new()
            .set("id", definition.id())
            .set("width", size)
            .set("height", size);

        match definition.content() {
            DefinitionContent::Url(url) => wrapper.add(
                svg_element::Image::new()
                    .set("width", size)
                    .set("height", size)
                    .set("xlink:href", url.as_str()),
            ),
            DefinitionContent::Markup(markup) => wrapper.add(Blob::new(markup.as_str())),
        }
    }

    fn render_relation(&self, segment: &RelationSegment) -> LayeredOutput {
        let stroke = self.stroke.clone().with_style(segment.stroke_style());
        let line = svg_element::Line::new()
            .set("x1", segment.start().x())
            .set("y1", segment.start().y())
            .set("x2", segment.end().x())
            .set("y2", segment.end().y());
        let line = apply_stroke!(line, &stroke);

        let origin = segment.indicator_origin();
        let indicator = svg_element::Use::new()
            .set("x", origin.x())
            .set("y", origin.y())
            .set("xlink:href", format!("#{HEALTH_CIRCLE_ID}"));

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Relations, Box::new(line));
        output.add_to_layer(RenderLayer::Relations, Box::new(indicator));
        output
    }

    fn render_service(&self, name: &str, position: Point, icons: &ResolvedIcons) -> LayeredOutput {
        let block_size = self.layout.block_size();
        let icon_size = self.layout.icon_size();
        let inset = (block_size - icon_size) / 2.0;
        let icon_position = position.add_point(Point::new(inset, inset));

        let block = svg_element::Use::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("xlink:href", format!("#{SERVICE_BLOCK_ID}"))
            .set("id", name);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Services, Box::new(block));

        match icons.source(name) {
            Some(IconSource::UrlReference { id, .. } | IconSource::SharedInlineContent { id, .. }) => {
                let icon = svg_element::Use::new()
                    .set("x", icon_position.x())
                    .set("y", icon_position.y())
                    .set("xlink:href", format!("#{id}"))
                    .set("width", icon_size)
                    .set("height", icon_size);
                output.add_to_layer(RenderLayer::Services, Box::new(icon));
            }
            Some(IconSource::DirectInlineReference { url }) => {
                let icon = svg_element::Image::new()
                    .set("x", icon_position.x())
                    .set("y", icon_position.y())
                    .set("width", icon_size)
                    .set("height", icon_size)
                    .set("xlink:href", url.as_str());
                output.add_to_layer(RenderLayer::Services, Box::new(icon));
            }
            None => trace!(component = name; "No icon source"),
        }

        let label_position = Point::new(
            position.x() + block_size / 2.0,
            position.y() + self.layout.label_baseline(),
        );
        output.add_to_layer(
            RenderLayer::Services,
            Box::new(self.label.render(label_position, name)),
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use topograph_core::{
        geometry::Size,
        topology::{Component, Topology},
    };

    use super::*;
    use crate::{
        config::RelationAnchor,
        icon::resolve_icons,
        layout::{relation_segment, resolve_positions},
    };

    fn scene_markup(config: &RenderConfig) -> String {
        let mut topology = Topology::new();
        topology.add_component(Component::new("a", "x").with_position("0", "0"));
        topology.add_component(Component::new("b", "x").with_position("400", "0"));

        let positions = resolve_positions(&topology, config.layout()).unwrap();
        let canvas = Canvas::fit(positions.points(), Size::square(189.0), 0.0);
        let relations = [relation_segment(
            positions.get("a").unwrap(),
            positions.get("b").unwrap(),
            Size::square(189.0),
            RelationAnchor::Center,
            20.0,
        )];
        let icons = resolve_icons(&topology, &|locator: &str| format!("{locator}.svg"), None).unwrap();

        let assembler = SvgAssembler::new(config).unwrap();
        assembler
            .assemble(&Scene {
                canvas,
                positions: &positions,
                relations: &relations,
                icons: &icons,
            })
            .to_string()
    }

    #[test]
    fn test_reserved_component_ids() {
        for name in ["serviceBlock", "healthCircle", "relations", "services", "icon-2"] {
            let mut topology = Topology::new();
            topology.add_component(Component::new("a", "x"));
            topology.add_component(Component::new(name, "x"));

            let err = check_component_ids(&topology).unwrap_err();
            assert!(matches!(err, TopographError::InvalidTopology(_)));
            assert!(err.to_string().contains(name));
        }

        let mut topology = Topology::new();
        for name in ["icon-", "icon-x", "icon-2a", "Services", "service-block"] {
            topology.add_component(Component::new(name, "x"));
        }
        assert!(check_component_ids(&topology).is_ok());
    }

    #[test]
    fn test_assemble_root_attributes() {
        let markup = scene_markup(&RenderConfig::default());

        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(r#"width="589""#));
        assert!(markup.contains(r#"height="189""#));
        assert!(markup.contains(r#"viewBox="0 0 589 189""#));
        assert!(markup.contains(r#"style="font-family:Ubuntu, sans-serif;""#));
        assert!(markup.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    }

    #[test]
    fn test_assemble_order() {
        let markup = scene_markup(&RenderConfig::default());

        let defs = markup.find("<defs>").unwrap();
        let relations = markup.find(r#"<g id="relations">"#).unwrap();
        let services = markup.find(r#"<g id="services">"#).unwrap();
        assert!(defs < relations && relations < services);

        // One shared definition for the shared locator.
        assert_eq!(markup.matches(r#"id="icon-1""#).count(), 1);
        assert!(!markup.contains(r#"id="icon-2""#));
        assert_eq!(markup.matches("#icon-1").count(), 2);
        assert!(markup.contains(r#"stroke-dasharray="190.00, 20""#));
    }

    #[test]
    fn test_assemble_rejects_bad_color() {
        let config: RenderConfig = toml::from_str(
            r#"
            [style]
            label_color = "bad-wolf"
            "#,
        )
        .unwrap();

        let err = SvgAssembler::new(&config).unwrap_err();
        assert!(matches!(err, TopographError::Config(_)));
    }
}
