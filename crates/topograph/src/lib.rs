//! Topograph - Deterministic SVG diagrams of application topologies.
//!
//! A topology is a set of named components, each with an icon and an optional
//! declared position, and the relations between them. Rendering resolves a
//! position for every component, sizes the canvas, computes relation lines and
//! icon sources, and assembles a single SVG document. Identical input always
//! yields byte-identical output.

pub mod config;
pub mod export;
pub mod icon;
pub mod layout;

mod error;

pub use topograph_core::{color, draw, geometry, topology};

pub use error::TopographError;
pub use icon::{FetchError, FetchedIcons, IconFetcher};

use log::{debug, info, trace};

use config::RenderConfig;
use export::svg::{Scene, SvgAssembler};
use layout::{Canvas, RelationSegment, ResolvedPositions};
use topology::Topology;

/// Renderer for topology diagrams.
///
/// # Examples
///
/// ```
/// use topograph::{TopologyRenderer, config::RenderConfig};
/// use topograph::topology::{Component, Relation, Topology};
///
/// let mut topology = Topology::new();
/// topology.add_component(Component::new("wordpress", "wordpress").with_position("0", "0"));
/// topology.add_component(Component::new("mysql", "mysql").with_position("400", "0"));
/// topology.add_relation(Relation::new(
///     "wordpress:db".parse().unwrap(),
///     "mysql:db".parse().unwrap(),
/// ));
///
/// let renderer = TopologyRenderer::new(RenderConfig::default());
/// let icon_url = |locator: &str| format!("https://icons.example/{locator}.svg");
///
/// let svg = renderer
///     .render_svg(&topology, &icon_url, None)
///     .expect("Failed to render");
/// assert!(svg.contains(r#"id="wordpress""#));
/// ```
#[derive(Debug, Default)]
pub struct TopologyRenderer {
    config: RenderConfig,
}

impl TopologyRenderer {
    /// Create a new renderer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout and style settings
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this renderer.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the SVG document of a topology.
    ///
    /// Stages run in a fixed order: icon fetch, position resolution, canvas
    /// sizing, relation geometry, icon resolution and assembly.
    ///
    /// # Arguments
    ///
    /// * `topology` - A validated topology
    /// * `icon_url` - Maps an icon locator to the URL it is served from
    /// * `fetcher` - Optional source of icon content, called exactly once
    ///
    /// # Errors
    ///
    /// Returns `TopographError` for a fetch failure, an invalid position, an
    /// unusable fetched icon, a relation to an unknown component or an invalid
    /// style value. No document is produced in any of these cases.
    pub fn build_document(
        &self,
        topology: &Topology,
        icon_url: &dyn Fn(&str) -> String,
        fetcher: Option<&dyn IconFetcher>,
    ) -> Result<svg::Document, TopographError> {
        info!(
            components = topology.len(),
            relations = topology.relations().len();
            "Rendering topology"
        );

        let assembler = SvgAssembler::new(&self.config)?;
        let layout_config = self.config.layout();

        // The fetcher runs before anything else, even on an invalid topology.
        let fetched = icon::fetch(topology, fetcher)?;
        export::svg::check_component_ids(topology)?;

        let positions = layout::resolve_positions(topology, layout_config)?;
        debug!(positions = positions.len(); "Positions resolved");

        let canvas = Canvas::fit(
            positions.points(),
            layout_config.footprint(),
            layout_config.canvas_padding(),
        );
        let positions = translate_positions(&positions, &canvas);

        let relations = topology
            .relations()
            .iter()
            .map(|relation| -> Result<RelationSegment, TopographError> {
                let (a, b) = relation.endpoints();
                let position = |name: &str| {
                    positions.get(name).ok_or_else(|| {
                        TopographError::InvalidTopology(format!(
                            "relation `{a} {b}` names unknown component `{name}`"
                        ))
                    })
                };
                Ok(layout::relation_segment(
                    position(a.component())?,
                    position(b.component())?,
                    layout_config.footprint(),
                    layout_config.relation_anchor(),
                    self.config.style().indicator_diameter(),
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(relations = relations.len(); "Relation geometry computed");

        let icons = icon::resolve_icons(topology, icon_url, fetched.as_ref())?;
        trace!(icons:?; "Icons resolved");

        let document = assembler.assemble(&Scene {
            canvas,
            positions: &positions,
            relations: &relations,
            icons: &icons,
        });

        info!(width = canvas.width(), height = canvas.height(); "Topology rendered");
        Ok(document)
    }

    /// Render a topology to an SVG string.
    ///
    /// See [`build_document`](Self::build_document) for the arguments and errors.
    pub fn render_svg(
        &self,
        topology: &Topology,
        icon_url: &dyn Fn(&str) -> String,
        fetcher: Option<&dyn IconFetcher>,
    ) -> Result<String, TopographError> {
        self.build_document(topology, icon_url, fetcher)
            .map(|document| document.to_string())
    }
}

/// Moves every position into canvas coordinates.
fn translate_positions(positions: &ResolvedPositions, canvas: &Canvas) -> ResolvedPositions {
    positions
        .iter()
        .map(|(name, point)| (name.to_string(), canvas.translate(point)))
        .collect()
}
