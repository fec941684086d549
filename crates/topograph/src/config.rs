//! Configuration types for Topograph rendering.
//!
//! This module provides configuration structures that control how topologies
//! are laid out and styled. All types implement [`serde::Deserialize`] and
//! every field has a default, so partial documents load.
//!
//! # Overview
//!
//! - [`RenderConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Block geometry, auto-placement and relation anchoring.
//! - [`StyleConfig`] - Fonts, colors and stroke widths.
//!
//! # Example
//!
//! ```
//! # use topograph::config::{Placement, RenderConfig};
//! let config = RenderConfig::default();
//! assert_eq!(config.layout().block_size(), 189.0);
//! assert_eq!(config.layout().placement(), Placement::GridScan);
//! assert!(config.style().relation_color().is_ok());
//! ```

use serde::Deserialize;

use topograph_core::{color::Color, geometry::Size};

/// Top-level render configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Policy used to position components that declare no coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Nearest free cell of a uniform grid, scanned outward from the placed region.
    #[default]
    GridScan,
    /// A single column to the right of and below every placed component.
    Column,
}

/// Which points of two service blocks a relation line connects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationAnchor {
    /// The centers of both blocks.
    #[default]
    Center,
    /// The closest pair of side midpoints.
    NearestEdge,
}

/// Geometry of service blocks and placement settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    block_size: f32,
    icon_size: f32,
    label_baseline: f32,
    placement_margin: f32,
    canvas_padding: f32,
    placement: Placement,
    relation_anchor: RelationAnchor,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            block_size: 189.0,
            icon_size: 96.0,
            label_baseline: 31.0,
            placement_margin: 50.0,
            canvas_padding: 0.0,
            placement: Placement::default(),
            relation_anchor: RelationAnchor::default(),
        }
    }
}

impl LayoutConfig {
    /// Sets the auto-placement policy (builder style).
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the relation anchor (builder style).
    pub fn with_relation_anchor(mut self, relation_anchor: RelationAnchor) -> Self {
        self.relation_anchor = relation_anchor;
        self
    }

    /// Sets the padding added on every side of the canvas (builder style).
    pub fn with_canvas_padding(mut self, canvas_padding: f32) -> Self {
        self.canvas_padding = canvas_padding;
        self
    }

    /// Side length of the square service block.
    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// The service block as a [`Size`].
    pub fn footprint(&self) -> Size {
        Size::square(self.block_size)
    }

    /// Side length of the square icon drawn inside the block.
    pub fn icon_size(&self) -> f32 {
        self.icon_size
    }

    /// Distance from the block top to the label baseline.
    pub fn label_baseline(&self) -> f32 {
        self.label_baseline
    }

    /// Free space kept around auto-placed blocks.
    pub fn placement_margin(&self) -> f32 {
        self.placement_margin
    }

    pub fn canvas_padding(&self) -> f32 {
        self.canvas_padding
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn relation_anchor(&self) -> RelationAnchor {
        self.relation_anchor
    }
}

/// Visual styling configuration for rendered topologies.
///
/// Colors are kept as strings and parsed on access.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    label_font_size: u16,
    label_color: String,
    relation_color: String,
    relation_width: f32,
    indicator_diameter: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Ubuntu, sans-serif".to_string(),
            label_font_size: 18,
            label_color: "#505050".to_string(),
            relation_color: "#38B44A".to_string(),
            relation_width: 2.0,
            indicator_diameter: 20.0,
        }
    }
}

impl StyleConfig {
    /// Font family applied to the whole document.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn label_font_size(&self) -> u16 {
        self.label_font_size
    }

    /// Returns the parsed label [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn label_color(&self) -> Result<Color, String> {
        Color::new(&self.label_color).map_err(|err| format!("Invalid label color in config: {err}"))
    }

    /// Returns the parsed relation line [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn relation_color(&self) -> Result<Color, String> {
        Color::new(&self.relation_color)
            .map_err(|err| format!("Invalid relation color in config: {err}"))
    }

    pub fn relation_width(&self) -> f32 {
        self.relation_width
    }

    /// Diameter of the status indicator, which is also the gap left in the line.
    pub fn indicator_diameter(&self) -> f32 {
        self.indicator_diameter
    }
}
