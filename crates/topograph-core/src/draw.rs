//! SVG drawing definitions for topology diagrams.
//!
//! These types carry styling and grouping only. Geometry is computed by the
//! renderer and handed in as [`Point`](crate::geometry::Point)s.

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::LabelStyle;
