//! Geometry of a rendered topology.
//!
//! Layout runs in three steps, each a pure function of its inputs:
//!
//! 1. [`position::resolve_positions`] parses declared coordinates and places
//!    every component without one, through a [`placement::PlacementStrategy`].
//! 2. [`canvas::Canvas::fit`] sizes the canvas around every footprint and
//!    computes the translation into non-negative coordinates.
//! 3. [`relation::relation_segment`] turns each relation into a line with a
//!    centered status-indicator gap.

pub mod canvas;
pub mod placement;
pub mod position;
pub mod relation;

pub use canvas::Canvas;
pub use placement::{Column, GridScan, PlacementStrategy};
pub use position::{ResolvedPositions, resolve_positions};
pub use relation::{RelationSegment, relation_segment};
