//! Relation line geometry.
//!
//! A relation is drawn as a straight line between two service blocks with a
//! two-value dash pattern `dash, gap`: one dash, the gap, then the second
//! dash. The gap equals the status indicator diameter and is centered on the
//! midpoint, where the indicator is drawn.

use log::{trace, warn};

use topograph_core::{
    draw::StrokeStyle,
    geometry::{Point, Size},
};

use crate::config::RelationAnchor;

/// Geometry of one relation line in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationSegment {
    start: Point,
    end: Point,
    dash: f32,
    gap: f32,
    degenerate: bool,
}

impl RelationSegment {
    /// Computes the dash pattern and indicator placement for a line from
    /// `start` to `end`.
    ///
    /// When the line is shorter than the indicator the dash length is clamped
    /// to zero and the segment is flagged as degenerate.
    pub fn between(start: Point, end: Point, indicator_diameter: f32) -> Self {
        let length = start.distance(end);
        let degenerate = length < indicator_diameter;

        if degenerate {
            warn!(
                length,
                indicator_diameter;
                "Relation line is shorter than its status indicator"
            );
        }

        Self {
            start,
            end,
            dash: ((length - indicator_diameter) / 2.0).max(0.0),
            gap: indicator_diameter,
            degenerate,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Euclidean length of the line.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Length of each of the two dashes.
    pub fn dash(&self) -> f32 {
        self.dash
    }

    /// Length of the gap around the midpoint.
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Midpoint of the line, where the indicator is centered.
    pub fn indicator_center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Top-left corner of the indicator.
    pub fn indicator_origin(&self) -> Point {
        let radius = self.gap / 2.0;
        self.indicator_center().sub_point(Point::new(radius, radius))
    }

    /// Returns true when the line is shorter than the indicator.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// The dash pattern of the line.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::DashGap {
            dash: self.dash,
            gap: self.gap,
        }
    }
}

/// Connector distances closer than this are treated as equal.
const TIE_TOLERANCE: f32 = 1e-3;

/// The four connectors of a block: midpoints of its top, right, bottom and left sides.
fn connectors(position: Point, footprint: Size) -> [Point; 4] {
    let bounds = position.to_bounds(footprint);
    let center = bounds.center();
    [
        Point::new(center.x(), bounds.min_y()),
        Point::new(bounds.max_x(), center.y()),
        Point::new(center.x(), bounds.max_y()),
        Point::new(bounds.min_x(), center.y()),
    ]
}

/// Picks the points of two blocks that a relation line connects.
///
/// `a` and `b` are the top-left corners of the blocks.
pub fn anchor_points(a: Point, b: Point, footprint: Size, anchor: RelationAnchor) -> (Point, Point) {
    match anchor {
        RelationAnchor::Center => {
            let half = footprint.center_offset();
            (a.add_point(half), b.add_point(half))
        }
        RelationAnchor::NearestEdge => {
            let mut best = (a, b);
            let mut best_distance = f32::INFINITY;
            for from in connectors(a, footprint) {
                for to in connectors(b, footprint) {
                    let distance = from.distance(to);
                    // Distances within rounding error tie; the earlier pair wins.
                    if distance + TIE_TOLERANCE < best_distance {
                        best = (from, to);
                        best_distance = distance;
                    }
                }
            }
            best
        }
    }
}

/// Computes the segment of a relation between blocks at `a` and `b`.
pub fn relation_segment(
    a: Point,
    b: Point,
    footprint: Size,
    anchor: RelationAnchor,
    indicator_diameter: f32,
) -> RelationSegment {
    let (start, end) = anchor_points(a, b, footprint, anchor);
    let segment = RelationSegment::between(start, end, indicator_diameter);
    trace!(segment:?; "Relation segment");
    segment
}
