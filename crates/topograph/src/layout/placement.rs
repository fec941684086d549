//! Auto-placement policies for components without declared coordinates.
//!
//! Each policy implements [`PlacementStrategy`] and is selected by the
//! [`Placement`] configuration value. Policies see only the positions already
//! taken, never names or relations, and must be deterministic.

use log::trace;

use topograph_core::geometry::{Bounds, Insets, Point, Size};

use crate::config::{LayoutConfig, Placement};

/// Trait defining the interface for auto-placement policies.
pub trait PlacementStrategy {
    /// Computes `count` new top-left positions.
    ///
    /// - `placed`: top-left corners of every component with declared
    ///   coordinates. These never move.
    ///
    /// The returned positions are assigned, in order, to the unplaced
    /// components in lexical order of their names.
    fn place(&self, placed: &[Point], count: usize) -> Vec<Point>;
}

impl Placement {
    /// Builds the strategy configured by `layout`.
    pub fn strategy(self, layout: &LayoutConfig) -> Box<dyn PlacementStrategy> {
        match self {
            Self::GridScan => Box::new(GridScan::new(
                layout.footprint(),
                layout.placement_margin(),
            )),
            Self::Column => Box::new(Column::new(layout.block_size())),
        }
    }
}

/// Nearest-free-cell placement on a uniform grid.
///
/// The grid cell is the footprint plus the margin on each axis, anchored at
/// the top-left corner of the region occupied by placed components (or the
/// origin). Cells are scanned in Chebyshev rings around the anchor. Inside a
/// ring, cells closer to the center of the occupied region come first; ties
/// are broken by row, then column.
///
/// A cell is rejected when its footprint, grown by the margin, overlaps any
/// occupied footprint, so no two footprints ever overlap.
#[derive(Debug, Clone, Copy)]
pub struct GridScan {
    footprint: Size,
    margin: f32,
}

impl GridScan {
    pub fn new(footprint: Size, margin: f32) -> Self {
        Self { footprint, margin }
    }

    fn cell_size(&self) -> Size {
        Size::new(
            self.footprint.width() + self.margin,
            self.footprint.height() + self.margin,
        )
    }

    fn is_free(&self, candidate: Point, occupied: &[Bounds]) -> bool {
        let grown = candidate
            .to_bounds(self.footprint)
            .add_padding(Insets::uniform(self.margin));
        !occupied.iter().any(|bounds| grown.overlaps(bounds))
    }

    /// Cells of ring `ring`, nearest to `center` first.
    fn ring(&self, anchor: Point, ring: i32, center: Point) -> Vec<(i32, i32, Point)> {
        let cell = self.cell_size();
        let half = self.footprint.center_offset();

        let mut cells: Vec<(f32, i32, i32, Point)> = Vec::new();
        for row in -ring..=ring {
            for col in -ring..=ring {
                if col.abs().max(row.abs()) != ring {
                    continue;
                }
                let origin = anchor.add_point(Point::new(
                    col as f32 * cell.width(),
                    row as f32 * cell.height(),
                ));
                let distance = origin.add_point(half).sub_point(center);
                let squared = distance.x() * distance.x() + distance.y() * distance.y();
                cells.push((squared, row, col, origin));
            }
        }

        cells.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });

        cells
            .into_iter()
            .map(|(_, row, col, origin)| (row, col, origin))
            .collect()
    }

    fn next_free(&self, anchor: Point, occupied: &[Bounds]) -> Point {
        let center = occupied
            .iter()
            .copied()
            .reduce(|acc, bounds| acc.merge(&bounds))
            .map_or(anchor, Bounds::center);

        // Occupied space is finite, so some ring is always entirely free.
        let mut ring = 0;
        loop {
            for (row, col, origin) in self.ring(anchor, ring, center) {
                if self.is_free(origin, occupied) {
                    trace!(ring, row, col, x = origin.x(), y = origin.y(); "Grid cell selected");
                    return origin;
                }
            }
            ring += 1;
        }
    }
}

impl PlacementStrategy for GridScan {
    fn place(&self, placed: &[Point], count: usize) -> Vec<Point> {
        let anchor = placed
            .iter()
            .copied()
            .reduce(|acc, point| Point::new(acc.x().min(point.x()), acc.y().min(point.y())))
            .unwrap_or_default();

        let mut occupied: Vec<Bounds> = placed
            .iter()
            .map(|point| point.to_bounds(self.footprint))
            .collect();

        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            let position = self.next_free(anchor, &occupied);
            occupied.push(position.to_bounds(self.footprint));
            positions.push(position);
        }
        positions
    }
}

/// Column placement to the lower right of the placed components.
///
/// The first component goes to `(maxX + 1.5·block, maxY + 0.5·block)`, where
/// the maxima are taken over placed top-left corners (zero when nothing is
/// placed). Each further component sits `1.5·block` below the previous one.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    block_size: f32,
}

impl Column {
    pub fn new(block_size: f32) -> Self {
        Self { block_size }
    }
}

impl PlacementStrategy for Column {
    fn place(&self, placed: &[Point], count: usize) -> Vec<Point> {
        let max = placed
            .iter()
            .copied()
            .reduce(|acc, point| Point::new(acc.x().max(point.x()), acc.y().max(point.y())))
            .unwrap_or_default();

        let x = max.x() + 1.5 * self.block_size;
        let top = max.y() + 0.5 * self.block_size;

        (0..count)
            .map(|index| Point::new(x, top + index as f32 * 1.5 * self.block_size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    const BLOCK: f32 = 189.0;
    const MARGIN: f32 = 50.0;

    fn grid() -> GridScan {
        GridScan::new(Size::square(BLOCK), MARGIN)
    }

    fn assert_disjoint(positions: &[Point]) {
        let footprint = Size::square(BLOCK);
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(
                    !a.to_bounds(footprint).overlaps(&b.to_bounds(footprint)),
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_grid_scan_empty_starts_at_origin() {
        let positions = grid().place(&[], 2);

        assert_eq!(positions[0], Point::new(0.0, 0.0));
        // Four neighbors tie on distance; the lowest row wins.
        assert_eq!(positions[1], Point::new(0.0, -(BLOCK + MARGIN)));
    }

    #[test]
    fn test_grid_scan_avoids_placed_components() {
        let placed = [
            Point::new(323.0, 0.0),
            Point::new(0.0, 257.5),
            Point::new(450.0, 276.5),
        ];

        let positions = grid().place(&placed, 3);
        assert_eq!(positions.len(), 3);

        let mut all = placed.to_vec();
        all.extend(&positions);
        assert_disjoint(&all);
    }

    #[test]
    fn test_grid_scan_is_deterministic() {
        let placed = [Point::new(10.0, 10.0), Point::new(300.0, 40.0)];
        assert_eq!(grid().place(&placed, 4), grid().place(&placed, 4));
    }

    #[test]
    fn test_grid_scan_zero_count() {
        assert!(grid().place(&[Point::new(1.0, 2.0)], 0).is_empty());
    }

    #[test]
    fn test_column_below_and_right_of_placed() {
        let placed = [Point::new(0.0, 0.0), Point::new(544.0, 113.5)];
        let positions = Column::new(BLOCK).place(&placed, 2);

        assert_approx_eq!(f32, positions[0].x(), 544.0 + 283.5);
        assert_approx_eq!(f32, positions[0].y(), 113.5 + 94.5);
        assert_approx_eq!(f32, positions[1].x(), positions[0].x());
        assert_approx_eq!(f32, positions[1].y(), positions[0].y() + 283.5);
    }

    #[test]
    fn test_column_without_placed_components() {
        let positions = Column::new(BLOCK).place(&[], 1);
        assert_eq!(positions, [Point::new(283.5, 94.5)]);
    }

    #[test]
    fn test_strategy_from_config() {
        let layout = LayoutConfig::default();
        let placed = [Point::new(0.0, 0.0)];

        let grid = Placement::GridScan.strategy(&layout).place(&placed, 1);
        let column = Placement::Column.strategy(&layout).place(&placed, 1);

        assert_eq!(grid, GridScan::new(Size::square(BLOCK), MARGIN).place(&placed, 1));
        assert_eq!(column, [Point::new(283.5, 94.5)]);
    }

    proptest! {
        #[test]
        fn prop_grid_scan_never_overlaps(
            raw in prop::collection::vec((-800i32..800, -800i32..800), 0..6),
            count in 1usize..8,
        ) {
            let placed: Vec<Point> = raw
                .iter()
                .map(|&(x, y)| Point::new(x as f32, y as f32))
                .collect();

            let positions = grid().place(&placed, count);
            prop_assert_eq!(positions.len(), count);

            let footprint = Size::square(BLOCK);
            for (i, new) in positions.iter().enumerate() {
                let bounds = new.to_bounds(footprint);
                for old in &placed {
                    prop_assert!(!bounds.overlaps(&old.to_bounds(footprint)));
                }
                for other in &positions[i + 1..] {
                    prop_assert!(!bounds.overlaps(&other.to_bounds(footprint)));
                }
            }
        }
    }
}
