//! Canvas sizing and normalization.

use log::debug;

use topograph_core::geometry::{Insets, Point, Size};

/// Final drawing area of a render.
///
/// `offset` is added to every resolved position and relation endpoint so that
/// the content starts at `(padding, padding)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    size: Size,
    offset: Point,
}

impl Canvas {
    /// Fits a canvas around the footprints at `positions`.
    ///
    /// Width and height are the extent of the union of all footprints plus
    /// `padding` on every side. With no positions the canvas is a
    /// `2·padding` square with a zero offset.
    pub fn fit(positions: impl IntoIterator<Item = Point>, footprint: Size, padding: f32) -> Self {
        let content = positions
            .into_iter()
            .map(|point| point.to_bounds(footprint))
            .reduce(|acc, bounds| acc.merge(&bounds));

        let Some(content) = content else {
            return Self {
                size: Size::square(2.0 * padding),
                offset: Point::default(),
            };
        };

        let padded = content.add_padding(Insets::uniform(padding));
        let canvas = Self {
            size: padded.to_size(),
            offset: Point::default().sub_point(padded.min_point()),
        };

        debug!(
            width = canvas.width(),
            height = canvas.height(),
            offset_x = canvas.offset.x(),
            offset_y = canvas.offset.y();
            "Canvas sized"
        );
        canvas
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// Translation applied to every position.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Moves `point` into canvas coordinates.
    pub fn translate(&self, point: Point) -> Point {
        point.add_point(self.offset)
    }
}
