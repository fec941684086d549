//! Resolution of raw position annotations into final coordinates.

use std::collections::BTreeMap;

use log::{debug, info};

use topograph_core::{
    geometry::Point,
    topology::{Component, Topology},
};

use crate::{config::LayoutConfig, error::TopographError};

/// The top-left corner of every component, keyed by component name.
///
/// Created once per render and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPositions {
    positions: BTreeMap<String, Point>,
}

impl ResolvedPositions {
    /// Returns the position of the named component.
    pub fn get(&self, name: &str) -> Option<Point> {
        self.positions.get(name).copied()
    }

    /// Iterates `(name, position)` pairs in lexical order by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions
            .iter()
            .map(|(name, point)| (name.as_str(), *point))
    }

    /// Iterates positions in lexical order of their component names.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.positions.values().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<(String, Point)> for ResolvedPositions {
    fn from_iter<I: IntoIterator<Item = (String, Point)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Largest accepted magnitude of a declared coordinate.
///
/// Beyond it, `f32` can no longer tell a footprint's edges apart, and
/// overlap checks on auto-placed blocks stop being reliable.
pub const MAX_COORDINATE: f32 = 1.0e6;

/// Parses the declared position of a component.
///
/// Returns `Ok(None)` for an unplaced component.
///
/// # Errors
///
/// Returns [`TopographError::InvalidPosition`] when only one coordinate is
/// present or a present coordinate is not a finite number within
/// [`MAX_COORDINATE`].
fn parse_position(component: &Component) -> Result<Option<Point>, TopographError> {
    let position = component.position();
    match (position.x(), position.y()) {
        (None, None) => Ok(None),
        (Some(x), Some(y)) => {
            let parse = |raw: &str| {
                raw.parse::<f32>()
                    .ok()
                    .filter(|value| value.is_finite() && value.abs() <= MAX_COORDINATE)
                    .ok_or_else(|| TopographError::invalid_position(component.name()))
            };
            Ok(Some(Point::new(parse(x)?, parse(y)?)))
        }
        _ => Err(TopographError::invalid_position(component.name())),
    }
}

/// Resolves the final position of every component.
///
/// Components with declared coordinates keep them unchanged. If any component
/// has none, the configured placement policy positions all of them, visiting
/// them in lexical order by name.
///
/// # Errors
///
/// Fails fast with [`TopographError::InvalidPosition`] on the first component
/// (in lexical order) whose annotations are invalid.
pub fn resolve_positions(
    topology: &Topology,
    layout: &LayoutConfig,
) -> Result<ResolvedPositions, TopographError> {
    let mut positions = BTreeMap::new();
    let mut unplaced = Vec::new();

    for component in topology.components() {
        match parse_position(component)? {
            Some(point) => {
                debug!(component = component.name(), x = point.x(), y = point.y(); "Declared position");
                positions.insert(component.name().to_string(), point);
            }
            None => unplaced.push(component.name()),
        }
    }

    if !unplaced.is_empty() {
        info!(
            unplaced = unplaced.len(),
            placement:? = layout.placement();
            "Auto-placing components"
        );

        let placed: Vec<Point> = positions.values().copied().collect();
        let strategy = layout.placement().strategy(layout);
        let computed = strategy.place(&placed, unplaced.len());

        for (name, point) in unplaced.into_iter().zip(computed) {
            debug!(component = name, x = point.x(), y = point.y(); "Auto-placed position");
            positions.insert(name.to_string(), point);
        }
    }

    Ok(ResolvedPositions { positions })
}
