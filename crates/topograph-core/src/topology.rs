//! The in-memory application topology consumed by the renderer.
//!
//! A [`Topology`] is a set of uniquely named [`Component`]s and a list of
//! [`Relation`]s between them. It is assumed to be validated already: every
//! relation endpoint names an existing component.
//!
//! Positions are kept exactly as declared, as raw strings in a
//! [`RawPosition`]. Interpreting them (and placing components that have none)
//! is the renderer's job.
//!
//! # Example
//!
//! ```
//! use topograph_core::topology::{Component, Relation, Topology};
//!
//! let mut topology = Topology::new();
//! topology.add_component(Component::new("wordpress", "cs:wordpress").with_position("10", "20"));
//! topology.add_component(Component::new("mysql", "cs:mysql"));
//! topology.add_relation(Relation::new("wordpress:db".parse().unwrap(), "mysql".parse().unwrap()));
//!
//! let names: Vec<_> = topology.components().map(|c| c.name()).collect();
//! assert_eq!(names, ["mysql", "wordpress"]);
//! ```

use std::{collections::BTreeMap, fmt, str::FromStr};

use log::debug;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// The two raw coordinate annotations of a component.
///
/// Fields that are missing, empty or whitespace-only are reported as absent
/// by [`x`](Self::x) and [`y`](Self::y).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPosition {
    x: Option<String>,
    y: Option<String>,
}

impl RawPosition {
    /// Creates a raw position from optional coordinate strings.
    pub fn new(x: Option<&str>, y: Option<&str>) -> Self {
        Self {
            x: x.map(str::to_string),
            y: y.map(str::to_string),
        }
    }

    /// A position with both fields absent.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Returns the raw x annotation, if present.
    pub fn x(&self) -> Option<&str> {
        present(self.x.as_deref())
    }

    /// Returns the raw y annotation, if present.
    pub fn y(&self) -> Option<&str> {
        present(self.y.as_deref())
    }

    /// Returns true when neither field is present.
    pub fn is_unset(&self) -> bool {
        self.x().is_none() && self.y().is_none()
    }
}

fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|value| !value.is_empty())
}

/// A named node of the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    icon: String,
    position: RawPosition,
    units: u32,
    exposed: bool,
}

impl Component {
    /// Creates a component with no position annotations.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name within the topology.
    /// * `icon` - Opaque icon locator, later mapped to a URL by the caller.
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            position: RawPosition::default(),
            units: 1,
            exposed: false,
        }
    }

    /// Sets both raw position annotations (builder style).
    pub fn with_position(mut self, x: &str, y: &str) -> Self {
        self.position = RawPosition::new(Some(x), Some(y));
        self
    }

    /// Sets the raw position (builder style).
    pub fn with_raw_position(mut self, position: RawPosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the unit count (builder style).
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Sets the exposure flag (builder style).
    pub fn with_exposed(mut self, exposed: bool) -> Self {
        self.exposed = exposed;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn position(&self) -> &RawPosition {
        &self.position
    }

    /// Replaces the raw position annotations.
    pub fn set_position(&mut self, position: RawPosition) {
        self.position = position;
    }

    /// Number of units. Carried through, never used for rendering.
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Whether the component is exposed. Carried through, never used for rendering.
    pub fn exposed(&self) -> bool {
        self.exposed
    }
}

/// Error returned when an endpoint string has no component name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid relation endpoint `{0}`")]
pub struct EndpointParseError(String);

/// One side of a relation: a component name and an optional endpoint label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    component: String,
    label: Option<String>,
}

impl Endpoint {
    pub fn new(component: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            component: component.into(),
            label: label.map(str::to_string),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    /// Parses `"component"` or `"component:label"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (component, label) = match s.split_once(':') {
            Some((component, label)) => (component.trim(), Some(label.trim())),
            None => (s.trim(), None),
        };

        if component.is_empty() {
            return Err(EndpointParseError(s.to_string()));
        }

        Ok(Self::new(component, label.filter(|label| !label.is_empty())))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}:{label}", self.component),
            None => write!(f, "{}", self.component),
        }
    }
}

/// An unordered pair of endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    a: Endpoint,
    b: Endpoint,
}

impl Relation {
    pub fn new(a: Endpoint, b: Endpoint) -> Self {
        Self { a, b }
    }

    /// Returns both endpoints in declaration order.
    pub fn endpoints(&self) -> (&Endpoint, &Endpoint) {
        (&self.a, &self.b)
    }
}

/// A validated application topology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    components: BTreeMap<String, Component>,
    relations: Vec<Relation>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component, replacing any previous component with the same name.
    pub fn add_component(&mut self, component: Component) {
        if let Some(previous) = self
            .components
            .insert(component.name().to_string(), component)
        {
            debug!(component = previous.name(); "Replaced component with the same name");
        }
    }

    /// Appends a relation. Relations keep their insertion order.
    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Iterates components in lexical order by name.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.get_mut(name)
    }

    /// Relations in input order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

/// Coordinates may be written as strings or as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Text(String),
    Number(f64),
}

fn raw_coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawCoordinate>::deserialize(deserializer)?.map(|coordinate| match coordinate {
            RawCoordinate::Text(text) => text,
            RawCoordinate::Number(number) => number.to_string(),
        }),
    )
}

fn default_units() -> u32 {
    1
}

#[derive(Deserialize)]
struct ComponentDocument {
    icon: String,
    #[serde(default, deserialize_with = "raw_coordinate")]
    x: Option<String>,
    #[serde(default, deserialize_with = "raw_coordinate")]
    y: Option<String>,
    #[serde(default = "default_units")]
    units: u32,
    #[serde(default)]
    exposed: bool,
}

#[derive(Deserialize)]
struct TopologyDocument {
    #[serde(default)]
    components: BTreeMap<String, ComponentDocument>,
    #[serde(default)]
    relations: Vec<[String; 2]>,
}

impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = TopologyDocument::deserialize(deserializer)?;
        let mut topology = Topology::new();

        for (name, spec) in document.components {
            topology.add_component(Component {
                name,
                icon: spec.icon,
                position: RawPosition {
                    x: spec.x,
                    y: spec.y,
                },
                units: spec.units,
                exposed: spec.exposed,
            });
        }

        for [a, b] in document.relations {
            let a = a.parse().map_err(serde::de::Error::custom)?;
            let b = b.parse().map_err(serde::de::Error::custom)?;
            topology.add_relation(Relation::new(a, b));
        }

        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_position_presence() {
        assert!(RawPosition::unset().is_unset());
        assert!(RawPosition::new(Some(""), Some("  ")).is_unset());

        let half = RawPosition::new(Some("10"), None);
        assert!(!half.is_unset());
        assert_eq!(half.x(), Some("10"));
        assert_eq!(half.y(), None);

        let padded = RawPosition::new(Some(" 940.5 "), Some("388.7"));
        assert_eq!(padded.x(), Some("940.5"));
    }

    #[test]
    fn test_component_builder() {
        let component = Component::new("mongodb", "cs:precise/mongodb-21")
            .with_position("940.5", "388.7")
            .with_units(3)
            .with_exposed(true);

        assert_eq!(component.name(), "mongodb");
        assert_eq!(component.icon(), "cs:precise/mongodb-21");
        assert_eq!(component.position().x(), Some("940.5"));
        assert_eq!(component.units(), 3);
        assert!(component.exposed());
    }

    #[test]
    fn test_endpoint_from_str() {
        let endpoint: Endpoint = "charmworld:essearch".parse().unwrap();
        assert_eq!(endpoint.component(), "charmworld");
        assert_eq!(endpoint.label(), Some("essearch"));
        assert_eq!(endpoint.to_string(), "charmworld:essearch");

        let bare: Endpoint = "mongodb".parse().unwrap();
        assert_eq!(bare.component(), "mongodb");
        assert_eq!(bare.label(), None);

        let empty_label: Endpoint = "mongodb:".parse().unwrap();
        assert_eq!(empty_label.label(), None);

        assert!(":database".parse::<Endpoint>().is_err());
        assert!("".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_topology_orders_components_by_name() {
        let mut topology = Topology::new();
        topology.add_component(Component::new("mongodb", "mongo"));
        topology.add_component(Component::new("charmworld", "cw"));
        topology.add_component(Component::new("elasticsearch", "es"));

        let names: Vec<_> = topology.components().map(Component::name).collect();
        assert_eq!(names, ["charmworld", "elasticsearch", "mongodb"]);
        assert_eq!(topology.len(), 3);
        assert!(!topology.is_empty());
    }

    #[test]
    fn test_topology_component_mut() {
        let mut topology = Topology::new();
        topology.add_component(Component::new("mysql", "mysql").with_position("1", "2"));

        topology
            .component_mut("mysql")
            .unwrap()
            .set_position(RawPosition::new(Some(""), Some("")));

        assert!(topology.component("mysql").unwrap().position().is_unset());
        assert!(topology.component("missing").is_none());
    }

    #[test]
    fn test_topology_deserialize() {
        let source = r#"
            relations = [
                ["charmworld:essearch", "elasticsearch:essearch"],
                ["charmworld:database", "mongodb:database"],
            ]

            [components.mongodb]
            icon = "cs:precise/mongodb-21"
            x = "940.5"
            y = 388.75

            [components.charmworld]
            icon = "cs:~juju-jitsu/precise/charmworld-58"
            exposed = true

            [components.elasticsearch]
            icon = "cs:~charming-devs/precise/elasticsearch-2"
            x = ""
            y = ""
            units = 2
        "#;

        let topology: Topology = toml::from_str(source).unwrap();

        let mongodb = topology.component("mongodb").unwrap();
        assert_eq!(mongodb.position().x(), Some("940.5"));
        assert_eq!(mongodb.position().y(), Some("388.75"));
        assert_eq!(mongodb.units(), 1);

        let charmworld = topology.component("charmworld").unwrap();
        assert!(charmworld.position().is_unset());
        assert!(charmworld.exposed());

        let elasticsearch = topology.component("elasticsearch").unwrap();
        assert!(elasticsearch.position().is_unset());
        assert_eq!(elasticsearch.units(), 2);

        assert_eq!(topology.relations().len(), 2);
        let (a, b) = topology.relations()[0].endpoints();
        assert_eq!(a.component(), "charmworld");
        assert_eq!(b.label(), Some("essearch"));
    }

    #[test]
    fn test_topology_deserialize_rejects_bad_endpoint() {
        let source = r#"
            relations = [[":nothing", "mongodb"]]

            [components.mongodb]
            icon = "mongo"
        "#;

        let result: Result<Topology, _> = toml::from_str(source);
        assert!(result.is_err());
    }
}
