//! Layer-based grouping of SVG output.
//!
//! A diagram body is a fixed sequence of named groups: relation lines are
//! drawn first, service blocks on top of them. Drawing code pushes nodes into
//! a [`LayeredOutput`] tagged with their [`RenderLayer`], in any order, and
//! [`LayeredOutput::render`] emits one `<g id="…">` per layer in layer order.
//!
//! # Example
//!
//! ```
//! # use topograph_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Use};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Services, Box::new(Use::new()));
//! output.add_to_layer(RenderLayer::Relations, Box::new(Line::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().starts_with(r#"<g id="relations">"#));
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// The body layers of a topology diagram, bottom to top.
///
/// The `Ord` derive uses declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Relation lines and their status indicators
    Relations,
    /// Service blocks, icons and labels
    Services,
}

impl RenderLayer {
    /// Every layer in rendering order.
    pub const ALL: [RenderLayer; 2] = [Self::Relations, Self::Services];

    /// The `id` of the group emitted for this layer.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Relations => "relations",
            Self::Services => "services",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes of the same layer keep the order in which they were added.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends all nodes of `other` after the nodes already collected.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders one group per layer, consuming the output.
    ///
    /// Every layer produces a group, even an empty one, so the document
    /// structure does not depend on the topology.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order within a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut items = self.items.into_iter().peekable();
        let mut groups: Vec<SvgNode> = Vec::with_capacity(RenderLayer::ALL.len());

        for layer in RenderLayer::ALL {
            let mut group = svg_element::Group::new().set("id", layer.id());
            while let Some((_, node)) = items.next_if(|(item_layer, _)| *item_layer == layer) {
                group = group.add(node);
            }
            groups.push(Box::new(group));
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Use};

    use super::*;

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
    }

    #[test]
    fn test_layered_output_add_to_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Services, Box::new(Use::new()));
        assert!(!output.is_empty());
    }

    #[test]
    fn test_layered_output_renders_empty_layers() {
        let groups = LayeredOutput::new().render();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].to_string(), r#"<g id="relations"/>"#);
        assert_eq!(groups[1].to_string(), r#"<g id="services"/>"#);
    }

    #[test]
    fn test_layered_output_orders_layers() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Services, Box::new(Use::new().set("id", "a")));
        output.add_to_layer(RenderLayer::Relations, Box::new(Line::new().set("x1", 1)));
        output.add_to_layer(RenderLayer::Services, Box::new(Use::new().set("id", "b")));

        let rendered: String = output.render().iter().map(|n| n.to_string()).collect();

        let relations = rendered.find(r#"<g id="relations">"#).unwrap();
        let services = rendered.find(r#"<g id="services">"#).unwrap();
        assert!(relations < services);

        // Insertion order is kept within a layer.
        let a = rendered.find(r#"id="a""#).unwrap();
        let b = rendered.find(r#"id="b""#).unwrap();
        assert!(services < a && a < b);
    }

    #[test]
    fn test_layered_output_merge() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Relations, Box::new(Line::new()));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Services, Box::new(Use::new()));

        first.merge(second);
        let groups = first.render();
        assert_eq!(groups.len(), 2);
        assert!(groups[1].to_string().contains("<use"));
    }

    #[test]
    fn test_render_layer_ids() {
        assert_eq!(RenderLayer::Relations.id(), "relations");
        assert_eq!(RenderLayer::Services.id(), "services");
        assert!(RenderLayer::Relations < RenderLayer::Services);
    }
}
