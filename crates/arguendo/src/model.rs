//! The authoritative diagram model: nodes, edges, and their container.
//!
//! [`DiagramModel`] owns the node and edge collections and is the single
//! source of truth for the diagram. Visual layers hold only derived,
//! disposable sprites keyed by id; anything on screen must be derivable from
//! this model.
//!
//! # Referential integrity
//!
//! Node and edge ids are unique within the model. Edge endpoints are
//! deliberately *not* validated on insertion: template and document loaders
//! may add an edge before both of its endpoints exist. An edge whose source
//! or target is absent at render time is a *dangling edge* — it stays in the
//! model, produces no visual, and must never crash the renderer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use arguendo_core::{
    color::Color,
    geometry::{Point, Size},
    identifier::Id,
};

/// Width assumed for a node that has none recorded.
pub const DEFAULT_NODE_WIDTH: f32 = 200.0;

/// Height assumed for geometry while a node's content-determined height is
/// unresolved.
pub const FALLBACK_NODE_HEIGHT: f32 = 100.0;

/// Default position for a node created without an explicit one.
const DEFAULT_NODE_POSITION: (f32, f32) = (50.0, 50.0);

/// Errors raised by model mutations.
///
/// These are user-input-triggered conditions, not failures: callers log them
/// and keep the prior state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("a node with id `{id}` already exists")]
    DuplicateNode { id: Id },

    #[error("an edge with id `{id}` already exists")]
    DuplicateEdge { id: Id },
}

/// Semantic category of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// An ordinary argumentation step.
    #[default]
    Normal,
    /// A step concluding in favor.
    ResultPositive,
    /// A step concluding against.
    ResultNegative,
    /// A step with a partial or mixed conclusion.
    ResultPartial,
}

impl NodeKind {
    /// CSS-style class name for this kind, as used by visual surfaces.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ResultPositive => "result-positive",
            Self::ResultNegative => "result-negative",
            Self::ResultPartial => "result-partial",
        }
    }
}

/// Whether an edge's condition is met.
///
/// Serialized as the `"+"` / `"-"` tags of the persistence schema; an
/// unspecified condition is the absence of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "+")]
    Met,
    #[serde(rename = "-")]
    NotMet,
}

impl Condition {
    /// The raw tag rendered on the condition label.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Met => "+",
            Self::NotMet => "-",
        }
    }
}

/// Stroke color for an edge with the given condition.
///
/// The line and its condition label share the color so they read as one
/// semantic unit: green for met, orange for not met, gray for unspecified.
pub fn condition_stroke(condition: Option<Condition>) -> Color {
    match condition {
        Some(Condition::Met) => Color::named("green"),
        Some(Condition::NotMet) => Color::named("orange"),
        None => Color::named("gray"),
    }
}

/// A positioned, titled content box in the diagram.
///
/// The `body` is opaque markup owned by an external editor; the engine never
/// interprets it and passes it through the sanitization boundary before it
/// becomes visual text. `position` is the top-left corner in logical canvas
/// units. `height` is `None` while content-determined; geometry falls back
/// to [`FALLBACK_NODE_HEIGHT`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: Id,
    pub title: String,
    pub body: String,
    pub position: Point,
    pub width: f32,
    pub height: Option<f32>,
    pub kind: NodeKind,
}

impl Node {
    /// Creates a node with the default position, width, and kind.
    pub fn new(id: Id, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            position: Point::new(DEFAULT_NODE_POSITION.0, DEFAULT_NODE_POSITION.1),
            width: DEFAULT_NODE_WIDTH,
            height: None,
            kind: NodeKind::Normal,
        }
    }

    /// Sets the position, consuming and returning the node.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Sets the kind, consuming and returning the node.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the width, consuming and returning the node.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Effective width for geometry; a non-positive width means
    /// "unmeasured" and falls back to [`DEFAULT_NODE_WIDTH`].
    pub fn effective_width(&self) -> f32 {
        if self.width > 0.0 {
            self.width
        } else {
            DEFAULT_NODE_WIDTH
        }
    }

    /// Effective height for geometry, resolving auto height to
    /// [`FALLBACK_NODE_HEIGHT`].
    pub fn effective_height(&self) -> f32 {
        self.height.unwrap_or(FALLBACK_NODE_HEIGHT)
    }

    /// Resolved dimensions for geometry.
    pub fn size(&self) -> Size {
        Size::new(self.effective_width(), self.effective_height())
    }

    /// Geometric center of the node in canvas units.
    pub fn center(&self) -> Point {
        self.size().center_from(self.position)
    }
}

/// A directed, conditioned, probability-weighted connector between two nodes.
///
/// `probability` lives in `[0, 1]`; the default `1.0` means "certain" and is
/// suppressed from display.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: Id,
    pub source: Id,
    pub target: Id,
    pub condition: Option<Condition>,
    pub probability: f32,
}

impl Edge {
    /// Creates an unconditioned edge with probability 1.0.
    pub fn new(id: Id, source: Id, target: Id) -> Self {
        Self {
            id,
            source,
            target,
            condition: None,
            probability: 1.0,
        }
    }

    /// Sets the condition tag, consuming and returning the edge.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the probability, consuming and returning the edge.
    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = probability;
        self
    }

    /// Returns `true` if this edge starts or ends at `node_id`.
    pub fn touches(&self, node_id: Id) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Owns the authoritative node and edge collections.
///
/// Both collections preserve insertion order, which is the order visuals are
/// created in and the order persistence documents serialize.
#[derive(Debug, Default)]
pub struct DiagramModel {
    nodes: IndexMap<Id, Node>,
    edges: IndexMap<Id, Edge>,
}

impl DiagramModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node.
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateNode`] if a node with the same id
    /// already exists; the model is unchanged.
    pub fn add_node(&mut self, node: Node) -> Result<&Node, ModelError> {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(ModelError::DuplicateNode { id });
        }
        Ok(self.nodes.entry(id).or_insert(node))
    }

    /// Inserts an edge.
    ///
    /// Endpoint existence is not checked here — edges may be added before
    /// their endpoints during bulk loading. Resolution happens at render
    /// time.
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateEdge`] if an edge with the same id
    /// already exists; the model is unchanged.
    pub fn add_edge(&mut self, edge: Edge) -> Result<&Edge, ModelError> {
        let id = edge.id;
        if self.edges.contains_key(&id) {
            return Err(ModelError::DuplicateEdge { id });
        }
        Ok(self.edges.entry(id).or_insert(edge))
    }

    /// Empties both collections. No partial state is observable in between.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Returns the node with the given id, if present.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns a mutable reference to the node with the given id.
    pub fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Checks if a node with the given id exists.
    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Returns the edge with the given id, if present.
    pub fn edge(&self, id: Id) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterates over every edge whose source or target is `node_id`.
    pub fn edges_touching(&self, node_id: Id) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |edge| edge.touches(node_id))
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Replaces the node collection wholesale, keeping edges.
    ///
    /// Used by layout collaborators that rewrite every position at once.
    /// Does not render; callers must follow with a full render pass.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes.into_iter().map(|node| (node.id, node)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node::new(Id::new(id), format!("title {id}"), "<p>body</p>")
    }

    #[test]
    fn test_add_node() {
        let mut model = DiagramModel::new();
        model.add_node(node("a")).unwrap();
        model.add_node(node("b")).unwrap();

        assert_eq!(model.node_count(), 2);
        assert!(model.contains_node(Id::new("a")));
        assert_eq!(model.node(Id::new("b")).unwrap().title, "title b");
    }

    #[test]
    fn test_add_node_duplicate_rejected() {
        let mut model = DiagramModel::new();
        model.add_node(node("a")).unwrap();

        let replacement = node("a").with_position(999.0, 999.0);
        let err = model.add_node(replacement).unwrap_err();

        assert_eq!(err, ModelError::DuplicateNode { id: Id::new("a") });
        // Prior state untouched.
        assert_eq!(model.node_count(), 1);
        assert_eq!(
            model.node(Id::new("a")).unwrap().position,
            Point::new(50.0, 50.0)
        );
    }

    #[test]
    fn test_add_edge_without_endpoints() {
        // Endpoint validation is deferred to render time, so an edge may be
        // added before either node exists.
        let mut model = DiagramModel::new();
        let edge = Edge::new(Id::new("e1"), Id::new("ghost-src"), Id::new("ghost-dst"));

        assert!(model.add_edge(edge).is_ok());
        assert_eq!(model.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_duplicate_rejected() {
        let mut model = DiagramModel::new();
        model
            .add_edge(Edge::new(Id::new("e1"), Id::new("a"), Id::new("b")))
            .unwrap();

        let err = model
            .add_edge(Edge::new(Id::new("e1"), Id::new("x"), Id::new("y")))
            .unwrap_err();

        assert_eq!(err, ModelError::DuplicateEdge { id: Id::new("e1") });
        assert_eq!(model.edge(Id::new("e1")).unwrap().source, Id::new("a"));
    }

    #[test]
    fn test_clear_empties_both_collections() {
        let mut model = DiagramModel::new();
        model.add_node(node("a")).unwrap();
        model
            .add_edge(Edge::new(Id::new("e1"), Id::new("a"), Id::new("b")))
            .unwrap();

        model.clear();

        assert_eq!(model.node_count(), 0);
        assert_eq!(model.edge_count(), 0);
    }

    #[test]
    fn test_edges_touching() {
        let mut model = DiagramModel::new();
        model
            .add_edge(Edge::new(Id::new("e1"), Id::new("a"), Id::new("b")))
            .unwrap();
        model
            .add_edge(Edge::new(Id::new("e2"), Id::new("b"), Id::new("c")))
            .unwrap();
        model
            .add_edge(Edge::new(Id::new("e3"), Id::new("c"), Id::new("a")))
            .unwrap();

        let touching: Vec<Id> = model.edges_touching(Id::new("b")).map(|e| e.id).collect();
        assert_eq!(touching, vec![Id::new("e1"), Id::new("e2")]);
    }

    #[test]
    fn test_set_nodes_replaces_wholesale() {
        let mut model = DiagramModel::new();
        model.add_node(node("a")).unwrap();
        model.add_node(node("b")).unwrap();

        let rearranged = vec![
            node("b").with_position(0.0, 0.0),
            node("c").with_position(250.0, 0.0),
        ];
        model.set_nodes(rearranged);

        assert_eq!(model.node_count(), 2);
        assert!(!model.contains_node(Id::new("a")));
        assert_eq!(
            model.node(Id::new("c")).unwrap().position,
            Point::new(250.0, 0.0)
        );
    }

    #[test]
    fn test_node_center_with_fallbacks() {
        // Auto height resolves to 100 and zero width to 200 for geometry.
        let auto = node("auto").with_position(300.0, 0.0);
        assert_eq!(auto.center(), Point::new(400.0, 50.0));

        let unmeasured = node("unmeasured").with_position(0.0, 0.0).with_width(0.0);
        assert_eq!(unmeasured.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_condition_stroke_colors() {
        use arguendo_core::color::Color;

        assert_eq!(condition_stroke(Some(Condition::Met)), Color::named("green"));
        assert_eq!(
            condition_stroke(Some(Condition::NotMet)),
            Color::named("orange")
        );
        assert_eq!(condition_stroke(None), Color::named("gray"));
    }

    #[test]
    fn test_node_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&NodeKind::ResultPositive).unwrap(),
            "\"result-positive\""
        );
        assert_eq!(
            serde_json::from_str::<NodeKind>("\"normal\"").unwrap(),
            NodeKind::Normal
        );
    }

    #[test]
    fn test_condition_serde_tags() {
        assert_eq!(serde_json::to_string(&Condition::Met).unwrap(), "\"+\"");
        assert_eq!(
            serde_json::from_str::<Condition>("\"-\"").unwrap(),
            Condition::NotMet
        );
    }
}
