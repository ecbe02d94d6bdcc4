//! A retained-scene [`Surface`] that snapshots to an SVG document.
//!
//! [`SvgSurface`] keeps one sprite per model entity, keyed by id, exactly as
//! an interactive canvas would, and serializes the whole scene on demand.
//! Because it implements the same [`Surface`] protocol the interaction layer
//! drives, an export after any sequence of gestures shows precisely what the
//! reconciler produced — including the composed pan/zoom transform on the
//! root group.
//!
//! Label lifecycle: once an edge sprite has a label element, updates toggle
//! its visibility (`display: none`) instead of destroying and recreating it,
//! so element identity is stable across a continuous gesture.

use std::path::Path as FilePath;

use indexmap::IndexMap;
use log::warn;
use svg::{
    Document,
    node::element::{Definitions, Group, Line, Marker, Polygon, Rectangle, Text as TextElement},
};

use arguendo_core::{
    color::Color,
    geometry::Point,
    identifier::Id,
    viewport::ViewportTransform,
};

use crate::{
    edge_visual::{EdgeLabel, EdgeVisual},
    model::{Node, NodeKind},
    sanitize::{PlainText, Sanitizer},
    surface::{Surface, SurfaceError},
};

const EDGE_STROKE_WIDTH: f32 = 2.0;
const NODE_CORNER_RADIUS: f32 = 4.0;
const NODE_TITLE_FONT_SIZE: f32 = 14.0;
const NODE_BODY_FONT_SIZE: f32 = 11.0;
const NODE_PADDING: f32 = 10.0;
const NODE_LINE_HEIGHT: f32 = 14.0;

/// Retained state of one node box.
#[derive(Debug, Clone)]
struct NodeSprite {
    position: Point,
    width: f32,
    height: f32,
    kind: NodeKind,
    title: String,
    body_lines: Vec<String>,
}

/// A label element retained on an edge sprite.
///
/// Hidden labels keep their element; `visible` is what toggles.
#[derive(Debug, Clone)]
struct LabelSprite {
    label: EdgeLabel,
    visible: bool,
}

impl LabelSprite {
    fn shown(label: EdgeLabel) -> Self {
        Self {
            label,
            visible: true,
        }
    }
}

/// Retained state of one edge group: line plus its label elements.
#[derive(Debug, Clone)]
struct EdgeSprite {
    from: Point,
    to: Point,
    stroke: Color,
    condition: Option<LabelSprite>,
    probability: Option<LabelSprite>,
}

/// An SVG-backed display surface.
#[derive(Debug, Default)]
pub struct SvgSurface {
    nodes: IndexMap<Id, NodeSprite>,
    edges: IndexMap<Id, EdgeSprite>,
    transform: ViewportTransform,
}

/// Reconciles one label slot against its freshly computed value.
///
/// A label that disappears is hidden, not destroyed; a label that reappears
/// is updated in place and shown again. A label that was never created
/// cannot be updated — that inconsistency is logged and the slot is left
/// empty.
fn sync_label(slot: &mut Option<LabelSprite>, fresh: Option<&EdgeLabel>, edge: Id, name: &str) {
    match (slot.as_mut(), fresh) {
        (Some(sprite), Some(label)) => {
            sprite.label = label.clone();
            sprite.visible = true;
        }
        (Some(sprite), None) => {
            sprite.visible = false;
        }
        (None, Some(_)) => {
            warn!(edge_id = edge.to_string(), label = name; "Label element was never created");
        }
        (None, None) => {}
    }
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the retained scene to an SVG document.
    ///
    /// The root group carries the composed `translate(pan) scale(scale)`
    /// transform; everything inside it is in logical canvas units. An
    /// optional background color becomes a full-size backdrop rectangle.
    pub fn to_document(&self, background: Option<&Color>) -> Document {
        let mut document = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .add(arrowhead_definitions());

        if let Some(color) = background {
            document = document.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color.to_string()),
            );
        }

        let mut canvas = Group::new().set(
            "transform",
            format!(
                "translate({}, {}) scale({})",
                self.transform.pan().x(),
                self.transform.pan().y(),
                self.transform.scale()
            ),
        );

        // Edge layer first so node boxes draw over line ends.
        let mut edge_layer = Group::new().set("class", "edge-layer");
        for (id, sprite) in &self.edges {
            edge_layer = edge_layer.add(edge_group(*id, sprite));
        }
        canvas = canvas.add(edge_layer);

        let mut node_layer = Group::new().set("class", "node-layer");
        for (id, sprite) in &self.nodes {
            node_layer = node_layer.add(node_group(*id, sprite));
        }
        canvas = canvas.add(node_layer);

        document.add(canvas)
    }

    /// Renders the scene to an SVG string.
    pub fn to_svg_string(&self, background: Option<&Color>) -> String {
        self.to_document(background).to_string()
    }

    /// Writes the scene to an SVG file.
    pub fn save(&self, path: &FilePath, background: Option<&Color>) -> std::io::Result<()> {
        svg::save(path, &self.to_document(background))
    }

    pub fn node_sprite_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_sprite_count(&self) -> usize {
        self.edges.len()
    }
}

fn arrowhead_definitions() -> Definitions {
    Definitions::new().add(
        Marker::new()
            .set("id", "arrowhead")
            .set("markerWidth", 10)
            .set("markerHeight", 7)
            .set("refX", 8)
            .set("refY", 3.5)
            .set("orient", "auto")
            .add(
                Polygon::new()
                    .set("points", "0 0, 10 3.5, 0 7")
                    .set("fill", "context-stroke"),
            ),
    )
}

fn node_group(id: Id, sprite: &NodeSprite) -> Group {
    let mut group = Group::new()
        .set("id", format!("node-{id}"))
        .set("class", format!("node {}", sprite.kind.class_name()))
        .add(
            Rectangle::new()
                .set("x", sprite.position.x())
                .set("y", sprite.position.y())
                .set("width", sprite.width)
                .set("height", sprite.height)
                .set("rx", NODE_CORNER_RADIUS)
                .set("fill", "white")
                .set("stroke", "black"),
        )
        .add(
            TextElement::new(sprite.title.clone())
                .set("x", sprite.position.x() + NODE_PADDING)
                .set("y", sprite.position.y() + NODE_PADDING + NODE_TITLE_FONT_SIZE)
                .set("font-size", NODE_TITLE_FONT_SIZE)
                .set("font-weight", "bold"),
        );

    let body_top = sprite.position.y() + NODE_PADDING + NODE_TITLE_FONT_SIZE + NODE_LINE_HEIGHT;
    for (index, line) in sprite.body_lines.iter().enumerate() {
        group = group.add(
            TextElement::new(line.clone())
                .set("x", sprite.position.x() + NODE_PADDING)
                .set("y", body_top + index as f32 * NODE_LINE_HEIGHT)
                .set("font-size", NODE_BODY_FONT_SIZE),
        );
    }

    group
}

fn label_element(label: &LabelSprite, class: &str) -> TextElement {
    let mut element = TextElement::new(label.label.text.clone())
        .set("class", class)
        .set("x", label.label.anchor.x())
        .set("y", label.label.anchor.y() + label.label.dy)
        .set("text-anchor", "middle")
        .set("font-size", label.label.font_size)
        .set("fill", label.label.color.to_string());

    if !label.visible {
        element = element.set("display", "none");
    }

    element
}

fn edge_group(id: Id, sprite: &EdgeSprite) -> Group {
    let mut group = Group::new().set("id", format!("edge-group-{id}")).add(
        Line::new()
            .set("x1", sprite.from.x())
            .set("y1", sprite.from.y())
            .set("x2", sprite.to.x())
            .set("y2", sprite.to.y())
            .set("stroke", sprite.stroke.to_string())
            .set("stroke-width", EDGE_STROKE_WIDTH)
            .set("marker-end", "url(#arrowhead)"),
    );

    if let Some(label) = &sprite.condition {
        group = group.add(label_element(label, "edge-condition-label"));
    }
    if let Some(label) = &sprite.probability {
        group = group.add(label_element(label, "edge-probability-label"));
    }

    group
}

impl Surface for SvgSurface {
    fn create_node(&mut self, node: &Node) {
        let body = PlainText.sanitize(&node.body);
        self.nodes.insert(
            node.id,
            NodeSprite {
                position: node.position,
                width: node.effective_width(),
                height: node.effective_height(),
                kind: node.kind,
                title: node.title.clone(),
                body_lines: if body.is_empty() {
                    Vec::new()
                } else {
                    body.lines().map(str::to_string).collect()
                },
            },
        );
    }

    fn update_node(&mut self, id: Id, position: Point) -> Result<(), SurfaceError> {
        let sprite = self
            .nodes
            .get_mut(&id)
            .ok_or(SurfaceError::MissingNodeVisual { id })?;
        sprite.position = position;
        Ok(())
    }

    fn remove_node(&mut self, id: Id) -> Result<(), SurfaceError> {
        self.nodes
            .shift_remove(&id)
            .ok_or(SurfaceError::MissingNodeVisual { id })?;
        Ok(())
    }

    fn create_edge(&mut self, id: Id, visual: &EdgeVisual) {
        self.edges.insert(
            id,
            EdgeSprite {
                from: visual.from,
                to: visual.to,
                stroke: visual.stroke,
                condition: visual.condition_label.clone().map(LabelSprite::shown),
                probability: visual.probability_label.clone().map(LabelSprite::shown),
            },
        );
    }

    fn update_edge(&mut self, id: Id, visual: &EdgeVisual) -> Result<(), SurfaceError> {
        let sprite = self
            .edges
            .get_mut(&id)
            .ok_or(SurfaceError::MissingEdgeVisual { id })?;

        sprite.from = visual.from;
        sprite.to = visual.to;
        sprite.stroke = visual.stroke;
        sync_label(
            &mut sprite.condition,
            visual.condition_label.as_ref(),
            id,
            "condition",
        );
        sync_label(
            &mut sprite.probability,
            visual.probability_label.as_ref(),
            id,
            "probability",
        );
        Ok(())
    }

    fn remove_edge(&mut self, id: Id) -> Result<(), SurfaceError> {
        self.edges
            .shift_remove(&id)
            .ok_or(SurfaceError::MissingEdgeVisual { id })?;
        Ok(())
    }

    fn apply_transform(&mut self, viewport: &ViewportTransform) {
        self.transform = *viewport;
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
