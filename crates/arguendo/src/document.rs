//! JSON persistence: saving and restoring a diagram.
//!
//! The on-disk schema is versioned and flat: a header plus node and edge
//! record arrays. The viewport transform is deliberately not part of the
//! document — a restored diagram opens at the default view.
//!
//! Import is resilient: a version mismatch, a duplicate id, or a record
//! missing its id degrades to a logged warning and the rest of the document
//! still loads.

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};

use arguendo_core::identifier::{Id, IdGenerator};

use crate::{
    model::{Condition, DiagramModel, Edge, Node, NodeKind},
    surface::Surface,
    workspace::Workspace,
};

/// Schema version this build reads and writes.
pub const DOCUMENT_VERSION: &str = "1.0";

/// One node as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub title: String,
    pub text: String,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub width: f32,
}

impl NodeRecord {
    fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.to_string(),
            title: node.title.clone(),
            text: node.body.clone(),
            x: node.position.x(),
            y: node.position.y(),
            kind: node.kind,
            width: node.width,
        }
    }

    fn into_node(self, id: Id) -> Node {
        Node::new(id, self.title, self.text)
            .with_position(self.x, self.y)
            .with_kind(self.kind)
            .with_width(self.width)
    }
}

/// One edge as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    #[serde(default)]
    pub condition_met: Option<Condition>,
    #[serde(default = "certain")]
    pub probability: f32,
}

fn certain() -> f32 {
    1.0
}

impl EdgeRecord {
    fn from_edge(edge: &Edge) -> Self {
        Self {
            id: edge.id.to_string(),
            source_node_id: edge.source.to_string(),
            target_node_id: edge.target.to_string(),
            condition_met: edge.condition,
            probability: edge.probability,
        }
    }

    fn into_edge(self, id: Id) -> Edge {
        let mut edge = Edge::new(
            id,
            Id::new(&self.source_node_id),
            Id::new(&self.target_node_id),
        )
        .with_probability(self.probability);
        edge.condition = self.condition_met;
        edge
    }
}

/// A complete persisted diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDocument {
    pub version: String,
    pub created_at: String,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl DiagramDocument {
    /// Snapshots a model into a document stamped with the current time.
    pub fn from_model(model: &DiagramModel) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            created_at: Utc::now().to_rfc3339(),
            nodes: model.nodes().map(NodeRecord::from_node).collect(),
            edges: model.edges().map(EdgeRecord::from_edge).collect(),
        }
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a document from JSON.
    ///
    /// # Errors
    /// Returns the parse error for malformed input; schema resilience
    /// applies per record, not to broken JSON.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Replaces the workspace contents with this document and re-renders.
    ///
    /// Problem records are warned about and skipped: a duplicate id keeps
    /// the first occurrence, a missing id gets a generated one. Edges with
    /// unresolved endpoints load fine and simply render nothing.
    pub fn apply_to<S: Surface>(self, workspace: &mut Workspace<S>) {
        if self.version != DOCUMENT_VERSION {
            warn!(
                found = self.version,
                expected = DOCUMENT_VERSION;
                "Document version mismatch, attempting to load anyway"
            );
        }

        workspace.clear();
        let mut ids = IdGenerator::default();

        for record in self.nodes {
            let id = resolve_id(&record.id, &mut ids, |id| {
                workspace.model().contains_node(id)
            });
            if let Err(err) = workspace.add_node(record.into_node(id)) {
                warn!(err:% = err; "Skipping node record");
            }
        }

        for record in self.edges {
            let id = resolve_id(&record.id, &mut ids, |id| {
                workspace.model().edge(id).is_some()
            });
            if let Err(err) = workspace.add_edge(record.into_edge(id)) {
                warn!(err:% = err; "Skipping edge record");
            }
        }

        workspace.render_all();
    }
}

/// Resolves a record id, generating a fresh one when the record has none.
fn resolve_id(raw: &str, ids: &mut IdGenerator, taken: impl Fn(Id) -> bool) -> Id {
    if !raw.is_empty() {
        return Id::new(raw);
    }

    loop {
        let id = ids.next_id();
        if !taken(id) {
            warn!(id = id.to_string(); "Record without id, generated one");
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::surface::RecordingSurface;

    fn sample_workspace() -> Workspace<RecordingSurface> {
        let mut workspace = Workspace::new(RecordingSurface::new());
        workspace
            .add_node(
                Node::new(Id::new("a"), "Claim arises", "<p>body</p>").with_position(50.0, 50.0),
            )
            .unwrap();
        workspace
            .add_node(Node::new(Id::new("b"), "Claim enforceable", "").with_position(300.0, 50.0))
            .unwrap();
        workspace
            .add_edge(
                Edge::new(Id::new("ab"), Id::new("a"), Id::new("b"))
                    .with_condition(Condition::Met)
                    .with_probability(0.5),
            )
            .unwrap();
        workspace.render_all();
        workspace
    }

    #[test]
    fn test_document_schema_field_names() {
        let document = DiagramDocument::from_model(sample_workspace().model());
        let json = document.to_json().unwrap();

        assert!(json.contains("\"version\": \"1.0\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"sourceNodeId\": \"a\""));
        assert!(json.contains("\"targetNodeId\": \"b\""));
        assert!(json.contains("\"conditionMet\": \"+\""));
        assert!(json.contains("\"type\": \"normal\""));
    }

    #[test]
    fn test_roundtrip_restores_model() {
        let source = sample_workspace();
        let json = DiagramDocument::from_model(source.model())
            .to_json()
            .unwrap();

        let mut restored = Workspace::new(RecordingSurface::new());
        DiagramDocument::from_json(&json).unwrap().apply_to(&mut restored);

        assert_eq!(restored.model().node_count(), 2);
        assert_eq!(restored.model().edge_count(), 1);

        let edge = restored.model().edge(Id::new("ab")).unwrap();
        assert_eq!(edge.condition, Some(Condition::Met));
        assert_eq!(edge.probability, 0.5);

        // Import finished with a full render.
        assert_eq!(restored.surface().edge_sprite_count(), 1);
    }

    #[test]
    fn test_duplicate_record_keeps_first() {
        let json = r#"{
            "version": "1.0",
            "createdAt": "2026-01-01T00:00:00Z",
            "nodes": [
                { "id": "a", "title": "first", "text": "", "x": 0, "y": 0 },
                { "id": "a", "title": "second", "text": "", "x": 99, "y": 99 }
            ],
            "edges": []
        }"#;

        let mut workspace = Workspace::new(RecordingSurface::new());
        DiagramDocument::from_json(json).unwrap().apply_to(&mut workspace);

        assert_eq!(workspace.model().node_count(), 1);
        assert_eq!(workspace.model().node(Id::new("a")).unwrap().title, "first");
    }

    #[test]
    fn test_missing_id_is_backfilled() {
        let json = r#"{
            "version": "1.0",
            "createdAt": "2026-01-01T00:00:00Z",
            "nodes": [
                { "id": "", "title": "orphan", "text": "", "x": 0, "y": 0 }
            ],
            "edges": []
        }"#;

        let mut workspace = Workspace::new(RecordingSurface::new());
        DiagramDocument::from_json(json).unwrap().apply_to(&mut workspace);

        assert_eq!(workspace.model().node_count(), 1);
        let node = workspace.model().nodes().next().unwrap();
        assert!(!node.id.to_string().is_empty());
        assert_eq!(node.title, "orphan");
    }

    #[test]
    fn test_version_mismatch_still_loads() {
        let json = r#"{
            "version": "0.9",
            "createdAt": "2026-01-01T00:00:00Z",
            "nodes": [
                { "id": "a", "title": "t", "text": "", "x": 0, "y": 0 }
            ],
            "edges": []
        }"#;

        let mut workspace = Workspace::new(RecordingSurface::new());
        DiagramDocument::from_json(json).unwrap().apply_to(&mut workspace);

        assert_eq!(workspace.model().node_count(), 1);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(DiagramDocument::from_json("{ not json").is_err());
    }

    #[test]
    fn test_unknown_width_defaults_for_geometry() {
        // A record without width deserializes to 0, which geometry treats
        // as unmeasured.
        let json = r#"{ "id": "a", "title": "t", "text": "", "x": 0, "y": 0 }"#;
        let record: NodeRecord = serde_json::from_str(json).unwrap();
        let node = record.into_node(Id::new("a"));

        assert_eq!(node.effective_width(), 200.0);
    }
}
