//! The capability interface between the engine and a display surface.
//!
//! The engine never talks to a real display directly; it drives a
//! [`Surface`], a minimal id-keyed sprite store. Every visual element
//! carries the id of the model entity it represents, so reconciliation is
//! pure id-keyed lookup and the whole render protocol is testable without
//! any display at all — that is what [`RecordingSurface`] is for.
//!
//! Surfaces hold no state that outlives a render pass: anything they contain
//! must be derivable from the model.

use indexmap::IndexMap;
use thiserror::Error;

use arguendo_core::{geometry::Point, identifier::Id, viewport::ViewportTransform};

use crate::{edge_visual::EdgeVisual, model::Node};

/// Errors a surface can report back to the renderer.
///
/// All of them degrade to "log a diagnostic and skip this operation"; none
/// are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("no node visual with id `{id}`")]
    MissingNodeVisual { id: Id },

    #[error("no edge visual with id `{id}`")]
    MissingEdgeVisual { id: Id },

    #[error("surface is not ready to draw")]
    Uninitialized,
}

/// A display surface the render synchronizer can drive.
///
/// `create_*` unconditionally installs a sprite for an id (replacing any
/// leftover is acceptable; full rebuilds clear first). `update_*` and
/// `remove_*` fail with a [`SurfaceError`] when the id has no sprite, and
/// the caller decides whether that is worth a warning.
///
/// Implementations must toggle label visibility on `update_edge` by hiding
/// or showing existing label elements rather than destroying and recreating
/// them, so element identity survives a continuous gesture.
pub trait Surface {
    fn create_node(&mut self, node: &Node);
    fn update_node(&mut self, id: Id, position: Point) -> Result<(), SurfaceError>;
    fn remove_node(&mut self, id: Id) -> Result<(), SurfaceError>;

    fn create_edge(&mut self, id: Id, visual: &EdgeVisual);
    fn update_edge(&mut self, id: Id, visual: &EdgeVisual) -> Result<(), SurfaceError>;
    fn remove_edge(&mut self, id: Id) -> Result<(), SurfaceError>;

    /// Applies the composed pan/zoom transform to the whole canvas, both
    /// layers at once.
    fn apply_transform(&mut self, viewport: &ViewportTransform);

    /// Discards every sprite.
    fn clear(&mut self);
}

/// One operation applied to a [`RecordingSurface`], in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    CreateNode(Id),
    UpdateNode(Id),
    RemoveNode(Id),
    CreateEdge(Id),
    UpdateEdge(Id),
    RemoveEdge(Id),
    ApplyTransform,
    Clear,
}

/// An in-memory surface that retains sprites and records every operation.
///
/// Useful for headless reconciliation checks: tests assert on the retained
/// sprite state (what is visible) and on the operation log (how it got
/// there, e.g. that a drag used the incremental path instead of a rebuild).
#[derive(Debug, Default)]
pub struct RecordingSurface {
    nodes: IndexMap<Id, Point>,
    edges: IndexMap<Id, EdgeVisual>,
    transform: ViewportTransform,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the node sprite with the given id, if present.
    pub fn node_position(&self, id: Id) -> Option<Point> {
        self.nodes.get(&id).copied()
    }

    /// The retained visual of the edge sprite with the given id.
    pub fn edge_visual(&self, id: Id) -> Option<&EdgeVisual> {
        self.edges.get(&id)
    }

    /// Number of node sprites currently retained.
    pub fn node_sprite_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edge sprites currently retained.
    pub fn edge_sprite_count(&self) -> usize {
        self.edges.len()
    }

    /// The last transform applied to the canvas.
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Every operation applied so far, in order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forgets the operation log, keeping the sprites.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Drops the edge sprite for `id` without recording a remove operation.
    ///
    /// Test hook for manufacturing the inconsistent missing-visual state.
    pub fn forget_edge(&mut self, id: Id) {
        self.edges.shift_remove(&id);
    }
}

impl Surface for RecordingSurface {
    fn create_node(&mut self, node: &Node) {
        self.nodes.insert(node.id, node.position);
        self.ops.push(SurfaceOp::CreateNode(node.id));
    }

    fn update_node(&mut self, id: Id, position: Point) -> Result<(), SurfaceError> {
        let slot = self
            .nodes
            .get_mut(&id)
            .ok_or(SurfaceError::MissingNodeVisual { id })?;
        *slot = position;
        self.ops.push(SurfaceOp::UpdateNode(id));
        Ok(())
    }

    fn remove_node(&mut self, id: Id) -> Result<(), SurfaceError> {
        self.nodes
            .shift_remove(&id)
            .ok_or(SurfaceError::MissingNodeVisual { id })?;
        self.ops.push(SurfaceOp::RemoveNode(id));
        Ok(())
    }

    fn create_edge(&mut self, id: Id, visual: &EdgeVisual) {
        self.edges.insert(id, visual.clone());
        self.ops.push(SurfaceOp::CreateEdge(id));
    }

    fn update_edge(&mut self, id: Id, visual: &EdgeVisual) -> Result<(), SurfaceError> {
        let slot = self
            .edges
            .get_mut(&id)
            .ok_or(SurfaceError::MissingEdgeVisual { id })?;
        *slot = visual.clone();
        self.ops.push(SurfaceOp::UpdateEdge(id));
        Ok(())
    }

    fn remove_edge(&mut self, id: Id) -> Result<(), SurfaceError> {
        self.edges
            .shift_remove(&id)
            .ok_or(SurfaceError::MissingEdgeVisual { id })?;
        self.ops.push(SurfaceOp::RemoveEdge(id));
        Ok(())
    }

    fn apply_transform(&mut self, viewport: &ViewportTransform) {
        self.transform = *viewport;
        self.ops.push(SurfaceOp::ApplyTransform);
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.ops.push(SurfaceOp::Clear);
    }
}
