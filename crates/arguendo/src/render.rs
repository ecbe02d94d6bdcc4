//! Render synchronization: reconciling surface sprites with the model.
//!
//! Two modes, both upholding the dual-layer consistency invariant — every
//! visible sprite corresponds to exactly one live model entity, and every
//! live entity with resolvable geometry has exactly one sprite:
//!
//! - [`render_all`]: full rebuild after bulk mutation (load, template,
//!   clear, layout).
//! - [`sync_node`]: targeted update for a single dragged node and the edges
//!   touching it. Recreating sprites on every pointer-move of a continuous
//!   gesture would be prohibitively wasteful, so this path updates in place.
//!
//! Inconsistencies (an expected sprite is missing) are logged and skipped,
//! never thrown: these are reconciliation diagnostics, not failures.

use log::{debug, warn};

use arguendo_core::{identifier::Id, viewport::ViewportTransform};

use crate::{edge_visual::compute_edge_visual, model::DiagramModel, surface::Surface};

/// Full rebuild: discard all sprites and recreate the diagram.
///
/// Every node gets a sprite; every edge whose endpoints resolve gets one;
/// dangling edges are skipped silently. Finishes by re-applying the
/// composed pan/zoom transform so both layers stay aligned.
pub fn render_all(model: &DiagramModel, viewport: &ViewportTransform, surface: &mut dyn Surface) {
    surface.clear();

    for node in model.nodes() {
        surface.create_node(node);
    }

    for edge in model.edges() {
        match compute_edge_visual(edge, model.node(edge.source), model.node(edge.target)) {
            Some(visual) => surface.create_edge(edge.id, &visual),
            None => {
                debug!(
                    edge_id = edge.id.to_string(),
                    source = edge.source.to_string(),
                    target = edge.target.to_string();
                    "Skipping dangling edge"
                );
            }
        }
    }

    surface.apply_transform(viewport);
}

/// Incremental update for one node and every edge touching it.
///
/// The node sprite's position is updated in place; each touching edge
/// sprite gets recomputed attributes. A missing sprite is logged and
/// skipped. An edge that no longer resolves has its prior sprite removed.
pub fn sync_node(model: &DiagramModel, id: Id, surface: &mut dyn Surface) {
    let Some(node) = model.node(id) else {
        warn!(node_id = id.to_string(); "Cannot sync unknown node");
        return;
    };

    if let Err(err) = surface.update_node(id, node.position) {
        warn!(node_id = id.to_string(), err:% = err; "Skipping node update");
    }

    for edge in model.edges_touching(id) {
        match compute_edge_visual(edge, model.node(edge.source), model.node(edge.target)) {
            Some(visual) => {
                if let Err(err) = surface.update_edge(edge.id, &visual) {
                    warn!(edge_id = edge.id.to_string(), err:% = err; "Skipping edge update");
                }
            }
            None => {
                // The edge stopped resolving; its sprite, if any, goes away.
                if let Err(err) = surface.remove_edge(edge.id) {
                    debug!(edge_id = edge.id.to_string(), err:% = err; "No edge sprite to remove");
                }
            }
        }
    }
}
