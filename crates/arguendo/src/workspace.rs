//! The workspace: owned context object tying model, viewport, interaction
//! state, and surface together.
//!
//! All mutable state lives here — there are no ambient globals. Pointer and
//! wheel events flow through [`Workspace::handle_event`], which drives the
//! interaction state machine, mutates the viewport or the model, and keeps
//! the surface reconciled. External collaborators (template loader, document
//! importer, layout service) use the model accessors and finish bulk
//! mutations with [`Workspace::render_all`].
//!
//! Everything is single-threaded and cooperative: each event is handled to
//! completion before the next one is dispatched, so the visible diagram is
//! never in a torn intermediate state.

use log::{debug, warn};

use arguendo_core::{
    geometry::Point,
    identifier::Id,
    viewport::{ViewportTransform, ZoomDirection},
};

use crate::{
    config::ViewportConfig,
    interaction::{InteractionState, PointerEvent, PointerTarget},
    model::{DiagramModel, Edge, ModelError, Node},
    render,
    surface::Surface,
};

/// An argumentation-diagram workspace bound to a display surface.
///
/// # Examples
///
/// ```
/// use arguendo::{surface::RecordingSurface, workspace::Workspace};
///
/// let mut workspace = Workspace::new(RecordingSurface::new());
/// assert_eq!(workspace.model().node_count(), 0);
/// ```
#[derive(Debug)]
pub struct Workspace<S: Surface> {
    model: DiagramModel,
    viewport: ViewportTransform,
    interaction: InteractionState,
    surface: S,
    viewport_config: ViewportConfig,
}

impl<S: Surface> Workspace<S> {
    /// Creates an empty workspace with default viewport behavior.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, ViewportConfig::default())
    }

    /// Creates an empty workspace with explicit viewport behavior.
    pub fn with_config(surface: S, viewport_config: ViewportConfig) -> Self {
        Self {
            model: DiagramModel::new(),
            viewport: ViewportTransform::default(),
            interaction: InteractionState::Idle,
            surface,
            viewport_config,
        }
    }

    /// Read access to the model.
    pub fn model(&self) -> &DiagramModel {
        &self.model
    }

    /// Mutable access to the model.
    ///
    /// Callers that mutate in bulk must follow with [`render_all`](Self::render_all).
    pub fn model_mut(&mut self) -> &mut DiagramModel {
        &mut self.model
    }

    /// The current pan/zoom transform.
    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    /// The current interaction state.
    pub fn interaction_state(&self) -> &InteractionState {
        &self.interaction
    }

    /// Read access to the bound surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the workspace, returning the surface (e.g. for export).
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Adds a node and creates its sprite immediately.
    ///
    /// # Errors
    /// Duplicate ids are rejected with [`ModelError::DuplicateNode`]; the
    /// caller decides whether to log or surface the rejection.
    pub fn add_node(&mut self, node: Node) -> Result<(), ModelError> {
        let node = self.model.add_node(node)?;
        self.surface.create_node(node);
        Ok(())
    }

    /// Adds an edge to the model only.
    ///
    /// Edge sprites are created by the next [`render_all`](Self::render_all)
    /// pass; bulk loaders add all nodes and edges first and render once.
    ///
    /// # Errors
    /// Duplicate ids are rejected with [`ModelError::DuplicateEdge`].
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), ModelError> {
        self.model.add_edge(edge)?;
        Ok(())
    }

    /// Replaces the node collection wholesale without rendering.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.model.set_nodes(nodes);
    }

    /// Empties the model and the surface atomically.
    pub fn clear(&mut self) {
        self.model.clear();
        self.surface.clear();
    }

    /// Full rebuild of both visual layers from the model.
    pub fn render_all(&mut self) {
        render::render_all(&self.model, &self.viewport, &mut self.surface);
    }

    /// Feeds one pointer/wheel event through the interaction state machine.
    ///
    /// Runs to completion synchronously; the model and surface are fully
    /// reconciled before the call returns. Malformed events are logged and
    /// leave every piece of state untouched.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { target, position } => self.pointer_down(target, position),
            PointerEvent::Move { position } => self.pointer_move(position),
            // Leaving the tracked area ends a gesture exactly like a
            // pointer-up, so no state is ever left stuck.
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
            PointerEvent::Wheel {
                position,
                direction,
            } => self.wheel(position, direction),
        }
    }

    fn pointer_down(&mut self, target: PointerTarget, position: Point) {
        match target {
            PointerTarget::Background => {
                self.interaction = InteractionState::Panning { last: position };
            }
            PointerTarget::Node(id) => {
                let Some(node) = self.model.node(id) else {
                    warn!(node_id = id.to_string(); "Pointer-down on unknown node");
                    return;
                };
                // Offset of the pointer from the node's top-left corner as
                // rendered, recorded in screen units.
                let top_left = self.viewport.canvas_to_screen(node.position);
                self.interaction = InteractionState::DraggingNode {
                    id,
                    offset: position.sub_point(top_left),
                };
            }
        }
    }

    fn pointer_move(&mut self, position: Point) {
        match self.interaction {
            InteractionState::Idle => {}
            InteractionState::Panning { last } => {
                self.viewport.apply_pan(position.sub_point(last));
                self.interaction = InteractionState::Panning { last: position };
                // Pan changes the transform, not the model.
                self.surface.apply_transform(&self.viewport);
            }
            InteractionState::DraggingNode { id, offset } => {
                let Some(node) = self.model.node_mut(id) else {
                    warn!(node_id = id.to_string(); "Dragged node vanished from model");
                    return;
                };
                node.position = self.viewport.screen_to_canvas(position.sub_point(offset));
                render::sync_node(&self.model, id, &mut self.surface);
            }
        }
    }

    fn pointer_up(&mut self) {
        self.interaction = InteractionState::Idle;
    }

    fn wheel(&mut self, position: Point, direction: ZoomDirection) {
        // Zoom is accepted in any interaction state and only ever touches
        // the viewport.
        let candidate = self.viewport.zoomed(
            position,
            direction,
            self.viewport_config.zoom_intensity(),
        );

        if let Some(limits) = self.viewport_config.scale_limits() {
            if !limits.allows(candidate.scale()) {
                debug!(scale = candidate.scale(); "Zoom step outside scale limits, skipped");
                return;
            }
        }

        self.viewport = candidate;
        self.surface.apply_transform(&self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    use arguendo_core::viewport::ScaleLimits;

    use crate::{
        model::Condition,
        surface::{RecordingSurface, SurfaceOp},
    };

    fn workspace_with_pair() -> Workspace<RecordingSurface> {
        let mut workspace = Workspace::new(RecordingSurface::new());
        workspace
            .add_node(Node::new(Id::new("a"), "a", "").with_position(0.0, 0.0))
            .unwrap();
        workspace
            .add_node(Node::new(Id::new("b"), "b", "").with_position(300.0, 0.0))
            .unwrap();
        workspace
            .add_edge(
                Edge::new(Id::new("ab"), Id::new("a"), Id::new("b"))
                    .with_condition(Condition::Met),
            )
            .unwrap();
        workspace.render_all();
        workspace
    }

    fn down_on_background(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down {
            target: PointerTarget::Background,
            position: Point::new(x, y),
        }
    }

    fn down_on_node(id: &str, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down {
            target: PointerTarget::Node(Id::new(id)),
            position: Point::new(x, y),
        }
    }

    fn move_to(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_pan_gesture() {
        let mut workspace = workspace_with_pair();

        workspace.handle_event(down_on_background(10.0, 10.0));
        assert!(workspace.interaction_state().is_panning());

        workspace.handle_event(move_to(25.0, 40.0));
        workspace.handle_event(move_to(30.0, 40.0));
        assert_eq!(workspace.viewport().pan(), Point::new(20.0, 30.0));

        workspace.handle_event(PointerEvent::Up);
        assert_eq!(*workspace.interaction_state(), InteractionState::Idle);

        // The pan re-rendered the transform, not the model.
        let visual = workspace.surface().edge_visual(Id::new("ab")).unwrap();
        assert_eq!(visual.from, Point::new(100.0, 50.0));
        assert_eq!(workspace.surface().transform().pan(), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_drag_moves_node_and_edges() {
        let mut workspace = workspace_with_pair();

        // Grab node "a" 20px into it.
        workspace.handle_event(down_on_node("a", 20.0, 20.0));
        assert_eq!(
            workspace.interaction_state().dragged_node(),
            Some(Id::new("a"))
        );

        workspace.handle_event(move_to(120.0, 70.0));
        workspace.handle_event(PointerEvent::Up);

        // Offset (20,20) at scale 1: node lands at pointer - offset.
        let node = workspace.model().node(Id::new("a")).unwrap();
        assert_eq!(node.position, Point::new(100.0, 50.0));

        // The touching edge reflects the node's final center.
        let visual = workspace.surface().edge_visual(Id::new("ab")).unwrap();
        assert_eq!(visual.from, Point::new(200.0, 100.0));
        assert_eq!(visual.to, Point::new(400.0, 50.0));
    }

    #[test]
    fn test_drag_is_exact_after_many_moves() {
        let mut workspace = workspace_with_pair();

        workspace.handle_event(down_on_node("a", 0.0, 0.0));
        for step in 1..=50 {
            workspace.handle_event(move_to(step as f32 * 3.0, step as f32 * 2.0));
        }
        workspace.handle_event(move_to(77.0, 33.0));
        workspace.handle_event(PointerEvent::Up);

        // No drift: the stored position equals the final pointer position
        // exactly (offset was zero, scale 1).
        let node = workspace.model().node(Id::new("a")).unwrap();
        assert_eq!(node.position, Point::new(77.0, 33.0));
    }

    #[test]
    fn test_drag_under_zoom_and_pan() {
        let mut workspace = workspace_with_pair();

        // Zoom in once at the origin, then pan state by hand via a gesture.
        workspace.handle_event(PointerEvent::Wheel {
            position: Point::new(0.0, 0.0),
            direction: ZoomDirection::In,
        });
        let scale = workspace.viewport().scale();
        assert_approx_eq!(f32, scale, 1.1);

        // Node "a" is at canvas (0,0); on screen its top-left is the pan
        // offset (zero here). Grab its center and move.
        workspace.handle_event(down_on_node("a", 110.0, 55.0));
        workspace.handle_event(move_to(220.0, 110.0));
        workspace.handle_event(PointerEvent::Up);

        // Screen delta (110,55) maps to canvas delta (100,50) at scale 1.1.
        let node = workspace.model().node(Id::new("a")).unwrap();
        assert_approx_eq!(f32, node.position.x(), 100.0, epsilon = 1e-3);
        assert_approx_eq!(f32, node.position.y(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_states_never_overlap() {
        let mut workspace = workspace_with_pair();
        let events = [
            down_on_background(0.0, 0.0),
            move_to(5.0, 5.0),
            PointerEvent::Up,
            down_on_node("a", 10.0, 10.0),
            move_to(50.0, 50.0),
            PointerEvent::Wheel {
                position: Point::new(50.0, 50.0),
                direction: ZoomDirection::Out,
            },
            move_to(60.0, 60.0),
            PointerEvent::Leave,
        ];

        for event in events {
            workspace.handle_event(event);
            let state = workspace.interaction_state();
            assert!(!(state.is_panning() && state.is_dragging()));
        }
        assert_eq!(*workspace.interaction_state(), InteractionState::Idle);
    }

    #[test]
    fn test_leave_cancels_pan() {
        let mut workspace = workspace_with_pair();

        workspace.handle_event(down_on_background(0.0, 0.0));
        workspace.handle_event(PointerEvent::Leave);
        assert_eq!(*workspace.interaction_state(), InteractionState::Idle);

        // Moves after the cancel do nothing.
        let pan_before = workspace.viewport().pan();
        workspace.handle_event(move_to(100.0, 100.0));
        assert_eq!(workspace.viewport().pan(), pan_before);
    }

    #[test]
    fn test_down_on_unknown_node_is_side_effect_free() {
        let mut workspace = workspace_with_pair();

        workspace.handle_event(down_on_node("ghost", 0.0, 0.0));

        assert_eq!(*workspace.interaction_state(), InteractionState::Idle);
        assert_eq!(workspace.viewport(), &ViewportTransform::default());
    }

    #[test]
    fn test_wheel_during_drag_keeps_drag_alive() {
        let mut workspace = workspace_with_pair();

        workspace.handle_event(down_on_node("a", 0.0, 0.0));
        workspace.handle_event(PointerEvent::Wheel {
            position: Point::new(200.0, 200.0),
            direction: ZoomDirection::In,
        });

        // Zoom touched only the viewport; the drag is still active.
        assert!(workspace.interaction_state().is_dragging());
        assert_approx_eq!(f32, workspace.viewport().scale(), 1.1);
    }

    #[test]
    fn test_scale_limits_skip_zoom_step() {
        let config = ViewportConfig::default();
        // Rebuild config with tight limits via serde to keep fields private.
        let config: ViewportConfig = serde_json::from_str(
            r#"{ "zoom_intensity": 0.1, "scale_limits": { "min": 0.95, "max": 1.05 } }"#,
        )
        .unwrap_or(config);

        let mut workspace = Workspace::with_config(RecordingSurface::new(), config);
        workspace.handle_event(PointerEvent::Wheel {
            position: Point::new(100.0, 100.0),
            direction: ZoomDirection::In,
        });

        // 1.1 is out of range: the whole step is skipped, not clamped.
        assert_eq!(workspace.viewport().scale(), 1.0);
        assert!(workspace.viewport().pan().is_zero());
    }

    #[test]
    fn test_add_node_creates_sprite_immediately() {
        let mut workspace = Workspace::new(RecordingSurface::new());
        workspace
            .add_node(Node::new(Id::new("solo"), "solo", ""))
            .unwrap();

        assert_eq!(
            workspace.surface().ops(),
            &[SurfaceOp::CreateNode(Id::new("solo"))]
        );
    }

    #[test]
    fn test_clear_empties_model_and_surface() {
        let mut workspace = workspace_with_pair();
        workspace.clear();

        assert_eq!(workspace.model().node_count(), 0);
        assert_eq!(workspace.model().edge_count(), 0);
        assert_eq!(workspace.surface().node_sprite_count(), 0);
        assert_eq!(workspace.surface().edge_sprite_count(), 0);
    }
}
