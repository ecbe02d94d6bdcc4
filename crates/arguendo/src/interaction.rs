//! Pointer interaction vocabulary: events and the interaction state machine.
//!
//! The workspace is driven entirely by [`PointerEvent`]s. At any moment the
//! controller is in exactly one [`InteractionState`]; panning and node
//! dragging are mutually exclusive by construction because a pointer-down
//! event carries a single [`PointerTarget`].
//!
//! ```text
//!            Down(Background)            Down(Node(id))
//!   Idle ───────────────────► Panning        │
//!     ▲                          │           ▼
//!     │        Up | Leave        │      DraggingNode(id)
//!     └──────────────────────────┴───────────┘
//! ```
//!
//! `Move` keeps the current state, panning the viewport or dragging the
//! node. `Wheel` is independent of the states above and is accepted in any
//! of them.

use arguendo_core::{geometry::Point, identifier::Id, viewport::ZoomDirection};

/// What a pointer-down event hit.
///
/// Events are scoped to either the background or one node, never both; the
/// surface dispatching events decides before the engine sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The empty canvas behind the nodes.
    Background,
    /// A node, identified by its model id.
    Node(Id),
}

/// A pointer or wheel event in workspace-area screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        target: PointerTarget,
        position: Point,
    },
    Move {
        position: Point,
    },
    Up,
    /// The pointer left the tracked area; treated exactly like `Up` so no
    /// gesture is ever left stuck.
    Leave,
    Wheel {
        position: Point,
        direction: ZoomDirection,
    },
}

/// Exclusive interaction state held by the workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Background pan in progress; `last` is the previous pointer position
    /// used to compute screen-space deltas.
    Panning { last: Point },
    /// A node drag in progress. `offset` is the pointer's screen-space
    /// offset from the node's top-left corner, recorded at pointer-down.
    DraggingNode { id: Id, offset: Point },
}

impl InteractionState {
    /// Returns `true` while a background pan is active.
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Returns `true` while a node drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingNode { .. })
    }

    /// Returns the id of the node being dragged, if any.
    pub fn dragged_node(&self) -> Option<Id> {
        match self {
            Self::DraggingNode { id, .. } => Some(*id),
            _ => None,
        }
    }
}
