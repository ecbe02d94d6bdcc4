//! Derived edge geometry: line endpoints, stroke color, and label placement.
//!
//! Everything here is a pure function of model state. The renderer feeds the
//! result to a surface; nothing in this module touches a surface itself.

use arguendo_core::{color::Color, geometry::Point};

use crate::model::{Edge, Node, condition_stroke};

/// Vertical offset of the condition label, above the line.
const CONDITION_LABEL_DY: f32 = -5.0;
/// Vertical offset of the probability label when a condition label is shown.
const PROBABILITY_LABEL_DY_STACKED: f32 = 15.0;
/// Vertical offset of the probability label when it stands alone.
const PROBABILITY_LABEL_DY_ALONE: f32 = 5.0;

const CONDITION_FONT_SIZE: f32 = 12.0;
const PROBABILITY_FONT_SIZE: f32 = 10.0;

/// A text label anchored near the midpoint of an edge line.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    /// Midpoint anchor in canvas units.
    pub anchor: Point,
    /// Vertical offset from the anchor.
    pub dy: f32,
    pub text: String,
    pub color: Color,
    pub font_size: f32,
}

/// Everything a surface needs to draw one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeVisual {
    pub from: Point,
    pub to: Point,
    pub stroke: Color,
    pub condition_label: Option<EdgeLabel>,
    pub probability_label: Option<EdgeLabel>,
}

impl EdgeVisual {
    /// Midpoint of the line, the anchor for both labels.
    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }
}

/// Derives the visual for an edge from its endpoint nodes.
///
/// Anchor points are each node's geometric center, with the model's
/// width/height fallbacks covering unresolved auto heights. The condition
/// label is present iff the edge carries a condition; the probability label
/// is present iff the probability differs from exactly `1.0` ("certain" is
/// suppressed to reduce clutter) and reads `P=` followed by the value to two
/// decimal places.
///
/// Returns `None` when either endpoint is absent — a dangling edge has no
/// visual, and that is not an error. The caller renders nothing and removes
/// any prior visual for the edge.
pub fn compute_edge_visual(
    edge: &Edge,
    source: Option<&Node>,
    target: Option<&Node>,
) -> Option<EdgeVisual> {
    let (source, target) = match (source, target) {
        (Some(source), Some(target)) => (source, target),
        _ => return None,
    };

    let from = source.center();
    let to = target.center();
    let mid = from.midpoint(to);
    let stroke = condition_stroke(edge.condition);

    let condition_label = edge.condition.map(|condition| EdgeLabel {
        anchor: mid,
        dy: CONDITION_LABEL_DY,
        text: condition.tag().to_string(),
        color: stroke,
        font_size: CONDITION_FONT_SIZE,
    });

    let probability_label = (edge.probability != 1.0).then(|| EdgeLabel {
        anchor: mid,
        dy: if condition_label.is_some() {
            PROBABILITY_LABEL_DY_STACKED
        } else {
            PROBABILITY_LABEL_DY_ALONE
        },
        text: format!("P={:.2}", edge.probability),
        color: Color::named("black"),
        font_size: PROBABILITY_FONT_SIZE,
    });

    Some(EdgeVisual {
        from,
        to,
        stroke,
        condition_label,
        probability_label,
    })
}
