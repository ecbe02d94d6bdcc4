//! The pan/zoom transform between screen space and logical canvas space.
//!
//! This module provides [`ViewportTransform`], the single source of truth for
//! how the diagram canvas is currently panned and zoomed. Pointer events
//! arrive in screen coordinates; node positions live in logical canvas
//! coordinates; the transform converts between the two and implements
//! cursor-anchored zooming.
//!
//! # Anchored zoom
//!
//! A zoom step scales the canvas around the pointer: the canvas point under
//! the cursor before the step is still under the cursor after it. Given the
//! cursor at screen position `c`, the logical point under it is
//! `p = (c - pan) / scale`; after picking the new scale `s'`, the new pan is
//! solved from `c = p * s' + pan'`.
//!
//! The transform itself enforces no scale bounds. A caller that wants them
//! applies a [`ScaleLimits`] policy to the candidate transform before
//! committing it.
//!
//! # Composed transform
//!
//! Renderers apply the single affine `translate(pan) · scale(scale)` to the
//! whole canvas, node layer and edge layer alike, so the two layers can
//! never desynchronize under pan or zoom.

use serde::Deserialize;

use crate::geometry::Point;

/// Default multiplier applied per wheel step when zooming.
pub const DEFAULT_ZOOM_INTENSITY: f32 = 0.1;

/// Direction of a zoom step, derived from the wheel delta sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Wheel up: magnify.
    In,
    /// Wheel down: shrink.
    Out,
}

impl ZoomDirection {
    /// The sign this direction contributes to the scale factor.
    pub fn delta_sign(self) -> f32 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Optional scale clamp policy consulted before committing a zoom step.
///
/// A candidate scale outside the range rejects the whole step rather than
/// saturating at the bound; the viewport stays exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScaleLimits {
    /// Smallest scale a zoom step may produce.
    min: f32,
    /// Largest scale a zoom step may produce.
    max: f32,
}

impl ScaleLimits {
    /// Creates a new limit range.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `scale` falls inside the permitted range.
    pub fn allows(&self, scale: f32) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// Scale and pan state of the diagram canvas.
///
/// Initialized to `scale = 1, pan = (0, 0)` at workspace startup and mutated
/// only by the interaction layer. The transform is never persisted by the
/// engine; a collaborator may snapshot and restore it.
///
/// # Examples
///
/// ```
/// # use arguendo_core::geometry::Point;
/// # use arguendo_core::viewport::ViewportTransform;
/// let mut viewport = ViewportTransform::default();
/// viewport.apply_pan(Point::new(30.0, -10.0));
///
/// let canvas = viewport.screen_to_canvas(Point::new(30.0, 0.0));
/// assert_eq!(canvas, Point::new(0.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    scale: f32,
    pan: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Point::default(),
        }
    }
}

impl ViewportTransform {
    /// Creates a transform with an explicit scale and pan.
    pub fn new(scale: f32, pan: Point) -> Self {
        Self { scale, pan }
    }

    /// Returns the current scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the current pan offset in screen units.
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Converts a screen position to logical canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        screen.sub_point(self.pan).scale(1.0 / self.scale)
    }

    /// Converts a logical canvas position to screen coordinates.
    ///
    /// Exact inverse of [`screen_to_canvas`](Self::screen_to_canvas).
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas.scale(self.scale).add_point(self.pan)
    }

    /// Shifts the pan offset by a screen-space delta. No bounds.
    pub fn apply_pan(&mut self, delta: Point) {
        self.pan = self.pan.add_point(delta);
    }

    /// Computes the transform after one anchored zoom step, without
    /// committing it.
    ///
    /// The canvas point under `cursor` (a screen position) is unchanged on
    /// screen between `self` and the returned transform. Callers with a
    /// [`ScaleLimits`] policy check the candidate's scale before committing.
    pub fn zoomed(&self, cursor: Point, direction: ZoomDirection, intensity: f32) -> Self {
        let new_scale = self.scale * (1.0 + direction.delta_sign() * intensity);

        // The logical point currently under the cursor...
        let anchor = self.screen_to_canvas(cursor);
        // ...must map back to the cursor under the new scale.
        let pan = cursor.sub_point(anchor.scale(new_scale));

        Self {
            scale: new_scale,
            pan,
        }
    }

    /// Commits one anchored zoom step.
    pub fn apply_zoom(&mut self, cursor: Point, direction: ZoomDirection, intensity: f32) {
        *self = self.zoomed(cursor, direction, intensity);
    }
}
