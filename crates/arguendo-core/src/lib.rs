//! Core types and definitions for Arguendo argumentation diagrams.
//!
//! This crate provides the primitives shared by the Arguendo engine and its
//! front ends:
//!
//! - [`geometry`] - 2D points and sizes in canvas space
//! - [`identifier`] - interned identifiers for nodes and edges
//! - [`color`] - CSS color handling for strokes and labels
//! - [`viewport`] - the pan/zoom transform between screen and canvas space

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod viewport;
